use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match smellhunt::cli::run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(smellhunt::errors::get_exit_code(&e))
        }
    }
}
