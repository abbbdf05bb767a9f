use thiserror::Error;

/// The central error type for smellhunt.
///
/// Input errors are caught before a request is dispatched and rendered
/// inline; API errors surface from the remote call boundary.
#[derive(Error, Debug)]
pub enum SmellhuntError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Validation failures on the form fields. These never reach the runner:
/// the orchestrator checks them synchronously and shows the message inline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a valid Anthropic API key.")]
    MissingCredential,

    #[error("Please enter an area to improve.")]
    MissingTopic,

    #[error("Please create an example first.")]
    MissingExample,
}

/// Failures surfaced by the remote text-generation call. The message is the
/// library's own description; nothing is reinterpreted or retried.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("API returned status {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("Response contained no text content")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, SmellhuntError>;

/// Map an error to a process exit code. 0 is reserved for a normal quit.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<SmellhuntError>() {
        Some(SmellhuntError::Config(_)) => 2,
        Some(SmellhuntError::Terminal(_)) => 3,
        _ => 1,
    }
}
