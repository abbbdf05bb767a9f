use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "default_rounds")]
    pub rounds: usize,
    /// Optional pre-filled credential. The key field in the UI always wins;
    /// this only seeds its initial contents.
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            rounds: default_rounds(),
            api_key: None,
        }
    }
}

fn default_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}
fn default_model() -> String {
    "claude-3-5-sonnet-20240620".to_string()
}
fn default_max_tokens() -> usize {
    1000
}
fn default_rounds() -> usize {
    3
}

impl Config {
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config from {}", p))?;
                toml::from_str(&content).context("Failed to parse config")?
            }
            None => {
                let mut found = None;
                for p in Self::default_paths() {
                    if let Ok(content) = std::fs::read_to_string(&p) {
                        found =
                            Some(toml::from_str(&content).context("Failed to parse config")?);
                        break;
                    }
                }
                found.unwrap_or_else(|| {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                })
            }
        };

        // Environment fallback for the credential; never logged.
        if config.api_key.is_none() {
            config.api_key = std::env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.is_empty());
        }

        Ok(config)
    }

    fn default_paths() -> Vec<std::path::PathBuf> {
        let mut paths = vec![std::path::PathBuf::from("smellhunt.toml")];
        if let Some(home) = dirs::config_dir() {
            paths.push(home.join("smellhunt").join("config.toml"));
        }
        paths
    }
}
