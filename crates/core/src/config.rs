use std::{
    fs::{self, File},
    io::Write,
    path::PathBuf,
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::assets::{get_config_dir, get_default_config};

#[derive(Error, Debug)]
pub enum AskbotConfigError {
    #[error("File system error: {0}")]
    IO(#[from] std::io::Error),
    #[error("YAML parsing error: {0}")]
    YAMLError(#[from] serde_yaml::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Where and how to reach the answer service.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Base URL; questions go to `<endpoint>/ask`.
    pub endpoint: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ServiceConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Resolves the URL questions are posted to.
    pub fn ask_url(&self) -> Result<Url, AskbotConfigError> {
        let base = Url::parse(&self.endpoint).map_err(|e| {
            AskbotConfigError::Config(format!("Invalid endpoint '{}': {e}", self.endpoint))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AskbotConfigError::Config(format!(
                "Endpoint '{}' must use http or https",
                self.endpoint
            )));
        }

        let mut url = base;
        let path = format!("{}/ask", url.path().trim_end_matches('/'));
        url.set_path(&path);
        Ok(url)
    }

    fn validate(&self) -> Result<(), AskbotConfigError> {
        self.ask_url()?;
        if self.timeout_secs == Some(0) {
            return Err(AskbotConfigError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Chat presentation settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChatConfig {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_error_prefix")]
    pub error_prefix: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            error_prefix: default_error_prefix(),
        }
    }
}

fn default_placeholder() -> String {
    "Bot is thinking...".to_string()
}

fn default_error_prefix() -> String {
    "Sorry, I encountered an error: ".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

impl Config {
    /// Replaces the configured endpoint, e.g. from a command line flag.
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Result<Self, AskbotConfigError> {
        if let Some(endpoint) = endpoint {
            self.service.endpoint = endpoint;
            self.service.validate()?;
        }
        Ok(self)
    }
}

#[instrument(skip(config_path))]
pub fn create_or_get_config_file(
    config_path: Option<PathBuf>,
) -> Result<(bool, PathBuf), AskbotConfigError> {
    let actual_path = config_path.unwrap_or_else(|| {
        let config_dir = get_config_dir();
        config_dir.join("askbot.yml")
    });

    let parent_dir = actual_path.parent().ok_or_else(|| {
        AskbotConfigError::IO(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Config path has no parent directory",
        ))
    })?;

    if !parent_dir.exists() {
        fs::create_dir_all(parent_dir)?;
    }

    if actual_path.exists() {
        Ok((true, actual_path))
    } else {
        File::create(&actual_path)?.write_all(get_default_config().as_bytes())?;
        Ok((false, actual_path))
    }
}

#[instrument(skip(config_path))]
pub fn get_config(config_path: Option<PathBuf>) -> Result<Config, AskbotConfigError> {
    let (_, config_file) = create_or_get_config_file(config_path)?;
    let content = fs::read_to_string(&config_file)?;
    let config: Config = serde_yaml::from_str(&content)?;
    config.service.validate()?;
    Ok(config)
}
