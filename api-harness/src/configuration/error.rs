use std::{fmt::Display, io, path::PathBuf};

#[derive(Debug)]
pub enum ConfigError {
    NotFound(PathBuf),
    IoError(io::Error),
    EmptyConfiguration,
    MalformedConfiguration(serde_yaml::Error),
    UndefinedEnvironment(String),
    MissingBaseUrl(String),
    InvalidBaseUrl(String, String),
    InvalidTimeout(f64),
    InvalidRetryDelay(f64),
    InvalidDefaultHeader(String),
}

impl std::error::Error for ConfigError {}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found at {}", path.display())
            }
            ConfigError::IoError(e) => write!(f, "IoError: {}", e),
            ConfigError::EmptyConfiguration => write!(f, "Empty configuration file"),
            ConfigError::MalformedConfiguration(e) => {
                write!(f, "Error parsing configuration: {}", e)
            }
            ConfigError::UndefinedEnvironment(env) => {
                write!(f, "Environment '{}' not found in config", env)
            }
            ConfigError::MissingBaseUrl(env) => {
                write!(f, "Base URL not configured for environment: {}", env)
            }
            ConfigError::InvalidBaseUrl(env, url) => write!(
                f,
                "Base URL \"{}\" of environment {} should start with http:// or https://",
                url, env
            ),
            ConfigError::InvalidTimeout(value) => write!(
                f,
                "timeout_seconds should be a positive number, got {}",
                value
            ),
            ConfigError::InvalidRetryDelay(value) => write!(
                f,
                "retry_delay should be a non-negative number, got {}",
                value
            ),
            ConfigError::InvalidDefaultHeader(name) => {
                write!(f, "Default header \"{}\" is not a valid HTTP header", name)
            }
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::MalformedConfiguration(e)
    }
}
