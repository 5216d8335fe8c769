pub mod error;

use crate::retry::RetryPolicy;
use error::ConfigError;
use hyper::header::{HeaderName, HeaderValue};
use serde::Deserialize;
use std::{collections::HashMap, env, fs, path::Path, time::Duration};

pub const TEST_ENV_VARIABLE: &str = "TEST_ENV";
pub const API_TOKEN_VARIABLE: &str = "API_TOKEN";

const DEFAULT_RETRY_DELAY_SECONDS: f64 = 1.0;

#[derive(Debug, Deserialize)]
struct ConfigurationFile {
    env: String,
    environments: HashMap<String, EnvironmentFile>,
    timeout_seconds: f64,
    #[serde(default)]
    retry_count: u32,
    #[serde(default = "default_retry_delay")]
    retry_delay: f64,
    default_headers: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct EnvironmentFile {
    base_url: String,
    #[serde(default)]
    token: String,
}

fn default_retry_delay() -> f64 {
    DEFAULT_RETRY_DELAY_SECONDS
}

/// Values taken from the process environment that win over the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub environment: Option<String>,
    pub token: Option<String>,
}

impl EnvOverrides {
    pub fn none() -> Self {
        Self::default()
    }

    /// Reads `TEST_ENV` and `API_TOKEN`, ignoring empty values.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`EnvOverrides::from_env`], with variables resolved through `lookup`.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            environment: read(TEST_ENV_VARIABLE),
            token: read(API_TOKEN_VARIABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    base_url: String,
    token: String,
}

impl Environment {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Settings of a test run, resolved for its active environment.
///
/// A `Configuration` never changes after it is loaded, so it can be shared between test threads
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Configuration {
    active_environment: String,
    active: Environment,
    environments: HashMap<String, Environment>,
    timeout: Duration,
    retry_policy: RetryPolicy,
    default_headers: HashMap<String, String>,
}

/// Loads the configuration file at `path`, applying the `TEST_ENV` and `API_TOKEN` overrides.
///
/// # Errors
/// `ConfigError` when the file is missing, empty or malformed, or when the active environment is
/// not one of the configured environments.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Configuration, ConfigError> {
    Configuration::load(path, &EnvOverrides::from_env())
}

impl Configuration {
    pub fn load<P: AsRef<Path>>(path: P, overrides: &EnvOverrides) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents, overrides)
    }

    pub fn from_yaml_str(contents: &str, overrides: &EnvOverrides) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Err(ConfigError::EmptyConfiguration);
        }

        let file: ConfigurationFile = serde_yaml::from_str(contents)?;
        Self::resolve(file, overrides)
    }

    fn resolve(file: ConfigurationFile, overrides: &EnvOverrides) -> Result<Self, ConfigError> {
        let active_environment = overrides.environment.clone().unwrap_or(file.env);

        let mut environments = file
            .environments
            .into_iter()
            .map(|(name, environment)| {
                (
                    name,
                    Environment {
                        base_url: environment.base_url.trim().to_string(),
                        token: environment.token,
                    },
                )
            })
            .collect::<HashMap<_, _>>();

        let active = environments
            .get_mut(&active_environment)
            .ok_or_else(|| ConfigError::UndefinedEnvironment(active_environment.clone()))?;

        if let Some(token) = &overrides.token {
            active.token = token.clone();
        }

        if active.base_url.is_empty() {
            return Err(ConfigError::MissingBaseUrl(active_environment));
        }

        if !active.base_url.starts_with("http://") && !active.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidBaseUrl(active_environment, active.base_url.clone()));
        }

        let active = active.clone();

        if !file.timeout_seconds.is_finite() || file.timeout_seconds <= 0.0 {
            return Err(ConfigError::InvalidTimeout(file.timeout_seconds));
        }
        let timeout = Duration::try_from_secs_f64(file.timeout_seconds)
            .map_err(|_| ConfigError::InvalidTimeout(file.timeout_seconds))?;

        let retry_delay = Duration::try_from_secs_f64(file.retry_delay)
            .map_err(|_| ConfigError::InvalidRetryDelay(file.retry_delay))?;

        for (name, value) in &file.default_headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err()
                || HeaderValue::from_str(value).is_err()
            {
                return Err(ConfigError::InvalidDefaultHeader(name.clone()));
            }
        }

        Ok(Self {
            active_environment,
            active,
            environments,
            timeout,
            retry_policy: RetryPolicy::new(file.retry_count, retry_delay),
            default_headers: file.default_headers,
        })
    }

    pub fn active_environment(&self) -> &str {
        &self.active_environment
    }

    pub fn environment(&self, name: &str) -> Option<&Environment> {
        self.environments.get(name)
    }

    pub fn environment_names(&self) -> impl Iterator<Item = &String> {
        self.environments.keys()
    }

    pub fn effective_base_url(&self) -> &str {
        &self.active.base_url
    }

    pub fn effective_token(&self) -> Option<&str> {
        Some(self.active.token.as_str()).filter(|token| !token.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    pub fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }
}
