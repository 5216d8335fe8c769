use crate::{configuration::error::ConfigError, schema::error::SchemaValidationError};
use hyper::http;
use std::{fmt::Display, io, time::Duration};

#[derive(Debug)]
pub enum Error {
    ConfigError(ConfigError),
    NetworkError(NetworkError),
    ResponseParseError(serde_json::Error),
    SchemaNotFoundError(String),
    SchemaParseError(String, serde_json::Error),
    InvalidSchema(String, String),
    SchemaValidationError(SchemaValidationError),
    InvalidMarkerExpression(String),
    InvalidHeaderName,
    InvalidHeaderValue,
    HttpError(http::Error),
    IoError(io::Error),
}

impl Error {
    /// Connection failures and timeouts are worth another attempt, everything else is final.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::NetworkError(_))
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ConfigError(e) => write!(f, "Configuration error: {}", e),
            Error::NetworkError(e) => write!(f, "Network error: {}", e),
            Error::ResponseParseError(e) => write!(f, "Response body is not valid JSON: {}", e),
            Error::SchemaNotFoundError(name) => write!(f, "Schema file not found: {}", name),
            Error::SchemaParseError(name, e) => write!(f, "Invalid JSON in schema {}: {}", name, e),
            Error::InvalidSchema(name, reason) => {
                write!(f, "Schema {} is not a valid Draft-07 schema: {}", name, reason)
            }
            Error::SchemaValidationError(e) => write!(f, "{}", e),
            Error::InvalidMarkerExpression(expression) => {
                write!(f, "Invalid marker expression: \"{}\"", expression)
            }
            Error::InvalidHeaderName => write!(f, "Invalid header name"),
            Error::InvalidHeaderValue => write!(f, "Invalid header value"),
            Error::HttpError(e) => write!(f, "Http Error: {}", e),
            Error::IoError(e) => write!(f, "IoError: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum NetworkErrorCause {
    Timeout(Duration),
    Connection(hyper::Error),
}

/// A request that never produced an HTTP response.
#[derive(Debug)]
pub struct NetworkError {
    pub url: String,
    pub attempts: u32,
    pub cause: NetworkErrorCause,
}

impl NetworkError {
    pub fn timeout<S: Into<String>>(url: S, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            attempts: 1,
            cause: NetworkErrorCause::Timeout(timeout),
        }
    }

    pub fn connection<S: Into<String>>(url: S, error: hyper::Error) -> Self {
        Self {
            url: url.into(),
            attempts: 1,
            cause: NetworkErrorCause::Connection(error),
        }
    }
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            NetworkErrorCause::Timeout(timeout) => write!(
                f,
                "{} timed out after {:?} ({} attempt(s))",
                self.url, timeout, self.attempts
            ),
            NetworkErrorCause::Connection(e) => write!(
                f,
                "{} failed: {} ({} attempt(s))",
                self.url, e, self.attempts
            ),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::ConfigError(e)
    }
}

impl From<NetworkError> for Error {
    fn from(e: NetworkError) -> Self {
        Error::NetworkError(e)
    }
}

impl From<SchemaValidationError> for Error {
    fn from(e: SchemaValidationError) -> Self {
        Error::SchemaValidationError(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IoError(e)
    }
}

impl From<hyper::header::InvalidHeaderName> for Error {
    fn from(_: hyper::header::InvalidHeaderName) -> Self {
        Error::InvalidHeaderName
    }
}

impl From<hyper::header::InvalidHeaderValue> for Error {
    fn from(_: hyper::header::InvalidHeaderValue) -> Self {
        Error::InvalidHeaderValue
    }
}

impl From<http::Error> for Error {
    fn from(e: http::Error) -> Self {
        Error::HttpError(e)
    }
}
