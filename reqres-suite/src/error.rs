use std::{fmt::Display, io, path::PathBuf};

#[derive(Debug)]
pub enum Error {
    UnexpectedStatus(u16, String),
    HarnessError(api_harness::Error),
    FixtureError(PathBuf, serde_json::Error),
    IoError(io::Error),
}

impl std::error::Error for Error {}

impl From<api_harness::Error> for Error {
    fn from(e: api_harness::Error) -> Self {
        Error::HarnessError(e)
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IoError(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnexpectedStatus(status_code, body) => {
                write!(f, "Unexpected status {}. Response: {}", status_code, body)
            }
            Error::HarnessError(e) => write!(f, "{}", e),
            Error::FixtureError(path, e) => {
                write!(f, "Invalid fixture {}: {}", path.display(), e)
            }
            Error::IoError(e) => write!(f, "{}", e),
        }
    }
}
