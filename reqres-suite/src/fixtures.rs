use crate::{data::users::CreateUser, error::Error, suite_root};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{fs, path::Path};

pub const DATA_DIRECTORY: &str = "data";

/// Payloads for the data-driven user creation test.
pub fn post_user_payloads() -> Result<Vec<CreateUser>, Error> {
    load("post_user_payloads.json")
}

/// An oversized creation payload for the boundary test.
pub fn large_payload() -> Result<Value, Error> {
    load("large_payload.json")
}

fn load<T: DeserializeOwned>(name: &str) -> Result<T, Error> {
    load_from(&suite_root(), name)
}

fn load_from<T: DeserializeOwned>(root: &Path, name: &str) -> Result<T, Error> {
    let path = root.join(DATA_DIRECTORY).join(name);
    let contents = fs::read_to_string(&path)?;

    serde_json::from_str(&contents).map_err(|e| Error::FixtureError(path, e))
}
