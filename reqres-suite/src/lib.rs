pub mod data;
mod error;
mod fixtures;
mod reqres_client;

pub use error::Error;
pub use fixtures::{large_payload, post_user_payloads, DATA_DIRECTORY};
pub use reqres_client::ReqResClient;

use api_harness::{shared_session_with, EnvOverrides, TestSession};
use std::{env, path::PathBuf, sync::Arc};

/// Directory holding `config/`, `schemas/` and `data/`.
pub const SUITE_ROOT: &str = env!("CARGO_MANIFEST_DIR");
pub const SUITE_ROOT_VARIABLE: &str = "API_TEST_ROOT";

/// Schemas a session refuses to open without.
pub const REQUIRED_SCHEMAS: &[&str] = &["user_list_schema.json"];

/// `API_TEST_ROOT` when set, this crate's directory otherwise.
pub fn suite_root() -> PathBuf {
    root_or_default(env::var(SUITE_ROOT_VARIABLE).ok())
}

fn root_or_default(root: Option<String>) -> PathBuf {
    match root {
        Some(root) if !root.trim().is_empty() => PathBuf::from(root),
        _ => PathBuf::from(SUITE_ROOT),
    }
}

/// The session shared by every live ReqRes test in this process.
pub fn session() -> Result<Arc<TestSession>, api_harness::Error> {
    shared_session_with(suite_root(), &EnvOverrides::from_env(), REQUIRED_SCHEMAS)
}
