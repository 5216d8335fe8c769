mod api_client;
pub mod configuration;
mod data;
mod error;
mod http_client;
pub mod logging;
pub mod markers;
pub mod retry;
pub mod schema;
mod test_session;
mod util;

pub use api_client::ApiClient;
pub use api_harness_codegen::api_test;
pub use configuration::{error::ConfigError, load_config, Configuration, EnvOverrides};
pub use data::{RequestData, ResponseData};
pub use error::{Error, NetworkError, NetworkErrorCause};
pub use http_client::{HttpClient, HyperHttpClient};
pub use hyper::Method;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use schema::{
    error::{Constraint, SchemaValidationError, Violation},
    validate, SchemaDocument, SchemaStore,
};
pub use test_session::{
    block_on, shared_session, shared_session_with, write_environment_properties, TestSession,
};
