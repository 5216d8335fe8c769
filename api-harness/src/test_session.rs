use crate::{
    api_client::ApiClient,
    configuration::{Configuration, EnvOverrides},
    data::ResponseData,
    error::Error,
    logging,
    schema::{SchemaDocument, SchemaStore},
};
use hyper::Method;
use lazy_static::lazy_static;
use serde_json::Value;
use std::{
    collections::HashMap,
    fs::{self, File},
    future::Future,
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::info;

pub const CONFIG_FILE: &str = "config/config.yaml";
pub const SCHEMA_DIRECTORY: &str = "schemas";
pub const REPORTS_DIRECTORY: &str = "reports";
pub const ENVIRONMENT_PROPERTIES_FILE: &str = "environment.properties";

lazy_static! {
    static ref SHARED_SESSIONS: Mutex<HashMap<PathBuf, Arc<TestSession>>> =
        Mutex::new(HashMap::new());
}

/// Everything a test needs: the loaded configuration, a client for the active environment and the
/// schema store.
#[derive(Debug)]
pub struct TestSession {
    configuration: Arc<Configuration>,
    client: ApiClient,
    schemas: SchemaStore,
}

impl TestSession {
    pub fn new<P: Into<PathBuf>>(configuration: Configuration, schema_directory: P) -> Self {
        let configuration = Arc::new(configuration);

        Self {
            client: ApiClient::new(configuration.clone()),
            configuration,
            schemas: SchemaStore::new(schema_directory),
        }
    }

    /// Opens the suite rooted at `root`: `config/config.yaml`, `schemas/` and `reports/`.
    ///
    /// Overrides come from `TEST_ENV` and `API_TOKEN`. See [`TestSession::open_with`].
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
        Self::open_with(root, &EnvOverrides::from_env(), &[])
    }

    /// Opens the suite rooted at `root` with explicit overrides.
    ///
    /// Also initializes logging and writes `reports/environment.properties` for the report tool.
    ///
    /// # Errors
    /// `ConfigError` for a bad configuration, `SchemaNotFoundError` when the schema directory or
    /// one of `required_schemas` is missing. Required schemas are compiled up front.
    pub fn open_with<P: AsRef<Path>>(
        root: P,
        overrides: &EnvOverrides,
        required_schemas: &[&str],
    ) -> Result<Self, Error> {
        logging::init();

        let root = root.as_ref();
        let configuration = Configuration::load(root.join(CONFIG_FILE), overrides)?;

        let schema_directory = root.join(SCHEMA_DIRECTORY);
        if !schema_directory.is_dir() {
            return Err(Error::SchemaNotFoundError(
                schema_directory.display().to_string(),
            ));
        }

        let session = Self::new(configuration, schema_directory);
        for name in required_schemas {
            session.load_schema(name)?;
        }

        write_environment_properties(&root.join(REPORTS_DIRECTORY), session.configuration())?;

        info!(
            "Test session for environment {} at {}",
            session.configuration().active_environment(),
            session.configuration().effective_base_url()
        );

        Ok(session)
    }

    /// Replaces the client, e.g. with one using a different transport.
    pub fn with_client(mut self, client: ApiClient) -> Self {
        self.client = client;
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn schemas(&self) -> &SchemaStore {
        &self.schemas
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        json_body: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<ResponseData, Error> {
        self.client.request(method, path, json_body, headers).await
    }

    pub async fn get(&self, path: &str) -> Result<ResponseData, Error> {
        self.client.get(path).await
    }

    pub async fn post(&self, path: &str, json_body: &Value) -> Result<ResponseData, Error> {
        self.client.post(path, json_body).await
    }

    pub fn load_schema(&self, name: &str) -> Result<Arc<SchemaDocument>, Error> {
        self.schemas.load_schema(name)
    }

    pub fn validate(&self, instance: &Value, schema_name: &str) -> Result<(), Error> {
        self.schemas.validate(instance, schema_name)
    }

    /// Parses the response body as JSON and validates it against `schema_name`.
    pub fn validate_response(
        &self,
        response: &ResponseData,
        schema_name: &str,
    ) -> Result<(), Error> {
        let instance = response.json_value()?;
        self.validate(&instance, schema_name)
    }
}

/// Returns the session rooted at `root`, opening it with [`TestSession::open`] on first use.
pub fn shared_session<P: AsRef<Path>>(root: P) -> Result<Arc<TestSession>, Error> {
    shared_session_with(root, &EnvOverrides::from_env(), &[])
}

/// Returns the session rooted at `root`, opening it with [`TestSession::open_with`] on first use.
pub fn shared_session_with<P: AsRef<Path>>(
    root: P,
    overrides: &EnvOverrides,
    required_schemas: &[&str],
) -> Result<Arc<TestSession>, Error> {
    let root = root.as_ref().to_path_buf();
    let mut sessions = SHARED_SESSIONS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(session) = sessions.get(&root) {
        return Ok(session.clone());
    }

    let session = Arc::new(TestSession::open_with(&root, overrides, required_schemas)?);
    sessions.insert(root, session.clone());

    Ok(session)
}

pub fn write_environment_properties(
    directory: &Path,
    configuration: &Configuration,
) -> Result<PathBuf, Error> {
    fs::create_dir_all(directory)?;

    let path = directory.join(ENVIRONMENT_PROPERTIES_FILE);
    let mut file = File::create(&path)?;
    writeln!(file, "BaseURL={}", configuration.effective_base_url())?;
    writeln!(file, "Environment={}", configuration.active_environment())?;
    writeln!(file, "Framework=API Test Automation")?;
    writeln!(file, "Language=Rust")?;

    Ok(path)
}

/// Drives `future` to completion on a fresh current-thread runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output, Error> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    Ok(runtime.block_on(future))
}
