use crate::{
    configuration::Configuration,
    data::{RequestData, ResponseData},
    error::Error,
    http_client::{HttpClient, HyperHttpClient},
    retry::{self, Sleeper, TokioSleeper},
    util,
};
use hyper::Method;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, info};

const AUTHORIZATION: &str = "authorization";

/// Sends requests to the active environment of a [`Configuration`].
///
/// Every request gets the configured default headers, the configured timeout and the configured
/// retry policy. Cloning is cheap; clones share the configuration and the transport.
#[derive(Debug, Clone)]
pub struct ApiClient {
    configuration: Arc<Configuration>,
    http_client: Arc<dyn HttpClient + Send + Sync>,
    sleeper: Arc<dyn Sleeper + Send + Sync>,
}

impl ApiClient {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self {
            configuration,
            http_client: Arc::new(HyperHttpClient::new()),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient + Send + Sync>) -> Self {
        self.http_client = http_client;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper + Send + Sync>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn url_for(&self, path: &str) -> String {
        util::join_url(self.configuration.effective_base_url(), path)
    }

    /// Sends `method` to `path` of the active environment.
    ///
    /// # Arguments
    /// `json_body` - serialized as the request body when present.
    /// `headers` - merged over the default headers, winning on name collisions.
    ///
    /// # Returns
    /// The first non-transient response, or the last 5xx response once retries are exhausted. HTTP
    /// error statuses are not errors.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        json_body: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<ResponseData, Error> {
        let mut request_data = RequestData::new(method, path);

        if let Some(headers) = headers {
            request_data = request_data.with_headers(headers);
        }
        if let Some(json_body) = json_body {
            request_data = request_data.with_json(json_body);
        }

        self.send(request_data).await
    }

    pub async fn get(&self, path: &str) -> Result<ResponseData, Error> {
        self.request(Method::GET, path, None, None).await
    }

    pub async fn post(&self, path: &str, json_body: &Value) -> Result<ResponseData, Error> {
        self.request(Method::POST, path, Some(json_body), None).await
    }

    pub async fn put(&self, path: &str, json_body: &Value) -> Result<ResponseData, Error> {
        self.request(Method::PUT, path, Some(json_body), None).await
    }

    pub async fn patch(&self, path: &str, json_body: &Value) -> Result<ResponseData, Error> {
        self.request(Method::PATCH, path, Some(json_body), None).await
    }

    pub async fn delete(&self, path: &str) -> Result<ResponseData, Error> {
        self.request(Method::DELETE, path, None, None).await
    }

    pub async fn send(&self, request_data: RequestData) -> Result<ResponseData, Error> {
        let url = self.url_for(&request_data.path);
        let outgoing = RequestData {
            headers: self.resolve_headers(&request_data.headers),
            ..request_data
        };
        let timeout = self.configuration.timeout();
        let http_client = &self.http_client;

        debug!(
            "{} {}\nHeaders: {:?}\nBody: {}",
            outgoing.method,
            url,
            outgoing.headers,
            outgoing.body.as_deref().unwrap_or("")
        );

        let response = retry::retry(
            &self.configuration.retry_policy(),
            self.sleeper.as_ref(),
            |attempt| {
                debug!("Attempt {} for {} {}", attempt, outgoing.method, url);
                http_client.make_request(&url, &outgoing, timeout)
            },
        )
        .await?;

        info!(
            "{} {} -> {} in {:?}",
            outgoing.method, url, response.status_code, response.elapsed
        );
        debug!(
            "Status Code: {}\nHeaders: {:?}\nBody: {}",
            response.status_code,
            response.headers,
            response.text()
        );

        Ok(response)
    }

    fn resolve_headers(&self, overrides: &HashMap<String, String>) -> HashMap<String, String> {
        let defaults = self.configuration.default_headers();
        let mut token_header = HashMap::new();

        if let Some(token) = self.configuration.effective_token() {
            if !defaults
                .keys()
                .any(|name| name.eq_ignore_ascii_case(AUTHORIZATION))
            {
                token_header.insert(String::from(AUTHORIZATION), format!("Bearer {}", token));
            }
        }

        util::merge_headers(vec![defaults, &token_header, overrides])
    }
}
