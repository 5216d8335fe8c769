use crate::{
    data::{RequestData, ResponseData},
    error::{Error, NetworkError},
    util,
};
use async_trait::async_trait;
use hyper::{body, Body, Request};
use hyper_tls::HttpsConnector;
use std::{
    fmt::Debug,
    time::{Duration, Instant},
};

/// Performs a single HTTP exchange. Retrying is left to the caller.
#[async_trait]
pub trait HttpClient: Debug {
    /// # Errors
    /// `Error::NetworkError` when no response arrived within `timeout`, any other variant when the
    /// request could not be built.
    async fn make_request(
        &self,
        url: &str,
        request_data: &RequestData,
        timeout: Duration,
    ) -> Result<ResponseData, Error>;
}

#[derive(Debug)]
pub struct HyperHttpClient {}

impl HyperHttpClient {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl HttpClient for HyperHttpClient {
    async fn make_request(
        &self,
        url: &str,
        request_data: &RequestData,
        timeout: Duration,
    ) -> Result<ResponseData, Error> {
        let mut request_builder = Request::builder()
            .uri(url)
            .method(request_data.method.clone());

        if let Some(headers_mut) = request_builder.headers_mut() {
            util::put_headers(headers_mut, &request_data.headers)?;
        }

        let body = match &request_data.body {
            Some(body) => Body::from(body.clone()),
            None => Body::empty(),
        };
        let request: Request<Body> = request_builder.body(body)?;

        // built per request so pooled connections never outlive the runtime that drives them
        let client = hyper::Client::builder().build::<_, Body>(HttpsConnector::new());

        let started = Instant::now();
        let exchange = async {
            let response = client.request(request).await?;
            let status_code = response.status().as_u16();
            let headers = util::extract_headers(response.headers());
            let body = body::to_bytes(response.into_body()).await?;

            Ok::<_, hyper::Error>((status_code, headers, body))
        };

        let (status_code, headers, body) = match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok(parts)) => parts,
            Ok(Err(e)) => return Err(NetworkError::connection(url, e).into()),
            Err(_) => return Err(NetworkError::timeout(url, timeout).into()),
        };

        Ok(ResponseData {
            status_code,
            headers,
            body: body.to_vec(),
            elapsed: started.elapsed(),
        })
    }
}

impl Default for HyperHttpClient {
    fn default() -> Self {
        Self::new()
    }
}
