//! Request descriptors and the HTTP client that executes them.
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::NetworkError;

pub mod reachability;

pub use reachability::{Reachability, StaticReachability, TcpReachability};

/// Everything needed to perform one HTTP call and decode its body.
pub trait ApiRequest: Send + Sync {
    type Response: Send;

    fn base_url(&self) -> &str;

    fn path(&self) -> &str;

    fn method(&self) -> Method {
        Method::GET
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    fn headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn body(&self) -> Option<Value> {
        None
    }

    fn map(&self, data: &[u8]) -> Result<Self::Response, serde_json::Error>;
}

#[derive(Clone)]
pub struct Networking {
    http: Client,
    reachability: Arc<dyn Reachability>,
}

impl fmt::Debug for Networking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Networking").finish_non_exhaustive()
    }
}

impl Networking {
    pub fn new(reachability: Arc<dyn Reachability>) -> Result<Self, NetworkError> {
        let http = Client::builder()
            .user_agent(concat!("movie-itunes/", env!("CARGO_PKG_VERSION")))
            .no_proxy()
            .build()
            .map_err(|err| NetworkError::invalid_request(err.to_string()))?;
        Ok(Self { http, reachability })
    }

    pub async fn is_connected(&self) -> bool {
        self.reachability.is_connected().await
    }

    pub fn build_request<R: ApiRequest>(&self, request: &R) -> Result<reqwest::Request, NetworkError> {
        let mut url = Url::parse(request.base_url())
            .and_then(|base| base.join(request.path()))
            .map_err(|err| NetworkError::invalid_request(format!("invalid URL: {}", err)))?;
        let query = request.query();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let mut builder = self.http.request(request.method(), url);
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body() {
            builder = builder.json(&body);
        }
        builder
            .build()
            .map_err(|err| NetworkError::invalid_request(err.to_string()))
    }

    /// Perform exactly one HTTP call for `request`. Failures are returned once;
    /// nothing is retried.
    pub async fn request<R: ApiRequest>(&self, request: &R) -> Result<R::Response, NetworkError> {
        if !self.reachability.is_connected().await {
            return Err(NetworkError::no_internet());
        }

        let http_request = self.build_request(request)?;
        debug!(method = %http_request.method(), url = %http_request.url(), "sending request");

        let res = self
            .http
            .execute(http_request)
            .await
            .map_err(|err| NetworkError::failed_response(err.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(%status, body = %body, "request failed");
            return Err(NetworkError::status(status.as_u16(), status.to_string()));
        }

        let data = res
            .bytes()
            .await
            .map_err(|err| NetworkError::no_data(err.to_string()))?;
        if data.is_empty() {
            return Err(NetworkError::no_data("empty response body"));
        }

        request
            .map(&data)
            .map_err(|err| NetworkError::serialization(err.to_string()))
    }
}
