//! Connection handling and shared request plumbing.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;

use neorest_core::{GraphConfig, GraphError};

/// REST endpoint URLs derived from the data-API root.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub base: String,
    pub node: String,
    pub relationship: String,
    pub batch: String,
    pub index_node: String,
    pub cypher: String,
}

impl Endpoints {
    fn new(base: String) -> Self {
        Self {
            node: format!("{base}/node"),
            relationship: format!("{base}/relationship"),
            batch: format!("{base}/batch"),
            index_node: format!("{base}/index/node"),
            cypher: format!("{base}/cypher"),
            base,
        }
    }
}

/// Client for a Neo4j REST endpoint.
///
/// This is the single point of access for all graph operations. Clone is
/// cheap (the underlying HTTP client is an inner Arc).
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl GraphClient {
    /// Build a client for the given configuration.
    ///
    /// No network traffic happens here; the server is first contacted by
    /// the operation methods.
    pub fn connect(config: &GraphConfig) -> Self {
        Self::from_base_url(config.base_url())
    }

    /// Build a client for an explicit data-API root, e.g.
    /// `http://127.0.0.1:7474/db/data`.
    pub fn from_base_url(base: impl Into<String>) -> Self {
        let endpoints = Endpoints::new(base.into());
        tracing::info!(base = %endpoints.base, "using Neo4j REST endpoint");
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }

    /// The endpoint URLs this client talks to.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send one JSON request and decode the response body.
    ///
    /// Any 2xx status is a success; empty bodies (204 deletes/updates)
    /// decode to `Value::Null`. Non-2xx statuses surface as
    /// [`GraphError::Status`] with the status text and the error body.
    pub(crate) async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, GraphError> {
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%method, url, %status, "REST call");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::Status {
                status: status.to_string(),
                body,
            });
        }

        let text = response.text().await?;
        if text.is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
