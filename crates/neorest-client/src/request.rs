//! Generic low-level request helper for arbitrary REST calls.

use reqwest::Method;
use serde_json::Value;
use url::Url;

use neorest_core::GraphError;

use crate::client::GraphClient;

/// An arbitrary REST call: method, target, and query-string parameters.
///
/// `to` may be an absolute URL or a path relative to the data-API root
/// (e.g. `/node/4/traverse/node`).
#[derive(Debug, Clone)]
pub struct RestRequest {
    pub method: Method,
    pub to: String,
    pub params: Vec<(String, String)>,
}

impl RestRequest {
    pub fn new(method: Method, to: impl Into<String>) -> Self {
        Self {
            method,
            to: to.into(),
            params: Vec::new(),
        }
    }

    /// Append a query-string parameter, chainable.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

impl GraphClient {
    /// Perform an arbitrary REST call against the server and decode the
    /// response body as JSON (`Value::Null` for empty bodies).
    pub async fn request(&self, request: &RestRequest) -> Result<Value, GraphError> {
        let absolute = if request.to.starts_with("http://") || request.to.starts_with("https://") {
            request.to.clone()
        } else {
            format!("{}{}", self.endpoints().base, request.to)
        };

        let mut url = Url::parse(&absolute)
            .map_err(|e| GraphError::InvalidInput(format!("invalid request url {absolute}: {e}")))?;
        for (key, value) in &request.params {
            url.query_pairs_mut().append_pair(key, value);
        }

        self.send(request.method.clone(), url.as_str(), None).await
    }
}
