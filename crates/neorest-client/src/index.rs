//! Legacy node index management against `/index/node`.

use reqwest::Method;
use serde_json::{json, Value};

use neorest_core::{GraphError, Index};

use crate::client::GraphClient;

impl GraphClient {
    /// Create a named node index. The optional config map is passed
    /// through to the server (e.g. fulltext settings).
    pub async fn create_index(&self, index: &Index) -> Result<(), GraphError> {
        if index.name.is_empty() {
            return Err(GraphError::InvalidInput("index name is empty".to_string()));
        }

        let body = if index.config.is_empty() {
            json!({ "name": index.name })
        } else {
            json!({
                "name": index.name,
                "config": Value::Object(index.config.clone()),
            })
        };

        self.send(Method::POST, &self.endpoints().index_node, Some(&body))
            .await?;
        Ok(())
    }

    /// Delete a node index by name.
    pub async fn delete_index(&self, name: &str) -> Result<(), GraphError> {
        if name.is_empty() {
            return Err(GraphError::InvalidInput("index name is empty".to_string()));
        }

        let url = format!("{}/{}", self.endpoints().index_node, name);
        self.send(Method::DELETE, &url, None).await?;
        Ok(())
    }
}
