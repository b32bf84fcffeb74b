//! Node CRUD against the `/node` endpoint.

use reqwest::Method;
use serde_json::Value;

use neorest_core::types::id_from_url;
use neorest_core::{GraphError, Node, NodeResponse};

use crate::batch::{BatchFragment, BatchOperation, Batchable};
use crate::client::{Endpoints, GraphClient};

impl GraphClient {
    /// Fetch a node by its server-assigned id.
    pub async fn get_node(&self, id: &str) -> Result<Node, GraphError> {
        if id.is_empty() {
            return Err(GraphError::InvalidInput("node id is empty".to_string()));
        }

        let url = format!("{}/{}", self.endpoints().node, id);
        let body = self.send(Method::GET, &url, None).await?;

        let mut node = Node::new();
        node.absorb(self.endpoints(), &body)?;
        Ok(node)
    }

    /// Create a node from its property map. On success the node's id and
    /// payload are filled in from the server response.
    pub async fn create_node(&self, node: &mut Node) -> Result<(), GraphError> {
        let body = Value::Object(node.properties.clone());
        let response = self
            .send(Method::POST, &self.endpoints().node, Some(&body))
            .await?;

        node.absorb(self.endpoints(), &response)
    }

    /// Replace the node's properties on the server with its current
    /// property map.
    pub async fn update_node(&self, node: &Node) -> Result<(), GraphError> {
        if node.id.is_empty() {
            return Err(GraphError::InvalidInput("node id is empty".to_string()));
        }

        let url = format!("{}/{}/properties", self.endpoints().node, node.id);
        let body = Value::Object(node.properties.clone());
        self.send(Method::PUT, &url, Some(&body)).await?;
        Ok(())
    }

    /// Delete a node by id. The server rejects nodes that still have
    /// relationships.
    pub async fn delete_node(&self, id: &str) -> Result<(), GraphError> {
        if id.is_empty() {
            return Err(GraphError::InvalidInput("node id is empty".to_string()));
        }

        let url = format!("{}/{}", self.endpoints().node, id);
        self.send(Method::DELETE, &url, None).await?;
        Ok(())
    }
}

impl Batchable for Node {
    fn batch_fragment(&self, operation: BatchOperation) -> Result<BatchFragment, GraphError> {
        match operation {
            BatchOperation::Get => {
                require_id(self)?;
                Ok(BatchFragment {
                    method: Method::GET,
                    to: format!("/node/{}", self.id),
                    body: None,
                })
            }
            BatchOperation::Delete => {
                require_id(self)?;
                Ok(BatchFragment {
                    method: Method::DELETE,
                    to: format!("/node/{}", self.id),
                    body: None,
                })
            }
            BatchOperation::Create => Ok(BatchFragment {
                method: Method::POST,
                to: "/node".to_string(),
                body: Some(Value::Object(self.properties.clone())),
            }),
            BatchOperation::Update => {
                require_id(self)?;
                Ok(BatchFragment {
                    method: Method::PUT,
                    to: format!("/node/{}/properties", self.id),
                    body: Some(Value::Object(self.properties.clone())),
                })
            }
            BatchOperation::CreateUnique => Ok(BatchFragment {
                method: Method::POST,
                to: "/index/node".to_string(),
                body: Some(serde_json::json!({
                    "properties": Value::Object(self.properties.clone()),
                })),
            }),
        }
    }

    fn absorb(&mut self, endpoints: &Endpoints, body: &Value) -> Result<(), GraphError> {
        if body.is_null() {
            // Deletes and property updates answer without a body.
            return Ok(());
        }

        let payload: NodeResponse = serde_json::from_value(body.clone())?;
        let Ok(id) = id_from_url(&endpoints.node, &payload.self_link) else {
            // Not a node payload (e.g. an index-create answer); leave the
            // entity untouched.
            return Ok(());
        };

        self.id = id;
        self.properties = payload.data.clone();
        self.payload = Some(payload);
        Ok(())
    }
}

fn require_id(node: &Node) -> Result<(), GraphError> {
    if node.id.is_empty() {
        return Err(GraphError::InvalidInput("node id is empty".to_string()));
    }
    Ok(())
}
