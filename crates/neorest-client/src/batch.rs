//! Batch accumulator and response demultiplexer.
//!
//! Neo4j's `/batch` endpoint takes a JSON array of sub-operations, each
//! tagged with an integer `id`, and answers with an array echoing those
//! ids. The [`Batch`] builder queues heterogeneous operations, executes
//! them in one POST, and writes each response body back into the entity
//! that produced the matching request fragment.

use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use neorest_core::GraphError;

use crate::client::{Endpoints, GraphClient};

/// Operation kinds a batch entry can be queued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOperation {
    Get,
    Create,
    Update,
    Delete,
    /// Create-or-return-existing via the legacy node index. Only nodes
    /// support this.
    CreateUnique,
}

impl BatchOperation {
    /// The HTTP method this operation maps to for plain REST fragments.
    pub fn method(self) -> Method {
        match self {
            BatchOperation::Get => Method::GET,
            BatchOperation::Create | BatchOperation::CreateUnique => Method::POST,
            BatchOperation::Update => Method::PUT,
            BatchOperation::Delete => Method::DELETE,
        }
    }
}

/// One sub-request of a batch: method, path relative to the data-API
/// root, and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchFragment {
    pub method: Method,
    pub to: String,
    pub body: Option<Value>,
}

/// An entity that can take part in a batch: it produces its own request
/// fragment and absorbs its slice of the response.
pub trait Batchable {
    /// Build the request fragment for the queued operation.
    fn batch_fragment(&self, operation: BatchOperation) -> Result<BatchFragment, GraphError>;

    /// Absorb the response body at this entity's index. `Value::Null`
    /// means the sub-operation returned no body (deletes, updates).
    fn absorb(&mut self, endpoints: &Endpoints, body: &Value) -> Result<(), GraphError>;
}

/// A raw batch fragment for endpoints without a dedicated entity type.
/// The HTTP method is derived from the queued operation; the response is
/// not absorbed anywhere.
#[derive(Debug, Clone)]
pub struct ManualBatchRequest {
    pub to: String,
    pub body: Value,
}

impl ManualBatchRequest {
    pub fn new(to: impl Into<String>, body: Value) -> Self {
        Self {
            to: to.into(),
            body,
        }
    }
}

impl Batchable for ManualBatchRequest {
    fn batch_fragment(&self, operation: BatchOperation) -> Result<BatchFragment, GraphError> {
        Ok(BatchFragment {
            method: operation.method(),
            to: self.to.clone(),
            body: Some(self.body.clone()),
        })
    }

    fn absorb(&mut self, _endpoints: &Endpoints, _body: &Value) -> Result<(), GraphError> {
        Ok(())
    }
}

/// One element of the `/batch` response array.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchResponse {
    pub id: usize,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub status: Option<u16>,
}

struct BatchEntry<'a> {
    operation: BatchOperation,
    target: &'a mut dyn Batchable,
}

/// Accumulates operations for a single `/batch` round-trip.
///
/// Queued entities stay mutably borrowed until [`Batch::execute`] runs,
/// which writes the server's answers back into them.
pub struct Batch<'a> {
    client: &'a GraphClient,
    stack: Vec<BatchEntry<'a>>,
}

impl GraphClient {
    /// Start an empty batch against this client.
    pub fn batch(&self) -> Batch<'_> {
        Batch {
            client: self,
            stack: Vec::new(),
        }
    }
}

impl<'a> Batch<'a> {
    pub fn get(&mut self, target: &'a mut dyn Batchable) -> &mut Self {
        self.push(BatchOperation::Get, target)
    }

    pub fn create(&mut self, target: &'a mut dyn Batchable) -> &mut Self {
        self.push(BatchOperation::Create, target)
    }

    pub fn update(&mut self, target: &'a mut dyn Batchable) -> &mut Self {
        self.push(BatchOperation::Update, target)
    }

    pub fn delete(&mut self, target: &'a mut dyn Batchable) -> &mut Self {
        self.push(BatchOperation::Delete, target)
    }

    pub fn create_unique(&mut self, target: &'a mut dyn Batchable) -> &mut Self {
        self.push(BatchOperation::CreateUnique, target)
    }

    fn push(&mut self, operation: BatchOperation, target: &'a mut dyn Batchable) -> &mut Self {
        self.stack.push(BatchEntry { operation, target });
        self
    }

    /// Index of the most recently queued entry, for `{N}` references in
    /// later fragments.
    pub fn last_index(&self) -> Option<usize> {
        self.stack.len().checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Execute all queued operations in one POST to `/batch`.
    ///
    /// Request fragments are tagged with their stack index as `id`; the
    /// response array is demultiplexed by that same id, so each entity
    /// absorbs exactly the body produced by its own sub-operation. The
    /// stack is left empty afterwards.
    ///
    /// An empty stack returns an empty vector without any HTTP call. A
    /// fragment-construction error aborts the whole execute before
    /// anything is sent, since a skipped entry would desynchronize the
    /// response indices.
    pub async fn execute(&mut self) -> Result<Vec<BatchResponse>, GraphError> {
        if self.stack.is_empty() {
            return Ok(Vec::new());
        }

        let mut request = Vec::with_capacity(self.stack.len());
        for (index, entry) in self.stack.iter().enumerate() {
            let fragment = entry.target.batch_fragment(entry.operation)?;
            let mut item = serde_json::json!({
                "method": fragment.method.as_str(),
                "to": fragment.to,
                "id": index,
            });
            if let Some(body) = fragment.body {
                item["body"] = body;
            }
            request.push(item);
        }

        tracing::debug!(operations = request.len(), "executing batch");
        let raw = self
            .client
            .send(
                Method::POST,
                &self.client.endpoints().batch,
                Some(&Value::Array(request)),
            )
            .await?;

        let responses: Vec<BatchResponse> = serde_json::from_value(raw)?;

        let mut stack = std::mem::take(&mut self.stack);
        for response in &responses {
            let entry = stack.get_mut(response.id).ok_or_else(|| {
                GraphError::UnexpectedResponse(format!(
                    "batch response id {} has no matching request",
                    response.id
                ))
            })?;
            let body = response.body.as_ref().unwrap_or(&Value::Null);
            entry.target.absorb(self.client.endpoints(), body)?;
        }

        Ok(responses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn operation_maps_to_http_method() {
        assert_eq!(BatchOperation::Get.method(), Method::GET);
        assert_eq!(BatchOperation::Create.method(), Method::POST);
        assert_eq!(BatchOperation::CreateUnique.method(), Method::POST);
        assert_eq!(BatchOperation::Update.method(), Method::PUT);
        assert_eq!(BatchOperation::Delete.method(), Method::DELETE);
    }

    #[test]
    fn manual_request_uses_operation_method() {
        let manual = ManualBatchRequest::new("/node/3/properties", json!({"k": "v"}));

        let fragment = manual.batch_fragment(BatchOperation::Update).unwrap();
        assert_eq!(fragment.method, Method::PUT);
        assert_eq!(fragment.to, "/node/3/properties");
        assert_eq!(fragment.body, Some(json!({"k": "v"})));
    }

    #[test]
    fn last_index_tracks_stack_growth() {
        let client = GraphClient::connect(&neorest_core::GraphConfig::default());
        let mut batch = client.batch();
        assert_eq!(batch.last_index(), None);

        let mut first = ManualBatchRequest::new("/node", json!({}));
        let mut second = ManualBatchRequest::new("/node", json!({}));
        batch.create(&mut first);
        assert_eq!(batch.last_index(), Some(0));
        batch.create(&mut second);
        assert_eq!(batch.last_index(), Some(1));
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn batch_response_decodes_sparse_fields() {
        let response: BatchResponse = serde_json::from_value(json!({
            "id": 3,
            "from": "/node/4"
        }))
        .unwrap();

        assert_eq!(response.id, 3);
        assert_eq!(response.from, "/node/4");
        assert!(response.location.is_none());
        assert!(response.body.is_none());
    }
}
