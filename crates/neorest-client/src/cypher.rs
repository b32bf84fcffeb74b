//! Cypher execution against the `/cypher` endpoint.

use reqwest::Method;
use serde_json::{json, Value};

use neorest_core::{Cypher, CypherResponse, GraphError};

use crate::batch::{BatchFragment, BatchOperation, Batchable};
use crate::client::{Endpoints, GraphClient};

impl GraphClient {
    /// Execute a Cypher statement. The result (column names plus value
    /// rows) lands in the query's `payload`.
    pub async fn execute_cypher(&self, cypher: &mut Cypher) -> Result<(), GraphError> {
        if cypher.statement.is_empty() {
            return Err(GraphError::InvalidInput(
                "cypher statement is empty".to_string(),
            ));
        }

        let body = cypher_body(cypher);
        let response = self
            .send(Method::POST, &self.endpoints().cypher, Some(&body))
            .await?;

        cypher.payload = Some(serde_json::from_value(response)?);
        Ok(())
    }
}

fn cypher_body(cypher: &Cypher) -> Value {
    json!({
        "query": cypher.statement,
        "params": Value::Object(cypher.params.clone()),
    })
}

impl Batchable for Cypher {
    /// Cypher always serializes to `POST /cypher`, whatever operation it
    /// was queued under.
    fn batch_fragment(&self, _operation: BatchOperation) -> Result<BatchFragment, GraphError> {
        if self.statement.is_empty() {
            return Err(GraphError::InvalidInput(
                "cypher statement is empty".to_string(),
            ));
        }

        Ok(BatchFragment {
            method: Method::POST,
            to: "/cypher".to_string(),
            body: Some(cypher_body(self)),
        })
    }

    fn absorb(&mut self, _endpoints: &Endpoints, body: &Value) -> Result<(), GraphError> {
        if body.is_null() {
            return Ok(());
        }

        let payload: CypherResponse = serde_json::from_value(body.clone())?;
        self.payload = Some(payload);
        Ok(())
    }
}
