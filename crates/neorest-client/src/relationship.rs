//! Relationship CRUD against the `/relationship` endpoint.

use reqwest::Method;
use serde_json::{json, Value};

use neorest_core::types::id_from_url;
use neorest_core::{GraphError, Relationship, RelationshipResponse};

use crate::batch::{BatchFragment, BatchOperation, Batchable};
use crate::client::{Endpoints, GraphClient};

impl GraphClient {
    /// Fetch a relationship by its server-assigned id.
    pub async fn get_relationship(&self, id: &str) -> Result<Relationship, GraphError> {
        if id.is_empty() {
            return Err(GraphError::InvalidInput(
                "relationship id is empty".to_string(),
            ));
        }

        let url = format!("{}/{}", self.endpoints().relationship, id);
        let body = self.send(Method::GET, &url, None).await?;

        let mut relationship = Relationship::default();
        relationship.absorb(self.endpoints(), &body)?;
        Ok(relationship)
    }

    /// Create a relationship between two existing nodes. On success the
    /// relationship's id and payload are filled in from the response.
    pub async fn create_relationship(
        &self,
        relationship: &mut Relationship,
    ) -> Result<(), GraphError> {
        require_endpoints_set(relationship)?;

        let url = format!(
            "{}/{}/relationships",
            self.endpoints().node,
            relationship.start_node_id
        );
        let body = json!({
            "to": format!("{}/{}", self.endpoints().node, relationship.end_node_id),
            "type": relationship.rel_type,
            "data": Value::Object(relationship.properties.clone()),
        });

        let response = self.send(Method::POST, &url, Some(&body)).await?;
        relationship.absorb(self.endpoints(), &response)
    }

    /// Replace the relationship's properties on the server with its
    /// current property map.
    pub async fn update_relationship(&self, relationship: &Relationship) -> Result<(), GraphError> {
        if relationship.id.is_empty() {
            return Err(GraphError::InvalidInput(
                "relationship id is empty".to_string(),
            ));
        }

        let url = format!(
            "{}/{}/properties",
            self.endpoints().relationship,
            relationship.id
        );
        let body = Value::Object(relationship.properties.clone());
        self.send(Method::PUT, &url, Some(&body)).await?;
        Ok(())
    }

    /// Delete a relationship by id.
    pub async fn delete_relationship(&self, id: &str) -> Result<(), GraphError> {
        if id.is_empty() {
            return Err(GraphError::InvalidInput(
                "relationship id is empty".to_string(),
            ));
        }

        let url = format!("{}/{}", self.endpoints().relationship, id);
        self.send(Method::DELETE, &url, None).await?;
        Ok(())
    }

    /// All relationship types present in the database.
    pub async fn relationship_types(&self) -> Result<Vec<String>, GraphError> {
        let url = format!("{}/types", self.endpoints().relationship);
        let body = self.send(Method::GET, &url, None).await?;
        Ok(serde_json::from_value(body)?)
    }
}

impl Batchable for Relationship {
    fn batch_fragment(&self, operation: BatchOperation) -> Result<BatchFragment, GraphError> {
        match operation {
            BatchOperation::Get => {
                require_id(self)?;
                Ok(BatchFragment {
                    method: Method::GET,
                    to: format!("/relationship/{}", self.id),
                    body: None,
                })
            }
            BatchOperation::Delete => {
                require_id(self)?;
                Ok(BatchFragment {
                    method: Method::DELETE,
                    to: format!("/relationship/{}", self.id),
                    body: None,
                })
            }
            BatchOperation::Create => {
                require_endpoints_set(self)?;
                if self.rel_type.is_empty() {
                    return Err(GraphError::InvalidInput(
                        "relationship type is empty".to_string(),
                    ));
                }
                Ok(BatchFragment {
                    method: Method::POST,
                    to: format!("/node/{}/relationships", self.start_node_id),
                    body: Some(json!({
                        "to": format!("/node/{}", self.end_node_id),
                        "type": self.rel_type,
                        "data": Value::Object(self.properties.clone()),
                    })),
                })
            }
            BatchOperation::Update => {
                require_id(self)?;
                Ok(BatchFragment {
                    method: Method::PUT,
                    to: format!("/relationship/{}/properties", self.id),
                    body: Some(Value::Object(self.properties.clone())),
                })
            }
            BatchOperation::CreateUnique => Err(GraphError::InvalidInput(
                "relationships do not support unique creation".to_string(),
            )),
        }
    }

    fn absorb(&mut self, endpoints: &Endpoints, body: &Value) -> Result<(), GraphError> {
        if body.is_null() {
            return Ok(());
        }

        let payload: RelationshipResponse = serde_json::from_value(body.clone())?;
        self.id = id_from_url(&endpoints.relationship, &payload.self_link)?;
        self.start_node_id = id_from_url(&endpoints.node, &payload.start)?;
        self.end_node_id = id_from_url(&endpoints.node, &payload.end)?;
        self.rel_type = payload.rel_type.clone();
        self.properties = payload.data.clone();
        self.payload = Some(payload);
        Ok(())
    }
}

fn require_id(relationship: &Relationship) -> Result<(), GraphError> {
    if relationship.id.is_empty() {
        return Err(GraphError::InvalidInput(
            "relationship id is empty".to_string(),
        ));
    }
    Ok(())
}

fn require_endpoints_set(relationship: &Relationship) -> Result<(), GraphError> {
    if relationship.start_node_id.is_empty() {
        return Err(GraphError::InvalidInput(
            "start node id is empty".to_string(),
        ));
    }
    if relationship.end_node_id.is_empty() {
        return Err(GraphError::InvalidInput("end node id is empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use neorest_core::GraphConfig;

    fn endpoints() -> Endpoints {
        GraphClient::connect(&GraphConfig::default())
            .endpoints()
            .clone()
    }

    #[test]
    fn create_fragment_requires_both_nodes_and_type() {
        let missing_start = Relationship::between("", "2", "KNOWS");
        assert!(missing_start.batch_fragment(BatchOperation::Create).is_err());

        let missing_end = Relationship::between("1", "", "KNOWS");
        assert!(missing_end.batch_fragment(BatchOperation::Create).is_err());

        let missing_type = Relationship::between("1", "2", "");
        assert!(missing_type.batch_fragment(BatchOperation::Create).is_err());
    }

    #[test]
    fn create_fragment_posts_to_start_node() {
        let relationship = Relationship::between("1", "2", "KNOWS").property("since", 2005);

        let fragment = relationship
            .batch_fragment(BatchOperation::Create)
            .unwrap();
        assert_eq!(fragment.method, Method::POST);
        assert_eq!(fragment.to, "/node/1/relationships");
        assert_eq!(
            fragment.body,
            Some(json!({
                "to": "/node/2",
                "type": "KNOWS",
                "data": {"since": 2005},
            }))
        );
    }

    #[test]
    fn update_fragment_targets_relationship_properties() {
        let relationship = Relationship {
            id: "3".to_string(),
            ..Relationship::default()
        };

        let fragment = relationship
            .batch_fragment(BatchOperation::Update)
            .unwrap();
        assert_eq!(fragment.method, Method::PUT);
        assert_eq!(fragment.to, "/relationship/3/properties");
    }

    #[test]
    fn unique_creation_is_rejected() {
        let relationship = Relationship::between("1", "2", "KNOWS");
        assert!(relationship
            .batch_fragment(BatchOperation::CreateUnique)
            .is_err());
    }

    #[test]
    fn absorb_maps_links_back_to_ids() {
        let mut relationship = Relationship::default();
        relationship
            .absorb(
                &endpoints(),
                &json!({
                    "self": "http://127.0.0.1:7474/db/data/relationship/3",
                    "start": "http://127.0.0.1:7474/db/data/node/1",
                    "end": "http://127.0.0.1:7474/db/data/node/2",
                    "type": "KNOWS",
                    "data": {"since": 2005},
                }),
            )
            .unwrap();

        assert_eq!(relationship.id, "3");
        assert_eq!(relationship.start_node_id, "1");
        assert_eq!(relationship.end_node_id, "2");
        assert_eq!(relationship.rel_type, "KNOWS");
        assert_eq!(relationship.properties.get("since"), Some(&json!(2005)));
    }

    #[test]
    fn absorb_rejects_malformed_links() {
        let mut relationship = Relationship::default();
        let result = relationship.absorb(
            &endpoints(),
            &json!({
                "self": "http://127.0.0.1:7474/db/data/relationship/3",
                "start": "not-a-node-url",
                "end": "http://127.0.0.1:7474/db/data/node/2",
                "type": "KNOWS",
            }),
        );
        assert!(result.is_err());
    }
}
