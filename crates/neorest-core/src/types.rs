//! Entity types for the Neo4j REST dialect.
//!
//! Entities are transient client-side representations; the server is the
//! source of truth. Identifiers are empty until a create/get round-trip
//! populates them from the server's `self` link.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GraphError;

/// Free-form property map attached to nodes and relationships.
pub type Properties = serde_json::Map<String, Value>;

// ── Node ──────────────────────────────────────────────────────────

/// A graph vertex.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub id: String,
    pub properties: Properties,
    /// Last raw payload the server returned for this node.
    pub payload: Option<NodeResponse>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(properties: Properties) -> Self {
        Self {
            properties,
            ..Self::default()
        }
    }

    /// Set a single property, chainable.
    pub fn property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}

/// Raw node payload as returned by the REST API: the property map plus
/// hyperlinks to related resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeResponse {
    #[serde(rename = "self")]
    pub self_link: String,
    pub property: String,
    pub properties: String,
    pub traverse: String,
    pub paged_traverse: String,
    pub create_relationship: String,
    pub all_relationships: String,
    pub all_typed_relationships: String,
    pub incoming_relationships: String,
    pub incoming_typed_relationships: String,
    pub outgoing_relationships: String,
    pub outgoing_typed_relationships: String,
    pub data: Properties,
}

// ── Relationship ──────────────────────────────────────────────────

/// A typed, directed graph edge between two nodes.
#[derive(Debug, Clone, Default)]
pub struct Relationship {
    pub id: String,
    pub start_node_id: String,
    pub end_node_id: String,
    pub rel_type: String,
    pub properties: Properties,
    /// Last raw payload the server returned for this relationship.
    pub payload: Option<RelationshipResponse>,
}

impl Relationship {
    /// A new relationship of `rel_type` from `start_node_id` to
    /// `end_node_id`, not yet persisted.
    pub fn between(
        start_node_id: impl Into<String>,
        end_node_id: impl Into<String>,
        rel_type: impl Into<String>,
    ) -> Self {
        Self {
            start_node_id: start_node_id.into(),
            end_node_id: end_node_id.into(),
            rel_type: rel_type.into(),
            ..Self::default()
        }
    }

    /// Set a single property, chainable.
    pub fn property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }
}

/// Raw relationship payload as returned by the REST API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationshipResponse {
    #[serde(rename = "self")]
    pub self_link: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub property: String,
    pub properties: String,
    pub data: Properties,
}

// ── Index ─────────────────────────────────────────────────────────

/// A legacy node index.
#[derive(Debug, Clone, Default)]
pub struct Index {
    pub name: String,
    pub config: Properties,
}

impl Index {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: Properties::default(),
        }
    }
}

// ── Cypher ────────────────────────────────────────────────────────

/// A Cypher statement with parameters, executed via the `/cypher`
/// endpoint directly or as part of a batch.
#[derive(Debug, Clone, Default)]
pub struct Cypher {
    pub statement: String,
    pub params: Properties,
    /// Result of the last execution, if any.
    pub payload: Option<CypherResponse>,
}

impl Cypher {
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            ..Self::default()
        }
    }

    /// Bind a query parameter, chainable.
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// Result of a Cypher execution: column names plus one value row per
/// result record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CypherResponse {
    pub columns: Vec<String>,
    pub data: Vec<Vec<Value>>,
}

// ── Helpers ───────────────────────────────────────────────────────

/// Extract the server-assigned identifier from a resource URL.
///
/// The REST API never returns ids directly; they are the trailing path
/// segment of `self`/`start`/`end` links, e.g.
/// `http://localhost:7474/db/data/node/42` under the node endpoint.
pub fn id_from_url(base: &str, url: &str) -> Result<String, GraphError> {
    let rest = url.strip_prefix(base).ok_or_else(|| {
        GraphError::UnexpectedResponse(format!("resource link {url} is not under {base}"))
    })?;

    let id = rest.trim_matches('/');
    if id.is_empty() || id.contains('/') {
        return Err(GraphError::UnexpectedResponse(format!(
            "resource link {url} has no id segment under {base}"
        )));
    }

    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_from_url_takes_trailing_segment() {
        let id = id_from_url(
            "http://localhost:7474/db/data/node",
            "http://localhost:7474/db/data/node/42",
        )
        .unwrap();
        assert_eq!(id, "42");
    }

    #[test]
    fn id_from_url_rejects_foreign_base() {
        let err = id_from_url(
            "http://localhost:7474/db/data/node",
            "http://localhost:7474/db/data/relationship/7",
        );
        assert!(err.is_err());
    }

    #[test]
    fn id_from_url_rejects_bare_endpoint() {
        let err = id_from_url(
            "http://localhost:7474/db/data/node",
            "http://localhost:7474/db/data/node/",
        );
        assert!(err.is_err());
    }

    #[test]
    fn node_response_decodes_self_link_and_data() {
        let payload: NodeResponse = serde_json::from_value(json!({
            "self": "http://localhost:7474/db/data/node/5",
            "properties": "http://localhost:7474/db/data/node/5/properties",
            "data": { "name": "marvin" }
        }))
        .unwrap();

        assert_eq!(payload.self_link, "http://localhost:7474/db/data/node/5");
        assert_eq!(payload.data.get("name"), Some(&json!("marvin")));
        // Omitted links default to empty.
        assert!(payload.traverse.is_empty());
    }

    #[test]
    fn relationship_response_decodes_type_field() {
        let payload: RelationshipResponse = serde_json::from_value(json!({
            "self": "http://localhost:7474/db/data/relationship/3",
            "start": "http://localhost:7474/db/data/node/1",
            "end": "http://localhost:7474/db/data/node/2",
            "type": "KNOWS",
            "data": {}
        }))
        .unwrap();

        assert_eq!(payload.rel_type, "KNOWS");
        assert_eq!(payload.start, "http://localhost:7474/db/data/node/1");
    }

    #[test]
    fn builders_accumulate_properties() {
        let node = Node::new().property("name", "zaphod").property("heads", 2);
        assert_eq!(node.properties.get("heads"), Some(&json!(2)));
        assert!(node.id.is_empty());

        let rel = Relationship::between("1", "2", "KNOWS").property("since", 2005);
        assert_eq!(rel.rel_type, "KNOWS");
        assert_eq!(rel.properties.get("since"), Some(&json!(2005)));
    }
}
