//! neorest-client — client for the Neo4j HTTP REST API.
//!
//! Wraps the legacy `/db/data` dialect: node, relationship, and index
//! CRUD, Cypher queries, and batching of heterogeneous operations into a
//! single HTTP round-trip. All graph semantics live in the server; this
//! crate only builds REST paths and bodies and parses the JSON responses
//! back into entity structs.

pub mod batch;
pub mod client;
pub mod cypher;
pub mod index;
pub mod node;
pub mod relationship;
pub mod request;

pub use batch::{Batch, BatchFragment, BatchOperation, BatchResponse, Batchable, ManualBatchRequest};
pub use client::{Endpoints, GraphClient};
pub use request::RestRequest;

pub use neorest_core::{
    Cypher, CypherResponse, GraphConfig, GraphError, Index, Node, Properties, Relationship,
};
