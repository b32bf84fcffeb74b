//! neorest-core: Shared types, configuration, and error handling for the
//! neorest Neo4j REST client.
//!
//! This crate provides the foundational pieces used by the client crate:
//! - Entity types (Node, Relationship, Index, Cypher) and their raw
//!   server payload counterparts
//! - Connection configuration
//! - The common error type

pub mod config;
pub mod error;
pub mod types;

pub use config::GraphConfig;
pub use error::GraphError;
pub use types::{
    Cypher, CypherResponse, Index, Node, NodeResponse, Properties, Relationship,
    RelationshipResponse,
};
