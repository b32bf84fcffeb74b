use thiserror::Error;

/// Top-level error type for the neorest client.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Neo4j returned {status}: {body}")]
    Status { status: String, body: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
