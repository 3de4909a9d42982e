use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog is empty")]
    EmptyCatalog,

    #[error("Catalog too small: {valid} valid vectors, at least 2 required")]
    CatalogTooSmall { valid: usize },

    #[error("Invalid top-k {k}: must be between 1 and {max}")]
    InvalidTopK { k: usize, max: usize },

    #[error("Embedding failed: {0}")]
    Embedding(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Malformed row '{id}': {reason}")]
    MalformedRow { id: String, reason: String },

    #[error("Run cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
