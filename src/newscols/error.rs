use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewscolsError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Unknown block type: {0}")]
    UnknownBlockType(String),

    #[error("Block {index} out of range (document has {count} blocks)")]
    BlockOutOfRange { index: usize, count: usize },

    #[error("Malformed block markup: {0}")]
    Markup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, NewscolsError>;
