//! Application layer error types

use thiserror::Error;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("adapter error: {0}")]
    Adapter(#[from] crate::adapters::AdapterError),

    #[error("generation error: {0}")]
    Generation(#[from] crate::generation::GenerationError),

    #[error("output error: {0}")]
    Output(String),

    #[error("repository fetch failed: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
