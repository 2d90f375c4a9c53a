//! Error types for the generation domain

use thiserror::Error;

use crate::adapters::AdapterError;
use crate::rendering::RenderError;

/// Errors that can occur while producing the artifact batch
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("adapter error: {0}")]
    Adapter(#[from] AdapterError),

    #[error("failed to render '{kind}' for entity '{entity}': {source}")]
    Artifact {
        entity: String,
        kind: String,
        #[source]
        source: RenderError,
    },

    #[error("failed to render scaffold artifact '{kind}': {source}")]
    Scaffold {
        kind: String,
        #[source]
        source: RenderError,
    },

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
