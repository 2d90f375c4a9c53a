//! Error types for the rendering engine

use thiserror::Error;

/// Errors raised while loading or executing templates
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("failed to load embedded template '{template}': {source}")]
    Load {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("template '{template}' failed to render: {source}")]
    Execution {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("template '{template}' requires an object context: {source}")]
    InvalidContext {
        template: String,
        #[source]
        source: tera::Error,
    },
}
