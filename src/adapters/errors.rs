//! Error types for the adapter layer
//!
//! Each staged validation failure maps to a distinct variant so callers can
//! tell a malformed document apart from a document with nothing to generate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating or parsing an input document
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("input path is empty")]
    EmptyPath,

    #[error("input file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("input path is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("unsupported extension '{extension}' for {format} (expected one of: {expected})")]
    UnsupportedExtension {
        extension: String,
        format: &'static str,
        expected: String,
    },

    #[error("{format} document failed to parse: {reason}")]
    InvalidDocument {
        format: &'static str,
        reason: String,
    },

    #[error("{format} document contains no {detail}")]
    NoEntities {
        format: &'static str,
        detail: String,
    },

    #[error(
        "all {count} message(s) match the request/response naming convention \
         (Request/Response/Req/Resp suffix); nothing to generate"
    )]
    OnlyRequestResponseMessages { count: usize },

    #[error("no registered adapter recognizes {0}")]
    UnknownFormat(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
