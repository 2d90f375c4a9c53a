//! Format adapters - translate heterogeneous input documents into the
//! canonical domain model
//!
//! Each adapter implements the `DomainParser` contract; an explicit
//! `AdapterRegistry` value keyed by file extension replaces any process-wide
//! lookup so pipeline invocations stay independently testable.

pub mod errors;
pub mod openapi;
pub mod proto;

pub use errors::AdapterError;
pub use openapi::OpenApiAdapter;
pub use proto::ProtoAdapter;

use crate::domain::DomainModel;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Behavioral contract every format adapter implements.
#[async_trait]
pub trait DomainParser: Send + Sync {
    /// Display name of the input format
    fn format_name(&self) -> &'static str;

    /// File extensions (without the dot) this adapter accepts
    fn supported_extensions(&self) -> &'static [&'static str];

    /// Staged validation: path, extension, structure, entity eligibility.
    /// Each stage failure maps to a distinct `AdapterError` variant.
    async fn validate(&self, path: &Path) -> Result<(), AdapterError>;

    /// Convert the document into a canonical model. Atomic: either the whole
    /// model is returned or an error is - never a partially-built model.
    async fn parse(&self, path: &Path) -> Result<DomainModel, AdapterError>;
}

/// Shared path/extension validation stages used by every adapter.
pub(crate) fn validate_path_stage(path: &Path) -> Result<(), AdapterError> {
    if path.as_os_str().is_empty() {
        return Err(AdapterError::EmptyPath);
    }
    if !path.exists() {
        return Err(AdapterError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(AdapterError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

pub(crate) fn validate_extension_stage(
    path: &Path,
    format: &'static str,
    supported: &[&str],
) -> Result<(), AdapterError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if !supported.contains(&extension.as_str()) {
        return Err(AdapterError::UnsupportedExtension {
            extension,
            format,
            expected: supported.join(", "),
        });
    }
    Ok(())
}

/// Explicit, constructed registry of format adapters.
#[derive(Clone)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn DomainParser>>,
}

impl AdapterRegistry {
    /// Empty registry, for tests that register a single adapter.
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Registry with both built-in adapters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(OpenApiAdapter::new()));
        registry.register(Arc::new(ProtoAdapter::new()));
        registry
    }

    pub fn register(&mut self, adapter: Arc<dyn DomainParser>) {
        self.adapters.push(adapter);
    }

    /// Look up an adapter by its display name, case-insensitive.
    pub fn by_format(&self, name: &str) -> Option<Arc<dyn DomainParser>> {
        self.adapters
            .iter()
            .find(|a| a.format_name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Look up an adapter by the file extension of a path.
    pub fn for_path(&self, path: &Path) -> Option<Arc<dyn DomainParser>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        self.adapters
            .iter()
            .find(|a| a.supported_extensions().contains(&extension.as_str()))
            .cloned()
    }

    /// Auto-detect the adapter for a document by running each registered
    /// adapter's `validate` until one accepts it.
    pub async fn detect(&self, path: &Path) -> Result<Arc<dyn DomainParser>, AdapterError> {
        for adapter in &self.adapters {
            match adapter.validate(path).await {
                Ok(()) => {
                    tracing::debug!(
                        format = adapter.format_name(),
                        path = %path.display(),
                        "adapter auto-detected"
                    );
                    return Ok(adapter.clone());
                }
                Err(e) => {
                    tracing::debug!(
                        format = adapter.format_name(),
                        error = %e,
                        "adapter rejected input"
                    );
                }
            }
        }
        Err(AdapterError::UnknownFormat(path.to_path_buf()))
    }

    /// Display names of all registered formats.
    pub fn formats(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.format_name()).collect()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
