//! Generation orchestration - produces the candidate artifact batch
//!
//! For each entity the orchestrator runs the fixed artifact sequence against
//! the rendering engine. A failure on any single artifact aborts the whole
//! per-entity batch; partial output never reaches the merge policy.

use std::sync::Arc;

use crate::domain::{DomainModel, Entity, GeneratedFile};
use crate::generation::artifacts::{ENTITY_ARTIFACTS, SCAFFOLD_ARTIFACTS};
use crate::generation::context::{ProjectInfo, entity_context, scaffold_context};
use crate::generation::errors::GenerationError;
use crate::rendering::TemplateEngine;

/// Orchestrates rendering of the full artifact set for a domain model.
pub struct GenerationOrchestrator {
    engine: Arc<TemplateEngine>,
}

impl GenerationOrchestrator {
    pub fn new(engine: Arc<TemplateEngine>) -> Self {
        Self { engine }
    }

    /// Render every per-entity artifact plus the project scaffold.
    pub fn generate(
        &self,
        model: &DomainModel,
        project: &ProjectInfo,
    ) -> Result<Vec<GeneratedFile>, GenerationError> {
        let mut files = Vec::new();
        for entity in &model.entities {
            files.extend(self.generate_entity(model, project, entity)?);
        }
        files.extend(self.scaffold(project)?);

        tracing::debug!(
            entities = model.entities.len(),
            artifacts = files.len(),
            "artifact batch produced"
        );
        Ok(files)
    }

    /// Render the fixed artifact sequence for one entity.
    pub fn generate_entity(
        &self,
        model: &DomainModel,
        project: &ProjectInfo,
        entity: &Entity,
    ) -> Result<Vec<GeneratedFile>, GenerationError> {
        // Identity invariant holds before any rendering, whatever the adapter did
        let mut entity = entity.clone();
        entity.ensure_identity();

        let context = entity_context(project, model, &entity);
        let lower = entity.name.to_lowercase();

        let mut batch = Vec::with_capacity(ENTITY_ARTIFACTS.len());
        for artifact in ENTITY_ARTIFACTS {
            let content = self.engine.render(artifact.template, &context).map_err(|e| {
                GenerationError::Artifact {
                    entity: entity.name.clone(),
                    kind: artifact.kind.to_string(),
                    source: e,
                }
            })?;
            batch.push(
                GeneratedFile::new(artifact.path_for(&lower), content)
                    .with_metadata("kind", artifact.kind)
                    .with_metadata("entity", &entity.name),
            );
        }
        Ok(batch)
    }

    /// Render the whole-project scaffold from project metadata alone.
    pub fn scaffold(&self, project: &ProjectInfo) -> Result<Vec<GeneratedFile>, GenerationError> {
        let context = scaffold_context(project);
        let mut batch = Vec::with_capacity(SCAFFOLD_ARTIFACTS.len());
        for artifact in SCAFFOLD_ARTIFACTS {
            let content = self.engine.render(artifact.template, &context).map_err(|e| {
                GenerationError::Scaffold {
                    kind: artifact.kind.to_string(),
                    source: e,
                }
            })?;
            batch.push(
                GeneratedFile::new(artifact.path, content).with_metadata("kind", artifact.kind),
            );
        }
        Ok(batch)
    }
}
