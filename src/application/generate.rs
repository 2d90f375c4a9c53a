//! Use cases wiring the pipeline: adapter -> orchestrator -> merge -> writer

use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::AdapterRegistry;
use crate::application::{ApplicationError, OutputWriter, RepositoryFetcher};
use crate::generation::{GenerationOrchestrator, ProjectInfo};
use crate::infrastructure::validator;
use crate::merge::PreservationPolicy;

/// Request for a full generation run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub spec_path: PathBuf,
    pub output_dir: PathBuf,
    /// Explicit format name; auto-detected when absent
    pub format: Option<String>,
    /// Overrides the project name derived from the document
    pub project_name: Option<String>,
    /// Go module path for the scaffold
    pub module: Option<String>,
    /// Existing repository to materialize at the destination first
    pub git_repo: Option<String>,
    pub dry_run: bool,
}

/// What a run produced.
#[derive(Debug)]
pub struct GenerateSummary {
    pub project: String,
    pub entity_count: usize,
    pub written: Vec<PathBuf>,
    pub preserved: Vec<PathBuf>,
    pub dry_run: bool,
}

/// End-to-end generation from an input document.
pub struct GenerateUseCase {
    registry: Arc<AdapterRegistry>,
    orchestrator: Arc<GenerationOrchestrator>,
    writer: Arc<dyn OutputWriter>,
    fetcher: Arc<dyn RepositoryFetcher>,
}

impl GenerateUseCase {
    pub fn new(
        registry: Arc<AdapterRegistry>,
        orchestrator: Arc<GenerationOrchestrator>,
        writer: Arc<dyn OutputWriter>,
        fetcher: Arc<dyn RepositoryFetcher>,
    ) -> Self {
        Self {
            registry,
            orchestrator,
            writer,
            fetcher,
        }
    }

    pub async fn execute(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateSummary, ApplicationError> {
        // 1. Collaborator-level path validation
        validator::validate_input_file(&request.spec_path)?;
        validator::validate_destination(&request.output_dir)?;

        // 2. Select the adapter
        let adapter = match &request.format {
            Some(name) => self.registry.by_format(name).ok_or_else(|| {
                ApplicationError::Validation(format!(
                    "unknown format '{}' (available: {})",
                    name,
                    self.registry.formats().join(", ")
                ))
            })?,
            None => self.registry.detect(&request.spec_path).await?,
        };
        tracing::info!(
            format = adapter.format_name(),
            spec = %request.spec_path.display(),
            "parsing input document"
        );

        // 3. Parse into the canonical model
        let mut model = adapter.parse(&request.spec_path).await?;
        if let Some(name) = &request.project_name {
            model.project = name.clone();
        }
        let project = ProjectInfo::from_model(&model, request.module.clone());

        // 4. Produce the candidate batch
        let candidates = self
            .orchestrator
            .generate(&model, &project)
            .map_err(ApplicationError::Generation)?;

        // 5. Materialize any pre-existing tree before the merge policy runs
        if let Some(url) = &request.git_repo {
            self.fetcher.fetch(url, &request.output_dir).await?;
        }

        // 6. Partition: existing files always win
        let plan = PreservationPolicy::partition(&request.output_dir, candidates);
        if plan.preserved_count() > 0 {
            tracing::info!(
                preserved = plan.preserved_count(),
                "existing files preserved"
            );
        }

        // 7. Hand the final batch to the writer
        let written = self
            .writer
            .write(&request.output_dir, &plan.writes, request.dry_run)
            .await?;

        Ok(GenerateSummary {
            project: model.project,
            entity_count: model.entities.len(),
            written,
            preserved: plan.preserved,
            dry_run: request.dry_run,
        })
    }
}

/// Request for scaffold-only generation.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    pub project_name: String,
    pub output_dir: PathBuf,
    pub module: Option<String>,
    pub dry_run: bool,
}

/// Project scaffold without an input document.
pub struct ScaffoldUseCase {
    orchestrator: Arc<GenerationOrchestrator>,
    writer: Arc<dyn OutputWriter>,
}

impl ScaffoldUseCase {
    pub fn new(orchestrator: Arc<GenerationOrchestrator>, writer: Arc<dyn OutputWriter>) -> Self {
        Self {
            orchestrator,
            writer,
        }
    }

    pub async fn execute(
        &self,
        request: ScaffoldRequest,
    ) -> Result<GenerateSummary, ApplicationError> {
        if request.project_name.is_empty() {
            return Err(ApplicationError::Validation(
                "project name cannot be empty".to_string(),
            ));
        }
        validator::validate_destination(&request.output_dir)?;

        let project = ProjectInfo::new(request.project_name.clone(), request.module.clone());
        let candidates = self
            .orchestrator
            .scaffold(&project)
            .map_err(ApplicationError::Generation)?;

        let plan = PreservationPolicy::partition(&request.output_dir, candidates);
        let written = self
            .writer
            .write(&request.output_dir, &plan.writes, request.dry_run)
            .await?;

        Ok(GenerateSummary {
            project: request.project_name,
            entity_count: 0,
            written,
            preserved: plan.preserved,
            dry_run: request.dry_run,
        })
    }
}
