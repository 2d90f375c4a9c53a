//! Generation domain - turns a canonical model into the candidate artifact
//! batch through the fixed template sequence

pub mod artifacts;
pub mod context;
pub mod errors;
pub mod orchestrator;
pub mod shapes;

pub use artifacts::{ENTITY_ARTIFACTS, EntityArtifact, SCAFFOLD_ARTIFACTS, ScaffoldArtifact};
pub use context::ProjectInfo;
pub use errors::GenerationError;
pub use orchestrator::GenerationOrchestrator;
