//! The fixed artifact catalog
//!
//! Every entity produces the same ordered sequence of artifacts; every
//! artifact's output path is a deterministic function of (layer, lower-cased
//! entity name, suffix).

use std::path::PathBuf;

/// One artifact kind in the per-entity sequence.
#[derive(Debug, Clone, Copy)]
pub struct EntityArtifact {
    /// Metadata tag recorded on the generated file
    pub kind: &'static str,
    /// Stable template identifier
    pub template: &'static str,
    /// Layer directory the file lands in
    pub layer: &'static str,
    /// Filename suffix between the entity name and `.go`
    pub suffix: &'static str,
}

impl EntityArtifact {
    /// Output path for a lower-cased entity name.
    pub fn path_for(&self, lower_name: &str) -> PathBuf {
        PathBuf::from(format!("{}/{}{}.go", self.layer, lower_name, self.suffix))
    }
}

/// The per-entity artifact sequence, in emission order.
pub const ENTITY_ARTIFACTS: &[EntityArtifact] = &[
    EntityArtifact {
        kind: "entity",
        template: "entity",
        layer: "domain",
        suffix: "",
    },
    EntityArtifact {
        kind: "events",
        template: "events",
        layer: "domain",
        suffix: "_events",
    },
    EntityArtifact {
        kind: "repository",
        template: "repository",
        layer: "domain",
        suffix: "_repository",
    },
    EntityArtifact {
        kind: "repository_impl",
        template: "repository_impl",
        layer: "infrastructure",
        suffix: "_repository",
    },
    EntityArtifact {
        kind: "commands",
        template: "commands",
        layer: "application",
        suffix: "_commands",
    },
    EntityArtifact {
        kind: "queries",
        template: "queries",
        layer: "application",
        suffix: "_queries",
    },
    EntityArtifact {
        kind: "command_handlers",
        template: "command_handlers",
        layer: "application",
        suffix: "_command_handlers",
    },
    EntityArtifact {
        kind: "query_handlers",
        template: "query_handlers",
        layer: "application",
        suffix: "_query_handlers",
    },
    EntityArtifact {
        kind: "service",
        template: "service",
        layer: "application",
        suffix: "_service",
    },
    EntityArtifact {
        kind: "entity_test",
        template: "entity_test",
        layer: "domain",
        suffix: "_test",
    },
    EntityArtifact {
        kind: "events_test",
        template: "events_test",
        layer: "domain",
        suffix: "_events_test",
    },
    EntityArtifact {
        kind: "repository_test",
        template: "repository_test",
        layer: "domain",
        suffix: "_repository_test",
    },
    EntityArtifact {
        kind: "repository_impl_test",
        template: "repository_impl_test",
        layer: "infrastructure",
        suffix: "_repository_test",
    },
    EntityArtifact {
        kind: "commands_test",
        template: "commands_test",
        layer: "application",
        suffix: "_commands_test",
    },
    EntityArtifact {
        kind: "queries_test",
        template: "queries_test",
        layer: "application",
        suffix: "_queries_test",
    },
    EntityArtifact {
        kind: "command_handlers_test",
        template: "command_handlers_test",
        layer: "application",
        suffix: "_command_handlers_test",
    },
    EntityArtifact {
        kind: "query_handlers_test",
        template: "query_handlers_test",
        layer: "application",
        suffix: "_query_handlers_test",
    },
    EntityArtifact {
        kind: "service_test",
        template: "service_test",
        layer: "application",
        suffix: "_service_test",
    },
];

/// One project-scaffold artifact.
#[derive(Debug, Clone, Copy)]
pub struct ScaffoldArtifact {
    pub kind: &'static str,
    pub template: &'static str,
    pub path: &'static str,
}

/// Whole-project scaffold, produced from project metadata alone.
pub const SCAFFOLD_ARTIFACTS: &[ScaffoldArtifact] = &[
    ScaffoldArtifact {
        kind: "module",
        template: "go_mod",
        path: "go.mod",
    },
    ScaffoldArtifact {
        kind: "build",
        template: "makefile",
        path: "Makefile",
    },
    ScaffoldArtifact {
        kind: "docs",
        template: "readme",
        path: "README.md",
    },
    ScaffoldArtifact {
        kind: "config",
        template: "config",
        path: "config.yaml",
    },
    ScaffoldArtifact {
        kind: "entrypoint",
        template: "main",
        path: "cmd/main.go",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_paths() {
        let entity = &ENTITY_ARTIFACTS[0];
        assert_eq!(entity.path_for("user"), PathBuf::from("domain/user.go"));

        let repo_impl = ENTITY_ARTIFACTS
            .iter()
            .find(|a| a.kind == "repository_impl")
            .unwrap();
        assert_eq!(
            repo_impl.path_for("user"),
            PathBuf::from("infrastructure/user_repository.go")
        );

        let service_test = ENTITY_ARTIFACTS
            .iter()
            .find(|a| a.kind == "service_test")
            .unwrap();
        assert_eq!(
            service_test.path_for("order"),
            PathBuf::from("application/order_service_test.go")
        );
    }

    #[test]
    fn test_sequence_covers_every_layer_with_tests() {
        assert_eq!(ENTITY_ARTIFACTS.len(), 18);
        let tests = ENTITY_ARTIFACTS
            .iter()
            .filter(|a| a.kind.ends_with("_test"))
            .count();
        assert_eq!(tests, 9);
    }

    #[test]
    fn test_scaffold_catalog() {
        let paths: Vec<&str> = SCAFFOLD_ARTIFACTS.iter().map(|a| a.path).collect();
        assert_eq!(
            paths,
            vec!["go.mod", "Makefile", "README.md", "config.yaml", "cmd/main.go"]
        );
    }
}
