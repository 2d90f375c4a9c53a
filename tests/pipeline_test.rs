//! End-to-end pipeline tests: adapter -> orchestrator -> merge -> writer

use std::path::{Path, PathBuf};
use std::sync::Arc;

use domainforge::adapters::AdapterRegistry;
use domainforge::application::{GenerateRequest, GenerateUseCase};
use domainforge::generation::GenerationOrchestrator;
use domainforge::infrastructure::{FileSystemWriter, NoopFetcher};
use domainforge::rendering::TemplateEngine;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn use_case() -> GenerateUseCase {
    let engine = TemplateEngine::new().expect("templates load");
    GenerateUseCase::new(
        Arc::new(AdapterRegistry::with_defaults()),
        Arc::new(GenerationOrchestrator::new(Arc::new(engine))),
        Arc::new(FileSystemWriter::new()),
        Arc::new(NoopFetcher),
    )
}

fn request(spec: &str, output: &Path) -> GenerateRequest {
    GenerateRequest {
        spec_path: fixture(spec),
        output_dir: output.to_path_buf(),
        format: None,
        project_name: None,
        module: None,
        git_repo: None,
        dry_run: false,
    }
}

#[tokio::test]
async fn test_openapi_generation_produces_full_tree() {
    let out = tempfile::tempdir().unwrap();
    let summary = use_case()
        .execute(request("user_service.yaml", out.path()))
        .await
        .unwrap();

    assert_eq!(summary.project, "user-service");
    assert_eq!(summary.entity_count, 2);
    // 18 artifacts per entity plus 5 scaffold files
    assert_eq!(summary.written.len(), 2 * 18 + 5);
    assert_eq!(summary.preserved.len(), 0);

    for path in [
        "domain/user.go",
        "domain/user_events.go",
        "domain/user_repository.go",
        "infrastructure/user_repository.go",
        "application/user_commands.go",
        "application/user_queries.go",
        "application/user_command_handlers.go",
        "application/user_query_handlers.go",
        "application/user_service.go",
        "domain/user_test.go",
        "application/user_service_test.go",
        "domain/order.go",
        "go.mod",
        "Makefile",
        "README.md",
        "config.yaml",
        "cmd/main.go",
    ] {
        assert!(out.path().join(path).is_file(), "missing {path}");
    }

    let entity = std::fs::read_to_string(out.path().join("domain/user.go")).unwrap();
    assert!(entity.contains("type User struct"));
    assert!(entity.contains("validate:\"required,email\""));
    assert!(entity.contains("User 1:1 Profile (via profile)"));
    assert!(entity.contains("User 1:N Order (via orders)"));

    let go_mod = std::fs::read_to_string(out.path().join("go.mod")).unwrap();
    assert!(go_mod.starts_with("module user-service"));
}

#[tokio::test]
async fn test_proto_generation_excludes_envelopes() {
    let out = tempfile::tempdir().unwrap();
    let summary = use_case()
        .execute(request("catalog.proto", out.path()))
        .await
        .unwrap();

    assert_eq!(summary.project, "catalog");
    assert_eq!(summary.entity_count, 2);
    assert!(out.path().join("domain/product.go").is_file());
    assert!(out.path().join("domain/category.go").is_file());
    assert!(!out.path().join("domain/getproductrequest.go").exists());

    let product = std::fs::read_to_string(out.path().join("domain/product.go")).unwrap();
    assert!(product.contains("DisplayName string"));
    assert!(product.contains("Tags []string"));
    assert!(product.contains("protobuf:\"display_name,2\""));
}

#[tokio::test]
async fn test_rerun_preserves_existing_files() {
    let out = tempfile::tempdir().unwrap();
    let uc = use_case();

    uc.execute(request("user_service.yaml", out.path()))
        .await
        .unwrap();

    // Simulate a hand edit
    let edited = out.path().join("domain/user.go");
    std::fs::write(&edited, "package domain // hand-written\n").unwrap();

    let summary = uc
        .execute(request("user_service.yaml", out.path()))
        .await
        .unwrap();

    // Everything already exists, nothing is rewritten
    assert_eq!(summary.written.len(), 0);
    assert_eq!(summary.preserved.len(), 2 * 18 + 5);
    assert_eq!(
        std::fs::read_to_string(&edited).unwrap(),
        "package domain // hand-written\n"
    );
}

#[tokio::test]
async fn test_dry_run_writes_nothing() {
    let out = tempfile::tempdir().unwrap();
    let mut req = request("user_service.yaml", out.path());
    req.dry_run = true;

    let summary = use_case().execute(req).await.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.written.len(), 2 * 18 + 5);
    assert!(!out.path().join("go.mod").exists());
    assert!(!out.path().join("domain").exists());
}

#[tokio::test]
async fn test_generation_is_deterministic() {
    let first_dir = tempfile::tempdir().unwrap();
    let second_dir = tempfile::tempdir().unwrap();
    let uc = use_case();

    uc.execute(request("user_service.yaml", first_dir.path()))
        .await
        .unwrap();
    uc.execute(request("user_service.yaml", second_dir.path()))
        .await
        .unwrap();

    let first = std::fs::read_to_string(first_dir.path().join("domain/user.go")).unwrap();
    let second = std::fs::read_to_string(second_dir.path().join("domain/user.go")).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_explicit_unknown_format_is_rejected() {
    let out = tempfile::tempdir().unwrap();
    let mut req = request("user_service.yaml", out.path());
    req.format = Some("wsdl".to_string());

    let err = use_case().execute(req).await.unwrap_err();
    assert!(err.to_string().contains("unknown format"));
}
