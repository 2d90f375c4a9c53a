//! domainforge CLI entrypoint
//! Parses command-line arguments and dispatches to the generation use cases.
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use domainforge::adapters::AdapterRegistry;
use domainforge::application::{
    GenerateRequest, GenerateSummary, GenerateUseCase, ScaffoldRequest, ScaffoldUseCase,
};
use domainforge::generation::GenerationOrchestrator;
use domainforge::infrastructure::{FileSystemWriter, GitFetcher};
use domainforge::rendering::TemplateEngine;

#[derive(Parser)]
#[command(name = "domainforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a DDD service layer from an interface-definition document
    Generate {
        /// Path to an OpenAPI document (.yaml/.yml/.json) or a Protocol
        /// Buffer definition (.proto)
        #[arg(long)]
        spec: PathBuf,
        /// Output directory for generated code
        #[arg(long)]
        output: PathBuf,
        /// Input format; auto-detected when omitted
        #[arg(long)]
        format: Option<String>,
        /// Overrides the project name derived from the document
        #[arg(long)]
        project_name: Option<String>,
        /// Go module path for the generated project
        #[arg(long)]
        module: Option<String>,
        /// Existing repository to clone into the output directory first
        #[arg(long)]
        git_repo: Option<String>,
        /// Report what would be written without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },
    /// Generate project scaffolding only (no input document required)
    Scaffold {
        /// Project name for the scaffold
        #[arg(long)]
        project_name: String,
        /// Output directory for generated code
        #[arg(long)]
        output: PathBuf,
        /// Go module path for the generated project
        #[arg(long)]
        module: Option<String>,
        /// Report what would be written without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },
    /// List the registered input formats
    Formats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            spec,
            output,
            format,
            project_name,
            module,
            git_repo,
            dry_run,
        } => {
            let summary = run_generate(GenerateRequest {
                spec_path: spec,
                output_dir: output,
                format,
                project_name,
                module,
                git_repo,
                dry_run,
            })
            .await?;
            report(&summary);
        }
        Commands::Scaffold {
            project_name,
            output,
            module,
            dry_run,
        } => {
            let summary = run_scaffold(ScaffoldRequest {
                project_name,
                output_dir: output,
                module,
                dry_run,
            })
            .await?;
            report(&summary);
        }
        Commands::Formats => {
            let registry = AdapterRegistry::with_defaults();
            println!("Supported input formats:");
            for adapter in registry.formats() {
                println!("  {adapter}");
            }
        }
    }
    Ok(())
}

async fn run_generate(request: GenerateRequest) -> anyhow::Result<GenerateSummary> {
    let engine = TemplateEngine::new().context("failed to load embedded templates")?;
    let use_case = GenerateUseCase::new(
        Arc::new(AdapterRegistry::with_defaults()),
        Arc::new(GenerationOrchestrator::new(Arc::new(engine))),
        Arc::new(FileSystemWriter::new()),
        Arc::new(GitFetcher::new()),
    );

    info!(spec = %request.spec_path.display(), "generating project");
    use_case
        .execute(request)
        .await
        .context("generation failed")
}

async fn run_scaffold(request: ScaffoldRequest) -> anyhow::Result<GenerateSummary> {
    let engine = TemplateEngine::new().context("failed to load embedded templates")?;
    let use_case = ScaffoldUseCase::new(
        Arc::new(GenerationOrchestrator::new(Arc::new(engine))),
        Arc::new(FileSystemWriter::new()),
    );

    info!(project = %request.project_name, "generating scaffold");
    use_case
        .execute(request)
        .await
        .context("scaffold generation failed")
}

fn report(summary: &GenerateSummary) {
    let verb = if summary.dry_run {
        "Would write"
    } else {
        "Wrote"
    };
    println!(
        "{} {} file(s) for project '{}'",
        verb,
        summary.written.len(),
        summary.project
    );
    for path in &summary.written {
        println!("  {}", path.display());
    }
    if !summary.preserved.is_empty() {
        println!("Preserved {} existing file(s):", summary.preserved.len());
        for path in &summary.preserved {
            println!("  {}", path.display());
        }
    }
}
