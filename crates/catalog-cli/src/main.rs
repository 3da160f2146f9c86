use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use uuid::Uuid;

use catalog_cli::registry::{
    self, QualityArtifact, RunContext, RunPaths, init_run_logging, start_run, write_quality,
    write_report, write_synthetic,
};
use catalog_cli::{
    ConfigError, PipelineConfig, PipelineError, inspect, load_config, render_inspection,
    render_outcome, run,
};
use catalog_core::redact_uri;
use catalog_publish::{CatalogStore, MongoCatalogStore, PublishError};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("store error: {0}")]
    Store(#[from] PublishError),
    #[error("environment variable {0} must hold the store connection URI")]
    MissingStoreUri(String),
}

#[derive(Parser, Debug)]
#[command(name = "catalog", version, about = "Product catalog consolidation pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest, clean, generate, publish and report.
    Run(RunArgs),
    /// Ingest, clean and report only.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Pipeline configuration file.
    #[arg(long, default_value = "catalog.toml")]
    config: PathBuf,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    run_dir: PathBuf,
    /// Rows shown in the consolidated preview.
    #[arg(long, default_value_t = 10)]
    preview_rows: usize,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Generate and report without touching the store.
    #[arg(long, default_value_t = false)]
    skip_publish: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run_pipeline(args).await,
        Command::Inspect(args) => run_inspect(args).await,
    }
}

async fn run_pipeline(args: RunArgs) -> Result<(), CliError> {
    let RunArgs {
        common,
        skip_publish,
    } = args;
    let config = load_config(&common.config)?;

    let uri = if skip_publish {
        None
    } else {
        let var = &config.store.uri_env;
        Some(std::env::var(var).map_err(|_| CliError::MissingStoreUri(var.clone()))?)
    };

    let paths = begin(&common, "run", &config, uri.as_deref())?;
    let timer = Instant::now();

    let store = match uri.as_deref() {
        Some(uri) => Some(MongoCatalogStore::connect(uri, &config.store).await?),
        None => None,
    };
    let outcome = run(&config, store.as_ref().map(|store| store as &dyn CatalogStore)).await?;

    let bytes = write_synthetic(&paths, &outcome.batch)?;
    tracing::info!(
        event = "synthetic_written",
        path = %paths.synthetic_path.display(),
        bytes,
    );

    write_quality(
        &paths,
        &QualityArtifact {
            consolidation: &outcome.inspection.consolidated.summary,
            consolidated: &outcome.inspection.pass,
            merged: Some(&outcome.merged_pass),
            publish: outcome.publish.as_ref(),
        },
    )?;

    let report = render_outcome(&outcome, common.preview_rows);
    write_report(&paths, &report)?;
    println!("{report}");

    if let Some(publish) = &outcome.publish {
        println!(
            "\nrecords in [500, 599]: {}{}",
            publish.verified,
            if publish.count_mismatch {
                " (count mismatch)"
            } else {
                ""
            }
        );
    }
    println!("run artifacts: {}", paths.root.display());

    tracing::info!(
        event = "run_finished",
        status = "success",
        duration_ms = timer.elapsed().as_millis() as u64,
    );
    Ok(())
}

async fn run_inspect(args: InspectArgs) -> Result<(), CliError> {
    let InspectArgs { common } = args;
    let config = load_config(&common.config)?;
    let paths = begin(&common, "inspect", &config, None)?;
    let timer = Instant::now();

    let inspection = inspect(&config).await?;

    write_quality(
        &paths,
        &QualityArtifact {
            consolidation: &inspection.consolidated.summary,
            consolidated: &inspection.pass,
            merged: None,
            publish: None,
        },
    )?;

    let report = render_inspection(&inspection, common.preview_rows);
    write_report(&paths, &report)?;
    println!("{report}");
    println!("\nrun artifacts: {}", paths.root.display());

    tracing::info!(
        event = "run_finished",
        status = "success",
        duration_ms = timer.elapsed().as_millis() as u64,
    );
    Ok(())
}

/// Create the run directory and route logs into it.
fn begin(
    common: &CommonArgs,
    command: &str,
    config: &PipelineConfig,
    uri: Option<&str>,
) -> Result<RunPaths, CliError> {
    let run_id = Uuid::new_v4().to_string();
    let ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        command: command.to_string(),
        run_dir: common.run_dir.clone(),
        config_path: common.config.clone(),
        config: config.clone(),
        connection: uri.map(redact_uri),
    };

    let paths = start_run(&ctx)?;
    init_run_logging(&paths.logs_path)?;
    tracing::info!(event = "run_started", run_id = %run_id, command);
    Ok(paths)
}
