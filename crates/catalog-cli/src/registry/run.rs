use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use catalog_core::RedactedUri;
use catalog_generate::{SyntheticBatch, write_batch_csv};
use catalog_ingest::ConsolidationSummary;
use catalog_publish::PublishReport;
use catalog_quality::QualityPass;

use crate::config::PipelineConfig;

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub command: String,
    pub run_dir: PathBuf,
    pub config_path: PathBuf,
    pub config: PipelineConfig,
    /// `None` when the run does not publish or the URI is unset.
    pub connection: Option<RedactedUri>,
}

/// Where the batch is published, without credentials.
#[derive(Debug, Serialize)]
pub struct StoreTarget {
    pub uri_env: String,
    pub database: String,
    pub collection: String,
    pub connection: Option<RedactedUri>,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub command: String,
    pub config_path: PathBuf,
    pub sources: catalog_ingest::SourceOptions,
    pub quality: catalog_quality::ImputationPolicy,
    pub generate: catalog_generate::GenerateOptions,
    pub store: StoreTarget,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Quality observations of both cleaning passes.
#[derive(Debug, Serialize)]
pub struct QualityArtifact<'a> {
    pub consolidation: &'a ConsolidationSummary,
    pub consolidated: &'a QualityPass,
    pub merged: Option<&'a QualityPass>,
    pub publish: Option<&'a PublishReport>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub logs_path: PathBuf,
    pub quality_path: PathBuf,
    pub report_path: PathBuf,
    pub synthetic_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config_path = root.join("config.json");
    let logs_path = root.join("logs.ndjson");

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        command: ctx.command.clone(),
        config_path: ctx.config_path.clone(),
        sources: ctx.config.sources.clone(),
        quality: ctx.config.quality.clone(),
        generate: ctx.config.generate.clone(),
        store: StoreTarget {
            uri_env: ctx.config.store.uri_env.clone(),
            database: ctx.config.store.database.clone(),
            collection: ctx.config.store.collection.clone(),
            connection: ctx.connection.clone(),
        },
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        logs_path,
        quality_path: root.join("quality.json"),
        report_path: root.join("report.md"),
        synthetic_path: root.join("synthetic.csv"),
        root,
    })
}

pub fn write_quality(paths: &RunPaths, quality: &QualityArtifact<'_>) -> RegistryResult<()> {
    write_json(&paths.quality_path, quality)
}

pub fn write_report(paths: &RunPaths, report: &str) -> RegistryResult<()> {
    std::fs::write(&paths.report_path, report)?;
    Ok(())
}

/// Returns the number of bytes written.
pub fn write_synthetic(paths: &RunPaths, batch: &SyntheticBatch) -> RegistryResult<u64> {
    Ok(write_batch_csv(&paths.synthetic_path, batch)?)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}
