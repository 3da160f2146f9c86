use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use catalog_generate::GenerateOptions;
use catalog_ingest::SourceOptions;
use catalog_publish::StoreOptions;
use catalog_quality::ImputationPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Contents of `catalog.toml`. Every section and key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub sources: SourceOptions,
    pub quality: ImputationPolicy,
    pub generate: GenerateOptions,
    pub store: StoreOptions,
}

impl PipelineConfig {
    /// Resolve relative source paths against `base`.
    pub fn rebase(mut self, base: &Path) -> Self {
        let sources = &mut self.sources;
        for path in [
            &mut sources.json,
            &mut sources.csv,
            &mut sources.xml,
            &mut sources.sqlite,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

/// Load the config at `path`, or defaults when the file does not exist.
///
/// Relative source paths in a loaded file are taken relative to the file's
/// directory; defaults stay relative to the working directory.
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    if !path.exists() {
        info!(event = "config_defaulted", path = %path.display());
        return Ok(PipelineConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: PipelineConfig = toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    info!(event = "config_loaded", path = %path.display());

    Ok(match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => config.rebase(parent),
        _ => config,
    })
}
