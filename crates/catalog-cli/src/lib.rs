//! Catalog pipeline wiring: configuration, stage orchestration, reporting and
//! run artifacts. The `catalog` binary is a thin clap front end over this.

pub mod config;
pub mod pipeline;
pub mod registry;
pub mod report;

pub use config::{ConfigError, PipelineConfig, load_config};
pub use pipeline::{Inspection, PipelineError, PipelineOutcome, inspect, run};
pub use report::{render_inspection, render_outcome};
