//! Data-quality stage of the catalog pipeline.
//!
//! Coerces numeric columns, measures missingness, imputes gaps in a fixed
//! rule order and summarizes numeric columns. Every step is a pure function
//! from dataset to dataset (plus a report) and none of them can fail.

pub mod coerce;
pub mod impute;
pub mod missingness;
pub mod report;
pub mod stats;

use serde::{Deserialize, Serialize};
use tracing::info;

use catalog_core::{Dataset, columns};

pub use coerce::{CoercedColumn, CoercionSummary, coerce_numeric};
pub use impute::{FilledColumn, ImputationPolicy, ImputationReport, impute};
pub use missingness::{ColumnMissingness, MissingnessReport, measure_missingness};
pub use report::{render_info, render_pass, render_preview};
pub use stats::{ColumnSummary, describe, median};

/// Everything observed during one cleaning pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityPass {
    pub rows: usize,
    pub coercion: CoercionSummary,
    /// Measured after coercion, before imputation.
    pub missingness: MissingnessReport,
    pub imputation: ImputationReport,
    /// Computed after imputation.
    pub statistics: Vec<ColumnSummary>,
}

/// Run coercion, missingness measurement, imputation and statistics in order.
pub fn clean(dataset: Dataset, policy: &ImputationPolicy) -> (Dataset, QualityPass) {
    let (coerced, coercion) = coerce_numeric(dataset);
    let missingness = measure_missingness(&coerced);
    let (imputed, imputation) = impute(coerced, policy);
    let statistics = describe(&imputed, &columns::STATS_COLUMNS);

    info!(
        event = "dataset_cleaned",
        rows = imputed.len(),
        values_filled = imputation.total_filled(),
        coercion_failures = coercion.total_failures(),
    );

    let pass = QualityPass {
        rows: imputed.len(),
        coercion,
        missingness,
        imputation,
        statistics,
    };
    (imputed, pass)
}
