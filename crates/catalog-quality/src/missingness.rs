use serde::{Deserialize, Serialize};

use catalog_core::Dataset;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMissingness {
    pub column: String,
    pub null_count: usize,
    /// Share of null cells over the full row count, in percent.
    pub null_percent: f64,
}

/// Null counts per column at one point of the pipeline. Diagnostic only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissingnessReport {
    pub total_rows: usize,
    pub columns: Vec<ColumnMissingness>,
}

impl MissingnessReport {
    pub fn get(&self, column: &str) -> Option<&ColumnMissingness> {
        self.columns.iter().find(|entry| entry.column == column)
    }
}

pub fn measure_missingness(dataset: &Dataset) -> MissingnessReport {
    let total_rows = dataset.len();
    let columns = dataset
        .columns()
        .iter()
        .map(|column| {
            let null_count = dataset.null_count(column).unwrap_or(0);
            let null_percent = if total_rows == 0 {
                0.0
            } else {
                null_count as f64 / total_rows as f64 * 100.0
            };
            ColumnMissingness {
                column: column.clone(),
                null_count,
                null_percent,
            }
        })
        .collect();

    MissingnessReport {
        total_rows,
        columns,
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::CellValue;

    use super::*;

    #[test]
    fn percentages_use_full_row_count() {
        let dataset = Dataset::from_rows(
            vec!["categoria".to_string()],
            vec![
                vec![CellValue::Null],
                vec![CellValue::text("a")],
                vec![CellValue::text("b")],
                vec![CellValue::text("c")],
            ],
        )
        .expect("dataset");

        let report = measure_missingness(&dataset);
        let categoria = report.get("categoria").expect("categoria");
        assert_eq!(categoria.null_count, 1);
        assert!((categoria.null_percent - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_dataset_reports_zero_percent() {
        let report = measure_missingness(&Dataset::new(vec!["id".to_string()]));
        assert_eq!(report.get("id").map(|entry| entry.null_percent), Some(0.0));
    }
}
