use serde::{Deserialize, Serialize};
use tracing::debug;

use catalog_core::{CellValue, Dataset, columns};

/// Coercion outcome for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoercedColumn {
    pub column: String,
    /// Non-null values that parsed as numbers.
    pub parsed: usize,
    /// Non-null values that failed to parse and became null.
    pub failures: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoercionSummary {
    pub columns: Vec<CoercedColumn>,
}

impl CoercionSummary {
    pub fn total_failures(&self) -> usize {
        self.columns.iter().map(|column| column.failures).sum()
    }
}

/// Parse `id`, `precio_compra`, `stock` and `precio_venta_publico` as numbers.
///
/// Values that fail to parse become nulls; absent columns are skipped.
pub fn coerce_numeric(mut dataset: Dataset) -> (Dataset, CoercionSummary) {
    let mut summary = CoercionSummary::default();

    for column in columns::NUMERIC_COLUMNS {
        let Some(idx) = dataset.column_index(column) else {
            continue;
        };
        let mut parsed = 0;
        let mut failures = 0;
        for row in dataset.rows_mut() {
            if row[idx].is_null() {
                continue;
            }
            let coerced = row[idx].to_numeric();
            if coerced.is_null() {
                failures += 1;
            } else {
                parsed += 1;
            }
            row[idx] = coerced;
        }
        if failures > 0 {
            debug!(event = "coercion_failures", column, failures);
        }
        summary.columns.push(CoercedColumn {
            column: column.to_string(),
            parsed,
            failures,
        });
    }

    (dataset, summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_values_become_null_and_are_counted() {
        let dataset = Dataset::from_rows(
            vec!["stock".to_string(), "nombre".to_string()],
            vec![
                vec![CellValue::text("12"), CellValue::text("7")],
                vec![CellValue::text("abc"), CellValue::text("x")],
                vec![CellValue::Null, CellValue::Null],
            ],
        )
        .expect("dataset");

        let (coerced, summary) = coerce_numeric(dataset);

        assert_eq!(coerced.get(0, "stock"), Some(&CellValue::Int(12)));
        assert_eq!(coerced.get(1, "stock"), Some(&CellValue::Null));
        // Text columns are left alone.
        assert_eq!(coerced.get(0, "nombre"), Some(&CellValue::text("7")));
        assert_eq!(summary.columns.len(), 1);
        assert_eq!(summary.columns[0].parsed, 1);
        assert_eq!(summary.columns[0].failures, 1);
    }
}
