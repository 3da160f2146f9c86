use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use catalog_core::{CellValue, Dataset, columns};

use crate::stats::median;

/// Fallback values used when a cell is missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImputationPolicy {
    /// Margin applied to the purchase price to derive a missing sale price.
    pub sale_margin: f64,
    pub category_sentinel: String,
    pub supplier_sentinel: String,
    pub name_sentinel: String,
    pub stock_default: i64,
    /// Purchase price used when the column has no values to take a median of.
    pub empty_price_fallback: f64,
}

impl Default for ImputationPolicy {
    fn default() -> Self {
        Self {
            sale_margin: 0.095,
            category_sentinel: "uncategorized".to_string(),
            supplier_sentinel: "unknown supplier".to_string(),
            name_sentinel: "unnamed product".to_string(),
            stock_default: 0,
            empty_price_fallback: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilledColumn {
    pub column: String,
    pub filled: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImputationReport {
    /// Median used for missing purchase prices; `None` when the column was empty.
    pub purchase_price_median: Option<f64>,
    /// Columns in the order their rule ran.
    pub columns: Vec<FilledColumn>,
}

impl ImputationReport {
    pub fn total_filled(&self) -> usize {
        self.columns.iter().map(|column| column.filled).sum()
    }

    pub fn filled(&self, column: &str) -> usize {
        self.columns
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.filled)
            .unwrap_or(0)
    }
}

/// Fill missing values, one column at a time, in this order:
///
/// 1. `precio_compra` with the median of its non-null values
/// 2. `precio_venta_publico` with `precio_compra * (1 + sale_margin)`
/// 3. `categoria`, `proveedor`, `nombre` with their sentinels
/// 4. `stock` with `stock_default`
///
/// The sale-price rule reads purchase prices already repaired by rule 1.
pub fn impute(dataset: Dataset, policy: &ImputationPolicy) -> (Dataset, ImputationReport) {
    let mut dataset = columns::REQUIRED_COLUMNS
        .iter()
        .fold(dataset, |dataset, column| dataset.with_column(column));
    let mut report = ImputationReport::default();

    let purchase_median = median(&dataset.numeric_values(columns::PRECIO_COMPRA));
    if purchase_median.is_none() && !dataset.is_empty() {
        warn!(
            event = "empty_price_column",
            fallback = policy.empty_price_fallback,
            "no purchase prices to take a median of"
        );
    }
    report.purchase_price_median = purchase_median;
    let purchase_fill = purchase_median.unwrap_or(policy.empty_price_fallback);
    let filled = fill_nulls(&mut dataset, columns::PRECIO_COMPRA, |_| {
        CellValue::Float(purchase_fill)
    });
    report.record(columns::PRECIO_COMPRA, filled);

    let margin = 1.0 + policy.sale_margin;
    let purchase_idx = dataset.column_index(columns::PRECIO_COMPRA);
    let filled = fill_nulls(&mut dataset, columns::PRECIO_VENTA_PUBLICO, |row| {
        purchase_idx
            .and_then(|idx| row[idx].as_f64())
            .map(|price| CellValue::Float(price * margin))
            .unwrap_or(CellValue::Null)
    });
    report.record(columns::PRECIO_VENTA_PUBLICO, filled);

    let text_rules = [
        (columns::CATEGORIA, &policy.category_sentinel),
        (columns::PROVEEDOR, &policy.supplier_sentinel),
        (columns::NOMBRE, &policy.name_sentinel),
    ];
    for (column, sentinel) in text_rules {
        let filled = fill_nulls(&mut dataset, column, |_| CellValue::text(sentinel.as_str()));
        report.record(column, filled);
    }

    let filled = fill_nulls(&mut dataset, columns::STOCK, |_| {
        CellValue::Int(policy.stock_default)
    });
    report.record(columns::STOCK, filled);

    (dataset, report)
}

impl ImputationReport {
    fn record(&mut self, column: &str, filled: usize) {
        if filled > 0 {
            debug!(event = "column_imputed", column, filled);
        }
        self.columns.push(FilledColumn {
            column: column.to_string(),
            filled,
        });
    }
}

fn fill_nulls<F>(dataset: &mut Dataset, column: &str, mut fill: F) -> usize
where
    F: FnMut(&[CellValue]) -> CellValue,
{
    let Some(idx) = dataset.column_index(column) else {
        return 0;
    };
    let mut filled = 0;
    for row in dataset.rows_mut() {
        if row[idx].is_null() {
            let value = fill(row.as_slice());
            if !value.is_null() {
                filled += 1;
            }
            row[idx] = value;
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(rows: Vec<Vec<CellValue>>) -> Dataset {
        Dataset::from_rows(
            vec![
                "precio_compra".to_string(),
                "precio_venta_publico".to_string(),
            ],
            rows,
        )
        .expect("dataset")
    }

    #[test]
    fn purchase_median_feeds_sale_price_rule() {
        let input = dataset(vec![
            vec![CellValue::Float(1.0), CellValue::Float(1.2)],
            vec![CellValue::Float(3.0), CellValue::Float(3.3)],
            vec![CellValue::Null, CellValue::Null],
        ]);

        let (output, report) = impute(input, &ImputationPolicy::default());

        assert_eq!(report.purchase_price_median, Some(2.0));
        assert_eq!(output.get(2, "precio_compra"), Some(&CellValue::Float(2.0)));
        assert_eq!(
            output.get(2, "precio_venta_publico"),
            Some(&CellValue::Float(2.0 * 1.095))
        );
        assert_eq!(report.filled("precio_compra"), 1);
        assert_eq!(report.filled("precio_venta_publico"), 1);
    }

    #[test]
    fn absent_required_columns_are_added_and_filled() {
        let input = dataset(vec![vec![CellValue::Int(2), CellValue::Null]]);

        let (output, _) = impute(input, &ImputationPolicy::default());

        assert_eq!(output.get(0, "categoria"), Some(&CellValue::text("uncategorized")));
        assert_eq!(output.get(0, "proveedor"), Some(&CellValue::text("unknown supplier")));
        assert_eq!(output.get(0, "nombre"), Some(&CellValue::text("unnamed product")));
        assert_eq!(output.get(0, "stock"), Some(&CellValue::Int(0)));
        assert_eq!(output.get(0, "precio_compra"), Some(&CellValue::Int(2)));
    }

    #[test]
    fn empty_price_column_uses_fallback() {
        let input = dataset(vec![vec![CellValue::Null, CellValue::Null]]);

        let (output, report) = impute(input, &ImputationPolicy::default());

        assert_eq!(report.purchase_price_median, None);
        assert_eq!(output.get(0, "precio_compra"), Some(&CellValue::Float(0.0)));
        assert_eq!(output.get(0, "precio_venta_publico"), Some(&CellValue::Float(0.0)));
    }

    #[test]
    fn existing_values_are_untouched() {
        let input = dataset(vec![vec![CellValue::Float(5.0), CellValue::Float(9.9)]]);
        let (output, report) = impute(input.clone(), &ImputationPolicy::default());

        assert_eq!(output.rows()[0][..2], input.rows()[0][..]);
        assert_eq!(report.total_filled(), 4);
    }
}
