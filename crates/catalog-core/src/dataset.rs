use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::CellValue;

/// Ordered rows sharing one ordered column list.
///
/// Every row holds exactly one cell per column; absent values are stored as
/// explicit [`CellValue::Null`] cells, never as missing entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

/// Kind of values found in a column, used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Empty,
    Bool,
    Int,
    Float,
    Text,
    Mixed,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Empty => "empty",
            ColumnKind::Bool => "bool",
            ColumnKind::Int => "int",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
            ColumnKind::Mixed => "mixed",
        }
    }
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let mut dataset = Self::new(columns);
        for row in rows {
            dataset.push_row(row)?;
        }
        Ok(dataset)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Vec<CellValue>] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|cells| cells.get(idx))
    }

    /// Cells of one column in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&CellValue>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Append a positional row. Its width must match the column list.
    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::InvalidDataset(format!(
                "row {} has {} cells, expected {}",
                self.rows.len(),
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a keyed row, adding unseen columns as it goes.
    ///
    /// Earlier rows receive nulls for columns introduced by later records.
    pub fn push_record<I, K>(&mut self, record: I)
    where
        I: IntoIterator<Item = (K, CellValue)>,
        K: Into<String>,
    {
        let mut row = vec![CellValue::Null; self.columns.len()];
        for (key, value) in record {
            let key = key.into();
            let idx = match self.column_index(&key) {
                Some(idx) => idx,
                None => {
                    self.add_null_column(key);
                    row.push(CellValue::Null);
                    self.columns.len() - 1
                }
            };
            row[idx] = value;
        }
        self.rows.push(row);
    }

    /// Return the dataset with `name` present, null-filled when it was absent.
    pub fn with_column(mut self, name: &str) -> Self {
        if !self.has_column(name) {
            self.add_null_column(name.to_string());
        }
        self
    }

    /// Union of `other` into `self`: columns in first-seen order, rows appended.
    pub fn concat(self, other: Dataset) -> Dataset {
        let mut merged = self;
        for column in &other.columns {
            if !merged.has_column(column) {
                merged.add_null_column(column.clone());
            }
        }

        let positions: Vec<usize> = other
            .columns
            .iter()
            .filter_map(|column| merged.column_index(column))
            .collect();
        let width = merged.columns.len();
        for cells in other.rows {
            let mut row = vec![CellValue::Null; width];
            for (value, idx) in cells.into_iter().zip(&positions) {
                row[*idx] = value;
            }
            merged.rows.push(row);
        }
        merged
    }

    /// First `n` rows, same columns.
    pub fn head(&self, n: usize) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    pub fn null_count(&self, column: &str) -> Option<usize> {
        let idx = self.column_index(column)?;
        Some(self.rows.iter().filter(|row| row[idx].is_null()).count())
    }

    /// Non-null numeric values of a column, in row order.
    pub fn numeric_values(&self, column: &str) -> Vec<f64> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        self.rows.iter().filter_map(|row| row[idx].as_f64()).collect()
    }

    /// Distinct non-null values of a column rendered as text, first-seen order.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        let mut seen: Vec<String> = Vec::new();
        for row in &self.rows {
            if row[idx].is_null() {
                continue;
            }
            let value = row[idx].to_string();
            if !seen.contains(&value) {
                seen.push(value);
            }
        }
        seen
    }

    /// Keys that appear more than once in `column`, with their counts.
    pub fn duplicate_keys(&self, column: &str) -> Vec<(i64, usize)> {
        let Some(idx) = self.column_index(column) else {
            return Vec::new();
        };
        let mut counts: HashMap<i64, usize> = HashMap::new();
        let mut order = Vec::new();
        for row in &self.rows {
            if let Some(key) = row[idx].to_numeric().as_i64() {
                let count = counts.entry(key).or_insert(0);
                if *count == 0 {
                    order.push(key);
                }
                *count += 1;
            }
        }
        order
            .into_iter()
            .filter_map(|key| {
                let count = counts.get(&key).copied().unwrap_or(0);
                (count > 1).then_some((key, count))
            })
            .collect()
    }

    pub fn column_kind(&self, column: &str) -> Option<ColumnKind> {
        let idx = self.column_index(column)?;
        let mut kind = ColumnKind::Empty;
        for row in &self.rows {
            let cell_kind = match &row[idx] {
                CellValue::Null => continue,
                CellValue::Bool(_) => ColumnKind::Bool,
                CellValue::Int(_) => ColumnKind::Int,
                CellValue::Float(_) => ColumnKind::Float,
                CellValue::Text(_) => ColumnKind::Text,
            };
            kind = match (kind, cell_kind) {
                (ColumnKind::Empty, next) => next,
                (current, next) if current == next => current,
                (ColumnKind::Int, ColumnKind::Float) | (ColumnKind::Float, ColumnKind::Int) => {
                    ColumnKind::Float
                }
                _ => ColumnKind::Mixed,
            };
        }
        Some(kind)
    }

    fn add_null_column(&mut self, name: String) {
        self.columns.push(name);
        for row in &mut self.rows {
            row.push(CellValue::Null);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn push_record_backfills_new_columns() {
        let mut dataset = Dataset::default();
        dataset.push_record([("id", CellValue::Int(1))]);
        dataset.push_record([("id", CellValue::Int(2)), ("nombre", CellValue::text("b"))]);

        assert_eq!(dataset.columns(), &cols(&["id", "nombre"]));
        assert_eq!(dataset.get(0, "nombre"), Some(&CellValue::Null));
        assert_eq!(dataset.get(1, "nombre"), Some(&CellValue::text("b")));
    }

    #[test]
    fn concat_unions_columns_in_first_seen_order() {
        let left = Dataset::from_rows(cols(&["id", "nombre"]), vec![vec![
            CellValue::Int(1),
            CellValue::text("a"),
        ]])
        .expect("left");
        let right = Dataset::from_rows(cols(&["stock", "id"]), vec![vec![
            CellValue::Int(9),
            CellValue::Int(2),
        ]])
        .expect("right");

        let merged = left.concat(right);
        assert_eq!(merged.columns(), &cols(&["id", "nombre", "stock"]));
        assert_eq!(merged.rows()[0], vec![
            CellValue::Int(1),
            CellValue::text("a"),
            CellValue::Null
        ]);
        assert_eq!(merged.rows()[1], vec![
            CellValue::Int(2),
            CellValue::Null,
            CellValue::Int(9)
        ]);
    }

    #[test]
    fn push_row_rejects_wrong_width() {
        let mut dataset = Dataset::new(cols(&["id"]));
        let err = dataset
            .push_row(vec![CellValue::Int(1), CellValue::Int(2)])
            .expect_err("width mismatch");
        assert!(matches!(err, Error::InvalidDataset(_)));
    }

    #[test]
    fn duplicate_keys_reports_repeated_ids() {
        let dataset = Dataset::from_rows(cols(&["id"]), vec![
            vec![CellValue::Int(1)],
            vec![CellValue::text("1")],
            vec![CellValue::Int(2)],
            vec![CellValue::Null],
        ])
        .expect("dataset");
        assert_eq!(dataset.duplicate_keys("id"), vec![(1, 2)]);
    }

    #[test]
    fn column_kind_widens_int_to_float() {
        let dataset = Dataset::from_rows(cols(&["precio"]), vec![
            vec![CellValue::Int(1)],
            vec![CellValue::Float(2.5)],
            vec![CellValue::Null],
        ])
        .expect("dataset");
        assert_eq!(dataset.column_kind("precio"), Some(ColumnKind::Float));
    }
}
