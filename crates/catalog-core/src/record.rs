use serde::{Deserialize, Serialize};

use crate::columns;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::value::CellValue;

/// Typed view of one cleaned catalog row.
///
/// `id` stays optional: sources may omit it and cleaning never invents keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: Option<i64>,
    pub nombre: String,
    pub precio_compra: f64,
    pub precio_venta_publico: f64,
    pub stock: i64,
    pub categoria: String,
    pub proveedor: String,
}

impl CatalogRecord {
    /// Read row `row` of a cleaned dataset. Fails if a required cell is null.
    pub fn from_row(dataset: &Dataset, row: usize) -> Result<Self> {
        Ok(Self {
            id: dataset
                .get(row, columns::ID)
                .and_then(|value| value.to_numeric().as_i64()),
            nombre: required_text(dataset, row, columns::NOMBRE)?,
            precio_compra: required_number(dataset, row, columns::PRECIO_COMPRA)?,
            precio_venta_publico: required_number(dataset, row, columns::PRECIO_VENTA_PUBLICO)?,
            stock: required_number(dataset, row, columns::STOCK)? as i64,
            categoria: required_text(dataset, row, columns::CATEGORIA)?,
            proveedor: required_text(dataset, row, columns::PROVEEDOR)?,
        })
    }

    /// Read every row of a cleaned dataset.
    pub fn collect(dataset: &Dataset) -> Result<Vec<Self>> {
        (0..dataset.len())
            .map(|row| Self::from_row(dataset, row))
            .collect()
    }
}

fn required_cell<'a>(dataset: &'a Dataset, row: usize, column: &str) -> Result<&'a CellValue> {
    let value = dataset
        .get(row, column)
        .ok_or_else(|| Error::MissingColumn(column.to_string()))?;
    if value.is_null() {
        return Err(Error::UnexpectedNull {
            column: column.to_string(),
            row,
        });
    }
    Ok(value)
}

fn required_text(dataset: &Dataset, row: usize, column: &str) -> Result<String> {
    Ok(required_cell(dataset, row, column)?.to_string())
}

fn required_number(dataset: &Dataset, row: usize, column: &str) -> Result<f64> {
    required_cell(dataset, row, column)?
        .to_numeric()
        .as_f64()
        .ok_or_else(|| {
            Error::InvalidDataset(format!("column '{column}' at row {row} is not numeric"))
        })
}
