use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use catalog_core::{CellValue, Dataset, columns};

/// First id of the reserved synthetic range.
pub const SYNTHETIC_ID_START: i64 = 500;
/// Rows per synthetic batch; ids run from 500 to 599.
pub const SYNTHETIC_BATCH_SIZE: usize = 100;
/// Margin applied to synthetic purchase prices. Distinct from the imputation margin.
pub const SYNTHETIC_MARGIN: f64 = 0.12;

pub(crate) const PURCHASE_PRICE_MIN: f64 = 1.5;
pub(crate) const PURCHASE_PRICE_MAX: f64 = 10.0;
pub(crate) const STOCK_MIN: i64 = 1;
pub(crate) const STOCK_MAX_EXCLUSIVE: i64 = 200;

/// Options for the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Seed of the ChaCha8 stream.
    pub seed: u64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Known categories and suppliers that synthetic rows are sampled from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub categories: Vec<String>,
    pub suppliers: Vec<String>,
}

impl Vocabulary {
    /// Distinct non-null values of `categoria` and `proveedor`, first-seen order.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            categories: dataset.distinct_values(columns::CATEGORIA),
            suppliers: dataset.distinct_values(columns::PROVEEDOR),
        }
    }
}

/// One generated catalog row with its derived margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticRecord {
    pub id: i64,
    pub nombre: String,
    pub precio_compra: f64,
    pub categoria: String,
    pub stock: i64,
    pub proveedor: String,
    pub precio_venta_publico: f64,
    pub margen_absoluto: f64,
    pub margen_porcentual: f64,
}

/// The full synthetic batch for one seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticBatch {
    pub seed: u64,
    pub records: Vec<SyntheticRecord>,
}

impl SyntheticBatch {
    /// Inclusive id range every batch occupies, whatever its contents.
    pub fn key_range() -> RangeInclusive<i64> {
        SYNTHETIC_ID_START..=SYNTHETIC_ID_START + SYNTHETIC_BATCH_SIZE as i64 - 1
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tabular view used to merge the batch into the reporting dataset.
    pub fn to_dataset(&self) -> Dataset {
        let mut dataset = Dataset::new(
            [
                columns::ID,
                columns::NOMBRE,
                columns::PRECIO_COMPRA,
                columns::CATEGORIA,
                columns::STOCK,
                columns::PROVEEDOR,
                columns::PRECIO_VENTA_PUBLICO,
                columns::MARGEN_ABSOLUTO,
                columns::MARGEN_PORCENTUAL,
            ]
            .iter()
            .map(|column| column.to_string())
            .collect(),
        );
        for record in &self.records {
            dataset.push_record([
                (columns::ID, CellValue::Int(record.id)),
                (columns::NOMBRE, CellValue::text(record.nombre.as_str())),
                (columns::PRECIO_COMPRA, CellValue::Float(record.precio_compra)),
                (columns::CATEGORIA, CellValue::text(record.categoria.as_str())),
                (columns::STOCK, CellValue::Int(record.stock)),
                (columns::PROVEEDOR, CellValue::text(record.proveedor.as_str())),
                (
                    columns::PRECIO_VENTA_PUBLICO,
                    CellValue::Float(record.precio_venta_publico),
                ),
                (columns::MARGEN_ABSOLUTO, CellValue::Float(record.margen_absoluto)),
                (
                    columns::MARGEN_PORCENTUAL,
                    CellValue::Float(record.margen_porcentual),
                ),
            ]);
        }
        dataset
    }
}
