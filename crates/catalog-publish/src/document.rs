use serde::{Deserialize, Serialize};

use catalog_generate::SyntheticRecord;

/// Stored form of a catalog row, keyed by `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(rename = "_id")]
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

impl From<&SyntheticRecord> for CatalogDocument {
    fn from(record: &SyntheticRecord) -> Self {
        Self {
            id: record.id,
            nombre: record.nombre.clone(),
            precio_compra: record.precio_compra,
            categoria: record.categoria.clone(),
            stock: record.stock,
            proveedor: record.proveedor.clone(),
            precio_venta_publico: record.precio_venta_publico,
            margen_absoluto: record.margen_absoluto,
            margen_porcentual: record.margen_porcentual,
        }
    }
}
