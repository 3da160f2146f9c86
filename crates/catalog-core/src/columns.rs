//! Column names of the product catalog.

pub const ID: &str = "id";
pub const NOMBRE: &str = "nombre";
pub const PRECIO_COMPRA: &str = "precio_compra";
pub const PRECIO_VENTA_PUBLICO: &str = "precio_venta_publico";
pub const STOCK: &str = "stock";
pub const CATEGORIA: &str = "categoria";
pub const PROVEEDOR: &str = "proveedor";
pub const MARGEN_ABSOLUTO: &str = "margen_absoluto";
pub const MARGEN_PORCENTUAL: &str = "margen_porcentual";

/// Columns parsed as numbers before any imputation happens.
pub const NUMERIC_COLUMNS: [&str; 4] = [ID, PRECIO_COMPRA, STOCK, PRECIO_VENTA_PUBLICO];

/// Columns that can never be null once a dataset has been cleaned.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    NOMBRE,
    CATEGORIA,
    PROVEEDOR,
    STOCK,
    PRECIO_COMPRA,
    PRECIO_VENTA_PUBLICO,
];

/// Numeric columns summarized by descriptive statistics.
pub const STATS_COLUMNS: [&str; 3] = [PRECIO_COMPRA, PRECIO_VENTA_PUBLICO, STOCK];
