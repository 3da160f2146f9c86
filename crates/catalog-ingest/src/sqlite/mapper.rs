use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

use catalog_core::CellValue;

/// Map a row to cells using the storage class of each value.
pub(crate) fn map_row(row: &SqliteRow) -> Result<Vec<CellValue>, sqlx::Error> {
    (0..row.len()).map(|idx| map_cell(row, idx)).collect()
}

fn map_cell(row: &SqliteRow, idx: usize) -> Result<CellValue, sqlx::Error> {
    let storage = {
        let raw = row.try_get_raw(idx)?;
        if raw.is_null() {
            return Ok(CellValue::Null);
        }
        raw.type_info().name().to_string()
    };

    match storage.as_str() {
        "INTEGER" | "BOOLEAN" => row.try_get::<i64, _>(idx).map(CellValue::Int),
        "REAL" | "NUMERIC" => row.try_get::<f64, _>(idx).map(CellValue::Float),
        "BLOB" => row
            .try_get::<Vec<u8>, _>(idx)
            .map(|bytes| CellValue::Text(String::from_utf8_lossy(&bytes).into_owned())),
        _ => row.try_get::<String, _>(idx).map(CellValue::Text),
    }
}
