use sqlx::sqlite::{SqliteConnection, SqliteRow};

/// Column names of `table` in declaration order. Empty when the table is missing.
pub(crate) async fn list_columns(
    conn: &mut SqliteConnection,
    table: &str,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT name FROM pragma_table_info(?1) ORDER BY cid",
    )
    .bind(table)
    .fetch_all(conn)
    .await
}

pub(crate) async fn select_all(
    conn: &mut SqliteConnection,
    table: &str,
) -> Result<Vec<SqliteRow>, sqlx::Error> {
    let sql = format!("SELECT * FROM {}", quote_identifier(table));
    sqlx::query(&sql).fetch_all(conn).await
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_identifier("productos"), "\"productos\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
