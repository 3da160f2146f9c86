use catalog_core::Dataset;

use crate::QualityPass;

/// Render the first `rows` rows as a markdown table.
pub fn render_preview(dataset: &Dataset, rows: usize) -> String {
    let head = dataset.head(rows);
    let mut lines = Vec::new();
    lines.push(format!(
        "Showing {} of {} rows",
        head.len(),
        dataset.len()
    ));
    lines.push(String::new());
    lines.push(table_header(head.columns().iter().map(String::as_str)));
    for row in head.rows() {
        lines.push(table_row(row.iter().map(|value| value.to_string())));
    }
    lines.join("\n")
}

/// Column overview: non-null counts and the kind of values found.
pub fn render_info(dataset: &Dataset) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} rows, {} columns",
        dataset.len(),
        dataset.columns().len()
    ));
    lines.push(String::new());
    lines.push(table_header(["column", "non_null", "kind"]));
    for column in dataset.columns() {
        let nulls = dataset.null_count(column).unwrap_or(0);
        let kind = dataset
            .column_kind(column)
            .map(|kind| kind.as_str())
            .unwrap_or("-");
        lines.push(table_row([
            column.clone(),
            (dataset.len() - nulls).to_string(),
            kind.to_string(),
        ]));
    }
    lines.join("\n")
}

/// Render one cleaning pass: missingness, imputation and statistics.
pub fn render_pass(label: &str, pass: &QualityPass) -> String {
    let mut lines = Vec::new();

    lines.push(format!("## {label}"));
    lines.push(format!("- rows: {}", pass.rows));
    lines.push(format!(
        "- coercion failures: {}",
        pass.coercion.total_failures()
    ));
    lines.push(String::new());

    lines.push("### Missing values".to_string());
    lines.push(table_header(["column", "nulls", "percent"]));
    for entry in &pass.missingness.columns {
        lines.push(table_row([
            entry.column.clone(),
            entry.null_count.to_string(),
            format!("{:.2} %", entry.null_percent),
        ]));
    }
    lines.push(String::new());

    lines.push("### Imputation".to_string());
    let median = pass
        .imputation
        .purchase_price_median
        .map(|value| format!("{value:.4}"))
        .unwrap_or_else(|| "-".to_string());
    lines.push(format!("- purchase price median: {median}"));
    lines.push(table_header(["column", "filled"]));
    for entry in &pass.imputation.columns {
        lines.push(table_row([entry.column.clone(), entry.filled.to_string()]));
    }
    lines.push(String::new());

    lines.push("### Statistics".to_string());
    lines.push(table_header([
        "column", "count", "min", "max", "mean", "median", "std_dev",
    ]));
    for summary in &pass.statistics {
        lines.push(table_row([
            summary.column.clone(),
            summary.count.to_string(),
            format_stat(summary.min),
            format_stat(summary.max),
            format_stat(summary.mean),
            format_stat(summary.median),
            format_stat(summary.std_dev),
        ]));
    }

    lines.join("\n")
}

fn format_stat(value: Option<f64>) -> String {
    value
        .map(|value| format!("{value:.4}"))
        .unwrap_or_else(|| "-".to_string())
}

fn table_header<'a>(columns: impl IntoIterator<Item = &'a str>) -> String {
    let columns: Vec<&str> = columns.into_iter().collect();
    let separator = vec!["---"; columns.len()];
    format!("| {} |\n| {} |", columns.join(" | "), separator.join(" | "))
}

fn table_row(cells: impl IntoIterator<Item = String>) -> String {
    let cells: Vec<String> = cells.into_iter().collect();
    format!("| {} |", cells.join(" | "))
}
