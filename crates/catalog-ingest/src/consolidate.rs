use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use catalog_core::{Dataset, columns};

use crate::reader::SourceFormat;

/// Rows and columns contributed by one source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSummary {
    pub format: SourceFormat,
    pub rows: usize,
    pub columns: Vec<String>,
}

/// Outcome of a consolidation, for diagnostics only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationSummary {
    pub sources: Vec<SourceSummary>,
    pub total_rows: usize,
    pub columns: Vec<String>,
    /// Ids present more than once after the union. They are kept, not merged.
    pub duplicate_ids: Vec<(i64, usize)>,
}

/// Superset dataset plus its summary.
#[derive(Debug, Clone)]
pub struct ConsolidatedCatalog {
    pub dataset: Dataset,
    pub summary: ConsolidationSummary,
}

/// Union the sources into one dataset.
///
/// Columns follow first-seen order across sources; rows keep source order.
/// Sources without rows contribute nothing. Rows sharing an id all survive.
pub fn consolidate(sources: Vec<(SourceFormat, Dataset)>) -> ConsolidatedCatalog {
    let mut dataset = Dataset::default();
    let mut summaries = Vec::with_capacity(sources.len());

    for (format, source) in sources {
        summaries.push(SourceSummary {
            format,
            rows: source.len(),
            columns: source.columns().to_vec(),
        });
        if source.is_empty() {
            continue;
        }
        dataset = dataset.concat(source);
    }

    let duplicate_ids = dataset.duplicate_keys(columns::ID);
    if !duplicate_ids.is_empty() {
        warn!(
            event = "duplicate_ids",
            count = duplicate_ids.len(),
            "ids repeated across sources are kept as separate rows"
        );
    }

    let summary = ConsolidationSummary {
        sources: summaries,
        total_rows: dataset.len(),
        columns: dataset.columns().to_vec(),
        duplicate_ids,
    };
    info!(
        event = "consolidated",
        rows = summary.total_rows,
        columns = summary.columns.len(),
    );

    ConsolidatedCatalog { dataset, summary }
}

#[cfg(test)]
mod tests {
    use catalog_core::CellValue;

    use super::*;

    fn source(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Dataset {
        Dataset::from_rows(columns.iter().map(|c| c.to_string()).collect(), rows)
            .expect("source dataset")
    }

    #[test]
    fn disjoint_schemas_union_columns_and_sum_rows() {
        let consolidated = consolidate(vec![
            (
                SourceFormat::Json,
                source(&["a"], vec![vec![CellValue::Int(1)], vec![CellValue::Int(2)]]),
            ),
            (SourceFormat::Delimited, source(&["b"], vec![vec![CellValue::text("x")]])),
            (SourceFormat::Markup, source(&["c"], vec![vec![CellValue::text("y")]])),
            (SourceFormat::Sqlite, source(&["d"], vec![vec![CellValue::Float(0.5)]])),
        ]);

        let dataset = &consolidated.dataset;
        assert_eq!(dataset.len(), 5);
        assert_eq!(dataset.columns(), &["a", "b", "c", "d"]);
        assert_eq!(dataset.rows()[2], vec![
            CellValue::Null,
            CellValue::text("x"),
            CellValue::Null,
            CellValue::Null
        ]);
        assert_eq!(dataset.null_count("a"), Some(3));
    }

    #[test]
    fn empty_sources_contribute_nothing() {
        let consolidated = consolidate(vec![
            (SourceFormat::Json, source(&["id"], vec![vec![CellValue::Int(1)]])),
            (SourceFormat::Delimited, Dataset::default()),
            (SourceFormat::Markup, source(&["id", "extra"], Vec::new())),
        ]);

        assert_eq!(consolidated.dataset.len(), 1);
        assert_eq!(consolidated.dataset.columns(), &["id"]);
        assert_eq!(consolidated.summary.sources.len(), 3);
    }

    #[test]
    fn duplicate_ids_survive_and_are_reported() {
        let consolidated = consolidate(vec![
            (SourceFormat::Json, source(&["id"], vec![vec![CellValue::Int(4)]])),
            (SourceFormat::Sqlite, source(&["id"], vec![vec![CellValue::Int(4)]])),
        ]);

        assert_eq!(consolidated.dataset.len(), 2);
        assert_eq!(consolidated.summary.duplicate_ids, vec![(4, 2)]);
    }
}
