use catalog_quality::{render_info, render_pass, render_preview};

use crate::pipeline::{Inspection, PipelineOutcome};

const SYNTHETIC_PREVIEW_ROWS: usize = 5;

/// Markdown report for `catalog inspect`.
pub fn render_inspection(inspection: &Inspection, preview_rows: usize) -> String {
    let mut sections = Vec::new();
    let summary = &inspection.consolidated.summary;

    let mut sources = vec!["## Sources".to_string()];
    for source in &summary.sources {
        sources.push(format!(
            "- {}: {} rows, {} columns",
            source.format,
            source.rows,
            source.columns.len()
        ));
    }
    sources.push(format!("- consolidated: {} rows", summary.total_rows));
    if !summary.duplicate_ids.is_empty() {
        let ids: Vec<String> = summary
            .duplicate_ids
            .iter()
            .map(|(id, count)| format!("{id} (x{count})"))
            .collect();
        sources.push(format!("- duplicate ids kept: {}", ids.join(", ")));
    }
    sections.push(sources.join("\n"));

    sections.push(format!(
        "## Preview\n{}",
        render_preview(&inspection.consolidated.dataset, preview_rows)
    ));
    sections.push(format!(
        "## Columns\n{}",
        render_info(&inspection.consolidated.dataset)
    ));
    sections.push(render_pass("Consolidated catalog", &inspection.pass));

    sections.join("\n\n")
}

/// Markdown report for a full run.
pub fn render_outcome(outcome: &PipelineOutcome, preview_rows: usize) -> String {
    let mut sections = vec![render_inspection(&outcome.inspection, preview_rows)];

    sections.push(format!(
        "## Synthetic batch (seed {})\n{}",
        outcome.batch.seed,
        render_preview(&outcome.batch.to_dataset(), SYNTHETIC_PREVIEW_ROWS)
    ));
    sections.push(render_pass("Merged catalog", &outcome.merged_pass));

    let publish = match &outcome.publish {
        Some(report) => {
            let mut lines = vec![
                "## Publish".to_string(),
                format!("- backend: {}", report.backend),
                format!("- documents before publish: {}", report.existing_total),
                format!("- purged: {}", report.purged),
                format!("- inserted: {}", report.inserted),
                format!(
                    "- verified in range: {} of {}",
                    report.verified, report.expected
                ),
            ];
            if report.count_mismatch {
                lines.push("- WARNING: verified count does not match the batch size".to_string());
            }
            lines.join("\n")
        }
        None => "## Publish\n- skipped".to_string(),
    };
    sections.push(publish);

    sections.join("\n\n")
}
