//! Comparison report generation.
//!
//! Renders a [`ComparisonReport`] as a plain-text table for the terminal,
//! as Markdown, or as JSON.

use crate::models::{ComparisonReport, ComparisonRow, ReportMetadata};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &ComparisonReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", report.metadata.title));
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_rankings_section(&report.rows, &report.metadata));

    if let Some(ref link) = report.consensus_link {
        output.push_str("## Share\n\n");
        output.push_str(&format!("[Open the consensus list]({})\n\n", link));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Lists Compared:** {}\n",
        metadata.source_titles.len()
    ));
    for (i, title) in metadata.source_titles.iter().enumerate() {
        section.push_str(&format!("  {}. {}\n", i + 1, title));
    }
    section.push_str(&format!("- **Items:** {}\n", metadata.item_count));
    section.push_str(&format!("- **Persistence (p):** {}\n", metadata.persistence));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push('\n');

    section
}

/// Generate the consensus table, one column per source list.
fn generate_rankings_section(rows: &[ComparisonRow], metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Consensus Ranking\n\n");

    if rows.is_empty() {
        section.push_str("The lists are empty.\n\n");
        return section;
    }

    let sources = metadata.source_titles.len();
    let source_headers: String = (1..=sources).map(|i| format!(" List {} |", i)).collect();
    let source_rules: String = (0..sources).map(|_| ":---:|").collect();

    section.push_str(&format!("| RBO Rank | Item |{}\n", source_headers));
    section.push_str(&format!("|:---:|:---|{}\n", source_rules));

    for row in rows {
        let ranks: String = row
            .source_ranks
            .iter()
            .map(|r| format!(" {} |", r))
            .collect();
        section.push_str(&format!(
            "| {} | {} |{}\n",
            row.consensus_rank,
            escape_table_cell(&row.item),
            ranks
        ));
    }
    section.push('\n');

    section
}

fn escape_table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by List Jiggler*\n".to_string()
}

/// Generate an aligned plain-text table for the terminal.
pub fn generate_text_report(report: &ComparisonReport) -> String {
    let item_width = report
        .rows
        .iter()
        .map(|r| r.item.chars().count())
        .chain(std::iter::once("Item".len()))
        .max()
        .unwrap_or_default();

    let mut output = String::new();
    output.push_str(&format!("{}\n\n", report.metadata.title));
    output.push_str(&format!(
        "{:>4}  {:<width$}  Rankings\n",
        "Rank",
        "Item",
        width = item_width
    ));

    for row in &report.rows {
        output.push_str(&format!(
            "{:>4}  {:<width$}  {}\n",
            row.consensus_rank,
            row.item,
            row.joined_ranks(),
            width = item_width
        ));
    }

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &ComparisonReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
