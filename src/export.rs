//! CSV export of a comparison.

use crate::models::ComparisonReport;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Column headers of the exported table.
pub const CSV_HEADERS: [&str; 3] = ["Item", "RBO Rank", "Rankings"];

/// Errors writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("export is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Write the comparison as CSV to any writer.
///
/// One row per item in consensus order: the item, its consensus rank, and its
/// rank in every source joined by `", "`. Values containing a comma, quote, or
/// line break are wrapped in double quotes.
pub fn write_csv<W: Write>(report: &ComparisonReport, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(CSV_HEADERS)?;
    for row in &report.rows {
        csv.write_record([
            row.item.as_str(),
            row.consensus_rank.to_string().as_str(),
            row.joined_ranks().as_str(),
        ])?;
    }
    csv.flush()?;

    Ok(())
}

/// Render the comparison as a CSV string.
pub fn generate_csv(report: &ComparisonReport) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(report, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Write the comparison as CSV to a file.
pub fn write_csv_file(report: &ComparisonReport, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write_csv(report, file)
}
