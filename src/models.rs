//! Data models for shareable lists and ranking comparisons.
//!
//! This module contains the core data structures passed between the
//! codec, the ranking engine, and the report writers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of items, position 0 being the most preferred.
pub type Ranking = Vec<String>;

/// Title used when a list is created without one.
pub const DEFAULT_TITLE: &str = "My List";

/// The `{title, items}` structure carried inside a share link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPayload {
    /// Human-readable list title.
    pub title: String,
    /// Items in their current order.
    pub items: Vec<String>,
}

impl ListPayload {
    /// Creates a payload, falling back to [`DEFAULT_TITLE`] for a blank title.
    pub fn new(title: impl Into<String>, items: Vec<String>) -> Self {
        Self::with_default_title(title, items, DEFAULT_TITLE)
    }

    /// Creates a payload, falling back to `default_title` for a blank title.
    pub fn with_default_title(
        title: impl Into<String>,
        items: Vec<String>,
        default_title: &str,
    ) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            default_title.to_string()
        } else {
            title
        };
        Self { title, items }
    }

    /// Number of items in the list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for ListPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for (i, item) in self.items.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, item)?;
        }
        Ok(())
    }
}

/// One line of a comparison: where an item landed in each source list and in
/// the consensus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// The item text.
    pub item: String,
    /// 1-based position of the item in each source list, in source order.
    pub source_ranks: Vec<usize>,
    /// 1-based position of the item in the consensus ranking.
    pub consensus_rank: usize,
}

impl ComparisonRow {
    /// Source ranks joined as `"1, 3, 2"`.
    pub fn joined_ranks(&self) -> String {
        self.source_ranks
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Metadata about a comparison report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Title given to the consensus list.
    pub title: String,
    /// Titles of the source lists, in input order.
    pub source_titles: Vec<String>,
    /// Number of items in every list.
    pub item_count: usize,
    /// RBO persistence used for scoring.
    pub persistence: f64,
    /// When the comparison was computed.
    pub generated_at: DateTime<Utc>,
}

/// The full result of comparing several lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Report metadata.
    pub metadata: ReportMetadata,
    /// Rows ordered by consensus rank.
    pub rows: Vec<ComparisonRow>,
    /// The consensus as a shareable payload.
    pub consensus: ListPayload,
    /// Share link for the consensus, when a base URL was available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus_link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_falls_back_to_default() {
        let payload = ListPayload::new("   ", vec!["a".to_string()]);
        assert_eq!(payload.title, DEFAULT_TITLE);

        let payload = ListPayload::with_default_title("", vec![], "Groceries");
        assert_eq!(payload.title, "Groceries");
        assert!(payload.is_empty());
    }

    #[test]
    fn test_title_kept_verbatim() {
        let payload = ListPayload::new(" Best films ", vec![]);
        assert_eq!(payload.title, " Best films ");
    }

    #[test]
    fn test_payload_display() {
        let payload = ListPayload::new("Fruit", vec!["apple".into(), "pear".into()]);
        assert_eq!(payload.to_string(), "Fruit\n1. apple\n2. pear\n");
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = ListPayload::new("T", vec!["x".into()]);
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"title":"T","items":["x"]}"#);
    }

    #[test]
    fn test_joined_ranks() {
        let row = ComparisonRow {
            item: "a".to_string(),
            source_ranks: vec![1, 3, 2],
            consensus_rank: 1,
        };
        assert_eq!(row.joined_ranks(), "1, 3, 2");
    }
}
