//! Comparing several shared lists.
//!
//! Decodes each link, checks that the lists hold the same items, aggregates
//! them into a consensus, and tabulates where every item landed.

use crate::codec::{payload_from_link, share_link, CodecError};
use crate::models::{ComparisonReport, ComparisonRow, ListPayload, Ranking, ReportMetadata};
use crate::ranking::{aggregate_with_persistence, RankingError, DEFAULT_PERSISTENCE};
use chrono::Utc;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Options for a comparison.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// RBO persistence.
    pub persistence: f64,
    /// Title for the consensus list; derived from the inputs when absent.
    pub title: Option<String>,
    /// Base URL for the consensus share link; no link is built when absent.
    pub base_url: Option<String>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            persistence: DEFAULT_PERSISTENCE,
            title: None,
            base_url: None,
        }
    }
}

/// Errors from comparing lists.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("at least two lists are needed for a comparison, got {0}")]
    TooFewLists(usize),

    #[error("list {} could not be decoded: {source}", .index + 1)]
    InvalidLink {
        index: usize,
        #[source]
        source: CodecError,
    },

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl CompareError {
    /// Message suitable for showing to whoever supplied the lists.
    pub fn user_message(&self) -> String {
        match self {
            CompareError::TooFewLists(_) => {
                "Please provide at least two lists to compare".to_string()
            }
            CompareError::InvalidLink { index, source } => format!(
                "One or more links are invalid or cannot be decoded (list {}: {})",
                index + 1,
                source.user_message()
            ),
            CompareError::Ranking(err) => err.user_message(),
            CompareError::Codec(err) => err.user_message().to_string(),
        }
    }

    /// Whether the lists decoded fine but hold different items.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            CompareError::Ranking(RankingError::ShapeMismatch(_))
        )
    }
}

/// Decode every link and compare the resulting lists.
pub fn compare_links<S: AsRef<str>>(
    links: &[S],
    options: &CompareOptions,
) -> Result<ComparisonReport, CompareError> {
    if links.len() < 2 {
        return Err(CompareError::TooFewLists(links.len()));
    }

    let payloads = links
        .iter()
        .enumerate()
        .map(|(index, link)| {
            payload_from_link(link.as_ref())
                .map_err(|source| CompareError::InvalidLink { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    compare_payloads(&payloads, options)
}

/// Compare already-decoded lists.
pub fn compare_payloads(
    payloads: &[ListPayload],
    options: &CompareOptions,
) -> Result<ComparisonReport, CompareError> {
    if payloads.len() < 2 {
        return Err(CompareError::TooFewLists(payloads.len()));
    }

    let rankings: Vec<Ranking> = payloads.iter().map(|p| p.items.clone()).collect();
    let consensus = aggregate_with_persistence(&rankings, options.persistence)?;
    info!(
        "Compared {} lists of {} items",
        rankings.len(),
        consensus.len()
    );

    let rows = tabulate(&rankings, &consensus);

    let titles: Vec<&str> = payloads.iter().map(|p| p.title.as_str()).collect();
    let title = consensus_title(&titles, options.title.as_deref());
    debug!("Consensus title: {}", title);

    let consensus = ListPayload {
        title: title.clone(),
        items: consensus,
    };
    let consensus_link = options
        .base_url
        .as_deref()
        .map(|base| share_link(base, &consensus))
        .transpose()?;

    Ok(ComparisonReport {
        metadata: ReportMetadata {
            title,
            source_titles: titles.iter().map(|t| t.to_string()).collect(),
            item_count: consensus.items.len(),
            persistence: options.persistence,
            generated_at: Utc::now(),
        },
        rows,
        consensus,
        consensus_link,
    })
}

/// One row per consensus item with its 1-based rank in every source.
fn tabulate(rankings: &[Ranking], consensus: &[String]) -> Vec<ComparisonRow> {
    let positions: Vec<HashMap<&str, usize>> = rankings
        .iter()
        .map(|ranking| {
            ranking
                .iter()
                .enumerate()
                .map(|(i, item)| (item.as_str(), i + 1))
                .collect()
        })
        .collect();

    consensus
        .iter()
        .enumerate()
        .map(|(i, item)| ComparisonRow {
            item: item.clone(),
            source_ranks: positions
                .iter()
                .map(|ranks| ranks.get(item.as_str()).copied().unwrap_or_default())
                .collect(),
            consensus_rank: i + 1,
        })
        .collect()
}

/// Pick a title for the consensus list.
///
/// A non-blank `requested` title wins. Otherwise a title shared by every
/// input is reused, and disagreeing titles give `Consensus of N lists`.
pub fn consensus_title(titles: &[&str], requested: Option<&str>) -> String {
    if let Some(title) = requested.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    match titles.split_first() {
        Some((first, rest)) if rest.iter().all(|t| t == first) => first.to_string(),
        _ => format!("Consensus of {} lists", titles.len()),
    }
}
