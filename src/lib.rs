//! List Jiggler - shareable, sortable lists encoded in a URL.
//!
//! Lists travel as a URL-safe base64 token inside `.../list/<token>` links,
//! so nothing is stored server-side. Several differently ordered copies of
//! the same list can be merged into one consensus ranking using
//! Rank-Biased Overlap.
//!
//! ```
//! use listjiggler::ranking::aggregate;
//!
//! let rankings = vec![
//!     vec!["a".to_string(), "b".to_string(), "c".to_string()],
//!     vec!["b".to_string(), "a".to_string(), "c".to_string()],
//!     vec!["a".to_string(), "c".to_string(), "b".to_string()],
//! ];
//! assert_eq!(aggregate(&rankings).unwrap(), vec!["a", "b", "c"]);
//! ```

pub mod cli;
pub mod codec;
pub mod compare;
pub mod config;
pub mod editing;
pub mod export;
pub mod models;
pub mod preview;
pub mod ranking;
pub mod report;

pub use codec::{decode_payload, encode_payload, payload_from_link, share_link, CodecError};
pub use compare::{compare_links, compare_payloads, CompareError, CompareOptions};
pub use models::{ComparisonReport, ComparisonRow, ListPayload, Ranking};
pub use ranking::{aggregate, rbo, validate, RankingError};
