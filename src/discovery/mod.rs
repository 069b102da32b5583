//! # Discovery Core
//!
//! Pure transformations the rest of the service is built around. Nothing in
//! this module performs I/O or holds shared state, so every function can be
//! called from any handler or task without coordination.
//!
//! - [`mood`] - Valence/energy mood classification and label validation
//! - [`normalize`] - Spotify track objects to canonical [`Song`](crate::types::Song) records
//! - [`parser`] - Recommendation extraction and validation from model output
//! - [`stats`] - Discovery statistics comparing a playlist with its recommendations
//!
//! Every failure mode degrades to an empty or default value. Malformed model
//! output yields no recommendations, invalid entries are skipped and out of
//! range numbers are clamped.

pub mod mood;
pub mod normalize;
pub mod parser;
pub mod stats;

pub use mood::{Mood, classify_mood};
pub use normalize::normalize_track;
pub use parser::{parse_recommendations, validate_tempo};
pub use stats::{DiscoveryStats, SongLike, calculate_discovery_stats};
