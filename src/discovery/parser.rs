use std::collections::HashSet;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    discovery::{
        Mood,
        normalize::{PLACEHOLDER_URL, UNKNOWN},
    },
    types::Recommendation,
    warning,
};

pub const MIN_TEMPO: u32 = 40;
pub const MAX_TEMPO: u32 = 300;
pub const DEFAULT_TEMPO: u32 = 120;
pub const DEFAULT_CONFIDENCE: f64 = 0.8;
pub const DEFAULT_MATCH_SCORE: f64 = 0.7;
pub const DEFAULT_REASON: &str = "Recommended based on playlist similarity";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON array found in model response")]
    NoArray,
    #[error("model response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("model response is not a JSON array")]
    NotAnArray,
}

/// Turns raw model output into at most `count` validated recommendations.
///
/// The payload is taken from the first `[` to the last `]`, so chatty text
/// around the array is tolerated. A `]` in trailing prose, or an array nested
/// inside a string after the payload, moves the end marker and makes the
/// slice unparseable; such responses yield no recommendations.
///
/// Entries that are not objects, or lack a truthy `title` or `artist`, are
/// skipped. The rest are normalized, ranked by `matchScore` descending (ties
/// keep their original order) and truncated.
pub fn parse_recommendations(raw: &str, count: usize) -> Vec<Recommendation> {
    let entries = match extract_array(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warning!("Discarding model response: {}", e);
            return Vec::new();
        }
    };

    let mut seen_ids = HashSet::new();
    let mut recommendations: Vec<Recommendation> = entries
        .iter()
        .filter_map(Value::as_object)
        .filter(|entry| has_required_fields(entry))
        .filter_map(normalize_entry)
        .enumerate()
        .map(|(index, mut rec)| {
            if rec.id.is_empty() || !seen_ids.insert(rec.id.clone()) {
                rec.id = synthesize_id(index, &mut seen_ids);
            }
            rec
        })
        .collect();

    recommendations.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    recommendations.truncate(count);
    recommendations
}

/// Picks `rec_<index>`, or `rec_<index>_<n>` when the model already used
/// that id, and reserves it.
fn synthesize_id(index: usize, seen_ids: &mut HashSet<String>) -> String {
    let mut id = format!("rec_{}", index);
    let mut suffix = 1;
    while !seen_ids.insert(id.clone()) {
        id = format!("rec_{}_{}", index, suffix);
        suffix += 1;
    }
    id
}

/// Locates and parses the JSON array embedded in `raw`.
pub fn extract_array(raw: &str) -> Result<Vec<Value>, ParseError> {
    let start = raw.find('[').ok_or(ParseError::NoArray)?;
    let end = raw.rfind(']').ok_or(ParseError::NoArray)?;
    if end < start {
        return Err(ParseError::NoArray);
    }

    // collapse stray newlines and indentation inside the payload
    let payload = raw[start..=end]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    match serde_json::from_str::<Value>(&payload)? {
        Value::Array(entries) => Ok(entries),
        _ => Err(ParseError::NotAnArray),
    }
}

/// Clamps a tempo value into [40, 300] BPM.
///
/// Numbers and numeric strings are truncated to whole beats; anything else
/// becomes 120. Applying it to its own output returns the same value.
pub fn validate_tempo(value: &Value) -> u32 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(tempo) => tempo_from_f64(tempo),
        None => DEFAULT_TEMPO,
    }
}

pub(crate) fn tempo_from_f64(tempo: f64) -> u32 {
    if !tempo.is_finite() {
        return DEFAULT_TEMPO;
    }
    tempo
        .trunc()
        .clamp(MIN_TEMPO as f64, MAX_TEMPO as f64) as u32
}

fn has_required_fields(entry: &Map<String, Value>) -> bool {
    ["title", "artist"]
        .iter()
        .all(|key| entry.get(*key).is_some_and(is_truthy))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

fn text_or(entry: &Map<String, Value>, key: &str, default: &str) -> String {
    entry
        .get(key)
        .and_then(stringify)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn score_or(entry: &Map<String, Value>, key: &str, default: f64) -> f64 {
    let parsed = match entry.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|score| score.is_finite())
        .map(|score| score.clamp(0.0, 1.0))
        .unwrap_or(default)
}

/// Builds a recommendation from an entry that passed the required field
/// check. Returns `None` when title or artist is blank after trimming.
fn normalize_entry(entry: &Map<String, Value>) -> Option<Recommendation> {
    let title = entry.get("title").and_then(stringify)?;
    let artist = entry.get("artist").and_then(stringify)?;
    if title.is_empty() || artist.is_empty() {
        return None;
    }

    Some(Recommendation {
        id: entry.get("id").and_then(stringify).unwrap_or_default(),
        title,
        artist,
        genre: text_or(entry, "genre", UNKNOWN),
        tempo: entry.get("tempo").map(validate_tempo).unwrap_or(DEFAULT_TEMPO),
        mood: entry
            .get("mood")
            .and_then(stringify)
            .map(|label| Mood::from_label(&label))
            .unwrap_or_default(),
        reason: text_or(entry, "reason", DEFAULT_REASON),
        preview_url: match entry.get("previewUrl") {
            Some(Value::String(url)) => url.clone(),
            Some(Value::Null) | None => PLACEHOLDER_URL.to_string(),
            Some(other) => other.to_string(),
        },
        confidence: score_or(entry, "confidence", DEFAULT_CONFIDENCE),
        match_score: score_or(entry, "matchScore", DEFAULT_MATCH_SCORE),
    })
}
