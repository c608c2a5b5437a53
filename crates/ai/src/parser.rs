//! Scraper for the semi-structured analysis reply.
//!
//! Three independent extractions over the raw text: the summary block, a
//! one-of sentiment token, and a bulleted key-points list. Each falls back to
//! a fixed default when missing, so a malformed reply degrades instead of
//! failing the whole operation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default summary when no `SUMMARY:` block is found.
pub const DEFAULT_SUMMARY: &str = "Analysis not available";

/// Default key point when no bullet list is found.
pub const DEFAULT_KEY_POINT: &str = "Analysis details not available";

static SUMMARY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)SUMMARY:\s*(.+?)(?:SENTIMENT:|$)").expect("summary regex")
});

static SENTIMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)SENTIMENT:\s*(BULLISH|BEARISH|NEUTRAL)").expect("sentiment regex")
});

static KEY_POINTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)KEY_POINTS:(.+)$").expect("key points regex"));

/// Overall outlook extracted from the reply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

/// Parsed model output, before any caching metadata is attached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAnalysis {
    pub summary: String,
    pub sentiment: Sentiment,
    pub key_points: Vec<String>,
}

/// Parse a model reply into a [`GeneratedAnalysis`].
///
/// Never fails: any section the reply lacks is replaced by its default
/// (empty summary text counts as missing, an unrecognized sentiment token is
/// [`Sentiment::Neutral`]).
pub fn parse_analysis(response: &str) -> GeneratedAnalysis {
    let summary = SUMMARY_RE
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SUMMARY.to_string());

    let sentiment = SENTIMENT_RE
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| match m.as_str().to_ascii_uppercase().as_str() {
            "BULLISH" => Sentiment::Bullish,
            "BEARISH" => Sentiment::Bearish,
            _ => Sentiment::Neutral,
        })
        .unwrap_or_default();

    let mut key_points: Vec<String> = KEY_POINTS_RE
        .captures(response)
        .and_then(|c| c.get(1))
        .map(|m| {
            m.as_str()
                .lines()
                .map(str::trim)
                .filter(|line| line.starts_with('-') || line.starts_with('•'))
                .map(|line| {
                    line.trim_start_matches('-')
                        .trim_start_matches('•')
                        .trim()
                        .to_string()
                })
                .filter(|point| !point.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if key_points.is_empty() {
        key_points.push(DEFAULT_KEY_POINT.to_string());
    }

    GeneratedAnalysis {
        summary,
        sentiment,
        key_points,
    }
}
