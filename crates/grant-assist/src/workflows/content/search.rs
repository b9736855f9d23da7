use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ContentBlob;

/// Which query token positions the snippet window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnippetAnchor {
    /// Only the first query token is located. A source that scored on other tokens
    /// but lacks the first one produces no hit at all.
    FirstQueryToken,
    /// The first query token (in query order) that occurs in the text.
    #[default]
    FirstMatchedToken,
}

impl FromStr for SnippetAnchor {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "first-token" | "first-query-token" | "legacy" => Ok(Self::FirstQueryToken),
            "first-matched-token" | "first-match" => Ok(Self::FirstMatchedToken),
            other => Err(format!("unknown snippet anchor '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: usize,
    /// Characters kept ahead of the anchor.
    pub before: usize,
    /// Snippet length measured from the window start.
    pub window: usize,
    pub anchor: SnippetAnchor,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 5,
            before: 100,
            window: 500,
            anchor: SnippetAnchor::default(),
        }
    }
}

impl SearchOptions {
    pub fn with_anchor(anchor: SnippetAnchor) -> Self {
        Self {
            anchor,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub score: usize,
    pub source_name: String,
    pub snippet: String,
}

/// Scores every blob by how many query tokens it contains and returns the best matches.
///
/// Repeated query tokens count once per repetition. Ties keep blob order.
pub fn search(query: &str, blobs: &[ContentBlob], options: &SearchOptions) -> Vec<SearchHit> {
    let query = query.to_lowercase();
    let tokens: Vec<&str> = query.split_whitespace().collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for blob in blobs {
        let lowered = blob.text.to_lowercase();
        let score = tokens
            .iter()
            .filter(|token| lowered.contains(*token))
            .count();
        if score == 0 {
            continue;
        }

        let anchor = match options.anchor {
            SnippetAnchor::FirstQueryToken => lowered.find(tokens[0]),
            SnippetAnchor::FirstMatchedToken => {
                tokens.iter().find_map(|token| lowered.find(*token))
            }
        };
        let Some(byte_offset) = anchor else {
            continue;
        };

        let anchor_char = lowered[..byte_offset].chars().count();
        hits.push(SearchHit {
            score,
            source_name: blob.source_name.clone(),
            snippet: snippet_around(&blob.text, anchor_char, options),
        });
    }

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(options.limit);
    hits
}

fn snippet_around(text: &str, anchor_char: usize, options: &SearchOptions) -> String {
    let start = anchor_char.saturating_sub(options.before);
    text.chars().skip(start).take(options.window).collect()
}
