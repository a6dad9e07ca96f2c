//! Inline highlighter: finds every occurrence of a set of literal phrases inside one
//! text block and merges them into non-overlapping colored spans.

use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::highlight::{HighlightColor, HighlightTerm, MatchSpan};

/// How a phrase is located inside a text block. Matching is always case-insensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Plain substring search: "ai" matches inside "maintain".
    Substring,
    /// Phrase must not start or end in the middle of a word.
    #[default]
    WordBoundary,
}

impl FromStr for MatchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(MatchPolicy::Substring),
            "word_boundary" | "word-boundary" => Ok(MatchPolicy::WordBoundary),
            other => Err(format!("unknown match policy '{other}'")),
        }
    }
}

/// A piece of a text block after highlighting. Concatenating every fragment's
/// text yields the original block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextFragment {
    Plain { text: String },
    Mark { text: String, color: HighlightColor },
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Builds the case-insensitive pattern for one term. Metacharacters are always escaped.
/// Under `WordBoundary` an anchor is only placed on an edge that is itself a word
/// character, so terms like "C#" or ".NET" can still match.
fn build_pattern(term: &str, policy: MatchPolicy) -> Result<Regex, regex::Error> {
    let escaped = regex::escape(term);
    let pattern = match policy {
        MatchPolicy::Substring => escaped,
        MatchPolicy::WordBoundary => {
            let lead = term.chars().next().is_some_and(is_word_char);
            let trail = term.chars().next_back().is_some_and(is_word_char);
            format!(
                "{}{}{}",
                if lead { r"\b" } else { "" },
                escaped,
                if trail { r"\b" } else { "" }
            )
        }
    };
    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

/// Every occurrence of `pattern` in `text`, including overlapping ones: scanning
/// resumes one character after the start of the previous hit.
fn scan_occurrences(pattern: &Regex, text: &str, color: HighlightColor, out: &mut Vec<MatchSpan>) {
    let mut pos = 0;
    while pos <= text.len() {
        let Some(found) = pattern.find_at(text, pos) else {
            break;
        };
        if found.start() == found.end() {
            break;
        }
        out.push(MatchSpan {
            start: found.start(),
            end: found.end(),
            color,
        });
        let step = text[found.start()..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1);
        pos = found.start() + step;
    }
}

/// Collects raw matches for all terms, in term order. Empty terms are ignored.
pub fn find_matches(text: &str, terms: &[HighlightTerm], policy: MatchPolicy) -> Vec<MatchSpan> {
    let mut matches = Vec::new();
    if text.is_empty() {
        return matches;
    }

    for term in terms.iter().filter(|t| !t.text.is_empty()) {
        match build_pattern(&term.text, policy) {
            Ok(pattern) => scan_occurrences(&pattern, text, term.color, &mut matches),
            Err(e) => warn!("Skipping highlight term that failed to compile: {e}"),
        }
    }

    matches
}

/// Sorts by start offset (stable, so ties keep term order) and coalesces spans that
/// overlap or touch. A merged span keeps the color of its earliest member.
pub fn merge_spans(mut matches: Vec<MatchSpan>) -> Vec<MatchSpan> {
    matches.sort_by_key(|m| m.start);

    let mut merged: Vec<MatchSpan> = Vec::with_capacity(matches.len());
    for span in matches {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }
    merged
}

/// Finds and merges highlight spans for one text block.
/// Empty text, no terms or no matches all produce an empty list.
pub fn highlight_spans(text: &str, terms: &[HighlightTerm], policy: MatchPolicy) -> Vec<MatchSpan> {
    let raw = find_matches(text, terms, policy);
    let merged = merge_spans(raw);
    debug!(
        terms = terms.len(),
        spans = merged.len(),
        "Computed highlight spans"
    );
    merged
}

/// Splits `text` into plain and marked fragments according to merged `spans`.
pub fn fragments_for(text: &str, spans: &[MatchSpan]) -> Vec<TextFragment> {
    let mut fragments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut last_index = 0;

    for span in spans {
        if span.start > last_index {
            fragments.push(TextFragment::Plain {
                text: text[last_index..span.start].to_string(),
            });
        }
        fragments.push(TextFragment::Mark {
            text: text[span.start..span.end].to_string(),
            color: span.color,
        });
        last_index = span.end;
    }

    if last_index < text.len() {
        fragments.push(TextFragment::Plain {
            text: text[last_index..].to_string(),
        });
    }

    fragments
}
