//! Citation extraction and section classification for assistant answers.
//!
//! The assistant is instructed to wrap every CV fact it cites in backticks. Each
//! delimited span is classified against the CV and turned into a `Highlight`.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::highlight::terms::{TermIndex, TECHNOLOGY};
use crate::models::cv::CvRecord;
use crate::models::highlight::{Classification, Highlight};

/// Delimiter the assistant prompt asks the model to wrap citations in.
/// `citation_pattern` must be kept in sync with it.
pub const CITATION_DELIMITER: char = '`';

/// A delimited span found in assistant output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation<'a> {
    /// Inner text, exactly as written.
    pub text: &'a str,
    /// Byte offset of the opening delimiter.
    pub offset: usize,
}

/// What to do with a citation that matches no CV field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedCitation {
    /// Classify as technologies/yellow.
    #[default]
    Fallback,
    /// Leave it out of the result.
    Drop,
}

impl FromStr for UnmatchedCitation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback" => Ok(UnmatchedCitation::Fallback),
            "drop" => Ok(UnmatchedCitation::Drop),
            other => Err(format!("unknown unmatched-citation mode '{other}'")),
        }
    }
}

pub(crate) fn citation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"`([^`]+)`").expect("citation pattern is a valid regex"))
}

/// Every complete backtick-delimited span, in order of appearance.
/// An unterminated delimiter produces nothing.
pub fn extract_citations(text: &str) -> Vec<Citation<'_>> {
    citation_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some(Citation {
                text: inner.as_str(),
                offset: whole.start(),
            })
        })
        .collect()
}

/// Classifies one candidate, trying CV fields in precedence order.
pub fn classify(candidate: &str, index: &TermIndex, unmatched: UnmatchedCitation) -> Option<Classification> {
    match index.lookup(&candidate.to_lowercase()) {
        Some(found) => Some(found),
        None => match unmatched {
            UnmatchedCitation::Fallback => Some(TECHNOLOGY),
            UnmatchedCitation::Drop => None,
        },
    }
}

/// Turns citations into highlights, keeping only the first occurrence of each
/// (case-insensitive). `seen` persists across calls so a streamed turn stays deduped.
pub(crate) fn classify_new<'a>(
    citations: impl IntoIterator<Item = Citation<'a>>,
    index: &TermIndex,
    unmatched: UnmatchedCitation,
    seen: &mut HashSet<String>,
) -> Vec<Highlight> {
    let mut highlights = Vec::new();
    for citation in citations {
        if !seen.insert(citation.text.to_lowercase()) {
            continue;
        }
        if let Some(classification) = classify(citation.text, index, unmatched) {
            highlights.push(Highlight::new(citation.text, classification));
        }
    }
    highlights
}

/// Extracts, dedupes and classifies every citation in `assistant_text`.
pub fn find_highlights(
    assistant_text: &str,
    cv: &CvRecord,
    unmatched: UnmatchedCitation,
) -> Vec<Highlight> {
    let citations = extract_citations(assistant_text);
    if citations.is_empty() {
        return Vec::new();
    }

    let extracted = citations.len();
    let index = TermIndex::build(cv);
    let mut seen = HashSet::new();
    let highlights = classify_new(citations, &index, unmatched, &mut seen);

    debug!(
        citations = extracted,
        unique = seen.len(),
        highlights = highlights.len(),
        terms = index.exact_len(),
        "Classified citations"
    );
    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{Company, ProjectEntry, WorkEntry};
    use crate::models::highlight::{HighlightColor, Section};
    use proptest::prelude::*;

    fn make_cv() -> CvRecord {
        CvRecord {
            username: "humexxx".to_string(),
            full_name: "Jason Hume".to_string(),
            about: "A self-taught developer and parent".to_string(),
            technologies: vec![
                "TypeScript".to_string(),
                "Docker".to_string(),
                "React".to_string(),
            ],
            languages: vec!["Spanish".to_string()],
            skills: vec!["Creative problem solving".to_string()],
            personal_values: vec!["Excellent teamwork".to_string()],
            work_experience: vec![WorkEntry {
                title: "Senior Software Developer".to_string(),
                company: Company {
                    name: "PayPal".to_string(),
                    ..Default::default()
                },
                description: "Creative problem solving for the PayPal help software".to_string(),
                ..Default::default()
            }],
            projects: vec![ProjectEntry {
                title: "EAs Development for Trading".to_string(),
                description: "Robots for trading".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn sections(highlights: &[Highlight]) -> Vec<(&str, Section, HighlightColor)> {
        highlights
            .iter()
            .map(|h| (h.text.as_str(), h.section, h.color))
            .collect()
    }

    #[test]
    fn test_extracts_technologies_in_order() {
        let highlights = find_highlights(
            "He used `TypeScript` and `Docker` daily.",
            &make_cv(),
            UnmatchedCitation::Fallback,
        );
        assert_eq!(
            sections(&highlights),
            vec![
                ("TypeScript", Section::Technologies, HighlightColor::Yellow),
                ("Docker", Section::Technologies, HighlightColor::Yellow),
            ]
        );
    }

    #[test]
    fn test_unmatched_citation_falls_back_to_technologies() {
        let highlights = find_highlights(
            "He is great at `leadership`.",
            &make_cv(),
            UnmatchedCitation::Fallback,
        );
        assert_eq!(
            sections(&highlights),
            vec![("leadership", Section::Technologies, HighlightColor::Yellow)]
        );
    }

    #[test]
    fn test_unmatched_citation_can_be_dropped() {
        let highlights = find_highlights(
            "He is great at `leadership` and `Docker`.",
            &make_cv(),
            UnmatchedCitation::Drop,
        );
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].text, "Docker");
    }

    #[test]
    fn test_duplicate_citations_are_reported_once() {
        let highlights = find_highlights(
            "`Docker` at work, `docker` at home, `Docker` everywhere.",
            &make_cv(),
            UnmatchedCitation::Fallback,
        );
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].text, "Docker");
    }

    #[test]
    fn test_skill_wins_over_work_description() {
        let highlights = find_highlights(
            "Known for `creative problem solving`.",
            &make_cv(),
            UnmatchedCitation::Fallback,
        );
        assert_eq!(
            sections(&highlights),
            vec![(
                "creative problem solving",
                Section::Skills,
                HighlightColor::Blue
            )]
        );
    }

    #[test]
    fn test_each_section_resolves() {
        let highlights = find_highlights(
            "`Spanish`, `Excellent teamwork`, `PayPal`, `help software`, \
             `EAs Development for Trading`, `robots`, `self-taught`",
            &make_cv(),
            UnmatchedCitation::Fallback,
        );
        let got: Vec<Section> = highlights.iter().map(|h| h.section).collect();
        assert_eq!(
            got,
            vec![
                Section::Languages,
                Section::PersonalValues,
                Section::WorkExperience,
                Section::WorkExperience,
                Section::Projects,
                Section::Projects,
                Section::About,
            ]
        );
    }

    #[test]
    fn test_original_casing_is_kept() {
        let highlights = find_highlights("`TYPESCRIPT`", &make_cv(), UnmatchedCitation::Fallback);
        assert_eq!(highlights[0].text, "TYPESCRIPT");
        assert_eq!(highlights[0].section, Section::Technologies);
    }

    #[test]
    fn test_unterminated_citation_is_ignored() {
        assert!(find_highlights("Uses `Docker", &make_cv(), UnmatchedCitation::Fallback).is_empty());
        assert!(find_highlights("", &make_cv(), UnmatchedCitation::Fallback).is_empty());
        assert!(find_highlights("no citations", &make_cv(), UnmatchedCitation::Fallback).is_empty());
    }

    #[test]
    fn test_extract_citations_reports_offsets() {
        let citations = extract_citations("a `b` c ``d`");
        assert_eq!(
            citations,
            vec![
                Citation { text: "b", offset: 2 },
                Citation { text: "d", offset: 9 },
            ]
        );
    }

    #[test]
    fn test_unmatched_mode_from_str() {
        assert_eq!("drop".parse::<UnmatchedCitation>(), Ok(UnmatchedCitation::Drop));
        assert_eq!("Fallback".parse::<UnmatchedCitation>(), Ok(UnmatchedCitation::Fallback));
        assert!("ignore".parse::<UnmatchedCitation>().is_err());
    }

    proptest! {
        #[test]
        fn prop_highlights_are_unique_case_insensitively(text in "[`a-cA-C ]{0,60}") {
            let highlights = find_highlights(&text, &make_cv(), UnmatchedCitation::Fallback);
            let mut seen = HashSet::new();
            for h in &highlights {
                prop_assert!(seen.insert(h.text.to_lowercase()));
            }
        }

        #[test]
        fn prop_find_highlights_is_idempotent(text in "[`a-cA-C ]{0,60}") {
            let cv = make_cv();
            prop_assert_eq!(
                find_highlights(&text, &cv, UnmatchedCitation::Fallback),
                find_highlights(&text, &cv, UnmatchedCitation::Fallback)
            );
        }
    }
}
