#![allow(dead_code)]

//! Highlight board: the set of highlights currently shown on a CV view, and the
//! per-field annotation pass that renders them onto the CV text.

use serde::Serialize;

use crate::highlight::spans::{fragments_for, highlight_spans, MatchPolicy, TextFragment};
use crate::models::cv::CvRecord;
use crate::models::highlight::{Highlight, HighlightTerm, MatchSpan};

/// Highlights accumulated across assistant turns, deduped by lowercased text.
#[derive(Debug, Clone, Default)]
pub struct HighlightBoard {
    highlights: Vec<Highlight>,
}

impl HighlightBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a highlight unless one with the same text (ignoring case) is already present.
    /// Returns whether it was added.
    pub fn add(&mut self, highlight: Highlight) -> bool {
        let lowered = highlight.text.to_lowercase();
        if self
            .highlights
            .iter()
            .any(|h| h.text.to_lowercase() == lowered)
        {
            return false;
        }
        self.highlights.push(highlight);
        true
    }

    pub fn extend(&mut self, highlights: impl IntoIterator<Item = Highlight>) {
        for highlight in highlights {
            self.add(highlight);
        }
    }

    pub fn clear(&mut self) {
        self.highlights.clear();
    }

    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    pub fn terms(&self) -> Vec<HighlightTerm> {
        self.highlights.iter().map(HighlightTerm::from).collect()
    }
}

/// Highlight result for one displayed CV field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldAnnotation {
    /// Path of the field inside the CV, e.g. `workExperience[1].description`.
    pub field: String,
    pub spans: Vec<MatchSpan>,
    pub fragments: Vec<TextFragment>,
}

/// Every text field of the CV that the profile page renders, with its path.
fn displayed_fields(cv: &CvRecord) -> Vec<(String, &str)> {
    let mut fields = vec![("about".to_string(), cv.about.as_str())];

    for (i, work) in cv.work_experience.iter().enumerate() {
        fields.push((format!("workExperience[{i}].title"), work.title.as_str()));
        fields.push((format!("workExperience[{i}].company.name"), work.company.name.as_str()));
        if let Some(contractor) = &work.contractor {
            fields.push((format!("workExperience[{i}].contractor.name"), contractor.name.as_str()));
        }
        fields.push((format!("workExperience[{i}].description"), work.description.as_str()));
        for (j, item) in work.responsibilities.iter().enumerate() {
            fields.push((format!("workExperience[{i}].responsibilities[{j}]"), item.as_str()));
        }
    }

    for (i, edu) in cv.education.iter().enumerate() {
        fields.push((format!("education[{i}].degree"), edu.degree.as_str()));
        fields.push((format!("education[{i}].institution.name"), edu.institution.name.as_str()));
        fields.push((format!("education[{i}].description"), edu.description.as_str()));
    }

    for (i, project) in cv.projects.iter().enumerate() {
        fields.push((format!("projects[{i}].title"), project.title.as_str()));
        fields.push((format!("projects[{i}].description"), project.description.as_str()));
    }

    for (i, value) in cv.personal_values.iter().enumerate() {
        fields.push((format!("personalValues[{i}]"), value.as_str()));
    }

    fields
}

/// Applies the board to every displayed field. Fields without matches are omitted.
pub fn annotate_cv(cv: &CvRecord, board: &HighlightBoard, policy: MatchPolicy) -> Vec<FieldAnnotation> {
    if board.is_empty() {
        return Vec::new();
    }
    let terms = board.terms();

    displayed_fields(cv)
        .into_iter()
        .filter_map(|(field, text)| {
            let spans = highlight_spans(text, &terms, policy);
            if spans.is_empty() {
                return None;
            }
            let fragments = fragments_for(text, &spans);
            Some(FieldAnnotation {
                field,
                spans,
                fragments,
            })
        })
        .collect()
}
