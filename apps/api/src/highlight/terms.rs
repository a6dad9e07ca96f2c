//! Term dictionary: lowercased lookup tables built from one `CvRecord`.
//!
//! Built fresh for every classification pass and dropped afterwards; the CV can
//! change between calls, so nothing here is cached.

use std::collections::HashMap;

use crate::models::cv::CvRecord;
use crate::models::highlight::{Classification, HighlightColor, Section};

pub const TECHNOLOGY: Classification =
    Classification::new(Section::Technologies, HighlightColor::Yellow);
pub const LANGUAGE: Classification = Classification::new(Section::Languages, HighlightColor::Green);
pub const SKILL: Classification = Classification::new(Section::Skills, HighlightColor::Blue);
pub const PERSONAL_VALUE: Classification =
    Classification::new(Section::PersonalValues, HighlightColor::Green);
/// Education is shown with work history, so it shares this classification.
pub const WORK: Classification = Classification::new(Section::WorkExperience, HighlightColor::Blue);
pub const PROJECT: Classification = Classification::new(Section::Projects, HighlightColor::Purple);
pub const ABOUT: Classification = Classification::new(Section::About, HighlightColor::Green);

/// Lookup tables in classification precedence order.
#[derive(Debug, Default)]
pub struct TermIndex {
    /// Technologies, languages, skills, personal values and work names/titles.
    /// The first category to claim a term keeps it.
    exact: HashMap<String, Classification>,
    /// Work and education descriptions, searched by substring.
    descriptions: Vec<String>,
    /// Education degrees and institution names.
    education: HashMap<String, Classification>,
    project_titles: HashMap<String, Classification>,
    project_descriptions: Vec<String>,
    about: String,
}

impl TermIndex {
    pub fn build(cv: &CvRecord) -> Self {
        let mut index = TermIndex {
            about: cv.about.to_lowercase(),
            ..Default::default()
        };

        index.claim_all(cv.technologies.iter(), TECHNOLOGY);
        index.claim_all(cv.languages.iter(), LANGUAGE);
        index.claim_all(cv.skills.iter(), SKILL);
        index.claim_all(cv.personal_values.iter(), PERSONAL_VALUE);

        for work in &cv.work_experience {
            index.claim(&work.company.name, WORK);
            if let Some(contractor) = &work.contractor {
                index.claim(&contractor.name, WORK);
            }
            index.claim(&work.title, WORK);
        }

        index.descriptions.extend(
            cv.work_experience
                .iter()
                .map(|w| w.description.to_lowercase())
                .chain(cv.education.iter().map(|e| e.description.to_lowercase())),
        );

        for edu in &cv.education {
            index
                .education
                .entry(edu.degree.to_lowercase())
                .or_insert(WORK);
            index
                .education
                .entry(edu.institution.name.to_lowercase())
                .or_insert(WORK);
        }

        for project in &cv.projects {
            index
                .project_titles
                .entry(project.title.to_lowercase())
                .or_insert(PROJECT);
            index
                .project_descriptions
                .push(project.description.to_lowercase());
        }

        index
    }

    fn claim(&mut self, term: &str, classification: Classification) {
        self.exact
            .entry(term.to_lowercase())
            .or_insert(classification);
    }

    fn claim_all<'a>(
        &mut self,
        terms: impl Iterator<Item = &'a String>,
        classification: Classification,
    ) {
        for term in terms {
            self.claim(term, classification);
        }
    }

    /// Resolves an already-lowercased candidate against the CV; `None` when no field matches.
    pub fn lookup(&self, lowered: &str) -> Option<Classification> {
        if let Some(found) = self.exact.get(lowered) {
            return Some(*found);
        }
        if contains_in(&self.descriptions, lowered) {
            return Some(WORK);
        }
        if let Some(found) = self.education.get(lowered) {
            return Some(*found);
        }
        if let Some(found) = self.project_titles.get(lowered) {
            return Some(*found);
        }
        if contains_in(&self.project_descriptions, lowered) {
            return Some(PROJECT);
        }
        if !lowered.is_empty() && self.about.contains(lowered) {
            return Some(ABOUT);
        }
        None
    }

    /// Number of distinct exact-match terms.
    pub fn exact_len(&self) -> usize {
        self.exact.len() + self.education.len() + self.project_titles.len()
    }
}

fn contains_in(haystacks: &[String], needle: &str) -> bool {
    !needle.is_empty() && haystacks.iter().any(|h| h.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::{Company, EducationEntry, ProjectEntry, WorkEntry};

    fn make_cv() -> CvRecord {
        CvRecord {
            username: "ana".to_string(),
            full_name: "Ana Ruiz".to_string(),
            about: "Self-taught engineer who loves teamwork".to_string(),
            technologies: vec!["Rust".to_string(), "Docker".to_string()],
            languages: vec!["Spanish".to_string(), "Rust".to_string()],
            skills: vec!["Mentoring".to_string()],
            personal_values: vec!["Honesty".to_string()],
            work_experience: vec![WorkEntry {
                title: "Platform Engineer".to_string(),
                company: Company {
                    name: "Acme".to_string(),
                    ..Default::default()
                },
                contractor: Some(Company {
                    name: "Staffing Co".to_string(),
                    ..Default::default()
                }),
                description: "Ran Kubernetes clusters".to_string(),
                ..Default::default()
            }],
            education: vec![EducationEntry {
                degree: "BSc Computer Science".to_string(),
                institution: Company {
                    name: "UCR".to_string(),
                    ..Default::default()
                },
                description: "Thesis on compilers".to_string(),
                ..Default::default()
            }],
            projects: vec![ProjectEntry {
                title: "Trading Bot".to_string(),
                description: "Automated forex strategies".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_earlier_category_keeps_duplicate_term() {
        let index = TermIndex::build(&make_cv());
        assert_eq!(index.lookup("rust"), Some(TECHNOLOGY));
        assert_eq!(index.lookup("spanish"), Some(LANGUAGE));
    }

    #[test]
    fn test_contractor_and_title_are_work_terms() {
        let index = TermIndex::build(&make_cv());
        assert_eq!(index.lookup("staffing co"), Some(WORK));
        assert_eq!(index.lookup("platform engineer"), Some(WORK));
    }

    #[test]
    fn test_education_folds_into_work() {
        let index = TermIndex::build(&make_cv());
        assert_eq!(index.lookup("ucr"), Some(WORK));
        assert_eq!(index.lookup("compilers"), Some(WORK));
    }

    #[test]
    fn test_project_and_about_substrings() {
        let index = TermIndex::build(&make_cv());
        assert_eq!(index.lookup("trading bot"), Some(PROJECT));
        assert_eq!(index.lookup("forex"), Some(PROJECT));
        assert_eq!(index.lookup("loves teamwork"), Some(ABOUT));
    }

    #[test]
    fn test_unknown_and_empty_terms_do_not_match() {
        let index = TermIndex::build(&make_cv());
        assert_eq!(index.lookup("leadership"), None);
        assert_eq!(index.lookup(""), None);
    }

    #[test]
    fn test_exact_len_counts_distinct_terms() {
        let index = TermIndex::build(&make_cv());
        // rust, docker, spanish, mentoring, honesty, acme, staffing co, platform engineer
        // + 2 education + 1 project title
        assert_eq!(index.exact_len(), 11);
    }
}
