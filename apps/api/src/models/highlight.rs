use serde::{Deserialize, Serialize};

/// CV categories a highlight can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    About,
    Technologies,
    Languages,
    Skills,
    WorkExperience,
    Projects,
    PersonalValues,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    #[default]
    Yellow,
    Blue,
    Green,
    Purple,
}

/// Section and display color resolved for a piece of CV text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub section: Section,
    pub color: HighlightColor,
}

impl Classification {
    pub const fn new(section: Section, color: HighlightColor) -> Self {
        Self { section, color }
    }
}

/// A classified citation, ready for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub text: String,
    pub section: Section,
    pub color: HighlightColor,
}

impl Highlight {
    pub fn new(text: impl Into<String>, classification: Classification) -> Self {
        Self {
            text: text.into(),
            section: classification.section,
            color: classification.color,
        }
    }
}

/// A literal phrase to mark inside a text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightTerm {
    pub text: String,
    #[serde(default)]
    pub color: HighlightColor,
}

impl HighlightTerm {
    pub fn new(text: impl Into<String>, color: HighlightColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

impl From<&Highlight> for HighlightTerm {
    fn from(highlight: &Highlight) -> Self {
        Self::new(highlight.text.clone(), highlight.color)
    }
}

/// A `[start, end)` byte range inside one text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub color: HighlightColor,
}

/// One event of an assistant turn relayed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamChunk {
    Content { content: String },
    Highlight { highlight: Highlight },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_serializes_camel_case() {
        assert_eq!(
            serde_json::to_value(Section::WorkExperience).unwrap(),
            json!("workExperience")
        );
        assert_eq!(
            serde_json::to_value(Section::PersonalValues).unwrap(),
            json!("personalValues")
        );
    }

    #[test]
    fn test_term_color_defaults_to_yellow() {
        let term: HighlightTerm = serde_json::from_str(r#"{"text": "Docker"}"#).unwrap();
        assert_eq!(term.color, HighlightColor::Yellow);
    }

    #[test]
    fn test_stream_chunk_is_tagged_by_type() {
        let chunk = StreamChunk::Highlight {
            highlight: Highlight::new(
                "Docker",
                Classification::new(Section::Technologies, HighlightColor::Yellow),
            ),
        };
        assert_eq!(
            serde_json::to_value(&chunk).unwrap(),
            json!({
                "type": "highlight",
                "highlight": {"text": "Docker", "section": "technologies", "color": "yellow"}
            })
        );
    }
}
