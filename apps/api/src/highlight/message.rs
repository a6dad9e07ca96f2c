//! Display fragments for an assistant message: plain text, citations, and
//! emphasised praise words.

use serde::Serialize;

use crate::highlight::citations::citation_pattern;

/// Praise words rendered with emphasis (English and Spanish).
const EMPHASIS_WORDS: &[&str] = &[
    "amazing",
    "excellent",
    "outstanding",
    "exceptional",
    "impressive",
    "remarkable",
    "fantastic",
    "wonderful",
    "incredible",
    "brilliant",
    "superb",
    "magnificent",
    "phenomenal",
    "extraordinary",
    "spectacular",
    "asombroso",
    "excelente",
    "excepcional",
    "impresionante",
    "notable",
    "fantástico",
    "maravilloso",
    "increíble",
    "brillante",
    "magnífico",
    "fenomenal",
    "extraordinario",
    "espectacular",
    "sobresaliente",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageFragment {
    Text { text: String },
    /// Inner text of a backtick-delimited citation, delimiters removed.
    Citation { text: String },
    Emphasis { text: String },
}

fn is_emphasis_word(word: &str) -> bool {
    let clean: String = word
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?' | ';' | ':'))
        .collect();
    EMPHASIS_WORDS.contains(&clean.as_str())
}

fn flush_word(word: &str, pending: &mut String, out: &mut Vec<MessageFragment>) {
    if is_emphasis_word(word) {
        if !pending.is_empty() {
            out.push(MessageFragment::Text {
                text: std::mem::take(pending),
            });
        }
        out.push(MessageFragment::Emphasis {
            text: word.to_string(),
        });
    } else {
        pending.push_str(word);
    }
}

/// Splits plain text on whitespace runs, marking praise words. Adjacent
/// non-emphasis pieces are joined back into one text fragment.
fn push_words(text: &str, out: &mut Vec<MessageFragment>) {
    let mut pending = String::new();
    let mut word_start = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = word_start.take() {
                flush_word(&text[start..i], &mut pending, out);
            }
            pending.push(c);
        } else if word_start.is_none() {
            word_start = Some(i);
        }
    }
    if let Some(start) = word_start {
        flush_word(&text[start..], &mut pending, out);
    }
    if !pending.is_empty() {
        out.push(MessageFragment::Text { text: pending });
    }
}

pub fn message_fragments(content: &str) -> Vec<MessageFragment> {
    let mut fragments = Vec::new();
    let mut last_index = 0;

    for caps in citation_pattern().captures_iter(content) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last_index {
            push_words(&content[last_index..whole.start()], &mut fragments);
        }
        fragments.push(MessageFragment::Citation {
            text: inner.as_str().to_string(),
        });
        last_index = whole.end();
    }

    if last_index < content.len() {
        push_words(&content[last_index..], &mut fragments);
    }

    fragments
}
