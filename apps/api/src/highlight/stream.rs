#![allow(dead_code)]

//! Incremental citation extraction over a streamed assistant turn.

use std::collections::HashSet;

use crate::highlight::citations::{
    classify_new, extract_citations, UnmatchedCitation, CITATION_DELIMITER,
};
use crate::highlight::terms::TermIndex;
use crate::models::cv::CvRecord;
use crate::models::highlight::{Highlight, StreamChunk};

/// Accumulates chunks of one assistant turn and reports each citation as soon as
/// its closing delimiter arrives.
///
/// Complete delimiter pairs never change as more text is appended, so only the
/// text after the last complete citation is rescanned on every push.
pub struct CitationStream {
    index: TermIndex,
    unmatched: UnmatchedCitation,
    buffer: String,
    /// Byte offset just past the last complete citation.
    scanned_to: usize,
    seen: HashSet<String>,
    emitted: Vec<Highlight>,
}

impl CitationStream {
    pub fn new(cv: &CvRecord, unmatched: UnmatchedCitation) -> Self {
        Self {
            index: TermIndex::build(cv),
            unmatched,
            buffer: String::new(),
            scanned_to: 0,
            seen: HashSet::new(),
            emitted: Vec::new(),
        }
    }

    /// Appends a chunk and returns the content event plus any new highlights.
    pub fn push(&mut self, chunk: &str) -> Vec<StreamChunk> {
        if chunk.is_empty() {
            return Vec::new();
        }
        self.buffer.push_str(chunk);

        let mut events = vec![StreamChunk::Content {
            content: chunk.to_string(),
        }];

        let tail = &self.buffer[self.scanned_to..];
        let citations = extract_citations(tail);
        let Some(last) = citations.last() else {
            return events;
        };
        let consumed = last.offset + last.text.len() + 2 * CITATION_DELIMITER.len_utf8();

        let fresh = classify_new(citations, &self.index, self.unmatched, &mut self.seen);
        self.scanned_to += consumed;

        for highlight in fresh {
            self.emitted.push(highlight.clone());
            events.push(StreamChunk::Highlight { highlight });
        }
        events
    }

    /// Full text received so far.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Ends the turn. Unterminated citations are discarded.
    pub fn finish(self) -> Vec<Highlight> {
        self.emitted
    }
}
