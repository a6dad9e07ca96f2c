//! Axum route handlers for the Highlight API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::highlight::board::{annotate_cv, FieldAnnotation, HighlightBoard};
use crate::highlight::citations::{find_highlights, UnmatchedCitation};
use crate::highlight::message::{message_fragments, MessageFragment};
use crate::highlight::spans::{fragments_for, highlight_spans, MatchPolicy, TextFragment};
use crate::highlight::stream::CitationStream;
use crate::models::cv::CvRecord;
use crate::models::highlight::{Highlight, HighlightTerm, MatchSpan, StreamChunk};
use crate::profiles::handlers::load_cv;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SpansRequest {
    pub text: String,
    #[serde(default)]
    pub highlights: Vec<HighlightTerm>,
    pub policy: Option<MatchPolicy>,
}

#[derive(Debug, Serialize)]
pub struct SpansResponse {
    pub spans: Vec<MatchSpan>,
    pub fragments: Vec<TextFragment>,
}

/// Which CV to classify against: a stored profile or one supplied inline.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvSelector {
    pub username: Option<String>,
    pub cv: Option<CvRecord>,
    pub unmatched: Option<UnmatchedCitation>,
}

#[derive(Debug, Deserialize)]
pub struct CitationsRequest {
    pub text: String,
    #[serde(flatten)]
    pub target: CvSelector,
}

#[derive(Debug, Serialize)]
pub struct CitationsResponse {
    pub highlights: Vec<Highlight>,
    pub fragments: Vec<MessageFragment>,
}

#[derive(Debug, Deserialize)]
pub struct StreamRequest {
    pub chunks: Vec<String>,
    #[serde(flatten)]
    pub target: CvSelector,
}

#[derive(Debug, Serialize)]
pub struct StreamResponse {
    pub events: Vec<StreamChunk>,
}

#[derive(Debug, Deserialize)]
pub struct AnnotateRequest {
    /// Assistant answer whose citations are added to the board.
    #[serde(default)]
    pub text: String,
    /// Highlights already on display from earlier turns.
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    pub policy: Option<MatchPolicy>,
    pub unmatched: Option<UnmatchedCitation>,
}

#[derive(Debug, Serialize)]
pub struct AnnotateResponse {
    pub highlights: Vec<Highlight>,
    pub annotations: Vec<FieldAnnotation>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

async fn resolve_cv(state: &AppState, target: CvSelector) -> Result<CvRecord, AppError> {
    match (target.cv, target.username) {
        (Some(cv), _) => Ok(cv),
        (None, Some(username)) if !username.trim().is_empty() => {
            load_cv(state, username.trim()).await
        }
        _ => Err(AppError::Validation(
            "either username or cv must be provided".to_string(),
        )),
    }
}

/// POST /api/v1/highlights/spans
///
/// Marks every occurrence of the given phrases inside one text block.
pub async fn handle_spans(
    State(state): State<AppState>,
    Json(request): Json<SpansRequest>,
) -> Result<Json<SpansResponse>, AppError> {
    let policy = request.policy.unwrap_or(state.config.match_policy);
    let spans = highlight_spans(&request.text, &request.highlights, policy);
    let fragments = fragments_for(&request.text, &spans);

    Ok(Json(SpansResponse { spans, fragments }))
}

/// POST /api/v1/highlights/citations
///
/// Classifies every backtick citation of a complete assistant answer.
pub async fn handle_citations(
    State(state): State<AppState>,
    Json(request): Json<CitationsRequest>,
) -> Result<Json<CitationsResponse>, AppError> {
    let unmatched = request
        .target
        .unmatched
        .unwrap_or(state.config.unmatched_citations);
    let cv = resolve_cv(&state, request.target).await?;

    let highlights = find_highlights(&request.text, &cv, unmatched);
    let fragments = message_fragments(&request.text);

    Ok(Json(CitationsResponse {
        highlights,
        fragments,
    }))
}

/// POST /api/v1/highlights/stream
///
/// Replays a chunked assistant turn, interleaving content and highlight events
/// in the order a live relay would emit them.
pub async fn handle_stream(
    State(state): State<AppState>,
    Json(request): Json<StreamRequest>,
) -> Result<Json<StreamResponse>, AppError> {
    let unmatched = request
        .target
        .unmatched
        .unwrap_or(state.config.unmatched_citations);
    let cv = resolve_cv(&state, request.target).await?;

    let mut stream = CitationStream::new(&cv, unmatched);
    let events = request
        .chunks
        .iter()
        .flat_map(|chunk| stream.push(chunk))
        .collect();

    Ok(Json(StreamResponse { events }))
}

/// POST /api/v1/cvs/:username/annotate
///
/// Adds the answer's citations to the board and marks them across the CV.
pub async fn handle_annotate(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(request): Json<AnnotateRequest>,
) -> Result<Json<AnnotateResponse>, AppError> {
    let cv = load_cv(&state, &username).await?;
    let policy = request.policy.unwrap_or(state.config.match_policy);
    let unmatched = request.unmatched.unwrap_or(state.config.unmatched_citations);

    let mut board = HighlightBoard::new();
    board.extend(request.highlights);
    board.extend(find_highlights(&request.text, &cv, unmatched));

    let annotations = annotate_cv(&cv, &board, policy);

    Ok(Json(AnnotateResponse {
        highlights: board.highlights().to_vec(),
        annotations,
    }))
}
