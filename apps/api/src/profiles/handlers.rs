use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::cv::{CvRecord, CvSearchResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<CvSearchResult>,
    pub top: Vec<CvSearchResult>,
}

/// GET /api/v1/search?q=
///
/// Without a query the featured profiles double as the results.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let top = state.cvs.top(state.config.top_results_limit).await?;

    let results = match params.q.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => state.cvs.search(q).await?,
        _ => top.clone(),
    };

    Ok(Json(SearchResponse { results, top }))
}

/// GET /api/v1/cvs/:username
pub async fn handle_get_cv(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<CvRecord>, AppError> {
    let cv = load_cv(&state, &username).await?;
    Ok(Json(cv))
}

pub async fn load_cv(state: &AppState, username: &str) -> Result<CvRecord, AppError> {
    state
        .cvs
        .get(username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV '{username}' not found")))
}
