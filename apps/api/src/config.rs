use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::highlight::citations::UnmatchedCitation;
use crate::highlight::spans::MatchPolicy;

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub cv_data_path: PathBuf,
    /// Default inline matching policy; requests may override it.
    pub match_policy: MatchPolicy,
    pub unmatched_citations: UnmatchedCitation,
    pub top_results_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            cv_data_path: PathBuf::from(var("CV_DATA_PATH", "data/cvs.json")),
            match_policy: var("HIGHLIGHT_MATCH_POLICY", "word_boundary")
                .parse::<MatchPolicy>()
                .map_err(|e| anyhow!("HIGHLIGHT_MATCH_POLICY: {e}"))?,
            unmatched_citations: var("UNMATCHED_CITATIONS", "fallback")
                .parse::<UnmatchedCitation>()
                .map_err(|e| anyhow!("UNMATCHED_CITATIONS: {e}"))?,
            top_results_limit: var("TOP_RESULTS_LIMIT", "5")
                .parse::<usize>()
                .context("TOP_RESULTS_LIMIT must be a non-negative integer")?,
        })
    }
}
