//! CV repository: the read-only source of `CvRecord`s.
//!
//! `AppState` holds an `Arc<dyn CvRepository>`; the default backend is an
//! in-memory store loaded from a JSON seed file at startup.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::cv::{CvRecord, CvSearchResult};

#[async_trait]
pub trait CvRepository: Send + Sync {
    /// Case-insensitive lookup by username.
    async fn get(&self, username: &str) -> Result<Option<CvRecord>, AppError>;

    /// Profiles whose username, full name or title contains `query`, ignoring case.
    /// A blank query matches nothing.
    async fn search(&self, query: &str) -> Result<Vec<CvSearchResult>, AppError>;

    /// Featured profiles shown before the user types.
    async fn top(&self, limit: usize) -> Result<Vec<CvSearchResult>, AppError>;
}

/// Profiles keyed by lowercased username; iteration order is username order.
#[derive(Debug, Default)]
pub struct InMemoryCvStore {
    records: BTreeMap<String, CvRecord>,
}

impl InMemoryCvStore {
    pub fn new(records: Vec<CvRecord>) -> Self {
        let mut map = BTreeMap::new();
        for record in records {
            let key = record.username.to_lowercase();
            if map.insert(key, record).is_some() {
                warn!("Duplicate username in CV data; keeping the last entry");
            }
        }
        Self { records: map }
    }

    /// Loads a JSON array of CV records. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("CV data file {} not found; starting with no profiles", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read CV data file {}", path.display()))?;
        let records: Vec<CvRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse CV data file {}", path.display()))?;

        let store = Self::new(records);
        if store.is_empty() {
            warn!("CV data file {} contains no profiles", path.display());
        } else {
            info!("Loaded {} CV profiles from {}", store.len(), path.display());
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(cv: &CvRecord, lowered: &str) -> bool {
        cv.username.to_lowercase().contains(lowered)
            || cv.full_name.to_lowercase().contains(lowered)
            || cv.title.to_lowercase().contains(lowered)
    }
}

#[async_trait]
impl CvRepository for InMemoryCvStore {
    async fn get(&self, username: &str) -> Result<Option<CvRecord>, AppError> {
        Ok(self.records.get(&username.to_lowercase()).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<CvSearchResult>, AppError> {
        let lowered = query.trim().to_lowercase();
        if lowered.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .records
            .values()
            .filter(|cv| Self::matches(cv, &lowered))
            .map(CvSearchResult::from)
            .collect())
    }

    async fn top(&self, limit: usize) -> Result<Vec<CvSearchResult>, AppError> {
        Ok(self
            .records
            .values()
            .take(limit)
            .map(CvSearchResult::from)
            .collect())
    }
}
