use std::sync::Arc;

use crate::config::Config;
use crate::profiles::store::CvRepository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable CV source. Default: in-memory store seeded from `CV_DATA_PATH`.
    pub cvs: Arc<dyn CvRepository>,
}
