use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::cv::CvSource;
use crate::layout::{HeightEstimator, LayoutConfig};
use crate::render::RenderOutcome;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable record source. Default: FileCvSource over CV_DATA_PATH.
    pub source: Arc<dyn CvSource>,
    /// Pluggable card height estimator. Default: TextHeightEstimator over the
    /// Inter metric table.
    pub estimator: Arc<dyn HeightEstimator>,
    /// Page geometry and tuning for the layout pass.
    pub layout: LayoutConfig,
    /// HTTP client for outbound link verification.
    pub http: reqwest::Client,
    /// Latest render outcome. None until the first pass completes; replaced
    /// wholesale on every refresh.
    pub snapshot: Arc<RwLock<Option<RenderOutcome>>>,
}
