pub mod cv;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/cv", get(cv::cv_page))
        .route("/cv/status", get(cv::cv_status))
        .route("/cv/refresh", post(cv::cv_refresh))
        .route("/cv/links", get(cv::cv_links))
        .nest_service("/assets", assets)
        .with_state(state)
}
