//! Handlers for the rendered document and its capture contract.

use axum::{extract::State, response::Html, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::{compose_document, RenderOutcome};
use crate::state::AppState;
use crate::verify::{check_links, LinkReport};

/// What the capture tool polls before printing: whether a document exists,
/// how many page elements it must find in the DOM, and whether the latest
/// pass recorded failures.
#[derive(Debug, Serialize)]
pub struct RenderStatus {
    pub ready: bool,
    pub expected_pages: Option<usize>,
    pub error: Option<String>,
    pub render_id: Option<Uuid>,
    pub rendered_at: Option<DateTime<Utc>>,
}

fn build_status(outcome: Option<&RenderOutcome>) -> RenderStatus {
    match outcome {
        None => RenderStatus {
            ready: false,
            expected_pages: None,
            error: None,
            render_id: None,
            rendered_at: None,
        },
        Some(o) => RenderStatus {
            ready: true,
            expected_pages: Some(o.page_count),
            error: if o.errors.is_empty() {
                None
            } else {
                Some(
                    o.errors
                        .iter()
                        .map(|f| format!("{}: {}", f.scope, f.message))
                        .collect::<Vec<_>>()
                        .join("; "),
                )
            },
            render_id: Some(o.render_id),
            rendered_at: Some(o.rendered_at),
        },
    }
}

/// GET /cv
/// The rendered document. 503 until the first render pass has completed.
pub async fn cv_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let guard = state.snapshot.read().await;
    match guard.as_ref() {
        Some(outcome) => Ok(Html(outcome.html.clone())),
        None => Err(AppError::RenderPending),
    }
}

/// GET /cv/status
pub async fn cv_status(State(state): State<AppState>) -> Json<RenderStatus> {
    let guard = state.snapshot.read().await;
    Json(build_status(guard.as_ref()))
}

/// POST /cv/refresh
/// Re-reads the source, runs a fresh layout pass, and swaps the snapshot.
pub async fn cv_refresh(State(state): State<AppState>) -> Json<RenderStatus> {
    let outcome = compose_document(
        state.source.as_ref(),
        state.estimator.as_ref(),
        &state.layout,
    )
    .await;
    let status = build_status(Some(&outcome));
    *state.snapshot.write().await = Some(outcome);
    Json(status)
}

/// GET /cv/links
/// Probes every record link once and reports the aggregate.
pub async fn cv_links(State(state): State<AppState>) -> Result<Json<LinkReport>, AppError> {
    let report = check_links(state.source.as_ref(), &state.http).await?;
    Ok(Json(report))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
