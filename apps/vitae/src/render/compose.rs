//! Render orchestration.
//!
//! One pass lays out the whole document: sections load and paginate
//! strictly in display order, because each section's starting position
//! depends on the exact trailing state the previous one left behind. A
//! failure is caught at its section's boundary, logged, and recorded in
//! the outcome; the remaining sections still run. The returned
//! `RenderOutcome` is the single source of the capture contract (page
//! count, markup, error signal).

use askama::Template;
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::cv::models::{SectionKind, SectionRecords};
use crate::cv::source::CvSource;
use crate::layout::estimate::HeightEstimator;
use crate::layout::geometry::LayoutConfig;
use crate::layout::paginator::{paginate_section, DocumentPlan};
use crate::render::document::CvTemplate;
use crate::render::page::render_page;

/// One confined failure from a render pass. `scope` is a section slug or
/// "profile".
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFailure {
    pub scope: String,
    pub message: String,
}

/// Result of one complete render pass.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub render_id: Uuid,
    /// Number of page elements in `html`. The capture tool waits until it
    /// sees exactly this many.
    pub page_count: usize,
    pub html: String,
    pub errors: Vec<RenderFailure>,
    pub rendered_at: DateTime<Utc>,
}

/// Runs one render pass over the source and returns the outcome. Never
/// fails as a whole: per-section failures are recorded in
/// `RenderOutcome::errors` and the surviving sections render normally.
pub async fn compose_document(
    source: &dyn CvSource,
    estimator: &dyn HeightEstimator,
    layout: &LayoutConfig,
) -> RenderOutcome {
    let render_id = Uuid::new_v4();
    info!("render {render_id}: starting layout pass");

    let mut errors: Vec<RenderFailure> = Vec::new();

    let profile = match source.load_profile().await {
        Ok(profile) => profile,
        Err(e) => {
            warn!("render {render_id}: profile unavailable: {e}");
            errors.push(RenderFailure {
                scope: "profile".to_string(),
                message: e.to_string(),
            });
            None
        }
    };

    let mut plan = DocumentPlan::default();
    let mut sections = SectionRecords::default();

    for kind in SectionKind::ALL {
        let records = match source.load_section(kind).await {
            Ok(records) => records,
            Err(e) => {
                warn!("render {render_id}: section '{kind}' failed to load: {e}");
                errors.push(RenderFailure {
                    scope: kind.to_string(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        let heights: Vec<f32> = records.iter().map(|r| estimator.card_height(r)).collect();
        let start = plan.trailing();
        if let Err(e) = paginate_section(kind, &heights, start, &mut plan, layout) {
            error!("render {render_id}: section '{kind}' layout failed: {e}");
            errors.push(RenderFailure {
                scope: kind.to_string(),
                message: e.to_string(),
            });
            continue;
        }
        sections.set(kind, records);
    }

    let mut pages = String::new();
    for page in &plan.pages {
        pages.push_str(&render_page(page, &sections, profile.as_ref()));
    }

    let title = profile
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Curriculum Vitae".to_string());
    let html = CvTemplate::new(title, pages, &layout.geometry)
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e));

    let page_count = plan.page_count();
    info!(
        "render {render_id}: {page_count} page(s), {} failure(s)",
        errors.len()
    );

    RenderOutcome {
        render_id,
        page_count,
        html,
        errors,
        rendered_at: Utc::now(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    use crate::cv::models::{ExperienceRecord, Profile};
    use crate::cv::source::SourceError;
    use crate::layout::estimate::FixedHeightEstimator;

    struct StubSource {
        sections: HashMap<SectionKind, Vec<ExperienceRecord>>,
        failing: Option<SectionKind>,
        profile: Option<Profile>,
    }

    impl StubSource {
        fn new() -> Self {
            Self {
                sections: HashMap::new(),
                failing: None,
                profile: None,
            }
        }

        fn with_section(mut self, kind: SectionKind, count: usize) -> Self {
            let records = (0..count)
                .map(|i| ExperienceRecord {
                    organization: format!("{kind} org {i}"),
                    role: format!("Role {i}"),
                    period: "2020".into(),
                    topic: None,
                    discipline: None,
                    place: None,
                    link: None,
                    logo: "logo.svg".into(),
                    current: false,
                })
                .collect();
            self.sections.insert(kind, records);
            self
        }

        fn with_failing(mut self, kind: SectionKind) -> Self {
            self.failing = Some(kind);
            self
        }
    }

    #[async_trait]
    impl CvSource for StubSource {
        async fn load_section(
            &self,
            kind: SectionKind,
        ) -> Result<Vec<ExperienceRecord>, SourceError> {
            if self.failing == Some(kind) {
                return Err(SourceError::Section {
                    section: kind.to_string(),
                    source: serde_json::from_str::<u8>("broken").unwrap_err(),
                });
            }
            Ok(self.sections.get(&kind).cloned().unwrap_or_default())
        }

        async fn load_profile(&self) -> Result<Option<Profile>, SourceError> {
            Ok(self.profile.clone())
        }
    }

    fn count_pages(html: &str) -> usize {
        html.matches("<section class=\"page\"").count()
    }

    #[tokio::test]
    async fn test_page_count_matches_marker_elements() {
        let source = StubSource::new()
            .with_section(SectionKind::Academic, 4)
            .with_section(SectionKind::TechTransfer, 3);
        let estimator = FixedHeightEstimator(120.0);
        let outcome = compose_document(&source, &estimator, &LayoutConfig::default()).await;

        assert!(outcome.page_count > 0);
        assert_eq!(
            count_pages(&outcome.html),
            outcome.page_count,
            "marker count must equal the reported page count"
        );
        assert!(outcome.errors.is_empty());
    }

    #[tokio::test]
    async fn test_all_sections_empty_renders_zero_pages() {
        let source = StubSource::new();
        let estimator = FixedHeightEstimator(120.0);
        let outcome = compose_document(&source, &estimator, &LayoutConfig::default()).await;

        assert_eq!(outcome.page_count, 0);
        assert_eq!(count_pages(&outcome.html), 0);
        assert!(outcome.errors.is_empty());
    }

    #[tokio::test]
    async fn test_failing_section_is_confined() {
        let source = StubSource::new()
            .with_section(SectionKind::Academic, 2)
            .with_failing(SectionKind::ForeignContracts)
            .with_section(SectionKind::Entrepreneurial, 2);
        let estimator = FixedHeightEstimator(120.0);
        let outcome = compose_document(&source, &estimator, &LayoutConfig::default()).await;

        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].scope, "foreign-contracts");
        assert!(
            outcome.html.contains("Academic Activity"),
            "sections before the failure still render"
        );
        assert!(
            outcome.html.contains("Entrepreneurial Activity"),
            "sections after the failure still render"
        );
        assert!(
            !outcome.html.contains("Foreign Contracts"),
            "failed section contributes nothing"
        );
    }

    #[tokio::test]
    async fn test_sections_follow_display_order_in_markup() {
        let source = StubSource::new()
            .with_section(SectionKind::Academic, 1)
            .with_section(SectionKind::ForeignContracts, 1)
            .with_section(SectionKind::TechTransfer, 1)
            .with_section(SectionKind::Entrepreneurial, 1);
        let estimator = FixedHeightEstimator(100.0);
        let outcome = compose_document(&source, &estimator, &LayoutConfig::default()).await;

        let positions: Vec<usize> = [
            "Academic Activity",
            "Foreign Contracts",
            "Technology Transfer",
            "Entrepreneurial Activity",
        ]
        .iter()
        .map(|t| outcome.html.find(t).expect("every heading present"))
        .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "headings must keep display order");
    }

    #[tokio::test]
    async fn test_profile_failure_still_renders_sections() {
        struct NoProfile(StubSource);

        #[async_trait]
        impl CvSource for NoProfile {
            async fn load_section(
                &self,
                kind: SectionKind,
            ) -> Result<Vec<ExperienceRecord>, SourceError> {
                self.0.load_section(kind).await
            }
            async fn load_profile(&self) -> Result<Option<Profile>, SourceError> {
                Err(SourceError::Profile(
                    serde_json::from_str::<u8>("broken").unwrap_err(),
                ))
            }
        }

        let source = NoProfile(StubSource::new().with_section(SectionKind::Academic, 1));
        let estimator = FixedHeightEstimator(100.0);
        let outcome = compose_document(&source, &estimator, &LayoutConfig::default()).await;

        assert_eq!(outcome.page_count, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].scope, "profile");
        assert!(outcome.html.contains("Academic Activity"));
    }
}
