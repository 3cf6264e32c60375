//! Card height estimation.
//!
//! The paginator never looks at a rendered page; it works from estimated
//! card heights. `HeightEstimator` is the seam: the default implementation
//! walks the card's box model with static font metrics, and tests drive the
//! paginator with fixed heights instead.

use crate::cv::models::ExperienceRecord;
use crate::layout::font_metrics::{text_metrics, FontMetricTable};

// ────────────────────────────────────────────────────────────────────────────
// Trait
// ────────────────────────────────────────────────────────────────────────────

/// Estimates the rendered height of one card in pixels, bottom margin
/// included. Carried in `AppState` as `Arc<dyn HeightEstimator>`.
///
/// A non-positive estimate is legal; the paginator substitutes its fallback
/// constant for it.
pub trait HeightEstimator: Send + Sync {
    fn card_height(&self, record: &ExperienceRecord) -> f32;
}

// ────────────────────────────────────────────────────────────────────────────
// Text/box-model estimator
// ────────────────────────────────────────────────────────────────────────────

/// Box-model constants of the card fragment, mirroring the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMetrics {
    /// Width of the card's text column: page width minus paddings, timeline
    /// gutter, logo column, and card padding.
    pub text_width_px: f32,
    pub title_size_px: f32,
    pub body_size_px: f32,
    pub title_line_px: f32,
    pub body_line_px: f32,
    /// Height of the badge/meta row (period, discipline, place, link chip).
    pub meta_row_px: f32,
    /// Top plus bottom card padding.
    pub vertical_padding_px: f32,
    /// Margin below the card; counted into the card's extent so budgets
    /// stay additive.
    pub card_gap_px: f32,
    /// The logo column sets this lower bound.
    pub min_height_px: f32,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self {
            text_width_px: 510.0,
            title_size_px: 15.0,
            body_size_px: 13.0,
            title_line_px: 22.0,
            body_line_px: 19.0,
            meta_row_px: 30.0,
            vertical_padding_px: 28.0,
            card_gap_px: 14.0,
            min_height_px: 88.0,
        }
    }
}

/// Default estimator: wraps the card's text fields with the static font
/// metrics and sums the resulting box model.
pub struct TextHeightEstimator {
    metrics: &'static FontMetricTable,
    card: CardMetrics,
}

impl TextHeightEstimator {
    pub fn new(card: CardMetrics) -> Self {
        Self {
            metrics: text_metrics(),
            card,
        }
    }
}

impl Default for TextHeightEstimator {
    fn default() -> Self {
        Self::new(CardMetrics::default())
    }
}

impl HeightEstimator for TextHeightEstimator {
    fn card_height(&self, record: &ExperienceRecord) -> f32 {
        let m = &self.card;
        let title_lines = self
            .metrics
            .estimated_lines(&record.role, m.text_width_px, m.title_size_px)
            .max(1);
        let org_lines = self
            .metrics
            .estimated_lines(&record.organization, m.text_width_px, m.body_size_px)
            .max(1);

        let mut height = m.vertical_padding_px
            + title_lines as f32 * m.title_line_px
            + org_lines as f32 * m.body_line_px
            + m.meta_row_px;

        if let Some(topic) = record.topic.as_deref() {
            let topic_lines = self
                .metrics
                .estimated_lines(topic, m.text_width_px, m.body_size_px);
            height += topic_lines as f32 * m.body_line_px;
        }

        height.max(m.min_height_px) + m.card_gap_px
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fixed estimator
// ────────────────────────────────────────────────────────────────────────────

/// Returns the same height for every card. Layout tests use this to make
/// page-break positions exact.
#[allow(dead_code)]
pub struct FixedHeightEstimator(pub f32);

impl HeightEstimator for FixedHeightEstimator {
    fn card_height(&self, _record: &ExperienceRecord) -> f32 {
        self.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(topic: Option<&str>) -> ExperienceRecord {
        ExperienceRecord {
            organization: "Politehnica University".into(),
            role: "Associate Professor".into(),
            period: "2015 – present".into(),
            topic: topic.map(str::to_string),
            discipline: None,
            place: None,
            link: None,
            logo: "upt.svg".into(),
            current: false,
        }
    }

    #[test]
    fn test_card_height_at_least_logo_minimum() {
        let estimator = TextHeightEstimator::default();
        let metrics = CardMetrics::default();
        let height = estimator.card_height(&make_record(None));
        assert!(
            height >= metrics.min_height_px + metrics.card_gap_px,
            "single-line card must not undercut the logo column, got {height}"
        );
    }

    #[test]
    fn test_topic_adds_height() {
        let estimator = TextHeightEstimator::default();
        let without = estimator.card_height(&make_record(None));
        let with = estimator.card_height(&make_record(Some(
            "Model-based predictive control of networked industrial processes \
             with communication delay compensation across plant segments",
        )));
        assert!(
            with > without,
            "a wrapped topic must grow the card ({with} vs {without})"
        );
    }

    #[test]
    fn test_long_role_wraps_and_grows() {
        let estimator = TextHeightEstimator::default();
        let short = estimator.card_height(&make_record(None));
        let mut record = make_record(None);
        record.role = "Visiting Research Professor for Industrial Automation, \
                       Robotics and Networked Embedded Control Systems"
            .into();
        let long = estimator.card_height(&record);
        assert!(long > short, "wrapped title must grow the card");
    }

    #[test]
    fn test_fixed_estimator_is_constant() {
        let estimator = FixedHeightEstimator(100.0);
        assert_eq!(estimator.card_height(&make_record(None)), 100.0);
        assert_eq!(
            estimator.card_height(&make_record(Some("anything at all"))),
            100.0
        );
    }
}
