// Layout core: geometry constants, font metrics, card height estimation,
// and the greedy paginator. Everything in here is pure; the orchestrator in
// render/compose.rs is the only caller that threads state between sections.

pub mod estimate;
pub mod font_metrics;
pub mod geometry;
pub mod paginator;

// Re-export the public API consumed by other modules (config, state, main).
pub use estimate::{HeightEstimator, TextHeightEstimator};
pub use geometry::{LayoutConfig, LayoutTuning};
