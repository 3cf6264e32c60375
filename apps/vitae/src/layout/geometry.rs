//! Page geometry and layout tuning.
//!
//! Every height budget in the paginator derives from these two structs. The
//! page is A4 at 96 dpi: 210mm x 297mm at 3.7795 px/mm, i.e. 794 x 1123 px.
//! The external capture tool renders at the same ratio, so the on-screen
//! pagination and the printed PDF agree.

// ────────────────────────────────────────────────────────────────────────────
// Constants
// ────────────────────────────────────────────────────────────────────────────

/// CSS pixel per millimetre at 96 dpi.
pub const PX_PER_MM: f32 = 3.7795;

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// Fixed page dimensions and reserved chrome heights, all in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width_px: f32,
    pub page_height_px: f32,
    pub side_padding_px: f32,
    pub top_padding_px: f32,
    pub bottom_padding_px: f32,
    /// Height reserved at the bottom of every page for the page number.
    pub page_number_px: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            page_width_px: (A4_WIDTH_MM * PX_PER_MM).round(),
            page_height_px: (A4_HEIGHT_MM * PX_PER_MM).round(),
            side_padding_px: 57.0,
            top_padding_px: 57.0,
            bottom_padding_px: 57.0,
            page_number_px: 38.0,
        }
    }
}

/// Tunable layout constants. The defaults reproduce the reference layout;
/// `first_page_scale` and `first_page_floor` can be overridden through the
/// service configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTuning {
    /// Fraction of the raw first-page space the paginator may fill. Slight
    /// under-filling keeps the intro page from looking crowded.
    pub first_page_scale: f32,
    /// Lower bound for the first-page budget, as a fraction of the
    /// continuation-page capacity. Guards against an oversized intro
    /// squeezing the first section down to a sliver.
    pub first_page_floor: f32,
    /// Distance from the page top to the first section content on the intro
    /// page (intro header plus side panel).
    pub intro_offset_px: f32,
    /// Height of a section heading block, top margin included.
    pub heading_px: f32,
    /// Bottom allowance kept free when a section joins the trailing page of
    /// the previous one.
    pub join_margin_px: f32,
    /// Substitute height for a card the estimator could not measure.
    pub fallback_card_px: f32,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            first_page_scale: 0.95,
            first_page_floor: 0.60,
            intro_offset_px: 340.0,
            heading_px: 44.0,
            join_margin_px: 24.0,
            fallback_card_px: 96.0,
        }
    }
}

/// Geometry and tuning bundled, with the derived budget arithmetic.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutConfig {
    pub geometry: PageGeometry,
    pub tuning: LayoutTuning,
}

impl LayoutConfig {
    /// Usable content height of a continuation page:
    /// page height minus top padding, bottom padding, and the page number
    /// reservation.
    pub fn continuation_capacity(&self) -> f32 {
        let g = &self.geometry;
        g.page_height_px - g.top_padding_px - g.bottom_padding_px - g.page_number_px
    }

    /// Content budget of the intro page, heading included.
    ///
    /// Raw space below the intro, scaled by `first_page_scale`, floored at
    /// `first_page_floor` times the continuation capacity.
    pub fn first_page_budget(&self) -> f32 {
        let g = &self.geometry;
        let raw =
            g.page_height_px - self.tuning.intro_offset_px - g.bottom_padding_px - g.page_number_px;
        let scaled = raw * self.tuning.first_page_scale;
        let floor = self.continuation_capacity() * self.tuning.first_page_floor;
        scaled.max(floor)
    }

    /// Free height left on a page whose content currently ends at
    /// `content_bottom_px`, after the join margin is kept back. A section
    /// joins that page only when this covers its heading plus first card.
    ///
    /// The bound runs to the physical page edge: only the join margin is
    /// held back, not the bottom padding or the page-number strip that
    /// `continuation_capacity` subtracts. A joined run may sit deeper on
    /// the page than continuation content ever does.
    pub fn join_residual(&self, content_bottom_px: f32) -> f32 {
        self.geometry.page_height_px - content_bottom_px - self.tuning.join_margin_px
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
