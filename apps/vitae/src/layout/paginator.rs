//! Greedy card pagination.
//!
//! Cards are atomic: a section's cards fill the current page while the
//! accumulated height stays within the budget, and the page closes exactly
//! when the next card would exceed it. There is no backtracking and no
//! card splitting; a card taller than an empty page still gets placed,
//! alone. Whether a section joins the trailing page of the previous one or
//! opens a fresh page is decided once, before any card is placed.

use thiserror::Error;
use tracing::debug;

use crate::cv::models::SectionKind;
use crate::layout::geometry::LayoutConfig;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// One card's position in the plan, with the class flags the renderer
/// applies to the card fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSlot {
    /// Index into the section's record list.
    pub record_index: usize,
    pub height_px: f32,
    /// First card of the section's run on its page.
    pub page_first: bool,
    /// First card of the section overall.
    pub top_rounded: bool,
    /// Last card of the section overall.
    pub bottom_rounded: bool,
}

/// A section's cards on one page. `with_heading` is true only on the
/// section's first page; spill pages continue without a heading.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSlice {
    pub kind: SectionKind,
    pub with_heading: bool,
    pub cards: Vec<CardSlot>,
}

/// One planned page: its 1-based number, the section slices on it, and
/// where its content currently ends (measured from the page top).
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPage {
    pub number: usize,
    pub slices: Vec<SectionSlice>,
    pub content_bottom_px: f32,
}

/// The whole document's layout plan. Pages are appended as sections are
/// paginated and never removed within a render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPlan {
    pub pages: Vec<PlannedPage>,
}

impl DocumentPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Where the next section starts: the trailing page's state, or the
    /// document top when nothing has been placed yet.
    pub fn trailing(&self) -> SectionStart {
        match self.pages.last() {
            Some(page) => SectionStart::Trailing {
                page: self.pages.len() - 1,
                content_bottom_px: page.content_bottom_px,
            },
            None => SectionStart::DocumentTop,
        }
    }

    fn push_page(&mut self, content_start_px: f32) -> &mut PlannedPage {
        let number = self.pages.len() + 1;
        self.pages.push(PlannedPage {
            number,
            slices: Vec::new(),
            content_bottom_px: content_start_px,
        });
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

/// Starting position for a section, derived from the plan left by the
/// previous section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionStart {
    /// First content of the document: opens the intro page.
    DocumentTop,
    /// Continue after the page at index `page`, whose content ends at
    /// `content_bottom_px`.
    Trailing { page: usize, content_bottom_px: f32 },
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("section '{kind}' cannot anchor the document: the plan already has {pages} page(s)")]
    PlanOccupied { kind: SectionKind, pages: usize },

    #[error("section '{kind}' cannot continue from page {page}: it is not the plan's trailing page")]
    NotTrailingPage { kind: SectionKind, page: usize },
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Paginates one section's cards into the plan.
///
/// An empty section leaves the plan untouched: no slice, no page. A height
/// that is not a positive number (zero, negative, NaN) is replaced by the
/// fallback constant before any budget arithmetic. Start-position errors
/// are detected before the plan is modified, so a failed call never leaves
/// a partial slice behind.
pub fn paginate_section(
    kind: SectionKind,
    raw_heights: &[f32],
    start: SectionStart,
    plan: &mut DocumentPlan,
    cfg: &LayoutConfig,
) -> Result<(), LayoutError> {
    if raw_heights.is_empty() {
        return Ok(());
    }

    let heights: Vec<f32> = raw_heights
        .iter()
        .map(|&h| {
            if h > 0.0 {
                h
            } else {
                // NaN fails the comparison and lands here too.
                debug!(
                    "section '{kind}': unmeasurable card, using fallback height {} px",
                    cfg.tuning.fallback_card_px
                );
                cfg.tuning.fallback_card_px
            }
        })
        .collect();

    let heading = cfg.tuning.heading_px;
    let capacity = cfg.continuation_capacity();

    // Resolve the opening page and the card budget of the first slice.
    // This is the join-or-fresh-page decision, made once per section.
    let (opening, first_budget) = match start {
        SectionStart::DocumentTop => {
            if !plan.pages.is_empty() {
                return Err(LayoutError::PlanOccupied {
                    kind,
                    pages: plan.pages.len(),
                });
            }
            (Opening::IntroPage, cfg.first_page_budget() - heading)
        }
        SectionStart::Trailing {
            page,
            content_bottom_px,
        } => {
            let trailing = plan.pages.len().checked_sub(1);
            if trailing != Some(page) {
                return Err(LayoutError::NotTrailingPage { kind, page });
            }
            let residual = cfg.join_residual(content_bottom_px);
            if residual >= heading + heights[0] {
                (Opening::Join { page }, residual - heading)
            } else {
                (Opening::FreshPage, capacity - heading)
            }
        }
    };

    let mut runs = place_cards(&heights, first_budget, capacity).into_iter();
    let Some(head) = runs.next() else {
        return Ok(());
    };

    // First slice carries the heading; it lands on the opening page.
    {
        let page = match opening {
            Opening::Join { page } => match plan.pages.get_mut(page) {
                Some(p) => p,
                None => return Err(LayoutError::NotTrailingPage { kind, page }),
            },
            Opening::IntroPage => plan.push_page(cfg.tuning.intro_offset_px),
            Opening::FreshPage => plan.push_page(cfg.geometry.top_padding_px),
        };
        page.content_bottom_px += heading + head.used_px;
        page.slices.push(SectionSlice {
            kind,
            with_heading: true,
            cards: head.cards,
        });
    }

    // Spill pages continue without a heading.
    for run in runs {
        let page = plan.push_page(cfg.geometry.top_padding_px);
        page.content_bottom_px += run.used_px;
        page.slices.push(SectionSlice {
            kind,
            with_heading: false,
            cards: run.cards,
        });
    }

    Ok(())
}

enum Opening {
    IntroPage,
    Join { page: usize },
    FreshPage,
}

/// One page's worth of cards produced by the greedy fill.
#[derive(Debug, Default, PartialEq)]
struct PageRun {
    cards: Vec<CardSlot>,
    used_px: f32,
}

/// Greedy single-pass fill: the first run gets `first_budget`, every later
/// run gets `continuation_budget`. The first card of a run is always
/// placed, even when it alone exceeds the budget.
fn place_cards(heights: &[f32], first_budget: f32, continuation_budget: f32) -> Vec<PageRun> {
    let mut runs: Vec<PageRun> = Vec::new();
    let mut current = PageRun::default();
    let mut budget = first_budget;
    let last = heights.len().saturating_sub(1);

    for (i, &h) in heights.iter().enumerate() {
        if !current.cards.is_empty() && current.used_px + h > budget {
            runs.push(std::mem::take(&mut current));
            budget = continuation_budget;
        }
        current.cards.push(CardSlot {
            record_index: i,
            height_px: h,
            page_first: current.cards.is_empty(),
            top_rounded: i == 0,
            bottom_rounded: i == last,
        });
        current.used_px += h;
    }
    if !current.cards.is_empty() {
        runs.push(current);
    }
    runs
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
