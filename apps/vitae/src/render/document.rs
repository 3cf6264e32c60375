//! Document shell around the built pages.
//!
//! The shell (head, fonts, stylesheet, body wrapper) is an Askama template;
//! the page elements themselves are constructed in `page.rs` and injected
//! pre-escaped through the `pages` slot. Page dimensions flow from
//! `PageGeometry` into the stylesheet so the markup and the budgets can
//! never disagree.

use askama::Template;

use crate::layout::geometry::PageGeometry;

#[derive(Template)]
#[template(path = "cv.html")]
pub struct CvTemplate {
    pub title: String,
    /// Concatenated page markup. Already escaped where needed.
    pub pages: String,
    pub page_width_px: u32,
    pub page_height_px: u32,
    pub side_padding_px: u32,
    pub top_padding_px: u32,
    pub bottom_padding_px: u32,
}

impl CvTemplate {
    pub fn new(title: String, pages: String, geometry: &PageGeometry) -> Self {
        Self {
            title,
            pages,
            page_width_px: geometry.page_width_px as u32,
            page_height_px: geometry.page_height_px as u32,
            side_padding_px: geometry.side_padding_px as u32,
            top_padding_px: geometry.top_padding_px as u32,
            bottom_padding_px: geometry.bottom_padding_px as u32,
        }
    }
}
