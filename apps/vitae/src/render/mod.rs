//! HTML markup construction for the laid-out document.

pub mod card;
pub mod compose;
pub mod document;
pub mod page;
pub mod scaffold;

pub use compose::{compose_document, RenderOutcome};
