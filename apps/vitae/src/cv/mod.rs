pub mod models;
pub mod source;

// Re-export the source seam consumed by state and main.
pub use source::{CvSource, FileCvSource};
