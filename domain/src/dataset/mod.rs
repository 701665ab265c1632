//! Dataset helpers

pub mod summary;

pub use summary::{DatasetSummary, PREVIEW_ROWS};
