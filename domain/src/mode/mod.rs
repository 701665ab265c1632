//! Operating mode domain
//!
//! Mode detection and the static per-mode agent policy.

pub mod detector;
pub mod operating_mode;

pub use detector::{DATASET_ID_KEY, DATASET_KEY, ModeDetector, has_dataset};
pub use operating_mode::OperatingMode;
