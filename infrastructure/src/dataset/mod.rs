//! Dataset context producers.

mod loader;

pub use loader::{DatasetError, LoadedDataset, LocalDatasetLoader};
