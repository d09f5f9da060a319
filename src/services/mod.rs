//! Services for loading and aggregating ride data

pub mod aggregator;
pub mod loader;

pub use aggregator::Aggregator;
pub use loader::{load_dataset, Dataset};
