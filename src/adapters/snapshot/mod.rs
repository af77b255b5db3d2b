//! Snapshot adapter: JSON interchange with external indexers.

pub mod loader;
pub mod model;
pub mod usage_index;

pub use loader::{load_from_file, materialize, parse_file};
pub use model::CodebaseSnapshot;
pub use usage_index::SnapshotUsageIndex;
