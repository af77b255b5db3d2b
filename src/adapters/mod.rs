pub mod entry_points;
pub mod extensibility;
pub mod snapshot;
