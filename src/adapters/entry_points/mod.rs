//! Entry point detection adapters
//!
//! Declarations reached through reflection, serialization, or a test harness
//! never show up in the usage index; these strategies keep the resolver from
//! tightening them. Providers are enumerated explicitly at engine
//! construction, not discovered at runtime.

mod main_method;
mod reflection_registry;
mod serialization;
mod test_framework;

pub use main_method::MainMethodEntryPoints;
pub use reflection_registry::ReflectionRegistryEntryPoints;
pub use serialization::SerializationEntryPoints;
pub use test_framework::TestFrameworkEntryPoints;

/// Default provider set used by the CLI: executable mains, serialization
/// hooks, and the common test-framework annotations.
pub fn default_entry_points() -> Vec<Box<dyn crate::domain::ports::EntryPointProvider>> {
    vec![
        Box::new(MainMethodEntryPoints),
        Box::new(SerializationEntryPoints),
        Box::new(TestFrameworkEntryPoints::default()),
    ]
}
