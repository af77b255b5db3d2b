//! Extensibility constraint adapters
//!
//! Some frameworks subclass user types at runtime (proxying containers,
//! generated delegates) and dictate the visibility of the members they
//! override. These strategies flag the affected containers so the resolver
//! leaves those members alone.

mod proxy_framework;

pub use proxy_framework::ProxyFrameworkProvider;

/// Default provider set used by the CLI: the common proxying-container
/// convention (`@Configuration` classes with `@Bean` members).
pub fn default_extensibility() -> Vec<Box<dyn crate::domain::ports::ExtensibilityProvider>> {
    vec![Box::new(ProxyFrameworkProvider::new(
        vec!["Configuration".into()],
        vec!["Bean".into()],
    ))]
}
