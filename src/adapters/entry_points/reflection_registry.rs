use crate::domain::access::AccessLevel;
use crate::domain::declaration::Declaration;
use crate::domain::graph::DeclarationGraph;
use crate::domain::ports::EntryPointProvider;
use anyhow::{Context as _, Result};
use regex::Regex;

/// Keep-rule registry for reflective access.
///
/// Holds a list of patterns over qualified declaration paths, the shape of
/// ProGuard-style keep rules or a reflection config shipped with the project.
/// A match keeps the declaration reachable; an optional floor states how
/// visible the reflective caller needs it.
pub struct ReflectionRegistryEntryPoints {
    patterns: Vec<Regex>,
    floor: Option<AccessLevel>,
}

impl ReflectionRegistryEntryPoints {
    pub fn new(patterns: &[&str], floor: Option<AccessLevel>) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("Invalid keep pattern: {p}")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns, floor })
    }
}

impl EntryPointProvider for ReflectionRegistryEntryPoints {
    fn is_entry_point(&self, decl: &Declaration, graph: &DeclarationGraph) -> bool {
        let path = graph.qualified_path(decl);
        self.patterns.iter().any(|p| p.is_match(&path))
    }

    fn min_visibility_floor(&self, _decl: &Declaration) -> Option<AccessLevel> {
        self.floor
    }

    fn name(&self) -> &'static str {
        "reflection-registry"
    }
}
