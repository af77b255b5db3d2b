use crate::domain::access::AccessLevel;
use crate::domain::declaration::Declaration;
use crate::domain::graph::DeclarationGraph;
use crate::domain::ports::EntryPointProvider;

/// Executable entry points: `public static main` methods.
///
/// The launcher invokes these reflectively; their level is fully constrained,
/// so no floor is reported and the current level is kept.
pub struct MainMethodEntryPoints;

impl EntryPointProvider for MainMethodEntryPoints {
    fn is_entry_point(&self, decl: &Declaration, _graph: &DeclarationGraph) -> bool {
        decl.as_method().is_some()
            && decl.core().name == "main"
            && decl.is_static()
            && decl.core().access == AccessLevel::Public
    }

    fn name(&self) -> &'static str {
        "main-method"
    }
}
