use crate::domain::declaration::Declaration;
use crate::domain::graph::DeclarationGraph;
use crate::domain::ports::EntryPointProvider;

/// Serialization hooks resolved by name at runtime.
///
/// The serialization machinery looks these members up reflectively with exact
/// signatures and visibility expectations; touching their level breaks the
/// wire contract, so they keep whatever they have.
pub struct SerializationEntryPoints;

const HOOK_METHODS: &[&str] = &[
    "writeObject",
    "readObject",
    "readObjectNoData",
    "writeReplace",
    "readResolve",
];

const HOOK_FIELDS: &[&str] = &["serialVersionUID", "serialPersistentFields"];

impl EntryPointProvider for SerializationEntryPoints {
    fn is_entry_point(&self, decl: &Declaration, _graph: &DeclarationGraph) -> bool {
        let name = decl.core().name.as_str();
        match decl {
            Declaration::Method(_) => HOOK_METHODS.contains(&name),
            Declaration::Field(_) => HOOK_FIELDS.contains(&name),
            _ => false,
        }
    }

    fn name(&self) -> &'static str {
        "serialization"
    }
}
