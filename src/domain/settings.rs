use crate::domain::access::AccessLevel;
use crate::domain::declaration::Declaration;
use serde::{Deserialize, Serialize};

/// Suggestion policy knobs.
///
/// Every package-local classification routes through
/// [VisibilitySettings::package_local_for]: with the relevant flag off, the
/// suggestion degrades to Public instead (the level stays expressible for any
/// declaration).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilitySettings {
    /// Suggest Private for members of nested/inner containers.
    pub suggest_private_for_inners: bool,
    /// Allow package-local suggestions for members.
    pub suggest_package_for_members: bool,
    /// Allow package-local suggestions for top-level types.
    pub suggest_package_for_top_level_types: bool,
    /// Analyze `static final` initialized fields at all.
    pub suggest_for_constants: bool,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            suggest_private_for_inners: false,
            suggest_package_for_members: true,
            suggest_package_for_top_level_types: true,
            suggest_for_constants: true,
        }
    }
}

impl VisibilitySettings {
    /// Package level when the policy allows it for this declaration, Public
    /// otherwise.
    pub fn package_local_for(&self, decl: &Declaration) -> AccessLevel {
        let allowed = if decl.is_top_level_type() {
            self.suggest_package_for_top_level_types
        } else {
            self.suggest_package_for_members
        };
        if allowed {
            AccessLevel::Package
        } else {
            AccessLevel::Public
        }
    }
}
