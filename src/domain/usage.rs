use crate::domain::declaration::{DeclarationId, ScopeId};

/// Syntactic form of the qualifier at a usage site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Qualifier {
    /// Unqualified reference.
    None,
    This,
    Super,
    /// Arbitrary qualifier expression; `resolved_type` is the static type the
    /// qualifier resolved to, when resolution succeeded.
    Expression { resolved_type: Option<DeclarationId> },
}

impl Qualifier {
    /// Qualifier expression other than `this`/`super`.
    pub fn is_expression(&self) -> bool {
        matches!(self, Qualifier::Expression { .. })
    }

    pub fn resolved_type(&self) -> Option<DeclarationId> {
        match self {
            Qualifier::Expression { resolved_type } => *resolved_type,
            _ => None,
        }
    }
}

/// Structural context the reference occurs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageContext {
    Normal,
    /// extends/implements clause of the referencing type.
    SupertypeList,
    /// Argument of an annotation on the referencing type.
    AnnotationArgument,
}

/// One reference to a declaration, with enough structural context to classify
/// the access level it requires.
#[derive(Debug, Clone)]
pub struct UsageSite {
    /// Package/module of the referencing location.
    pub scope: ScopeId,
    /// Innermost type enclosing the reference, if any.
    pub enclosing_type: Option<DeclarationId>,
    pub qualifier: Qualifier,
    pub context: UsageContext,
    /// False for references outside normal source representation (descriptor
    /// files, external configuration); those force Public.
    pub in_source: bool,
    /// The usage denotes construction of the declaring type or an actual
    /// constructor invocation.
    pub is_constructor_call: bool,
    /// The reference target resolved. Unresolved references classify as
    /// Public, the least-aggressive suggestion.
    pub target_resolved: bool,
}

impl UsageSite {
    /// Plain in-source reference from the given scope and type, used as the
    /// baseline by tests and fixture builders.
    pub fn in_scope(scope: impl Into<ScopeId>, enclosing_type: Option<DeclarationId>) -> Self {
        Self {
            scope: scope.into(),
            enclosing_type,
            qualifier: Qualifier::None,
            context: UsageContext::Normal,
            in_source: true,
            is_constructor_call: false,
            target_resolved: true,
        }
    }
}
