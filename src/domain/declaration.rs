use crate::domain::access::AccessLevel;

/// Unique identifier for a declaration in the graph
pub type DeclarationId = u32;

/// Scope identifier (package/module), compared by qualified name equality
pub type ScopeId = String;

/// Modifier set of a declaration. Absent entirely on malformed declarations
/// (partially built symbol data); the resolver skips those silently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_native: bool,
    pub has_initializer: bool,
}

/// Shared core attributes for all declarations
#[derive(Debug, Clone)]
pub struct DeclarationCore {
    pub id: DeclarationId,
    pub name: String,
    /// Containing package/module.
    pub scope: ScopeId,
    /// Containing type, by id; the declaration references its container, it
    /// does not own it. None for top-level declarations.
    pub containing_type: Option<DeclarationId>,
    pub access: AccessLevel,
    pub modifiers: Option<Modifiers>,
    /// Generated member with no corresponding source construct.
    pub is_synthetic: bool,
    /// Present in real source (vs. mirrored from a binary or generated tree).
    pub is_in_source: bool,
    /// Annotation simple names attached to the declaration; consumed by the
    /// entry-point and extensibility providers.
    pub annotations: Vec<String>,
}

impl DeclarationCore {
    pub fn qualified_name(&self) -> String {
        if self.scope.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.scope, self.name)
        }
    }
}

/// Flavor of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFlavor {
    Class,
    Interface,
    Enum,
    Annotation,
}

/// Lexical position of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeNesting {
    TopLevel,
    /// Static nested type.
    Nested,
    /// Non-static member type.
    Inner,
    Local,
    Anonymous,
    TypeParameter,
}

/// Type declaration
#[derive(Debug, Clone)]
pub struct TypeDecl {
    pub core: DeclarationCore,
    pub flavor: TypeFlavor,
    pub nesting: TypeNesting,
    /// Single-abstract-method type adoptable by a lambda/closure.
    pub is_functional: bool,
}

/// Method declaration
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub core: DeclarationCore,
    pub is_constructor: bool,
    /// Overrides a supertype signature.
    pub has_super_signature: bool,
    /// Overridden somewhere in the codebase.
    pub is_overridden: bool,
}

/// Field declaration
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub core: DeclarationCore,
}

/// Enum constant declaration
#[derive(Debug, Clone)]
pub struct EnumConstantDecl {
    pub core: DeclarationCore,
}

/// Polymorphic declaration
#[derive(Debug, Clone)]
pub enum Declaration {
    Type(TypeDecl),
    Method(MethodDecl),
    Field(FieldDecl),
    EnumConstant(EnumConstantDecl),
}

impl Declaration {
    pub fn core(&self) -> &DeclarationCore {
        match self {
            Declaration::Type(t) => &t.core,
            Declaration::Method(m) => &m.core,
            Declaration::Field(f) => &f.core,
            Declaration::EnumConstant(c) => &c.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut DeclarationCore {
        match self {
            Declaration::Type(t) => &mut t.core,
            Declaration::Method(m) => &mut m.core,
            Declaration::Field(f) => &mut f.core,
            Declaration::EnumConstant(c) => &mut c.core,
        }
    }

    pub fn id(&self) -> DeclarationId {
        self.core().id
    }

    pub fn as_type(&self) -> Option<&TypeDecl> {
        match self {
            Declaration::Type(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDecl> {
        match self {
            Declaration::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.core()
            .modifiers
            .as_ref()
            .is_some_and(|m| m.is_abstract)
    }

    pub fn is_static(&self) -> bool {
        self.core().modifiers.as_ref().is_some_and(|m| m.is_static)
    }

    /// Top-level type declaration (no enclosing container).
    pub fn is_top_level_type(&self) -> bool {
        matches!(self, Declaration::Type(t) if t.nesting == TypeNesting::TopLevel)
    }

    /// `static final` field with an initializer; a compile-time constant in
    /// the target accessibility model.
    pub fn is_constant_field(&self) -> bool {
        matches!(self, Declaration::Field(f)
            if f.core.modifiers.as_ref().is_some_and(|m| m.is_static && m.is_final && m.has_initializer))
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            Declaration::Type(_) => "type",
            Declaration::Method(_) => "method",
            Declaration::Field(_) => "field",
            Declaration::EnumConstant(_) => "enum_constant",
        }
    }
}
