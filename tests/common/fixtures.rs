//! Declaration graph and snapshot builders for integration tests.
#![allow(dead_code)]

use visilint::domain::access::AccessLevel;
use visilint::domain::declaration::{
    Declaration, DeclarationCore, DeclarationId, FieldDecl, MethodDecl, Modifiers, TypeDecl,
    TypeFlavor, TypeNesting,
};
use visilint::domain::graph::DeclarationGraph;

pub fn core(
    id: DeclarationId,
    name: &str,
    scope: &str,
    containing: Option<DeclarationId>,
) -> DeclarationCore {
    DeclarationCore {
        id,
        name: name.to_string(),
        scope: scope.to_string(),
        containing_type: containing,
        access: AccessLevel::Public,
        modifiers: Some(Modifiers::default()),
        is_synthetic: false,
        is_in_source: true,
        annotations: vec![],
    }
}

pub fn class(id: DeclarationId, name: &str, scope: &str) -> Declaration {
    Declaration::Type(TypeDecl {
        core: core(id, name, scope, None),
        flavor: TypeFlavor::Class,
        nesting: TypeNesting::TopLevel,
        is_functional: false,
    })
}

pub fn method(id: DeclarationId, name: &str, scope: &str, containing: DeclarationId) -> Declaration {
    Declaration::Method(MethodDecl {
        core: core(id, name, scope, Some(containing)),
        is_constructor: false,
        has_super_signature: false,
        is_overridden: false,
    })
}

pub fn field(id: DeclarationId, name: &str, scope: &str, containing: DeclarationId) -> Declaration {
    Declaration::Field(FieldDecl {
        core: core(id, name, scope, Some(containing)),
    })
}

/// Two packages with an inheritance link across them:
///
/// - `com.app`: `Widget(1)` with `helper(2)` and `value(3)`, plus `Other(4)`
/// - `com.ext`: `Sub(10)` extends `Widget`, plus `Remote(11)`
pub fn two_package_graph() -> DeclarationGraph {
    let mut g = DeclarationGraph::new();
    g.add_declaration(class(1, "Widget", "com.app"));
    g.add_declaration(method(2, "helper", "com.app", 1));
    g.add_declaration(field(3, "value", "com.app", 1));
    g.add_declaration(class(4, "Other", "com.app"));
    g.add_declaration(class(10, "Sub", "com.ext"));
    g.add_declaration(class(11, "Remote", "com.ext"));
    g.add_containment(1, 2);
    g.add_containment(1, 3);
    g.add_extends(10, 1);
    g
}
