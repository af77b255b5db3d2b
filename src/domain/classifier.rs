use crate::domain::access::AccessLevel;
use crate::domain::declaration::{Declaration, DeclarationId, TypeNesting};
use crate::domain::graph::DeclarationGraph;
use crate::domain::settings::VisibilitySettings;
use crate::domain::usage::{UsageContext, UsageSite};

/// Minimal access level a single usage site requires for `decl`.
///
/// Deterministic ordered rule evaluation, first match wins:
/// 1. local (lexically related) access,
/// 2. same-package access,
/// 3. qualified non-this/non-super access,
/// 4. subtype access,
/// 5. everything else is Public.
///
/// The resolver folds the outputs with `max` across all sites.
pub fn classify(
    site: &UsageSite,
    decl: &Declaration,
    graph: &DeclarationGraph,
    settings: &VisibilitySettings,
) -> AccessLevel {
    let container_id = decl.core().containing_type;

    if let Some(container_id) = container_id
        && is_local_access(site, container_id, graph)
    {
        // References in a supertype list or annotation argument cannot
        // resolve a Private target even when textually local - a quirk of the
        // target language's resolution rules, preserved here.
        if matches!(
            site.context,
            UsageContext::SupertypeList | UsageContext::AnnotationArgument
        ) {
            return settings.package_local_for(decl);
        }

        // Private would break override resolution: the site dispatches
        // through a subtype, or the member is abstract.
        if decl.is_abstract() || called_on_subtype(site, container_id, graph) {
            return settings.package_local_for(decl);
        }

        if settings.suggest_private_for_inners || !is_nested_container(container_id, graph) {
            return AccessLevel::Private;
        }
        return settings.package_local_for(decl);
    }

    if same_package_access(site, decl, graph) {
        return settings.package_local_for(decl);
    }

    // Protected members are unreachable through an arbitrary qualifier; an
    // unresolved qualifier lands here too and stays Public.
    if site.qualifier.is_expression() {
        return AccessLevel::Public;
    }

    if let (Some(container_id), Some(enclosing)) = (container_id, site.enclosing_type)
        && graph.is_strict_subtype(enclosing, container_id)
        && site.target_resolved
        && !site.is_constructor_call
    {
        // Constructors are exempt from protected-via-subclass access.
        return AccessLevel::Protected;
    }

    AccessLevel::Public
}

/// The site's enclosing type and the declaring container are lexically
/// related: the enclosing type encloses the container, or sits (non-static)
/// inside it.
fn is_local_access(site: &UsageSite, container_id: DeclarationId, graph: &DeclarationGraph) -> bool {
    let Some(enclosing) = site.enclosing_type else {
        return false;
    };
    if graph.lexically_encloses(enclosing, container_id) {
        return true;
    }
    graph.lexically_encloses(container_id, enclosing)
        && graph.declaration(enclosing).is_some_and(|d| !d.is_static())
}

/// Call through a qualifier whose resolved static type is a strict subtype of
/// the declaring container (inherited dispatch through a subclass reference).
fn called_on_subtype(site: &UsageSite, container_id: DeclarationId, graph: &DeclarationGraph) -> bool {
    site.qualifier
        .resolved_type()
        .is_some_and(|q| graph.is_strict_subtype(q, container_id))
}

fn is_nested_container(container_id: DeclarationId, graph: &DeclarationGraph) -> bool {
    graph.declaration(container_id).is_some_and(|d| {
        d.core().containing_type.is_some()
            || matches!(d.as_type(), Some(t) if t.nesting == TypeNesting::Anonymous)
    })
}

fn same_package_access(site: &UsageSite, decl: &Declaration, graph: &DeclarationGraph) -> bool {
    if site.scope != decl.core().scope {
        return false;
    }
    if !site.qualifier.is_expression() {
        return true;
    }
    // A qualifier expression only keeps package access when its resolved type
    // lives in the same package; an unresolved one falls through to Public.
    site.qualifier
        .resolved_type()
        .and_then(|t| graph.declaration(t))
        .is_some_and(|t| t.core().scope == site.scope)
}
