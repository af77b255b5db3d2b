use crate::domain::access::AccessLevel;
use crate::domain::declaration::{Declaration, DeclarationId};
use crate::domain::graph::DeclarationGraph;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Shared container → max-suggested-member-level map.
///
/// The only cross-declaration mutable state of a run: every worker performs
/// one compare-and-max update per resolved member, under a lock held for just
/// that update. No lock is ever held across a usage scan.
#[derive(Debug, Default)]
pub struct ContainmentAggregate {
    max_by_container: Mutex<HashMap<DeclarationId, AccessLevel>>,
}

impl ContainmentAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a member's suggested level into its direct container's entry.
    pub fn record(&self, container: DeclarationId, level: AccessLevel) {
        let mut map = self.max_by_container.lock().unwrap();
        map.entry(container)
            .and_modify(|prev| *prev = prev.join(level))
            .or_insert(level);
    }

    /// Max suggested level over the container's direct members seen so far.
    pub fn direct_child_max(&self, container: DeclarationId) -> Option<AccessLevel> {
        self.max_by_container.lock().unwrap().get(&container).copied()
    }
}

/// Bottom-up enforcement of the monotonic-containment invariant.
///
/// A container cannot be stricter than the loosest level required by any
/// member it contains, directly or transitively. Returns the containers whose
/// suggestions must be withdrawn (no fix emitted); emitting them would produce
/// a non-compiling edit.
pub fn withdraw_violations(
    graph: &DeclarationGraph,
    suggested: &HashMap<DeclarationId, AccessLevel>,
    aggregate: &ContainmentAggregate,
) -> HashSet<DeclarationId> {
    let mut containers: Vec<&Declaration> = graph
        .declarations()
        .filter(|d| matches!(d, Declaration::Type(_)))
        .collect();
    // Innermost first, so nested containers' effective maxima exist before
    // their enclosing container is examined.
    containers.sort_by_key(|d| std::cmp::Reverse(graph.nesting_depth(d.id())));

    let mut effective_child_max: HashMap<DeclarationId, AccessLevel> = HashMap::new();
    let mut withdrawn = HashSet::new();

    for container in &containers {
        let id = container.id();
        let mut child_max = aggregate.direct_child_max(id);
        for member in graph.members_of(id) {
            if let Some(&nested_max) = effective_child_max.get(&member.id()) {
                child_max = Some(child_max.map_or(nested_max, |m| m.join(nested_max)));
            }
        }

        if let Some(child_max) = child_max {
            effective_child_max.insert(id, child_max);
            if suggested.get(&id).is_some_and(|&own| own < child_max) {
                withdrawn.insert(id);
            }
        }
    }

    withdrawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::declaration::{
        DeclarationCore, FieldDecl, Modifiers, TypeDecl, TypeFlavor, TypeNesting,
    };

    fn type_decl(id: DeclarationId, name: &str, containing: Option<DeclarationId>) -> Declaration {
        Declaration::Type(TypeDecl {
            core: DeclarationCore {
                id,
                name: name.to_string(),
                scope: "p".to_string(),
                containing_type: containing,
                access: AccessLevel::Public,
                modifiers: Some(Modifiers::default()),
                is_synthetic: false,
                is_in_source: true,
                annotations: vec![],
            },
            flavor: TypeFlavor::Class,
            nesting: if containing.is_some() {
                TypeNesting::Inner
            } else {
                TypeNesting::TopLevel
            },
            is_functional: false,
        })
    }

    fn field_decl(id: DeclarationId, containing: DeclarationId) -> Declaration {
        Declaration::Field(FieldDecl {
            core: DeclarationCore {
                id,
                name: format!("f{id}"),
                scope: "p".to_string(),
                containing_type: Some(containing),
                access: AccessLevel::Public,
                modifiers: Some(Modifiers::default()),
                is_synthetic: false,
                is_in_source: true,
                annotations: vec![],
            },
        })
    }

    #[test]
    fn record_keeps_the_maximum() {
        let aggregate = ContainmentAggregate::new();
        aggregate.record(1, AccessLevel::Private);
        aggregate.record(1, AccessLevel::Protected);
        aggregate.record(1, AccessLevel::Package);
        assert_eq!(aggregate.direct_child_max(1), Some(AccessLevel::Protected));
        assert_eq!(aggregate.direct_child_max(2), None);
    }

    #[test]
    fn record_is_safe_under_concurrent_writers() {
        let aggregate = ContainmentAggregate::new();
        std::thread::scope(|s| {
            for level in [
                AccessLevel::Private,
                AccessLevel::Package,
                AccessLevel::Public,
                AccessLevel::Protected,
            ] {
                let aggregate = &aggregate;
                s.spawn(move || {
                    for _ in 0..100 {
                        aggregate.record(7, level);
                    }
                });
            }
        });
        assert_eq!(aggregate.direct_child_max(7), Some(AccessLevel::Public));
    }

    #[test]
    fn container_stricter_than_member_is_withdrawn() {
        let mut g = DeclarationGraph::new();
        g.add_declaration(type_decl(1, "Outer", None));
        g.add_declaration(field_decl(2, 1));
        g.add_containment(1, 2);

        let aggregate = ContainmentAggregate::new();
        aggregate.record(1, AccessLevel::Public);

        let suggested: HashMap<_, _> =
            [(1, AccessLevel::Package), (2, AccessLevel::Public)].into();
        let withdrawn = withdraw_violations(&g, &suggested, &aggregate);
        assert!(withdrawn.contains(&1));
        assert!(!withdrawn.contains(&2));
    }

    #[test]
    fn container_at_or_above_member_level_survives() {
        let mut g = DeclarationGraph::new();
        g.add_declaration(type_decl(1, "Outer", None));
        g.add_declaration(field_decl(2, 1));
        g.add_containment(1, 2);

        let aggregate = ContainmentAggregate::new();
        aggregate.record(1, AccessLevel::Package);

        let suggested: HashMap<_, _> =
            [(1, AccessLevel::Package), (2, AccessLevel::Package)].into();
        assert!(withdraw_violations(&g, &suggested, &aggregate).is_empty());
    }

    #[test]
    fn violation_propagates_through_nested_containers() {
        // Outer { Mid { leaf } }: the leaf needs Public, Mid and Outer were
        // both suggested tighter levels; both must be withdrawn even though
        // Outer's direct member (Mid) was suggested only Private.
        let mut g = DeclarationGraph::new();
        g.add_declaration(type_decl(1, "Outer", None));
        g.add_declaration(type_decl(2, "Mid", Some(1)));
        g.add_declaration(field_decl(3, 2));
        g.add_containment(1, 2);
        g.add_containment(2, 3);

        let aggregate = ContainmentAggregate::new();
        aggregate.record(1, AccessLevel::Private); // Mid's own suggestion
        aggregate.record(2, AccessLevel::Public); // leaf's suggestion

        let suggested: HashMap<_, _> = [
            (1, AccessLevel::Package),
            (2, AccessLevel::Private),
            (3, AccessLevel::Public),
        ]
        .into();
        let withdrawn = withdraw_violations(&g, &suggested, &aggregate);
        assert!(withdrawn.contains(&2));
        assert!(withdrawn.contains(&1));
    }
}
