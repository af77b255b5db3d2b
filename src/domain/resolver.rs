use crate::domain::access::AccessLevel;
use crate::domain::cancel::{CancelToken, Cancelled};
use crate::domain::classifier::classify;
use crate::domain::declaration::{Declaration, TypeFlavor, TypeNesting};
use crate::domain::graph::DeclarationGraph;
use crate::domain::ports::{EntryPointProvider, ExtensibilityProvider, UsageIndex};
use crate::domain::settings::VisibilitySettings;
use crate::domain::usage::UsageSite;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use tracing::debug;

/// Per-declaration visibility resolution.
///
/// Combines the oracles and the classifier into the tightest access level the
/// declaration's usages allow. Pure with respect to the run's snapshot of the
/// declaration graph and usage index; safe to call from worker threads.
pub struct VisibilityResolver<'a> {
    graph: &'a DeclarationGraph,
    usage_index: &'a dyn UsageIndex,
    entry_points: &'a [Box<dyn EntryPointProvider>],
    extensibility: &'a [Box<dyn ExtensibilityProvider>],
    settings: &'a VisibilitySettings,
}

impl<'a> VisibilityResolver<'a> {
    pub fn new(
        graph: &'a DeclarationGraph,
        usage_index: &'a dyn UsageIndex,
        entry_points: &'a [Box<dyn EntryPointProvider>],
        extensibility: &'a [Box<dyn ExtensibilityProvider>],
        settings: &'a VisibilitySettings,
    ) -> Self {
        Self {
            graph,
            usage_index,
            entry_points,
            extensibility,
            settings,
        }
    }

    /// Compute the tightest sufficient access level for `decl`.
    ///
    /// Ok(None) means the declaration could not be resolved (malformed data);
    /// no suggestion is emitted for it. Skip rules return the current level
    /// unchanged so containers still aggregate over them.
    pub fn suggest_level(
        &self,
        decl: &Declaration,
        cancel: &CancelToken,
    ) -> Result<Option<AccessLevel>, Cancelled> {
        cancel.check()?;

        let core = decl.core();
        // Malformed declaration data: cannot resolve, emit nothing.
        let Some(modifiers) = core.modifiers.as_ref() else {
            return Ok(None);
        };
        let current = core.access;

        if current == AccessLevel::Private || modifiers.is_native {
            return Ok(Some(current));
        }
        if core.is_synthetic || !core.is_in_source {
            return Ok(Some(current));
        }

        if let Some(method) = decl.as_method() {
            if method.has_super_signature {
                debug!(name = %core.name, "overrides a supertype signature; skipped");
                return Ok(Some(current));
            }
            if method.is_overridden {
                debug!(name = %core.name, "is overridden; skipped");
                return Ok(Some(current));
            }
        }

        if matches!(decl, Declaration::EnumConstant(_)) {
            return Ok(Some(current));
        }
        if let Some(ty) = decl.as_type()
            && matches!(
                ty.nesting,
                TypeNesting::Anonymous | TypeNesting::Local | TypeNesting::TypeParameter
            )
        {
            return Ok(Some(current));
        }

        let container = core.containing_type.and_then(|id| self.graph.declaration(id));
        if let Some(container_decl) = container {
            if let Some(container_type) = container_decl.as_type() {
                let fixed_abi = matches!(
                    container_type.flavor,
                    TypeFlavor::Interface | TypeFlavor::Enum | TypeFlavor::Annotation
                );
                let type_in_local = container_type.nesting == TypeNesting::Local
                    && matches!(decl, Declaration::Type(_));
                if fixed_abi || type_in_local {
                    return Ok(Some(current));
                }
            }

            // A framework that subclasses the container at runtime may impose
            // its own visibility requirements on the methods it overrides.
            if decl.as_method().is_some() {
                for provider in self.extensibility {
                    if !provider.applies_to(container_decl) {
                        continue;
                    }
                    match provider.forced_members(container_decl, self.graph) {
                        None => return Ok(Some(current)),
                        Some(forced) if forced.contains(&core.id) => return Ok(Some(current)),
                        Some(_) => {}
                    }
                }
            }
        }

        let mut min_level = AccessLevel::Private;
        let entry_point = self
            .entry_points
            .iter()
            .any(|p| p.is_entry_point(decl, self.graph));
        if entry_point {
            let floor = self
                .entry_points
                .iter()
                .filter(|p| p.is_entry_point(decl, self.graph))
                .filter_map(|p| p.min_visibility_floor(decl))
                .max();
            match floor {
                None => {
                    debug!(name = %core.name, "is an entry point; level kept");
                    return Ok(Some(current));
                }
                Some(floor) => min_level = floor,
            }
        }

        let max_level = AtomicU8::new(min_level.rank());
        let found_usage = AtomicBool::new(false);
        let handler = |site: &UsageSite| -> bool {
            found_usage.store(true, Ordering::Relaxed);
            if !site.in_source {
                // Referenced from a non-source descriptor; has to stay public.
                max_level.fetch_max(AccessLevel::Public.rank(), Ordering::Relaxed);
                return false;
            }
            let level = classify(site, decl, self.graph, self.settings);
            max_level.fetch_max(level.rank(), Ordering::Relaxed);
            // Nothing broader than Public exists; stop scanning.
            level != AccessLevel::Public
        };

        let is_functional = matches!(decl.as_type(), Some(t) if t.is_functional);
        if is_functional {
            // A lambda can adopt the type without naming any of its members;
            // behavioral conversions scan concurrently with ordinary usages,
            // both feeding the same atomic accumulator.
            let (ordinary, conversions) = rayon::join(
                || self.usage_index.process_usages(decl, cancel, &handler),
                || {
                    self.usage_index
                        .process_functional_conversions(decl, cancel, &handler)
                },
            );
            ordinary?;
            conversions?;
        } else {
            self.usage_index.process_usages(decl, cancel, &handler)?;
        }

        if !found_usage.load(Ordering::Relaxed) && !entry_point {
            // Apparently unused; dead-code analysis is a separate concern and
            // Private must not be suggested on its evidence.
            debug!(name = %core.name, "no usages found; level kept");
            return Ok(Some(current));
        }

        let mut suggested = AccessLevel::from_rank(max_level.load(Ordering::Relaxed));
        if suggested == AccessLevel::Private && core.containing_type.is_none() {
            // Private is not expressible for container-less declarations.
            suggested = self.settings.package_local_for(decl);
        }

        debug!(name = %core.name, level = suggested.keyword(), "resolved");
        Ok(Some(suggested))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::declaration::{
        DeclarationCore, DeclarationId, FieldDecl, MethodDecl, Modifiers, TypeDecl,
    };
    use crate::domain::ports::UsageHandler;
    use std::collections::HashSet;

    struct VecUsageIndex {
        sites: Vec<UsageSite>,
    }

    impl UsageIndex for VecUsageIndex {
        fn process_usages(
            &self,
            _decl: &Declaration,
            cancel: &CancelToken,
            handler: UsageHandler<'_>,
        ) -> Result<bool, Cancelled> {
            for site in &self.sites {
                cancel.check()?;
                if !handler(site) {
                    return Ok(false);
                }
            }
            Ok(true)
        }
    }

    struct FixedEntryPoints {
        ids: HashSet<DeclarationId>,
        floor: Option<AccessLevel>,
    }

    impl EntryPointProvider for FixedEntryPoints {
        fn is_entry_point(&self, decl: &Declaration, _graph: &DeclarationGraph) -> bool {
            self.ids.contains(&decl.id())
        }

        fn min_visibility_floor(&self, _decl: &Declaration) -> Option<AccessLevel> {
            self.floor
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct ForcedMethods {
        container: DeclarationId,
        forced: Option<HashSet<DeclarationId>>,
    }

    impl ExtensibilityProvider for ForcedMethods {
        fn applies_to(&self, container: &Declaration) -> bool {
            container.id() == self.container
        }

        fn forced_members(
            &self,
            _container: &Declaration,
            _graph: &DeclarationGraph,
        ) -> Option<HashSet<DeclarationId>> {
            self.forced.clone()
        }
    }

    fn core(id: DeclarationId, name: &str, containing: Option<DeclarationId>) -> DeclarationCore {
        DeclarationCore {
            id,
            name: name.to_string(),
            scope: "com.app".to_string(),
            containing_type: containing,
            access: AccessLevel::Public,
            modifiers: Some(Modifiers::default()),
            is_synthetic: false,
            is_in_source: true,
            annotations: vec![],
        }
    }

    fn graph_with_widget() -> DeclarationGraph {
        let mut g = DeclarationGraph::new();
        g.add_declaration(Declaration::Type(TypeDecl {
            core: core(1, "Widget", None),
            flavor: TypeFlavor::Class,
            nesting: TypeNesting::TopLevel,
            is_functional: false,
        }));
        g.add_declaration(Declaration::Method(MethodDecl {
            core: core(2, "helper", Some(1)),
            is_constructor: false,
            has_super_signature: false,
            is_overridden: false,
        }));
        g.add_containment(1, 2);
        g
    }

    fn resolve(
        graph: &DeclarationGraph,
        index: &dyn UsageIndex,
        entry_points: &[Box<dyn EntryPointProvider>],
        extensibility: &[Box<dyn ExtensibilityProvider>],
        id: DeclarationId,
    ) -> Option<AccessLevel> {
        let settings = VisibilitySettings::default();
        let resolver =
            VisibilityResolver::new(graph, index, entry_points, extensibility, &settings);
        resolver
            .suggest_level(graph.declaration(id).unwrap(), &CancelToken::new())
            .unwrap()
    }

    #[test]
    fn private_member_keeps_its_level() {
        let mut g = graph_with_widget();
        let mut m = Declaration::Method(MethodDecl {
            core: core(3, "secret", Some(1)),
            is_constructor: false,
            has_super_signature: false,
            is_overridden: false,
        });
        m.core_mut().access = AccessLevel::Private;
        g.add_declaration(m);
        g.add_containment(1, 3);

        let index = VecUsageIndex { sites: vec![] };
        assert_eq!(
            resolve(&g, &index, &[], &[], 3),
            Some(AccessLevel::Private)
        );
    }

    #[test]
    fn native_member_keeps_its_level() {
        let mut g = graph_with_widget();
        let mut m = Declaration::Method(MethodDecl {
            core: core(3, "nativeCall", Some(1)),
            is_constructor: false,
            has_super_signature: false,
            is_overridden: false,
        });
        m.core_mut().modifiers = Some(Modifiers {
            is_native: true,
            ..Modifiers::default()
        });
        g.add_declaration(m);
        g.add_containment(1, 3);

        let index = VecUsageIndex {
            sites: vec![UsageSite::in_scope("com.app", Some(1))],
        };
        assert_eq!(resolve(&g, &index, &[], &[], 3), Some(AccessLevel::Public));
    }

    #[test]
    fn overriding_and_overridden_methods_are_skipped() {
        let mut g = graph_with_widget();
        g.add_declaration(Declaration::Method(MethodDecl {
            core: core(3, "overriding", Some(1)),
            is_constructor: false,
            has_super_signature: true,
            is_overridden: false,
        }));
        g.add_containment(1, 3);
        g.add_declaration(Declaration::Method(MethodDecl {
            core: core(4, "overridden", Some(1)),
            is_constructor: false,
            has_super_signature: false,
            is_overridden: true,
        }));
        g.add_containment(1, 4);

        let index = VecUsageIndex {
            sites: vec![UsageSite::in_scope("com.app", Some(1))],
        };
        assert_eq!(resolve(&g, &index, &[], &[], 3), Some(AccessLevel::Public));
        assert_eq!(resolve(&g, &index, &[], &[], 4), Some(AccessLevel::Public));
    }

    #[test]
    fn interface_member_is_skipped() {
        let mut g = DeclarationGraph::new();
        g.add_declaration(Declaration::Type(TypeDecl {
            core: core(1, "Listener", None),
            flavor: TypeFlavor::Interface,
            nesting: TypeNesting::TopLevel,
            is_functional: false,
        }));
        g.add_declaration(Declaration::Method(MethodDecl {
            core: core(2, "onEvent", Some(1)),
            is_constructor: false,
            has_super_signature: false,
            is_overridden: false,
        }));
        g.add_containment(1, 2);

        let index = VecUsageIndex {
            sites: vec![UsageSite::in_scope("com.app", Some(1))],
        };
        assert_eq!(resolve(&g, &index, &[], &[], 2), Some(AccessLevel::Public));
    }

    #[test]
    fn malformed_declaration_yields_no_suggestion() {
        let mut g = graph_with_widget();
        let mut m = Declaration::Field(FieldDecl {
            core: core(3, "broken", Some(1)),
        });
        m.core_mut().modifiers = None;
        g.add_declaration(m);
        g.add_containment(1, 3);

        let index = VecUsageIndex { sites: vec![] };
        assert_eq!(resolve(&g, &index, &[], &[], 3), None);
    }

    #[test]
    fn unused_member_keeps_its_level() {
        let g = graph_with_widget();
        let index = VecUsageIndex { sites: vec![] };
        assert_eq!(resolve(&g, &index, &[], &[], 2), Some(AccessLevel::Public));
    }

    #[test]
    fn entry_point_without_floor_keeps_its_level() {
        let g = graph_with_widget();
        let index = VecUsageIndex {
            sites: vec![UsageSite::in_scope("com.app", Some(1))],
        };
        let providers: Vec<Box<dyn EntryPointProvider>> = vec![Box::new(FixedEntryPoints {
            ids: [2].into_iter().collect(),
            floor: None,
        })];
        assert_eq!(
            resolve(&g, &index, &providers, &[], 2),
            Some(AccessLevel::Public)
        );
    }

    #[test]
    fn entry_point_floor_bounds_the_join() {
        let g = graph_with_widget();
        // Local usage alone would give Private; the floor lifts it.
        let index = VecUsageIndex {
            sites: vec![UsageSite::in_scope("com.app", Some(1))],
        };
        let providers: Vec<Box<dyn EntryPointProvider>> = vec![Box::new(FixedEntryPoints {
            ids: [2].into_iter().collect(),
            floor: Some(AccessLevel::Protected),
        })];
        assert_eq!(
            resolve(&g, &index, &providers, &[], 2),
            Some(AccessLevel::Protected)
        );
    }

    #[test]
    fn entry_point_with_floor_and_no_usages_gets_the_floor() {
        let g = graph_with_widget();
        let index = VecUsageIndex { sites: vec![] };
        let providers: Vec<Box<dyn EntryPointProvider>> = vec![Box::new(FixedEntryPoints {
            ids: [2].into_iter().collect(),
            floor: Some(AccessLevel::Package),
        })];
        assert_eq!(
            resolve(&g, &index, &providers, &[], 2),
            Some(AccessLevel::Package)
        );
    }

    #[test]
    fn extensibility_forced_member_is_skipped() {
        let g = graph_with_widget();
        let index = VecUsageIndex {
            sites: vec![UsageSite::in_scope("com.app", Some(1))],
        };
        let forced: Vec<Box<dyn ExtensibilityProvider>> = vec![Box::new(ForcedMethods {
            container: 1,
            forced: Some([2].into_iter().collect()),
        })];
        assert_eq!(
            resolve(&g, &index, &[], &forced, 2),
            Some(AccessLevel::Public)
        );
    }

    #[test]
    fn extensibility_without_member_set_constrains_all_methods() {
        let g = graph_with_widget();
        let index = VecUsageIndex {
            sites: vec![UsageSite::in_scope("com.app", Some(1))],
        };
        let forced: Vec<Box<dyn ExtensibilityProvider>> = vec![Box::new(ForcedMethods {
            container: 1,
            forced: None,
        })];
        assert_eq!(
            resolve(&g, &index, &[], &forced, 2),
            Some(AccessLevel::Public)
        );
    }

    #[test]
    fn extensibility_spares_unforced_members() {
        let g = graph_with_widget();
        let index = VecUsageIndex {
            sites: vec![UsageSite::in_scope("com.app", Some(1))],
        };
        let forced: Vec<Box<dyn ExtensibilityProvider>> = vec![Box::new(ForcedMethods {
            container: 1,
            forced: Some([99].into_iter().collect()),
        })];
        assert_eq!(
            resolve(&g, &index, &[], &forced, 2),
            Some(AccessLevel::Private)
        );
    }

    #[test]
    fn top_level_type_escalates_private_to_package() {
        let mut g = graph_with_widget();
        g.add_declaration(Declaration::Type(TypeDecl {
            core: core(5, "Helper", None),
            flavor: TypeFlavor::Class,
            nesting: TypeNesting::TopLevel,
            is_functional: false,
        }));
        // No usages classify below Package for a container-less declaration,
        // so the Private seed survives only through an entry-point floor; the
        // result must still escalate to an expressible level.
        let index = VecUsageIndex { sites: vec![] };
        let providers: Vec<Box<dyn EntryPointProvider>> = vec![Box::new(FixedEntryPoints {
            ids: [5].into_iter().collect(),
            floor: Some(AccessLevel::Private),
        })];
        assert_eq!(
            resolve(&g, &index, &providers, &[], 5),
            Some(AccessLevel::Package)
        );
    }

    #[test]
    fn same_package_usage_of_top_level_type_is_package() {
        let mut g = graph_with_widget();
        g.add_declaration(Declaration::Type(TypeDecl {
            core: core(5, "Helper", None),
            flavor: TypeFlavor::Class,
            nesting: TypeNesting::TopLevel,
            is_functional: false,
        }));
        let index = VecUsageIndex {
            sites: vec![UsageSite::in_scope("com.app", Some(1))],
        };
        assert_eq!(resolve(&g, &index, &[], &[], 5), Some(AccessLevel::Package));
    }

    #[test]
    fn non_source_usage_stops_the_scan_at_public() {
        let g = graph_with_widget();
        let mut descriptor_site = UsageSite::in_scope("com.app", Some(1));
        descriptor_site.in_source = false;
        let index = VecUsageIndex {
            sites: vec![descriptor_site, UsageSite::in_scope("com.app", Some(1))],
        };
        assert_eq!(resolve(&g, &index, &[], &[], 2), Some(AccessLevel::Public));
    }

    #[test]
    fn cancelled_scan_propagates() {
        let g = graph_with_widget();
        let index = VecUsageIndex {
            sites: vec![UsageSite::in_scope("com.app", Some(1))],
        };
        let settings = VisibilitySettings::default();
        let resolver = VisibilityResolver::new(&g, &index, &[], &[], &settings);
        let cancel = CancelToken::new();
        cancel.cancel();
        assert_eq!(
            resolver.suggest_level(g.declaration(2).unwrap(), &cancel),
            Err(Cancelled)
        );
    }
}
