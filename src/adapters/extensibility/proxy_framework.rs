use crate::domain::declaration::{Declaration, DeclarationId};
use crate::domain::graph::DeclarationGraph;
use crate::domain::ports::ExtensibilityProvider;
use std::collections::HashSet;

/// Containers subclassed by a proxying framework.
///
/// A container carrying one of the configured annotations is proxied at
/// runtime: the framework generates a subclass and overrides the annotated
/// members, which must stay overridable at their current level. With no
/// member annotations configured, every member of the container is
/// constrained.
pub struct ProxyFrameworkProvider {
    container_annotations: Vec<String>,
    member_annotations: Vec<String>,
}

impl ProxyFrameworkProvider {
    pub fn new(container_annotations: Vec<String>, member_annotations: Vec<String>) -> Self {
        Self {
            container_annotations,
            member_annotations,
        }
    }
}

impl ExtensibilityProvider for ProxyFrameworkProvider {
    fn applies_to(&self, container: &Declaration) -> bool {
        container
            .core()
            .annotations
            .iter()
            .any(|a| self.container_annotations.iter().any(|known| known == a))
    }

    fn forced_members(
        &self,
        container: &Declaration,
        graph: &DeclarationGraph,
    ) -> Option<HashSet<DeclarationId>> {
        if self.member_annotations.is_empty() {
            return None;
        }
        Some(
            graph
                .members_of(container.id())
                .filter(|m| {
                    m.core()
                        .annotations
                        .iter()
                        .any(|a| self.member_annotations.iter().any(|known| known == a))
                })
                .map(|m| m.id())
                .collect(),
        )
    }
}
