use crate::domain::access::AccessLevel;
use crate::domain::cancel::{CancelToken, Cancelled};
use crate::domain::declaration::{Declaration, DeclarationId};
use crate::domain::graph::DeclarationGraph;
use crate::domain::usage::UsageSite;
use std::collections::HashSet;

/// Handler invoked per usage site. Returns false to stop the scan.
///
/// A [UsageIndex] implementation may fan a scan out into parallel sub-searches
/// and invoke the handler from multiple threads; handlers accumulate through
/// atomics, never through `&mut` state.
pub type UsageHandler<'a> = &'a (dyn Fn(&UsageSite) -> bool + Sync);

/// Usage index port (implemented by Infrastructure)
///
/// Yields the ordered usage sites of a declaration. Scans may run arbitrarily
/// long and must poll the cancellation token.
pub trait UsageIndex: Send + Sync {
    /// Invoke `handler` for each usage site of `decl`, in index order.
    /// Returns Ok(true) when the scan ran to completion, Ok(false) when the
    /// handler stopped it early.
    fn process_usages(
        &self,
        decl: &Declaration,
        cancel: &CancelToken,
        handler: UsageHandler<'_>,
    ) -> Result<bool, Cancelled>;

    /// Implicit behavioral-conversion usages of a functional type (lambda or
    /// closure adoption). Indexes without that notion report no conversions.
    fn process_functional_conversions(
        &self,
        _decl: &Declaration,
        _cancel: &CancelToken,
        _handler: UsageHandler<'_>,
    ) -> Result<bool, Cancelled> {
        Ok(true)
    }
}

/// Entry point oracle port
///
/// Decides whether a declaration must stay reachable beyond ordinary static
/// usage (reflection, serialization, test harness). Providers are enumerated
/// at construction time, not discovered.
pub trait EntryPointProvider: Send + Sync {
    /// Check whether the declaration is an entry point for this provider
    fn is_entry_point(&self, decl: &Declaration, graph: &DeclarationGraph) -> bool;

    /// Minimum visibility the entry point still requires. None means the
    /// declaration is fully constrained and keeps its current level.
    fn min_visibility_floor(&self, _decl: &Declaration) -> Option<AccessLevel> {
        None
    }

    /// Get the name of this provider, for diagnostics
    fn name(&self) -> &'static str;
}

/// Extensibility oracle port
///
/// Flags container types subject to framework-imposed subclassing: a framework
/// that subclasses the container at runtime dictates visibility requirements
/// for the members it overrides.
pub trait ExtensibilityProvider: Send + Sync {
    fn applies_to(&self, container: &Declaration) -> bool;

    /// Members whose visibility the framework constrains. None means the
    /// constraint extends to every member of the container.
    fn forced_members(
        &self,
        container: &Declaration,
        graph: &DeclarationGraph,
    ) -> Option<HashSet<DeclarationId>>;
}
