//! Mock implementations for integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use visilint::domain::access::AccessLevel;
use visilint::domain::cancel::{CancelToken, Cancelled};
use visilint::domain::declaration::{Declaration, DeclarationId};
use visilint::domain::graph::DeclarationGraph;
use visilint::domain::ports::{EntryPointProvider, UsageHandler, UsageIndex};
use visilint::domain::usage::UsageSite;

/// Usage index serving fixed sites and counting how many were delivered.
/// The visit counter makes short-circuit behavior observable.
pub struct CountingUsageIndex {
    sites: Vec<UsageSite>,
    conversions: Vec<UsageSite>,
    visited: AtomicUsize,
}

impl CountingUsageIndex {
    pub fn new(sites: Vec<UsageSite>) -> Self {
        Self {
            sites,
            conversions: Vec::new(),
            visited: AtomicUsize::new(0),
        }
    }

    pub fn with_conversions(mut self, conversions: Vec<UsageSite>) -> Self {
        self.conversions = conversions;
        self
    }

    /// Number of sites delivered to handlers so far, across both scans.
    pub fn visited(&self) -> usize {
        self.visited.load(Ordering::Relaxed)
    }

    fn scan(
        &self,
        sites: &[UsageSite],
        cancel: &CancelToken,
        handler: UsageHandler<'_>,
    ) -> Result<bool, Cancelled> {
        for site in sites {
            cancel.check()?;
            self.visited.fetch_add(1, Ordering::Relaxed);
            if !handler(site) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl UsageIndex for CountingUsageIndex {
    fn process_usages(
        &self,
        _decl: &Declaration,
        cancel: &CancelToken,
        handler: UsageHandler<'_>,
    ) -> Result<bool, Cancelled> {
        self.scan(&self.sites, cancel, handler)
    }

    fn process_functional_conversions(
        &self,
        _decl: &Declaration,
        cancel: &CancelToken,
        handler: UsageHandler<'_>,
    ) -> Result<bool, Cancelled> {
        self.scan(&self.conversions, cancel, handler)
    }
}

/// Entry point provider with a fixed id set and floor.
pub struct MockEntryPoints {
    ids: HashSet<DeclarationId>,
    floor: Option<AccessLevel>,
}

impl MockEntryPoints {
    pub fn new(ids: impl IntoIterator<Item = DeclarationId>, floor: Option<AccessLevel>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            floor,
        }
    }
}

impl EntryPointProvider for MockEntryPoints {
    fn is_entry_point(&self, decl: &Declaration, _graph: &DeclarationGraph) -> bool {
        self.ids.contains(&decl.id())
    }

    fn min_visibility_floor(&self, _decl: &Declaration) -> Option<AccessLevel> {
        self.floor
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
