use crate::domain::cancel::{CancelToken, Cancelled};
use crate::domain::declaration::{Declaration, DeclarationId};
use crate::domain::ports::{UsageHandler, UsageIndex};
use crate::domain::usage::UsageSite;
use std::collections::HashMap;

/// Usage index backed by a loaded snapshot.
///
/// Sites are delivered in snapshot order. The token is polled before every
/// site so a long scan terminates promptly on cancellation.
#[derive(Debug, Default)]
pub struct SnapshotUsageIndex {
    ordinary: HashMap<DeclarationId, Vec<UsageSite>>,
    conversions: HashMap<DeclarationId, Vec<UsageSite>>,
}

impl SnapshotUsageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_usage(&mut self, target: DeclarationId, site: UsageSite) {
        self.ordinary.entry(target).or_default().push(site);
    }

    pub fn add_conversion(&mut self, target: DeclarationId, site: UsageSite) {
        self.conversions.entry(target).or_default().push(site);
    }

    pub fn usage_count(&self, target: DeclarationId) -> usize {
        self.ordinary.get(&target).map_or(0, Vec::len)
    }

    pub fn conversion_count(&self, target: DeclarationId) -> usize {
        self.conversions.get(&target).map_or(0, Vec::len)
    }

    fn scan(
        sites: Option<&Vec<UsageSite>>,
        cancel: &CancelToken,
        handler: UsageHandler<'_>,
    ) -> Result<bool, Cancelled> {
        for site in sites.into_iter().flatten() {
            cancel.check()?;
            if !handler(site) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl UsageIndex for SnapshotUsageIndex {
    fn process_usages(
        &self,
        decl: &Declaration,
        cancel: &CancelToken,
        handler: UsageHandler<'_>,
    ) -> Result<bool, Cancelled> {
        Self::scan(self.ordinary.get(&decl.id()), cancel, handler)
    }

    fn process_functional_conversions(
        &self,
        decl: &Declaration,
        cancel: &CancelToken,
        handler: UsageHandler<'_>,
    ) -> Result<bool, Cancelled> {
        Self::scan(self.conversions.get(&decl.id()), cancel, handler)
    }
}
