use crate::app::dto::{AnalysisReport, Suggestion};
use crate::domain::access::AccessLevel;
use crate::domain::aggregator::{ContainmentAggregate, withdraw_violations};
use crate::domain::cancel::CancelToken;
use crate::domain::declaration::{Declaration, DeclarationId};
use crate::domain::graph::DeclarationGraph;
use crate::domain::ports::{EntryPointProvider, ExtensibilityProvider, UsageIndex};
use crate::domain::resolver::VisibilityResolver;
use crate::domain::settings::VisibilitySettings;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info};

/// One analysis run: resolution fan-out, aggregation, suggestion report.
///
/// The engine owns the run's inputs and provider lists; `run` itself is
/// read-only and may be invoked repeatedly over the same snapshot with
/// identical results.
pub struct AnalysisEngine {
    project: String,
    graph: DeclarationGraph,
    usage_index: Box<dyn UsageIndex>,
    entry_points: Vec<Box<dyn EntryPointProvider>>,
    extensibility: Vec<Box<dyn ExtensibilityProvider>>,
    settings: VisibilitySettings,
    parallel: bool,
}

impl AnalysisEngine {
    pub fn new(
        project: impl Into<String>,
        graph: DeclarationGraph,
        usage_index: Box<dyn UsageIndex>,
        entry_points: Vec<Box<dyn EntryPointProvider>>,
        extensibility: Vec<Box<dyn ExtensibilityProvider>>,
        settings: VisibilitySettings,
    ) -> Self {
        Self {
            project: project.into(),
            graph,
            usage_index,
            entry_points,
            extensibility,
            settings,
            parallel: true,
        }
    }

    /// Use the worker pool for per-declaration resolution (on by default).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Resolve every declaration and produce the suggestion report.
    pub fn run(&self, cancel: &CancelToken) -> AnalysisReport {
        info!(
            project = %self.project,
            declarations = self.graph.declaration_count(),
            "Resolving visibility suggestions"
        );

        let resolver = VisibilityResolver::new(
            &self.graph,
            self.usage_index.as_ref(),
            &self.entry_points,
            &self.extensibility,
            &self.settings,
        );
        let aggregate = ContainmentAggregate::new();

        let resolve_one = |decl: &Declaration| -> Option<(DeclarationId, AccessLevel)> {
            if !self.settings.suggest_for_constants && decl.is_constant_field() {
                return None;
            }
            match resolver.suggest_level(decl, cancel) {
                Ok(Some(level)) => {
                    if let Some(container) = decl.core().containing_type {
                        aggregate.record(container, level);
                    }
                    Some((decl.id(), level))
                }
                Ok(None) => None,
                Err(_) => {
                    debug!(name = %decl.core().name, "resolution cancelled");
                    None
                }
            }
        };

        let declarations: Vec<&Declaration> = self.graph.declarations().collect();
        let resolved: HashMap<DeclarationId, AccessLevel> = if self.parallel {
            declarations
                .par_iter()
                .copied()
                .filter_map(|d| resolve_one(d))
                .collect()
        } else {
            declarations
                .iter()
                .copied()
                .filter_map(|d| resolve_one(d))
                .collect()
        };

        let withdrawn = withdraw_violations(&self.graph, &resolved, &aggregate);
        if !withdrawn.is_empty() {
            info!(
                count = withdrawn.len(),
                "Withdrew container suggestions violating the containment invariant"
            );
        }

        let mut suggestions: Vec<Suggestion> = self
            .graph
            .declarations()
            .filter_map(|decl| {
                let suggested = *resolved.get(&decl.id())?;
                if suggested >= decl.core().access || withdrawn.contains(&decl.id()) {
                    return None;
                }
                Some(Suggestion {
                    id: decl.id(),
                    name: decl.core().name.clone(),
                    qualified_name: self.graph.qualified_path(decl),
                    kind: decl.kind_str().to_string(),
                    current: decl.core().access,
                    suggested,
                })
            })
            .collect();
        suggestions.sort_by(|a, b| {
            a.qualified_name
                .cmp(&b.qualified_name)
                .then(a.id.cmp(&b.id))
        });

        info!(
            resolved = resolved.len(),
            suggestions = suggestions.len(),
            "Analysis finished"
        );

        AnalysisReport {
            project: self.project.clone(),
            declaration_count: self.graph.declaration_count(),
            resolved_count: resolved.len(),
            withdrawn_count: withdrawn.len(),
            interrupted: cancel.is_cancelled(),
            suggestions,
        }
    }
}
