use crate::adapters::entry_points::{ReflectionRegistryEntryPoints, default_entry_points};
use crate::adapters::extensibility::default_extensibility;
use crate::adapters::snapshot;
use crate::app::dto::AnalysisReport;
use crate::app::engine::AnalysisEngine;
use crate::domain::cancel::CancelToken;
use crate::domain::settings::VisibilitySettings;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "visilint",
    version,
    about = "Suggest the tightest access level for every declaration in a codebase snapshot"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the analysis and print tightening suggestions
    Analyze {
        /// Path to the codebase snapshot JSON
        snapshot: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Resolve declarations on a single thread
        #[arg(long)]
        serial: bool,
        /// Suggest private for members of nested containers
        #[arg(long)]
        private_for_inners: bool,
        /// Never suggest package visibility for members
        #[arg(long)]
        no_package_for_members: bool,
        /// Never suggest package visibility for top-level types
        #[arg(long)]
        no_package_for_top_level: bool,
        /// Leave static final initialized fields alone
        #[arg(long)]
        skip_constants: bool,
        /// Keep-rule regex over qualified names; matching declarations stay
        /// at their current level
        #[arg(long = "keep")]
        keep_patterns: Vec<String>,
    },
    /// Print the loaded declaration graph as JSON (debug aid)
    DumpGraph {
        /// Path to the codebase snapshot JSON
        snapshot: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn run() -> Result<()> {
    match Cli::parse().command {
        Command::Analyze {
            snapshot,
            format,
            serial,
            private_for_inners,
            no_package_for_members,
            no_package_for_top_level,
            skip_constants,
            keep_patterns,
        } => {
            let settings = VisibilitySettings {
                suggest_private_for_inners: private_for_inners,
                suggest_package_for_members: !no_package_for_members,
                suggest_package_for_top_level_types: !no_package_for_top_level,
                suggest_for_constants: !skip_constants,
            };
            analyze(&snapshot, format, serial, settings, &keep_patterns)
        }
        Command::DumpGraph { snapshot } => dump_graph(&snapshot),
    }
}

fn analyze(
    snapshot_path: &Path,
    format: OutputFormat,
    serial: bool,
    settings: VisibilitySettings,
    keep_patterns: &[String],
) -> Result<()> {
    let parsed = snapshot::parse_file(snapshot_path)?;
    let project = if parsed.project.is_empty() {
        snapshot_path.display().to_string()
    } else {
        parsed.project.clone()
    };
    let (graph, index) = snapshot::materialize(parsed)?;

    let mut entry_points = default_entry_points();
    if !keep_patterns.is_empty() {
        let patterns: Vec<&str> = keep_patterns.iter().map(String::as_str).collect();
        entry_points.push(Box::new(ReflectionRegistryEntryPoints::new(
            &patterns, None,
        )?));
    }

    let engine = AnalysisEngine::new(
        project,
        graph,
        Box::new(index),
        entry_points,
        default_extensibility(),
        settings,
    )
    .with_parallel(!serial);

    let report = engine.run(&CancelToken::new());
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    println!("Project: {}", report.project);
    println!(
        "Declarations: {} ({} resolved)",
        report.declaration_count, report.resolved_count
    );
    if report.interrupted {
        println!("Run was interrupted; results are partial.");
    }

    if report.suggestions.is_empty() {
        println!("No visibility can be tightened.");
        return;
    }

    println!();
    for s in &report.suggestions {
        println!(
            "{:>15} -> {:<15} {} {}",
            s.current.keyword(),
            s.suggested.keyword(),
            s.kind,
            s.qualified_name
        );
    }
    println!();
    println!(
        "{} suggestion(s), {} container suggestion(s) withdrawn",
        report.suggestions.len(),
        report.withdrawn_count
    );
}

fn dump_graph(snapshot_path: &Path) -> Result<()> {
    let (graph, _) = snapshot::load_from_file(snapshot_path)?;

    let mut nodes = Vec::new();
    for decl in graph.declarations() {
        let core = decl.core();
        let members: Vec<u32> = graph.members_of(core.id).map(|m| m.id()).collect();
        let mut node = serde_json::json!({
            "id": core.id,
            "name": core.name,
            "qualified_name": graph.qualified_path(decl),
            "kind": decl.kind_str(),
            "scope": core.scope,
            "access": core.access,
            "members": members,
        });
        if let Some(container) = core.containing_type {
            node["containing_type"] = serde_json::json!(container);
        }
        if !core.annotations.is_empty() {
            node["annotations"] = serde_json::json!(core.annotations);
        }
        nodes.push(node);
    }

    let output = serde_json::json!({
        "declaration_count": graph.declaration_count(),
        "declarations": nodes,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
