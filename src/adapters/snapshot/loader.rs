use crate::adapters::snapshot::model::{
    CodebaseSnapshot, DeclarationDetails, DeclarationRecord, QualifierRecord, TypeFlavorRecord,
    TypeNestingRecord, UsageContextRecord, UsageForm, UsageRecord,
};
use crate::adapters::snapshot::usage_index::SnapshotUsageIndex;
use crate::domain::declaration::{
    Declaration, DeclarationCore, EnumConstantDecl, FieldDecl, MethodDecl, Modifiers, TypeDecl,
    TypeFlavor, TypeNesting,
};
use crate::domain::graph::DeclarationGraph;
use crate::domain::usage::{Qualifier, UsageContext, UsageSite};
use anyhow::{Context as _, Result, bail};
use std::collections::HashSet;
use std::path::Path;

/// Parse a snapshot JSON file.
pub fn parse_file(path: &Path) -> Result<CodebaseSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
    serde_json::from_str(&content).context("Failed to parse CodebaseSnapshot JSON")
}

/// Load a snapshot JSON file and materialize the run's inputs.
pub fn load_from_file(path: &Path) -> Result<(DeclarationGraph, SnapshotUsageIndex)> {
    materialize(parse_file(path)?)
}

/// Build the declaration graph and usage index from a parsed snapshot,
/// validating referential integrity along the way.
pub fn materialize(snapshot: CodebaseSnapshot) -> Result<(DeclarationGraph, SnapshotUsageIndex)> {
    let mut known = HashSet::new();
    for record in &snapshot.declarations {
        if !known.insert(record.id) {
            bail!("Duplicate declaration id: {}", record.id);
        }
    }

    let mut graph = DeclarationGraph::new();
    for record in &snapshot.declarations {
        if let Some(container) = record.containing_type
            && !known.contains(&container)
        {
            bail!(
                "Declaration {} refers to unknown containing type {}",
                record.id,
                container
            );
        }
        for supertype in &record.extends {
            if !known.contains(supertype) {
                bail!(
                    "Declaration {} refers to unknown supertype {}",
                    record.id,
                    supertype
                );
            }
        }
        graph.add_declaration(to_declaration(record));
    }

    for record in &snapshot.declarations {
        if let Some(container) = record.containing_type {
            graph.add_containment(container, record.id);
        }
        for &supertype in &record.extends {
            graph.add_extends(record.id, supertype);
        }
    }

    let mut index = SnapshotUsageIndex::new();
    for usage in &snapshot.usages {
        if !known.contains(&usage.target) {
            bail!("Usage refers to unknown declaration {}", usage.target);
        }
        let site = to_usage_site(usage);
        match usage.form {
            UsageForm::Ordinary => index.add_usage(usage.target, site),
            UsageForm::FunctionalConversion => index.add_conversion(usage.target, site),
        }
    }

    Ok((graph, index))
}

fn to_declaration(record: &DeclarationRecord) -> Declaration {
    let core = DeclarationCore {
        id: record.id,
        name: record.name.clone(),
        scope: record.scope.clone(),
        containing_type: record.containing_type,
        access: record.access,
        modifiers: record.modifiers.map(|m| Modifiers {
            is_static: m.is_static,
            is_final: m.is_final,
            is_abstract: m.is_abstract,
            is_native: m.is_native,
            has_initializer: m.has_initializer,
        }),
        is_synthetic: record.is_synthetic,
        is_in_source: record.in_source,
        annotations: record.annotations.clone(),
    };

    match record.details {
        DeclarationDetails::Type {
            flavor,
            nesting,
            is_functional,
        } => Declaration::Type(TypeDecl {
            core,
            flavor: match flavor {
                TypeFlavorRecord::Class => TypeFlavor::Class,
                TypeFlavorRecord::Interface => TypeFlavor::Interface,
                TypeFlavorRecord::Enum => TypeFlavor::Enum,
                TypeFlavorRecord::Annotation => TypeFlavor::Annotation,
            },
            nesting: match nesting {
                TypeNestingRecord::TopLevel => TypeNesting::TopLevel,
                TypeNestingRecord::Nested => TypeNesting::Nested,
                TypeNestingRecord::Inner => TypeNesting::Inner,
                TypeNestingRecord::Local => TypeNesting::Local,
                TypeNestingRecord::Anonymous => TypeNesting::Anonymous,
                TypeNestingRecord::TypeParameter => TypeNesting::TypeParameter,
            },
            is_functional,
        }),
        DeclarationDetails::Method {
            is_constructor,
            has_super_signature,
            is_overridden,
        } => Declaration::Method(MethodDecl {
            core,
            is_constructor,
            has_super_signature,
            is_overridden,
        }),
        DeclarationDetails::Field => Declaration::Field(FieldDecl { core }),
        DeclarationDetails::EnumConstant => Declaration::EnumConstant(EnumConstantDecl { core }),
    }
}

fn to_usage_site(record: &UsageRecord) -> UsageSite {
    UsageSite {
        scope: record.scope.clone(),
        enclosing_type: record.enclosing_type,
        qualifier: match record.qualifier {
            QualifierRecord::None => Qualifier::None,
            QualifierRecord::This => Qualifier::This,
            QualifierRecord::Super => Qualifier::Super,
            QualifierRecord::Expression { resolved_type } => {
                Qualifier::Expression { resolved_type }
            }
        },
        context: match record.context {
            UsageContextRecord::Normal => UsageContext::Normal,
            UsageContextRecord::SupertypeList => UsageContext::SupertypeList,
            UsageContextRecord::AnnotationArgument => UsageContext::AnnotationArgument,
        },
        in_source: record.in_source,
        is_constructor_call: record.is_constructor_call,
        target_resolved: record.target_resolved,
    }
}
