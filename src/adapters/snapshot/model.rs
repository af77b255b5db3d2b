//! Codebase snapshot representation: contract between an external indexer and
//! the visibility analysis.
//!
//! An indexer (IDE symbol table, LSP dump, bytecode scanner) serializes one
//! `CodebaseSnapshot` per run: every declaration with its modifiers and
//! containment, plus every usage site with the structural context the
//! classifier needs. The loader materializes the declaration graph and usage
//! index from it; nothing here is persisted across runs.

use crate::domain::access::AccessLevel;
use serde::{Deserialize, Serialize};

/// One analysis run's input: declarations and usage sites of a codebase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodebaseSnapshot {
    /// Display name of the indexed project.
    #[serde(default)]
    pub project: String,
    pub declarations: Vec<DeclarationRecord>,
    #[serde(default)]
    pub usages: Vec<UsageRecord>,
}

/// A declaration as the indexer saw it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationRecord {
    /// Snapshot-unique id; usage records and containment refer to it.
    pub id: u32,
    pub name: String,
    /// Qualified package/module name; empty for the default package.
    #[serde(default)]
    pub scope: String,
    /// Id of the directly containing type, if any.
    #[serde(default)]
    pub containing_type: Option<u32>,
    pub access: AccessLevel,
    /// Explicit null marks a declaration whose modifier list could not be
    /// built; the resolver skips those silently.
    #[serde(default = "default_modifiers")]
    pub modifiers: Option<ModifiersRecord>,
    #[serde(default)]
    pub is_synthetic: bool,
    /// Present in real source (vs. generated or mirrored from a binary).
    #[serde(default = "default_true")]
    pub in_source: bool,
    /// Annotation simple names on the declaration.
    #[serde(default)]
    pub annotations: Vec<String>,
    /// Ids of direct supertypes (types only).
    #[serde(default)]
    pub extends: Vec<u32>,
    #[serde(flatten)]
    pub details: DeclarationDetails,
}

/// Kind-specific declaration data, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclarationDetails {
    Type {
        #[serde(default)]
        flavor: TypeFlavorRecord,
        #[serde(default)]
        nesting: TypeNestingRecord,
        /// Single-abstract-method type adoptable by a lambda.
        #[serde(default)]
        is_functional: bool,
    },
    Method {
        #[serde(default)]
        is_constructor: bool,
        #[serde(default)]
        has_super_signature: bool,
        #[serde(default)]
        is_overridden: bool,
    },
    Field,
    EnumConstant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFlavorRecord {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeNestingRecord {
    #[default]
    TopLevel,
    Nested,
    Inner,
    Local,
    Anonymous,
    TypeParameter,
}

/// Modifier flags; all default to false so indexers only emit what is set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifiersRecord {
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_native: bool,
    pub has_initializer: bool,
}

/// One reference to a declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Id of the referenced declaration.
    pub target: u32,
    /// Package/module of the referencing location.
    #[serde(default)]
    pub scope: String,
    /// Innermost type enclosing the reference, if any.
    #[serde(default)]
    pub enclosing_type: Option<u32>,
    #[serde(default)]
    pub qualifier: QualifierRecord,
    #[serde(default)]
    pub context: UsageContextRecord,
    /// False for references from descriptor/config files outside source.
    #[serde(default = "default_true")]
    pub in_source: bool,
    #[serde(default)]
    pub is_constructor_call: bool,
    /// Whether the reference target resolved; unresolved references classify
    /// conservatively.
    #[serde(default = "default_true")]
    pub target_resolved: bool,
    #[serde(default)]
    pub form: UsageForm,
}

/// Syntactic form of the qualifier, tagged by `form`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum QualifierRecord {
    #[default]
    None,
    This,
    Super,
    Expression {
        #[serde(default)]
        resolved_type: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageContextRecord {
    #[default]
    Normal,
    SupertypeList,
    AnnotationArgument,
}

/// Whether the record is an ordinary reference or an implicit behavioral
/// conversion (lambda adoption of a functional type).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageForm {
    #[default]
    Ordinary,
    FunctionalConversion,
}

fn default_true() -> bool {
    true
}

fn default_modifiers() -> Option<ModifiersRecord> {
    Some(ModifiersRecord::default())
}
