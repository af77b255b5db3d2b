//! visilint library — tightest-sufficient-visibility analysis.
//!
//! Computes, for every declaration in a codebase snapshot, the tightest
//! access level its usages allow, with a bottom-up pass keeping containers at
//! least as visible as the members they expose.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
