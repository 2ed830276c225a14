//! Shared detection engine for testing-library lint rules.
//!
//! This crate provides the cross-cutting logic every rule needs:
//! - Parsing JS/TS files with oxc and lowering them into a flat syntax tree
//! - Tracking imports of the testing library (or a configured wrapper
//!   module) during a single traversal pass
//! - Resolving how a utility symbol is locally bound (named import,
//!   namespace import, destructured `require`)
//! - Gating rule callbacks on import state and a filename pattern
//! - Merging the tracker's visitors with a rule's visitors into one pass

mod ast;
pub mod classify;
pub mod constants;
mod detect;
mod parser;
mod resolver;
mod settings;
mod visitor;

// Re-export public API
pub use ast::{Node, NodeData, NodeId, NodeKind, SyntaxTree};
pub use oxc_span::SourceType;
pub use detect::{DetectionState, ImportNode, detection_visitors, filename_ok};
pub use parser::{parse_file, parse_source, source_type_for};
pub use resolver::{SpecifierBinding, resolve_specifier};
pub use settings::{FILENAME_PATTERN_KEY, MODULE_KEY, Settings};
pub use visitor::{
    Diagnostic, Handler, MergedVisitors, RuleCtx, VisitorTable, merge_visitors, run_pass,
};
