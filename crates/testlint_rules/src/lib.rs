//! Lint rules for testing-library usage in JavaScript/TypeScript projects.
//!
//! The rules here are thin: the import detection, filename gating and
//! specifier resolution they share all live in `testlint_core`. Each rule
//! contributes a visitor table and is run through the engine's merged
//! single-pass traversal, one pass per rule per file.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use std::io::{BufWriter, Write};
//! use testlint_rules::{Config, run_check};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = Config {
//!     root: Some(std::path::PathBuf::from("/path/to/project")),
//!     entry_glob: None,
//!     module: None,
//!     filename_pattern: None,
//!     settings: None,
//! };
//!
//! let result = run_check(cfg)?;
//!
//! if !result.warnings.is_empty() {
//!     let mut stdout = BufWriter::new(std::io::stdout());
//!     testlint_rules::print_warnings(&mut stdout, &result.warnings)?;
//!     stdout.flush()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod await_async_query;
mod checker;
mod collector;
mod config;
pub mod render_naming;
mod reporter;
mod types;

// Re-export public API
pub use checker::run_check;
pub use collector::collect_files;
pub use config::Config;
pub use reporter::{print_clean_message, print_warnings};
pub use types::{CheckResult, Warning};
