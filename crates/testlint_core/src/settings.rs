use anyhow::{Context, Result};
use log::debug;
use regex::Regex;
use std::collections::HashMap;

use crate::constants::DEFAULT_FILENAME_PATTERN;

/// Settings key naming a custom wrapper module that re-exports the testing
/// utilities.
pub const MODULE_KEY: &str = "testing-library/module";

/// Settings key overriding which filenames rules may report on.
pub const FILENAME_PATTERN_KEY: &str = "testing-library/filename-pattern";

/// Per-run configuration shared by every rule. Read-only for the lifetime
/// of a file's pass.
#[derive(Debug, Clone)]
pub struct Settings {
    pub custom_module: Option<String>,
    pub filename_pattern: Regex,
}

impl Settings {
    /// Resolves the ambient key-value settings, supplying defaults for the
    /// keys that are absent. A malformed filename pattern is a configuration
    /// error and fails here rather than during traversal.
    pub fn resolve(raw: &HashMap<String, String>) -> Result<Self> {
        let custom_module = raw.get(MODULE_KEY).cloned();
        let pattern =
            raw.get(FILENAME_PATTERN_KEY).map(String::as_str).unwrap_or(DEFAULT_FILENAME_PATTERN);
        debug!("Resolved settings: module={:?}, filename pattern='{}'", custom_module, pattern);

        let filename_pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid filename pattern '{}'", pattern))?;
        Ok(Self { custom_module, filename_pattern })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            custom_module: None,
            filename_pattern: Regex::new(DEFAULT_FILENAME_PATTERN)
                .expect("default filename pattern is a valid regex"),
        }
    }
}
