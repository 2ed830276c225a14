use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::{debug, info};
use serde::Deserialize;
use std::{collections::HashMap, env, fs, path::PathBuf};

use testlint_core::{FILENAME_PATTERN_KEY, MODULE_KEY, Settings};

#[derive(Debug, Clone, Parser)]
#[command(name = "check")]
#[command(about = "Lint testing-library usage in JavaScript/TypeScript projects")]
pub struct Config {
    /// Root directory of the project (defaults to git root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Substring filter for the files to check
    #[arg(long)]
    pub entry_glob: Option<String>,

    /// Custom wrapper module that re-exports the testing utilities
    #[arg(long)]
    pub module: Option<String>,

    /// Regex deciding which filenames rules may report on
    #[arg(long)]
    pub filename_pattern: Option<String>,

    /// JSON settings file (defaults to <root>/.testlintrc.json when present)
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

/// The shape of `.testlintrc.json`.
#[derive(Debug, Default, Deserialize)]
struct RcFile {
    #[serde(default)]
    settings: HashMap<String, String>,
}

impl Config {
    /// Resolves the root directory, falling back to the enclosing git root.
    pub fn initialize(&mut self) -> Result<()> {
        let root = if let Some(r) = self.root.take() {
            debug!("Using provided root directory: {:?}", r);
            r.canonicalize().unwrap_or(r)
        } else {
            debug!("No root provided, searching for git root");
            find_git_root()?
        };
        info!("Using root directory: {}", root.display());
        self.root = Some(root);
        Ok(())
    }

    /// Get the root directory, returning an error if not initialized
    pub fn root(&self) -> Result<&PathBuf> {
        self.root
            .as_ref()
            .ok_or_else(|| anyhow!("Config not initialized - call initialize() first"))
    }

    /// Resolves the ambient settings: the JSON file first, CLI flags on top.
    pub fn resolve_settings(&self) -> Result<Settings> {
        let mut raw = self.read_rc_file()?;
        if let Some(module) = &self.module {
            raw.insert(MODULE_KEY.to_string(), module.clone());
        }
        if let Some(pattern) = &self.filename_pattern {
            raw.insert(FILENAME_PATTERN_KEY.to_string(), pattern.clone());
        }
        Settings::resolve(&raw)
    }

    fn read_rc_file(&self) -> Result<HashMap<String, String>> {
        let path = match &self.settings {
            Some(p) => Some(p.clone()),
            None => {
                let default = self.root()?.join(".testlintrc.json");
                default.exists().then_some(default)
            }
        };
        let Some(path) = path else {
            return Ok(HashMap::new());
        };

        debug!("Reading settings file: {}", path.display());
        let txt = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let rc: RcFile = serde_json::from_str(&txt)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("Loaded {} settings entries", rc.settings.len());
        Ok(rc.settings)
    }
}

pub(crate) fn find_git_root() -> Result<PathBuf> {
    debug!("Searching for git root");
    let mut current_dir = env::current_dir()?;

    loop {
        if current_dir.join(".git").exists() {
            debug!("Found git root at: {:?}", current_dir);
            return Ok(current_dir);
        }
        match current_dir.parent() {
            Some(parent) => current_dir = parent.to_path_buf(),
            None => {
                return Err(anyhow!("Could not find .git directory in any parent folder"));
            }
        }
    }
}
