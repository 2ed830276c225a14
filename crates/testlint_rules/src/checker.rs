use anyhow::{Context, Result, anyhow};
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::{fs, path::Path, sync::Arc, thread};

use testlint_core::{Settings, VisitorTable, parse_source, run_pass, source_type_for};

use crate::{
    await_async_query,
    collector::collect_files,
    config::Config,
    render_naming,
    types::{CheckResult, Warning, line_col},
};

type MessageFn = fn(Option<&str>) -> String;

/// The shipped rules: id, visitor factory, message formatter.
const RULES: &[(&str, fn() -> VisitorTable, MessageFn)] = &[
    (render_naming::RULE_ID, render_naming::visitors, render_naming::message),
    (await_async_query::RULE_ID, await_async_query::visitors, await_async_query::message),
];

pub fn run_check(mut cfg: Config) -> Result<CheckResult> {
    info!("Starting testing-library check");

    cfg.initialize()?;
    let root = cfg.root()?.clone();
    let settings = cfg.resolve_settings()?;

    let files = collect_files(&root, cfg.entry_glob.as_deref())?;
    if files.is_empty() {
        warn!("No JavaScript/TypeScript files found under {}", root.display());
        return Err(anyhow!("No JavaScript/TypeScript files found under {}", root.display()));
    }
    info!("Found {} files", files.len());

    let settings = Arc::new(settings);

    // Detection state never crosses files, so each one is independent
    let warnings: Vec<Warning> = files
        .par_iter()
        .flat_map(|file| {
            debug!("Thread {:?} processing: {}", thread::current().id(), file.display());
            let rel = file.strip_prefix(&root).unwrap_or(file).to_string_lossy().to_string();
            match check_file(file, &rel, &settings) {
                Ok(warnings) => warnings,
                Err(e) => {
                    warn!("Skipping {}: {}", file.display(), e);
                    vec![]
                }
            }
        })
        .collect();

    info!("Check complete. Found {} warnings", warnings.len());
    Ok(CheckResult { warnings, files_analyzed: files.len() })
}

/// Runs every rule over one file. Each rule gets its own pass with a fresh
/// detection state.
fn check_file(file: &Path, rel: &str, settings: &Settings) -> Result<Vec<Warning>> {
    let src =
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let tree = parse_source(&src, source_type_for(file))?;
    let filename = file.file_name().and_then(|n| n.to_str()).unwrap_or_default();

    let mut warnings = Vec::new();
    for &(rule, visitors, message) in RULES {
        trace!("Running rule '{}' on {}", rule, file.display());
        for diag in run_pass(&tree, filename, settings, visitors()) {
            let (line, column) = line_col(&src, diag.span.start as usize);
            warnings.push(Warning {
                file: rel.to_string(),
                line,
                column,
                rule,
                message: message(diag.data.as_deref()),
            });
        }
    }
    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    fn config_for(root: &Path) -> Config {
        Config {
            root: Some(root.to_path_buf()),
            entry_glob: None,
            module: None,
            filename_pattern: None,
            settings: None,
        }
    }

    #[test]
    fn test_reports_violation_in_test_file() {
        let temp_dir = TempDir::new().unwrap();
        write_file(
            temp_dir.path(),
            "widget.test.ts",
            "import { render } from '@testing-library/react';\n\
             const wrapper = render(App);\n",
        );

        let result = run_check(config_for(temp_dir.path())).unwrap();
        assert_eq!(result.files_analyzed, 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].rule, "render-result-naming");
        assert_eq!(result.warnings[0].line, 2);
    }

    #[test]
    fn test_non_test_filename_is_not_reported() {
        let temp_dir = TempDir::new().unwrap();
        write_file(
            temp_dir.path(),
            "widget.ts",
            "import { render } from '@testing-library/react';\n\
             const wrapper = render(App);\n",
        );

        let result = run_check(config_for(temp_dir.path())).unwrap();
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_custom_module_mismatch_suppresses_reports() {
        let temp_dir = TempDir::new().unwrap();
        write_file(
            temp_dir.path(),
            ".testlintrc.json",
            r#"{ "settings": { "testing-library/module": "my-test-utils" } }"#,
        );
        write_file(
            temp_dir.path(),
            "widget.test.ts",
            "import { render } from 'something-else';\n\
             const wrapper = render(App);\n",
        );

        let result = run_check(config_for(temp_dir.path())).unwrap();
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_custom_module_match_enables_reports() {
        let temp_dir = TempDir::new().unwrap();
        write_file(
            temp_dir.path(),
            ".testlintrc.json",
            r#"{ "settings": { "testing-library/module": "my-test-utils" } }"#,
        );
        write_file(
            temp_dir.path(),
            "widget.test.ts",
            "import { render } from 'my-test-utils';\n\
             const wrapper = render(App);\n",
        );

        let result = run_check(config_for(temp_dir.path())).unwrap();
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_multiple_files_collect_independent_warnings() {
        let temp_dir = TempDir::new().unwrap();
        write_file(
            temp_dir.path(),
            "a.test.ts",
            "import { render } from '@testing-library/react';\n\
             const wrapper = render(App);\n",
        );
        write_file(
            temp_dir.path(),
            "b.test.ts",
            "import { screen } from '@testing-library/react';\n\
             it('x', () => { screen.findByText('save'); });\n",
        );
        write_file(temp_dir.path(), "clean.test.ts", "const x = 1;\n");

        let result = run_check(config_for(temp_dir.path())).unwrap();
        assert_eq!(result.files_analyzed, 3);
        assert_eq!(result.warnings.len(), 2);

        let rules: Vec<&str> = result.warnings.iter().map(|w| w.rule).collect();
        assert!(rules.contains(&"render-result-naming"));
        assert!(rules.contains(&"await-async-query"));
    }

    #[test]
    fn test_empty_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(run_check(config_for(temp_dir.path())).is_err());
    }
}
