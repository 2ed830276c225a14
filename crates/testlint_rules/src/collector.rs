use anyhow::Result;
use ignore::WalkBuilder;
use log::{debug, trace};
use std::path::{Path, PathBuf};

use testlint_core::constants::JS_TS_EXTENSIONS;

/// Walks `root` and collects every JavaScript/TypeScript file, honoring
/// ignore and gitignore rules. `filter` restricts the result to paths whose
/// root-relative form contains the given substring.
pub fn collect_files(root: &Path, filter: Option<&str>) -> Result<Vec<PathBuf>> {
    debug!("Walking directory tree from root: {}", root.display());
    let mut files: Vec<PathBuf> = Vec::new();
    let walker = WalkBuilder::new(root).hidden(false).ignore(true).git_ignore(true).build();

    for res in walker {
        let dent = res?;
        let p = dent.path();
        if !p.is_file() {
            continue;
        }
        let Some(ext) = p.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if !JS_TS_EXTENSIONS.contains(&ext) {
            continue;
        }
        if let Some(pattern) = filter {
            let rel = p.strip_prefix(root).unwrap_or(p);
            if !rel.to_string_lossy().contains(pattern) {
                trace!("Skipping {} (does not match '{}')", p.display(), pattern);
                continue;
            }
        }
        trace!("Collected {}", p.display());
        files.push(p.to_path_buf());
    }

    files.sort();
    debug!("Collected {} files", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, "// test file").expect("Failed to write test file");
    }

    #[test]
    fn test_collects_js_ts_files_only() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.test.ts");
        touch(temp_dir.path(), "b.tsx");
        touch(temp_dir.path(), "styles.css");
        touch(temp_dir.path(), "readme.md");

        let files = collect_files(temp_dir.path(), None).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_filter_restricts_by_substring() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "src/widget.test.ts");
        touch(temp_dir.path(), "src/widget.ts");
        touch(temp_dir.path(), "scripts/build.ts");

        let files = collect_files(temp_dir.path(), Some("src/")).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.to_string_lossy().contains("src/")));
    }
}
