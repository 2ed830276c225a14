//! Shared constants: the module markers the detection engine looks for and
//! the name lists the rules match against.

/// Substring identifying an import of the tracked testing library.
pub const TARGET_LIBRARY_MARKER: &str = "testing-library";

/// Identifier used for dynamic module loads.
pub const LOAD_FUNCTION: &str = "require";

/// Filenames that rules may report on unless overridden in settings.
pub const DEFAULT_FILENAME_PATTERN: &str = r"\.(test|spec)\.[jt]sx?$";

/// Callee names treated as render-style calls.
pub const RENDER_FUNCTIONS: &[&str] = &["render"];

/// Accepted names for a variable holding a render result.
pub const RENDER_RESULT_NAMES: &[&str] = &["view", "utils"];

/// Query prefixes that return promises and must be handled by the caller.
pub const ASYNC_QUERY_PREFIXES: &[&str] = &["findBy", "findAllBy"];

/// File extensions for JavaScript/TypeScript files that should be analyzed.
pub const JS_TS_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_ts_extensions_includes_all_variants() {
        for ext in ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"] {
            assert!(JS_TS_EXTENSIONS.contains(&ext), "missing extension '{}'", ext);
        }
        assert_eq!(JS_TS_EXTENSIONS.len(), 8);
    }

    #[test]
    fn test_async_query_prefixes_are_find_variants() {
        assert!(ASYNC_QUERY_PREFIXES.iter().all(|p| p.starts_with("find")));
    }

    #[test]
    fn test_marker_is_not_a_scoped_package() {
        // The marker must match both `@testing-library/react` and forks like
        // `testing-library-foo`, so it carries no scope prefix.
        assert!(!TARGET_LIBRARY_MARKER.starts_with('@'));
    }
}
