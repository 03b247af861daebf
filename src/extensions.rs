/*!
 * Extension membership index for file-type filtering
 */

use std::collections::HashSet;
use std::path::Path;

/// Set of allowed file-type suffixes, each stored with a leading `.`.
///
/// Built once from the `-t` configuration string and read-only during
/// traversal. Matching is exact and case-sensitive: `.md` does not admit
/// `README.MD`.
#[derive(Debug, Clone, Default)]
pub struct ExtensionIndex {
    entries: HashSet<String>,
}

impl ExtensionIndex {
    /// Build an index from a comma-separated list of extensions.
    ///
    /// Tokens are trimmed of surrounding whitespace and a leading `.` is
    /// prepended to any token lacking one, so `"c, .h ,txt"` yields
    /// `{.c, .h, .txt}`. Empty tokens and repeated extensions are no-ops.
    pub fn from_spec(spec: &str) -> Self {
        let mut entries = HashSet::new();
        for token in spec.split(',') {
            let trimmed = token.trim();
            if trimmed.is_empty() {
                continue;
            }
            let normalized = if trimmed.starts_with('.') {
                trimmed.to_string()
            } else {
                format!(".{}", trimmed)
            };
            entries.insert(normalized);
        }
        Self { entries }
    }

    /// Number of distinct extensions configured
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no extensions are configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Test a path against the index.
    ///
    /// The key is the substring from the last `.` of the rendered path to
    /// its end; a path with no dot has no suffix and never matches.
    pub fn contains_path(&self, path: &Path) -> bool {
        let rendered = path.to_string_lossy();
        match rendered.rfind('.') {
            Some(pos) => self.entries.contains(&rendered[pos..]),
            None => false,
        }
    }
}
