//! Ignore pattern sources and merging
//!
//! Patterns come from up to four places: the built-in default list, a
//! project-local `.cdigestignore` file, the repository `.gitignore`, and
//! patterns passed on the command line. All of them are merged into a single
//! [`PatternSet`]; once merged, a pattern's origin no longer matters.

use crate::Result;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Name of the project-local ignore file read from the scan root.
pub const IGNORE_FILE_NAME: &str = ".cdigestignore";

/// Name of the VCS ignore file read from the scan root.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Built-in ignore patterns applied unless `--no-default-ignores` is given.
///
/// Deliberately language-agnostic: VCS metadata, dependency and build
/// directories, caches, virtual environments, editor folders, OS metadata
/// files, and common compiled-binary extensions.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    // Python
    "*.pyc",
    "*.pyo",
    "*.pyd",
    "__pycache__",
    "*.egg-info",
    // JavaScript
    "node_modules",
    "bower_components",
    // Version control
    ".git",
    ".svn",
    ".hg",
    ".gitignore",
    // Virtual environments
    "venv",
    ".venv",
    "env",
    // IDEs and editors
    ".idea",
    ".vscode",
    // Temporary and log files
    "*.log",
    "*.bak",
    "*.swp",
    "*.tmp",
    // OS metadata
    ".DS_Store",
    "Thumbs.db",
    // Build output
    "build",
    "dist",
    "target",
    // Compiled libraries
    "*.so",
    "*.dylib",
    "*.dll",
];

/// Which pattern sources to load and any caller-supplied extras.
#[derive(Debug, Clone)]
pub struct PatternOptions {
    /// Include the built-in default pattern list
    pub use_defaults: bool,
    /// Read `.cdigestignore` from the scan root if present
    pub use_ignore_file: bool,
    /// Read `.gitignore` from the scan root if present
    pub use_gitignore: bool,
    /// Additional patterns supplied by the caller, always included
    pub extra: BTreeSet<String>,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            use_defaults: true,
            use_ignore_file: true,
            use_gitignore: true,
            extra: BTreeSet::new(),
        }
    }
}

/// A deduplicated set of glob pattern strings.
///
/// Backed by a `BTreeSet` so iteration order is deterministic regardless of
/// the order sources were merged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: BTreeSet<String>,
}

impl PatternSet {
    /// Create an empty pattern set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single pattern
    pub fn insert<S: Into<String>>(&mut self, pattern: S) {
        self.patterns.insert(pattern.into());
    }

    /// Iterate over patterns in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether the exact pattern string is present
    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains(pattern)
    }
}

impl<S: Into<String>> Extend<S> for PatternSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.patterns.extend(iter.into_iter().map(Into::into));
    }
}

impl<S: Into<String>> FromIterator<S> for PatternSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Merge all enabled pattern sources for `base_path` into one set.
///
/// Reads at most two files from disk. A missing ignore file is treated as
/// empty; any other I/O failure is propagated.
pub fn load_patterns(base_path: &Path, options: &PatternOptions) -> Result<PatternSet> {
    let mut set = PatternSet::new();

    if options.use_defaults {
        set.extend(DEFAULT_IGNORE_PATTERNS.iter().copied());
    }

    if options.use_ignore_file {
        set.extend(read_pattern_file(&base_path.join(IGNORE_FILE_NAME))?);
    }

    if options.use_gitignore {
        set.extend(read_pattern_file(&base_path.join(GITIGNORE_FILE_NAME))?);
    }

    set.extend(options.extra.iter().cloned());

    log::debug!("Loaded {} ignore patterns for {:?}", set.len(), base_path);

    Ok(set)
}

/// Read one pattern per line, skipping blank lines and `#` comments.
///
/// A file that does not exist yields no patterns.
fn read_pattern_file(path: &Path) -> Result<Vec<String>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn no_sources() -> PatternOptions {
        PatternOptions {
            use_defaults: false,
            use_ignore_file: false,
            use_gitignore: false,
            extra: BTreeSet::new(),
        }
    }

    #[test]
    fn test_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let options = PatternOptions {
            use_defaults: true,
            ..no_sources()
        };

        let set = load_patterns(temp_dir.path(), &options).unwrap();
        assert_eq!(set.len(), DEFAULT_IGNORE_PATTERNS.len());
        assert!(set.contains("node_modules"));
        assert!(set.contains("*.pyc"));
    }

    #[test]
    fn test_missing_files_are_empty() {
        let temp_dir = TempDir::new().unwrap();
        let options = PatternOptions {
            use_ignore_file: true,
            use_gitignore: true,
            ..no_sources()
        };

        let set = load_patterns(temp_dir.path(), &options).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let mut file = File::create(temp_dir.path().join(GITIGNORE_FILE_NAME)).unwrap();
        write!(file, "foo\n# comment\n\nbar").unwrap();

        let options = PatternOptions {
            use_gitignore: true,
            ..no_sources()
        };

        let set = load_patterns(temp_dir.path(), &options).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("foo"));
        assert!(set.contains("bar"));
    }

    #[test]
    fn test_both_ignore_files_merged() {
        let temp_dir = TempDir::new().unwrap();
        let mut file = File::create(temp_dir.path().join(IGNORE_FILE_NAME)).unwrap();
        writeln!(file, "*.java").unwrap();
        let mut file = File::create(temp_dir.path().join(GITIGNORE_FILE_NAME)).unwrap();
        writeln!(file, "*.py").unwrap();

        let options = PatternOptions {
            use_ignore_file: true,
            use_gitignore: true,
            ..no_sources()
        };

        let set = load_patterns(temp_dir.path(), &options).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("*.java"));
        assert!(set.contains("*.py"));
    }

    #[test]
    fn test_extra_patterns_always_added() {
        let temp_dir = TempDir::new().unwrap();
        let options = PatternOptions {
            extra: ["extra1".to_string(), "extra2".to_string()].into(),
            ..no_sources()
        };

        let set = load_patterns(temp_dir.path(), &options).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("extra1"));
        assert!(set.contains("extra2"));
    }

    #[test]
    fn test_merge_is_order_independent() {
        let temp_dir = TempDir::new().unwrap();
        let options = PatternOptions {
            use_defaults: true,
            extra: ["zzz".to_string(), "aaa".to_string()].into(),
            ..no_sources()
        };

        let loaded = load_patterns(temp_dir.path(), &options).unwrap();

        let mut unioned: PatternSet = ["zzz", "aaa"].into_iter().collect();
        unioned.extend(DEFAULT_IGNORE_PATTERNS.iter().copied());

        assert_eq!(loaded, unioned);
    }

    #[test]
    fn test_duplicates_collapse() {
        let temp_dir = TempDir::new().unwrap();
        let mut file = File::create(temp_dir.path().join(GITIGNORE_FILE_NAME)).unwrap();
        writeln!(file, "node_modules").unwrap();

        let options = PatternOptions {
            use_defaults: true,
            use_gitignore: true,
            ..no_sources()
        };

        let set = load_patterns(temp_dir.path(), &options).unwrap();
        assert_eq!(set.len(), DEFAULT_IGNORE_PATTERNS.len());
    }
}
