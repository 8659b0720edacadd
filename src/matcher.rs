//! Glob matching of paths against an ignore pattern set
//!
//! A path is ignored when any pattern matches any of five candidate forms of
//! the path: its basename, its path relative to the scan root, its full
//! normalized path, the root-anchored form (for patterns with a leading `/`),
//! or any single segment of the relative path. This breadth lets one pattern
//! act as a filename filter, a path filter, an anchored filter, or a
//! directory-component filter without the caller having to pick.
//!
//! Wildcards follow shell-glob rules: `*` is any run of characters, `?` is a
//! single character, and neither treats `/` specially.

use crate::{PatternSet, Result};
use globset::{Glob, GlobMatcher};
use std::path::{Component, Path, PathBuf};

/// One compiled ignore pattern.
///
/// `anchored` is present only for `/`-prefixed patterns and holds the glob
/// for the scan root joined with the pattern body. Anchored patterns skip the
/// basename and relative candidates (they are path-anchored, not name
/// filters) but keep the full-path candidate, so an absolute pattern still
/// matches the file it names. Segment matching runs against the raw pattern
/// text for every rule, anchored ones included. That lets an anchored
/// pattern match same-named path segments anywhere, which looks unintended
/// but is how the matcher has always behaved; downstream ignore marking of
/// subtrees relies on it.
#[derive(Debug)]
struct Rule {
    glob: GlobMatcher,
    anchored: Option<GlobMatcher>,
}

impl Rule {
    fn new(pattern: &str, base_path: &Path) -> Result<Self> {
        let glob = Glob::new(pattern)?.compile_matcher();

        let anchored = if let Some(body) = pattern.strip_prefix('/') {
            let rooted = normalize_path(&base_path.join(body));
            Some(Glob::new(&rooted.to_string_lossy())?.compile_matcher())
        } else {
            None
        };

        Ok(Self { glob, anchored })
    }

    fn matches(&self, candidates: &Candidates) -> bool {
        match &self.anchored {
            Some(anchored) => {
                if matches_full(&self.glob, &candidates.full)
                    || anchored.is_match(&candidates.full)
                {
                    return true;
                }
            }
            None => {
                if matches_name(&self.glob, &candidates.name)
                    || matches_relative(&self.glob, candidates.relative.as_deref())
                    || matches_full(&self.glob, &candidates.full)
                {
                    return true;
                }
            }
        }

        matches_any_segment(&self.glob, &candidates.segments)
    }
}

/// The candidate strings derived from one path.
#[derive(Debug)]
struct Candidates {
    name: String,
    relative: Option<PathBuf>,
    full: PathBuf,
    segments: Vec<String>,
}

impl Candidates {
    fn new(path: &Path, base_path: &Path) -> Self {
        let full = normalize_path(path);
        let name = full
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let relative = full
            .strip_prefix(normalize_path(base_path))
            .ok()
            .map(Path::to_path_buf);

        let segments = relative
            .as_deref()
            .map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name,
            relative,
            full,
            segments,
        }
    }
}

/// Candidate 1: the final path segment.
fn matches_name(glob: &GlobMatcher, name: &str) -> bool {
    glob.is_match(name)
}

/// Candidate 2: the path relative to the scan root.
fn matches_relative(glob: &GlobMatcher, relative: Option<&Path>) -> bool {
    relative.is_some_and(|rel| glob.is_match(rel))
}

/// Candidate 3: the full normalized path.
fn matches_full(glob: &GlobMatcher, full: &Path) -> bool {
    glob.is_match(full)
}

/// Candidate 5: any single segment of the relative path.
fn matches_any_segment(glob: &GlobMatcher, segments: &[String]) -> bool {
    segments.iter().any(|segment| glob.is_match(segment))
}

/// A pattern set compiled against a fixed scan root.
///
/// Compilation happens once; [`Matcher::should_ignore`] is then a pure
/// function of the path.
#[derive(Debug)]
pub struct Matcher {
    rules: Vec<Rule>,
    base_path: PathBuf,
}

impl Matcher {
    /// Compile every pattern in `patterns` against `base_path`.
    pub fn new(patterns: &PatternSet, base_path: &Path) -> Result<Self> {
        let rules = patterns
            .iter()
            .map(|pattern| Rule::new(pattern, base_path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            base_path: base_path.to_path_buf(),
        })
    }

    /// Whether `path` matches any pattern via any candidate form.
    pub fn should_ignore(&self, path: &Path) -> bool {
        let candidates = Candidates::new(path, &self.base_path);
        self.rules.iter().any(|rule| rule.matches(&candidates))
    }
}

/// One-shot form of [`Matcher::should_ignore`].
///
/// Compiles the pattern set on every call; callers testing many paths should
/// build a [`Matcher`] instead.
pub fn should_ignore(path: &Path, base_path: &Path, patterns: &PatternSet) -> Result<bool> {
    Ok(Matcher::new(patterns, base_path)?.should_ignore(path))
}

/// Lexically normalize a path: drop `.` components and resolve `..` against
/// preceding segments, without touching the filesystem.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            _ => normalized.push(component.as_os_str()),
        }
    }

    normalized
}
