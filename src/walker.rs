//! Recursive directory analysis
//!
//! A single-pass, depth-first, synchronous walk. Every entry is tested
//! against the ignore matcher before it is processed, and ignored entries
//! are kept in the tree with `is_ignored` set instead of being pruned, so
//! formatters can still render them. The one exception is the VCS metadata
//! directory, which produces no node at all unless explicitly included.
//!
//! Each recursive call owns its subtree exclusively until it hands the node
//! back to its parent; the finished tree is read-only.

use crate::node::NON_TEXT_PLACEHOLDER;
use crate::stats::probe_is_text;
use crate::{DirectoryNode, FileNode, Matcher, Node, PatternSet, Result};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory holding version-control internals, skipped invisibly by default.
pub const VCS_METADATA_DIR: &str = ".git";

/// Options controlling a directory walk
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Stop recursing below this depth (root is depth 0); branches past the
    /// limit are omitted entirely
    pub max_depth: Option<usize>,
    /// Include the VCS metadata directory instead of skipping it
    pub include_vcs: bool,
}

/// A recoverable problem encountered during a walk
#[derive(Debug, Clone)]
pub struct Warning {
    /// Directory that could not be fully listed
    pub path: PathBuf,
    /// The underlying error message
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not fully read {}: {}", self.path.display(), self.message)
    }
}

/// Walks a directory tree and produces an annotated [`Node`] tree
pub struct Analyzer {
    matcher: Matcher,
    options: AnalyzeOptions,
    warnings: Vec<Warning>,
}

impl Analyzer {
    /// Compile `patterns` against `base_path` and prepare a walk.
    pub fn new(base_path: &Path, patterns: &PatternSet, options: AnalyzeOptions) -> Result<Self> {
        let base_path = base_path.canonicalize()?;
        let matcher = Matcher::new(patterns, &base_path)?;

        Ok(Self {
            matcher,
            options,
            warnings: Vec::new(),
        })
    }

    /// Analyze the tree rooted at `path`.
    ///
    /// Recoverable problems (directories that could not be fully listed) are
    /// collected and available from [`Analyzer::warnings`] afterwards; any
    /// other I/O failure aborts the walk.
    pub fn analyze(&mut self, path: &Path) -> Result<DirectoryNode> {
        let path = path.canonicalize()?;
        log::debug!("Analyzing directory tree at {:?}", path);
        self.analyze_directory(&path, 0)
    }

    /// Warnings collected by previous [`Analyzer::analyze`] calls
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    fn analyze_directory(&mut self, path: &Path, depth: usize) -> Result<DirectoryNode> {
        let mut node = DirectoryNode::new(node_name(path));

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                self.warn(path, &e);
                return Ok(node);
            }
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                    // Keep whatever was enumerable before the failure.
                    self.warn(path, &e);
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            let entry_path = entry.path();
            let entry_name = entry.file_name().to_string_lossy().into_owned();

            if !self.options.include_vcs && entry_name == VCS_METADATA_DIR {
                continue;
            }

            // Matcher verdict comes first; it decides annotation, never
            // whether the entry is visited.
            let is_ignored = self.matcher.should_ignore(&entry_path);

            if entry.file_type()?.is_dir() {
                if self
                    .options
                    .max_depth
                    .is_some_and(|max_depth| depth + 1 > max_depth)
                {
                    continue;
                }
                let mut child = self.analyze_directory(&entry_path, depth + 1)?;
                child.is_ignored = is_ignored;
                node.children.push(Node::Directory(child));
            } else {
                node.children
                    .push(self.analyze_file(&entry_path, entry_name, is_ignored)?);
            }
        }

        Ok(node)
    }

    /// Build a file node: size from metadata, then classify, then read.
    ///
    /// Classification runs on ignored files too; a file that probes as text
    /// but fails the full read keeps a readable error placeholder instead of
    /// aborting the walk.
    fn analyze_file(&mut self, path: &Path, name: String, is_ignored: bool) -> Result<Node> {
        let metadata = fs::symlink_metadata(path)?;
        let is_text = probe_is_text(path);

        let content = if is_text {
            match fs::read(path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    log::warn!("Failed to read {:?}: {}", path, e);
                    format!("[Error reading file: {}]", e)
                }
            }
        } else {
            NON_TEXT_PLACEHOLDER.to_string()
        };

        Ok(Node::File(FileNode {
            name,
            size: metadata.len(),
            content,
            is_text,
            is_ignored,
        }))
    }

    fn warn(&mut self, path: &Path, error: &std::io::Error) {
        let warning = Warning {
            path: path.to_path_buf(),
            message: error.to_string(),
        };
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Analyze `path` in one call, logging any recoverable warnings.
pub fn analyze(
    path: &Path,
    patterns: &PatternSet,
    base_path: &Path,
    options: &AnalyzeOptions,
) -> Result<DirectoryNode> {
    let mut analyzer = Analyzer::new(base_path, patterns, options.clone())?;
    analyzer.analyze(path)
}

/// Final path segment of `path`, or the whole path when there is none.
fn node_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
