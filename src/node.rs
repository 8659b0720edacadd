//! The analyzed directory tree
//!
//! The walker produces a tree of [`Node`]s: a closed two-variant enum over
//! files and directories. Ignored entries are kept in the tree with
//! `is_ignored` set rather than pruned, so formatters can opt into showing
//! them. Rollup statistics are recursive folds computed on demand; nothing
//! is cached, which is fine for single-shot CLI use.

use crate::stats::count_tokens;
use serde::Serialize;

/// Placeholder content stored for binary and unclassifiable files.
pub const NON_TEXT_PLACEHOLDER: &str = "[Non-text file]";

/// A file or directory in the analyzed tree
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// A regular file
    File(FileNode),
    /// A directory and its children
    Directory(DirectoryNode),
}

/// A single analyzed file
#[derive(Debug, Clone, Serialize)]
pub struct FileNode {
    /// Entry name (not full path)
    pub name: String,
    /// Size in bytes on disk at scan time
    pub size: u64,
    /// Decoded text content, or a placeholder for non-text/unreadable files
    pub content: String,
    /// Whether the content probe classified this file as text
    pub is_text: bool,
    /// Whether an ignore pattern matched this file
    pub is_ignored: bool,
}

/// A directory and the entries found inside it
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryNode {
    /// Entry name (not full path)
    pub name: String,
    /// Whether an ignore pattern matched this directory
    pub is_ignored: bool,
    /// Child nodes in directory-listing order
    pub children: Vec<Node>,
}

impl DirectoryNode {
    /// Create an empty directory node
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            is_ignored: false,
            children: Vec::new(),
        }
    }
}

impl Node {
    /// Entry name (final path segment)
    pub fn name(&self) -> &str {
        match self {
            Node::File(file) => &file.name,
            Node::Directory(dir) => &dir.name,
        }
    }

    /// Whether an ignore pattern matched this entry
    pub fn is_ignored(&self) -> bool {
        match self {
            Node::File(file) => file.is_ignored,
            Node::Directory(dir) => dir.is_ignored,
        }
    }

    /// Total number of files in this subtree, ignored entries included
    pub fn file_count(&self) -> usize {
        match self {
            Node::File(_) => 1,
            Node::Directory(dir) => dir.children.iter().map(Node::file_count).sum(),
        }
    }

    /// Total number of directories below this node, ignored entries included.
    ///
    /// A directory does not count itself, so the rollup on the scan root is
    /// the number of descendant directories.
    pub fn dir_count(&self) -> usize {
        match self {
            Node::File(_) => 0,
            Node::Directory(dir) => dir
                .children
                .iter()
                .map(|child| match child {
                    Node::File(_) => 0,
                    Node::Directory(_) => 1 + child.dir_count(),
                })
                .sum(),
        }
    }

    /// Total size in bytes of every file in this subtree, ignored included
    pub fn total_size(&self) -> u64 {
        match self {
            Node::File(file) => file.size,
            Node::Directory(dir) => dir.children.iter().map(Node::total_size).sum(),
        }
    }

    /// Byte length of text content that will actually appear in a digest.
    ///
    /// Any subtree rooted at an ignored node contributes nothing, so an
    /// ignored directory excludes everything below it even if a child were
    /// somehow not marked itself.
    pub fn non_ignored_text_size(&self) -> u64 {
        if self.is_ignored() {
            return 0;
        }
        match self {
            Node::File(file) => {
                if file.is_text {
                    file.content.len() as u64
                } else {
                    0
                }
            }
            Node::Directory(dir) => dir.children.iter().map(Node::non_ignored_text_size).sum(),
        }
    }

    /// Token count over the content of every text file in this subtree,
    /// ignored entries included
    pub fn total_tokens(&self) -> usize {
        match self {
            Node::File(file) => {
                if file.is_text {
                    count_tokens(&file.content)
                } else {
                    0
                }
            }
            Node::Directory(dir) => dir.children.iter().map(Node::total_tokens).sum(),
        }
    }
}
