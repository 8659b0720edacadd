//! Text classification, token counting, and summary statistics
//!
//! The text/binary probe reads a bounded prefix of the file and checks every
//! byte against an allowed set, the same way `grep` and friends sniff for
//! binary data. Token counting is a deterministic local approximation; it
//! does not depend on any model vocabulary.

use crate::Node;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How many leading bytes the text/binary probe inspects.
const PROBE_LEN: usize = 1024;

/// Snapshot of the rollup statistics every formatter needs.
#[derive(Debug, Clone, Default)]
pub struct DigestStats {
    /// Number of files, ignored entries included
    pub file_count: usize,
    /// Number of directories, ignored entries included
    pub dir_count: usize,
    /// Size in bytes of all files, ignored entries included
    pub total_size: u64,
    /// Byte length of text content from non-ignored files
    pub text_content_size: u64,
    /// Token count over all text file content
    pub total_tokens: usize,
}

impl DigestStats {
    /// Fold the rollup queries of `node` into one struct
    pub fn from_node(node: &Node) -> Self {
        Self {
            file_count: node.file_count(),
            dir_count: node.dir_count(),
            total_size: node.total_size(),
            text_content_size: node.non_ignored_text_size(),
            total_tokens: node.total_tokens(),
        }
    }

    /// Rough size in bytes of the digest this tree would produce: the text
    /// content plus ~100 bytes of structure per file plus 1 KB of summary.
    pub fn estimated_output_size(&self) -> u64 {
        self.text_content_size + (self.file_count as u64) * 100 + 1024
    }
}

/// Classify a file as text by probing its first [`PROBE_LEN`] bytes.
///
/// A file is text when every probed byte is in the allowed set: tab, LF, CR,
/// form-feed, escape, or anything from 0x20 up (which keeps UTF-8 multibyte
/// sequences). Any read failure downgrades to "not text" rather than
/// erroring; classification must never abort a walk.
pub fn probe_is_text(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::debug!("Probe failed to open {:?}: {}", path, e);
            return false;
        }
    };

    let mut buffer = [0u8; PROBE_LEN];
    match file.read(&mut buffer) {
        Ok(n) => buffer[..n].iter().all(|&b| is_text_byte(b)),
        Err(e) => {
            log::debug!("Probe failed to read {:?}: {}", path, e);
            false
        }
    }
}

/// Whether a single byte is allowed in text content.
fn is_text_byte(byte: u8) -> bool {
    matches!(byte, b'\t' | b'\n' | b'\r' | 0x0c | 0x1b) || byte >= 0x20
}

/// Deterministic token count for a piece of text.
///
/// Each run of alphanumeric characters (plus `_`) counts as one token and
/// every other non-whitespace character counts as its own token. This tracks
/// subword tokenizers closely enough for size estimation and is stable
/// across runs and platforms.
pub fn count_tokens(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            if !in_word {
                count += 1;
                in_word = true;
            }
        } else {
            in_word = false;
            if !ch.is_whitespace() {
                count += 1;
            }
        }
    }

    count
}
