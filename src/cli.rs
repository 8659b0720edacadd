//! Command-line interface argument parsing
//!
//! This module defines all command-line arguments and options for cdigest
//! using the clap crate with derive macros for a clean, declarative API.

use crate::formatter::OutputFormat;
use clap::Parser;

/// cdigest - Consolidate a codebase into a structured digest
///
/// Walks a directory tree, classifies files as text or binary, applies
/// ignore patterns, and writes a digest (tree view, file contents, summary
/// statistics) in text, markdown, JSON, XML, or HTML form.
#[derive(Parser, Debug, Clone)]
#[command(name = "cdigest")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The directory to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: String,

    /// Maximum depth for directory traversal
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Output format
    #[arg(short = 'o', long, value_enum, value_name = "FORMAT")]
    pub output_format: Option<OutputFormat>,

    /// Output file name (default: <directory_name>_codebase_digest.<format_extension>)
    #[arg(short = 'f', long, value_name = "NAME")]
    pub file: Option<String>,

    /// Show file sizes in the console tree
    #[arg(long)]
    pub show_size: bool,

    /// Show ignored files and directories in the console tree
    #[arg(long)]
    pub show_ignored: bool,

    /// Additional patterns to ignore, added to the other enabled sources.
    /// Patterns can use wildcards (* and ?) and can be filenames
    /// (file.txt), directory names (node_modules), extensions (*.pyc),
    /// or paths (/path/to/ignore)
    #[arg(long, value_name = "PATTERN", num_args = 1..)]
    pub ignore: Vec<String>,

    /// Do not use the built-in default ignore patterns
    #[arg(long)]
    pub no_default_ignores: bool,

    /// Do not read .gitignore from the scan root
    #[arg(long)]
    pub no_gitignore: bool,

    /// Do not read .cdigestignore from the scan root
    #[arg(long)]
    pub no_ignore_file: bool,

    /// Include version-control metadata (.git) in the analysis
    #[arg(long)]
    pub include_vcs: bool,

    /// Exclude file contents from the digest
    #[arg(long)]
    pub no_content: bool,

    /// Maximum allowed text content size in KB (default: 10240 KB)
    #[arg(long, value_name = "KB")]
    pub max_size: Option<u64>,

    /// Disable colored console output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            max_depth: None,
            output_format: None,
            file: None,
            show_size: false,
            show_ignored: false,
            ignore: Vec::new(),
            no_default_ignores: false,
            no_gitignore: false,
            no_ignore_file: false,
            include_vcs: false,
            no_content: false,
            max_size: None,
            no_color: false,
            verbose: false,
        }
    }
}
