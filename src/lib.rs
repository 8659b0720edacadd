//! cdigest - Consolidate and analyze codebases for insights
//!
//! This crate walks a directory tree, classifies files as text or binary,
//! applies ignore patterns merged from several sources, and produces a
//! structured digest (tree view + file contents + summary statistics) in
//! multiple output formats.
//!
//! # Features
//!
//! - **Ignore patterns**: defaults, `.gitignore`, `.cdigestignore`, and
//!   command-line patterns merged into one set with shell-glob matching
//! - **Annotated tree**: ignored entries are marked, not pruned, so they can
//!   still be displayed
//! - **Text/binary classification**: bounded byte probe with lenient UTF-8
//!   decoding for text content
//! - **Rollup statistics**: file/directory counts, sizes, and a
//!   deterministic token count
//! - **Five output formats**: text, markdown, JSON, XML, and HTML
//! - **Configuration**: support for a ~/.cdigest.toml config file

pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod matcher;
pub mod node;
pub mod patterns;
pub mod stats;
pub mod walker;

pub use cli::Args;
pub use config::Config;
pub use error::{Error, Result};
pub use formatter::{FileContent, OutputFormat, TreeOptions};
pub use matcher::{should_ignore, Matcher};
pub use node::{DirectoryNode, FileNode, Node};
pub use patterns::{load_patterns, PatternOptions, PatternSet, DEFAULT_IGNORE_PATTERNS};
pub use stats::DigestStats;
pub use walker::{analyze, AnalyzeOptions, Analyzer, Warning};

use colored::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Main entry point for a digest run
///
/// # Arguments
///
/// * `path` - The root directory to analyze
/// * `args` - Command line arguments parsed by clap
/// * `config` - Configuration loaded from ~/.cdigest.toml (if it exists)
///
/// # Returns
///
/// Returns Ok(()) on success, or an Error if something goes wrong
///
/// # Example
///
/// ```no_run
/// use cdigest::{run_digest, Args, Config};
/// use std::path::Path;
///
/// let args = Args::default();
/// let config = Config::default();
/// run_digest(Path::new("."), &args, &config).unwrap();
/// ```
pub fn run_digest(path: &Path, args: &Args, config: &Config) -> Result<()> {
    log::debug!("Starting digest run at: {:?}", path);

    let color = !args.no_color
        && atty::is(atty::Stream::Stdout)
        && std::env::var("NO_COLOR").is_err();

    let pattern_options = PatternOptions {
        use_defaults: !args.no_default_ignores && config.ignore.use_defaults,
        use_ignore_file: !args.no_ignore_file && config.ignore.use_ignore_file,
        use_gitignore: !args.no_gitignore && config.ignore.use_gitignore,
        extra: args
            .ignore
            .iter()
            .chain(config.ignore.patterns.iter())
            .cloned()
            .collect::<BTreeSet<String>>(),
    };
    let patterns = load_patterns(path, &pattern_options)?;

    formatter::print_frame("Codebase Digest", color);
    if color {
        println!(
            "{}{}",
            "Analyzing directory: ".cyan(),
            path.display().to_string().white()
        );
    } else {
        println!("Analyzing directory: {}", path.display());
    }

    let analyze_options = AnalyzeOptions {
        max_depth: args.max_depth,
        include_vcs: args.include_vcs,
    };
    let mut analyzer = Analyzer::new(path, &patterns, analyze_options)?;
    let tree = Node::Directory(analyzer.analyze(path)?);

    for warning in analyzer.warnings() {
        if color {
            eprintln!("{}", format!("Warning: {}", warning).yellow());
        } else {
            eprintln!("Warning: {}", warning);
        }
    }

    let stats = DigestStats::from_node(&tree);
    let max_size_kb = args.max_size.unwrap_or(config.output.max_size_kb);
    let estimated_kb = stats.estimated_output_size() as f64 / 1024.0;
    println!("Estimated output size: {:.2} KB", estimated_kb);

    if estimated_kb > max_size_kb as f64 {
        let message = format!(
            "Warning: The estimated output size ({:.2} KB) exceeds the maximum allowed size ({} KB).",
            estimated_kb, max_size_kb
        );
        if color {
            eprintln!("{}", message.yellow());
        } else {
            eprintln!("{}", message);
        }
    }

    let format = args
        .output_format
        .or(config.output.format)
        .unwrap_or(OutputFormat::Text);
    let output = formatter::format_digest(format, &tree, !args.no_content)?;

    let file_name = args.file.clone().unwrap_or_else(|| {
        format!("{}_codebase_digest{}", tree.name(), format.extension())
    });
    fs::write(&file_name, &output)?;

    let saved_path = fs::canonicalize(&file_name).unwrap_or_else(|_| PathBuf::from(&file_name));
    if color {
        println!(
            "\n{}",
            format!("Analysis saved to: {}", saved_path.display()).green()
        );
    } else {
        println!("\nAnalysis saved to: {}", saved_path.display());
    }

    let tree_options = TreeOptions {
        show_size: args.show_size || config.display.show_size,
        show_ignored: args.show_ignored || config.display.show_ignored,
        color,
    };
    formatter::print_console_summary(&tree, &stats, &tree_options);

    Ok(())
}
