//! Digest rendering and console output
//!
//! Every format is a thin presentation wrapper over the same annotated node
//! tree: a tree view, a summary block, and the non-ignored text contents.
//! Digest files always render with sizes and ignored entries visible; the
//! colored console tree respects the display flags instead.

use crate::stats::DigestStats;
use crate::{Node, Result};
use clap::ValueEnum;
use colored::*;
use serde::{Deserialize, Serialize};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text digest (default)
    Text,
    /// Markdown digest
    Markdown,
    /// JSON dump of the node tree
    Json,
    /// XML digest
    Xml,
    /// Standalone HTML page
    Html,
}

impl OutputFormat {
    /// File extension for digests in this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => ".txt",
            OutputFormat::Markdown => ".md",
            OutputFormat::Json => ".json",
            OutputFormat::Xml => ".xml",
            OutputFormat::Html => ".html",
        }
    }
}

/// Options for console tree rendering
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Append `(N bytes)` to file entries
    pub show_size: bool,
    /// Render ignored entries with an `[IGNORED]` marker instead of hiding them
    pub show_ignored: bool,
    /// Colorize names, sizes, and markers
    pub color: bool,
}

/// One file's contribution to the digest content section
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Path from the scan root, root name included
    pub path: String,
    /// Decoded text content
    pub content: String,
}

/// Render `node` in the requested digest format.
pub fn format_digest(
    format: OutputFormat,
    node: &Node,
    include_contents: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(node, include_contents)),
        OutputFormat::Markdown => Ok(format_markdown(node, include_contents)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(node)?),
        OutputFormat::Xml => Ok(format_xml(node, include_contents)),
        OutputFormat::Html => Ok(format_html(node, include_contents)),
    }
}

/// Generate the `└── name` tree view of a subtree.
pub fn generate_tree_string(node: &Node, options: &TreeOptions) -> String {
    let mut out = String::new();
    write_tree_entry(&mut out, node, "", true, options);
    out
}

fn write_tree_entry(
    out: &mut String,
    node: &Node,
    prefix: &str,
    is_last: bool,
    options: &TreeOptions,
) {
    if node.is_ignored() && !options.show_ignored {
        return;
    }

    let connector = if is_last { "└── " } else { "├── " };
    out.push_str(prefix);
    if options.color {
        out.push_str(&connector.green().to_string());
        out.push_str(&node.name().blue().to_string());
    } else {
        out.push_str(connector);
        out.push_str(node.name());
    }

    if let Node::File(file) = node {
        if options.show_size {
            let size_str = format!(" ({} bytes)", file.size);
            if options.color {
                out.push_str(&size_str.yellow().to_string());
            } else {
                out.push_str(&size_str);
            }
        }
    }

    if node.is_ignored() {
        if options.color {
            out.push_str(&" [IGNORED]".red().to_string());
        } else {
            out.push_str(" [IGNORED]");
        }
    }

    out.push('\n');

    if let Node::Directory(dir) = node {
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        let visible: Vec<&Node> = dir
            .children
            .iter()
            .filter(|child| options.show_ignored || !child.is_ignored())
            .collect();
        for (i, child) in visible.iter().enumerate() {
            write_tree_entry(out, child, &child_prefix, i == visible.len() - 1, options);
        }
    }
}

/// Collect the contents that belong in a digest: non-ignored text files
/// whose content is real (not the non-text placeholder).
pub fn collect_contents(node: &Node) -> Vec<FileContent> {
    let mut contents = Vec::new();
    collect_contents_inner(node, "", &mut contents);
    contents
}

fn collect_contents_inner(node: &Node, path: &str, contents: &mut Vec<FileContent>) {
    match node {
        Node::File(file) => {
            if !file.is_ignored && file.is_text && file.content != crate::node::NON_TEXT_PLACEHOLDER
            {
                contents.push(FileContent {
                    path: join_digest_path(path, &file.name),
                    content: file.content.clone(),
                });
            }
        }
        Node::Directory(dir) => {
            let dir_path = join_digest_path(path, &dir.name);
            for child in &dir.children {
                collect_contents_inner(child, &dir_path, contents);
            }
        }
    }
}

fn join_digest_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", base, name)
    }
}

/// Generate the plain summary block shared by the text formats.
pub fn generate_summary_string(stats: &DigestStats) -> String {
    let mut summary = String::from("\nSummary:\n");
    summary.push_str(&format!("Total files analyzed: {}\n", stats.file_count));
    summary.push_str(&format!(
        "Total directories analyzed: {}\n",
        stats.dir_count
    ));
    summary.push_str(&format!(
        "Total text file size (including ignored): {}\n",
        format_kb(stats.total_size)
    ));
    summary.push_str(&format!(
        "Analyzed text content size: {}\n",
        format_kb(stats.text_content_size)
    ));
    summary.push_str(&format!("Total tokens: {}\n", stats.total_tokens));
    summary
}

fn format_text(node: &Node, include_contents: bool) -> String {
    let stats = DigestStats::from_node(node);
    let tree_options = TreeOptions {
        show_size: true,
        show_ignored: true,
        color: false,
    };

    let mut output = format!("Codebase Analysis for: {}\n", node.name());
    output.push_str("\nDirectory Structure:\n");
    output.push_str(&generate_tree_string(node, &tree_options));
    output.push_str(&generate_summary_string(&stats));

    if include_contents {
        output.push_str("\nFile Contents:\n");
        for file in collect_contents(node) {
            output.push_str(&format!("\n{}\n", "=".repeat(50)));
            output.push_str(&format!("File: {}\n", file.path));
            output.push_str(&format!("{}\n", "=".repeat(50)));
            output.push_str(&file.content);
            output.push('\n');
        }
    }

    output
}

fn format_markdown(node: &Node, include_contents: bool) -> String {
    let stats = DigestStats::from_node(node);
    let tree_options = TreeOptions {
        show_size: true,
        show_ignored: true,
        color: false,
    };

    let mut output = format!("# Codebase Analysis for: {}\n\n", node.name());
    output.push_str("## Directory Structure\n\n");
    output.push_str("```\n");
    output.push_str(&generate_tree_string(node, &tree_options));
    output.push_str("```\n\n");
    output.push_str("## Summary\n\n");
    output.push_str(&format!("- Total files: {}\n", stats.file_count));
    output.push_str(&format!("- Total directories: {}\n", stats.dir_count));
    output.push_str(&format!(
        "- Total text file size (including ignored): {}\n",
        format_kb(stats.total_size)
    ));
    output.push_str(&format!("- Total tokens: {}\n", stats.total_tokens));
    output.push_str(&format!(
        "- Analyzed text content size: {}\n",
        format_kb(stats.text_content_size)
    ));

    if include_contents {
        output.push_str("\n## File Contents\n\n");
        for file in collect_contents(node) {
            output.push_str(&format!(
                "### {}\n\n```\n{}\n```\n\n",
                file.path, file.content
            ));
        }
    }

    output
}

fn format_xml(node: &Node, include_contents: bool) -> String {
    let stats = DigestStats::from_node(node);
    let tree_options = TreeOptions {
        show_size: true,
        show_ignored: true,
        color: false,
    };

    let mut output = String::from("<codebase-analysis>\n");
    output.push_str(&format!("  <name>{}</name>\n", escape_xml(node.name())));
    output.push_str(&format!(
        "  <directory-structure>{}</directory-structure>\n",
        escape_xml(&generate_tree_string(node, &tree_options))
    ));
    output.push_str("  <summary>\n");
    output.push_str(&format!(
        "    <total-files>{}</total-files>\n",
        stats.file_count
    ));
    output.push_str(&format!(
        "    <total-directories>{}</total-directories>\n",
        stats.dir_count
    ));
    output.push_str(&format!(
        "    <total-text-file-size-kb>{:.2}</total-text-file-size-kb>\n",
        stats.total_size as f64 / 1024.0
    ));
    output.push_str(&format!(
        "    <total-tokens>{}</total-tokens>\n",
        stats.total_tokens
    ));
    output.push_str(&format!(
        "    <analyzed-text-content-size-kb>{:.2}</analyzed-text-content-size-kb>\n",
        stats.text_content_size as f64 / 1024.0
    ));
    output.push_str("  </summary>\n");
    output.push_str("  <file-contents>\n");
    if include_contents {
        for file in collect_contents(node) {
            output.push_str("    <file>\n");
            output.push_str(&format!("      <path>{}</path>\n", escape_xml(&file.path)));
            output.push_str(&format!(
                "      <content>{}</content>\n",
                escape_xml(&file.content)
            ));
            output.push_str("    </file>\n");
        }
    }
    output.push_str("  </file-contents>\n");
    output.push_str("</codebase-analysis>\n");
    output
}

fn format_html(node: &Node, include_contents: bool) -> String {
    let stats = DigestStats::from_node(node);
    let tree_options = TreeOptions {
        show_size: true,
        show_ignored: true,
        color: false,
    };
    let name = escape_html(node.name());

    let mut output = format!(
        "<html>\n<head>\n<title>Codebase Analysis for: {name}</title>\n\
         <style>\npre {{ white-space: pre-wrap; word-wrap: break-word; }}\n</style>\n\
         </head>\n<body>\n<h1>Codebase Analysis for: {name}</h1>\n"
    );
    output.push_str("<h2>Directory Structure</h2>\n");
    output.push_str(&format!(
        "<pre>{}</pre>\n",
        escape_html(&generate_tree_string(node, &tree_options))
    ));
    output.push_str("<h2>Summary</h2>\n<ul>\n");
    output.push_str(&format!("<li>Total files: {}</li>\n", stats.file_count));
    output.push_str(&format!(
        "<li>Total directories: {}</li>\n",
        stats.dir_count
    ));
    output.push_str(&format!(
        "<li>Total text file size (including ignored): {}</li>\n",
        format_kb(stats.total_size)
    ));
    output.push_str(&format!("<li>Total tokens: {}</li>\n", stats.total_tokens));
    output.push_str(&format!(
        "<li>Analyzed text content size: {}</li>\n",
        format_kb(stats.text_content_size)
    ));
    output.push_str("</ul>\n");

    if include_contents {
        output.push_str("<h2>File Contents</h2>\n");
        for file in collect_contents(node) {
            output.push_str(&format!(
                "<h3>{}</h3><pre>{}</pre>\n",
                escape_html(&file.path),
                escape_html(&file.content)
            ));
        }
    }

    output.push_str("</body></html>\n");
    output
}

/// Print the colored console summary: framed banner, tree, and stats.
pub fn print_console_summary(node: &Node, stats: &DigestStats, options: &TreeOptions) {
    print_frame("Analysis Summary", options.color);
    print!("{}", generate_tree_string(node, options));

    let summary = generate_summary_string(stats);
    if options.color {
        println!("{}", summary.cyan());
    } else {
        println!("{}", summary);
    }
}

/// Print a framed banner line.
pub fn print_frame(text: &str, color: bool) {
    let width = text.lines().map(str::len).max().unwrap_or(0) + 4;
    let border = format!("+{}+", "-".repeat(width - 2));

    if color {
        println!("{}", border.cyan());
        for line in text.lines() {
            println!(
                "{} {} {}",
                "|".cyan(),
                format!("{:<1$}", line, width - 4).white(),
                "|".cyan()
            );
        }
        println!("{}", border.cyan());
    } else {
        println!("{}", border);
        for line in text.lines() {
            println!("| {:<1$} |", line, width - 4);
        }
        println!("{}", border);
    }
}

/// Format a byte count as KB with two decimals.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
