//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every series and work
//! leads with its positional index and title; slugs, tags and image paths are
//! indented context lines underneath. The result reads as an inventory of the
//! portfolio while still letting users trace each entry back to the data file.
//!
//! # Output Format
//!
//! ## Check / group
//!
//! ```text
//! Series
//! 001 Coast (1 work)
//!     Slug: coast
//!     Order: 1
//!     Tags: ink
//!     001 Harbor
//!         Image: images/harbor.jpg
//! 002 Sky Studies (2 works)
//!     Slug: sky-studies
//!     Order: default (9999)
//!     ...
//!
//! Missing files
//!     Sky Studies / Dawn: images/dawn.jpg
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Styles → gallery.3f2a9c1e.css
//! Script → gallery.8b0d44a7.js
//! Copied 14 files from images/, assets/
//! Generated 2 series, 3 works
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::artwork::DEFAULT_ORDER;
use crate::check::MissingFile;
use crate::render::GenerateSummary;
use crate::series::SeriesIndex;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format a series header: positional index + name + work count.
///
/// ```text
/// 001 Sky Studies (2 works)
/// ```
fn series_header(index: usize, name: &str, count: usize) -> String {
    format!(
        "{} {} ({})",
        format_index(index),
        name,
        plural(count, "work", "works")
    )
}

/// Format a work line: titled works show their title, untitled show the file.
///
/// ```text
/// 001 Dawn                  // titled
/// 002 (images/untitled.jpg) // untitled
/// 003 (no image)
/// ```
fn work_line(index: usize, title: &str, image: &str) -> String {
    if !title.is_empty() {
        format!("{} {}", format_index(index), title)
    } else if !image.is_empty() {
        format!("{} ({})", format_index(index), image)
    } else {
        format!("{} (no image)", format_index(index))
    }
}

/// Render an order hint, showing integers without a decimal point.
fn format_order(order: Option<f64>) -> String {
    fn number(n: f64) -> String {
        if n.fract() == 0.0 {
            format!("{}", n as i64)
        } else {
            format!("{n}")
        }
    }
    match order {
        Some(n) => number(n),
        None => format!("default ({})", number(DEFAULT_ORDER)),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

// ============================================================================
// Series inventory
// ============================================================================

/// Format the grouped series in display order.
pub fn format_series_output(index: &SeriesIndex) -> Vec<String> {
    let mut lines = vec!["Series".to_string()];

    if index.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
        return lines;
    }

    for (pos, series) in index.display_order().into_iter().enumerate() {
        lines.push(series_header(pos + 1, &series.name, series.len()));
        let ctx = indent(1);
        lines.push(format!("{ctx}Slug: {}", series.slug));
        lines.push(format!("{ctx}Order: {}", format_order(series.order)));
        if !series.tags.is_empty() {
            let tags: Vec<&str> = series.tags.iter().map(String::as_str).collect();
            lines.push(format!("{ctx}Tags: {}", tags.join(", ")));
        }
        if let Some(desc) = &series.description {
            let truncated = truncate_desc(desc.trim(), 60);
            if !truncated.is_empty() {
                lines.push(format!("{ctx}{truncated}"));
            }
        }
        for (i, work) in series.items.iter().enumerate() {
            lines.push(format!(
                "{ctx}{}",
                work_line(i + 1, &work.title, &work.image_file)
            ));
            if !work.title.is_empty() && !work.image_file.is_empty() {
                lines.push(format!("{}Image: {}", indent(2), work.image_file));
            }
        }
    }

    lines
}

/// Print the series inventory to stdout.
pub fn print_series_output(index: &SeriesIndex) {
    for line in format_series_output(index) {
        println!("{}", line);
    }
}

// ============================================================================
// Reference check
// ============================================================================

/// Format missing image references, one per line under a heading.
///
/// Returns no lines when nothing is missing.
pub fn format_missing_files(missing: &[MissingFile]) -> Vec<String> {
    if missing.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Missing files".to_string()];
    for m in missing {
        let work = if m.title.is_empty() {
            "(untitled)"
        } else {
            m.title.as_str()
        };
        lines.push(format!("{}{} / {}: {}", indent(1), m.series, work, m.path));
    }
    lines
}

pub fn print_missing_files(missing: &[MissingFile]) {
    for line in format_missing_files(missing) {
        println!("{}", line);
    }
}

// ============================================================================
// Build output
// ============================================================================

/// Format the build summary: written files, then totals.
pub fn format_generate_output(summary: &GenerateSummary, copy_dirs: &[String]) -> Vec<String> {
    let mut lines = vec![
        "Home \u{2192} index.html".to_string(),
        format!("Styles \u{2192} {}", summary.assets.css),
        format!("Script \u{2192} {}", summary.assets.js),
    ];

    let copied: Vec<String> = copy_dirs
        .iter()
        .filter(|d| !summary.missing_dirs.contains(d))
        .map(|d| format!("{d}/"))
        .collect();
    if !copied.is_empty() {
        lines.push(format!(
            "Copied {} from {}",
            plural(summary.copied_files, "file", "files"),
            copied.join(", ")
        ));
    }
    for dir in &summary.missing_dirs {
        lines.push(format!("{}Skipped {dir}/ (not found)", indent(1)));
    }

    lines.push(format!(
        "Generated {}, {}",
        plural(summary.series, "series", "series"),
        plural(summary.works, "work", "works")
    ));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary, copy_dirs: &[String]) {
    for line in format_generate_output(summary, copy_dirs) {
        println!("{}", line);
    }
}
