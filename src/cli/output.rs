use std::fmt::Write as _;

use serde::Serialize;

use crate::compliance::BatchReport;
use crate::diff::escape_html;
use crate::operations::DiffReport;

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format_error(&e))
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}

/// Standalone page showing both views side by side.
#[must_use]
pub fn render_diff_page(report: &DiffReport) -> String {
    let old_name = escape_html(&report.old_name);
    let new_name = escape_html(&report.new_name);
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(page, "<title>{old_name} vs {new_name}</title>");
    page.push_str(
        "<style>\n\
         .columns { display: flex; gap: 1em; }\n\
         .column { flex: 1; min-width: 0; border: 1px solid #ddd; padding: 0.5em; }\n\
         .warning { color: #a00; }\n\
         </style>\n</head>\n<body>\n",
    );
    for warning in &report.warnings {
        let _ = writeln!(page, "<p class=\"warning\">{}</p>", escape_html(warning));
    }
    page.push_str("<div class=\"columns\">\n");
    let _ = writeln!(
        page,
        "<div class=\"column\">\n<h3>Old version · {old_name}</h3>\n{}\n</div>",
        report.old_html
    );
    let _ = writeln!(
        page,
        "<div class=\"column\">\n<h3>New version · {new_name}</h3>\n{}\n</div>",
        report.new_html
    );
    let _ = writeln!(
        page,
        "</div>\n<p>similarity {:.1}% · {} inserted · {} deleted</p>\n</body>\n</html>",
        report.stats.ratio * 100.0,
        report.stats.inserted,
        report.stats.deleted
    );
    page
}

/// Markdown document with one section per analyzed regulation.
///
/// The model's reply is already Markdown and is embedded unchanged.
#[must_use]
pub fn render_markdown_report(report: &BatchReport) -> String {
    let mut out = String::from("# Compliance report\n");
    if report.cancelled {
        out.push_str("\n> Cancelled: the results below are incomplete.\n");
    }
    for result in &report.results {
        let _ = write!(out, "\n## {}\n\n{}\n", result.filename, result.content.trim_end());
    }
    if !report.failures.is_empty() {
        out.push_str("\n## Failed\n\n");
        for failure in &report.failures {
            let _ = writeln!(out, "- {}: {}", failure.filename, failure.error);
        }
    }
    if !report.warnings.is_empty() {
        out.push_str("\n## Warnings\n\n");
        for warning in &report.warnings {
            let _ = writeln!(out, "- {warning}");
        }
    }
    if !report.skipped.is_empty() {
        let _ = writeln!(out, "\nSkipped: {}", report.skipped.join(", "));
    }
    out
}
