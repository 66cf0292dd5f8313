//! Console output for the operator: status lines and the final summary.
//!
//! Diagnostics go through [crate::logging]; this module only prints what
//! the user asked to see.

use console::style;

use crate::cli::PublishReport;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Lines describing a finished (or planned) publish, without styling
pub fn summary_lines(app_name: &str, report: &PublishReport, dry_run: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "{} {} (version from {}, revision {})",
        app_name, report.version, report.source, report.short_revision
    )];

    lines.push("Tags:".to_string());
    for tag in &report.tags {
        lines.push(format!("  - {}", tag));
    }

    lines.push("Build arguments:".to_string());
    for (key, value) in &report.build_args {
        lines.push(format!("  {}={}", key, value));
    }

    if dry_run {
        lines.push(format!("Would run: {}", report.invocation));
    } else if report.pushed {
        lines.push("Image built and pushed".to_string());
    } else {
        lines.push("Image built locally (not pushed)".to_string());
    }
    lines
}

/// Print the publish summary to stdout
pub fn display_report(app_name: &str, report: &PublishReport, dry_run: bool) {
    let lines = summary_lines(app_name, report, dry_run);
    if let Some((headline, rest)) = lines.split_first() {
        println!();
        display_success(headline);
        for line in rest {
            println!("{}", line);
        }
    }
}
