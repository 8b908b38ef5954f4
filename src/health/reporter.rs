//! Formatting and reporting for health check results

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};

use super::check::CheckStatus;
use super::runner::HealthCheckReport;
use crate::build_info;

/// Formats a health check report as a pretty table
pub fn format_report(report: &HealthCheckReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["System", "Status", "Duration", "Message"]);

    for (name, result) in &report.results {
        builder.push_record([
            name.clone(),
            result.status.as_colored_str(),
            format!("{:.2?}", result.duration),
            result.message.clone(),
        ]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut output = format!(
        "{} {}\n",
        "Mini Flight health".bold(),
        build_info::version_string().dimmed()
    );
    output.push_str(&table.to_string());
    output.push('\n');
    output.push_str(&format_summary(report));
    output
}

fn format_summary(report: &HealthCheckReport) -> String {
    let mut summary = format!("\n{}\n", "Summary".bold().underline());
    summary.push_str(&format!("  Total checks: {}\n", report.total));
    summary.push_str(&format!("  {} Passed: {}\n", "✓".green(), report.passed));

    if report.warned > 0 {
        summary.push_str(&format!("  {} Warned: {}\n", "⚠".yellow(), report.warned));
    }
    if report.failed > 0 {
        summary.push_str(&format!("  {} Failed: {}\n", "✗".red(), report.failed));
    }

    let overall = match (report.is_healthy(), report.has_warnings()) {
        (false, _) => "Overall: UNHEALTHY".red().bold(),
        (true, true) => "Overall: HEALTHY (with warnings)".yellow().bold(),
        (true, false) => "Overall: HEALTHY".green().bold(),
    };
    summary.push_str(&format!("\n  {overall}\n"));
    summary
}

/// Prints a health check report to stdout.
///
/// Details are printed for every check when `verbose` is set, otherwise only
/// for checks that did not pass.
pub fn print_report(report: &HealthCheckReport, verbose: bool) {
    println!("{}", format_report(report));

    for (name, result) in &report.results {
        if !verbose && result.status == CheckStatus::Pass {
            continue;
        }
        if let Some(details) = &result.details {
            println!("\n{} Details:", name.bold());
            println!("{details}");
        }
    }
}
