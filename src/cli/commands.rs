use crate::analysis::{analyze_files, AnalysisOptions, AnalysisReport};
use crate::error::{InsightError, InsightResult};
use crate::report::text::{format_money, format_number, render_variance_table};
use crate::report::{build_prompt, excel, NarrativeRequest, QuickNarrative};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Execute the analyze command - estimate vs actual comparison
pub fn analyze(
    estimate: PathBuf,
    actual: PathBuf,
    project_name: String,
    sheet: Option<String>,
    output: Option<PathBuf>,
    show_prompt: bool,
    verbose: bool,
) -> InsightResult<()> {
    println!("{}", "📊 Insight - Estimate vs Actual Analysis".bold().green());
    println!("   Project: {}", project_name.bright_yellow().bold());
    println!("   Estimate: {}", estimate.display());
    println!("   Actual: {}\n", actual.display());

    if verbose {
        println!("{}", "📖 Loading workbooks...".cyan());
    }

    let options = AnalysisOptions {
        project_name,
        sheet,
    };
    let report = analyze_files(&estimate, &actual, &options, &QuickNarrative)?;

    if verbose {
        println!(
            "   Analyzed {} categories ({} matched)\n",
            report.variance.len(),
            report.match_report.match_summary.total_matched
        );
    }

    print_variance_table(&report);
    print_match_report(&report);
    print_summary(&report);

    println!("\n{}", "📝 Narrative:".bold().cyan());
    for line in report.narrative.lines() {
        println!("   {}", line);
    }

    if show_prompt {
        let variance_table = render_variance_table(&report.variance);
        let prompt = build_prompt(&NarrativeRequest {
            project_name: &report.project_name,
            variance_table: &variance_table,
            summary: &report.summary,
        });
        println!("\n{}", "🤖 Narrative prompt (for an external model):".bold().cyan());
        println!("{}", prompt.dimmed());
    }

    if let Some(output_path) = output {
        write_report(&output_path, &report)?;
        println!(
            "\n{}",
            format!("✅ Report exported to {}", output_path.display())
                .bold()
                .green()
        );
    }

    Ok(())
}

/// Print variance rows as a colored table
fn print_variance_table(report: &AnalysisReport) {
    println!("{}", "📊 Variance Analysis:".bold().cyan());
    println!("{}", "─".repeat(74));
    println!(
        "{:<20} {:>12} {:>12} {:>12} {:>10}",
        "Category".bold(),
        "Estimated".bold(),
        "Actual".bold(),
        "Variance".bold(),
        "Var %".bold()
    );
    println!("{}", "─".repeat(74));

    for row in &report.variance {
        let variance_str = format_number(row.variance);
        let pct_str = format!("{:.1}%", row.variance_pct);

        // Positive variance = over budget
        let (variance_colored, pct_colored) = if row.variance > 0.0 {
            (variance_str.red(), pct_str.red())
        } else if row.variance < 0.0 {
            (variance_str.green(), pct_str.green())
        } else {
            (variance_str.normal(), pct_str.normal())
        };

        println!(
            "{:<20} {:>12} {:>12} {:>12} {:>10}",
            row.category.bright_blue(),
            format_number(row.estimated),
            format_number(row.actual),
            variance_colored,
            pct_colored
        );
    }
    println!("{}", "─".repeat(74));
}

/// Print the category-match breakdown
fn print_match_report(report: &AnalysisReport) {
    let summary = &report.match_report.match_summary;

    println!("\n{}", "🔗 Category Matching:".bold().cyan());
    println!(
        "   {} matched on both sides",
        summary.total_matched.to_string().green()
    );
    println!(
        "   {} only in estimate (no actual spend recorded)",
        summary.total_estimate_only.to_string().yellow()
    );
    if report.match_report.actual_only.is_empty() {
        println!(
            "   {} only in actual (unbudgeted costs)",
            summary.total_actual_only.to_string().yellow()
        );
    } else {
        let names: Vec<&str> = report
            .match_report
            .actual_only
            .iter()
            .take(3)
            .map(|c| c.category.as_str())
            .collect();
        let mut listing = names.join(", ");
        if report.match_report.actual_only.len() > 3 {
            listing.push_str(&format!(
                " (+{} more)",
                report.match_report.actual_only.len() - 3
            ));
        }
        println!(
            "   {} only in actual (unbudgeted costs: {})",
            summary.total_actual_only.to_string().yellow(),
            listing
        );
    }
    println!("   Match rate: {:.0}%", summary.match_rate_pct);
}

/// Print the aggregate summary block
fn print_summary(report: &AnalysisReport) {
    let summary = &report.summary;

    println!("\n{}", "📈 Summary:".bold().cyan());
    println!(
        "   Total estimated: {}",
        format_money(summary.total_estimated)
    );
    println!("   Total actual:    {}", format_money(summary.total_actual));

    let variance_line = format!(
        "{} ({:.1}%)",
        format_money(summary.total_variance),
        summary.total_variance_pct
    );
    if summary.total_variance > 0.0 {
        println!("   Net variance:    {}", variance_line.red());
    } else {
        println!("   Net variance:    {}", variance_line.green());
    }

    println!(
        "   {} over budget, {} under budget",
        summary.over_budget_categories.to_string().red(),
        summary.under_budget_categories.to_string().green()
    );

    if let Some(category) = &summary.biggest_overrun.category {
        println!(
            "   Biggest overrun:  {} ({})",
            category.bright_blue(),
            format_money(summary.biggest_overrun.amount).red()
        );
    }
    if let Some(category) = &summary.biggest_underrun.category {
        println!(
            "   Biggest underrun: {} ({})",
            category.bright_blue(),
            format_money(summary.biggest_underrun.amount).green()
        );
    }
}

/// Write the report to disk, format chosen by extension (.xlsx or .json)
fn write_report(output: &Path, report: &AnalysisReport) -> InsightResult<()> {
    let extension = output.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension {
        "xlsx" => excel::export_workbook(
            output,
            &report.variance,
            &report.match_report,
            &report.summary,
        ),
        "json" => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|e| InsightError::Export(e.to_string()))?;
            fs::write(output, json)
                .map_err(|e| InsightError::Export(format!("failed to write file: {}", e)))?;
            Ok(())
        }
        _ => Err(InsightError::Export(format!(
            "Unsupported output format: '{}'. Use .xlsx or .json",
            extension
        ))),
    }
}
