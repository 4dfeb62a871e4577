//! Excel report export - variance analysis → .xlsx workbook

use crate::error::{InsightError, InsightResult};
use crate::types::{CategoryMatchReport, SummaryStatistics, VarianceRow};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Write the full analysis (variance rows, category match report, summary
/// statistics) as a three-sheet Excel workbook.
pub fn export_workbook(
    output: &Path,
    variance: &[VarianceRow],
    match_report: &CategoryMatchReport,
    summary: &SummaryStatistics,
) -> InsightResult<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    write_variance_sheet(workbook.add_worksheet(), variance, &header_format);
    write_match_sheet(workbook.add_worksheet(), match_report, &header_format);
    write_summary_sheet(workbook.add_worksheet(), summary, &header_format);

    workbook
        .save(output)
        .map_err(|e| InsightError::Export(e.to_string()))?;

    Ok(())
}

fn write_variance_sheet(worksheet: &mut Worksheet, variance: &[VarianceRow], header: &Format) {
    worksheet.set_name("Variance").ok();
    worksheet.set_column_width(0, 20).ok();
    for col in 1..5 {
        worksheet.set_column_width(col, 12).ok();
    }

    worksheet
        .write_string_with_format(0, 0, "Category", header)
        .ok();
    worksheet
        .write_string_with_format(0, 1, "Estimated", header)
        .ok();
    worksheet
        .write_string_with_format(0, 2, "Actual", header)
        .ok();
    worksheet
        .write_string_with_format(0, 3, "Variance", header)
        .ok();
    worksheet
        .write_string_with_format(0, 4, "Variance %", header)
        .ok();

    for (i, row) in variance.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, &row.category).ok();
        worksheet.write_number(r, 1, row.estimated).ok();
        worksheet.write_number(r, 2, row.actual).ok();
        worksheet.write_number(r, 3, row.variance).ok();
        worksheet.write_number(r, 4, row.variance_pct).ok();
    }
}

fn write_match_sheet(worksheet: &mut Worksheet, report: &CategoryMatchReport, header: &Format) {
    worksheet.set_name("Category Match").ok();
    worksheet.set_column_width(0, 20).ok();
    worksheet.set_column_width(1, 16).ok();
    worksheet.set_column_width(2, 12).ok();
    worksheet.set_column_width(3, 12).ok();

    worksheet
        .write_string_with_format(0, 0, "Category", header)
        .ok();
    worksheet
        .write_string_with_format(0, 1, "Status", header)
        .ok();
    worksheet
        .write_string_with_format(0, 2, "Estimated", header)
        .ok();
    worksheet
        .write_string_with_format(0, 3, "Actual", header)
        .ok();

    let mut r: u32 = 1;
    for m in &report.matched {
        worksheet.write_string(r, 0, &m.category).ok();
        worksheet.write_string(r, 1, "matched").ok();
        worksheet.write_number(r, 2, m.estimated).ok();
        worksheet.write_number(r, 3, m.actual).ok();
        r += 1;
    }
    for e in &report.estimate_only {
        worksheet.write_string(r, 0, &e.category).ok();
        worksheet.write_string(r, 1, "estimate only").ok();
        worksheet.write_number(r, 2, e.amount).ok();
        r += 1;
    }
    for a in &report.actual_only {
        worksheet.write_string(r, 0, &a.category).ok();
        worksheet.write_string(r, 1, "actual only").ok();
        worksheet.write_number(r, 3, a.amount).ok();
        r += 1;
    }

    let s = &report.match_summary;
    r += 1;
    worksheet
        .write_string(r, 0, format!("Matched: {}", s.total_matched))
        .ok();
    worksheet
        .write_string(r + 1, 0, format!("Estimate only: {}", s.total_estimate_only))
        .ok();
    worksheet
        .write_string(r + 2, 0, format!("Actual only: {}", s.total_actual_only))
        .ok();
    worksheet
        .write_string(r + 3, 0, format!("Match rate: {:.0}%", s.match_rate_pct))
        .ok();
}

fn write_summary_sheet(worksheet: &mut Worksheet, summary: &SummaryStatistics, header: &Format) {
    worksheet.set_name("Summary").ok();
    worksheet.set_column_width(0, 26).ok();
    worksheet.set_column_width(1, 16).ok();

    worksheet
        .write_string_with_format(0, 0, "Statistic", header)
        .ok();
    worksheet
        .write_string_with_format(0, 1, "Value", header)
        .ok();

    let numbers = [
        ("Total estimated", summary.total_estimated),
        ("Total actual", summary.total_actual),
        ("Total variance", summary.total_variance),
        ("Total variance %", summary.total_variance_pct),
        (
            "Over-budget categories",
            summary.over_budget_categories as f64,
        ),
        (
            "Under-budget categories",
            summary.under_budget_categories as f64,
        ),
    ];
    for (i, (label, value)) in numbers.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_string(r, 0, *label).ok();
        worksheet.write_number(r, 1, *value).ok();
    }

    let mut r = numbers.len() as u32 + 1;
    for (label, extreme) in [
        ("Biggest overrun", &summary.biggest_overrun),
        ("Biggest underrun", &summary.biggest_underrun),
    ] {
        worksheet.write_string(r, 0, label).ok();
        match &extreme.category {
            Some(category) => {
                worksheet.write_string(r, 1, category).ok();
                worksheet.write_number(r, 2, extreme.amount).ok();
            }
            None => {
                worksheet.write_string(r, 1, "none").ok();
            }
        }
        r += 1;
    }
}
