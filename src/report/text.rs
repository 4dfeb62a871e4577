//! Plain-text rendering of variance results.
//!
//! Deterministic output: the rendered table doubles as the "detailed line
//! items" block of the narrative prompt, so it must not depend on locale or
//! terminal state.

use crate::types::{SummaryStatistics, VarianceRow};

/// Format a number for display, removing unnecessary decimal places.
pub fn format_number(n: f64) -> String {
    // Round to 6 decimal places for display (sufficient for financial data)
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a currency amount with thousands separators: 75000 → "$75,000.00".
pub fn format_money(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}.{:02}", grouped, frac)
    } else {
        format!("${}.{:02}", grouped, frac)
    }
}

/// Render the variance rows as a fixed-width text table.
pub fn render_variance_table(rows: &[VarianceRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<20} {:>14} {:>14} {:>14} {:>9}\n",
        "Category", "Estimated", "Actual", "Variance", "Var %"
    ));
    out.push_str(&"-".repeat(74));
    out.push('\n');

    for row in rows {
        out.push_str(&format!(
            "{:<20} {:>14} {:>14} {:>14} {:>8}%\n",
            row.category,
            format_number(row.estimated),
            format_number(row.actual),
            format_number(row.variance),
            format!("{:.1}", row.variance_pct),
        ));
    }
    out
}

/// Budget status line derived from the net variance.
pub fn budget_status(summary: &SummaryStatistics) -> &'static str {
    if summary.total_variance > 0.0 {
        "OVER BUDGET"
    } else if summary.total_variance < 0.0 {
        "UNDER BUDGET"
    } else {
        "ON BUDGET"
    }
}

/// Quick text summary of the aggregate statistics, no external calls.
pub fn quick_summary(summary: &SummaryStatistics) -> String {
    let overrun = match &summary.biggest_overrun.category {
        Some(category) => format!(
            "{} ({})",
            category,
            format_money(summary.biggest_overrun.amount)
        ),
        None => "none".to_string(),
    };
    let underrun = match &summary.biggest_underrun.category {
        Some(category) => format!(
            "{} ({})",
            category,
            format_money(summary.biggest_underrun.amount)
        ),
        None => "none".to_string(),
    };

    format!(
        "Project Budget Analysis\n\
         ========================\n\
         \n\
         Status: {}\n\
         \n\
         Total Estimated: {}\n\
         Total Actual: {}\n\
         Variance: {} ({:.1}%)\n\
         \n\
         Over Budget Categories: {}\n\
         Under Budget Categories: {}\n\
         \n\
         Biggest Overrun: {}\n\
         Biggest Underrun: {}",
        budget_status(summary),
        format_money(summary.total_estimated),
        format_money(summary.total_actual),
        format_money(summary.total_variance),
        summary.total_variance_pct,
        summary.over_budget_categories,
        summary.under_budget_categories,
        overrun,
        underrun,
    )
}
