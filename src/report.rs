//! Text and JSON rendering of a [`Report`].

use chrono::Month;
use std::fmt::Write;

use crate::core::{Comparison, Report};

fn month_name(number: u32) -> String {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map_or_else(|| format!("month {number}"), |m| m.name().to_string())
}

/// Renders the report as the plain-text summary shown on the terminal.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_text(&mut out, report);
    out
}

fn write_text(out: &mut String, report: &Report) -> std::fmt::Result {
    writeln!(out, "Total Spent: ${:.2}", report.total_spent)?;
    writeln!(out, "Budget Remaining: ${:.2}", report.remaining_budget)?;
    match report.daily_budget {
        Some(daily) => writeln!(out, "Budget Per Day: ${daily:.2}")?,
        None => writeln!(out, "Budget Per Day: N/A (no days left this month)")?,
    }

    writeln!(
        out,
        "\nMonthly Expenses By Category ({}):",
        month_name(report.selected_month)
    )?;
    if report.month_totals.is_empty() {
        writeln!(out, "  No expenses recorded.")?;
    }
    for (category, amount) in &report.month_totals {
        writeln!(out, "  {category}: ${amount:.2}")?;
    }
    writeln!(out, "  Total: ${:.2}", report.selected_month_total)?;

    writeln!(out, "\nAverage Expenses By Category for the Year:")?;
    for (category, amount) in &report.annual_averages {
        writeln!(out, "  {category}: ${amount:.2}")?;
    }

    let verdict = match report.comparison {
        Comparison::Higher => "higher than",
        Comparison::Lower => "lower than",
        Comparison::Equal => "equal to",
    };
    writeln!(
        out,
        "\nExpenses for the selected month are {verdict} the annual average."
    )?;

    writeln!(out, "\nPercentage of Expenses By Category:")?;
    for (category, share) in &report.percentages {
        writeln!(out, "  {category}: {share:.2}%")?;
    }
    Ok(())
}

/// Renders the report as pretty-printed JSON.
pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
