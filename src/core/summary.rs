//! Monthly-versus-annual summary of an expense log.
//!
//! [`summarize`] is a pure function: it never reads the clock or the log file,
//! both are handed in by the caller.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

use super::{BudgetConfig, Category, Expense};

/// How the selected month's total compares to the sum of annual averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Higher,
    Lower,
    Equal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// The selected month is not in `1..=12`.
    InvalidMonth(u32),
}

impl std::fmt::Display for SummaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryError::InvalidMonth(m) => write!(f, "invalid month number: {m}"),
        }
    }
}

impl std::error::Error for SummaryError {}

/// Everything computed by one summarization pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Month number (1-12) the user asked about.
    pub selected_month: u32,
    /// Sum of every amount in the log.
    pub total_spent: f64,
    /// Budget minus total spent. Negative when overspent.
    pub remaining_budget: f64,
    /// Days left in the current calendar month after today.
    pub remaining_days: u32,
    /// Remaining budget spread over the remaining days; `None` on the last day.
    pub daily_budget: Option<f64>,
    pub month_totals: BTreeMap<Category, f64>,
    pub selected_month_total: f64,
    /// Mean per-record amount for each category present in the log.
    pub annual_averages: BTreeMap<Category, f64>,
    pub annual_average_total: f64,
    pub comparison: Comparison,
    /// Share of the selected month's total, in percent.
    pub percentages: BTreeMap<Category, f64>,
}

/// Number of days in the given month, or `None` for an invalid year/month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_y, next_m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_y, next_m, 1)?.pred_opt()?;
    Some(last.day())
}

/// Days left in `today`'s month, not counting `today` itself.
pub fn remaining_days_in_month(today: NaiveDate) -> u32 {
    // today is a valid date, so its own month always resolves
    let total = days_in_month(today.year(), today.month()).unwrap_or(today.day());
    total - today.day()
}

/// Summarizes `expenses` against `budget` as of `today`.
///
/// Expenses carry no date, so the per-category "month" totals cover the whole
/// log; `selected_month` only labels the report.
pub fn summarize(
    expenses: &[Expense],
    budget: &BudgetConfig,
    today: NaiveDate,
    selected_month: u32,
) -> Result<Report, SummaryError> {
    if !(1..=12).contains(&selected_month) {
        return Err(SummaryError::InvalidMonth(selected_month));
    }

    let total_spent: f64 = expenses.iter().map(Expense::amount).sum();
    let remaining_budget = budget.amount - total_spent;

    let remaining_days = remaining_days_in_month(today);
    let daily_budget = if remaining_days == 0 {
        None
    } else {
        Some(remaining_budget / f64::from(remaining_days))
    };

    let mut month_totals: BTreeMap<Category, f64> = BTreeMap::new();
    let mut counts: BTreeMap<Category, u32> = BTreeMap::new();
    for e in expenses {
        *month_totals.entry(e.category()).or_insert(0.0) += e.amount();
        *counts.entry(e.category()).or_insert(0) += 1;
    }

    let annual_averages: BTreeMap<Category, f64> = month_totals
        .iter()
        .map(|(category, sum)| {
            let count = f64::from(counts[category]);
            (*category, sum / count)
        })
        .collect();

    let selected_month_total: f64 = month_totals.values().sum();
    let annual_average_total: f64 = annual_averages.values().sum();

    let comparison = match selected_month_total.partial_cmp(&annual_average_total) {
        Some(Ordering::Greater) => Comparison::Higher,
        Some(Ordering::Less) => Comparison::Lower,
        _ => Comparison::Equal,
    };

    let percentages = month_totals
        .iter()
        .map(|(category, amount)| {
            let share = if selected_month_total > 0.0 {
                amount / selected_month_total * 100.0
            } else {
                0.0
            };
            (*category, share)
        })
        .collect();

    debug!(total_spent, selected_month_total, "Summarized expenses");

    Ok(Report {
        selected_month,
        total_spent,
        remaining_budget,
        remaining_days,
        daily_budget,
        month_totals,
        selected_month_total,
        annual_averages,
        annual_average_total,
        comparison,
        percentages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
    }

    #[test]
    fn remaining_days_excludes_today() {
        assert_eq!(remaining_days_in_month(date(2024, 6, 20)), 10);
        assert_eq!(remaining_days_in_month(date(2024, 12, 31)), 0);
        assert_eq!(remaining_days_in_month(date(2024, 2, 1)), 28);
    }

    #[test]
    fn rejects_month_out_of_range() {
        let budget = BudgetConfig::new(100.0);
        assert_eq!(
            summarize(&[], &budget, date(2024, 6, 1), 0).unwrap_err(),
            SummaryError::InvalidMonth(0)
        );
        assert_eq!(
            summarize(&[], &budget, date(2024, 6, 1), 13).unwrap_err(),
            SummaryError::InvalidMonth(13)
        );
    }

    #[test]
    fn zero_amounts_give_zero_percentages() {
        let expenses = vec![Expense::new("free", Category::Food, 0.0).unwrap()];
        let report = summarize(&expenses, &BudgetConfig::new(10.0), date(2024, 6, 1), 6).unwrap();
        assert_eq!(report.percentages.get(&Category::Food), Some(&0.0));
        assert_eq!(report.comparison, Comparison::Equal);
    }

    #[test]
    fn overspending_is_not_clamped() {
        let expenses = vec![Expense::new("Rent", Category::Rent, 150.0).unwrap()];
        let report = summarize(&expenses, &BudgetConfig::new(100.0), date(2024, 6, 25), 6).unwrap();
        assert_eq!(report.remaining_budget, -50.0);
        assert_eq!(report.daily_budget, Some(-10.0));
    }

    #[test]
    fn several_records_exceed_their_average() {
        let expenses = vec![
            Expense::new("Lunch", Category::Food, 10.0).unwrap(),
            Expense::new("Dinner", Category::Food, 30.0).unwrap(),
        ];
        let report = summarize(&expenses, &BudgetConfig::new(100.0), date(2024, 6, 1), 6).unwrap();
        assert_eq!(report.annual_averages[&Category::Food], 20.0);
        assert_eq!(report.selected_month_total, 40.0);
        assert_eq!(report.comparison, Comparison::Higher);
    }
}
