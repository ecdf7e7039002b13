//! Period views over the expense snapshot: the recent-expenses window and the
//! all-time list, each with a summed total.

use chrono::{Duration, NaiveDate};
use shared::Expense;

pub const RECENT_PERIOD_NAME: &str = "Last 7 days";
pub const RECENT_FALLBACK_TEXT: &str = "No expenses registered for the past 7 days.";
pub const ALL_PERIOD_NAME: &str = "Total";
pub const ALL_FALLBACK_TEXT: &str = "No expenses found.";

/// Expenses dated within `days` days before `today`, inclusive at both ends.
/// Future-dated expenses are excluded. A negative window is treated as empty
/// history before today; a window reaching past the calendar range starts at
/// `NaiveDate::MIN`.
pub fn recent_expenses(expenses: &[Expense], today: NaiveDate, days: i64) -> Vec<Expense> {
    let start = Duration::try_days(days.max(0))
        .and_then(|window| today.checked_sub_signed(window))
        .unwrap_or(NaiveDate::MIN);
    expenses
        .iter()
        .filter(|expense| expense.date >= start && expense.date <= today)
        .cloned()
        .collect()
}

/// Heading of the recent view for a window of `days`
pub fn recent_period_name(days: i64) -> String {
    if days == 7 {
        RECENT_PERIOD_NAME.to_string()
    } else {
        format!("Last {} days", days)
    }
}

/// Text shown by the recent view when its window holds no expenses
pub fn recent_fallback_text(days: i64) -> String {
    if days == 7 {
        RECENT_FALLBACK_TEXT.to_string()
    } else {
        format!("No expenses registered for the past {} days.", days)
    }
}

pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// Header data for a list of expenses
#[derive(Debug, Clone, PartialEq)]
pub struct ExpensesSummary {
    pub period_name: String,
    pub total: f64,
    pub count: usize,
}

impl ExpensesSummary {
    pub fn new(period_name: impl Into<String>, expenses: &[Expense]) -> Self {
        Self {
            period_name: period_name.into(),
            total: total_amount(expenses),
            count: expenses.len(),
        }
    }

    /// Summary of the recent window. A window other than seven days gets its own label.
    pub fn recent(expenses: &[Expense], today: NaiveDate, days: i64) -> Self {
        Self::new(recent_period_name(days), &recent_expenses(expenses, today, days))
    }

    pub fn all(expenses: &[Expense]) -> Self {
        Self::new(ALL_PERIOD_NAME, expenses)
    }

    pub fn formatted_total(&self) -> String {
        format!("${:.2}", self.total)
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: &str, amount: f64, date: NaiveDate) -> Expense {
        Expense {
            id: id.to_string(),
            amount,
            date,
            description: format!("expense {}", id),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_recent_window_bounds() {
        let expenses = vec![
            expense("old", 1.0, day(7)),
            expense("edge", 2.0, day(8)),
            expense("mid", 3.0, day(12)),
            expense("today", 4.0, day(15)),
            expense("future", 5.0, day(16)),
        ];

        let recent = recent_expenses(&expenses, day(15), 7);

        let ids: Vec<&str> = recent.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["edge", "mid", "today"]);
    }

    #[test]
    fn test_recent_window_out_of_range() {
        let expenses = vec![
            expense("ancient", 1.0, NaiveDate::from_ymd_opt(1900, 1, 1).unwrap()),
            expense("today", 2.0, day(15)),
            expense("future", 3.0, day(16)),
        ];

        let huge = recent_expenses(&expenses, day(15), 1_000_000_000);
        let ids: Vec<&str> = huge.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ancient", "today"]);

        let max = recent_expenses(&expenses, day(15), i64::MAX);
        assert_eq!(max.len(), 2);

        let negative = recent_expenses(&expenses, day(15), -5);
        let ids: Vec<&str> = negative.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["today"]);
    }

    #[test]
    fn test_recent_labels_follow_window() {
        assert_eq!(recent_period_name(7), "Last 7 days");
        assert_eq!(recent_fallback_text(7), RECENT_FALLBACK_TEXT);
        assert_eq!(recent_period_name(30), "Last 30 days");
        assert_eq!(
            recent_fallback_text(30),
            "No expenses registered for the past 30 days."
        );
    }

    #[test]
    fn test_summaries() {
        let expenses = vec![
            expense("a", 10.25, day(1)),
            expense("b", 5.5, day(14)),
            expense("c", 4.25, day(15)),
        ];

        let all = ExpensesSummary::all(&expenses);
        assert_eq!(all.period_name, "Total");
        assert_eq!(all.count, 3);
        assert_eq!(all.formatted_total(), "$20.00");

        let recent = ExpensesSummary::recent(&expenses, day(15), 7);
        assert_eq!(recent.period_name, "Last 7 days");
        assert_eq!(recent.count, 2);
        assert_eq!(recent.formatted_total(), "$9.75");

        let month = ExpensesSummary::recent(&expenses, day(15), 30);
        assert_eq!(month.period_name, "Last 30 days");
        assert_eq!(month.count, 3);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ExpensesSummary::all(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.formatted_total(), "$0.00");
    }
}
