use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::analytics::SummaryTotals;
use super::transaction::Category;

/// One day of the balance time series.
///
/// The core computes all the numbers; the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBalance {
    /// Calendar day (UTC)
    pub date: NaiveDate,

    /// Axis label, `MM-DD`
    pub label: String,

    /// Cumulative income minus expense from the first day of the window
    pub balance: f64,

    pub income: f64,

    pub expense: f64,
}

/// Summed amount for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: f64,
}

/// Every derived view of a snapshot, recomputed from scratch each time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub summary: SummaryTotals,

    /// Chronological, oldest day first
    pub daily: Vec<DailyBalance>,

    pub expense_breakdown: Vec<CategoryTotal>,

    pub income_breakdown: Vec<CategoryTotal>,
}

impl DashboardData {
    /// The last `n` days of the series (the daily bar chart shows 14).
    pub fn recent_days(&self, n: usize) -> &[DailyBalance] {
        let start = self.daily.len().saturating_sub(n);
        &self.daily[start..]
    }
}
