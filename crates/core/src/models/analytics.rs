use serde::{Deserialize, Serialize};

/// Headline totals over the whole snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub total_income: f64,

    pub total_expense: f64,

    /// total_income - total_expense
    pub balance: f64,
}
