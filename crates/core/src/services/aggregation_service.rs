use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use crate::models::analytics::SummaryTotals;
use crate::models::chart::{CategoryTotal, DailyBalance, DashboardData};
use crate::models::settings::DEFAULT_CHART_WINDOW_DAYS;
use crate::models::transaction::{Category, Transaction, TransactionType};

/// Window used for the daily series when there are no transactions at all.
pub const EMPTY_WINDOW_DAYS: u32 = 7;

/// Turns a transaction snapshot into the dashboard's derived views.
///
/// Stateless: every call recomputes from the slice it is given, so calling
/// it again with the same snapshot is always safe. No I/O, nothing can fail.
#[derive(Debug, Clone)]
pub struct AggregationService {
    window_days: u32,
}

impl AggregationService {
    pub fn new() -> Self {
        Self::with_window(DEFAULT_CHART_WINDOW_DAYS)
    }

    /// A window of zero days is treated as one.
    pub fn with_window(window_days: u32) -> Self {
        Self {
            window_days: window_days.max(1),
        }
    }

    pub fn window_days(&self) -> u32 {
        self.window_days
    }

    /// Compute every view for one snapshot.
    pub fn build_dashboard(&self, transactions: &[Transaction], today: NaiveDate) -> DashboardData {
        DashboardData {
            summary: self.summarize(transactions),
            daily: self.daily_series(transactions, today),
            expense_breakdown: self.category_breakdown(transactions, TransactionType::Expense),
            income_breakdown: self.category_breakdown(transactions, TransactionType::Income),
        }
    }

    /// Total income, total expense and their difference over the whole snapshot.
    pub fn summarize(&self, transactions: &[Transaction]) -> SummaryTotals {
        let mut total_income = 0.0;
        let mut total_expense = 0.0;

        for tx in transactions {
            match tx.tx_type {
                TransactionType::Income => total_income += tx.amount,
                TransactionType::Expense => total_expense += tx.amount,
            }
        }

        SummaryTotals {
            total_income,
            total_expense,
            balance: total_income - total_expense,
        }
    }

    /// Inclusive `(first_day, last_day)` of the daily window ending on `today`.
    ///
    /// An empty snapshot shrinks the window to [`EMPTY_WINDOW_DAYS`].
    pub fn window(&self, transactions: &[Transaction], today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let days = if transactions.is_empty() {
            EMPTY_WINDOW_DAYS.min(self.window_days)
        } else {
            self.window_days
        };
        let first = today - Duration::days(i64::from(days) - 1);
        (first, today)
    }

    /// One entry per calendar day of the window, oldest first, with a running
    /// balance starting at zero.
    ///
    /// Transactions outside the window are skipped here but still count in
    /// [`AggregationService::summarize`].
    pub fn daily_series(&self, transactions: &[Transaction], today: NaiveDate) -> Vec<DailyBalance> {
        let (first, last) = self.window(transactions, today);
        let len = (last - first).num_days() as usize + 1;

        // (income, expense) per day, indexed by offset from `first`
        let mut buckets = vec![(0.0_f64, 0.0_f64); len];

        for tx in transactions {
            let day = tx.day();
            if day < first || day > last {
                continue;
            }
            let bucket = &mut buckets[(day - first).num_days() as usize];
            match tx.tx_type {
                TransactionType::Income => bucket.0 += tx.amount,
                TransactionType::Expense => bucket.1 += tx.amount,
            }
        }

        let mut running_balance = 0.0;
        buckets
            .into_iter()
            .enumerate()
            .map(|(offset, (income, expense))| {
                let date = first + Duration::days(offset as i64);
                running_balance += income - expense;
                DailyBalance {
                    date,
                    label: date.format("%m-%d").to_string(),
                    balance: running_balance,
                    income,
                    expense,
                }
            })
            .collect()
    }

    /// Sum per category over transactions of one type.
    ///
    /// Only categories that actually occur are emitted, in order of first
    /// occurrence in the snapshot.
    pub fn category_breakdown(
        &self,
        transactions: &[Transaction],
        tx_type: TransactionType,
    ) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<Category, usize> = HashMap::new();

        for tx in transactions.iter().filter(|t| t.tx_type == tx_type) {
            match index.get(&tx.category) {
                Some(&i) => totals[i].amount += tx.amount,
                None => {
                    index.insert(tx.category, totals.len());
                    totals.push(CategoryTotal {
                        category: tx.category,
                        amount: tx.amount,
                    });
                }
            }
        }

        totals
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn tx(y: i32, m: u32, d: u32, amount: f64, tx_type: TransactionType) -> Transaction {
        Transaction::new(
            format!("{y}-{m}-{d}-{amount}"),
            Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            amount,
            tx_type,
            Category::Other,
            "",
        )
    }

    #[test]
    fn window_spans_exactly_window_days() {
        let svc = AggregationService::with_window(30);
        let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let (first, last) = svc.window(&[tx(2025, 3, 1, 1.0, TransactionType::Income)], today);
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        assert_eq!(last, today);
    }

    #[test]
    fn empty_window_never_exceeds_configured_window() {
        let svc = AggregationService::with_window(3);
        let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let (first, _) = svc.window(&[], today);
        assert_eq!((today - first).num_days(), 2);
    }

    #[test]
    fn zero_window_is_clamped_to_one_day() {
        let svc = AggregationService::with_window(0);
        assert_eq!(svc.window_days(), 1);
    }
}
