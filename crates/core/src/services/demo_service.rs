use chrono::{DateTime, Datelike, Duration, Utc};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::transaction::{Category, Transaction, TransactionType};

/// Upper bound of random values one generated day consumes.
const DRAWS_PER_DAY: usize = 5;

/// Generates a plausible history for demos and screenshots.
///
/// Output only ever goes into the local snapshot; it is never written to a store.
pub struct DemoDataService;

impl DemoDataService {
    pub fn new() -> Self {
        Self
    }

    /// `days` days of history ending at `now`, newest first, using OS randomness.
    pub fn generate(&self, days: u32, now: DateTime<Utc>) -> Result<Vec<Transaction>, CoreError> {
        // Every value is drawn before generating, so a failing random source
        // surfaces as an error instead of skewing the data.
        let pool = random_units(days as usize * DRAWS_PER_DAY)?;
        let mut draws = pool.into_iter();
        let transactions = self.generate_with(days, now, || draws.next().unwrap_or_default());
        Ok(transactions)
    }

    /// Same as [`DemoDataService::generate`] with a caller-supplied source of
    /// uniform values in `[0, 1)`.
    pub fn generate_with<R>(&self, days: u32, now: DateTime<Utc>, mut rng: R) -> Vec<Transaction>
    where
        R: FnMut() -> f64,
    {
        let mut transactions = Vec::new();

        for i in 0..days {
            let date = now - Duration::days(i64::from(i));

            // Salary every other week
            if i % 14 == 0 {
                transactions.push(Transaction::new(
                    demo_id("inc", i),
                    date,
                    3500.0 + rng() * 500.0,
                    TransactionType::Income,
                    Category::Salary,
                    "Bi-weekly Salary",
                ));
            }

            if rng() > 0.3 {
                transactions.push(Transaction::new(
                    demo_id("exp-1", i),
                    date,
                    15.0 + rng() * 80.0,
                    TransactionType::Expense,
                    Category::Groceries,
                    "Grocery Store",
                ));
            }

            if rng() > 0.7 {
                transactions.push(Transaction::new(
                    demo_id("exp-2", i),
                    date,
                    10.0 + rng() * 40.0,
                    TransactionType::Expense,
                    Category::Entertainment,
                    "Movies/Games",
                ));
            }

            if date.day() == 1 {
                transactions.push(Transaction::new(
                    demo_id("rent", i),
                    date,
                    1800.0,
                    TransactionType::Expense,
                    Category::Rent,
                    "Monthly Rent",
                ));
            }
        }

        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        transactions
    }
}

impl Default for DemoDataService {
    fn default() -> Self {
        Self::new()
    }
}

fn demo_id(prefix: &str, day: u32) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{day}-{}", &suffix[..9])
}

/// `count` uniform `f64`s in `[0, 1)` from the OS random source, in one read.
fn random_units(count: usize) -> Result<Vec<f64>, CoreError> {
    let mut buf = vec![0u8; count * 8];
    getrandom::getrandom(&mut buf)
        .map_err(|e| CoreError::RandomSource(e.to_string()))?;
    Ok(buf
        .chunks_exact(8)
        .map(|chunk| {
            let mut bytes = [0u8; 8];
            bytes.copy_from_slice(chunk);
            // 53 random mantissa bits
            (u64::from_le_bytes(bytes) >> 11) as f64 / (1u64 << 53) as f64
        })
        .collect())
}
