use chrono::{DateTime, NaiveDate, Utc};

use crate::errors::CoreError;
use crate::models::transaction::{
    Category, NewTransaction, Transaction, TransactionForm, TransactionType,
};

/// Description stored when the form leaves it blank.
pub const EMPTY_DESCRIPTION: &str = "No description";

/// Sort order for transaction listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSortOrder {
    /// Newest first (default for display)
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

/// Validates entry-form input and answers listing queries over a snapshot.
///
/// Pure business logic: no I/O, no store access.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Turn raw form state into a transaction ready for the store.
    ///
    /// Rejects an empty, unparsable, non-finite or non-positive amount.
    pub fn validate_form(
        &self,
        form: &TransactionForm,
        now: DateTime<Utc>,
    ) -> Result<NewTransaction, CoreError> {
        let raw = form.amount.trim();
        if raw.is_empty() {
            return Err(CoreError::ValidationError("Amount is required".into()));
        }

        let amount: f64 = raw
            .parse()
            .map_err(|_| CoreError::ValidationError(format!("Amount '{raw}' is not a number")))?;

        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be greater than zero, got {raw}"
            )));
        }

        let description = match form.description.trim() {
            "" => EMPTY_DESCRIPTION.to_string(),
            d => d.to_string(),
        };

        Ok(NewTransaction {
            date: now,
            amount,
            tx_type: form.tx_type,
            category: form.category,
            description,
        })
    }

    /// Check a transaction that did not come through the form (imports, store records).
    pub fn validate_transaction(&self, tx: &NewTransaction) -> Result<(), CoreError> {
        if !tx.amount.is_finite() || tx.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be greater than zero, got {}",
                tx.amount
            )));
        }
        Ok(())
    }

    pub fn by_type<'a>(&self, transactions: &'a [Transaction], tx_type: TransactionType) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| t.tx_type == tx_type).collect()
    }

    pub fn by_category<'a>(&self, transactions: &'a [Transaction], category: Category) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| t.category == category).collect()
    }

    /// Transactions whose calendar day is within `[from, to]` (inclusive).
    pub fn in_range<'a>(
        &self,
        transactions: &'a [Transaction],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|t| {
                let day = t.day();
                day >= from && day <= to
            })
            .collect()
    }

    /// Case-insensitive match against description and category name.
    pub fn search<'a>(&self, transactions: &'a [Transaction], query: &str) -> Vec<&'a Transaction> {
        let q = query.trim().to_lowercase();
        transactions
            .iter()
            .filter(|t| {
                t.description.to_lowercase().contains(&q)
                    || t.category.as_str().to_lowercase().contains(&q)
            })
            .collect()
    }

    pub fn sorted<'a>(&self, transactions: &'a [Transaction], order: TransactionSortOrder) -> Vec<&'a Transaction> {
        let mut sorted: Vec<&Transaction> = transactions.iter().collect();
        match order {
            TransactionSortOrder::DateDesc => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
            TransactionSortOrder::DateAsc => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
            TransactionSortOrder::AmountDesc => sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
            TransactionSortOrder::AmountAsc => sorted.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
        }
        sorted
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}
