use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Direction of a transaction. Income adds to the balance, expense subtracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(CoreError::ValidationError(format!(
                "Unknown transaction type '{other}': expected 'income' or 'expense'"
            ))),
        }
    }
}

/// Fixed set of transaction categories.
///
/// Serialized by variant name, which is also the display name
/// (e.g. `"Groceries"`), matching the persisted record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Salary,
    Freelance,
    Investments,
    Rent,
    Groceries,
    Entertainment,
    Utilities,
    Transport,
    Health,
    Other,
}

impl Category {
    /// Every category, in the order they are offered on the entry form.
    pub const ALL: [Category; 10] = [
        Category::Salary,
        Category::Freelance,
        Category::Investments,
        Category::Rent,
        Category::Groceries,
        Category::Entertainment,
        Category::Utilities,
        Category::Transport,
        Category::Health,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Investments => "Investments",
            Category::Rent => "Rent",
            Category::Groceries => "Groceries",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Transport => "Transport",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = CoreError;

    /// Case-insensitive match on the display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown category '{wanted}'")))
    }
}

/// A recorded income or expense.
///
/// Never mutated in place: an edit is a remove followed by an add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier
    pub id: String,

    /// When the transaction happened
    pub date: DateTime<Utc>,

    /// Always positive; the sign comes from `tx_type`
    pub amount: f64,

    #[serde(rename = "type")]
    pub tx_type: TransactionType,

    pub category: Category,

    #[serde(default)]
    pub description: String,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        date: DateTime<Utc>,
        amount: f64,
        tx_type: TransactionType,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            tx_type,
            category,
            description: description.into(),
        }
    }

    /// Calendar day (UTC) this transaction falls on.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Amount with the sign applied: positive for income, negative for expense.
    pub fn signed_amount(&self) -> f64 {
        match self.tx_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn is_income(&self) -> bool {
        self.tx_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.tx_type == TransactionType::Expense
    }
}

/// A transaction as submitted, before the store assigns an id.
///
/// This is also the persisted record shape: `{date, amount, type, category, description}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: DateTime<Utc>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub category: Category,
    #[serde(default)]
    pub description: String,
}

impl NewTransaction {
    /// Attach a store-assigned id.
    pub fn with_id(self, id: impl Into<String>) -> Transaction {
        Transaction {
            id: id.into(),
            date: self.date,
            amount: self.amount,
            tx_type: self.tx_type,
            category: self.category,
            description: self.description,
        }
    }
}

/// Raw entry-form state. The amount stays a string until validation.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub tx_type: TransactionType,
    pub amount: String,
    pub category: Category,
    pub description: String,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            tx_type: TransactionType::Expense,
            amount: String::new(),
            category: Category::Other,
            description: String::new(),
        }
    }
}
