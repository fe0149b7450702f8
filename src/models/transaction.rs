//! Transaction model
//!
//! A transaction is a single dated income or expense entry belonging to one
//! user. Dates are plain calendar dates; there is no time-of-day component.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::{TransactionId, UserId};
use super::money::Money;

/// Whether a transaction adds to or subtracts from the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Lowercase wire/CSV representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The user this transaction belongs to
    pub owner: UserId,

    /// Free-text description, e.g. "Groceries"
    pub title: String,

    /// Amount (always positive; the kind carries the direction)
    pub amount: Money,

    /// Transaction date
    pub date: NaiveDate,

    /// Income or expense
    pub kind: TransactionKind,

    /// Spending category (set for income too, but only expenses are
    /// broken down by category in reports)
    pub category: Category,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        owner: UserId,
        title: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        kind: TransactionKind,
        category: Category,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            owner,
            title: title.into(),
            amount,
            date,
            kind,
            category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an income transaction
    pub fn income(owner: UserId, title: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self::new(
            owner,
            title,
            amount,
            date,
            TransactionKind::Income,
            Category::Other,
        )
    }

    /// Create an expense transaction in the given category
    pub fn expense(
        owner: UserId,
        title: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        category: Category,
    ) -> Self {
        Self::new(owner, title, amount, date, TransactionKind::Expense, category)
    }

    /// Check if this is an income transaction
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Check if this is an expense transaction
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Set the title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.updated_at = Utc::now();
    }

    /// Set the amount
    pub fn set_amount(&mut self, amount: Money) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    /// Set the date
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.updated_at = Utc::now();
    }

    /// Set the kind
    pub fn set_kind(&mut self, kind: TransactionKind) {
        self.kind = kind;
        self.updated_at = Utc::now();
    }

    /// Set the category
    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.updated_at = Utc::now();
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.title.trim().is_empty() {
            return Err(TransactionValidationError::EmptyTitle);
        }

        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date.format("%Y-%m-%d"),
            self.title,
            self.amount,
            self.kind
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyTitle,
    NonPositiveAmount(Money),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Transaction title cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Transaction amount must be positive, got {}", amount)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
