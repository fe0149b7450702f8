//! Financial todo model
//!
//! Reminders for upcoming financial actions (pay rent, review subscriptions),
//! optionally carrying an amount, a due date, and a link to the transaction
//! that eventually settled them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::ids::{TodoId, TransactionId, UserId};
use super::money::Money;

/// Priority of a financial todo
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

/// A financial todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialTodo {
    /// Unique identifier
    pub id: TodoId,

    /// The user this todo belongs to
    pub owner: UserId,

    /// What needs doing (required)
    pub title: String,

    /// Longer free-text details
    pub description: Option<String>,

    /// Expected amount, when the todo concerns a payment
    pub amount: Option<Money>,

    /// When this should be done by
    pub due_date: Option<NaiveDate>,

    /// Priority used for ordering the todo list
    #[serde(default)]
    pub priority: Priority,

    /// Whether the todo has been completed
    #[serde(default)]
    pub completed: bool,

    /// The transaction that settled this todo, if any
    pub linked_transaction: Option<TransactionId>,

    /// When the todo was created
    pub created_at: DateTime<Utc>,
}

impl FinancialTodo {
    /// Create a new todo with default priority and no optional fields
    pub fn new(owner: UserId, title: impl Into<String>) -> Self {
        Self {
            id: TodoId::new(),
            owner,
            title: title.into(),
            description: None,
            amount: None,
            due_date: None,
            priority: Priority::default(),
            completed: false,
            linked_transaction: None,
            created_at: Utc::now(),
        }
    }

    /// Flip the completed flag
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    /// Link this todo to the transaction that settled it
    pub fn link_transaction(&mut self, transaction_id: TransactionId) {
        self.linked_transaction = Some(transaction_id);
    }

    /// Validate the todo
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        if self.title.trim().is_empty() {
            return Err(TodoValidationError::EmptyTitle);
        }

        Ok(())
    }

    /// Ordering used when listing todos
    ///
    /// Incomplete items come first, then higher priority, then the earlier
    /// due date when both items have one, otherwise newest created first.
    pub fn display_order(a: &Self, b: &Self) -> Ordering {
        let completed = a.completed.cmp(&b.completed);
        if completed != Ordering::Equal {
            return completed;
        }

        let priority = b.priority.cmp(&a.priority);
        if priority != Ordering::Equal {
            return priority;
        }

        match (a.due_date, b.due_date) {
            (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
            _ => b.created_at.cmp(&a.created_at),
        }
    }
}

impl fmt::Display for FinancialTodo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        write!(f, "[{}] {} ({})", mark, self.title, self.priority)
    }
}

/// Validation errors for todos
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyTitle,
}

impl fmt::Display for TodoValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Todo title cannot be empty"),
        }
    }
}

impl std::error::Error for TodoValidationError {}
