//! Category budget model
//!
//! A budget caps spending for one category in one calendar month. Budget
//! status (spent, remaining, over/near flags) is derived on demand from the
//! transaction log and never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::ids::UserId;
use super::money::Money;

/// Percentage of the limit at which a budget counts as "near" its limit
pub const NEAR_LIMIT_PERCENT: f64 = 80.0;

/// A monthly spending limit for one category
///
/// At most one budget exists per (owner, category, month, year); setting a
/// budget for an existing combination replaces the previous limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    /// The category this budget caps
    pub category: Category,

    /// Spending limit for the month (must be positive)
    pub limit: Money,

    /// The user this budget belongs to
    pub owner: UserId,

    /// Calendar month, 1-12
    pub month: u32,

    /// Calendar year
    pub year: i32,

    /// When this budget was created
    pub created_at: DateTime<Utc>,

    /// When this budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl CategoryBudget {
    /// Create a new category budget
    pub fn new(owner: UserId, category: Category, limit: Money, month: u32, year: i32) -> Self {
        let now = Utc::now();
        Self {
            category,
            limit,
            owner,
            month,
            year,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the spending limit
    pub fn set_limit(&mut self, limit: Money) {
        self.limit = limit;
        self.updated_at = Utc::now();
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.limit.is_positive() {
            return Err(BudgetValidationError::NonPositiveLimit(self.limit));
        }

        if self.month < 1 || self.month > 12 {
            return Err(BudgetValidationError::InvalidMonth(self.month));
        }

        Ok(())
    }
}

impl fmt::Display for CategoryBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{}: limit {}",
            self.category, self.month, self.year, self.limit
        )
    }
}

/// Derived spending status for one category budget
///
/// All fields are computed at construction; the struct is a snapshot, not a
/// persisted entity.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    /// The budgeted category
    pub category: Category,

    /// The configured limit
    pub limit: Money,

    /// Total matching expense spend in the budget's month
    pub spent: Money,

    /// Limit minus spend, floored at zero
    pub remaining: Money,

    /// Spend as a percentage of the limit; exceeds 100 when over budget
    pub percentage_used: f64,

    /// True when spend strictly exceeds the limit
    pub is_over_budget: bool,

    /// True when spend is at 80-100% of the limit and not over
    pub is_near_budget: bool,
}

impl BudgetStatus {
    /// Compute the status for a limit and an observed spend
    ///
    /// The two flags are mutually exclusive: spend exactly at the limit is
    /// "near", not "over". A nonpositive limit (rejected at budget creation,
    /// but possible in hand-built data) yields a zero percentage rather than
    /// a division by zero.
    pub fn new(category: Category, limit: Money, spent: Money) -> Self {
        let percentage_used = if limit.is_positive() {
            (spent.cents() as f64 / limit.cents() as f64) * 100.0
        } else {
            0.0
        };

        let is_over_budget = spent > limit;
        let is_near_budget =
            !is_over_budget && percentage_used >= NEAR_LIMIT_PERCENT && percentage_used <= 100.0;

        let remaining = if is_over_budget {
            Money::zero()
        } else {
            limit - spent
        };

        Self {
            category,
            limit,
            spent,
            remaining,
            percentage_used,
            is_over_budget,
            is_near_budget,
        }
    }

    /// Compute the status for a budget and an observed spend
    pub fn from_budget(budget: &CategoryBudget, spent: Money) -> Self {
        Self::new(budget.category, budget.limit, spent)
    }

    /// Amount spent beyond the limit (zero when not over budget)
    pub fn overspend(&self) -> Money {
        if self.is_over_budget {
            self.spent - self.limit
        } else {
            Money::zero()
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} ({:.0}%)",
            self.category, self.spent, self.limit, self.percentage_used
        )
    }
}

/// Validation errors for category budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveLimit(Money),
    InvalidMonth(u32),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveLimit(limit) => {
                write!(f, "Budget limit must be positive, got {}", limit)
            }
            Self::InvalidMonth(month) => {
                write!(f, "Budget month must be 1-12, got {}", month)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
