//! Core data models for the expense tracker
//!
//! This module contains the data structures that represent the tracking
//! domain: transactions, category budgets, financial todos, and the
//! date-range and money value types they share.

pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod todo;
pub mod transaction;

pub use budget::{BudgetStatus, CategoryBudget, NEAR_LIMIT_PERCENT};
pub use category::Category;
pub use ids::{TodoId, TransactionId, UserId};
pub use money::Money;
pub use period::DateRange;
pub use todo::{FinancialTodo, Priority};
pub use transaction::{Transaction, TransactionKind};
