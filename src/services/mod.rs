//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, budget evaluation, aggregation, and alert tracking.

pub mod aggregate;
pub mod alerts;
pub mod budget;
pub mod todo;
pub mod transaction;

pub use aggregate::{aggregate, BucketTotals, TimeBucket, TransactionTotals};
pub use alerts::{Alert, AlertSeverity, AlertTracker};
pub use budget::{evaluate_budgets, BudgetService};
pub use todo::{CreateTodoInput, TodoService};
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService};
