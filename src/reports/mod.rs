//! Reports module for the expense tracker
//!
//! Provides period summaries over transactions and monthly budget
//! status evaluation.

pub mod budget_status;
pub mod period;

pub use budget_status::BudgetStatusReport;
pub use period::PeriodReport;
