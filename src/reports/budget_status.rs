//! Budget Status Report
//!
//! Evaluates a user's category budgets for one calendar month and
//! summarizes spending against each limit.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{BudgetStatus, CategoryBudget, Money, Transaction, UserId};
use crate::services::budget::evaluate_budgets;

/// Budget evaluation for one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatusReport {
    /// Human-readable label for the month ("March 2024")
    pub period_label: String,
    /// Per-category status, sorted by category
    pub statuses: Vec<BudgetStatus>,
    /// Sum of all evaluated limits
    pub total_limit: Money,
    /// Sum of all evaluated spending
    pub total_spent: Money,
}

impl BudgetStatusReport {
    /// Evaluate the owner's budgets for the month containing `reference`
    pub fn generate(
        owner: UserId,
        transactions: &[Transaction],
        budgets: &[CategoryBudget],
        reference: NaiveDate,
    ) -> Self {
        let mut statuses = evaluate_budgets(owner, transactions, budgets, reference);
        statuses.sort_by(|a, b| a.category.cmp(&b.category));

        let total_limit = statuses.iter().map(|s| s.limit).sum();
        let total_spent = statuses.iter().map(|s| s.spent).sum();

        Self {
            period_label: reference.format("%B %Y").to_string(),
            statuses,
            total_limit,
            total_spent,
        }
    }

    /// Whether no budgets were defined for the month
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Statuses whose spending exceeds the limit
    pub fn over_budget(&self) -> Vec<&BudgetStatus> {
        self.statuses.iter().filter(|s| s.is_over_budget).collect()
    }

    /// Statuses in the warning band below the limit
    pub fn near_budget(&self) -> Vec<&BudgetStatus> {
        self.statuses.iter().filter(|s| s.is_near_budget).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Status: {}\n", self.period_label));
        output.push_str(&"=".repeat(80));
        output.push('\n');

        if self.statuses.is_empty() {
            output.push_str("No budgets defined for this month.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<16} {:>12} {:>12} {:>12} {:>8}\n",
            "Category", "Limit", "Spent", "Remaining", "Used"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        for status in &self.statuses {
            let marker = if status.is_over_budget {
                "  OVER"
            } else if status.is_near_budget {
                "  NEAR"
            } else {
                ""
            };
            output.push_str(&format!(
                "{:<16} {:>12} {:>12} {:>12} {:>7.1}%{}\n",
                status.category.as_str(),
                status.limit,
                status.spent,
                status.remaining,
                status.percentage_used,
                marker
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>12} {:>12}\n",
            "Total", self.total_limit, self.total_spent
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> TrackerResult<()> {
        writeln!(
            writer,
            "Category,Limit,Spent,Remaining,Percent Used,Over Budget,Near Budget"
        )
        .map_err(|e| TrackerError::Export(e.to_string()))?;

        for status in &self.statuses {
            writeln!(
                writer,
                "{},{},{},{},{:.2},{},{}",
                status.category.as_str(),
                status.limit.to_decimal_string(),
                status.spent.to_decimal_string(),
                status.remaining.to_decimal_string(),
                status.percentage_used,
                status.is_over_budget,
                status.is_near_budget
            )
            .map_err(|e| TrackerError::Export(e.to_string()))?;
        }

        Ok(())
    }
}
