//! Period Report
//!
//! Summarizes a user's transactions over a week, month, year, or custom
//! date range: totals, category breakdown, and a per-bucket time series.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::error::TrackerResult;
use crate::models::{Category, DateRange, Money, Transaction};
use crate::services::aggregate::{aggregate, BucketTotals, TimeBucket};

/// A report over a resolved date range
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    /// Report title ("Weekly Report", "Monthly Report", ...)
    pub title: String,
    /// Human-readable label for the period ("March 2024", "10/3/2024 - 16/3/2024")
    pub period_label: String,
    /// The resolved date range (inclusive)
    pub range: DateRange,
    /// Sum of income transactions in the range
    pub total_income: Money,
    /// Sum of expense transactions in the range
    pub total_expense: Money,
    /// Income minus expense
    pub balance: Money,
    /// The transactions in the range, oldest first
    pub transactions: Vec<Transaction>,
    /// Expense totals per category
    pub category_breakdown: BTreeMap<Category, Money>,
    /// Income and expense per time bucket, chronological
    pub bucket_breakdown: Vec<BucketTotals>,
}

impl PeriodReport {
    /// Report for the week containing `reference` (Sunday through Saturday)
    pub fn weekly(transactions: &[Transaction], reference: NaiveDate) -> Self {
        let range = DateRange::week_of(reference);
        Self::build(
            transactions,
            "Weekly Report",
            range_label(range),
            range,
            TimeBucket::Weekday,
        )
    }

    /// Report for the calendar month containing `reference`
    pub fn monthly(transactions: &[Transaction], reference: NaiveDate) -> Self {
        let range = DateRange::month_of(reference);
        Self::build(
            transactions,
            "Monthly Report",
            reference.format("%B %Y").to_string(),
            range,
            TimeBucket::Day,
        )
    }

    /// Report for the calendar year containing `reference`
    pub fn yearly(transactions: &[Transaction], reference: NaiveDate) -> Self {
        let range = DateRange::year_of(reference);
        Self::build(
            transactions,
            "Yearly Report",
            reference.format("%Y").to_string(),
            range,
            TimeBucket::Month,
        )
    }

    /// Report for an arbitrary date range
    ///
    /// The range is taken as given: an inverted range contains no days and
    /// produces an empty report.
    pub fn custom(transactions: &[Transaction], start: NaiveDate, end: NaiveDate) -> Self {
        let range = DateRange::custom(start, end);
        Self::build(
            transactions,
            "Custom Date Range Report",
            range_label(range),
            range,
            TimeBucket::Day,
        )
    }

    fn build(
        transactions: &[Transaction],
        title: &str,
        period_label: String,
        range: DateRange,
        bucket: TimeBucket,
    ) -> Self {
        let totals = aggregate(transactions, |t| range.contains(t.date), bucket);

        let mut included: Vec<Transaction> = transactions
            .iter()
            .filter(|t| range.contains(t.date))
            .cloned()
            .collect();
        included.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

        Self {
            title: title.to_string(),
            period_label,
            range,
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            balance: totals.balance,
            transactions: included,
            category_breakdown: totals.category_breakdown,
            bucket_breakdown: totals.bucket_breakdown,
        }
    }

    /// Whether the range contained no transactions
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}: {}\n", self.title, self.period_label));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!("{:<15} {:>12}\n", "Total Income:", self.total_income));
        output.push_str(&format!("{:<15} {:>12}\n", "Total Expense:", self.total_expense));
        output.push_str(&format!("{:<15} {:>12}\n", "Balance:", self.balance));
        output.push_str(&format!("{:<15} {:>12}\n", "Transactions:", self.transactions.len()));

        if !self.category_breakdown.is_empty() {
            output.push_str("\nExpense by Category\n");
            output.push_str(&"-".repeat(80));
            output.push('\n');
            for (category, amount) in &self.category_breakdown {
                output.push_str(&format!("{:<20} {:>12}\n", category.as_str(), amount));
            }
        }

        if !self.bucket_breakdown.is_empty() {
            output.push_str("\nBreakdown\n");
            output.push_str(&"-".repeat(80));
            output.push('\n');
            output.push_str(&format!(
                "{:<20} {:>12} {:>12}\n",
                "Period", "Income", "Expense"
            ));
            for bucket in &self.bucket_breakdown {
                output.push_str(&format!(
                    "{:<20} {:>12} {:>12}\n",
                    bucket.label, bucket.income, bucket.expense
                ));
            }
        }

        if !self.transactions.is_empty() {
            output.push_str("\nTransactions\n");
            output.push_str(&"-".repeat(80));
            output.push('\n');
            for txn in &self.transactions {
                output.push_str(&format!(
                    "{}  {:<30} {:>12}  {:<7} {}\n",
                    txn.date,
                    txn.title,
                    txn.amount,
                    txn.kind,
                    txn.category.as_str()
                ));
            }
        }

        output
    }

    /// Export the report's transactions to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> TrackerResult<()> {
        crate::export::csv::export_transactions_csv(&self.transactions, writer)
    }
}

fn range_label(range: DateRange) -> String {
    format!(
        "{} - {}",
        range.start.format("%-d/%-m/%Y"),
        range.end.format("%-d/%-m/%Y")
    )
}
