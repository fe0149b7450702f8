//! Transaction aggregation
//!
//! Sums a set of transactions into income/expense totals, an expense-only
//! category breakdown, and a time-bucketed series. Reports compose this with
//! a period filter; the function itself is pure and order-independent.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::models::{Category, Money, Transaction};

/// Grouping granularity for the time-bucketed breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    /// One bucket per day, labelled with the weekday, e.g. "Sun, 10 Mar"
    Weekday,
    /// One bucket per day, labelled day-first, e.g. "10/3/2024"
    Day,
    /// One bucket per month, e.g. "Mar 24"
    Month,
}

impl TimeBucket {
    /// Canonical key date for the bucket containing `date`
    ///
    /// Buckets are keyed by date rather than by label so that they sort
    /// chronologically regardless of label format.
    fn key_for(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Weekday | Self::Day => date,
            Self::Month => {
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
            }
        }
    }

    /// Human-readable label for a bucket key
    fn label_for(&self, key: NaiveDate) -> String {
        match self {
            Self::Weekday => key.format("%a, %-d %b").to_string(),
            Self::Day => key.format("%-d/%-m/%Y").to_string(),
            Self::Month => key.format("%b %y").to_string(),
        }
    }
}

/// Income and expense totals for one time bucket
#[derive(Debug, Clone, PartialEq)]
pub struct BucketTotals {
    /// Bucket label, e.g. "10/3/2024" or "Mar 24"
    pub label: String,

    /// Income total within the bucket
    pub income: Money,

    /// Expense total within the bucket
    pub expense: Money,
}

/// Aggregated view of a set of transactions
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionTotals {
    /// Sum of income transaction amounts
    pub total_income: Money,

    /// Sum of expense transaction amounts
    pub total_expense: Money,

    /// Income minus expense; negative when spending exceeded income
    pub balance: Money,

    /// Expense totals per category; income is never broken down by category
    pub category_breakdown: BTreeMap<Category, Money>,

    /// Chronological income/expense series at the requested granularity
    pub bucket_breakdown: Vec<BucketTotals>,
}

impl TransactionTotals {
    /// An all-zero aggregate
    pub fn empty() -> Self {
        Self {
            total_income: Money::zero(),
            total_expense: Money::zero(),
            balance: Money::zero(),
            category_breakdown: BTreeMap::new(),
            bucket_breakdown: Vec::new(),
        }
    }
}

/// Aggregate the transactions matched by `include`
///
/// Only buckets that received at least one transaction appear in the
/// series; an empty match yields the all-zero aggregate.
pub fn aggregate<F>(
    transactions: &[Transaction],
    include: F,
    bucket: TimeBucket,
) -> TransactionTotals
where
    F: Fn(&Transaction) -> bool,
{
    let mut total_income = Money::zero();
    let mut total_expense = Money::zero();
    let mut category_breakdown: BTreeMap<Category, Money> = BTreeMap::new();
    let mut buckets: BTreeMap<NaiveDate, (Money, Money)> = BTreeMap::new();

    for txn in transactions {
        if !include(txn) {
            continue;
        }

        let slot = buckets
            .entry(bucket.key_for(txn.date))
            .or_insert((Money::zero(), Money::zero()));

        if txn.is_income() {
            total_income += txn.amount;
            slot.0 += txn.amount;
        } else {
            total_expense += txn.amount;
            slot.1 += txn.amount;
            *category_breakdown
                .entry(txn.category)
                .or_insert(Money::zero()) += txn.amount;
        }
    }

    let bucket_breakdown = buckets
        .into_iter()
        .map(|(key, (income, expense))| BucketTotals {
            label: bucket.label_for(key),
            income,
            expense,
        })
        .collect();

    TransactionTotals {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        category_breakdown,
        bucket_breakdown,
    }
}
