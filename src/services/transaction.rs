//! Transaction service
//!
//! Business logic for the transaction log: creation with validation,
//! partial updates, deletion, and owner-scoped listing.

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, Money, Transaction, TransactionId, TransactionKind, UserId};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transaction listings
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by owner
    pub owner: Option<UserId>,
    /// Filter by category
    pub category: Option<Category>,
    /// Filter by kind
    pub kind: Option<TransactionKind>,
    /// Filter by date range start
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end
    pub end_date: Option<NaiveDate>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by owner
    pub fn owner(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Filter by category
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by kind
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter by date range (inclusive)
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub owner: UserId,
    pub title: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: Category,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> TrackerResult<Transaction> {
        let txn = Transaction::new(
            input.owner,
            input.title,
            input.amount,
            input.date,
            input.kind,
            input.category,
        );

        txn.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        Ok(txn)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> TrackerResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// List transactions, newest first, with optional filtering
    pub fn list(&self, filter: TransactionFilter) -> TrackerResult<Vec<Transaction>> {
        let mut transactions = if let Some(owner) = filter.owner {
            self.storage.transactions.get_by_owner(owner)?
        } else {
            self.storage.transactions.get_all()?
        };

        if let Some(category) = filter.category {
            transactions.retain(|t| t.category == category);
        }
        if let Some(kind) = filter.kind {
            transactions.retain(|t| t.kind == kind);
        }
        if let Some(start) = filter.start_date {
            transactions.retain(|t| t.date >= start);
        }
        if let Some(end) = filter.end_date {
            transactions.retain(|t| t.date <= end);
        }

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Get all of an owner's transactions, newest first
    pub fn list_for_owner(&self, owner: UserId) -> TrackerResult<Vec<Transaction>> {
        self.storage.transactions.get_by_owner(owner)
    }

    /// Update a transaction; fields left as None are unchanged
    pub fn update(
        &self,
        id: TransactionId,
        title: Option<String>,
        amount: Option<Money>,
        date: Option<NaiveDate>,
        kind: Option<TransactionKind>,
        category: Option<Category>,
    ) -> TrackerResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| TrackerError::transaction_not_found(id.to_string()))?;

        if let Some(title) = title {
            txn.set_title(title);
        }
        if let Some(amount) = amount {
            txn.set_amount(amount);
        }
        if let Some(date) = date {
            txn.set_date(date);
        }
        if let Some(kind) = kind {
            txn.set_kind(kind);
        }
        if let Some(category) = category {
            txn.set_category(category);
        }

        txn.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        Ok(txn)
    }

    /// Delete a transaction; returns false when none existed
    pub fn delete(&self, id: TransactionId) -> TrackerResult<bool> {
        let deleted = self.storage.transactions.delete(id)?;
        if deleted {
            self.storage.transactions.save()?;
        }
        Ok(deleted)
    }
}
