//! Todo service
//!
//! Business logic for financial todos: creation, partial updates,
//! completion toggling, transaction linking, and ordered listing.

use chrono::NaiveDate;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{FinancialTodo, Money, Priority, TodoId, TransactionId, UserId};
use crate::storage::Storage;

/// Service for todo management
pub struct TodoService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new todo
#[derive(Debug, Clone)]
pub struct CreateTodoInput {
    pub owner: UserId,
    pub title: String,
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

impl<'a> TodoService<'a> {
    /// Create a new todo service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new todo
    pub fn create(&self, input: CreateTodoInput) -> TrackerResult<FinancialTodo> {
        let mut todo = FinancialTodo::new(input.owner, input.title);
        todo.description = input.description;
        todo.amount = input.amount;
        todo.due_date = input.due_date;
        if let Some(priority) = input.priority {
            todo.priority = priority;
        }

        todo.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.todos.upsert(todo.clone())?;
        self.storage.todos.save()?;

        Ok(todo)
    }

    /// Get a todo by ID
    pub fn get(&self, id: TodoId) -> TrackerResult<Option<FinancialTodo>> {
        self.storage.todos.get(id)
    }

    /// Update a todo; fields left as None are unchanged
    pub fn update(
        &self,
        id: TodoId,
        title: Option<String>,
        description: Option<String>,
        amount: Option<Money>,
        due_date: Option<NaiveDate>,
        priority: Option<Priority>,
    ) -> TrackerResult<FinancialTodo> {
        let mut todo = self
            .storage
            .todos
            .get(id)?
            .ok_or_else(|| TrackerError::todo_not_found(id.to_string()))?;

        if let Some(title) = title {
            todo.title = title;
        }
        if let Some(description) = description {
            todo.description = Some(description);
        }
        if let Some(amount) = amount {
            todo.amount = Some(amount);
        }
        if let Some(due_date) = due_date {
            todo.due_date = Some(due_date);
        }
        if let Some(priority) = priority {
            todo.priority = priority;
        }

        todo.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        self.storage.todos.upsert(todo.clone())?;
        self.storage.todos.save()?;

        Ok(todo)
    }

    /// Flip a todo's completed flag
    pub fn toggle_completed(&self, id: TodoId) -> TrackerResult<FinancialTodo> {
        let mut todo = self
            .storage
            .todos
            .get(id)?
            .ok_or_else(|| TrackerError::todo_not_found(id.to_string()))?;

        todo.toggle_completed();

        self.storage.todos.upsert(todo.clone())?;
        self.storage.todos.save()?;

        Ok(todo)
    }

    /// Link a todo to the transaction that settled it
    ///
    /// The transaction must exist.
    pub fn link_transaction(
        &self,
        id: TodoId,
        transaction_id: TransactionId,
    ) -> TrackerResult<FinancialTodo> {
        if self.storage.transactions.get(transaction_id)?.is_none() {
            return Err(TrackerError::transaction_not_found(
                transaction_id.to_string(),
            ));
        }

        let mut todo = self
            .storage
            .todos
            .get(id)?
            .ok_or_else(|| TrackerError::todo_not_found(id.to_string()))?;

        todo.link_transaction(transaction_id);

        self.storage.todos.upsert(todo.clone())?;
        self.storage.todos.save()?;

        Ok(todo)
    }

    /// Delete a todo; returns false when none existed
    pub fn delete(&self, id: TodoId) -> TrackerResult<bool> {
        let deleted = self.storage.todos.delete(id)?;
        if deleted {
            self.storage.todos.save()?;
        }
        Ok(deleted)
    }

    /// Get an owner's todos in display order
    ///
    /// Incomplete first, then by priority, due date, and creation time.
    pub fn list_for_owner(&self, owner: UserId) -> TrackerResult<Vec<FinancialTodo>> {
        let mut todos = self.storage.todos.get_by_owner(owner)?;
        todos.sort_by(FinancialTodo::display_order);
        Ok(todos)
    }
}
