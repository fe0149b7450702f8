//! Todo repository for JSON storage
//!
//! Manages loading and saving financial todos to todos.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TrackerError;
use crate::models::{FinancialTodo, TodoId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable todo data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TodoData {
    #[serde(default)]
    todos: Vec<FinancialTodo>,
}

/// Repository for todo persistence
pub struct TodoRepository {
    path: PathBuf,
    data: RwLock<HashMap<TodoId, FinancialTodo>>,
}

impl TodoRepository {
    /// Create a new todo repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load todos from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: TodoData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for todo in file_data.todos {
            data.insert(todo.id, todo);
        }

        Ok(())
    }

    /// Save todos to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut todos: Vec<_> = data.values().cloned().collect();
        todos.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let file_data = TodoData { todos };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a todo by ID
    pub fn get(&self, id: TodoId) -> Result<Option<FinancialTodo>, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all todos
    pub fn get_all(&self) -> Result<Vec<FinancialTodo>, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut todos: Vec<_> = data.values().cloned().collect();
        todos.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(todos)
    }

    /// Get an owner's todos
    pub fn get_by_owner(&self, owner: UserId) -> Result<Vec<FinancialTodo>, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.values().filter(|t| t.owner == owner).cloned().collect())
    }

    /// Insert or update a todo
    pub fn upsert(&self, todo: FinancialTodo) -> Result<(), TrackerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(todo.id, todo);
        Ok(())
    }

    /// Delete a todo
    pub fn delete(&self, id: TodoId) -> Result<bool, TrackerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(&id).is_some())
    }

    /// Count todos
    pub fn count(&self) -> Result<usize, TrackerError> {
        let data = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
