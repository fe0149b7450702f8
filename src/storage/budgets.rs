//! Category budget repository for JSON storage
//!
//! Manages loading and saving monthly category budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::TrackerError;
use crate::models::{Category, CategoryBudget, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budgets: Vec<CategoryBudget>,
}

/// Composite key for category budgets
///
/// One budget exists per owner, category, and calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub owner: UserId,
    pub category: Category,
    pub month: u32,
    pub year: i32,
}

impl BudgetKey {
    pub fn new(owner: UserId, category: Category, month: u32, year: i32) -> Self {
        Self {
            owner,
            category,
            month,
            year,
        }
    }
}

/// Repository for category budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budgets: RwLock<HashMap<BudgetKey, CategoryBudget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budgets: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), TrackerError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        budgets.clear();
        for budget in file_data.budgets {
            let key = BudgetKey::new(budget.owner, budget.category, budget.month, budget.year);
            budgets.insert(key, budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budget_list: Vec<_> = budgets.values().cloned().collect();
        budget_list.sort_by(|a, b| {
            a.year
                .cmp(&b.year)
                .then(a.month.cmp(&b.month))
                .then(a.category.cmp(&b.category))
        });

        let file_data = BudgetData {
            budgets: budget_list,
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get the budget for an owner, category, and month
    pub fn get(
        &self,
        owner: UserId,
        category: Category,
        month: u32,
        year: i32,
    ) -> Result<Option<CategoryBudget>, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let key = BudgetKey::new(owner, category, month, year);
        Ok(budgets.get(&key).cloned())
    }

    /// Get all of an owner's budgets for a month, sorted by category
    pub fn get_for_month(
        &self,
        owner: UserId,
        month: u32,
        year: i32,
    ) -> Result<Vec<CategoryBudget>, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut matching: Vec<_> = budgets
            .values()
            .filter(|b| b.owner == owner && b.month == month && b.year == year)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(matching)
    }

    /// Get all budgets
    pub fn get_all(&self) -> Result<Vec<CategoryBudget>, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budget_list: Vec<_> = budgets.values().cloned().collect();
        budget_list.sort_by(|a, b| {
            a.year
                .cmp(&b.year)
                .then(a.month.cmp(&b.month))
                .then(a.category.cmp(&b.category))
        });
        Ok(budget_list)
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: CategoryBudget) -> Result<(), TrackerError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let key = BudgetKey::new(budget.owner, budget.category, budget.month, budget.year);
        budgets.insert(key, budget);
        Ok(())
    }

    /// Delete a budget
    pub fn delete(
        &self,
        owner: UserId,
        category: Category,
        month: u32,
        year: i32,
    ) -> Result<bool, TrackerError> {
        let mut budgets = self
            .budgets
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let key = BudgetKey::new(owner, category, month, year);
        Ok(budgets.remove(&key).is_some())
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, TrackerError> {
        let budgets = self
            .budgets
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budgets.len())
    }
}
