//! JSON export functionality
//!
//! Exports the complete database to JSON format with schema versioning.

use crate::error::TrackerResult;
use crate::models::{CategoryBudget, FinancialTodo, Transaction};
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All transactions
    pub transactions: Vec<Transaction>,

    /// All category budgets
    pub budgets: Vec<CategoryBudget>,

    /// All financial todos
    pub todos: Vec<FinancialTodo>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Total number of transactions
    pub transaction_count: usize,

    /// Total number of budgets
    pub budget_count: usize,

    /// Total number of todos
    pub todo_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> TrackerResult<Self> {
        let transactions = storage.transactions.get_all()?;
        let budgets = storage.budgets.get_all()?;
        let todos = storage.todos.get_all()?;

        // Calculate metadata
        let earliest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .min()
            .map(|d| d.to_string());

        let latest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            budget_count: budgets.len(),
            todo_count: todos.len(),
            earliest_transaction,
            latest_transaction,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            budgets,
            todos,
            metadata,
        })
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        // Check schema version
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        // Check budget months are valid calendar months
        for budget in &self.budgets {
            if !(1..=12).contains(&budget.month) {
                return Err(format!(
                    "Budget for {} has invalid month {}",
                    budget.category, budget.month
                ));
            }
        }

        // Check referential integrity
        let transaction_ids: std::collections::HashSet<_> =
            self.transactions.iter().map(|t| t.id).collect();

        for todo in &self.todos {
            if let Some(txn_id) = todo.linked_transaction {
                if !transaction_ids.contains(&txn_id) {
                    return Err(format!(
                        "Todo {} references unknown transaction {}",
                        todo.id, txn_id
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Export the full database to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> TrackerResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| crate::error::TrackerError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a JSON export (for verification/restore)
pub fn import_from_json(json_str: &str) -> TrackerResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)
        .map_err(|e| crate::error::TrackerError::Import(e.to_string()))?;

    // Validate the import
    export
        .validate()
        .map_err(crate::error::TrackerError::Import)?;

    Ok(export)
}
