//! YAML export functionality
//!
//! Exports the complete database to YAML format for human-readable backup.

use crate::error::TrackerResult;
use crate::export::json::FullExport;
use crate::storage::Storage;
use std::io::Write;

/// Export the full database to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> TrackerResult<()> {
    let export = FullExport::from_storage(storage)?;

    // Add a header comment
    writeln!(writer, "# Expense Tracker Full Database Export")
        .map_err(|e| crate::error::TrackerError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| crate::error::TrackerError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| crate::error::TrackerError::Export(e.to_string()))?;
    writeln!(writer, "#").map_err(|e| crate::error::TrackerError::Export(e.to_string()))?;
    writeln!(
        writer,
        "# This file can be used to restore your tracker data."
    )
    .map_err(|e| crate::error::TrackerError::Export(e.to_string()))?;
    writeln!(
        writer,
        "# Keep it secure - it contains all your financial data."
    )
    .map_err(|e| crate::error::TrackerError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| crate::error::TrackerError::Export(e.to_string()))?;

    // Serialize to YAML
    serde_yaml::to_writer(writer, &export)
        .map_err(|e| crate::error::TrackerError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a YAML export
pub fn import_from_yaml(yaml_str: &str) -> TrackerResult<FullExport> {
    let export: FullExport = serde_yaml::from_str(yaml_str)
        .map_err(|e| crate::error::TrackerError::Import(e.to_string()))?;

    // Validate the import
    export
        .validate()
        .map_err(crate::error::TrackerError::Import)?;

    Ok(export)
}
