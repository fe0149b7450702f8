//! CSV export functionality
//!
//! Exports transaction lists to CSV with proper quoting of titles that
//! contain delimiters.

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::models::Transaction;

/// Export transactions to CSV
///
/// Columns are `Title,Amount,Date,Type,Category`. Amounts are decimal
/// dollars, dates ISO 8601.
pub fn export_transactions_csv<W: Write>(
    transactions: &[Transaction],
    writer: &mut W,
) -> TrackerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["Title", "Amount", "Date", "Type", "Category"])
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    for txn in transactions {
        let amount = txn.amount.to_decimal_string();
        let date = txn.date.to_string();
        csv_writer
            .write_record([
                txn.title.as_str(),
                amount.as_str(),
                date.as_str(),
                txn.kind.as_str(),
                txn.category.as_str(),
            ])
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}
