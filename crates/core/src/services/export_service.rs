use chrono::NaiveDate;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::CoreError;
use crate::models::transaction::Transaction;

pub const CSV_HEADER: &str = "Date,Type,Category,Description,Amount,Currency";

/// A rendered CSV file, ready to hand to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// `finsight_export_<YYYY-MM-DD>.csv`
    pub filename: String,
    pub content: String,
}

impl CsvExport {
    /// Write the export into `dir` under its own filename (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, CoreError> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, self.content.as_bytes())?;
        debug!(path = %path.display(), "Wrote CSV export");
        Ok(path)
    }
}

/// Renders transactions as CSV.
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    pub fn filename_for(&self, export_date: NaiveDate) -> String {
        format!("finsight_export_{}.csv", export_date.format("%Y-%m-%d"))
    }

    /// Header plus one row per transaction, in snapshot order, joined by `\n`.
    ///
    /// The description is always quoted with inner quotes doubled; the amount
    /// has exactly two decimals. `currency` is written verbatim on every row.
    pub fn to_csv(&self, transactions: &[Transaction], currency: &str) -> String {
        let mut lines = Vec::with_capacity(transactions.len() + 1);
        lines.push(CSV_HEADER.to_string());

        for tx in transactions {
            lines.push(format!(
                "{},{},{},\"{}\",{:.2},{}",
                tx.day().format("%Y-%m-%d"),
                tx.tx_type,
                tx.category,
                tx.description.replace('"', "\"\""),
                tx.amount,
                currency,
            ));
        }

        lines.join("\n")
    }

    pub fn export(&self, transactions: &[Transaction], currency: &str, export_date: NaiveDate) -> CsvExport {
        debug!(rows = transactions.len(), currency, "Rendering CSV export");
        CsvExport {
            filename: self.filename_for(export_date),
            content: self.to_csv(transactions, currency),
        }
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
