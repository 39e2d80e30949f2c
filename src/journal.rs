use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::codec::FileReport;
use crate::error::Result;

/// One line of the operation journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub timestamp: String,
    pub action: String,
    pub source: String,
    pub destination: String,
    pub tree: String,
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl JournalEntry {
    pub fn new(
        action: &str,
        source: &Path,
        destination: &Path,
        tree: &Path,
        report: &FileReport,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            action: action.to_string(),
            source: source.display().to_string(),
            destination: destination.display().to_string(),
            tree: tree.display().to_string(),
            input_bytes: report.input_bytes,
            output_bytes: report.output_bytes,
        }
    }
}

/// Appends `entry` as a single JSON line to the journal at `path`.
pub fn append(path: &Path, entry: &JournalEntry) -> Result<()> {
    let json = serde_json::to_string(entry).map_err(std::io::Error::other)?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", json)?;
    Ok(())
}
