use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of writing one view file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStatus {
    /// The file was created or its content changed.
    Written,
    /// The file already held identical content.
    Unchanged,
    /// Nothing was written (dry run).
    Skipped,
}

impl fmt::Display for WriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WriteStatus::Written => "written",
            WriteStatus::Unchanged => "unchanged",
            WriteStatus::Skipped => "skipped",
        };
        f.write_str(label)
    }
}

/// Per-table summary of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table_id: String,
    pub extends: Vec<String>,
    pub dimensions: usize,
    pub dimension_groups: usize,
    pub measures: usize,
    pub hidden: usize,
    pub output_path: PathBuf,
    pub status: WriteStatus,
}
