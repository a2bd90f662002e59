use std::path::PathBuf;

use lookml_model::{TableReport, WriteStatus};

#[derive(Debug, Default)]
pub struct GenerateResult {
    pub inputs: Vec<InputSummary>,
    pub links: Option<LinkSummary>,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

/// Outcome of one input sheet.
#[derive(Debug)]
pub struct InputSummary {
    pub path: PathBuf,
    pub dataset_name: String,
    pub model_name: String,
    pub tables: Vec<TableReport>,
    /// Where the JSON table dump went, when one was written.
    pub dataset_dump: Option<PathBuf>,
}

#[derive(Debug)]
pub struct LinkSummary {
    pub path: PathBuf,
    pub tables: usize,
    pub links: usize,
    pub status: WriteStatus,
}
