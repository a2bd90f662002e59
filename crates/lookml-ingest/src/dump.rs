//! JSON dump of segmented tables.

use std::fs;
use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use lookml_model::Sheet;
use tempfile::NamedTempFile;

use crate::error::{IngestError, Result};
use crate::extract::TABLE_NAME_COLUMN;
use crate::json::to_pretty_json;
use crate::segment::RowGroup;

/// One row as a header-ordered record; blank cells are `None`.
pub type DumpRecord = IndexMap<String, Option<String>>;

/// `[{table_name: [records]}]`, one entry per row group in sheet order.
pub type DatasetDump = Vec<IndexMap<String, Vec<DumpRecord>>>;

/// Builds the dump for a sheet's row groups.
///
/// Each group is keyed by the `TABLE NAME` of its first row, as read.
pub fn build_dataset_dump(sheet: &Sheet, groups: &[RowGroup]) -> DatasetDump {
    let table_index = sheet.lookup().index_of(TABLE_NAME_COLUMN);
    groups
        .iter()
        .map(|group| {
            let key = match (table_index, group.rows.first()) {
                (Some(idx), Some(row)) => row.cell(idx).to_string(),
                _ => String::new(),
            };
            let records = group
                .rows
                .iter()
                .map(|row| {
                    sheet
                        .headers
                        .iter()
                        .enumerate()
                        .map(|(idx, header)| {
                            let value = row.cell(idx);
                            let value = (!value.is_empty()).then(|| value.to_string());
                            (header.clone(), value)
                        })
                        .collect()
                })
                .collect();
            let mut entry = IndexMap::new();
            entry.insert(key, records);
            entry
        })
        .collect()
}

/// Writes the dump as four-space indented JSON.
///
/// The file is staged next to its destination and renamed into place, so a
/// failed write leaves any previous dump untouched.
pub fn write_dataset_dump(path: &Path, dump: &DatasetDump) -> Result<()> {
    let json = to_pretty_json(dump)?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent).map_err(|e| IngestError::file_write(parent, e))?;

    let mut staged = NamedTempFile::new_in(parent).map_err(|e| IngestError::file_write(path, e))?;
    staged
        .write_all(json.as_bytes())
        .map_err(|e| IngestError::file_write(path, e))?;
    staged
        .persist(path)
        .map_err(|e| IngestError::file_write(path, e.error))?;
    tracing::info!(path = %path.display(), tables = dump.len(), "dataset dump written");
    Ok(())
}
