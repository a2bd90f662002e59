//! Spreadsheet ingestion for the LookML view generator.
//!
//! This crate turns a column-metadata spreadsheet into table definitions:
//!
//! - **Reading**: `.xlsx`/`.xls`/`.xlsb`/`.ods` via calamine, `.csv` via csv
//! - **Normalization**: drop blank rows, consume the label row, promote the
//!   header row, drop blank-header columns
//! - **Segmentation**: split the sheet into row groups at blank-`ID` rows
//! - **Extraction**: build a [`TableDefinition`](lookml_model::TableDefinition)
//!   per group, checking required headers and `TABLE NAME` consistency
//! - **Dump**: serialize the segmented groups as JSON
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use lookml_ingest::{extract_tables, read_sheet, segment_rows};
//!
//! let sheet = read_sheet(Path::new("DM_CLIENT.xlsx"))?;
//! let groups = segment_rows(&sheet)?;
//! for table in extract_tables(&sheet, &groups)? {
//!     println!("{}", table?.table_id);
//! }
//! ```

mod dump;
mod error;
mod extract;
mod json;
mod normalize;
mod reader;
mod segment;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use normalize::{normalize_header, normalize_sheet};
pub use reader::{SheetFormat, dataset_name, read_raw_rows, read_sheet};

// === Segmentation ===
pub use segment::{RowGroup, Segmenter, segment_rows};

// === Table Extraction ===
pub use extract::{
    COLUMN_NAME_COLUMN, ColumnIndices, DESCRIPTION_COLUMN, GROUP_LABEL_COLUMN, ID_COLUMN,
    LABEL_COLUMN, REQUIRED_COLUMNS, TABLE_NAME_COLUMN, TYPE_COLUMN, build_table_definition,
    extract_tables,
};

// === Dataset Dump ===
pub use dump::{DatasetDump, build_dataset_dump, write_dataset_dump};
pub use json::to_pretty_json;
