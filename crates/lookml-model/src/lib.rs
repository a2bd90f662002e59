//! Data model shared by the LookML view generator crates.
//!
//! The types here carry no I/O: sheets arrive already read, table
//! definitions are built by `lookml-ingest`, and rendered fields are
//! produced by `lookml-core`.

pub mod column;
pub mod enums;
pub mod error;
pub mod ids;
pub mod lookup;
pub mod options;
pub mod processing;
pub mod table;
pub mod view;

pub use column::ColumnSpec;
pub use enums::{ColumnType, FieldKind};
pub use error::{ModelError, Result};
pub use ids::TableId;
pub use lookup::HeaderLookup;
pub use options::{DEFAULT_BASE_VIEWS_DIR, DEFAULT_LINK_EXCLUDED_COLUMNS, GeneratorOptions};
pub use processing::{TableReport, WriteStatus};
pub use table::{Sheet, SheetRow, TableDefinition};
pub use view::{FieldOrigin, OutputView, RenderedField};
