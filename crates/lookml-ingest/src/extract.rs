//! Building table definitions from row groups.

use lookml_model::{ColumnSpec, Sheet, TableDefinition, TableId};

use crate::error::{IngestError, Result};
use crate::segment::RowGroup;

pub const ID_COLUMN: &str = "ID";
pub const TABLE_NAME_COLUMN: &str = "TABLE NAME";
pub const COLUMN_NAME_COLUMN: &str = "COLUMN NAME";
pub const DESCRIPTION_COLUMN: &str = "DESCRIPTION";
pub const TYPE_COLUMN: &str = "TYPE";
pub const LABEL_COLUMN: &str = "LABEL";
pub const GROUP_LABEL_COLUMN: &str = "GROUP_LABEL";

/// Headers every metadata sheet must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    ID_COLUMN,
    TABLE_NAME_COLUMN,
    COLUMN_NAME_COLUMN,
    DESCRIPTION_COLUMN,
    TYPE_COLUMN,
    LABEL_COLUMN,
    GROUP_LABEL_COLUMN,
];

/// Positions of the required headers within a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub id: usize,
    pub table_name: usize,
    pub column_name: usize,
    pub description: usize,
    pub column_type: usize,
    pub label: usize,
    pub group_label: usize,
}

impl ColumnIndices {
    /// Resolves every required header, failing on the first one absent.
    pub fn resolve(sheet: &Sheet) -> Result<Self> {
        let lookup = sheet.lookup();
        let index = |column: &str| {
            lookup
                .index_of(column)
                .ok_or_else(|| IngestError::MissingColumn {
                    column: column.to_string(),
                })
        };
        Ok(Self {
            id: index(ID_COLUMN)?,
            table_name: index(TABLE_NAME_COLUMN)?,
            column_name: index(COLUMN_NAME_COLUMN)?,
            description: index(DESCRIPTION_COLUMN)?,
            column_type: index(TYPE_COLUMN)?,
            label: index(LABEL_COLUMN)?,
            group_label: index(GROUP_LABEL_COLUMN)?,
        })
    }
}

/// Converts one row group into a table definition.
///
/// Every row must carry the same non-blank `TABLE NAME` and a non-blank
/// `COLUMN NAME`.
pub fn build_table_definition(indices: &ColumnIndices, group: &RowGroup) -> Result<TableDefinition> {
    let Some(first) = group.rows.first() else {
        return Err(IngestError::EmptyGroup { group: group.index });
    };
    let table_name = first.cell(indices.table_name).trim();
    let table_id = TableId::new(table_name).map_err(|_| IngestError::MalformedGroup {
        group: group.index,
        reason: "TABLE NAME is blank on the first row".to_string(),
    })?;

    let mut columns = Vec::with_capacity(group.rows.len());
    for (row_idx, row) in group.rows.iter().enumerate() {
        let name = row.cell(indices.table_name).trim();
        if name != table_id.as_str() {
            return Err(IngestError::MalformedGroup {
                group: group.index,
                reason: format!(
                    "TABLE NAME '{name}' on row {} differs from '{table_id}'",
                    row_idx + 1
                ),
            });
        }
        let column = ColumnSpec::new(
            row.cell(indices.column_name),
            row.cell(indices.column_type),
            row.cell(indices.label),
            row.cell(indices.group_label),
            row.cell(indices.description),
        )
        .map_err(|_| IngestError::BlankColumnName {
            table: table_id.to_string(),
            row: row_idx + 1,
        })?;
        columns.push(column);
    }

    Ok(TableDefinition::new(table_id, columns))
}

/// Builds a table definition for every group, in sheet order.
///
/// Missing required headers fail the whole sheet; a malformed group only
/// fails its own entry.
pub fn extract_tables(
    sheet: &Sheet,
    groups: &[RowGroup],
) -> Result<Vec<Result<TableDefinition>>> {
    let indices = ColumnIndices::resolve(sheet)?;
    Ok(groups
        .iter()
        .map(|group| build_table_definition(&indices, group))
        .collect())
}
