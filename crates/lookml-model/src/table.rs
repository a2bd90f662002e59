#![deny(unsafe_code)]

use std::collections::BTreeSet;

use crate::{ColumnSpec, HeaderLookup, TableId};

/// One data row of a sheet, cells aligned with [`Sheet::headers`].
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct SheetRow {
    pub cells: Vec<String>,
}

impl SheetRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Cell at `index`, or an empty string for short rows.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// A normalized sheet: header row resolved, blank rows and blank-header
/// columns removed.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

impl Sheet {
    pub fn new(headers: Vec<String>, rows: Vec<SheetRow>) -> Self {
        Self { headers, rows }
    }

    pub fn lookup(&self) -> HeaderLookup {
        HeaderLookup::new(&self.headers)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One logical table extracted from a sheet.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TableDefinition {
    pub table_id: TableId,
    pub columns: Vec<ColumnSpec>,
}

impl TableDefinition {
    pub fn new(table_id: TableId, columns: Vec<ColumnSpec>) -> Self {
        Self { table_id, columns }
    }

    /// Upper-cased column names, the identity set used for template matching.
    pub fn column_keys(&self) -> BTreeSet<String> {
        self.columns.iter().map(ColumnSpec::key).collect()
    }

    /// Columns ordered by source name (case-sensitive, stable for ties).
    pub fn sorted_columns(&self) -> Vec<&ColumnSpec> {
        let mut columns: Vec<&ColumnSpec> = self.columns.iter().collect();
        columns.sort_by(|a, b| a.name().cmp(b.name()));
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str) -> ColumnSpec {
        ColumnSpec::new(name, "string", "", "", "").unwrap()
    }

    #[test]
    fn sorts_columns_case_sensitively() {
        let table = TableDefinition::new(
            TableId::new("T").unwrap(),
            vec![spec("b_col"), spec("A_COL"), spec("B_COL")],
        );
        let names: Vec<&str> = table.sorted_columns().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["A_COL", "B_COL", "b_col"]);
    }

    #[test]
    fn column_keys_are_upper_cased() {
        let table = TableDefinition::new(TableId::new("T").unwrap(), vec![spec("load_ts")]);
        assert!(table.column_keys().contains("LOAD_TS"));
    }

    #[test]
    fn short_rows_read_as_blank_cells() {
        let row = SheetRow::new(["1"]);
        assert_eq!(row.cell(0), "1");
        assert_eq!(row.cell(3), "");
    }
}
