//! Splitting a sheet into per-table row groups.
//!
//! A sheet concatenates several table definitions. Rows accumulate while
//! their `ID` cell is filled; a row with a blank `ID` closes the current
//! group. The fold has two states, [`SegmentState::Idle`] and
//! [`SegmentState::Collecting`].

use lookml_model::{Sheet, SheetRow};

use crate::error::{IngestError, Result};
use crate::extract::ID_COLUMN;

/// Consecutive rows describing one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup {
    /// Zero-based position of the group in the sheet.
    pub index: usize,
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Default)]
enum SegmentState {
    #[default]
    Idle,
    Collecting(Vec<SheetRow>),
}

/// Row-by-row segmentation state machine.
#[derive(Debug, Default)]
pub struct Segmenter {
    state: SegmentState,
    groups: Vec<RowGroup>,
}

impl Segmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one row. `id_blank` marks a group terminator.
    pub fn push(&mut self, row: SheetRow, id_blank: bool) {
        let state = std::mem::take(&mut self.state);
        self.state = match (state, id_blank) {
            (SegmentState::Idle, true) => SegmentState::Idle,
            (SegmentState::Collecting(rows), true) => {
                self.flush(rows);
                SegmentState::Idle
            }
            (SegmentState::Idle, false) => SegmentState::Collecting(vec![row]),
            (SegmentState::Collecting(mut rows), false) => {
                rows.push(row);
                SegmentState::Collecting(rows)
            }
        };
    }

    /// Flushes any pending rows and returns the groups in sheet order.
    pub fn finish(mut self) -> Vec<RowGroup> {
        if let SegmentState::Collecting(rows) = std::mem::take(&mut self.state) {
            self.flush(rows);
        }
        self.groups
    }

    fn flush(&mut self, rows: Vec<SheetRow>) {
        if rows.is_empty() {
            return;
        }
        let index = self.groups.len();
        self.groups.push(RowGroup { index, rows });
    }
}

/// Segments a normalized sheet on its `ID` column.
///
/// A blank-`ID` row with nothing accumulated before it yields no group.
pub fn segment_rows(sheet: &Sheet) -> Result<Vec<RowGroup>> {
    let id_index = sheet
        .lookup()
        .index_of(ID_COLUMN)
        .ok_or_else(|| IngestError::MissingColumn {
            column: ID_COLUMN.to_string(),
        })?;
    let mut segmenter = Segmenter::new();
    for row in &sheet.rows {
        let id_blank = row.cell(id_index).trim().is_empty();
        segmenter.push(row.clone(), id_blank);
    }
    let groups = segmenter.finish();
    tracing::debug!(groups = groups.len(), "sheet segmented");
    Ok(groups)
}
