//! Closed enumerations for field kinds and declared column types.
//!
//! Spreadsheet input carries both concepts as free text; these enums pin
//! the recognised values so the renderer can match exhaustively.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a LookML field, which is also the output partition it lands in.
///
/// Variant order is the order partitions are emitted in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Non-aggregated descriptive field.
    Dimension,
    /// Time-bucketed field exposing derived time grains.
    DimensionGroup,
    /// Aggregated numeric field.
    Measure,
}

impl FieldKind {
    /// All kinds in emission order.
    pub const ALL: [FieldKind; 3] = [
        FieldKind::Dimension,
        FieldKind::DimensionGroup,
        FieldKind::Measure,
    ];

    /// Returns the LookML keyword for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Dimension => "dimension",
            FieldKind::DimensionGroup => "dimension_group",
            FieldKind::Measure => "measure",
        }
    }

    /// Infers the kind of a literal LookML snippet from the keyword it declares.
    ///
    /// `dimension_group:` takes precedence over `measure:`; anything else is a
    /// dimension.
    pub fn from_snippet(text: &str) -> Self {
        if text.contains("dimension_group:") {
            FieldKind::DimensionGroup
        } else if text.contains("measure:") {
            FieldKind::Measure
        } else {
            FieldKind::Dimension
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared data type of a column, as written in the `TYPE` cell.
///
/// Parsing is case-insensitive and total: unrecognised values are kept in
/// [`ColumnType::Other`] exactly as declared (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Date,
    DateTime,
    Timestamp,
    /// `number`, `integer` and `numeric`.
    Number,
    String,
    YesNo,
    Sum,
    Count,
    Other(String),
}

impl ColumnType {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "date" => ColumnType::Date,
            "datetime" => ColumnType::DateTime,
            "timestamp" => ColumnType::Timestamp,
            "number" | "integer" | "numeric" => ColumnType::Number,
            "string" => ColumnType::String,
            "yesno" => ColumnType::YesNo,
            "sum" => ColumnType::Sum,
            "count" => ColumnType::Count,
            _ => ColumnType::Other(trimmed.to_string()),
        }
    }

    /// Partition a column of this type renders into.
    pub fn field_kind(&self) -> FieldKind {
        match self {
            ColumnType::Date | ColumnType::DateTime => FieldKind::DimensionGroup,
            ColumnType::Sum | ColumnType::Count => FieldKind::Measure,
            ColumnType::Timestamp
            | ColumnType::Number
            | ColumnType::String
            | ColumnType::YesNo
            | ColumnType::Other(_) => FieldKind::Dimension,
        }
    }

    /// Date-like types default their group label to the column label.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::Date | ColumnType::DateTime)
    }

    /// Suffix appended to the field name for measure types.
    pub fn measure_suffix(&self) -> Option<&'static str> {
        match self {
            ColumnType::Sum => Some("_sum"),
            ColumnType::Count => Some("_count"),
            _ => None,
        }
    }

    /// The LookML `type:` value for dimension-like types.
    pub fn lookml_type(&self) -> &str {
        match self {
            ColumnType::Date | ColumnType::DateTime => "time",
            ColumnType::Timestamp => "date_time",
            ColumnType::Number => "number",
            ColumnType::String => "string",
            ColumnType::YesNo => "yesno",
            ColumnType::Sum => "sum",
            ColumnType::Count => "count",
            ColumnType::Other(raw) => raw,
        }
    }
}
