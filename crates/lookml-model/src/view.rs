use serde::{Deserialize, Serialize};

use crate::FieldKind;

/// Where a rendered field's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrigin {
    /// Rendered from the column's declared type.
    Rendered,
    /// Copied verbatim from the predefined-column table.
    Override,
    /// Supplied by an extended base template; only a stub is emitted.
    Inherited,
    /// Hidden field satisfying a base template column the table lacks.
    Placeholder,
}

/// A single LookML field block belonging to one output partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedField {
    pub kind: FieldKind,
    /// LookML field identifier (lower-case, with any measure suffix).
    pub name: String,
    pub origin: FieldOrigin,
    pub text: String,
}

/// The assembled output for one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputView {
    pub view_name: String,
    pub sql_table_name: String,
    pub includes: Vec<String>,
    pub extends: Vec<String>,
    pub fields: Vec<RenderedField>,
}

impl OutputView {
    /// Fields of one partition, in emission order.
    pub fn partition(&self, kind: FieldKind) -> impl Iterator<Item = &RenderedField> {
        self.fields.iter().filter(move |field| field.kind == kind)
    }

    pub fn count(&self, kind: FieldKind) -> usize {
        self.partition(kind)
            .filter(|field| field.origin != FieldOrigin::Placeholder)
            .count()
    }

    pub fn placeholder_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| field.origin == FieldOrigin::Placeholder)
            .count()
    }
}
