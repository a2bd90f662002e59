use serde::{Deserialize, Serialize};

use crate::{ColumnType, ModelError};

/// One column declared in a table definition.
///
/// The name is fixed at construction; identity comparisons use the
/// upper-cased form returned by [`ColumnSpec::key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    name: String,
    pub declared_type: String,
    pub label: String,
    /// Blank means "derive a default" (see [`ColumnSpec::resolved_group_label`]).
    pub group_label: String,
    pub description: String,
}

impl ColumnSpec {
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        label: impl Into<String>,
        group_label: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ModelError::BlankColumnName);
        }
        Ok(Self {
            name: trimmed.to_string(),
            declared_type: declared_type.into(),
            label: label.into(),
            group_label: group_label.into(),
            description: description.into(),
        })
    }

    /// Column name as declared in the sheet.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Upper-cased identity used for template matching.
    pub fn key(&self) -> String {
        self.name.to_uppercase()
    }

    /// Lower-cased name used for LookML field identifiers.
    pub fn field_name(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn column_type(&self) -> ColumnType {
        ColumnType::parse(&self.declared_type)
    }

    /// Description safe to embed in a double-quoted LookML string.
    pub fn escaped_description(&self) -> String {
        self.description.replace('"', "''")
    }

    /// Group label after applying the blank-label defaults.
    ///
    /// Date-like columns fall back to their own label; every other type
    /// falls back to an empty group label.
    pub fn resolved_group_label(&self) -> String {
        if !self.group_label.trim().is_empty() {
            return self.group_label.clone();
        }
        if self.column_type().is_temporal() {
            self.label.clone()
        } else {
            String::new()
        }
    }
}
