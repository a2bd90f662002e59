//! Configuration options for view generation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Template directory used when nothing else is configured.
pub const DEFAULT_BASE_VIEWS_DIR: &str = "#models/_base/views";

/// Reserved bookkeeping columns left out of the relationship graph.
pub const DEFAULT_LINK_EXCLUDED_COLUMNS: &[&str] = &[
    "FROM_DATE",
    "TO_DATE",
    "IS_LAST_FLAG",
    "LINEAGE_ID",
    "LOAD_TS",
    "LAST_MOD_TS",
    "SOURCE_SYSTEM_ID",
    "EFFECTIVE_START_DATE",
    "EFFECTIVE_END_DATE",
];

/// Options controlling how views are rendered and where templates live.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Directory holding the base template `.view.lkml` files.
    pub base_views_dir: Option<PathBuf>,

    /// Prefix of the `include:` path emitted for each extended template.
    pub include_prefix: String,

    /// User attribute holding the per-tenant dataset identifier.
    pub tenant_attribute: String,

    /// Group label given to `sum` measures.
    pub summary_group_label: String,

    /// Group label given to `count` measures.
    pub quantity_group_label: String,

    /// Named value format applied to measures.
    pub value_format_name: String,

    /// Column names ignored when building the relationship graph.
    pub link_excluded_columns: Vec<String>,

    /// Hand-curated LookML snippets replacing the generated field.
    /// Key: column name (matched case-insensitively).
    pub predefined_columns: BTreeMap<String, String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            base_views_dir: None,
            include_prefix: "/datasets/_base/views".to_string(),
            tenant_attribute: "bank_id".to_string(),
            summary_group_label: " Summary measures".to_string(),
            quantity_group_label: " Quantity measures".to_string(),
            value_format_name: "decimal_2".to_string(),
            link_excluded_columns: DEFAULT_LINK_EXCLUDED_COLUMNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            predefined_columns: BTreeMap::new(),
        }
    }
}

impl GeneratorOptions {
    pub fn with_base_views_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_views_dir = Some(dir.into());
        self
    }

    pub fn with_predefined_column(
        mut self,
        column: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        self.predefined_columns.insert(column.into(), snippet.into());
        self
    }

    /// Predefined snippet for a column, matching the name case-insensitively.
    pub fn predefined_column(&self, column: &str) -> Option<&str> {
        let key = column.trim().to_uppercase();
        self.predefined_columns
            .iter()
            .find(|(name, _)| name.trim().to_uppercase() == key)
            .map(|(_, snippet)| snippet.as_str())
    }

    /// Path of the `include:` directive for a base template.
    pub fn include_path(&self, template: &str) -> String {
        format!(
            "{}/{}.view.lkml",
            self.include_prefix.trim_end_matches('/'),
            template
        )
    }
}
