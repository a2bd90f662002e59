//! View assembly and file output.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use lookml_model::{
    FieldKind, FieldOrigin, GeneratorOptions, OutputView, TableDefinition, TableId, WriteStatus,
};
use lookml_templates::{TEMPLATE_SUFFIX, TemplateRegistry};
use tempfile::NamedTempFile;

use crate::error::{GenerateError, Result};
use crate::matcher::match_templates;
use crate::render::{render_column, render_placeholder};

/// Assembles the view for one table.
///
/// Within each partition real fields follow the sorted column order and
/// hidden placeholders come last.
pub fn build_view(
    table: &TableDefinition,
    dataset_name: &str,
    registry: &TemplateRegistry,
    options: &GeneratorOptions,
) -> OutputView {
    let matched = match_templates(&table.column_keys(), registry, options);

    let rendered: Vec<_> = table
        .sorted_columns()
        .into_iter()
        .map(|column| render_column(column, &matched.commented, options))
        .collect();
    let placeholders: Vec<_> = matched
        .missing
        .iter()
        .map(|(field, kind)| render_placeholder(field, *kind))
        .collect();

    let mut fields = Vec::with_capacity(rendered.len() + placeholders.len());
    for kind in FieldKind::ALL {
        fields.extend(rendered.iter().filter(|f| f.kind == kind).cloned());
        fields.extend(placeholders.iter().filter(|f| f.kind == kind).cloned());
    }

    OutputView {
        view_name: table.table_id.view_name(),
        sql_table_name: format!(
            "`{}.{{{{ _user_attributes['{}'] }}}}.{}` ;;",
            dataset_name.to_uppercase(),
            options.tenant_attribute,
            table.table_id
        ),
        includes: matched.includes,
        extends: matched.extends,
        fields,
    }
}

/// Renders the final `.view.lkml` text.
pub fn render_view_text(view: &OutputView) -> String {
    let mut out = String::new();
    for include in &view.includes {
        out.push_str(&format!("include: \"{include}\"\n"));
    }
    out.push_str(&format!("view: {} {{\n", view.view_name));
    out.push_str(&format!("  sql_table_name: {}\n", view.sql_table_name));
    if !view.extends.is_empty() {
        out.push_str(&format!("  extends: [{}]\n", view.extends.join(", ")));
    }

    let mut previous_block = true;
    for field in &view.fields {
        let block = is_block(field.origin);
        if block || previous_block {
            out.push('\n');
        }
        out.push_str(&field.text);
        out.push('\n');
        previous_block = block;
    }
    out.push_str("}\n");
    out
}

fn is_block(origin: FieldOrigin) -> bool {
    matches!(origin, FieldOrigin::Rendered | FieldOrigin::Override)
}

/// `<root>/<model>/<table_lower>.view.lkml`
pub fn output_path(root: &Path, model_name: &str, table_id: &TableId) -> PathBuf {
    root.join(model_name)
        .join(format!("{}{TEMPLATE_SUFFIX}", table_id.view_name()))
}

/// Writes `contents` to `path` through a temporary file in the same
/// directory.
///
/// Identical existing content is left untouched and reported as
/// [`WriteStatus::Unchanged`]; `dry_run` skips the filesystem entirely.
pub fn write_view(path: &Path, contents: &str, dry_run: bool) -> Result<WriteStatus> {
    if dry_run {
        return Ok(WriteStatus::Skipped);
    }
    if fs::read(path).is_ok_and(|existing| existing == contents.as_bytes()) {
        return Ok(WriteStatus::Unchanged);
    }

    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(parent).map_err(|e| GenerateError::output_write(parent, e))?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| GenerateError::output_write(path, e))?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| GenerateError::output_write(path, e))?;
    temp.persist(path)
        .map_err(|e| GenerateError::output_write(path, e.error))?;
    Ok(WriteStatus::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookml_model::ColumnSpec;

    fn table(columns: &[(&str, &str)]) -> TableDefinition {
        TableDefinition::new(
            TableId::new("CLIENT").unwrap(),
            columns
                .iter()
                .map(|(name, kind)| ColumnSpec::new(*name, *kind, "L", "", "").unwrap())
                .collect(),
        )
    }

    #[test]
    fn partitions_follow_kind_order() {
        let view = build_view(
            &table(&[("Z_SUM", "sum"), ("A_DATE", "date"), ("M", "string")]),
            "dm_client",
            &TemplateRegistry::empty(),
            &GeneratorOptions::default(),
        );
        let kinds: Vec<_> = view.fields.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::Dimension,
                FieldKind::DimensionGroup,
                FieldKind::Measure
            ]
        );
        assert_eq!(
            view.sql_table_name,
            "`DM_CLIENT.{{ _user_attributes['bank_id'] }}.CLIENT` ;;"
        );
    }

    #[test]
    fn output_path_lower_cases_table() {
        let path = output_path(Path::new("out"), "DM_CLIENT", &TableId::new("CLIENT").unwrap());
        assert_eq!(path, Path::new("out/DM_CLIENT/client.view.lkml"));
    }

    #[test]
    fn dry_run_never_touches_disk() {
        let path = Path::new("/nonexistent/dir/view.view.lkml");
        assert_eq!(write_view(path, "x", true).unwrap(), WriteStatus::Skipped);
        assert!(!path.exists());
    }
}
