//! Per-column LookML field rendering.

use std::collections::BTreeSet;

use lookml_model::{ColumnSpec, ColumnType, FieldKind, FieldOrigin, GeneratorOptions, RenderedField};

const FIELD_INDENT: &str = "  ";
const ATTRIBUTE_INDENT: &str = "    ";
const TIMEFRAMES: &str = "[date, day_of_week, month, quarter, year]";

/// Renders one column into exactly one output partition.
///
/// `commented` holds the upper-cased names already declared by an extended
/// template; such columns only get an empty stub so the template's
/// definition applies.
pub fn render_column(
    column: &ColumnSpec,
    commented: &BTreeSet<String>,
    options: &GeneratorOptions,
) -> RenderedField {
    let inherited = commented.contains(&column.key());

    if let Some(snippet) = options.predefined_column(column.name()) {
        let kind = FieldKind::from_snippet(snippet);
        let name = column.field_name();
        if inherited {
            return stub(kind, name);
        }
        return RenderedField {
            kind,
            name,
            origin: FieldOrigin::Override,
            text: snippet.trim_end().to_string(),
        };
    }

    let column_type = column.column_type();
    let kind = column_type.field_kind();
    let name = match column_type.measure_suffix() {
        Some(suffix) => format!("{}{suffix}", column.field_name()),
        None => column.field_name(),
    };
    if inherited {
        return stub(kind, name);
    }

    let mut block = FieldBlock::open(kind, &name);
    block.attr("label", &quoted(&column.label));
    match kind {
        FieldKind::Measure => {
            let group_label = match column_type {
                ColumnType::Count => &options.quantity_group_label,
                _ => &options.summary_group_label,
            };
            block.attr("group_label", &quoted(group_label));
            block.attr("description", &quoted(&column.escaped_description()));
            block.attr("type", column_type.lookml_type());
            block.attr("value_format_name", &options.value_format_name);
            block.attr("sql", &format!("${{{}}} ;;", column.field_name()));
        }
        FieldKind::DimensionGroup => {
            block.attr("group_label", &quoted(&column.resolved_group_label()));
            block.attr("description", &quoted(&column.escaped_description()));
            block.attr("type", column_type.lookml_type());
            block.attr("datatype", "date");
            block.attr("allow_fill", "yes");
            block.attr("timeframes", TIMEFRAMES);
            block.attr("drill_fields", &format!("[{name}_month, {name}_date]"));
            block.attr("sql", &table_sql(column));
        }
        FieldKind::Dimension => {
            block.attr("group_label", &quoted(&column.resolved_group_label()));
            block.attr("description", &quoted(&column.escaped_description()));
            block.attr("type", column_type.lookml_type());
            if column_type == ColumnType::Timestamp {
                block.attr("convert_tz", "no");
            }
            block.attr("sql", &table_sql(column));
        }
    }

    RenderedField {
        kind,
        name,
        origin: FieldOrigin::Rendered,
        text: block.close(),
    }
}

/// Hidden declaration for a template field the table does not provide.
pub fn render_placeholder(field: &str, kind: FieldKind) -> RenderedField {
    let name = field.to_lowercase();
    RenderedField {
        kind,
        text: format!("{FIELD_INDENT}{kind}: {name} {{ hidden: yes }}"),
        name,
        origin: FieldOrigin::Placeholder,
    }
}

fn stub(kind: FieldKind, name: String) -> RenderedField {
    RenderedField {
        kind,
        text: format!("{FIELD_INDENT}{kind}: {name} {{}}"),
        name,
        origin: FieldOrigin::Inherited,
    }
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

fn table_sql(column: &ColumnSpec) -> String {
    format!("${{TABLE}}.{} ;;", column.name())
}

struct FieldBlock {
    lines: Vec<String>,
}

impl FieldBlock {
    fn open(kind: FieldKind, name: &str) -> Self {
        Self {
            lines: vec![format!("{FIELD_INDENT}{kind}: {name} {{")],
        }
    }

    fn attr(&mut self, key: &str, value: &str) {
        self.lines.push(format!("{ATTRIBUTE_INDENT}{key}: {value}"));
    }

    fn close(mut self) -> String {
        self.lines.push(format!("{FIELD_INDENT}}}"));
        self.lines.join("\n")
    }
}
