use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use lookml_model::{TableReport, WriteStatus};

use crate::types::{GenerateResult, InputSummary, LinkSummary};

pub fn print_summary(result: &GenerateResult) {
    for input in &result.inputs {
        print_input(input);
    }
    if let Some(links) = &result.links {
        print_link_summary(links);
    }
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn print_link_summary(links: &LinkSummary) {
    println!(
        "Links: {} ({} tables, {} links, {})",
        links.path.display(),
        links.tables,
        links.links,
        links.status
    );
}

fn print_input(input: &InputSummary) {
    println!("Input: {}", input.path.display());
    println!("Dataset: {}  Model: {}", input.dataset_name, input.model_name);
    if let Some(path) = &input.dataset_dump {
        println!("Dataset dump: {}", path.display());
    }
    if input.tables.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Extends"),
        header_cell("Dimensions"),
        header_cell("Groups"),
        header_cell("Measures"),
        header_cell("Hidden"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);

    let mut totals = [0usize; 4];
    for report in &input.tables {
        let counts = counts(report);
        for (total, count) in totals.iter_mut().zip(counts) {
            *total += count;
        }
        table.add_row(vec![
            Cell::new(&report.table_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            extends_cell(&report.extends),
            count_cell(counts[0]),
            count_cell(counts[1]),
            count_cell(counts[2]),
            count_cell(counts[3]),
            status_cell(report.status),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} tables", input.tables.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals[0]).add_attribute(Attribute::Bold),
        Cell::new(totals[1]).add_attribute(Attribute::Bold),
        Cell::new(totals[2]).add_attribute(Attribute::Bold),
        Cell::new(totals[3]).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn counts(report: &TableReport) -> [usize; 4] {
    [
        report.dimensions,
        report.dimension_groups,
        report.measures,
        report.hidden,
    ]
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(25)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn extends_cell(extends: &[String]) -> Cell {
    if extends.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(extends.join(", "))
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn status_cell(status: WriteStatus) -> Cell {
    match status {
        WriteStatus::Written => Cell::new("written")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        WriteStatus::Unchanged => Cell::new("unchanged"),
        WriteStatus::Skipped => dim_cell("skipped"),
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
