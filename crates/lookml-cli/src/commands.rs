use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use lookml_core::{
    build_link_data_array, build_view, load_link_source, output_path, render_view_text,
    write_link_data, write_view,
};
use lookml_ingest::{
    build_dataset_dump, dataset_name, extract_tables, read_sheet, segment_rows,
    write_dataset_dump,
};
use lookml_model::{FieldKind, GeneratorOptions, TableDefinition, TableReport};
use lookml_templates::{TemplateRegistry, resolve_base_views_dir};

use crate::cli::{GenerateArgs, LinksArgs, TemplatesArgs};
use crate::summary::{apply_table_style, header_cell};
use crate::types::{GenerateResult, InputSummary, LinkSummary};

/// Loads generator options from an optional TOML file.
pub fn load_options(path: Option<&Path>) -> Result<GeneratorOptions> {
    let Some(path) = path else {
        return Ok(GeneratorOptions::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

pub fn run_templates(args: &TemplatesArgs, options: &GeneratorOptions) -> Result<()> {
    let dir = resolve_base_views_dir(args.base_views.clone(), options);
    let registry = TemplateRegistry::load(&dir);
    match registry.root() {
        Some(root) => println!("Base views: {}", root.display()),
        None => println!("Base views: {} (unavailable)", dir.display()),
    }
    if registry.is_empty() {
        println!("No templates found.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Template"),
        header_cell("Dimensions"),
        header_cell("Groups"),
        header_cell("Measures"),
    ]);
    apply_table_style(&mut table);
    for template in registry.iter() {
        let count = |kind: FieldKind| template.fields.values().filter(|k| **k == kind).count();
        table.add_row(vec![
            template.name.clone(),
            count(FieldKind::Dimension).to_string(),
            count(FieldKind::DimensionGroup).to_string(),
            count(FieldKind::Measure).to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_links(args: &LinksArgs, options: &GeneratorOptions) -> Result<LinkSummary> {
    build_links(&args.input, &args.output, options, false)
}

pub fn run_generate(args: &GenerateArgs, options: &GeneratorOptions) -> Result<GenerateResult> {
    let registry = if args.no_lookml {
        TemplateRegistry::empty()
    } else {
        let dir = resolve_base_views_dir(args.base_views.clone(), options);
        TemplateRegistry::load(&dir)
    };

    let mut result = GenerateResult::default();
    let mut claimed = HashSet::new();
    for path in &args.files {
        match process_input(path, args, &registry, options, &mut claimed, &mut result.errors) {
            Ok(summary) => result.inputs.push(summary),
            Err(error) => {
                warn!(input = %path.display(), %error, "input failed");
                result.errors.push(format!("{}: {error}", path.display()));
            }
        }
    }

    if let Some(connections) = &args.connections {
        match build_links(connections, &args.links_output, options, args.dry_run) {
            Ok(summary) => result.links = Some(summary),
            Err(error) => result
                .errors
                .push(format!("{}: {error}", connections.display())),
        }
    }

    result.has_errors = !result.errors.is_empty();
    Ok(result)
}

fn process_input(
    path: &Path,
    args: &GenerateArgs,
    registry: &TemplateRegistry,
    options: &GeneratorOptions,
    claimed: &mut HashSet<PathBuf>,
    errors: &mut Vec<String>,
) -> Result<InputSummary> {
    let dataset_name = dataset_name(path);
    let model_name = args
        .model_name
        .clone()
        .unwrap_or_else(|| dataset_name.clone());
    let span = info_span!("generate", input = %path.display(), dataset = %dataset_name);
    let _guard = span.enter();
    let start = Instant::now();

    let sheet = read_sheet(path)?;
    let groups = segment_rows(&sheet)?;
    info!(groups = groups.len(), "sheet segmented");

    let mut summary = InputSummary {
        path: path.to_path_buf(),
        dataset_name: dataset_name.clone(),
        model_name: model_name.clone(),
        tables: Vec::new(),
        dataset_dump: None,
    };

    if args.save_datasets && !args.dry_run {
        let dump_path = args.datasets_dir.join(format!("{dataset_name}.json"));
        match write_dataset_dump(&dump_path, &build_dataset_dump(&sheet, &groups)) {
            Ok(()) => summary.dataset_dump = Some(dump_path),
            Err(error) => {
                warn!(%error, "dataset dump skipped");
                errors.push(format!("{}: {error}", path.display()));
            }
        }
    }

    if !args.no_lookml {
        let context = ViewContext {
            dataset_name: &dataset_name,
            model_name: &model_name,
            output_dir: &args.output_dir,
            registry,
            options,
            dry_run: args.dry_run,
        };
        for table in extract_tables(&sheet, &groups)? {
            let outcome = table
                .map_err(anyhow::Error::from)
                .and_then(|table| generate_table(&table, &context, claimed));
            match outcome {
                Ok(report) => summary.tables.push(report),
                Err(error) => {
                    warn!(%error, "table skipped");
                    errors.push(format!("{}: {error}", path.display()));
                }
            }
        }
    }

    info!(
        tables = summary.tables.len(),
        duration_ms = start.elapsed().as_millis(),
        "input complete"
    );
    Ok(summary)
}

struct ViewContext<'a> {
    dataset_name: &'a str,
    model_name: &'a str,
    output_dir: &'a Path,
    registry: &'a TemplateRegistry,
    options: &'a GeneratorOptions,
    dry_run: bool,
}

/// Renders and writes one view. `claimed` holds the output paths already
/// produced in this run; a table mapping onto one of them is rejected.
fn generate_table(
    table: &TableDefinition,
    context: &ViewContext<'_>,
    claimed: &mut HashSet<PathBuf>,
) -> Result<TableReport> {
    let span = info_span!("table", table = %table.table_id);
    let _guard = span.enter();

    let path = output_path(context.output_dir, context.model_name, &table.table_id);
    if !claimed.insert(path.clone()) {
        bail!(
            "table {} maps to {}, which an earlier table already produced in this run",
            table.table_id,
            path.display()
        );
    }

    let view = build_view(table, context.dataset_name, context.registry, context.options);
    let text = render_view_text(&view);
    let status = write_view(&path, &text, context.dry_run)?;
    info!(
        path = %path.display(),
        %status,
        extends = view.extends.len(),
        columns = table.columns.len(),
        "view generated"
    );

    Ok(TableReport {
        table_id: table.table_id.to_string(),
        dimensions: view.count(FieldKind::Dimension),
        dimension_groups: view.count(FieldKind::DimensionGroup),
        measures: view.count(FieldKind::Measure),
        hidden: view.placeholder_count(),
        extends: view.extends,
        output_path: path,
        status,
    })
}

fn build_links(
    input: &Path,
    output: &Path,
    options: &GeneratorOptions,
    dry_run: bool,
) -> Result<LinkSummary> {
    let source = load_link_source(input)?;
    let tables = source.table_columns();
    let graph = build_link_data_array(&tables, &options.link_excluded_columns);
    let status = write_link_data(output, &graph, dry_run)?;
    Ok(LinkSummary {
        path: output.to_path_buf(),
        tables: tables.len(),
        links: graph.link_data_array.len(),
        status,
    })
}
