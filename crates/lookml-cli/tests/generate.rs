//! End-to-end runs of the `generate`, `links` and `templates` commands.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use lookml_cli::cli::{Cli, Command, GenerateArgs, LinksArgs};
use lookml_cli::commands::{load_options, run_generate, run_links};
use lookml_model::WriteStatus;

const SHEET: &str = "\
Client data model,,,,,,
ID,TABLE NAME,COLUMN NAME,DESCRIPTION,TYPE,LABEL,GROUP_LABEL
1,CLIENT,CLIENT_ID,Client id,number,Client,
2,CLIENT,BANK_ID,,string,Bank,
3,CLIENT,CREATED,,date,Created,
,,,,,,end
4,ACCOUNT,CLIENT_ID,,number,Client,
5,ACCOUNT,BALANCE,,sum,Balance,
,,,,,,end
6,,BROKEN,,string,Broken,
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let views = dir.path().join("base");
        fs::create_dir_all(&views).unwrap();
        fs::write(
            views.join("_base_bank.view.lkml"),
            "view: _base_bank {\n  dimension: bank_id {}\n  dimension_group: snapshot {}\n}\n",
        )
        .unwrap();
        fs::write(dir.path().join("DM_CLIENT.csv"), SHEET).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn args(&self) -> GenerateArgs {
        GenerateArgs {
            files: vec![self.path("DM_CLIENT.csv")],
            output_dir: self.path("generated"),
            base_views: Some(self.path("base")),
            model_name: None,
            no_lookml: false,
            save_datasets: false,
            datasets_dir: self.path("datasets"),
            connections: None,
            links_output: self.path("link_data.json"),
            dry_run: false,
        }
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn generates_views_and_reports_malformed_table() {
    let fixture = Fixture::new();
    let result = run_generate(&fixture.args(), &Default::default()).unwrap();

    assert!(result.has_errors);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("TABLE NAME"));

    let input = &result.inputs[0];
    assert_eq!(input.model_name, "DM_CLIENT");
    let ids: Vec<_> = input.tables.iter().map(|t| t.table_id.as_str()).collect();
    assert_eq!(ids, vec!["CLIENT", "ACCOUNT"]);
    assert_eq!(input.tables[0].extends, vec!["_base_bank"]);
    assert_eq!(input.tables[0].hidden, 1);
    assert!(input.tables[1].extends.is_empty());

    let client = read(&fixture.path("generated/DM_CLIENT/client.view.lkml"));
    assert!(client.starts_with("include: \"/datasets/_base/views/_base_bank.view.lkml\"\n"));
    assert!(client.contains("  dimension: bank_id {}\n"));
    assert!(client.contains("  dimension_group: snapshot { hidden: yes }\n"));
    assert!(fixture.path("generated/DM_CLIENT/account.view.lkml").is_file());
}

#[test]
fn second_run_leaves_views_unchanged() {
    let fixture = Fixture::new();
    let args = fixture.args();
    run_generate(&args, &Default::default()).unwrap();
    let before = read(&fixture.path("generated/DM_CLIENT/account.view.lkml"));

    let result = run_generate(&args, &Default::default()).unwrap();
    assert!(
        result.inputs[0]
            .tables
            .iter()
            .all(|t| t.status == WriteStatus::Unchanged)
    );
    assert_eq!(read(&fixture.path("generated/DM_CLIENT/account.view.lkml")), before);
}

#[test]
fn dry_run_writes_nothing() {
    let fixture = Fixture::new();
    let mut args = fixture.args();
    args.dry_run = true;
    args.save_datasets = true;
    let result = run_generate(&args, &Default::default()).unwrap();
    assert!(
        result.inputs[0]
            .tables
            .iter()
            .all(|t| t.status == WriteStatus::Skipped)
    );
    assert!(!fixture.path("generated").exists());
    assert!(!fixture.path("datasets").exists());
}

#[test]
fn dump_feeds_relationship_graph() {
    let fixture = Fixture::new();
    let mut args = fixture.args();
    args.no_lookml = true;
    args.save_datasets = true;
    args.connections = Some(fixture.path("datasets/DM_CLIENT.json"));

    let result = run_generate(&args, &Default::default()).unwrap();
    assert!(!result.has_errors, "{:?}", result.errors);
    assert!(!fixture.path("generated").exists());

    let links = result.links.expect("links built");
    assert_eq!(links.links, 1);
    let json: serde_json::Value =
        serde_json::from_str(&read(&fixture.path("link_data.json"))).unwrap();
    let link = &json["linkDataArray"][0];
    assert_eq!(link["from"], "CLIENT");
    assert_eq!(link["to"], "ACCOUNT");
    assert_eq!(link["fromPort"], "CLIENT_ID");
}

#[test]
fn links_command_honours_exclusions() {
    let fixture = Fixture::new();
    let input = fixture.path("tables.json");
    fs::write(
        &input,
        r#"{"T1": [{"COLUMN NAME": "LOAD_TS"}, {"COLUMN NAME": "K"}],
            "T2": [{"COLUMN NAME": "load_ts"}, {"COLUMN NAME": "K"}]}"#,
    )
    .unwrap();
    let summary = run_links(
        &LinksArgs {
            input,
            output: fixture.path("out/links.json"),
        },
        &Default::default(),
    )
    .unwrap();
    assert_eq!(summary.links, 1);
    assert_eq!(summary.status, WriteStatus::Written);
}

#[test]
fn missing_input_is_collected_as_error() {
    let fixture = Fixture::new();
    let mut args = fixture.args();
    args.files = vec![fixture.path("absent.xlsx"), fixture.path("DM_CLIENT.csv")];
    let result = run_generate(&args, &Default::default()).unwrap();
    assert!(result.errors.iter().any(|e| e.contains("absent.xlsx")));
    assert_eq!(result.inputs.len(), 1);
}

#[test]
fn failed_dump_does_not_block_views() {
    let fixture = Fixture::new();
    let blocked = fixture.path("blocked");
    fs::write(&blocked, "not a directory").unwrap();
    let mut args = fixture.args();
    args.save_datasets = true;
    args.datasets_dir = blocked;

    let result = run_generate(&args, &Default::default()).unwrap();
    assert_eq!(result.inputs.len(), 1);
    assert!(result.inputs[0].dataset_dump.is_none());
    assert_eq!(result.inputs[0].tables.len(), 2);
    assert!(fixture.path("generated/DM_CLIENT/client.view.lkml").is_file());

    let dump_error = result
        .errors
        .iter()
        .find(|e| e.contains("blocked"))
        .expect("dump failure reported");
    assert_eq!(dump_error.matches("os error").count(), 1, "{dump_error}");
}

#[test]
fn tables_sharing_an_output_path_are_rejected() {
    let fixture = Fixture::new();
    fs::write(
        fixture.path("DUP.csv"),
        "labels,,,,,,\n\
         ID,TABLE NAME,COLUMN NAME,DESCRIPTION,TYPE,LABEL,GROUP_LABEL\n\
         1,CLIENT,FIRST_COL,,string,First,\n\
         ,,,,,,end\n\
         2,CLIENT,SECOND_COL,,string,Second,\n",
    )
    .unwrap();
    let mut args = fixture.args();
    args.files = vec![fixture.path("DUP.csv")];

    let result = run_generate(&args, &Default::default()).unwrap();
    assert_eq!(result.inputs[0].tables.len(), 1);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("already produced"), "{:?}", result.errors);

    let client = read(&fixture.path("generated/DUP/client.view.lkml"));
    assert!(client.contains("dimension: first_col {"));
    assert!(!client.contains("second_col"));
}

#[test]
fn shared_model_name_collisions_span_inputs() {
    let fixture = Fixture::new();
    fs::copy(fixture.path("DM_CLIENT.csv"), fixture.path("DM_COPY.csv")).unwrap();
    let mut args = fixture.args();
    args.files = vec![fixture.path("DM_CLIENT.csv"), fixture.path("DM_COPY.csv")];
    args.model_name = Some("shared".to_string());

    let result = run_generate(&args, &Default::default()).unwrap();
    assert_eq!(result.inputs.len(), 2);
    assert_eq!(result.inputs[0].tables.len(), 2);
    assert!(result.inputs[1].tables.is_empty());
    let collisions = result
        .errors
        .iter()
        .filter(|e| e.contains("already produced"))
        .count();
    assert_eq!(collisions, 2);
    let client = read(&fixture.path("generated/shared/client.view.lkml"));
    assert!(client.contains("`DM_CLIENT."));
}

#[test]
fn config_file_overrides_defaults() {
    let fixture = Fixture::new();
    let config = fixture.path("lookml.toml");
    fs::write(
        &config,
        "tenant_attribute = \"tenant\"\n\n[predefined_columns]\nclient_id = \"  dimension: client_id {\\n    primary_key: yes\\n  }\"\n",
    )
    .unwrap();
    let options = load_options(Some(&config)).unwrap();
    run_generate(&fixture.args(), &options).unwrap();

    let account = read(&fixture.path("generated/DM_CLIENT/account.view.lkml"));
    assert!(account.contains("_user_attributes['tenant']"));
    assert!(account.contains("    primary_key: yes\n"));
}

#[test]
fn parses_generate_flags() {
    let cli = Cli::try_parse_from([
        "lookml-gen",
        "--log-format",
        "json",
        "generate",
        "a.xlsx",
        "b.csv",
        "--model-name",
        "sales",
        "--dry-run",
    ])
    .unwrap();
    let Command::Generate(args) = cli.command else {
        panic!("expected generate");
    };
    assert_eq!(args.files.len(), 2);
    assert_eq!(args.model_name.as_deref(), Some("sales"));
    assert_eq!(args.output_dir, PathBuf::from("#generated"));
    assert!(args.dry_run);
}

#[test]
fn generate_requires_an_input() {
    assert!(Cli::try_parse_from(["lookml-gen", "generate"]).is_err());
}
