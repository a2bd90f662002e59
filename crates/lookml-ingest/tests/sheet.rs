//! End-to-end tests for reading and splitting metadata sheets.

use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;
use tempfile::TempDir;

use lookml_ingest::{
    IngestError, Segmenter, build_dataset_dump, extract_tables, read_sheet, segment_rows,
    write_dataset_dump,
};
use lookml_model::SheetRow;

const SHEET: &str = "\
Client data model,,,,,,,
ID,TABLE NAME,COLUMN NAME,DESCRIPTION,TYPE,LABEL,GROUP_LABEL,
1,CLIENT,CLIENT_ID,\"Client \"\"main\"\" id\",number,Client,,
2,CLIENT,CREATED,,date,Created,,
,,,,,,,
,,,,,,,end of CLIENT
3,ACCOUNT,BALANCE,,sum,Balance,,
4,ACCOUNT,LOAD_TS,,timestamp,Loaded,Technical,
";

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write input");
    path
}

#[test]
fn splits_csv_sheet_into_tables() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "DM_CLIENT.csv", SHEET);

    let sheet = read_sheet(&path).expect("read sheet");
    assert_eq!(sheet.headers.len(), 7);

    let groups = segment_rows(&sheet).expect("segment");
    assert_eq!(groups.len(), 2);

    let tables: Vec<_> = extract_tables(&sheet, &groups)
        .expect("required headers present")
        .into_iter()
        .collect::<Result<_, _>>()
        .expect("well-formed groups");
    assert_eq!(tables[0].table_id.as_str(), "CLIENT");
    assert_eq!(tables[1].table_id.as_str(), "ACCOUNT");
    assert_eq!(tables[0].columns[0].description, "Client \"main\" id");
    assert_eq!(tables[1].columns[1].group_label, "Technical");
}

#[test]
fn missing_required_header_fails_sheet() {
    let dir = TempDir::new().unwrap();
    let path = write_input(
        &dir,
        "broken.csv",
        "labels\nID,TABLE NAME,COLUMN NAME\n1,T,A\n",
    );
    let sheet = read_sheet(&path).unwrap();
    let groups = segment_rows(&sheet).unwrap();
    let err = extract_tables(&sheet, &groups).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { column } if column == "DESCRIPTION"));
}

#[test]
fn malformed_group_does_not_affect_others() {
    let dir = TempDir::new().unwrap();
    let path = write_input(
        &dir,
        "mixed.csv",
        "labels\n\
         ID,TABLE NAME,COLUMN NAME,DESCRIPTION,TYPE,LABEL,GROUP_LABEL\n\
         1,A,X,,string,X,\n\
         2,B,Y,,string,Y,\n\
         ,,,,,,note\n\
         3,C,Z,,string,Z,\n",
    );
    let sheet = read_sheet(&path).unwrap();
    let groups = segment_rows(&sheet).unwrap();
    let results = extract_tables(&sheet, &groups).unwrap();
    assert_eq!(results.len(), 2);
    assert!(matches!(results[0], Err(IngestError::MalformedGroup { group: 0, .. })));
    assert_eq!(results[1].as_ref().unwrap().table_id.as_str(), "C");
}

#[test]
fn dataset_dump_keeps_header_order_and_nulls() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "DM_CLIENT.csv", SHEET);
    let sheet = read_sheet(&path).unwrap();
    let groups = segment_rows(&sheet).unwrap();

    let dump = build_dataset_dump(&sheet, &groups);
    let out = dir.path().join("dumps").join("DM_CLIENT.json");
    write_dataset_dump(&out, &dump).expect("write dump");

    let written = fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    let client = &value[0]["CLIENT"];
    assert_eq!(client.as_array().unwrap().len(), 2);
    assert_eq!(client[0]["COLUMN NAME"], "CLIENT_ID");
    assert!(client[0]["GROUP_LABEL"].is_null());
    assert!(written.starts_with("[\n    {\n        \"CLIENT\": ["));
    let id_pos = written.find("\"ID\"").unwrap();
    let table_pos = written.find("\"TABLE NAME\"").unwrap();
    assert!(id_pos < table_pos);
}

proptest! {
    #[test]
    fn segmentation_keeps_every_identified_row(ids in proptest::collection::vec(any::<bool>(), 0..40)) {
        let mut segmenter = Segmenter::new();
        for (idx, has_id) in ids.iter().enumerate() {
            let id = if *has_id { idx.to_string() } else { String::new() };
            segmenter.push(SheetRow::new([id]), !*has_id);
        }
        let groups = segmenter.finish();
        let kept: usize = groups.iter().map(|group| group.rows.len()).sum();
        prop_assert_eq!(kept, ids.iter().filter(|has_id| **has_id).count());
        prop_assert!(groups.iter().all(|group| !group.rows.is_empty()));
        for (position, group) in groups.iter().enumerate() {
            prop_assert_eq!(group.index, position);
        }
    }
}

#[test]
fn dump_under_a_regular_file_reports_write_error() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "DM_CLIENT.csv", SHEET);
    let sheet = read_sheet(&path).unwrap();
    let dump = build_dataset_dump(&sheet, &segment_rows(&sheet).unwrap());

    let blocked = dir.path().join("blocked");
    fs::write(&blocked, "not a directory").unwrap();
    let err = write_dataset_dump(&blocked.join("DM_CLIENT.json"), &dump).unwrap_err();
    assert!(matches!(err, IngestError::FileWrite { .. }));
    assert_eq!(fs::read_to_string(&blocked).unwrap(), "not a directory");
}

#[test]
fn rewriting_dump_replaces_file_without_leftovers() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir, "DM_CLIENT.csv", SHEET);
    let sheet = read_sheet(&path).unwrap();
    let dump = build_dataset_dump(&sheet, &segment_rows(&sheet).unwrap());

    let out_dir = dir.path().join("dumps");
    let out = out_dir.join("DM_CLIENT.json");
    fs::create_dir_all(&out_dir).unwrap();
    fs::write(&out, "stale").unwrap();
    write_dataset_dump(&out, &dump).unwrap();
    write_dataset_dump(&out, &dump).unwrap();

    assert!(fs::read_to_string(&out).unwrap().starts_with('['));
    assert_eq!(fs::read_dir(&out_dir).unwrap().count(), 1);
}
