//! Relationship graph between tables sharing column names.
//!
//! The graph is emitted as `{"linkDataArray": [...]}`, the shape consumed
//! by diagramming front ends: each link connects the same-named port on
//! two tables.

use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use lookml_ingest::to_pretty_json;
use lookml_model::WriteStatus;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::emit::write_view;
use crate::error::{GenerateError, Result};

const COLUMN_NAME_KEY: &str = "COLUMN NAME";

type Records = Vec<IndexMap<String, Value>>;

/// Relationship input: either `{table: [records]}` or the dataset dump
/// shape `[{table: [records]}, ...]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LinkSource {
    Map(IndexMap<String, Records>),
    List(Vec<IndexMap<String, Records>>),
}

impl LinkSource {
    /// Upper-cased column names per table, in input order.
    ///
    /// Tables appearing more than once have their columns merged.
    pub fn table_columns(&self) -> IndexMap<String, BTreeSet<String>> {
        let entries: Vec<(&String, &Records)> = match self {
            LinkSource::Map(tables) => tables.iter().collect(),
            LinkSource::List(items) => items.iter().flat_map(IndexMap::iter).collect(),
        };
        let mut tables: IndexMap<String, BTreeSet<String>> = IndexMap::new();
        for (table, records) in entries {
            let columns = tables.entry(table.clone()).or_default();
            columns.extend(
                records
                    .iter()
                    .filter_map(|record| record.get(COLUMN_NAME_KEY)?.as_str())
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_uppercase),
            );
        }
        tables
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub from: String,
    pub to: String,
    #[serde(rename = "fromPort")]
    pub from_port: String,
    #[serde(rename = "toPort")]
    pub to_port: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkData {
    #[serde(rename = "linkDataArray")]
    pub link_data_array: Vec<Link>,
}

/// Links every ordered pair of distinct tables on each shared column.
///
/// A link is skipped when its reverse is already present, so each
/// undirected relation appears once. Columns in `excluded` (compared
/// upper-cased) never produce links.
pub fn build_link_data_array(
    tables: &IndexMap<String, BTreeSet<String>>,
    excluded: &[String],
) -> LinkData {
    let excluded: HashSet<String> = excluded.iter().map(|c| c.trim().to_uppercase()).collect();
    let mut seen: HashSet<(&str, &str, &str)> = HashSet::new();
    let mut links = Vec::new();

    for (from, from_columns) in tables {
        for (to, to_columns) in tables {
            if from == to {
                continue;
            }
            for column in from_columns.intersection(to_columns) {
                if excluded.contains(column) {
                    continue;
                }
                if seen.contains(&(to.as_str(), from.as_str(), column.as_str())) {
                    continue;
                }
                seen.insert((from.as_str(), to.as_str(), column.as_str()));
                links.push(Link {
                    from: from.clone(),
                    to: to.clone(),
                    from_port: column.clone(),
                    to_port: column.clone(),
                });
            }
        }
    }

    tracing::debug!(tables = tables.len(), links = links.len(), "link graph built");
    LinkData {
        link_data_array: links,
    }
}

pub fn load_link_source(path: &Path) -> Result<LinkSource> {
    let text = fs::read_to_string(path).map_err(|source| GenerateError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| GenerateError::LinkSource {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the graph as four-space indented JSON.
pub fn write_link_data(path: &Path, links: &LinkData, dry_run: bool) -> Result<WriteStatus> {
    let json = to_pretty_json(links)?;
    let status = write_view(path, &json, dry_run)?;
    tracing::info!(
        path = %path.display(),
        links = links.link_data_array.len(),
        %status,
        "link data written"
    );
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(entries: &[(&str, &[&str])]) -> IndexMap<String, BTreeSet<String>> {
        entries
            .iter()
            .map(|(table, columns)| {
                (
                    table.to_string(),
                    columns.iter().map(ToString::to_string).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn shared_columns_link_once_per_pair() {
        let graph = build_link_data_array(
            &tables(&[("T1", &["A", "B", "C"]), ("T2", &["B", "C", "D"])]),
            &[],
        );
        let ports: Vec<_> = graph
            .link_data_array
            .iter()
            .map(|link| (link.from.as_str(), link.to.as_str(), link.from_port.as_str()))
            .collect();
        assert_eq!(ports, vec![("T1", "T2", "B"), ("T1", "T2", "C")]);
    }

    #[test]
    fn excluded_columns_never_link() {
        let graph = build_link_data_array(
            &tables(&[("T1", &["LOAD_TS", "ID"]), ("T2", &["LOAD_TS", "ID"])]),
            &["load_ts".to_string()],
        );
        assert_eq!(graph.link_data_array.len(), 1);
        assert_eq!(graph.link_data_array[0].from_port, "ID");
    }

    #[test]
    fn three_tables_keep_each_relation_once() {
        let graph = build_link_data_array(
            &tables(&[("A", &["K"]), ("B", &["K"]), ("C", &["K"])]),
            &[],
        );
        assert_eq!(graph.link_data_array.len(), 3);
    }

    #[test]
    fn accepts_map_and_dump_shapes() {
        let map: LinkSource = serde_json::from_str(
            r#"{"T1": [{"COLUMN NAME": "a"}], "T2": [{"COLUMN NAME": "A", "TYPE": null}]}"#,
        )
        .unwrap();
        let list: LinkSource = serde_json::from_str(
            r#"[{"T1": [{"COLUMN NAME": "a"}]}, {"T2": [{"COLUMN NAME": "A"}]}]"#,
        )
        .unwrap();
        assert_eq!(map.table_columns(), list.table_columns());
        assert!(map.table_columns()["T1"].contains("A"));
    }

    #[test]
    fn serializes_with_camel_case_ports() {
        let data = LinkData {
            link_data_array: vec![Link {
                from: "T1".into(),
                to: "T2".into(),
                from_port: "B".into(),
                to_port: "B".into(),
            }],
        };
        let json = to_pretty_json(&data).unwrap();
        assert!(json.contains("\"linkDataArray\""));
        assert!(json.contains("\"fromPort\": \"B\""));
    }
}
