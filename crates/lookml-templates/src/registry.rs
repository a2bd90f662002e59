#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use lookml_model::FieldKind;

use crate::error::{Result, TemplateError};
use crate::paths::TEMPLATE_SUFFIX;
use crate::scan::scan_template_fields;

/// One reusable base view that generated views may extend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTemplate {
    /// File name without the `.view.lkml` suffix.
    pub name: String,
    /// Declared fields, keyed by upper-cased name.
    pub fields: BTreeMap<String, FieldKind>,
}

impl BaseTemplate {
    pub fn new(name: impl Into<String>, fields: BTreeMap<String, FieldKind>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Builds a template by scanning the given source text.
    pub fn from_source(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, scan_template_fields(text))
    }
}

/// Immutable set of base templates, in file-name order.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    root: Option<PathBuf>,
    templates: Vec<BaseTemplate>,
}

impl TemplateRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_templates(templates: impl IntoIterator<Item = BaseTemplate>) -> Self {
        let mut templates: Vec<_> = templates.into_iter().collect();
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            root: None,
            templates,
        }
    }

    /// Loads every `*.view.lkml` file directly under `dir`.
    ///
    /// Never fails: a missing or unreadable directory yields an empty
    /// registry and a single unreadable file is skipped, both with a
    /// warning.
    pub fn load(dir: &Path) -> Self {
        match Self::try_load(dir) {
            Ok(registry) => registry,
            Err(error) => {
                tracing::warn!(
                    dir = %dir.display(),
                    %error,
                    "base views unavailable; no view will extend a template"
                );
                Self::empty()
            }
        }
    }

    /// Strict variant of [`TemplateRegistry::load`] that reports a directory
    /// that cannot be listed.
    pub fn try_load(dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(dir).map_err(|source| TemplateError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut sources: Vec<(String, PathBuf)> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let file_name = path.file_name()?.to_str()?;
                let name = file_name.strip_suffix(TEMPLATE_SUFFIX)?;
                (!name.is_empty()).then(|| (name.to_string(), path.clone()))
            })
            .collect();
        sources.sort();

        let mut templates = Vec::with_capacity(sources.len());
        for (name, path) in sources {
            match read_template(&name, &path) {
                Ok(template) => {
                    tracing::debug!(
                        template = %template.name,
                        fields = template.fields.len(),
                        "base template loaded"
                    );
                    templates.push(template);
                }
                Err(error) => tracing::warn!(%error, "skipping unreadable base template"),
            }
        }

        tracing::info!(
            dir = %dir.display(),
            templates = templates.len(),
            "base templates loaded"
        );
        Ok(Self {
            root: Some(dir.to_path_buf()),
            templates,
        })
    }

    /// Directory the registry was loaded from, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BaseTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn read_template(name: &str, path: &Path) -> Result<BaseTemplate> {
    let text = fs::read_to_string(path).map_err(|source| TemplateError::read_file(path, source))?;
    Ok(BaseTemplate::from_source(name, &text))
}
