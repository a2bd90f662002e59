//! Matching a table's columns against the base templates.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use lookml_model::{FieldKind, GeneratorOptions};
use lookml_templates::TemplateRegistry;

/// Which templates a table extends and how its columns relate to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateMatch {
    /// Extended template names, in registry order.
    pub extends: Vec<String>,
    /// `include:` paths, parallel to `extends`.
    pub includes: Vec<String>,
    /// Upper-cased table columns already declared by an extended template.
    pub commented: BTreeSet<String>,
    /// Template fields the table lacks, with the kind to declare them as.
    pub missing: IndexMap<String, FieldKind>,
}

/// Finds every template sharing at least one field with `columns`.
///
/// `columns` holds upper-cased column names. When several matched
/// templates lack the same field, the first template in registry order
/// decides its kind.
pub fn match_templates(
    columns: &BTreeSet<String>,
    registry: &TemplateRegistry,
    options: &GeneratorOptions,
) -> TemplateMatch {
    let mut matched = TemplateMatch::default();
    for template in registry.iter() {
        let shared: Vec<&String> = template
            .fields
            .keys()
            .filter(|field| columns.contains(*field))
            .collect();
        if shared.is_empty() {
            continue;
        }
        matched.extends.push(template.name.clone());
        matched.includes.push(options.include_path(&template.name));
        matched.commented.extend(shared.into_iter().cloned());
        for (field, kind) in &template.fields {
            if !columns.contains(field) {
                matched.missing.entry(field.clone()).or_insert(*kind);
            }
        }
        tracing::debug!(template = %template.name, "template matched");
    }
    matched
}
