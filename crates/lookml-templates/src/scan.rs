//! Field declaration scanning for template sources.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use lookml_model::FieldKind;
use regex::Regex;

/// Matches `<kind>: <identifier>` declarations.
///
/// `dimension_group` is listed before `dimension` so the longer keyword
/// wins. The `\b` anchor keeps suffixes such as `primary_dimension:` from
/// matching, and `[ \t]+` keeps the identifier on the same line.
static FIELD_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(dimension_group|dimension|measure):[ \t]+(\w+)")
        .unwrap_or_else(|err| panic!("field declaration pattern: {err}"))
});

/// Extracts `FIELD_NAME_UPPER -> kind` from the text of one template.
///
/// A field declared twice keeps the kind of its last declaration.
pub fn scan_template_fields(text: &str) -> BTreeMap<String, FieldKind> {
    let mut fields = BTreeMap::new();
    for captures in FIELD_DECLARATION.captures_iter(text) {
        let kind = match &captures[1] {
            "dimension_group" => FieldKind::DimensionGroup,
            "measure" => FieldKind::Measure,
            _ => FieldKind::Dimension,
        };
        fields.insert(captures[2].to_uppercase(), kind);
    }
    fields
}
