use std::collections::HashMap;

/// Case-insensitive header name to column index lookup.
///
/// When a header appears more than once, the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct HeaderLookup {
    map: HashMap<String, usize>,
}

impl HeaderLookup {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (idx, name) in names.into_iter().enumerate() {
            let key = name.as_ref().trim().to_uppercase();
            map.entry(key).or_insert(idx);
        }
        Self { map }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.map.get(&name.trim().to_uppercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_duplicate_header_wins() {
        let lookup = HeaderLookup::new(["ID", "Table Name", "id"]);
        assert_eq!(lookup.index_of("id"), Some(0));
        assert_eq!(lookup.index_of("TABLE NAME"), Some(1));
        assert_eq!(lookup.index_of("TYPE"), None);
    }

    #[test]
    fn non_ascii_headers_match_in_any_case() {
        let lookup = HeaderLookup::new(["ID", "Opis_Kolumny_ł"]);
        assert_eq!(lookup.index_of("OPIS_KOLUMNY_Ł"), Some(1));
    }
}
