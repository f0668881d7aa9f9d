use std::collections::HashMap;

/// Variable table built while scanning declaration lines and consulted
/// for token substitution afterwards. Grows as needed; duplicate names
/// are rejected and the first-seen value wins.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `name -> value`. Returns `false` without overwriting when
    /// the name is already present; the caller reports that as a warning.
    pub fn insert(&mut self, name: String, value: String) -> bool {
        match self.entries.entry(name) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Replace `token` by its substitution value if one is declared,
    /// otherwise hand the token back unchanged.
    pub fn substitute(&self, token: String) -> String {
        match self.lookup(&token) {
            Some(value) => value.to_string(),
            None => token,
        }
    }
}
