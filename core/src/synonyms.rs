//! Static thesaurus used to widen bare query terms.
//!
//! Each key maps to the full list of terms searched in its place, the key
//! itself included. Terms without an entry pass through unchanged.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

const BUILTIN: &[(&str, &[&str])] = &[
    ("tech", &["tech", "technology", "ai", "semiconductor", "digital", "innovation"]),
    ("semiconductor", &["semiconductor", "chip", "supply chain"]),
    ("climate", &["climate", "emissions", "carbon", "environment"]),
    ("policy", &["policy", "regulation", "law", "bill", "legislation"]),
    ("transit", &["transit", "transportation", "infrastructure"]),
];

#[derive(Debug, Error)]
pub enum ThesaurusError {
    #[error("failed to read thesaurus {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("invalid thesaurus json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("thesaurus entry {0:?} has no terms")]
    EmptyEntry(String),
    #[error("thesaurus entry {0:?} contains a blank term")]
    BlankTerm(String),
    #[error("thesaurus key {0:?} is defined more than once")]
    DuplicateKey(String),
}

#[derive(Debug, Clone)]
pub struct Thesaurus {
    entries: HashMap<String, Vec<String>>,
}

impl Default for Thesaurus {
    fn default() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect();
        Self { entries }
    }
}

impl Thesaurus {
    /// Build from explicit entries. Keys and terms are lowercased, and a key
    /// missing from its own list is put first so it is still searched.
    pub fn from_entries(entries: HashMap<String, Vec<String>>) -> Result<Self, ThesaurusError> {
        let mut out: HashMap<String, Vec<String>> = HashMap::with_capacity(entries.len());
        for (key, terms) in entries {
            let key = key.to_lowercase();
            if terms.is_empty() {
                return Err(ThesaurusError::EmptyEntry(key));
            }
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(ThesaurusError::BlankTerm(key));
            }
            let mut terms: Vec<String> = terms.into_iter().map(|t| t.to_lowercase()).collect();
            if !terms.contains(&key) {
                terms.insert(0, key.clone());
            }
            if out.contains_key(&key) {
                return Err(ThesaurusError::DuplicateKey(key));
            }
            out.insert(key, terms);
        }
        Ok(Self { entries: out })
    }

    /// Load a `{ "key": ["term", ...] }` table.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ThesaurusError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ThesaurusError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let entries: HashMap<String, Vec<String>> = serde_json::from_str(&raw)?;
        Self::from_entries(entries)
    }

    /// Expand one term. Never empty.
    pub fn expand(&self, term: &str) -> Vec<String> {
        let key = term.to_lowercase();
        match self.entries.get(&key) {
            Some(terms) => terms.clone(),
            None => vec![key],
        }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_known_key_case_insensitively() {
        let th = Thesaurus::default();
        let t = th.expand("Climate");
        assert_eq!(t, vec!["climate", "emissions", "carbon", "environment"]);
    }

    #[test]
    fn unknown_term_passes_through_lowercased() {
        let th = Thesaurus::default();
        assert_eq!(th.expand("Quantum"), vec!["quantum"]);
    }

    #[test]
    fn rejects_empty_entry() {
        let mut entries = HashMap::new();
        entries.insert("void".to_string(), Vec::new());
        assert!(matches!(Thesaurus::from_entries(entries), Err(ThesaurusError::EmptyEntry(_))));
    }

    #[test]
    fn key_missing_from_its_list_is_prepended() {
        let mut entries = HashMap::new();
        entries.insert("Rail".to_string(), vec!["train".to_string(), "metro".to_string()]);
        let th = Thesaurus::from_entries(entries).unwrap();
        assert_eq!(th.expand("rail"), vec!["rail", "train", "metro"]);
    }

    #[test]
    fn rejects_blank_term() {
        let mut entries = HashMap::new();
        entries.insert("bus".to_string(), vec!["bus".to_string(), " ".to_string()]);
        assert!(matches!(Thesaurus::from_entries(entries), Err(ThesaurusError::BlankTerm(k)) if k == "bus"));

        let mut entries = HashMap::new();
        entries.insert("bus".to_string(), vec![String::new()]);
        assert!(matches!(Thesaurus::from_entries(entries), Err(ThesaurusError::BlankTerm(_))));
    }

    #[test]
    fn rejects_keys_differing_only_in_case() {
        let mut entries = HashMap::new();
        entries.insert("Tech".to_string(), vec!["tech".to_string()]);
        entries.insert("tech".to_string(), vec!["ai".to_string()]);
        assert!(matches!(Thesaurus::from_entries(entries), Err(ThesaurusError::DuplicateKey(k)) if k == "tech"));
    }

    #[test]
    fn loads_and_lowercases_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("syn.json");
        fs::write(&path, r#"{"Rail": ["rail", "Train", "METRO"]}"#).unwrap();
        let th = Thesaurus::from_json_file(&path).unwrap();
        assert_eq!(th.len(), 1);
        assert_eq!(th.expand("RAIL"), vec!["rail", "train", "metro"]);
        assert_eq!(th.expand("tech"), vec!["tech"]);
    }
}
