use crate::synonyms::Thesaurus;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref PHRASE: Regex = Regex::new(r#""([^"]+)""#).expect("valid regex");
}

/// How per-term matches combine when filtering documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BooleanMode {
    And,
    #[default]
    Or,
}

impl fmt::Display for BooleanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BooleanMode::And => f.write_str("AND"),
            BooleanMode::Or => f.write_str("OR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedQuery {
    /// Quoted substrings, lowercased, in order of appearance.
    pub phrases: Vec<String>,
    /// Bare tokens after operator removal and synonym expansion. May repeat.
    pub terms: Vec<String>,
    pub mode: BooleanMode,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty() && self.terms.is_empty()
    }
}

/// Split a raw query into phrases, expanded terms and a boolean mode.
///
/// An unterminated quote does not form a phrase; it stays in the token text.
pub fn parse(raw: &str, thesaurus: &Thesaurus) -> ParsedQuery {
    let raw = raw.trim();

    let phrases: Vec<String> = PHRASE
        .captures_iter(raw)
        .map(|c| c[1].to_lowercase())
        .collect();
    let residual = PHRASE.replace_all(raw, "");

    let tokens: Vec<String> = residual.split_whitespace().map(str::to_lowercase).collect();

    // mode must be read before operators are stripped
    let mode = if tokens.iter().any(|t| t == "and") { BooleanMode::And } else { BooleanMode::Or };

    let terms = tokens
        .iter()
        .filter(|t| *t != "and" && *t != "or")
        .flat_map(|t| thesaurus.expand(t))
        .collect();

    ParsedQuery { phrases, terms, mode }
}
