use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub type DocId = u64;

/// A news record as supplied by the corpus loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub source: String,
    /// Long-form body carried through rewrites; never indexed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
}

impl Document {
    /// Title, abstract and tags joined by single spaces, the text every
    /// statistic and filter is computed over.
    pub fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.summary, self.tags.join(" "))
    }
}

/// Document set plus per-term document frequencies. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    documents: Vec<Document>,
    df: HashMap<String, u32>,
    num_docs: u32,
}

impl CorpusIndex {
    /// Build statistics in a single pass. Each document counts at most once per term.
    pub fn build(documents: Vec<Document>) -> Self {
        let mut df: HashMap<String, u32> = HashMap::new();
        for doc in &documents {
            let seen: HashSet<String> = tokenize(&doc.search_text()).into_iter().collect();
            for term in seen {
                *df.entry(term).or_insert(0) += 1;
            }
        }
        let num_docs = documents.len() as u32;
        tracing::info!(num_docs, num_terms = df.len(), "built corpus index");
        Self { documents, df, num_docs }
    }

    pub fn documents(&self) -> &[Document] { &self.documents }

    pub fn num_docs(&self) -> u32 { self.num_docs }

    /// Number of documents containing `term`; zero for unseen terms.
    pub fn df(&self, term: &str) -> u32 {
        self.df.get(term).copied().unwrap_or(0)
    }

    pub fn document_frequencies(&self) -> &HashMap<String, u32> { &self.df }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }
}
