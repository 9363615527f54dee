//! Relevance models.
//!
//! Both models walk the expanded query terms independently, so a term that
//! appears twice in the query (directly or through synonyms) counts twice.
//! Terms with no document frequency contribute nothing.

use crate::index::{CorpusIndex, Document};
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// BM25-lite term-frequency saturation constant.
pub const BM25_SATURATION: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingModel {
    #[default]
    TfIdf,
    Bm25,
}

impl RankingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingModel::TfIdf => "tfidf",
            RankingModel::Bm25 => "bm25",
        }
    }

    /// Score a document whose term counts are already known.
    pub fn score(&self, index: &CorpusIndex, tf: &HashMap<String, u32>, terms: &[String]) -> f64 {
        let n = index.num_docs() as f64;
        terms
            .iter()
            .filter_map(|term| {
                let df = index.df(term);
                if df == 0 {
                    return None;
                }
                let tf_t = tf.get(term).copied().unwrap_or(0) as f64;
                let contrib = match self {
                    RankingModel::TfIdf => tf_t * tfidf_idf(n, df as f64),
                    RankingModel::Bm25 => (tf_t / (tf_t + BM25_SATURATION)) * bm25_idf(n, df as f64),
                };
                Some(contrib)
            })
            .sum()
    }
}

impl fmt::Display for RankingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankingModel {
    type Err = crate::SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tfidf" => Ok(RankingModel::TfIdf),
            "bm25" => Ok(RankingModel::Bm25),
            _ => Err(crate::SearchError::UnknownModel(s.to_string())),
        }
    }
}

/// `ln(N / (1 + df))`
pub fn tfidf_idf(n: f64, df: f64) -> f64 {
    (n / (1.0 + df)).ln()
}

/// `ln((N - df + 0.5) / (df + 0.5) + 1)`; non-negative for `1 <= df <= N`.
pub fn bm25_idf(n: f64, df: f64) -> f64 {
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// Occurrence counts over a document's title, abstract and tags.
pub fn term_frequencies(doc: &Document) -> HashMap<String, u32> {
    let mut tf = HashMap::new();
    for term in tokenize(&doc.search_text()) {
        *tf.entry(term).or_insert(0) += 1;
    }
    tf
}
