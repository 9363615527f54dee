//! In-memory news search: tokenizer, document-frequency index, synonym
//! expansion, boolean/phrase query parsing, TF-IDF and BM25-lite ranking
//! with optional field boosts.

pub mod boost;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod scoring;
pub mod search;
pub mod synonyms;
pub mod tagging;
pub mod tokenizer;

pub use engine::SearchEngine;
pub use error::SearchError;
pub use index::{CorpusIndex, DocId, Document};
pub use query::{BooleanMode, ParsedQuery};
pub use scoring::RankingModel;
pub use search::{search, ScoredResult, SearchOptions, SearchOutcome};
pub use synonyms::Thesaurus;
