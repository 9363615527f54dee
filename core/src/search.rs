use crate::boost::boost_all;
use crate::index::{CorpusIndex, Document};
use crate::query::{parse, BooleanMode, ParsedQuery};
use crate::scoring::{term_frequencies, RankingModel};
use crate::synonyms::Thesaurus;
use crate::SearchError;
use serde::Deserialize;
use std::cmp::Ordering;
use std::time::Instant;

/// Per-call ranking configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub model: RankingModel,
    #[serde(default)]
    pub field_boosts: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoredResult<'a> {
    pub document: &'a Document,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    pub query: ParsedQuery,
    /// Descending by score. Ties have no defined order.
    pub hits: Vec<ScoredResult<'a>>,
    pub elapsed_ms: f64,
}

impl<'a> SearchOutcome<'a> {
    pub fn documents(&self) -> impl Iterator<Item = &'a Document> + '_ {
        self.hits.iter().map(|h| h.document)
    }

    pub fn len(&self) -> usize { self.hits.len() }

    pub fn is_empty(&self) -> bool { self.hits.is_empty() }
}

/// Whether a document's lowercased text passes the phrase and boolean filters.
///
/// An empty term list passes in either mode so phrase-only queries still match.
pub fn matches(text: &str, query: &ParsedQuery) -> bool {
    if !query.phrases.iter().all(|p| text.contains(p.as_str())) {
        return false;
    }
    if query.terms.is_empty() {
        return true;
    }
    let mut hits = query.terms.iter().map(|t| text.contains(t.as_str()));
    match query.mode {
        BooleanMode::And => hits.all(|h| h),
        BooleanMode::Or => hits.any(|h| h),
    }
}

/// Parse, filter, score and rank the corpus against `raw`.
pub fn search<'a>(
    index: &'a CorpusIndex,
    thesaurus: &Thesaurus,
    raw: &str,
    options: &SearchOptions,
) -> Result<SearchOutcome<'a>, SearchError> {
    let start = Instant::now();
    if raw.trim().is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    let query = parse(raw, thesaurus);
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }

    let mut hits: Vec<ScoredResult<'a>> = Vec::new();
    for doc in index.documents() {
        let text = doc.search_text().to_lowercase();
        if !matches(&text, &query) {
            continue;
        }
        let tf = term_frequencies(doc);
        let mut score = options.model.score(index, &tf, &query.terms);
        if options.field_boosts {
            score = boost_all(doc, &query.terms, score);
        }
        hits.push(ScoredResult { document: doc, score });
    }

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    tracing::debug!(
        mode = %query.mode,
        phrases = query.phrases.len(),
        terms = query.terms.len(),
        model = %options.model,
        field_boosts = options.field_boosts,
        hits = hits.len(),
        elapsed_ms,
        "search complete"
    );
    Ok(SearchOutcome { query, hits, elapsed_ms })
}
