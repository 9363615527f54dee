//! Shared, reloadable handle over an immutable [`CorpusIndex`].
//!
//! Readers take an `Arc` snapshot and search it without holding the lock.
//! A reload builds the replacement index first and then swaps the pointer,
//! so a search never sees a half-built index.

use crate::index::{CorpusIndex, Document};
use crate::search::{search, SearchOptions, SearchOutcome};
use crate::synonyms::Thesaurus;
use crate::SearchError;
use parking_lot::RwLock;
use std::sync::Arc;

pub struct SearchEngine {
    index: RwLock<Option<Arc<CorpusIndex>>>,
    thesaurus: Thesaurus,
}

impl SearchEngine {
    /// Engine with no corpus; searching fails with [`SearchError::NotLoaded`] until [`load`](Self::load).
    pub fn new(thesaurus: Thesaurus) -> Self {
        Self { index: RwLock::new(None), thesaurus }
    }

    pub fn with_documents(thesaurus: Thesaurus, documents: Vec<Document>) -> Self {
        let engine = Self::new(thesaurus);
        engine.load(documents);
        engine
    }

    /// Replace the current index with one built from `documents`.
    pub fn load(&self, documents: Vec<Document>) -> Arc<CorpusIndex> {
        let fresh = Arc::new(CorpusIndex::build(documents));
        *self.index.write() = Some(Arc::clone(&fresh));
        fresh
    }

    pub fn is_loaded(&self) -> bool {
        self.index.read().is_some()
    }

    pub fn snapshot(&self) -> Result<Arc<CorpusIndex>, SearchError> {
        self.index.read().clone().ok_or(SearchError::NotLoaded)
    }

    /// Search the current snapshot and hand the outcome to `f`.
    pub fn search<R>(
        &self,
        raw: &str,
        options: &SearchOptions,
        f: impl FnOnce(SearchOutcome<'_>) -> R,
    ) -> Result<R, SearchError> {
        let index = self.snapshot()?;
        let outcome = search(&index, &self.thesaurus, raw, options)?;
        Ok(f(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: u64, title: &str) -> Document {
        Document {
            id,
            title: title.into(),
            summary: String::new(),
            tags: vec![],
            date: String::new(),
            source: String::new(),
            full_text: None,
        }
    }

    #[test]
    fn search_before_load_fails() {
        let engine = SearchEngine::new(Thesaurus::default());
        assert!(!engine.is_loaded());
        let err = engine.search("climate", &SearchOptions::default(), |o| o.len()).unwrap_err();
        assert_eq!(err, SearchError::NotLoaded);
    }

    #[test]
    fn reload_swaps_but_old_snapshot_survives() {
        let engine = SearchEngine::with_documents(Thesaurus::default(), vec![doc(1, "Climate bill")]);
        let old = engine.snapshot().unwrap();
        engine.load(vec![doc(2, "Transit plan"), doc(3, "Transit vote")]);
        assert_eq!(old.num_docs(), 1);
        assert_eq!(engine.snapshot().unwrap().num_docs(), 2);

        let ids = engine
            .search("transit", &SearchOptions::default(), |o| o.documents().map(|d| d.id).collect::<Vec<_>>())
            .unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn shared_across_threads() {
        let engine = Arc::new(SearchEngine::with_documents(Thesaurus::default(), vec![doc(1, "Carbon tax")]));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let e = Arc::clone(&engine);
                std::thread::spawn(move || e.search("climate", &SearchOptions::default(), |o| o.len()).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 1);
        }
    }
}
