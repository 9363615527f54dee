//! Keyword-rule tagging for corpus preparation.

use crate::index::Document;
use std::collections::BTreeSet;

const TAG_RULES: &[(&str, &[&str])] = &[
    ("tech", &["tech", "technology", "ai", "artificial intelligence", "software", "digital", "semiconductor", "chip", "cybersecurity", "cloud"]),
    ("climate", &["climate", "emissions", "carbon", "co2", "environment", "sustainability", "renewable", "solar", "wind", "net-zero"]),
    ("policy", &["policy", "bill", "regulation", "regulatory", "federal", "law", "legislation", "congress", "government", "mandate"]),
    ("economy", &["economy", "economic", "market", "inflation", "supply chain", "trade", "growth", "recession", "industry", "production"]),
    ("science", &["research", "study", "scientist", "laboratory", "experiment", "peer-reviewed", "findings"]),
    ("transit", &["transit", "transportation", "subway", "rail", "bus", "infrastructure", "traffic", "mobility", "commute"]),
    ("data", &["data", "analytics", "dashboard", "open data", "dataset", "metrics", "algorithm"]),
    ("health", &["health", "healthcare", "hospital", "medical", "public health", "epidemic", "pandemic"]),
    ("education", &["school", "university", "college", "education", "classroom", "students", "curriculum"]),
];

const FALLBACK_TAGS: &[&str] = &["general", "news", "current-events", "world", "analysis"];

/// Documents with this many tags or fewer get fallback tags.
const SPARSE_TAG_COUNT: usize = 3;
const FALLBACK_TARGET: usize = 5;

/// Tags whose trigger phrases occur in `text` (substring match, case-insensitive).
pub fn infer_tags(text: &str) -> BTreeSet<&'static str> {
    let lowered = text.to_lowercase();
    TAG_RULES
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|k| lowered.contains(k)))
        .map(|(tag, _)| *tag)
        .collect()
}

/// Merge inferred tags into `doc.tags`, padding sparse tag lists.
///
/// Returns true when inference added a tag the document did not have.
pub fn auto_tag(doc: &mut Document) -> bool {
    let text = format!("{} {} {} {}", doc.title, doc.summary, doc.tags.join(" "), doc.source);
    let existing: BTreeSet<String> = doc.tags.iter().cloned().collect();

    let mut merged: Vec<String> = Vec::with_capacity(doc.tags.len() + FALLBACK_TARGET);
    for tag in doc.tags.iter().cloned().chain(infer_tags(&text).into_iter().map(String::from)) {
        if !merged.contains(&tag) {
            merged.push(tag);
        }
    }
    let updated = merged.iter().any(|t| !existing.contains(t));

    if merged.len() <= SPARSE_TAG_COUNT {
        for tag in FALLBACK_TAGS {
            if merged.len() >= FALLBACK_TARGET { break; }
            if !merged.iter().any(|t| t == tag) {
                merged.push(tag.to_string());
            }
        }
    }

    doc.tags = merged;
    updated
}

/// Tag every document; returns how many gained inferred tags.
pub fn auto_tag_corpus(docs: &mut [Document]) -> usize {
    let updated = docs.iter_mut().map(auto_tag).filter(|u| *u).count();
    tracing::info!(processed = docs.len(), updated, "auto-tagged corpus");
    updated
}
