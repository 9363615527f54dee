use crate::index::Document;

pub const TITLE_BOOST: f64 = 3.0;
pub const TAGS_BOOST: f64 = 1.8;
pub const ABSTRACT_BOOST: f64 = 1.2;

/// Lowercased copies of the boostable fields of one document.
#[derive(Debug, Clone)]
pub struct FieldText {
    title: String,
    tags: String,
    summary: String,
}

impl FieldText {
    pub fn of(doc: &Document) -> Self {
        Self {
            title: doc.title.to_lowercase(),
            tags: doc.tags.join(" ").to_lowercase(),
            summary: doc.summary.to_lowercase(),
        }
    }
}

/// Multiply `base` by the boost of every field containing `term` as a substring.
pub fn apply_field_boosts(fields: &FieldText, term: &str, base: f64) -> f64 {
    let mut boost = 1.0;
    if fields.title.contains(term) {
        boost *= TITLE_BOOST;
    }
    if fields.tags.contains(term) {
        boost *= TAGS_BOOST;
    }
    if fields.summary.contains(term) {
        boost *= ABSTRACT_BOOST;
    }
    base * boost
}

/// Fold every term's boost onto `base`. Boosts compound across terms.
pub fn boost_all(doc: &Document, terms: &[String], base: f64) -> f64 {
    let fields = FieldText::of(doc);
    terms.iter().fold(base, |score, term| apply_field_boosts(&fields, term, score))
}
