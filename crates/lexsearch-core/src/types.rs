//! Domain types shared by the text and vector crates.

use serde::{Deserialize, Serialize};

pub type UnitId = String;

/// Which collection of the regulation a unit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Article,
    Point,
}

/// One indexed article or point of the regulation.
///
/// - `id`: corpus-unique identifier (`id_elementa` in the source document)
/// - `kind`: article or point
/// - `text`: the text that gets preprocessed and vectorized. For articles
///   this is chapter title, section title (when present), article title and
///   body joined by newlines; for points it is the body alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusUnit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub text: String,
}

/// A token as reported by a lemmatizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub form: String,
    pub lemma: String,
}

pub type Sentence = Vec<Token>;

/// A ranked corpus unit.
///
/// `index` is the unit's position in corpus order (and its matrix row).
/// `score` is the cosine similarity to the query; higher is better.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub index: usize,
    pub id: UnitId,
    pub score: f64,
}
