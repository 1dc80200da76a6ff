//! TF-IDF vectorizer with scikit-learn `TfidfVectorizer` default semantics:
//!
//! - terms are whitespace-separated tokens of at least two characters, lowercased
//! - vocabulary columns follow lexicographic term order
//! - `tf` is the raw count, `idf = ln((1 + n) / (1 + df)) + 1` (smoothed)
//! - every row is L2-normalized; documents without known terms stay all-zero

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use lexsearch_core::error::{Error, Result};

use crate::sparse::{CsrMatrix, SparseVector};

pub const DEFAULT_MIN_TOKEN_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
    min_token_chars: usize,
}

impl TfidfVectorizer {
    pub fn fit<S: AsRef<str>>(docs: &[S]) -> Self {
        Self::fit_with(docs, DEFAULT_MIN_TOKEN_CHARS)
    }

    pub fn fit_with<S: AsRef<str>>(docs: &[S], min_token_chars: usize) -> Self {
        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for doc in docs {
            let terms: HashSet<String> = analyze(doc.as_ref(), min_token_chars).collect();
            for term in terms { *df.entry(term).or_insert(0) += 1; }
        }
        let n = docs.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(df.len());
        for (col, (term, count)) in df.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + count as f64)).ln() + 1.0);
            vocabulary.insert(term, col);
        }
        Self { vocabulary, idf, min_token_chars }
    }

    pub fn fit_transform<S: AsRef<str>>(docs: &[S]) -> Result<(Self, CsrMatrix)> {
        let vectorizer = Self::fit(docs);
        let matrix = vectorizer.transform_all(docs)?;
        Ok((vectorizer, matrix))
    }

    /// Vectorize one document. Terms outside the fitted vocabulary are dropped.
    pub fn transform(&self, doc: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in analyze(doc, self.min_token_chars) {
            if let Some(&col) = self.vocabulary.get(&term) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }
        let mut v = SparseVector::from_pairs(
            counts.into_iter().map(|(col, tf)| (col, tf * self.idf[col])).collect(),
        );
        v.normalize_l2();
        v
    }

    pub fn transform_all<S: AsRef<str>>(&self, docs: &[S]) -> Result<CsrMatrix> {
        let mut matrix = CsrMatrix::new(self.vocabulary.len());
        for doc in docs {
            matrix.push_row(&self.transform(doc.as_ref()))?;
        }
        Ok(matrix)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|col| self.idf[col])
    }

    /// Consistency checks for a vectorizer read back from disk.
    pub fn validate(&self) -> Result<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(Error::Cache(format!(
                "vectorizer has {} terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        let mut seen = vec![false; self.idf.len()];
        for &col in self.vocabulary.values() {
            match seen.get_mut(col) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(Error::Cache(format!("vectorizer column {col} is invalid or repeated"))),
            }
        }
        Ok(())
    }
}

fn analyze(doc: &str, min_chars: usize) -> impl Iterator<Item = String> + '_ {
    doc.split_whitespace()
        .filter(move |t| t.chars().count() >= min_chars)
        .map(str::to_lowercase)
}
