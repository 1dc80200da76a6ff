use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use lexsearch_core::corpus::Corpus;
use lexsearch_core::error::Error;
use lexsearch_core::types::SearchHit;
use lexsearch_text::Preprocessor;

use crate::search::search;
use crate::sparse::CsrMatrix;
use crate::tfidf::TfidfVectorizer;

/// A corpus unit paired with the matrix row that holds its vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedUnit {
    pub id: String,
    pub row: usize,
}

/// Fitted vectorizer, term-document matrix and the unit each row belongs to.
///
/// Units and rows are paired at construction: unit `i` always owns row `i`,
/// and a space whose unit count differs from its row count cannot be built.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    units: Vec<IndexedUnit>,
    matrix: CsrMatrix,
    vectorizer: TfidfVectorizer,
}

impl VectorSpace {
    pub fn new(unit_ids: Vec<String>, matrix: CsrMatrix, vectorizer: TfidfVectorizer) -> Result<Self> {
        if unit_ids.len() != matrix.n_rows() {
            return Err(Error::RowCountMismatch { units: unit_ids.len(), rows: matrix.n_rows() }.into());
        }
        if matrix.n_cols() != vectorizer.vocabulary_len() {
            return Err(Error::Cache(format!(
                "matrix has {} columns but the vocabulary has {} terms",
                matrix.n_cols(),
                vectorizer.vocabulary_len()
            ))
            .into());
        }
        let units = unit_ids
            .into_iter()
            .enumerate()
            .map(|(row, id)| IndexedUnit { id, row })
            .collect();
        Ok(Self { units, matrix, vectorizer })
    }

    /// Preprocess every unit and fit a fresh TF-IDF space over the corpus.
    pub fn build(corpus: &Corpus, preprocessor: &Preprocessor) -> Result<Self> {
        let pb = ProgressBar::new(corpus.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} units ({percent}%)")?
                .progress_chars("#>-"),
        );
        let mut preprocessed = Vec::with_capacity(corpus.len());
        for unit in corpus.units() {
            preprocessed.push(preprocessor.preprocess(&unit.text)?);
            pb.inc(1);
        }
        pb.finish_and_clear();

        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&preprocessed)?;
        tracing::info!(
            units = corpus.len(),
            terms = vectorizer.vocabulary_len(),
            nnz = matrix.nnz(),
            "fitted TF-IDF space"
        );
        Self::new(corpus.unit_ids(), matrix, vectorizer)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[IndexedUnit] {
        &self.units
    }

    pub fn unit_ids(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.id.as_str()).collect()
    }

    pub fn matrix(&self) -> &CsrMatrix {
        &self.matrix
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Rank every unit against `query`, best first.
    pub fn search(&self, query: &str, preprocessor: &Preprocessor, top_n: Option<usize>) -> Result<Vec<SearchHit>> {
        let ranking = search(query, &self.matrix, &self.vectorizer, preprocessor, top_n)?;
        Ok(ranking
            .indices
            .iter()
            .zip(ranking.scores.iter())
            .map(|(&index, &score)| SearchHit { index, id: self.units[index].id.clone(), score })
            .collect())
    }
}
