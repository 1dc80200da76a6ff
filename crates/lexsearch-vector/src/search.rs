use anyhow::Result;

use lexsearch_text::Preprocessor;

use crate::sparse::{CsrMatrix, SparseVector};
use crate::tfidf::TfidfVectorizer;

/// Corpus positions and their scores, best first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
	pub indices: Vec<usize>,
	pub scores: Vec<f64>,
}

impl Ranking {
	pub fn len(&self) -> usize { self.indices.len() }

	pub fn is_empty(&self) -> bool { self.indices.is_empty() }
}

/// One cosine score per matrix row, in row order. Rows or queries without any
/// weight score 0.0.
pub fn cosine_similarities(query: &SparseVector, matrix: &CsrMatrix) -> Vec<f64> {
	let q = query.as_row();
	matrix.rows().map(|row| q.cosine(&row)).collect()
}

/// Order positions by descending score. Equal scores keep corpus order.
/// `top_n = Some(k)` keeps at most `k` entries.
pub fn rank(scores: &[f64], top_n: Option<usize>) -> Ranking {
	let mut order: Vec<usize> = (0..scores.len()).collect();
	order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
	if let Some(k) = top_n { order.truncate(k); }
	let ranked_scores = order.iter().map(|&i| scores[i]).collect();
	Ranking { indices: order, scores: ranked_scores }
}

pub fn search(
	query: &str,
	matrix: &CsrMatrix,
	vectorizer: &TfidfVectorizer,
	preprocessor: &Preprocessor,
	top_n: Option<usize>,
) -> Result<Ranking> {
	let preprocessed = preprocessor.preprocess(query)?;
	let query_vector = vectorizer.transform(&preprocessed);
	if query_vector.is_zero() {
		tracing::debug!(query, "query has no known terms, every score is 0");
	}
	let scores = cosine_similarities(&query_vector, matrix);
	Ok(rank(&scores, top_n))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rank_sorts_descending_and_keeps_ties_in_corpus_order() {
		let r = rank(&[0.1, 0.5, 0.1, 0.9], None);
		assert_eq!(r.indices, vec![3, 1, 0, 2]);
		assert_eq!(r.scores, vec![0.9, 0.5, 0.1, 0.1]);
	}

	#[test]
	fn rank_truncates_to_top_n() {
		let scores = [0.3, 0.2, 0.7];
		assert_eq!(rank(&scores, Some(2)).indices, vec![2, 0]);
		assert_eq!(rank(&scores, Some(0)).len(), 0);
		assert_eq!(rank(&scores, Some(10)).len(), 3);
	}

	#[test]
	fn zero_query_scores_zero_everywhere() {
		let m = CsrMatrix::from_rows(2, &[SparseVector::from_pairs(vec![(0, 1.0)]), SparseVector::default()]).unwrap();
		assert_eq!(cosine_similarities(&SparseVector::default(), &m), vec![0.0, 0.0]);
	}
}
