//! Compressed sparse row storage for TF-IDF vectors.

use serde::{Deserialize, Serialize};

use lexsearch_core::error::{Error, Result};

/// Borrowed view of one sparse vector. `indices` are strictly increasing.
#[derive(Debug, Clone, Copy)]
pub struct SparseRow<'a> {
    pub indices: &'a [usize],
    pub values: &'a [f64],
}

impl<'a> SparseRow<'a> {
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseRow<'_>) -> f64 {
        let (mut i, mut j, mut acc) = (0usize, 0usize, 0.0f64);
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }

    /// Cosine similarity. An all-zero side has no direction; the result is
    /// then 0.0 rather than NaN.
    pub fn cosine(&self, other: &SparseRow<'_>) -> f64 {
        let denom = self.norm() * other.norm();
        if denom == 0.0 { 0.0 } else { self.dot(other) / denom }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Build from `(index, value)` pairs in any order. Zero values are dropped.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.retain(|(_, v)| *v != 0.0);
        pairs.sort_by_key(|(i, _)| *i);
        let (indices, values) = pairs.into_iter().unzip();
        Self { indices, values }
    }

    pub fn as_row(&self) -> SparseRow<'_> {
        SparseRow { indices: &self.indices, values: &self.values }
    }

    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|v| *v == 0.0)
    }

    pub fn normalize_l2(&mut self) {
        let norm = self.as_row().norm();
        if norm > 0.0 {
            for v in &mut self.values { *v /= norm; }
        }
    }
}

/// Row-major sparse matrix: row `r` occupies `indptr[r]..indptr[r + 1]` of
/// `indices` and `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl CsrMatrix {
    pub fn new(n_cols: usize) -> Self {
        Self { n_cols, indptr: vec![0], indices: Vec::new(), data: Vec::new() }
    }

    pub fn from_rows<'a, I>(n_cols: usize, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a SparseVector>,
    {
        let mut m = Self::new(n_cols);
        for row in rows { m.push_row(row)?; }
        Ok(m)
    }

    pub fn push_row(&mut self, row: &SparseVector) -> Result<()> {
        if let Some(&last) = row.indices.last() {
            if last >= self.n_cols {
                return Err(Error::Cache(format!("column {} out of range for width {}", last, self.n_cols)));
            }
        }
        self.indices.extend_from_slice(&row.indices);
        self.data.extend_from_slice(&row.values);
        self.indptr.push(self.indices.len());
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.indptr.len().saturating_sub(1)
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn row(&self, r: usize) -> SparseRow<'_> {
        let (start, end) = (self.indptr[r], self.indptr[r + 1]);
        SparseRow { indices: &self.indices[start..end], values: &self.data[start..end] }
    }

    pub fn rows(&self) -> impl Iterator<Item = SparseRow<'_>> + '_ {
        (0..self.n_rows()).map(move |r| self.row(r))
    }

    /// Structural checks for matrices that did not come from `push_row`,
    /// i.e. ones read back from disk.
    pub fn validate(&self) -> Result<()> {
        let bad = |msg: String| Err(Error::Cache(format!("invalid matrix: {msg}")));
        if self.indptr.first() != Some(&0) {
            return bad("indptr must start at 0".into());
        }
        if self.indptr.windows(2).any(|w| w[0] > w[1]) {
            return bad("indptr is not monotonic".into());
        }
        if self.indptr.last() != Some(&self.indices.len()) || self.indices.len() != self.data.len() {
            return bad("indptr, indices and data lengths disagree".into());
        }
        for r in 0..self.n_rows() {
            let row = self.row(r);
            if row.indices.windows(2).any(|w| w[0] >= w[1]) {
                return bad(format!("row {r} has unsorted column indices"));
            }
            if row.indices.last().is_some_and(|&c| c >= self.n_cols) {
                return bad(format!("row {r} has a column out of range"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_merges_sorted_indices() {
        let a = SparseVector::from_pairs(vec![(3, 2.0), (0, 1.0)]);
        let b = SparseVector::from_pairs(vec![(1, 5.0), (3, 4.0)]);
        assert_eq!(a.indices, vec![0, 3]);
        assert_eq!(a.as_row().dot(&b.as_row()), 8.0);
    }

    #[test]
    fn cosine_against_zero_vector_is_zero() {
        let a = SparseVector::from_pairs(vec![(0, 1.0)]);
        let zero = SparseVector::default();
        assert_eq!(a.as_row().cosine(&zero.as_row()), 0.0);
        assert_eq!(zero.as_row().cosine(&zero.as_row()), 0.0);
    }

    #[test]
    fn rows_round_trip_through_csr() {
        let rows = vec![
            SparseVector::from_pairs(vec![(0, 1.0), (2, 0.5)]),
            SparseVector::default(),
            SparseVector::from_pairs(vec![(1, 2.0)]),
        ];
        let m = CsrMatrix::from_rows(3, &rows).unwrap();
        assert_eq!(m.n_rows(), 3);
        assert_eq!(m.nnz(), 3);
        assert!(m.row(1).indices.is_empty());
        assert_eq!(m.row(2).values, &[2.0]);
        m.validate().unwrap();
    }

    #[test]
    fn push_row_rejects_out_of_range_column() {
        let mut m = CsrMatrix::new(2);
        assert!(m.push_row(&SparseVector::from_pairs(vec![(2, 1.0)])).is_err());
    }

    #[test]
    fn validate_catches_corrupt_layout() {
        let mut m = CsrMatrix::from_rows(2, &[SparseVector::from_pairs(vec![(0, 1.0)])]).unwrap();
        m.indptr.push(5);
        assert!(m.validate().is_err());
    }
}
