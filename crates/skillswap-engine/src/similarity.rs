use crate::vectorizer::SparseVector;

/// Cosine similarity between two unit (or zero) vectors, as produced by
/// [`CorpusModel::transform`](crate::CorpusModel::transform). Zero if either vector is zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    a.dot(b)
}

/// Dense, symmetric N×N cosine similarity matrix, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute every pairwise similarity.
    ///
    /// Only the upper triangle is computed; the lower triangle mirrors it.
    /// The diagonal is 1 for non-zero vectors and 0 for zero vectors.
    pub fn compute(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            if !vectors[i].is_zero() {
                values[i * n + i] = 1.0;
            }
            for j in (i + 1)..n {
                let s = cosine_similarity(&vectors[i], &vectors[j]).clamp(0.0, 1.0);
                values[i * n + j] = s;
                values[j * n + i] = s;
            }
        }
        Self { n, values }
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}
