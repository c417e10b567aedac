//! TF-IDF vectorization over the batch corpus.
//!
//! The vocabulary is every whitespace-delimited term in every document of the
//! run. Weights are raw term counts scaled by a smoothed IDF,
//! `ln((1 + n) / (1 + df)) + 1`, and each vector is L2-normalized so cosine
//! similarity reduces to a dot product.

use std::collections::{BTreeMap, HashSet};

use crate::document::tokenize;

/// Sparse vector over vocabulary indices, entries sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from `(index, weight)` pairs. Zero weights are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut entries: Vec<(usize, f64)> =
            entries.into_iter().filter(|(_, w)| *w != 0.0).collect();
        entries.sort_by_key(|(idx, _)| *idx);
        Self { entries }
    }

    /// Number of non-zero terms.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(idx, _)| *idx)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Inner product, walking both sorted entry lists once.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ia, wa) = self.entries[i];
            let (ib, wb) = other.entries[j];
            match ia.cmp(&ib) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }
}

/// Vocabulary and IDF weights fitted over one batch of documents.
///
/// Immutable once fitted; a new run fits a new model.
#[derive(Debug, Clone, Default)]
pub struct CorpusModel {
    /// term → dimension index, assigned in lexicographic term order
    vocabulary: BTreeMap<String, usize>,
    /// IDF weight per dimension
    idf: Vec<f64>,
    documents: usize,
}

impl CorpusModel {
    /// Fit vocabulary and IDF weights over `documents`.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in documents {
            let unique: HashSet<&str> = tokenize(doc.as_ref()).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (idx, (term, df)) in doc_freq.into_iter().enumerate() {
            vocabulary.insert(term.to_string(), idx);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self {
            vocabulary,
            idf,
            documents: documents.len(),
        }
    }

    /// Fit on `documents` and vectorize each of them.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> (Self, Vec<SparseVector>) {
        let model = Self::fit(documents);
        let vectors = documents
            .iter()
            .map(|d| model.transform(d.as_ref()))
            .collect();
        (model, vectors)
    }

    /// TF-IDF unit vector for `document`. Terms outside the vocabulary are ignored;
    /// a document with no known terms yields the zero vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut tf: BTreeMap<usize, f64> = BTreeMap::new();
        for term in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(term) {
                *tf.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector {
            entries: tf
                .into_iter()
                .map(|(idx, count)| (idx, count * self.idf[idx]))
                .collect(),
        };
        vector.normalize();
        vector
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of documents the model was fitted on.
    pub fn document_count(&self) -> usize {
        self.documents
    }

    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.idf[idx])
    }

    /// Vocabulary terms in index order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }
}
