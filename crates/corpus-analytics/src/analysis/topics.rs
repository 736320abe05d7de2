//! Latent topic modeling over the normalized corpus.
//!
//! Builds a tf-idf weighted term-document matrix capped at a maximum
//! vocabulary size, then decomposes it into k non-negative factors with
//! multiplicative updates. Initialization is drawn from a seeded RNG so a
//! run is reproducible given its configuration.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::defaults;
use crate::error::{AnalysisError, AnalysisResult};
use crate::models::{TopicResult, TopicSummary};

/// Guard against zero denominators in the multiplicative updates.
const UPDATE_EPS: f64 = 1e-10;

/// Fits k latent topics to a collection of normalized documents.
#[derive(Debug, Clone)]
pub struct TopicModel {
    vocabulary_cap: usize,
    top_terms: usize,
    seed: u64,
}

impl TopicModel {
    /// Create a topic model.
    ///
    /// `vocabulary_cap` bounds the term-document matrix at the top-M terms
    /// by corpus frequency; `top_terms` is the number of representative
    /// terms kept per topic; `seed` drives the factorization's random
    /// initialization.
    #[must_use]
    pub fn new(vocabulary_cap: usize, top_terms: usize, seed: u64) -> Self {
        Self { vocabulary_cap, top_terms, seed }
    }

    /// Fit `k` topics to the documents.
    ///
    /// Fails with [`AnalysisError::InsufficientData`] when fewer documents
    /// than topics are supplied, and with [`AnalysisError::EmptyVocabulary`]
    /// when no terms survive filtering.
    pub fn fit(&self, documents: &[Vec<String>], k: usize) -> AnalysisResult<TopicResult> {
        if k == 0 || documents.len() < k {
            return Err(AnalysisError::insufficient_data(k, documents.len()));
        }

        let vocabulary = self.build_vocabulary(documents);
        if vocabulary.is_empty() {
            return Err(AnalysisError::EmptyVocabulary);
        }

        let matrix = tfidf_matrix(documents, &vocabulary);
        let (doc_factors, term_factors) = factorize(&matrix, documents.len(), vocabulary.len(), k, self.seed);

        let topics = (0..k)
            .map(|topic| {
                let row = &term_factors[topic * vocabulary.len()..(topic + 1) * vocabulary.len()];
                let mut ranked: Vec<usize> = (0..vocabulary.len()).collect();
                ranked.sort_by(|&a, &b| {
                    row[b].partial_cmp(&row[a]).unwrap_or(Ordering::Equal).then(a.cmp(&b))
                });
                TopicSummary {
                    id: topic + 1,
                    terms: ranked
                        .into_iter()
                        .take(self.top_terms)
                        .map(|term| vocabulary[term].clone())
                        .collect(),
                }
            })
            .collect();

        let weights = doc_factors
            .chunks(k)
            .map(|row| {
                let total: f64 = row.iter().sum();
                if total > 0.0 {
                    row.iter().map(|w| w / total).collect()
                } else {
                    // A document with no in-vocabulary terms carries no
                    // signal; report the uniform distribution so every row
                    // still sums to 1.
                    vec![1.0 / k as f64; k]
                }
            })
            .collect();

        Ok(TopicResult { topics, weights })
    }

    /// Top-M vocabulary by total corpus frequency; ties broken by first-seen
    /// order so the matrix layout is stable across runs.
    fn build_vocabulary(&self, documents: &[Vec<String>]) -> Vec<String> {
        let mut counts: std::collections::HashMap<String, (usize, usize)> =
            std::collections::HashMap::new();
        let mut next_slot = 0usize;

        for document in documents {
            for token in document {
                let entry = counts.entry(token.clone()).or_insert_with(|| {
                    let slot = next_slot;
                    next_slot += 1;
                    (0, slot)
                });
                entry.0 += 1;
            }
        }

        let mut terms: Vec<(String, usize, usize)> =
            counts.into_iter().map(|(term, (count, slot))| (term, count, slot)).collect();
        terms.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        terms.truncate(self.vocabulary_cap);
        terms.into_iter().map(|(term, _, _)| term).collect()
    }
}

impl Default for TopicModel {
    fn default() -> Self {
        Self::new(defaults::VOCABULARY_CAP, defaults::TOP_TERMS_PER_TOPIC, defaults::SEED)
    }
}

/// Row-major n x m tf-idf matrix: raw term counts weighted by smoothed idf,
/// each document row L2-normalized.
fn tfidf_matrix(documents: &[Vec<String>], vocabulary: &[String]) -> Vec<f64> {
    let n = documents.len();
    let m = vocabulary.len();
    let index: std::collections::HashMap<&str, usize> =
        vocabulary.iter().enumerate().map(|(i, term)| (term.as_str(), i)).collect();

    let mut matrix = vec![0.0; n * m];
    let mut document_frequency = vec![0usize; m];

    for (doc, document) in documents.iter().enumerate() {
        let row = &mut matrix[doc * m..(doc + 1) * m];
        for token in document {
            if let Some(&term) = index.get(token.as_str()) {
                row[term] += 1.0;
            }
        }
        for (term, df) in document_frequency.iter_mut().enumerate() {
            if row[term] > 0.0 {
                *df += 1;
            }
        }
    }

    let idf: Vec<f64> = document_frequency
        .iter()
        .map(|&df| ((1.0 + n as f64) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    for doc in 0..n {
        let row = &mut matrix[doc * m..(doc + 1) * m];
        for (term, value) in row.iter_mut().enumerate() {
            *value *= idf[term];
        }
        let norm: f64 = row.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in row.iter_mut() {
                *value /= norm;
            }
        }
    }

    matrix
}

/// Non-negative factorization V ~= W * H via multiplicative updates.
///
/// Returns (W: n x k, H: k x m), both row-major. Deterministic for a fixed
/// seed.
fn factorize(matrix: &[f64], n: usize, m: usize, k: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mean = matrix.iter().sum::<f64>() / (n * m) as f64;
    let scale = (mean / k as f64).sqrt().max(UPDATE_EPS);

    let mut w: Vec<f64> =
        (0..n * k).map(|_| rng.gen_range(0.0..1.0) * scale + UPDATE_EPS).collect();
    let mut h: Vec<f64> =
        (0..k * m).map(|_| rng.gen_range(0.0..1.0) * scale + UPDATE_EPS).collect();

    let mut previous_error = f64::INFINITY;

    for iteration in 0..defaults::FACTORIZATION_ITERATIONS {
        // H <- H * (W^T V) / (W^T W H)
        let wt_v = mat_mul_transpose_left(&w, matrix, n, k, m);
        let wt_w = mat_mul_transpose_left(&w, &w, n, k, k);
        let wt_w_h = mat_mul(&wt_w, &h, k, k, m);
        for i in 0..k * m {
            h[i] *= wt_v[i] / (wt_w_h[i] + UPDATE_EPS);
        }

        // W <- W * (V H^T) / (W H H^T)
        let v_ht = mat_mul_transpose_right(matrix, &h, n, m, k);
        let h_ht = mat_mul_transpose_right(&h, &h, k, m, k);
        let w_h_ht = mat_mul(&w, &h_ht, n, k, k);
        for i in 0..n * k {
            w[i] *= v_ht[i] / (w_h_ht[i] + UPDATE_EPS);
        }

        if iteration % 10 == 9 {
            let error = reconstruction_error(matrix, &w, &h, n, k, m);
            if previous_error.is_finite()
                && (previous_error - error).abs() <= defaults::EPSILON * previous_error.max(1.0)
            {
                break;
            }
            previous_error = error;
        }
    }

    (w, h)
}

/// C = A * B where A is n x k and B is k x m, all row-major.
fn mat_mul(a: &[f64], b: &[f64], n: usize, k: usize, m: usize) -> Vec<f64> {
    let mut c = vec![0.0; n * m];
    for i in 0..n {
        for l in 0..k {
            let a_il = a[i * k + l];
            if a_il == 0.0 {
                continue;
            }
            for j in 0..m {
                c[i * m + j] += a_il * b[l * m + j];
            }
        }
    }
    c
}

/// C = A^T * B where A is n x k and B is n x m; result is k x m.
fn mat_mul_transpose_left(a: &[f64], b: &[f64], n: usize, k: usize, m: usize) -> Vec<f64> {
    let mut c = vec![0.0; k * m];
    for i in 0..n {
        for l in 0..k {
            let a_il = a[i * k + l];
            if a_il == 0.0 {
                continue;
            }
            for j in 0..m {
                c[l * m + j] += a_il * b[i * m + j];
            }
        }
    }
    c
}

/// C = A * B^T where A is n x m and B is k x m; result is n x k.
fn mat_mul_transpose_right(a: &[f64], b: &[f64], n: usize, m: usize, k: usize) -> Vec<f64> {
    let mut c = vec![0.0; n * k];
    for i in 0..n {
        for l in 0..k {
            let mut sum = 0.0;
            for j in 0..m {
                sum += a[i * m + j] * b[l * m + j];
            }
            c[i * k + l] = sum;
        }
    }
    c
}

/// Frobenius norm of V - W * H.
fn reconstruction_error(matrix: &[f64], w: &[f64], h: &[f64], n: usize, k: usize, m: usize) -> f64 {
    let approx = mat_mul(w, h, n, k, m);
    matrix
        .iter()
        .zip(approx.iter())
        .map(|(v, a)| (v - a) * (v - a))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn test_vocabulary_frequency_order() {
        let model = TopicModel::new(2, 10, 42);
        let docs =
            vec![doc(&["graph", "graph", "topic"]), doc(&["graph", "topic", "trend"])];
        let vocabulary = model.build_vocabulary(&docs);
        // "graph" (3) beats "topic" (2); "trend" (1) falls past the cap.
        assert_eq!(vocabulary, vec!["graph", "topic"]);
    }

    #[test]
    fn test_vocabulary_tie_breaks_by_first_seen() {
        let model = TopicModel::new(10, 10, 42);
        let docs = vec![doc(&["beta", "alpha"]), doc(&["alpha", "beta"])];
        let vocabulary = model.build_vocabulary(&docs);
        assert_eq!(vocabulary, vec!["beta", "alpha"]);
    }

    #[test]
    fn test_fit_rejects_small_corpus() {
        let model = TopicModel::default();
        let docs = vec![doc(&["alpha"])];
        let err = model.fit(&docs, 2).unwrap_err();
        assert_eq!(err, AnalysisError::insufficient_data(2, 1));
    }

    #[test]
    fn test_fit_rejects_empty_vocabulary() {
        let model = TopicModel::default();
        let docs = vec![doc(&[]), doc(&[])];
        let err = model.fit(&docs, 1).unwrap_err();
        assert_eq!(err, AnalysisError::EmptyVocabulary);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let model = TopicModel::new(100, 10, 42);
        let docs = vec![
            doc(&["graph", "node", "edge", "graph"]),
            doc(&["topic", "model", "term"]),
            doc(&["trend", "series", "month"]),
            doc(&["graph", "edge"]),
        ];
        let result = model.fit(&docs, 2).unwrap();
        assert_eq!(result.weights.len(), 4);
        for row in &result.weights {
            let sum: f64 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "row sums to {sum}");
            assert!(row.iter().all(|w| *w >= 0.0));
        }
    }

    #[test]
    fn test_fit_is_deterministic_for_a_seed() {
        let model = TopicModel::new(100, 10, 7);
        let docs = vec![
            doc(&["graph", "node", "edge"]),
            doc(&["topic", "model", "term"]),
            doc(&["trend", "series", "month"]),
        ];
        let first = model.fit(&docs, 2).unwrap();
        let second = model.fit(&docs, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_topic_terms_bounded() {
        let model = TopicModel::new(100, 3, 42);
        let docs = vec![
            doc(&["alpha", "beta", "gamma", "delta", "epsilon"]),
            doc(&["alpha", "beta", "gamma"]),
        ];
        let result = model.fit(&docs, 2).unwrap();
        assert_eq!(result.topics.len(), 2);
        assert_eq!(result.topics[0].id, 1);
        for topic in &result.topics {
            assert!(topic.terms.len() <= 3);
        }
    }

    #[test]
    fn test_empty_document_gets_uniform_distribution() {
        let model = TopicModel::new(100, 10, 42);
        let docs = vec![doc(&["alpha", "beta"]), doc(&["alpha", "gamma"]), doc(&[])];
        let result = model.fit(&docs, 2).unwrap();
        let last = &result.weights[2];
        assert!((last[0] - 0.5).abs() < 1e-9);
        assert!((last[1] - 0.5).abs() < 1e-9);
    }
}
