//! Embedding vector type and cosine similarity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from similarity computation.
#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("zero-magnitude vector has no direction")]
    ZeroMagnitude,
}

/// A vector embedding of an image or a piece of text.
///
/// The dimensionality is fixed by the provider that produced the vector
/// (e.g. 1024 for the Azure image-retrieval model) and is assumed
/// consistent within one vector store. Serializes as a bare JSON array
/// of floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding {
    /// The embedding vector.
    pub values: Vec<f32>,
}

impl Embedding {
    /// Creates a new embedding from a vector of values.
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Returns the dimensionality of this embedding.
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    /// Euclidean magnitude over the vector's full length.
    pub fn magnitude(&self) -> f32 {
        self.values.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Computes cosine similarity with another embedding.
    ///
    /// When the vectors differ in length, the dot product runs over the
    /// overlapping prefix only, while each magnitude is taken over its
    /// vector's full length. Same-length inputs get the ordinary cosine;
    /// mixed-length inputs get a score biased toward zero. Callers that
    /// need symmetric behavior must pass equal-length vectors.
    ///
    /// Fails if either vector has zero magnitude.
    pub fn cosine_similarity(&self, other: &Embedding) -> Result<f32, SimilarityError> {
        let dot: f32 = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| a * b)
            .sum();

        let norm_a = self.magnitude();
        let norm_b = other.magnitude();

        if norm_a == 0.0 || norm_b == 0.0 {
            return Err(SimilarityError::ZeroMagnitude);
        }

        Ok(dot / (norm_a * norm_b))
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_dimension() {
        let embedding = Embedding::new(vec![0.1, 0.2, 0.3]);
        assert_eq!(embedding.dimension(), 3);
    }

    #[test]
    fn cosine_similarity_identical() {
        let a = Embedding::new(vec![1.0, 0.0, 0.0]);
        let b = Embedding::new(vec![1.0, 0.0, 0.0]);
        let similarity = a.cosine_similarity(&b).unwrap();
        assert!((similarity - 1.0).abs() < 0.0001);
    }

    #[test]
    fn cosine_similarity_orthogonal() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![0.0, 1.0]);
        let similarity = a.cosine_similarity(&b).unwrap();
        assert!(similarity.abs() < 0.0001);
    }

    #[test]
    fn cosine_similarity_opposite() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![-1.0, 0.0]);
        let similarity = a.cosine_similarity(&b).unwrap();
        assert!((similarity + 1.0).abs() < 0.0001);
    }

    #[test]
    fn cosine_similarity_scale_invariant() {
        let a = Embedding::new(vec![0.3, -0.7, 0.2]);
        let b = Embedding::new(vec![0.1, 0.5, -0.4]);
        let scaled = Embedding::new(b.values.iter().map(|x| x * 42.0).collect());

        let plain = a.cosine_similarity(&b).unwrap();
        let against_scaled = a.cosine_similarity(&scaled).unwrap();
        assert!((plain - against_scaled).abs() < 0.0001);
    }

    #[test]
    fn cosine_similarity_mismatched_lengths_uses_prefix_dot() {
        // dot over the 2-element prefix: 1*1 + 2*2 = 5
        // norms over full lengths: |a| = sqrt(5), |b| = 3
        let a = Embedding::new(vec![1.0, 2.0]);
        let b = Embedding::new(vec![1.0, 2.0, 2.0]);
        let similarity = a.cosine_similarity(&b).unwrap();
        assert!((similarity - 0.745_356).abs() < 0.0001);
    }

    #[test]
    fn cosine_similarity_trailing_zeros_do_not_bias() {
        // The extra component is zero, so prefix dot and full norm agree.
        let a = Embedding::new(vec![3.0, 4.0]);
        let b = Embedding::new(vec![6.0, 8.0, 0.0]);
        let similarity = a.cosine_similarity(&b).unwrap();
        assert!((similarity - 1.0).abs() < 0.0001);
    }

    #[test]
    fn cosine_similarity_zero_vector_is_error() {
        let a = Embedding::new(vec![0.0, 0.0]);
        let b = Embedding::new(vec![1.0, 0.0]);
        assert!(matches!(
            a.cosine_similarity(&b),
            Err(SimilarityError::ZeroMagnitude)
        ));
        assert!(matches!(
            b.cosine_similarity(&a),
            Err(SimilarityError::ZeroMagnitude)
        ));
    }

    #[test]
    fn serializes_as_bare_array() {
        let embedding = Embedding::new(vec![1.0, -0.5]);
        let json = serde_json::to_string(&embedding).unwrap();
        assert_eq!(json, "[1.0,-0.5]");

        let back: Embedding = serde_json::from_str("[0.25,0.75]").unwrap();
        assert_eq!(back.values, vec![0.25, 0.75]);
    }
}
