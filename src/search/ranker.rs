//! Cosine-similarity ranking over a candidate embedding set.

use std::collections::BTreeMap;

use super::{Embedding, SimilarityError};

/// Ranks `candidates` against `query` by cosine similarity and returns the
/// best `n` as `(identifier, score)` pairs in descending score order.
///
/// The result length is `min(n, candidates.len())`. The sort is stable, so
/// equal scores keep the candidate map's identifier order. A zero-magnitude
/// query or candidate aborts the whole ranking.
pub fn top_n(
    query: &Embedding,
    candidates: &BTreeMap<String, Embedding>,
    n: usize,
) -> Result<Vec<(String, f32)>, SimilarityError> {
    let mut scores = Vec::with_capacity(candidates.len());
    for (id, embedding) in candidates {
        let score = query.cosine_similarity(embedding)?;
        scores.push((id.clone(), score));
    }

    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scores.truncate(n);

    Ok(scores)
}
