// Similarity Scoring
// Reduces one input embedding against one prompt set's embeddings

use crate::models::{EmbeddingVector, SimilarityProfile};

/// Compute the per-prompt similarity sequence and its reductions.
///
/// Pure and deterministic. Both sides are unit-norm, so each dot product
/// is a cosine similarity in [-1, 1]. The static prompt sets guarantee
/// n >= 1; an empty slice still yields a zeroed profile rather than a
/// division by zero.
pub fn score_against(
    input: &EmbeddingVector,
    prompt_vectors: &[EmbeddingVector],
) -> SimilarityProfile {
    if prompt_vectors.is_empty() {
        return SimilarityProfile {
            similarities: Vec::new(),
            mean: 0.0,
            max: 0.0,
            argmax: 0,
        };
    }

    let similarities: Vec<f64> = prompt_vectors.iter().map(|p| input.dot(p)).collect();

    let mean = similarities.iter().sum::<f64>() / similarities.len() as f64;

    let mut max = similarities[0];
    let mut argmax = 0;
    for (i, &sim) in similarities.iter().enumerate().skip(1) {
        if sim > max {
            max = sim;
            argmax = i;
        }
    }

    SimilarityProfile {
        similarities,
        mean,
        max,
        argmax,
    }
}
