// Clipsight Data Models
// Embedding vectors, similarity profiles and the detection result record

use serde::{Deserialize, Serialize};

// ============ Embedding Vector ============

/// A fixed-length embedding produced by the encoding service.
///
/// Stored as `f32` (CLIP feature precision); all similarity math
/// accumulates in `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingVector {
    values: Vec<f32>,
}

impl EmbeddingVector {
    /// Wrap raw values, rescaling to unit L2 norm.
    ///
    /// A zero vector is left untouched; the provider layer rejects those
    /// before they reach scoring.
    pub fn normalized(mut values: Vec<f32>) -> Self {
        let norm = values.iter().map(|v| (*v as f64) * (*v as f64)).sum::<f64>().sqrt();
        if norm > f64::EPSILON {
            for v in values.iter_mut() {
                *v = (*v as f64 / norm) as f32;
            }
        }
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Dot product with `f64` accumulation.
    ///
    /// For two unit-norm vectors of equal dimensionality this is a valid
    /// cosine similarity in [-1, 1].
    pub fn dot(&self, other: &EmbeddingVector) -> f64 {
        self.values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (*a as f64) * (*b as f64))
            .sum()
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| (*v as f64) * (*v as f64)).sum::<f64>().sqrt()
    }
}

// ============ Similarity Profile ============

/// Per-prompt similarity scores of one input against one prompt set,
/// plus the reduced statistics the decision engine consumes.
///
/// Ephemeral: lives only for the duration of one analysis call.
#[derive(Debug, Clone)]
pub struct SimilarityProfile {
    /// Cosine similarity per prompt, ordered parallel to the prompt set.
    pub similarities: Vec<f64>,
    pub mean: f64,
    pub max: f64,
    /// Index of the maximum similarity (the winning prompt).
    pub argmax: usize,
}

// ============ Prediction ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Prediction {
    AiGenerated,
    HumanGenerated,
    Uncertain,
    Error,
}

impl Prediction {
    pub fn as_str(self) -> &'static str {
        match self {
            Prediction::AiGenerated => "ai-generated",
            Prediction::HumanGenerated => "human-generated",
            Prediction::Uncertain => "uncertain",
            Prediction::Error => "error",
        }
    }
}

// ============ Detection Result ============

/// The caller-facing result record.
///
/// Image analysis fills the `natural_*` fields, text analysis the
/// `human_*` fields; the absent side is skipped during serialization so
/// both wire shapes keep their historical keys. Error results carry only
/// `prediction`, `confidence` and `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    pub prediction: Prediction,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub human_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ai_similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_natural_similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_human_similarity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_ai_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_natural_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_human_match: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_difference: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectionResult {
    /// Error-shaped result: `prediction = "error"`, `confidence = 0`, no
    /// partial scores.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            prediction: Prediction::Error,
            confidence: 0.0,
            ai_score: None,
            natural_score: None,
            human_score: None,
            max_ai_similarity: None,
            max_natural_similarity: None,
            max_human_similarity: None,
            best_ai_match: None,
            best_natural_match: None,
            best_human_match: None,
            confidence_difference: None,
            method: None,
            explanation: None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.prediction == Prediction::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_has_unit_norm() {
        let v = EmbeddingVector::normalized(vec![3.0, 4.0]);
        assert!((v.norm() - 1.0).abs() < 1e-6);
        assert!((v.as_slice()[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_stays_zero() {
        let v = EmbeddingVector::normalized(vec![0.0, 0.0, 0.0]);
        assert_eq!(v.norm(), 0.0);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn test_dot_of_unit_vectors_is_cosine() {
        let a = EmbeddingVector::normalized(vec![1.0, 0.0]);
        let b = EmbeddingVector::normalized(vec![0.0, 1.0]);
        assert!(a.dot(&b).abs() < 1e-9);
        assert!((a.dot(&a) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_prediction_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&Prediction::AiGenerated).unwrap(), "\"ai-generated\"");
        assert_eq!(serde_json::to_string(&Prediction::HumanGenerated).unwrap(), "\"human-generated\"");
        assert_eq!(serde_json::to_string(&Prediction::Error).unwrap(), "\"error\"");
    }

    #[test]
    fn test_failure_result_shape() {
        let result = DetectionResult::failure("Image analysis error: bad bytes");
        let json = serde_json::to_string(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["prediction"], "error");
        assert_eq!(value["confidence"], 0.0);
        assert_eq!(value["error"], "Image analysis error: bad bytes");
        assert!(value.get("ai_score").is_none());
        assert!(value.get("explanation").is_none());
    }
}
