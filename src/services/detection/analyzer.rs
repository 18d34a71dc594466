// CLIP Analyzer
// Runs the encode → score → decide → explain pipeline for one input.
// Analysis entry points never fail outward: provider or scoring errors
// become an error-shaped DetectionResult at this boundary.

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::DetectionResult;
use crate::services::providers::{Encoder, ProviderError};

use super::decision::{decide, AnalysisMode};
use super::explanation::{image_explanation, text_explanation};
use super::prompt_bank::{encode_prompt_set, AI_IMAGE, AI_TEXT, HUMAN_TEXT, NATURAL_IMAGE};
use super::scoring::score_against;

pub struct ClipDetector {
    encoder: Arc<dyn Encoder>,
}

impl ClipDetector {
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        Self { encoder }
    }

    /// Analyze raw image bytes against the image prompt sets.
    pub async fn analyze_image(&self, image: &[u8]) -> DetectionResult {
        let request_id = Uuid::new_v4();
        info!(request_id = %request_id, bytes = image.len(), "image analysis started");

        match self.try_analyze_image(image).await {
            Ok(result) => {
                info!(
                    request_id = %request_id,
                    prediction = result.prediction.as_str(),
                    confidence = result.confidence,
                    "image analysis completed"
                );
                result
            }
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "image analysis failed");
                DetectionResult::failure(format!("Image analysis error: {}", e))
            }
        }
    }

    /// Analyze a text against the text prompt sets.
    ///
    /// The raw input is encoded as if it were a caption; long texts are
    /// truncated by the provider's tokenizer.
    pub async fn analyze_text(&self, text: &str) -> DetectionResult {
        let request_id = Uuid::new_v4();
        info!(request_id = %request_id, chars = text.chars().count(), "text analysis started");

        match self.try_analyze_text(text).await {
            Ok(result) => {
                info!(
                    request_id = %request_id,
                    prediction = result.prediction.as_str(),
                    confidence = result.confidence,
                    "text analysis completed"
                );
                result
            }
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "text analysis failed");
                DetectionResult::failure(format!("Text analysis error: {}", e))
            }
        }
    }

    async fn try_analyze_image(&self, image: &[u8]) -> Result<DetectionResult, ProviderError> {
        let input = self.encoder.encode_image(image).await?;

        let ai_vectors = encode_prompt_set(self.encoder.as_ref(), &AI_IMAGE).await?;
        let natural_vectors = encode_prompt_set(self.encoder.as_ref(), &NATURAL_IMAGE).await?;

        let ai_profile = score_against(&input, &ai_vectors);
        let natural_profile = score_against(&input, &natural_vectors);

        let diff = ai_profile.max - natural_profile.max;
        let (prediction, confidence) = decide(&AnalysisMode::Image.policy(), diff);

        // Both winning prompts are reported regardless of which side won.
        let best_ai = AI_IMAGE.prompts[ai_profile.argmax];
        let best_natural = NATURAL_IMAGE.prompts[natural_profile.argmax];

        Ok(DetectionResult {
            prediction,
            confidence,
            ai_score: Some(ai_profile.mean),
            natural_score: Some(natural_profile.mean),
            human_score: None,
            max_ai_similarity: Some(ai_profile.max),
            max_natural_similarity: Some(natural_profile.max),
            max_human_similarity: None,
            best_ai_match: Some(best_ai.to_string()),
            best_natural_match: Some(best_natural.to_string()),
            best_human_match: None,
            confidence_difference: Some(diff),
            method: Some(format!("CLIP-{}", self.encoder.model_name())),
            explanation: Some(image_explanation(prediction, diff, best_ai, best_natural)),
            error: None,
        })
    }

    async fn try_analyze_text(&self, text: &str) -> Result<DetectionResult, ProviderError> {
        let input = self.encoder.encode_text(text, true).await?;

        let ai_vectors = encode_prompt_set(self.encoder.as_ref(), &AI_TEXT).await?;
        let human_vectors = encode_prompt_set(self.encoder.as_ref(), &HUMAN_TEXT).await?;

        let ai_profile = score_against(&input, &ai_vectors);
        let human_profile = score_against(&input, &human_vectors);

        let diff = ai_profile.max - human_profile.max;
        let (prediction, confidence) = decide(&AnalysisMode::Text.policy(), diff);

        let best_ai = AI_TEXT.prompts[ai_profile.argmax];
        let best_human = HUMAN_TEXT.prompts[human_profile.argmax];

        Ok(DetectionResult {
            prediction,
            confidence,
            ai_score: Some(ai_profile.mean),
            natural_score: None,
            human_score: Some(human_profile.mean),
            max_ai_similarity: Some(ai_profile.max),
            max_natural_similarity: None,
            max_human_similarity: Some(human_profile.max),
            best_ai_match: Some(best_ai.to_string()),
            best_natural_match: None,
            best_human_match: Some(best_human.to_string()),
            confidence_difference: Some(diff),
            method: Some("CLIP-Text-Analysis".to_string()),
            explanation: Some(text_explanation(prediction, diff)),
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmbeddingVector, Prediction};
    use async_trait::async_trait;

    const STUB_DIMS: usize = 32;

    /// Deterministic encoder: hashes the input into a unit vector, so
    /// repeated calls with the same content produce identical
    /// embeddings. Rejects empty image bytes the way a real provider
    /// rejects undecodable ones.
    struct StubEncoder;

    fn vector_from_seed(seed: u64) -> EmbeddingVector {
        let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
        let mut values = Vec::with_capacity(STUB_DIMS);
        for _ in 0..STUB_DIMS {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            values.push((state as f64 / u64::MAX as f64 * 2.0 - 1.0) as f32);
        }
        EmbeddingVector::normalized(values)
    }

    fn seed_of(bytes: &[u8]) -> u64 {
        bytes
            .iter()
            .fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
                (acc ^ *b as u64).wrapping_mul(0x1000_0000_01b3)
            })
    }

    #[async_trait]
    impl Encoder for StubEncoder {
        async fn encode_image(&self, image: &[u8]) -> Result<EmbeddingVector, ProviderError> {
            if image.is_empty() {
                return Err(ProviderError::ApiError {
                    status: 400,
                    message: "cannot identify image file".to_string(),
                });
            }
            Ok(vector_from_seed(seed_of(image)))
        }

        async fn encode_text(&self, text: &str, _truncate: bool) -> Result<EmbeddingVector, ProviderError> {
            Ok(vector_from_seed(seed_of(text.as_bytes())))
        }

        async fn encode_prompts(&self, prompts: &[&str]) -> Result<Vec<EmbeddingVector>, ProviderError> {
            Ok(prompts
                .iter()
                .map(|p| vector_from_seed(seed_of(p.as_bytes())))
                .collect())
        }

        fn model_name(&self) -> &str {
            "ViT-B/32"
        }
    }

    fn detector() -> ClipDetector {
        ClipDetector::new(Arc::new(StubEncoder))
    }

    #[tokio::test]
    async fn test_text_analysis_is_deterministic() {
        let detector = detector();
        let first = detector.analyze_text("some sample text to classify").await;
        let second = detector.analyze_text("some sample text to classify").await;
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_ne!(first.prediction, Prediction::Error);
    }

    #[tokio::test]
    async fn test_image_result_carries_natural_keys() {
        let detector = detector();
        let result = detector.analyze_image(b"\x89PNG fake bytes").await;
        assert!(!result.is_error());
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("natural_score").is_some());
        assert!(value.get("max_natural_similarity").is_some());
        assert!(value.get("best_natural_match").is_some());
        assert!(value.get("human_score").is_none());
        assert_eq!(value["method"], "CLIP-ViT-B/32");
        assert!(value.get("explanation").is_some());
    }

    #[tokio::test]
    async fn test_text_result_carries_human_keys() {
        let detector = detector();
        let result = detector.analyze_text("hello world").await;
        let value = serde_json::to_value(&result).unwrap();
        assert!(value.get("human_score").is_some());
        assert!(value.get("max_human_similarity").is_some());
        assert!(value.get("best_human_match").is_some());
        assert!(value.get("natural_score").is_none());
        assert_eq!(value["method"], "CLIP-Text-Analysis");
    }

    #[tokio::test]
    async fn test_malformed_image_yields_error_result() {
        let detector = detector();
        let result = detector.analyze_image(b"").await;
        assert!(result.is_error());
        assert_eq!(result.confidence, 0.0);
        let message = result.error.as_deref().unwrap();
        assert!(message.starts_with("Image analysis error:"));
        assert!(result.ai_score.is_none());
    }

    #[tokio::test]
    async fn test_best_matches_come_from_their_sets() {
        let detector = detector();
        let result = detector.analyze_image(b"pixels").await;
        let best_ai = result.best_ai_match.as_deref().unwrap();
        let best_natural = result.best_natural_match.as_deref().unwrap();
        assert!(AI_IMAGE.prompts.contains(&best_ai));
        assert!(NATURAL_IMAGE.prompts.contains(&best_natural));
    }

    #[tokio::test]
    async fn test_confidence_difference_matches_profiles() {
        let detector = detector();
        let result = detector.analyze_text("confidence difference check").await;
        let diff = result.confidence_difference.unwrap();
        let max_ai = result.max_ai_similarity.unwrap();
        let max_human = result.max_human_similarity.unwrap();
        assert!((diff - (max_ai - max_human)).abs() < 1e-12);
    }
}
