// Explanation Generator
// Renders the one-paragraph rationale for a detection outcome.
// Pure formatting; never feeds back into decision logic.

use crate::models::Prediction;

/// Rationale for an image analysis, referencing the winning prompt of
/// each polarity.
pub fn image_explanation(
    prediction: Prediction,
    diff: f64,
    ai_match: &str,
    natural_match: &str,
) -> String {
    match prediction {
        Prediction::AiGenerated => format!(
            "🤖 CLIP AI Detection: Görsel yapay zeka üretimi olarak tespit edildi. \
             En yüksek benzerlik AI pattern'i ile: '{}'. Güven farkı: {:.3}",
            ai_match, diff
        ),
        Prediction::HumanGenerated => format!(
            "👨‍🎨 CLIP AI Detection: Görsel insan üretimi olarak tespit edildi. \
             En yüksek benzerlik doğal pattern ile: '{}'. Güven farkı: {:.3}",
            natural_match,
            diff.abs()
        ),
        _ => format!(
            "🤔 CLIP AI Detection: Belirsiz sonuç. Hem AI hem de doğal pattern'lere \
             benzerlik gösteriyor. Güven farkı çok düşük: {:.3}",
            diff.abs()
        ),
    }
}

/// Rationale for a text analysis. Text templates do not reference the
/// winning prompts.
pub fn text_explanation(prediction: Prediction, diff: f64) -> String {
    match prediction {
        Prediction::AiGenerated => format!(
            "🤖 CLIP Text Analysis: Metin yapay zeka üretimi pattern'leri gösteriyor. \
             AI yazım stili benzerliği yüksek. Güven farkı: {:.3}",
            diff
        ),
        Prediction::HumanGenerated => format!(
            "✍️ CLIP Text Analysis: Metin insan yazım pattern'leri gösteriyor. \
             Doğal yazım stili tespit edildi. Güven farkı: {:.3}",
            diff.abs()
        ),
        _ => format!(
            "🤔 CLIP Text Analysis: Metin hem AI hem de insan pattern'lerine benzerlik \
             gösteriyor. Belirsiz sonuç. Güven farkı: {:.3}",
            diff.abs()
        ),
    }
}
