// Detection Module
// CLIP-based AI content detection core logic organized into specialized submodules:
// - prompt_bank: static descriptor prompt sets and per-call encoding
// - scoring: per-prompt similarity sequence reduced to mean/max statistics
// - decision: deadband policy mapping the similarity gap to prediction + confidence
// - explanation: natural-language rationale rendering
// - analyzer: encode → score → decide → explain pipeline

pub mod analyzer;
pub mod decision;
pub mod explanation;
pub mod prompt_bank;
pub mod scoring;

// Re-export commonly used items
pub use analyzer::ClipDetector;
pub use decision::{decide, AnalysisMode, DecisionPolicy, IMAGE_POLICY, TEXT_POLICY};
pub use explanation::{image_explanation, text_explanation};
pub use prompt_bank::{
    encode_prompt_set,
    Polarity,
    PromptSet,
    AI_IMAGE,
    AI_TEXT,
    HUMAN_TEXT,
    NATURAL_IMAGE,
};
pub use scoring::score_against;
