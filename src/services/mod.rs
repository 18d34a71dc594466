// Clipsight Core Services
// Embedding provider client, input loading, configuration and detection

pub mod config_store;
pub mod detection;
pub mod input_loader;
pub mod providers;

pub use config_store::*;
pub use input_loader::*;
pub use providers::*;

// Re-export detection module items
pub use detection::{
    decide,
    encode_prompt_set,
    score_against,
    AnalysisMode,
    ClipDetector,
    DecisionPolicy,
    IMAGE_POLICY,
    TEXT_POLICY,
};
