// Prompt Bank
// Static descriptor prompt sets used as zero-shot classification anchors.
// Bilingual entries are plain extra prompts; the scoring is language-agnostic
// at the embedding level.

use tracing::debug;

use crate::models::EmbeddingVector;
use crate::services::providers::{Encoder, ProviderError};

/// Which side of the AI-vs-natural axis a prompt set represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Ai,
    Natural,
}

/// An ordered, process-lifetime set of descriptor prompts.
#[derive(Debug, Clone, Copy)]
pub struct PromptSet {
    pub polarity: Polarity,
    pub prompts: &'static [&'static str],
}

impl PromptSet {
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

pub const AI_IMAGE: PromptSet = PromptSet {
    polarity: Polarity::Ai,
    prompts: &[
        // AI generation indicators
        "artificial intelligence generated image",
        "computer generated artwork",
        "digital art created by AI",
        "synthetic image from neural network",
        "AI-generated digital illustration",
        "machine learning created picture",
        "artificial neural network output",
        "computer vision generated content",
        "yapay zeka tarafından üretilmiş görsel",
        "bilgisayar tarafından oluşturulan sanat",
        "dijital AI sanatı",
        "sinir ağı çıktısı",
        // Specific AI art styles
        "surreal digital art style typical of AI",
        "highly detailed fantasy art by AI",
        "photorealistic AI rendering",
        "abstract digital art by neural network",
        "hyperrealistic AI-generated portrait",
        "fantastical landscape by artificial intelligence",
        // Technical AI indicators
        "perfect lighting and composition typical of AI",
        "unnaturally smooth textures from AI generation",
        "impossible physics in AI-generated scene",
        "too perfect symmetry from neural network",
        "artificial color palette typical of AI models",
        "digital artifacts from AI generation process",
    ],
};

pub const NATURAL_IMAGE: PromptSet = PromptSet {
    polarity: Polarity::Natural,
    prompts: &[
        // Natural photography
        "authentic photograph taken by human photographer",
        "real world captured with camera",
        "natural lighting in genuine photograph",
        "spontaneous moment captured in real life",
        "documentary style photograph",
        "candid human photography",
        "genuine real-world scene",
        "unposed natural photograph",
        "gerçek fotoğraf insan tarafından çekilmiş",
        "doğal anın yakalandığı fotoğraf",
        "gerçek dünya görüntüsü",
        "orijinal fotoğraf",
        // Human art characteristics
        "hand-drawn illustration by human artist",
        "traditional painting technique",
        "human creativity and artistic expression",
        "imperfect but authentic artistic work",
        "personal artistic style of human creator",
        "emotional depth in human artwork",
    ],
};

pub const AI_TEXT: PromptSet = PromptSet {
    polarity: Polarity::Ai,
    prompts: &[
        "artificially generated text by language model",
        "computer-written content with perfect grammar",
        "AI-generated response with formal structure",
        "machine learning text output",
        "robotic writing style typical of AI",
        "perfectly structured AI-generated content",
        "yapay zeka tarafından üretilmiş metin",
        "bilgisayar tarafından yazılmış içerik",
        "AI dil modeli çıktısı",
    ],
};

pub const HUMAN_TEXT: PromptSet = PromptSet {
    polarity: Polarity::Natural,
    prompts: &[
        "naturally written text by human author",
        "personal writing style with human imperfections",
        "authentic human communication",
        "spontaneous human expression",
        "emotional human writing",
        "personal experience shared by human",
        "insan tarafından yazılmış doğal metin",
        "kişisel yazım stili",
        "otantik insan iletişimi",
    ],
};

/// Encode every prompt of a set, order preserved.
///
/// Re-encoded on every analysis call; vectors are never shared across
/// calls. Provider errors propagate unchanged.
pub async fn encode_prompt_set(
    encoder: &dyn Encoder,
    set: &PromptSet,
) -> Result<Vec<EmbeddingVector>, ProviderError> {
    debug!(polarity = ?set.polarity, prompts = set.len(), "encoding prompt set");
    encoder.encode_prompts(set.prompts).await
}
