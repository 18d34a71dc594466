// Embedding Provider Service
// Implements the CLIP encoding service client

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

use crate::models::EmbeddingVector;
use crate::services::config_store::{ConfigError, EncoderConfig};

const EMBEDDING_DEFAULT_URL: &str = "http://127.0.0.1:8765";

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("JSON parse error: {0}")]
    JsonError(String),
    #[error("empty embedding in response")]
    EmptyEmbedding,
}

// ============ Device ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Auto,
    Cpu,
    Cuda,
}

impl Device {
    /// Parse a device selector. Anything outside the known set is a
    /// configuration error, fatal at startup rather than per call.
    pub fn parse(val: &str) -> Result<Self, ConfigError> {
        match val.trim().to_lowercase().as_str() {
            "auto" => Ok(Device::Auto),
            "cpu" => Ok(Device::Cpu),
            "cuda" => Ok(Device::Cuda),
            other => Err(ConfigError::InvalidDevice(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Device::Auto => "auto",
            Device::Cpu => "cpu",
            Device::Cuda => "cuda",
        }
    }
}

// ============ Encoder Trait ============

/// Boundary to the pretrained joint embedding model.
///
/// Implementations return unit-norm vectors of a fixed dimensionality;
/// the detection pipeline takes this as an explicit dependency so the
/// model backend stays swappable.
#[async_trait]
pub trait Encoder: Send + Sync {
    async fn encode_image(&self, image: &[u8]) -> Result<EmbeddingVector, ProviderError>;
    async fn encode_text(&self, text: &str, truncate: bool) -> Result<EmbeddingVector, ProviderError>;
    /// Encode a batch of descriptor prompts, order preserved.
    async fn encode_prompts(&self, prompts: &[&str]) -> Result<Vec<EmbeddingVector>, ProviderError>;
    fn model_name(&self) -> &str;
}

// ============ Wire Types ============

#[derive(Debug, Clone, Serialize)]
struct EncodeImageRequest<'a> {
    image_base64: String,
    model: &'a str,
    device: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct EncodeTextRequest<'a> {
    text: &'a str,
    truncate: bool,
    model: &'a str,
    device: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct EncodePromptsRequest<'a> {
    texts: &'a [&'a str],
    model: &'a str,
    device: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbeddingsResponse {
    embeddings: Vec<Vec<f32>>,
}

// ============ HTTP Client ============

/// Client for the CLIP encoding sidecar.
///
/// The sidecar loads the model once at startup; this client only ships
/// content over and re-normalizes the returned features, mirroring the
/// normalization applied to raw model outputs.
pub struct EmbeddingClient {
    client: Client,
    base_url: String,
    model: String,
    device: Device,
    api_key: Option<String>,
}

impl EmbeddingClient {
    pub fn new(config: &EncoderConfig) -> Result<Self, ConfigError> {
        let device = Device::parse(&config.device)?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        let base_url = env::var("CLIPSIGHT_EMBEDDING_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                if config.endpoint.trim().is_empty() {
                    EMBEDDING_DEFAULT_URL.to_string()
                } else {
                    config.endpoint.clone()
                }
            });

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            device,
            api_key: get_api_key(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn device(&self) -> Device {
        self.device
    }

    async fn post_encode<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let start = Instant::now();

        let mut request = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;
        let latency_ms = start.elapsed().as_millis() as i64;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!(path, latency_ms, "encode request completed");

        response
            .json::<R>()
            .await
            .map_err(|e| ProviderError::JsonError(e.to_string()))
    }

    fn into_vector(values: Vec<f32>) -> Result<EmbeddingVector, ProviderError> {
        let vector = EmbeddingVector::normalized(values);
        if vector.is_empty() || vector.norm() < f64::EPSILON {
            return Err(ProviderError::EmptyEmbedding);
        }
        Ok(vector)
    }
}

#[async_trait]
impl Encoder for EmbeddingClient {
    async fn encode_image(&self, image: &[u8]) -> Result<EmbeddingVector, ProviderError> {
        let request = EncodeImageRequest {
            image_base64: BASE64.encode(image),
            model: &self.model,
            device: self.device.as_str(),
        };
        let data: EmbeddingResponse = self.post_encode("/encode/image", &request).await?;
        Self::into_vector(data.embedding)
    }

    async fn encode_text(&self, text: &str, truncate: bool) -> Result<EmbeddingVector, ProviderError> {
        let request = EncodeTextRequest {
            text,
            truncate,
            model: &self.model,
            device: self.device.as_str(),
        };
        let data: EmbeddingResponse = self.post_encode("/encode/text", &request).await?;
        Self::into_vector(data.embedding)
    }

    async fn encode_prompts(&self, prompts: &[&str]) -> Result<Vec<EmbeddingVector>, ProviderError> {
        let request = EncodePromptsRequest {
            texts: prompts,
            model: &self.model,
            device: self.device.as_str(),
        };
        let data: EmbeddingsResponse = self.post_encode("/encode/prompts", &request).await?;
        data.embeddings.into_iter().map(Self::into_vector).collect()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Get the encoding-service API key from environment or config file.
/// Local sidecars run unauthenticated; remote deployments set a bearer
/// token.
pub fn get_api_key() -> Option<String> {
    for key in ["EMBEDDING_API_KEY", "CLIPSIGHT_EMBEDDING_API_KEY"] {
        if let Ok(val) = env::var(key) {
            let v = val.trim();
            if !v.is_empty() {
                return Some(v.to_string());
            }
        }
    }

    if let Some(config_dir) = super::ConfigStore::default_config_dir() {
        let store = super::ConfigStore::new(config_dir);
        if let Ok(Some(key)) = store.get_api_key("embedding") {
            return Some(key);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_parse() {
        assert_eq!(Device::parse("auto").unwrap(), Device::Auto);
        assert_eq!(Device::parse("CUDA").unwrap(), Device::Cuda);
        assert_eq!(Device::parse(" cpu ").unwrap(), Device::Cpu);
        assert!(matches!(
            Device::parse("tpu"),
            Err(ConfigError::InvalidDevice(_))
        ));
    }

    #[test]
    fn test_client_creation_strips_trailing_slash() {
        let config = EncoderConfig {
            endpoint: "http://localhost:9000/".to_string(),
            ..EncoderConfig::default()
        };
        // Env override would shadow the endpoint under test.
        std::env::remove_var("CLIPSIGHT_EMBEDDING_URL");
        let client = EmbeddingClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(client.model_name(), "ViT-B/32");
    }

    #[test]
    fn test_client_rejects_invalid_device() {
        let config = EncoderConfig {
            device: "npu".to_string(),
            ..EncoderConfig::default()
        };
        assert!(EmbeddingClient::new(&config).is_err());
    }

    #[test]
    fn test_into_vector_rejects_empty_and_zero() {
        assert!(matches!(
            EmbeddingClient::into_vector(vec![]),
            Err(ProviderError::EmptyEmbedding)
        ));
        assert!(matches!(
            EmbeddingClient::into_vector(vec![0.0, 0.0]),
            Err(ProviderError::EmptyEmbedding)
        ));
        let v = EmbeddingClient::into_vector(vec![1.0, 1.0]).unwrap();
        assert!((v.norm() - 1.0).abs() < 1e-6);
    }
}
