use async_trait::async_trait;

use crate::config::EmbeddingConfig;

#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("embedding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding provider error: {0}")]
    Provider(String),

    #[error("unsupported embedding provider: {0}")]
    UnsupportedProvider(String),
}

#[async_trait]
pub trait EmbeddingAdapter: Send + Sync {
    /// Embed a batch of texts, one vector per input, in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;
}

/// Embedding front-end; the concrete provider is chosen by the
/// configured provider name.
pub struct Embeddings {
    adapter: Box<dyn EmbeddingAdapter>,
}

impl Embeddings {
    pub fn new(config: &EmbeddingConfig) -> Result<Self, EmbedError> {
        let adapter: Box<dyn EmbeddingAdapter> = match config.provider.as_str() {
            "openai" => Box::new(crate::embeddings::openai::OpenAIEmbeddings::new(
                &config.api_key,
                &config.model,
            )),
            "google" | "google_gemini" => Box::new(
                crate::embeddings::google::GoogleEmbeddings::new(&config.api_key, &config.model),
            ),
            other => return Err(EmbedError::UnsupportedProvider(other.to_string())),
        };

        Ok(Self { adapter })
    }

    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        self.adapter.embed(texts).await
    }
}
