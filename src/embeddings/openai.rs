// OpenAI embeddings adapter
// API reference: https://platform.openai.com/docs/api-reference/embeddings

use crate::embeddings::provider::{EmbedError, EmbeddingAdapter};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

pub struct OpenAIEmbeddings {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl OpenAIEmbeddings {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: OPENAI_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Self {
        let mut adapter = Self::new(api_key, model);
        adapter.base_url = base_url.to_string();
        adapter
    }
}

#[async_trait]
impl EmbeddingAdapter for OpenAIEmbeddings {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => format!("HTTP {status}"),
            };
            return Err(EmbedError::Provider(message));
        }

        let body: EmbeddingResponse = response.json().await?;
        Ok(body.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embeds_a_batch_of_texts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/embeddings")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"object":"list","data":[
                    {"object":"embedding","index":0,"embedding":[0.1,0.2]},
                    {"object":"embedding","index":1,"embedding":[0.3,0.4]}
                ],"model":"text-embedding-3-small"}"#,
            )
            .create_async()
            .await;

        let adapter =
            OpenAIEmbeddings::with_base_url("test-key", "text-embedding-3-small", &server.url());
        let vectors = adapter
            .embed(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(vectors, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
    }

    #[tokio::test]
    async fn surfaces_provider_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/embeddings")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let adapter =
            OpenAIEmbeddings::with_base_url("bad-key", "text-embedding-3-small", &server.url());
        let err = adapter.embed(&["text".to_string()]).await.unwrap_err();

        match err {
            EmbedError::Provider(message) => assert!(message.contains("Incorrect API key")),
            other => panic!("expected provider error, got {other:?}"),
        }
    }
}
