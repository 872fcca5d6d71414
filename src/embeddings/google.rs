// Google Generative AI embeddings adapter
// API reference: https://ai.google.dev/api/embeddings

use crate::embeddings::provider::{EmbedError, EmbeddingAdapter};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GoogleEmbeddings {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct BatchEmbedRequest {
    requests: Vec<EmbedContentRequest>,
}

#[derive(Serialize)]
struct EmbedContentRequest {
    model: String,
    content: Content,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<ContentEmbedding>,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GoogleEmbeddings {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: GOOGLE_API_BASE.to_string(),
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
impl EmbeddingAdapter for GoogleEmbeddings {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let request = BatchEmbedRequest {
            requests: texts
                .iter()
                .map(|text| EmbedContentRequest {
                    model: format!("models/{}", self.model),
                    content: Content {
                        parts: vec![Part { text: text.clone() }],
                    },
                })
                .collect(),
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:batchEmbedContents",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
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

        let body: BatchEmbedResponse = response.json().await?;
        Ok(body.embeddings.into_iter().map(|e| e.values).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embeds_a_batch_of_texts() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/models/gemini-embedding-001:batchEmbedContents?key=test-key",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"embeddings":[{"values":[0.5,0.6]},{"values":[0.7,0.8]}]}"#)
            .create_async()
            .await;

        let adapter =
            GoogleEmbeddings::with_base_url("test-key", "gemini-embedding-001", &server.url());
        let vectors = adapter
            .embed(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(vectors, vec![vec![0.5, 0.6], vec![0.7, 0.8]]);
    }

    #[tokio::test]
    async fn surfaces_provider_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "POST",
                "/models/gemini-embedding-001:batchEmbedContents?key=bad-key",
            )
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#)
            .create_async()
            .await;

        let adapter =
            GoogleEmbeddings::with_base_url("bad-key", "gemini-embedding-001", &server.url());
        let err = adapter.embed(&["text".to_string()]).await.unwrap_err();

        match err {
            EmbedError::Provider(message) => assert!(message.contains("API key not valid")),
            other => panic!("expected provider error, got {other:?}"),
        }
    }
}
