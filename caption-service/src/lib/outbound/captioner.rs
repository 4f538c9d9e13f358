use std::time::Duration;

use async_trait::async_trait;

use crate::config::CaptionerConfig;
use crate::domain::caption::errors::CaptionError;
use crate::domain::caption::normalize::normalize_caption;
use crate::domain::caption::ports::Captioner;

/// Inference models can cold-start; give them time.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Hugging Face inference-API captioning client.
pub struct HuggingFaceCaptioner {
    client: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl HuggingFaceCaptioner {
    /// Build a client for the configured model.
    ///
    /// # Errors
    /// Fails if the underlying HTTP client cannot be constructed.
    pub fn new(config: &CaptionerConfig) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!(
                "https://api-inference.huggingface.co/models/{}",
                config.model
            ),
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl Captioner for HuggingFaceCaptioner {
    async fn caption(&self, image: Vec<u8>) -> Result<String, CaptionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await
            .map_err(|e| CaptionError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CaptionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CaptionError::Request(format!("Invalid upstream JSON: {}", e)))?;

        Ok(normalize_caption(&payload))
    }
}
