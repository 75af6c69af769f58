//! Azure AI Vision provider implementation.
//!
//! Uses the Image Analysis 4.0 caption endpoint and the multimodal
//! retrieval endpoints, which embed images and text into a shared vector
//! space.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use async_trait::async_trait;

use super::traits::{Caption, ProviderError, ProviderResult, VisionProvider};
use crate::search::Embedding;

const ANALYZE_API_VERSION: &str = "2023-10-01";
const RETRIEVAL_API_VERSION: &str = "2023-02-01-preview";
const RETRIEVAL_MODEL_VERSION: &str = "2022-04-11";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Request body for text vectorization.
#[derive(Debug, Serialize)]
struct VectorizeTextRequest<'a> {
    text: &'a str,
}

/// Response from both retrieval vectorization endpoints.
#[derive(Debug, Deserialize)]
struct VectorizeResponse {
    vector: Vec<f32>,
}

/// Response from the image analysis endpoint with the caption feature.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    caption_result: Option<CaptionResult>,
}

#[derive(Debug, Deserialize)]
struct CaptionResult {
    text: String,
    confidence: f64,
}

/// Azure error envelope.
#[derive(Debug, Deserialize)]
struct AzureError {
    error: AzureErrorDetail,
}

#[derive(Debug, Deserialize)]
struct AzureErrorDetail {
    #[serde(default)]
    code: String,
    message: String,
}

/// Provider for the Azure AI Vision service.
pub struct AzureVisionProvider {
    client: reqwest::Client,
    key: String,
    endpoint: String,
}

impl AzureVisionProvider {
    /// Creates a new provider for the given resource endpoint, e.g.
    /// `https://my-resource.cognitiveservices.azure.com`.
    pub fn new(key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            key: key.into(),
            endpoint,
        }
    }

    /// Overrides the HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/computervision/imageanalysis:analyze?api-version={}&features=caption&language=en",
            self.endpoint, ANALYZE_API_VERSION
        )
    }

    fn vectorize_image_url(&self) -> String {
        format!(
            "{}/computervision/retrieval:vectorizeImage?api-version={}&modelVersion={}",
            self.endpoint, RETRIEVAL_API_VERSION, RETRIEVAL_MODEL_VERSION
        )
    }

    fn vectorize_text_url(&self) -> String {
        format!(
            "{}/computervision/retrieval:vectorizeText?api-version={}&modelVersion={}",
            self.endpoint, RETRIEVAL_API_VERSION, RETRIEVAL_MODEL_VERSION
        )
    }

    fn build_headers(&self, content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers.insert(
            SUBSCRIPTION_KEY_HEADER,
            HeaderValue::from_str(&self.key).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        headers
    }

    async fn handle_error_response(&self, response: reqwest::Response) -> ProviderError {
        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());

            return ProviderError::RateLimited {
                retry_after_secs: retry_after,
            };
        }

        if let Ok(error) = response.json::<AzureError>().await {
            if status == 401 {
                return ProviderError::Authentication(error.error.message);
            }
            let message = if error.error.code.is_empty() {
                error.error.message
            } else {
                format!("{}: {}", error.error.code, error.error.message)
            };
            return ProviderError::Api { status, message };
        }

        ProviderError::Api {
            status,
            message: format!("HTTP {}", status),
        }
    }

    async fn fetch_vector(&self, response: reqwest::Response) -> ProviderResult<Embedding> {
        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        let body: VectorizeResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse vector: {}", e)))?;

        Ok(Embedding::new(body.vector))
    }
}

#[async_trait]
impl VisionProvider for AzureVisionProvider {
    fn name(&self) -> &str {
        "azure-vision"
    }

    async fn caption_image(&self, image: &[u8]) -> ProviderResult<Caption> {
        let response = self
            .client
            .post(self.analyze_url())
            .headers(self.build_headers("application/octet-stream"))
            .body(image.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        let body: AnalyzeResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse analysis: {}", e))
        })?;

        let caption = body.caption_result.ok_or_else(|| {
            ProviderError::InvalidResponse("analysis response missing captionResult".to_string())
        })?;

        Ok(Caption {
            text: caption.text,
            confidence: caption.confidence,
        })
    }

    async fn embed_image(&self, image: &[u8]) -> ProviderResult<Embedding> {
        let response = self
            .client
            .post(self.vectorize_image_url())
            .headers(self.build_headers("application/octet-stream"))
            .body(image.to_vec())
            .send()
            .await?;

        self.fetch_vector(response).await
    }

    async fn embed_text(&self, text: &str) -> ProviderResult<Embedding> {
        let response = self
            .client
            .post(self.vectorize_text_url())
            .headers(self.build_headers("application/json"))
            .json(&VectorizeTextRequest { text })
            .send()
            .await?;

        self.fetch_vector(response).await
    }
}
