//! Azure OpenAI image generation provider implementation.
//!
//! Calls a deployment-scoped image generations endpoint; the service
//! hosts the result and returns its URL.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use async_trait::async_trait;

use super::traits::{GeneratedImage, GenerationProvider, ProviderError, ProviderResult};

const GENERATIONS_API_VERSION: &str = "2024-02-01";
const API_KEY_HEADER: &str = "api-key";
const DEFAULT_SIZE: &str = "1024x1024";

/// Request body for the image generations endpoint.
#[derive(Debug, Serialize)]
struct GenerationsRequest<'a> {
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

/// Response from the image generations endpoint.
#[derive(Debug, Deserialize)]
struct GenerationsResponse {
    data: Vec<GenerationsItem>,
}

#[derive(Debug, Deserialize)]
struct GenerationsItem {
    url: String,
    revised_prompt: Option<String>,
}

/// Azure OpenAI error envelope.
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Provider for Azure OpenAI image generation deployments.
pub struct AzureOpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    deployment: String,
    size: String,
}

impl AzureOpenAiProvider {
    /// Creates a new provider for the given resource endpoint and
    /// image-model deployment name.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        deployment: impl Into<String>,
    ) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint,
            deployment: deployment.into(),
            size: DEFAULT_SIZE.to_string(),
        }
    }

    /// Overrides the generated image size (e.g. "1792x1024").
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Overrides the HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn generations_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/images/generations?api-version={}",
            self.endpoint, self.deployment, GENERATIONS_API_VERSION
        )
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&self.api_key)
                .unwrap_or_else(|_| HeaderValue::from_static("")),
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

        if let Ok(error) = response.json::<ApiError>().await {
            if status == 401 {
                return ProviderError::Authentication(error.error.message);
            }
            return ProviderError::Api {
                status,
                message: error.error.message,
            };
        }

        ProviderError::Api {
            status,
            message: format!("HTTP {}", status),
        }
    }
}

#[async_trait]
impl GenerationProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure-openai"
    }

    fn model(&self) -> &str {
        &self.deployment
    }

    async fn generate_image(&self, prompt: &str) -> ProviderResult<GeneratedImage> {
        let body = GenerationsRequest {
            prompt,
            n: 1,
            size: &self.size,
        };

        let response = self
            .client
            .post(self.generations_url())
            .headers(self.build_headers())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.handle_error_response(response).await);
        }

        let body: GenerationsResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse generations: {}", e))
        })?;

        let item = body.data.into_iter().next().ok_or_else(|| {
            ProviderError::InvalidResponse("generations response contained no images".to_string())
        })?;

        Ok(GeneratedImage {
            url: item.url,
            revised_prompt: item.revised_prompt,
        })
    }
}
