use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::BackendConfig;
use crate::errors::ProviderError;
use crate::providers::Provider;

/// Ollama client for interacting with the Ollama API
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Model name to generate with
    model: String,
    /// Sampling temperature
    temperature: f32,
    /// Output-length bound per request
    num_predict: u32,
    /// Instruction template with {source_language}/{target_language}/{text} placeholders
    prompt_template: String,
    /// Source language name substituted into the template
    source_language: String,
    /// Target language name substituted into the template
    target_language: String,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// Whether to stream the response
    stream: bool,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
}

impl Ollama {
    /// Create a new Ollama client from the backend configuration
    pub fn new(backend: &BackendConfig, source_language: &str, target_language: &str) -> Self {
        let base_url = normalize_base_url(&backend.endpoint);

        Self {
            base_url,
            client: Client::builder()
                .timeout(Duration::from_secs(backend.timeout_secs))
                .build()
                .unwrap_or_default(),
            model: backend.model.clone(),
            temperature: backend.temperature,
            num_predict: backend.num_predict,
            prompt_template: backend.prompt_template.clone(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    /// Build the generate prompt for a translation unit
    fn build_prompt(&self, text: &str) -> String {
        self.prompt_template
            .replace("{source_language}", &self.source_language)
            .replace("{target_language}", &self.target_language)
            .replace("{text}", text)
    }

    /// Send a generate request and return the parsed response
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to send request to Ollama API: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Ollama API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        // Get the raw response text first
        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to get response text from Ollama API: {}", e)))?;

        // Try to parse as single JSON object first
        match serde_json::from_str::<GenerationResponse>(&response_text) {
            Ok(generated_response) => Ok(generated_response),
            Err(e) => {
                // Lenient fallback: extract the "response" field from a generic value
                match serde_json::from_str::<serde_json::Value>(&response_text) {
                    Ok(value) => {
                        let response = value
                            .get("response")
                            .and_then(|v| v.as_str())
                            .ok_or_else(|| {
                                ProviderError::ParseError(format!(
                                    "Ollama response has no 'response' field: {}",
                                    e
                                ))
                            })?
                            .to_string();
                        let done = value.get("done").and_then(|v| v.as_bool()).unwrap_or(true);

                        Ok(GenerationResponse { response, done })
                    }
                    Err(_) => Err(ProviderError::ParseError(format!(
                        "Failed to parse Ollama API response: {}. Response contains invalid JSON.",
                        e
                    ))),
                }
            }
        }
    }
}

#[async_trait]
impl Provider for Ollama {
    /// Probe the Ollama readiness endpoint; success = HTTP 200
    async fn health_check(&self) -> Result<(), ProviderError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to connect to Ollama: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        debug!("Ollama health probe succeeded at {}", url);
        Ok(())
    }

    /// Submit one translation unit; failed requests are not retried here,
    /// the caller decides whether the document is re-attempted
    async fn translate(&self, text: &str) -> Result<String, ProviderError> {
        let request = GenerationRequest {
            model: self.model.clone(),
            prompt: self.build_prompt(text),
            stream: false,
            options: Some(GenerationOptions {
                temperature: Some(self.temperature),
                num_predict: Some(self.num_predict),
            }),
        };

        let response = self.generate(request).await?;
        Ok(response.response)
    }
}

/// Normalize an endpoint string into a usable base URL
fn normalize_base_url(endpoint: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    }
}
