/*!
 * Provider implementations for the translation backend.
 *
 * This module contains the client used to talk to the text-generation
 * service that performs the actual translation:
 * - Ollama: Local LLM server
 * - Mock: Scriptable in-memory provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for translation backends
///
/// This trait defines the interface a backend must offer so the pipeline
/// can probe its readiness and submit translation units to it.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Query the backend's readiness endpoint
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the backend is reachable and ready
    async fn health_check(&self) -> Result<(), ProviderError>;

    /// Submit a single translation unit and return the raw generated text
    ///
    /// # Arguments
    /// * `text` - The unit text to translate
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - Raw model output before sanitization
    async fn translate(&self, text: &str) -> Result<String, ProviderError>;
}

pub mod mock;
pub mod ollama;
