/*!
 * Provider implementations for different translation backends.
 *
 * This module contains client implementations for the services a text
 * chunk can be sent to:
 * - Identity: returns its input unchanged
 * - Command: pipes text through a chain of external processes
 * - Ollama: Local LLM server
 * - Mock: scripted behaviors for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    ///
    /// # Arguments
    /// * `request` - The request to complete
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    ///
    /// # Returns
    /// * `Result<(), ProviderError>` - Ok if the connection is successful, or an error
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

/// Plain text request shared by the providers that need no extra parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    /// The text to translate
    pub text: String,
    /// Source language code
    pub source_language: String,
    /// Target language code
    pub target_language: String,
}

impl TextRequest {
    pub fn new(text: impl Into<String>, source_language: &str, target_language: &str) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

pub mod command;
pub mod identity;
pub mod mock;
pub mod ollama;
