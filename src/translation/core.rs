/*!
 * Core translation service implementation.
 *
 * This module contains the TranslationService, which turns one text chunk
 * into its translation using the configured provider. It owns the concerns
 * that apply to every provider alike: blank-chunk pass-through, whitespace
 * preservation, caching, the per-chunk time limit, retries and rate limiting.
 */

use anyhow::Result;
use log::{debug, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::cache::{TranslationCache, truncate_text};
use crate::app_config::{FailurePolicy, TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::{ProviderError, TranslationError};
use crate::language_utils::get_language_name;
use crate::providers::Provider;
use crate::providers::command::CommandPipeline;
use crate::providers::identity::Identity;
use crate::providers::mock::MockProvider;
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::TextRequest;

/// Translation provider implementation variants
#[derive(Debug)]
pub enum ProviderBackend {
    /// Output equals input
    Identity(Identity),

    /// External process pipeline
    Command(CommandPipeline),

    /// Ollama LLM service
    Ollama(Ollama),

    /// Scripted provider for tests
    Mock(MockProvider),
}

impl ProviderBackend {
    /// Build the backend selected by the configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self> {
        let backend = match config.provider {
            ConfigTranslationProvider::Identity => Self::Identity(Identity::new()),
            ConfigTranslationProvider::Command => Self::Command(CommandPipeline::new(config.get_pipeline())),
            ConfigTranslationProvider::Ollama => Self::Ollama(Ollama::new(
                &config.get_endpoint(),
                Duration::from_secs(config.get_timeout_secs()),
            )?),
        };
        Ok(backend)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity(_) => "identity",
            Self::Command(_) => "command",
            Self::Ollama(_) => "ollama",
            Self::Mock(_) => "mock",
        }
    }
}

/// Translation options derived from the configuration
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Maximum number of chunks in flight at once
    pub max_concurrent_requests: usize,

    /// Time limit for a single provider call
    pub timeout: Duration,

    /// Extra attempts after a retryable failure
    pub retry_count: u32,

    /// First retry delay, doubled on each further retry
    pub retry_backoff_ms: u64,

    /// Keep each chunk's leading/trailing whitespace around its translation
    pub preserve_whitespace: bool,

    /// Handling of chunks that cannot be translated
    pub failure_policy: FailurePolicy,

    /// Requests per minute, unlimited when `None`
    pub rate_limit: Option<u32>,
}

impl TranslationOptions {
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self {
            max_concurrent_requests: config.optimal_concurrent_requests(),
            timeout: Duration::from_secs(config.get_timeout_secs()),
            retry_count: config.common.retry_count,
            retry_backoff_ms: config.common.retry_backoff_ms,
            preserve_whitespace: config.common.preserve_whitespace,
            failure_policy: config.common.failure_policy,
            rate_limit: config.get_rate_limit().filter(|n| *n > 0),
        }
    }
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self::from_config(&TranslationConfig::default())
    }
}

/// Result of translating one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub text: String,
    /// Served from the cache without calling the provider
    pub cached: bool,
}

/// Main translation service for text chunks
#[derive(Debug, Clone)]
pub struct TranslationService {
    /// Provider implementation
    backend: Arc<ProviderBackend>,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// Translation options
    pub options: TranslationOptions,

    /// Translation cache for storing and retrieving translations
    pub cache: TranslationCache,

    /// Time of the last provider call, for rate limiting
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let backend = ProviderBackend::from_config(&config)?;
        Ok(Self::with_backend(config, backend))
    }

    /// Create a service around an already built backend
    pub fn with_backend(config: TranslationConfig, backend: ProviderBackend) -> Self {
        let options = TranslationOptions::from_config(&config);
        let cache = TranslationCache::new(config.common.cache_enabled);
        Self {
            backend: Arc::new(backend),
            config,
            options,
            cache,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Name of the backend in use
    pub fn provider_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Test the connection to the translation provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.backend.as_ref() {
            ProviderBackend::Identity(client) => client.test_connection().await,
            ProviderBackend::Command(client) => client.test_connection().await,
            ProviderBackend::Ollama(client) => client.test_connection().await,
            ProviderBackend::Mock(client) => client.test_connection().await,
        }
    }

    /// Translate a single text string
    pub async fn translate_text(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        self.translate_chunk(text, source_language, target_language)
            .await
            .map(|outcome| outcome.text)
    }

    /// Translate one chunk, reporting whether the cache answered
    pub async fn translate_chunk(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<TranslationOutcome, TranslationError> {
        if text.trim().is_empty() {
            return Ok(TranslationOutcome {
                text: text.to_string(),
                cached: false,
            });
        }

        let (leading, core, trailing) = if self.options.preserve_whitespace {
            split_whitespace(text)
        } else {
            ("", text, "")
        };

        if let Some(cached) = self.cache.get(core, source_language, target_language) {
            return Ok(TranslationOutcome {
                text: format!("{}{}{}", leading, cached, trailing),
                cached: true,
            });
        }

        let translated = self.request_with_retry(core, source_language, target_language).await?;
        if translated.trim().is_empty() {
            return Err(ProviderError::ParseError("Provider returned an empty translation".to_string()).into());
        }
        let translated = if self.options.preserve_whitespace {
            translated.trim().to_string()
        } else {
            translated
        };

        self.cache.store(core, source_language, target_language, &translated);

        Ok(TranslationOutcome {
            text: format!("{}{}{}", leading, translated, trailing),
            cached: false,
        })
    }

    async fn request_with_retry(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let mut attempt = 0;
        loop {
            self.wait_for_rate_limit().await;

            let error = match tokio::time::timeout(
                self.options.timeout,
                self.request(text, source_language, target_language),
            )
            .await
            {
                Ok(Ok(translated)) => return Ok(translated),
                Ok(Err(e)) if !e.is_retryable() => return Err(e.into()),
                Ok(Err(e)) => TranslationError::Provider(e),
                Err(_) => TranslationError::Timeout(self.options.timeout),
            };

            if attempt >= self.options.retry_count {
                return Err(error);
            }

            let backoff_ms = self.options.retry_backoff_ms.saturating_mul(1u64 << attempt.min(16));
            warn!(
                "Translating '{}' failed: {} - retry {}/{} in {}ms",
                truncate_text(text, 30),
                error,
                attempt + 1,
                self.options.retry_count,
                backoff_ms
            );
            tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            attempt += 1;
        }
    }

    async fn request(&self, text: &str, source_language: &str, target_language: &str) -> Result<String, ProviderError> {
        let start_time = Instant::now();
        let request = TextRequest::new(text, source_language, target_language);

        let translated = match self.backend.as_ref() {
            ProviderBackend::Identity(client) => Identity::extract_text(&client.complete(request).await?),
            ProviderBackend::Command(client) => CommandPipeline::extract_text(&client.complete(request).await?),
            ProviderBackend::Mock(client) => MockProvider::extract_text(&client.complete(request).await?),
            ProviderBackend::Ollama(client) => {
                let request = GenerationRequest::new(self.config.get_model(), text)
                    .system(self.system_prompt(source_language, target_language))
                    .temperature(self.config.common.temperature);
                Ollama::extract_text(&client.complete(request).await?)
            }
        };

        debug!("{} answered in {:?}", self.backend.name(), start_time.elapsed());
        Ok(translated)
    }

    /// System prompt with language placeholders resolved to language names
    pub fn system_prompt(&self, source_language: &str, target_language: &str) -> String {
        let name = |code: &str| get_language_name(code).unwrap_or_else(|_| code.to_string());
        self.config
            .common
            .system_prompt
            .replace("{source_language}", &name(source_language))
            .replace("{target_language}", &name(target_language))
    }

    async fn wait_for_rate_limit(&self) {
        let Some(per_minute) = self.options.rate_limit else {
            return;
        };
        let interval = Duration::from_millis(60_000 / u64::from(per_minute));

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                tokio::time::sleep(interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Split `text` into (leading whitespace, content, trailing whitespace)
pub fn split_whitespace(text: &str) -> (&str, &str, &str) {
    let start = text.len() - text.trim_start().len();
    let end = text.trim_end().len();
    if start >= end {
        return (text, "", "");
    }
    (&text[..start], &text[start..end], &text[end..])
}
