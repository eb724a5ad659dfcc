/*!
 * Error types for the rosetta application.
 *
 * Parsing never fails, so only two kinds of failure exist: I/O around the
 * documents, and errors from the translation collaborator. Both are defined
 * here using the thiserror crate.
 */

use std::time::Duration;
use thiserror::Error;

/// Errors raised by a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An external pipeline stage could not be started
    #[error("Failed to start '{program}': {message}")]
    SpawnFailed {
        program: String,
        message: String,
    },

    /// An external pipeline stage exited unsuccessfully
    #[error("Command '{program}' failed with status {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Errors raised while translating a document
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The provider did not answer in time
    #[error("Translation timed out after {0:?}")]
    Timeout(Duration),

    /// A chunk failed and the failure policy aborts the document
    #[error("Chunk {index} (line {line}) failed: {source}")]
    ChunkFailed {
        index: usize,
        line: usize,
        #[source]
        source: Box<TranslationError>,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl ProviderError {
    /// Whether sending the same request again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::ConnectionError(_) | Self::CommandFailed { .. } => true,
            Self::ApiError { status_code, .. } => *status_code >= 500 || *status_code == 429,
            Self::ParseError(_) | Self::SpawnFailed { .. } => false,
        }
    }
}

impl TranslationError {
    /// True for failures caused by the time limit rather than the provider
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::ChunkFailed { source, .. } => source.is_timeout(),
            Self::Provider(_) => false,
        }
    }
}
