/*!
 * Tests for error classification and formatting
 */

use std::error::Error;
use std::time::Duration;

use rosetta::errors::{AppError, ProviderError, TranslationError};

#[test]
fn test_is_retryable_withTransientErrors_shouldReturnTrue() {
    assert!(ProviderError::RequestFailed("reset".into()).is_retryable());
    assert!(ProviderError::ConnectionError("refused".into()).is_retryable());
    assert!(
        ProviderError::ApiError {
            status_code: 503,
            message: "busy".into()
        }
        .is_retryable()
    );
    assert!(
        ProviderError::ApiError {
            status_code: 429,
            message: "slow down".into()
        }
        .is_retryable()
    );
}

#[test]
fn test_is_retryable_withPermanentErrors_shouldReturnFalse() {
    assert!(!ProviderError::ParseError("garbage".into()).is_retryable());
    assert!(
        !ProviderError::SpawnFailed {
            program: "missing".into(),
            message: "not found".into()
        }
        .is_retryable()
    );
    assert!(
        !ProviderError::ApiError {
            status_code: 404,
            message: "no model".into()
        }
        .is_retryable()
    );
}

#[test]
fn test_chunk_failed_withTimeoutSource_shouldReportTimeout() {
    let error = TranslationError::ChunkFailed {
        index: 4,
        line: 12,
        source: Box::new(TranslationError::Timeout(Duration::from_secs(30))),
    };

    assert!(error.is_timeout());
    assert!(error.to_string().contains("line 12"));
    assert!(error.source().is_some());
}

#[test]
fn test_chunk_failed_withProviderSource_shouldNotReportTimeout() {
    let error = TranslationError::ChunkFailed {
        index: 0,
        line: 1,
        source: Box::new(ProviderError::ParseError("empty".into()).into()),
    };

    assert!(!error.is_timeout());
}

#[test]
fn test_app_error_withIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let app_error: AppError = io_error.into();

    assert!(matches!(app_error, AppError::File(_)));
    assert_eq!(app_error.to_string(), "File error: gone");
}
