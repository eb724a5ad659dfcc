/*!
 * Common test utilities for the rosetta test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use rosetta::app_config::{Config, TranslationProvider};
use rosetta::app_controller::Controller;
use rosetta::providers::mock::MockProvider;
use rosetta::translation::{ProviderBackend, TranslationService};

/// A document touching every chunk kind
pub const SAMPLE_DOCUMENT: &str = r#"# Getting started

Install the tool with `cargo install rosetta` and run it.

```bash
rosetta README.md
```

The cost is $5 and $10 for total $15, while $E = mc^2$ is physics.

$$
\int_0^1 x\,dx
$$

<svg width="10" height="10">
  <circle r="4"/>
</svg>

See <https://example.com> for details.
"#;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Route log output through the test harness
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Configuration using the identity provider and fast retries
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Identity;
    config.translation.common.retry_count = 0;
    config.translation.common.retry_backoff_ms = 1;
    config
}

/// Translation service backed by a mock provider
pub fn mock_service(config: &Config, mock: MockProvider) -> TranslationService {
    TranslationService::with_backend(config.translation.clone(), ProviderBackend::Mock(mock))
}

/// Controller backed by a mock provider
pub fn mock_controller(config: Config, mock: MockProvider) -> Controller {
    let service = mock_service(&config, mock);
    Controller::with_service(config, service)
}
