/*!
 * Identity provider.
 *
 * Echoes every chunk back unchanged. Useful for checking that a document
 * survives the chunk/reassemble cycle byte for byte.
 */

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::{Provider, TextRequest};

#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Identity {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for Identity {
    type Request = TextRequest;
    type Response = String;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        Ok(request.text)
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.clone()
    }
}
