use crate::error::ProviderError;
use crate::model::RawModelResponse;
use crate::providers::{ItineraryProvider, PromptRequest};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::sleep;

/// Retries transient (overload) failures of the wrapped provider.
///
/// Any other error is returned immediately. The delay grows linearly with
/// the attempt number.
pub struct RetryingProvider {
    inner: Box<dyn ItineraryProvider>,
    attempts: u32,
    delay_ms: u64,
}

impl RetryingProvider {
    pub fn new(inner: Box<dyn ItineraryProvider>, attempts: u32, delay_ms: u64) -> Self {
        RetryingProvider {
            inner,
            attempts: attempts.max(1),
            delay_ms,
        }
    }
}

#[async_trait]
impl ItineraryProvider for RetryingProvider {
    // Report the wrapped provider so callers see who actually answered
    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    async fn generate(&self, request: &PromptRequest) -> Result<RawModelResponse, ProviderError> {
        let mut attempt = 1;
        loop {
            debug!(
                "Generating with {} (attempt {}/{})",
                self.inner.provider_name(),
                attempt,
                self.attempts
            );

            match self.inner.generate(request).await {
                Ok(response) => {
                    info!(
                        "Generated itinerary using {} ({} grounding links)",
                        self.inner.provider_name(),
                        response.links.len()
                    );
                    return Ok(response);
                }
                Err(e) if e.is_transient() && attempt < self.attempts => {
                    warn!(
                        "Provider {} failed (attempt {}/{}): {}",
                        self.inner.provider_name(),
                        attempt,
                        self.attempts,
                        e
                    );
                    let delay = Duration::from_millis(self.delay_ms * attempt as u64);
                    debug!("Waiting {:?} before retry", delay);
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
