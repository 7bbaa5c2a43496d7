// ABOUTME: HTTP health probe for the deployed service.
// ABOUTME: Exactly status 200 counts as healthy; anything else is "not yet".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

/// Per-request timeout for health probes. A hanging endpoint should delay a
/// single poll tick, not the whole sequence.
const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// A yes/no health signal for the deployed service.
///
/// Probe failures are never fatal: an endpoint that is not reachable yet is
/// indistinguishable from one that is still starting up.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn is_healthy(&self, url: &str) -> bool;
}

/// `HealthProbe` backed by an HTTP GET.
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(PROBE_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HealthProbe for HttpProbe {
    async fn is_healthy(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                tracing::debug!(status = %response.status(), "health endpoint not healthy yet");
                false
            }
            Err(error) => {
                tracing::debug!(%error, "health endpoint not reachable yet");
                false
            }
        }
    }
}
