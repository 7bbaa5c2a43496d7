// ABOUTME: The deploy sequence: capture LKG, deploy candidate, poll, revert.
// ABOUTME: Generic over platform and probe so tests can drive it directly.

use std::time::Instant;

use crate::config::Config;
use crate::health::HealthProbe;
use crate::platform::PlatformOps;
use crate::telemetry::TelemetrySink;
use crate::types::ImageRef;

use super::error::DeployError;
use super::logscan::find_crash_indicator;
use super::record::{DeployStatus, DeploymentRecord};

/// Runs a single deploy attempt against one service.
///
/// The sequence is linear: capture the currently configured image, point the
/// service at the candidate, then poll a health endpoint and a log snapshot
/// until the deadline. Any failure after capture reverts the service to the
/// captured image, exactly once.
pub struct Sequencer<P, H> {
    platform: P,
    probe: H,
    telemetry: TelemetrySink,
    config: Config,
}

impl<P: PlatformOps, H: HealthProbe> Sequencer<P, H> {
    pub fn new(platform: P, probe: H, telemetry: TelemetrySink, config: Config) -> Self {
        Self {
            platform,
            probe,
            telemetry,
            config,
        }
    }

    /// Run the full deploy sequence for `candidate`.
    ///
    /// On failure, returns the final record alongside the error so callers
    /// can see whether a rollback happened (`DeployStatus::RolledBack`) or
    /// the service was left as-is (`DeployStatus::Failed`).
    pub async fn run(
        &self,
        candidate: ImageRef,
    ) -> Result<DeploymentRecord, (DeploymentRecord, DeployError)> {
        let mut record = DeploymentRecord::new(candidate);
        tracing::info!(
            app = %self.config.app_name,
            candidate = %record.candidate_image,
            "starting deployment"
        );

        // Step 1: capture the last-known-good image. Failure here is fatal
        // with no rollback possible.
        let previous = match self.platform.current_image().await {
            Ok(image) => image,
            Err(error) => return Err(self.fail(record, error.into()).await),
        };
        tracing::info!(previous = %previous, "captured last-known-good image");
        record.previous_image = Some(previous);

        // Step 2: point the service at the candidate.
        tracing::info!(image = %record.candidate_image, "deploying candidate image");
        if let Err(error) = self.platform.set_image(&record.candidate_image).await {
            return Err(self.fail(record, error.into()).await);
        }

        // Steps 3-4: poll until healthy or the deadline passes.
        match self.await_healthy().await {
            Ok(()) => {
                record.status = DeployStatus::Succeeded;
                tracing::info!("deployment succeeded");
                Ok(record)
            }
            Err(error) => Err(self.fail(record, error).await),
        }
    }

    /// Poll the health endpoint and the service logs until success, a
    /// crash-loop indicator, or the deadline.
    async fn await_healthy(&self) -> Result<(), DeployError> {
        let timeout = self.config.deployment_timeout;
        tracing::info!(
            timeout_secs = timeout.as_secs(),
            "polling for deployment health"
        );

        let start = Instant::now();
        let mut next_scan = start;

        // The deadline is re-evaluated against wall-clock time on every
        // iteration; a slow health or log call delays the next tick but
        // never extends the window.
        while start.elapsed() < timeout {
            match &self.config.health_check_url {
                Some(url) => {
                    if self.probe.is_healthy(url).await {
                        tracing::info!(%url, "health endpoint returned 200");
                        return Ok(());
                    }
                }
                None => {
                    tracing::debug!(
                        "no health check URL configured; relying on log scan and deadline"
                    );
                }
            }

            // The log snapshot is a heavier command than the health GET, so
            // it runs on its own, longer cadence.
            if Instant::now() >= next_scan {
                let logs = self.platform.log_snapshot().await?;
                if let Some(indicator) = find_crash_indicator(&logs) {
                    return Err(DeployError::CrashLoopDetected(indicator));
                }
                next_scan += self.config.log_scan_interval;
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }

        Err(DeployError::HealthCheckTimeout(timeout.as_secs()))
    }

    /// Single funnel for every failure path: report to telemetry, then
    /// revert at most once if the last-known-good image was captured. The
    /// revert is not retried if it fails.
    async fn fail(
        &self,
        mut record: DeploymentRecord,
        error: DeployError,
    ) -> (DeploymentRecord, DeployError) {
        tracing::error!(%error, "deployment failed");
        self.telemetry.track_failure(&error, &record).await;

        match record.previous_image.clone() {
            Some(previous) => {
                tracing::warn!(image = %previous, "reverting to last-known-good image");
                match self.platform.set_image(&previous).await {
                    Ok(()) => {
                        record.status = DeployStatus::RolledBack;
                        tracing::info!("rollback command sent");
                    }
                    Err(rollback_error) => {
                        // The service may be left on the failed image.
                        record.status = DeployStatus::Failed;
                        tracing::error!(
                            %rollback_error,
                            "rollback failed; manual intervention required"
                        );
                    }
                }
            }
            None => {
                record.status = DeployStatus::Failed;
                tracing::error!("last-known-good image was never captured; skipping rollback");
            }
        }

        (record, error)
    }
}
