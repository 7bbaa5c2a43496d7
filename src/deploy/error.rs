// ABOUTME: Error types for the deploy sequence.
// ABOUTME: Tagged variants so callers branch on failure kind, not strings.

use crate::platform::PlatformError;

/// Failure kinds of a deploy sequence.
///
/// `Platform` failures before the last-known-good image is captured are
/// fatal without rollback; every other failure triggers a single rollback
/// attempt.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// A platform command failed.
    #[error("platform command error: {0}")]
    Platform(#[from] PlatformError),

    /// No success signal within the deployment deadline.
    #[error("health check timed out after {0} seconds")]
    HealthCheckTimeout(u64),

    /// A crash-loop indicator appeared in the service logs.
    #[error("crash loop detected in service logs: matched `{0}`")]
    CrashLoopDetected(String),
}
