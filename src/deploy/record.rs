// ABOUTME: In-process record of a single deploy attempt.
// ABOUTME: Created at sequence start, mutated as it progresses, never persisted.

use std::fmt;

use crate::types::ImageRef;

/// Where a deploy attempt ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStatus {
    /// Sequence is still running.
    Pending,
    /// The candidate image passed its health check.
    Succeeded,
    /// The sequence failed and the service was NOT reverted (either the
    /// last-known-good image was never captured, or the revert itself failed).
    Failed,
    /// The sequence failed and the service was reverted to the
    /// last-known-good image.
    RolledBack,
}

impl fmt::Display for DeployStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeployStatus::Pending => "pending",
            DeployStatus::Succeeded => "succeeded",
            DeployStatus::Failed => "failed",
            DeployStatus::RolledBack => "rolled-back",
        };
        write!(f, "{label}")
    }
}

/// The state of one deploy attempt.
#[derive(Debug, Clone)]
pub struct DeploymentRecord {
    /// Image reference captured before deploying; the rollback target.
    pub previous_image: Option<ImageRef>,
    /// Image reference being rolled out.
    pub candidate_image: ImageRef,
    pub status: DeployStatus,
}

impl DeploymentRecord {
    pub fn new(candidate_image: ImageRef) -> Self {
        Self {
            previous_image: None,
            candidate_image,
            status: DeployStatus::Pending,
        }
    }
}
