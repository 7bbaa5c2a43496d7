// ABOUTME: Deploy sequencer: capture, deploy, poll, roll back on failure.
// ABOUTME: Exposes the deployment record, errors, and the Sequencer itself.

mod error;
mod logscan;
mod record;
mod sequencer;

pub use error::DeployError;
pub use record::{DeployStatus, DeploymentRecord};
pub use sequencer::Sequencer;
