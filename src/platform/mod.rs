// ABOUTME: Hosting platform seam for querying and mutating the deployed image.
// ABOUTME: Defines PlatformOps and the Azure CLI implementation.

mod azure;
mod error;

pub use azure::AzCli;
pub use error::{PlatformError, PlatformErrorKind};

use crate::types::ImageRef;
use async_trait::async_trait;

/// Operations against the hosting platform's container configuration.
///
/// The deploy sequencer only needs three capabilities: read the currently
/// configured image, replace it, and capture a snapshot of recent service
/// logs. Keeping them behind a trait lets tests drive the sequencer without
/// a cloud CLI on the path.
#[async_trait]
pub trait PlatformOps: Send + Sync {
    /// Fetch the image reference the service is currently configured with.
    async fn current_image(&self) -> Result<ImageRef, PlatformError>;

    /// Point the service at a different image reference.
    async fn set_image(&self, image: &ImageRef) -> Result<(), PlatformError>;

    /// Capture a snapshot of recent service logs.
    async fn log_snapshot(&self) -> Result<String, PlatformError>;
}
