// ABOUTME: Platform error types with SNAFU pattern.
// ABOUTME: Covers command execution, JSON parsing, and missing configuration.

use snafu::Snafu;

use crate::types::ParseImageRefError;

/// Errors from platform command execution and response parsing.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PlatformError {
    #[snafu(display("failed to spawn `{command}`: {source}"))]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[snafu(display("failed to wait for `{command}`: {source}"))]
    Wait {
        command: String,
        source: std::io::Error,
    },

    #[snafu(display("`{command}` exited with status {code}: {stderr}"))]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    #[snafu(display("`{command}` produced invalid JSON: {source}"))]
    InvalidJson {
        command: String,
        source: serde_json::Error,
    },

    #[snafu(display("no container configuration reported for the web app"))]
    NoContainerConfigured,

    #[snafu(display("container configuration does not report an image"))]
    ImageNotReported,

    #[snafu(display("platform reported an unparseable image reference: {source}"))]
    BadImageReference { source: ParseImageRefError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformErrorKind {
    /// Platform CLI could not be started.
    Spawn,
    /// Platform CLI exited but its status could not be collected.
    Wait,
    /// Platform CLI exited non-zero.
    CommandFailed,
    /// Platform CLI output was not valid JSON.
    InvalidJson,
    /// The web app has no container configuration at all.
    NoContainerConfigured,
    /// The container configuration omits the image field.
    ImageNotReported,
    /// The reported image reference did not parse.
    BadImageReference,
}

impl PlatformError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> PlatformErrorKind {
        match self {
            PlatformError::Spawn { .. } => PlatformErrorKind::Spawn,
            PlatformError::Wait { .. } => PlatformErrorKind::Wait,
            PlatformError::CommandFailed { .. } => PlatformErrorKind::CommandFailed,
            PlatformError::InvalidJson { .. } => PlatformErrorKind::InvalidJson,
            PlatformError::NoContainerConfigured => PlatformErrorKind::NoContainerConfigured,
            PlatformError::ImageNotReported => PlatformErrorKind::ImageNotReported,
            PlatformError::BadImageReference { .. } => PlatformErrorKind::BadImageReference,
        }
    }
}
