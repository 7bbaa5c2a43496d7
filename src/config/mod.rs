// ABOUTME: Environment-driven configuration for the deploy sequence.
// ABOUTME: Validates required variables up front, before any platform call.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::{AppName, ImageRef};

pub const DEFAULT_DEPLOYMENT_TIMEOUT: Duration = Duration::from_secs(180);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const DEFAULT_LOG_SCAN_INTERVAL: Duration = Duration::from_secs(30);

/// Deployment configuration, read entirely from environment variables.
///
/// Required: `AZURE_RESOURCE_GROUP`, `AZURE_APP_NAME`, `AZURE_ACR_NAME`,
/// `NEW_IMAGE_TAG`. Everything else is optional with defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub resource_group: String,
    pub app_name: AppName,
    /// Azure Container Registry name (without the `.azurecr.io` suffix).
    pub registry: String,
    pub new_image_tag: String,
    /// Health endpoint polled during deployment. Without it, only the log
    /// scan runs and the deadline alone decides failure.
    pub health_check_url: Option<String>,
    /// Application Insights connection string for failure reporting.
    pub telemetry_connection: Option<String>,
    pub deployment_timeout: Duration,
    pub poll_interval: Duration,
    pub log_scan_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let resource_group = required("AZURE_RESOURCE_GROUP")?;
        let app_name_raw = required("AZURE_APP_NAME")?;
        let app_name = AppName::new(&app_name_raw)
            .map_err(|e| Error::InvalidConfig(format!("AZURE_APP_NAME: {e}")))?;
        let registry = required("AZURE_ACR_NAME")?;
        let new_image_tag = required("NEW_IMAGE_TAG")?;

        let health_check_url = optional("HEALTH_CHECK_URL");

        // Prefer the full connection string; fall back to a bare
        // instrumentation key for older pipelines.
        let telemetry_connection = optional("APPLICATIONINSIGHTS_CONNECTION_STRING").or_else(|| {
            optional("APPINSIGHTS_INSTRUMENTATIONKEY").map(|key| format!("InstrumentationKey={key}"))
        });

        let deployment_timeout =
            duration_from_env("DEPLOYMENT_TIMEOUT_SECONDS", DEFAULT_DEPLOYMENT_TIMEOUT)?;
        let poll_interval =
            duration_from_env("HEALTH_CHECK_INTERVAL_SECONDS", DEFAULT_POLL_INTERVAL)?;
        let log_scan_interval =
            duration_from_env("LOG_SCAN_INTERVAL_SECONDS", DEFAULT_LOG_SCAN_INTERVAL)?;

        Ok(Self {
            resource_group,
            app_name,
            registry,
            new_image_tag,
            health_check_url,
            telemetry_connection,
            deployment_timeout,
            poll_interval,
            log_scan_interval,
        })
    }

    /// The image reference this deployment will roll out:
    /// `{registry}.azurecr.io/{app}:{tag}`.
    pub fn candidate_image(&self) -> Result<ImageRef> {
        let raw = format!(
            "{}.azurecr.io/{}:{}",
            self.registry, self.app_name, self.new_image_tag
        );
        ImageRef::parse(&raw)
            .map_err(|e| Error::InvalidConfig(format!("candidate image `{raw}`: {e}")))
    }
}

/// Read a required variable. Empty values count as missing; CI pipelines
/// routinely export empty strings for unset secrets.
fn required(name: &str) -> Result<String> {
    optional(name).ok_or_else(|| Error::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn duration_from_env(name: &str, default: Duration) -> Result<Duration> {
    match optional(name) {
        None => Ok(default),
        Some(raw) => raw.parse::<u64>().map(Duration::from_secs).map_err(|_| {
            Error::InvalidConfig(format!(
                "{name} must be an integer number of seconds, got `{raw}`"
            ))
        }),
    }
}
