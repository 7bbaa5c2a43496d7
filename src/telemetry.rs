// ABOUTME: Best-effort failure reporting to Application Insights.
// ABOUTME: Missing configuration disables the sink; send errors only warn.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::config::Config;
use crate::deploy::{DeployError, DeploymentRecord};

const DEFAULT_INGESTION_ENDPOINT: &str = "https://dc.services.visualstudio.com";

/// Upload deadline; a slow telemetry backend must not stall the rollback.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Reports deployment failures to a telemetry backend, if one is configured.
///
/// Every operation is best-effort: a missing connection string or a failed
/// upload must never change the outcome of a deployment.
pub struct TelemetrySink {
    inner: Option<Inner>,
}

struct Inner {
    client: reqwest::Client,
    settings: ConnectionSettings,
}

impl TelemetrySink {
    pub fn from_config(config: &Config) -> Self {
        match config
            .telemetry_connection
            .as_deref()
            .and_then(parse_connection_string)
        {
            Some(settings) => {
                let client = match reqwest::Client::builder().timeout(UPLOAD_TIMEOUT).build() {
                    Ok(client) => client,
                    Err(error) => {
                        tracing::warn!(%error, "failed to build telemetry HTTP client; reporting disabled");
                        return Self { inner: None };
                    }
                };
                Self {
                    inner: Some(Inner { client, settings }),
                }
            }
            None => {
                tracing::warn!(
                    "telemetry connection string not configured; deployment failures will not be reported"
                );
                Self { inner: None }
            }
        }
    }

    /// A sink that drops everything. Used in tests.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Report a deployment failure. Never fails; upload problems are warned
    /// about and otherwise ignored.
    pub async fn track_failure(&self, error: &DeployError, record: &DeploymentRecord) {
        let Some(inner) = &self.inner else {
            return;
        };

        let envelope = Envelope::failure(&inner.settings.instrumentation_key, error, record);
        let url = format!("{}/v2/track", inner.settings.ingestion_endpoint);

        match inner.client.post(&url).json(&envelope).send().await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                tracing::warn!(status = %response.status(), "telemetry ingestion rejected the failure report");
            }
            Err(send_error) => {
                tracing::warn!(%send_error, "failed to report deployment failure to telemetry");
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ConnectionSettings {
    instrumentation_key: String,
    ingestion_endpoint: String,
}

/// Parse an Application Insights connection string like
/// `InstrumentationKey=abc;IngestionEndpoint=https://host/`.
fn parse_connection_string(raw: &str) -> Option<ConnectionSettings> {
    let mut key = None;
    let mut endpoint = None;

    for pair in raw.split(';') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        match name.trim() {
            "InstrumentationKey" => key = Some(value.trim().to_string()),
            "IngestionEndpoint" => {
                endpoint = Some(value.trim().trim_end_matches('/').to_string());
            }
            _ => {}
        }
    }

    key.filter(|k| !k.is_empty())
        .map(|instrumentation_key| ConnectionSettings {
            instrumentation_key,
            ingestion_endpoint: endpoint
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| DEFAULT_INGESTION_ENDPOINT.to_string()),
        })
}

/// Application Insights track envelope.
#[derive(Debug, Serialize)]
struct Envelope {
    name: &'static str,
    time: String,
    #[serde(rename = "iKey")]
    instrumentation_key: String,
    tags: HashMap<&'static str, String>,
    data: EnvelopeData,
}

#[derive(Debug, Serialize)]
struct EnvelopeData {
    #[serde(rename = "baseType")]
    base_type: &'static str,
    #[serde(rename = "baseData")]
    base_data: MessageData,
}

#[derive(Debug, Serialize)]
struct MessageData {
    ver: u8,
    message: String,
    #[serde(rename = "severityLevel")]
    severity_level: u8,
    properties: HashMap<&'static str, String>,
}

/// Error severity in the Application Insights schema.
const SEVERITY_ERROR: u8 = 3;

impl Envelope {
    fn failure(instrumentation_key: &str, error: &DeployError, record: &DeploymentRecord) -> Self {
        let mut tags = HashMap::new();
        tags.insert(
            "ai.cloud.roleInstance",
            gethostname::gethostname().to_string_lossy().into_owned(),
        );

        let mut properties = HashMap::new();
        properties.insert("candidateImage", record.candidate_image.to_string());
        properties.insert(
            "previousImage",
            record
                .previous_image
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        );

        Self {
            name: "Microsoft.ApplicationInsights.Message",
            time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            instrumentation_key: instrumentation_key.to_string(),
            tags,
            data: EnvelopeData {
                base_type: "MessageData",
                base_data: MessageData {
                    ver: 2,
                    message: format!("deployment failed: {error}"),
                    severity_level: SEVERITY_ERROR,
                    properties,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_connection_string() {
        let settings = parse_connection_string(
            "InstrumentationKey=abc-123;IngestionEndpoint=https://westeurope.in.applicationinsights.azure.com/",
        )
        .expect("should parse");
        assert_eq!(settings.instrumentation_key, "abc-123");
        assert_eq!(
            settings.ingestion_endpoint,
            "https://westeurope.in.applicationinsights.azure.com"
        );
    }

    #[test]
    fn key_only_falls_back_to_default_endpoint() {
        let settings = parse_connection_string("InstrumentationKey=abc-123").expect("should parse");
        assert_eq!(settings.ingestion_endpoint, DEFAULT_INGESTION_ENDPOINT);
    }

    #[test]
    fn missing_key_yields_none() {
        assert_eq!(
            parse_connection_string("IngestionEndpoint=https://example.com"),
            None
        );
        assert_eq!(parse_connection_string(""), None);
        assert_eq!(parse_connection_string("InstrumentationKey="), None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let settings =
            parse_connection_string("InstrumentationKey=k;LiveEndpoint=https://live.example.com")
                .expect("should parse");
        assert_eq!(settings.instrumentation_key, "k");
    }
}
