// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Deployment configuration comes from environment variables, not flags.

use clap::Parser;

/// Deploy a container image to an Azure Web App, rolling back to the
/// last-known-good image on failure.
///
/// All deployment configuration is read from environment variables
/// (AZURE_RESOURCE_GROUP, AZURE_APP_NAME, AZURE_ACR_NAME, NEW_IMAGE_TAG,
/// and optionally HEALTH_CHECK_URL).
#[derive(Parser)]
#[command(name = "azrollout")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
