// ABOUTME: Entry point for the azrollout CLI.
// ABOUTME: Loads env configuration, runs the deploy sequence, maps exit codes.

mod cli;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

use azrollout::config::Config;
use azrollout::deploy::{DeployStatus, Sequencer};
use azrollout::error::Result;
use azrollout::health::HttpProbe;
use azrollout::platform::AzCli;
use azrollout::telemetry::TelemetrySink;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from_env()?;
    let candidate = config.candidate_image()?;

    let telemetry = TelemetrySink::from_config(&config);
    let platform = AzCli::new(&config);
    let probe = HttpProbe::new()?;

    let sequencer = Sequencer::new(platform, probe, telemetry, config);

    match sequencer.run(candidate).await {
        Ok(record) => {
            println!("Deployment succeeded: {}", record.candidate_image);
            Ok(())
        }
        Err((record, error)) => {
            match (&record.status, &record.previous_image) {
                (DeployStatus::RolledBack, Some(previous)) => {
                    eprintln!("Deployment failed; reverted to {previous}");
                }
                _ => {
                    eprintln!("Deployment failed; service was not reverted");
                }
            }
            Err(error.into())
        }
    }
}
