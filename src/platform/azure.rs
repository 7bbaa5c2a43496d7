// ABOUTME: Azure CLI implementation of PlatformOps.
// ABOUTME: Shells out to `az webapp` commands with piped output and deadlines.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use snafu::ResultExt;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::config::Config;
use crate::types::{AppName, ImageRef};

use super::error::{
    BadImageReferenceSnafu, CommandFailedSnafu, InvalidJsonSnafu, PlatformError, SpawnSnafu,
    WaitSnafu,
};
use super::PlatformOps;

/// How long a log snapshot is allowed to collect output. The underlying
/// `az webapp log tail` command streams forever; hitting this deadline is the
/// expected way to end it.
const LOG_SNAPSHOT_WINDOW: Duration = Duration::from_secs(15);

/// `PlatformOps` backed by the Azure CLI (`az webapp ...`).
pub struct AzCli {
    app_name: AppName,
    resource_group: String,
    log_window: Duration,
}

impl AzCli {
    pub fn new(config: &Config) -> Self {
        Self {
            app_name: config.app_name.clone(),
            resource_group: config.resource_group.clone(),
            log_window: LOG_SNAPSHOT_WINDOW,
        }
    }

    /// Run an `az` command to completion and return its stdout.
    async fn run(&self, args: &[&str]) -> Result<String, PlatformError> {
        let command = display_command(args);
        tracing::debug!(%command, "running platform command");

        let output = Command::new("az")
            .args(args)
            .output()
            .await
            .context(SpawnSnafu {
                command: command.clone(),
            })?;

        if !output.status.success() {
            return CommandFailedSnafu {
                command,
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .fail();
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run an `az` command that streams indefinitely, collecting stdout until
    /// the window elapses. An early non-zero exit is a command failure; an
    /// early clean exit returns whatever was collected.
    async fn run_windowed(
        &self,
        args: &[&str],
        window: Duration,
    ) -> Result<String, PlatformError> {
        let command = display_command(args);
        tracing::debug!(%command, window_secs = window.as_secs(), "running windowed platform command");

        let mut child = Command::new("az")
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .context(SpawnSnafu {
                command: command.clone(),
            })?;

        let stdout_task = tokio::spawn(collect_lines(child.stdout.take()));
        let stderr_task = tokio::spawn(collect_lines(child.stderr.take()));

        tokio::select! {
            status = child.wait() => {
                let status = status.context(WaitSnafu { command: command.clone() })?;
                let stdout = stdout_task.await.unwrap_or_default();
                let stderr = stderr_task.await.unwrap_or_default();

                if status.success() {
                    Ok(stdout)
                } else {
                    CommandFailedSnafu {
                        command,
                        code: status.code().unwrap_or(-1),
                        stderr: stderr.trim().to_string(),
                    }
                    .fail()
                }
            }
            _ = tokio::time::sleep(window) => {
                tracing::debug!(%command, "snapshot window elapsed; stopping stream");
                let _ = child.kill().await;
                let _ = child.wait().await;
                let _ = stderr_task.await;
                Ok(stdout_task.await.unwrap_or_default())
            }
        }
    }
}

#[async_trait]
impl PlatformOps for AzCli {
    async fn current_image(&self) -> Result<ImageRef, PlatformError> {
        let args = [
            "webapp",
            "config",
            "container",
            "show",
            "--name",
            self.app_name.as_str(),
            "--resource-group",
            &self.resource_group,
        ];
        let command = display_command(&args);
        let stdout = self.run(&args).await?;

        let value: serde_json::Value =
            serde_json::from_str(&stdout).context(InvalidJsonSnafu { command })?;

        // The CLI reports a JSON array of container settings; an empty array
        // means no container is configured for the web app.
        let first = value
            .as_array()
            .and_then(|entries| entries.first())
            .ok_or(PlatformError::NoContainerConfigured)?;

        let image = first
            .get("image")
            .and_then(serde_json::Value::as_str)
            .ok_or(PlatformError::ImageNotReported)?;

        ImageRef::parse(image).context(BadImageReferenceSnafu)
    }

    async fn set_image(&self, image: &ImageRef) -> Result<(), PlatformError> {
        let args = [
            "webapp",
            "config",
            "container",
            "set",
            "--name",
            self.app_name.as_str(),
            "--resource-group",
            &self.resource_group,
            "--docker-custom-image-name",
            image.as_str(),
        ];
        self.run(&args).await?;
        Ok(())
    }

    async fn log_snapshot(&self) -> Result<String, PlatformError> {
        let args = [
            "webapp",
            "log",
            "tail",
            "--name",
            self.app_name.as_str(),
            "--resource-group",
            &self.resource_group,
        ];
        self.run_windowed(&args, self.log_window).await
    }
}

fn display_command(args: &[&str]) -> String {
    let mut command = String::from("az");
    for arg in args {
        command.push(' ');
        command.push_str(arg);
    }
    command
}

/// Drain a child process stream into a newline-joined string.
async fn collect_lines<R>(reader: Option<R>) -> String
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let Some(reader) = reader else {
        return String::new();
    };

    let mut collected = String::new();
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        collected.push_str(&line);
        collected.push('\n');
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_command_joins_args() {
        let command = display_command(&["webapp", "log", "tail", "--name", "demo"]);
        assert_eq!(command, "az webapp log tail --name demo");
    }
}
