//! Recording service backed by an external recorder process.
//!
//! Start launches the configured program with the session settings filled
//! into its argument template; stop kills it. Both are idempotent the way
//! the host command layer is: starting while a recorder is alive and
//! stopping with none alive both succeed without doing anything.

use crate::config::HostConfig;

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use spinup_core::{RecorderConfig, RecordingService, ServiceFailure};
use tokio::{
    process::{Child, Command},
    sync::Mutex,
};
use tracing::{info, instrument, warn};

/// Launches and stops the external recorder.
pub struct HostRecordingService {
    program: Option<PathBuf>,
    args: Vec<String>,
    output_dir: PathBuf,
    child: Mutex<Option<Child>>,
}

impl HostRecordingService {
    /// Create a service for the configured recorder writing into `output_dir`.
    pub fn new(host: &HostConfig, output_dir: PathBuf) -> Self {
        Self {
            program: host.program.clone(),
            args: host.args.clone(),
            output_dir,
            child: Mutex::new(None),
        }
    }
}

impl RecordingService for HostRecordingService {
    #[instrument(skip(self))]
    async fn start_video_recording(&self, config: &RecorderConfig) -> Result<(), ServiceFailure> {
        let mut child = self.child.lock().await;

        if let Some(running) = child.as_mut() {
            match running.try_wait() {
                Ok(None) => {
                    warn!("Recorder is already running");
                    return Ok(());
                }
                Ok(Some(status)) => info!(%status, "Previous recorder had exited"),
                Err(e) => warn!(error = %e, "Could not query previous recorder"),
            }
        }

        let program = self
            .program
            .as_ref()
            .ok_or_else(|| ServiceFailure::new("no recorder program configured"))?;

        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            ServiceFailure::new(format!(
                "failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let args = render_args(&self.args, config, &self.output_dir);

        let spawned = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ServiceFailure::new(format!("failed to launch {}: {}", program.display(), e))
            })?;

        info!(pid = spawned.id(), program = %program.display(), "Recorder launched");

        *child = Some(spawned);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn stop_video_recording(&self) -> Result<(), ServiceFailure> {
        let mut guard = self.child.lock().await;

        let Some(mut child) = guard.take() else {
            info!("Recorder is not running, nothing to stop");
            return Ok(());
        };

        if let Err(e) = child.kill().await {
            // Keep the handle so a later stop can retry.
            *guard = Some(child);
            return Err(ServiceFailure::new(format!(
                "failed to stop recorder: {}",
                e
            )));
        }

        info!("Recorder stopped");
        Ok(())
    }
}

/// Fill the argument template with the session settings.
pub(crate) fn render_args(
    template: &[String],
    config: &RecorderConfig,
    output_dir: &Path,
) -> Vec<String> {
    let output_dir = output_dir.display().to_string();

    template
        .iter()
        .map(|arg| {
            arg.replace("{fps}", &config.frames_per_second.to_string())
                .replace("{container}", config.container_format.as_str())
                .replace(
                    "{segment_seconds}",
                    &config.segment_duration_seconds.to_string(),
                )
                .replace("{audio}", if config.capture_audio { "true" } else { "false" })
                .replace("{audio_source}", config.audio_source.as_str())
                .replace("{output_dir}", &output_dir)
        })
        .collect()
}
