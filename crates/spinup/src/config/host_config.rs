use crate::config::{DEFAULT_RECORDER_TIMEOUT_SECONDS, default_recorder_timeout_seconds};

use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// External recorder launched for each session.
///
/// `args` may contain `{fps}`, `{container}`, `{segment_seconds}`, `{audio}`,
/// `{audio_source}` and `{output_dir}`, filled in at start time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Recorder executable. Starting a session fails while this is unset.
    #[serde(default)]
    pub program: Option<PathBuf>,

    /// Argument template passed to the recorder.
    #[serde(default)]
    pub args: Vec<String>,

    /// Where recordings are written (None = `<data dir>/video_recordings_pending`).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Longest wait for a start or stop call before it is abandoned.
    #[serde(default = "default_recorder_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            output_dir: None,
            timeout_seconds: DEFAULT_RECORDER_TIMEOUT_SECONDS,
        }
    }
}

impl HostConfig {
    /// Start/stop call timeout, at least one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(1))
    }
}
