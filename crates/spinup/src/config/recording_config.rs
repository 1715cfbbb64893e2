use crate::config::{
    DEFAULT_CAPTURE_AUDIO, DEFAULT_FRAMES_PER_SECOND, DEFAULT_SEGMENT_DURATION_SECONDS,
    default_capture_audio, default_frames_per_second, default_segment_duration_seconds,
};

use serde::{Deserialize, Serialize};
use spinup_core::{AudioSource, Container, RecorderConfig};

/// Settings sent with every recording start request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Capture frame rate.
    #[serde(default = "default_frames_per_second")]
    pub frames_per_second: u32,
    /// Output container.
    #[serde(default = "default_container")]
    pub container: Container,
    /// Segment length before the recorder rolls to a new file.
    #[serde(default = "default_segment_duration_seconds")]
    pub segment_duration_seconds: u64,
    /// Capture audio alongside video.
    #[serde(default = "default_capture_audio")]
    pub capture_audio: bool,
    /// Audio inputs to mix.
    #[serde(default = "default_audio_source")]
    pub audio_source: AudioSource,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            container: default_container(),
            segment_duration_seconds: DEFAULT_SEGMENT_DURATION_SECONDS,
            capture_audio: DEFAULT_CAPTURE_AUDIO,
            audio_source: default_audio_source(),
        }
    }
}

impl RecordingConfig {
    /// The request body for `start_video_recording`.
    pub fn recorder_config(&self) -> RecorderConfig {
        RecorderConfig {
            frames_per_second: self.frames_per_second,
            container_format: self.container,
            segment_duration_seconds: self.segment_duration_seconds,
            capture_audio: self.capture_audio,
            audio_source: self.audio_source,
        }
    }
}

fn default_container() -> Container {
    Container::Mp4
}

fn default_audio_source() -> AudioSource {
    AudioSource::Both
}
