use serde::{Deserialize, Serialize};

/// Output container written by the recording service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Container {
    /// Audio Video Interleave.
    Avi,
    /// WebM (VP8/VP9).
    Webm,
    /// MPEG-4 Part 14.
    Mp4,
}

impl Container {
    /// Variant name as the host command layer expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Container::Avi => "Avi",
            Container::Webm => "Webm",
            Container::Mp4 => "Mp4",
        }
    }
}

/// Which audio inputs are mixed into the recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioSource {
    /// Microphone input only.
    Microphone,
    /// System loopback only.
    System,
    /// System loopback and microphone combined.
    Both,
}

impl AudioSource {
    /// Variant name as the host command layer expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioSource::Microphone => "Microphone",
            AudioSource::System => "System",
            AudioSource::Both => "Both",
        }
    }
}

/// Configuration passed with every `start_video_recording` request.
///
/// Serializes in camelCase, which is the shape the host command layer
/// receives: `{ framesPerSecond, containerFormat, ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderConfig {
    /// Capture frame rate.
    pub frames_per_second: u32,
    /// Output container.
    pub container_format: Container,
    /// Length of each output segment before rolling to a new file.
    pub segment_duration_seconds: u64,
    /// Whether audio is captured alongside video.
    pub capture_audio: bool,
    /// Audio inputs to mix when `capture_audio` is set.
    pub audio_source: AudioSource,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 15,
            container_format: Container::Mp4,
            segment_duration_seconds: 300,
            capture_audio: true,
            audio_source: AudioSource::Both,
        }
    }
}
