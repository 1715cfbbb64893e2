mod host_config;
mod identity_config;
mod recording_config;
#[allow(clippy::module_inception)]
mod config;
mod store_config;

pub(crate) use {
    config::Config,
    host_config::HostConfig,
    identity_config::{AccountConfig, IdentityConfig},
    recording_config::RecordingConfig,
    store_config::StoreConfig,
};

pub(crate) const DEFAULT_FRAMES_PER_SECOND: u32 = 15;
pub(crate) const DEFAULT_SEGMENT_DURATION_SECONDS: u64 = 300;
pub(crate) const DEFAULT_CAPTURE_AUDIO: bool = true;
pub(crate) const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
pub(crate) const DEFAULT_RECORDER_TIMEOUT_SECONDS: u64 = 10;

pub(crate) fn default_frames_per_second() -> u32 {
    DEFAULT_FRAMES_PER_SECOND
}

pub(crate) fn default_segment_duration_seconds() -> u64 {
    DEFAULT_SEGMENT_DURATION_SECONDS
}

pub(crate) fn default_capture_audio() -> bool {
    DEFAULT_CAPTURE_AUDIO
}

pub(crate) fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

pub(crate) fn default_recorder_timeout_seconds() -> u64 {
    DEFAULT_RECORDER_TIMEOUT_SECONDS
}
