mod config;
mod service;

pub use {
    config::{AudioSource, Container, RecorderConfig},
    service::{RecordingService, ServiceFailure},
};
