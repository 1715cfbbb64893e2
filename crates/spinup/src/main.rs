//! Spinup: session timer and auth gate for the desktop monitoring dashboard.

mod app;
mod app_command;
mod command_reader;
mod config;
mod error;
mod host_recorder;
mod identity;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    command_reader::CommandReader,
    error::{AppError, Result as AppResult},
    host_recorder::HostRecordingService,
    identity::{LocalIdentityProvider, hash_password},
};

use crate::config::Config;

use std::{sync::Arc, time::Duration};

use spinup_core::{AuthGate, FileTokenStore, StoreWatcher};
use tokio::sync::{mpsc, watch};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Application entry point.
fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("spinup=info,spinup_core=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("hash-password") {
        let Some(password) = args.next() else {
            eprintln!("usage: spinup hash-password <password>");
            std::process::exit(2);
        };
        match hash_password(&password) {
            Ok(hash) => println!("{}", hash),
            Err(e) => {
                error!(error = ?e, "Failed to hash password");
                std::process::exit(1);
            }
        }
        return;
    }

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let result = rt.block_on(run(config));

    // The stdin reader sits in a blocking read that only returns on input.
    rt.shutdown_timeout(Duration::from_secs(1));

    if let Err(e) = result {
        error!(error = ?e, "Spinup exited with error");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> AppResult<()> {
    let store = Arc::new(FileTokenStore::open(config.store_path()?)?);
    let gate = Arc::new(AuthGate::new(store.clone()));

    let (change_tx, change_rx) = mpsc::channel(32);
    let (command_tx, command_rx) = mpsc::channel(32);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let watcher = StoreWatcher::new(store, config.store.poll_interval(), change_tx);
    let reader = CommandReader::new(command_tx);
    let recorder = Arc::new(HostRecordingService::new(
        &config.recorder,
        config.recording_output_dir()?,
    ));
    let provider = LocalIdentityProvider::new(config.identity.accounts.clone());
    let app = App::new(config, Arc::clone(&gate), recorder, provider, shutdown_tx);

    tokio::join!(
        watcher.run(shutdown_rx.clone()),
        gate.run(change_rx, shutdown_rx.clone()),
        async {
            if let Err(e) = reader.run(shutdown_rx.clone()).await {
                error!(error = ?e, "Command reader error");
            }
        },
        async {
            if let Err(e) = app.run(command_rx).await {
                error!(error = ?e, "App error");
            }
        }
    );

    Ok(())
}
