//! Reads user commands from stdin.
//!
//! One command per line: `login <email> <password>`, `start`, `stop`,
//! `status`, `whoami`, `quit`. End of input is treated as `quit`.

use crate::{AppCommand, AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use spinup_core::Credentials;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{mpsc, watch},
};
use tracing::{info, instrument, warn};

/// Forwards parsed stdin lines to the application.
pub struct CommandReader {
    command_tx: mpsc::Sender<AppCommand>,
}

impl CommandReader {
    /// Create a reader sending into `command_tx`.
    pub fn new(command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self { command_tx }
    }

    /// Read until shutdown, end of input, or `quit`.
    #[instrument(skip_all)]
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Command reader shutting down");
                    break;
                }
                line = lines.next_line() => {
                    let command = match line? {
                        Some(line) => match parse_command(&line) {
                            Ok(Some(command)) => command,
                            Ok(None) => continue,
                            Err(e) => {
                                warn!(error = ?e, "Ignoring input");
                                println!("{}", usage_hint(&e));
                                continue;
                            }
                        },
                        None => AppCommand::Quit,
                    };

                    let quit = matches!(command, AppCommand::Quit);

                    self.command_tx
                        .send(command)
                        .await
                        .map_err(|e| AppError::ChannelSendFailed {
                            message: format!("Failed to send command: {}", e),
                            location: ErrorLocation::from(Location::caller()),
                        })?;

                    if quit {
                        break;
                    }
                }
            }
        }

        Ok(())
    }
}

/// Parse one input line. Blank lines yield `Ok(None)`.
#[track_caller]
pub(crate) fn parse_command(line: &str) -> AppResult<Option<AppCommand>> {
    let mut words = line.split_whitespace();

    let Some(verb) = words.next() else {
        return Ok(None);
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "login" => {
            let (Some(email), Some(password), None) = (words.next(), words.next(), words.next())
            else {
                return Err(invalid("usage: login <email> <password>"));
            };
            AppCommand::Login(Credentials::new(email, password))
        }
        "start" => AppCommand::Start,
        "stop" => AppCommand::Stop,
        "status" => AppCommand::Status,
        "whoami" => AppCommand::WhoAmI,
        "quit" | "exit" => AppCommand::Quit,
        other => return Err(invalid(&format!("unknown command '{}'", other))),
    };

    if !matches!(command, AppCommand::Login(_)) && words.next().is_some() {
        return Err(invalid(&format!("'{}' takes no arguments", verb)));
    }

    Ok(Some(command))
}

#[track_caller]
fn invalid(reason: &str) -> AppError {
    AppError::InvalidCommand {
        reason: reason.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

fn usage_hint(error: &AppError) -> String {
    match error {
        AppError::InvalidCommand { reason, .. } => format!(
            "{} (commands: login <email> <password>, start, stop, status, whoami, quit)",
            reason
        ),
        other => other.to_string(),
    }
}
