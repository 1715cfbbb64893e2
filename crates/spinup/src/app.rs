use crate::{AppCommand, AppError, AppResult, config::Config};

use std::{future::Future, panic::Location, sync::Arc};

use error_location::ErrorLocation;
use spinup_core::{
    AuthGate, CoreResult, Credentials, EMAIL_KEY, GateState, IdentityProvider, LoginAction,
    NAME_KEY, RecordingService, SessionController,
};
use tokio::{
    sync::{mpsc, watch},
    time,
};
use tracing::{error, info, instrument, warn};

/// Main application state.
///
/// Mounts a [`SessionController`] while the auth gate is unlocked and tears
/// it down when the gate locks. All commands and gate transitions are
/// handled one at a time on this task, so every recorder call is bounded by
/// the configured timeout.
pub struct App<R, P> {
    config: Config,
    gate: Arc<AuthGate>,
    login: LoginAction<P>,
    recorder: Arc<R>,
    session: Option<SessionController<Arc<R>>>,
    shutdown_tx: watch::Sender<bool>,
}

impl<R, P> App<R, P>
where
    R: RecordingService,
    P: IdentityProvider,
{
    /// Build the application around a seeded gate.
    pub fn new(
        config: Config,
        gate: Arc<AuthGate>,
        recorder: Arc<R>,
        provider: P,
        shutdown_tx: watch::Sender<bool>,
    ) -> Self {
        let login = LoginAction::new(provider, Arc::clone(&gate));

        Self {
            config,
            gate,
            login,
            recorder,
            session: None,
            shutdown_tx,
        }
    }

    /// The mounted session, present only while signed in.
    pub(crate) fn session(&self) -> Option<&SessionController<Arc<R>>> {
        self.session.as_ref()
    }

    /// Run the main application event loop.
    #[instrument(skip_all)]
    pub(crate) async fn run(mut self, mut command_rx: mpsc::Receiver<AppCommand>) -> AppResult<()> {
        info!("Spinup starting");

        let mut gate_rx = self.gate.subscribe();
        let initial = *gate_rx.borrow_and_update();
        self.apply_gate(initial).await;

        loop {
            tokio::select! {
                changed = gate_rx.changed() => {
                    if changed.is_err() {
                        info!("Auth gate closed, shutting down");
                        break;
                    }
                    let state = *gate_rx.borrow_and_update();
                    self.apply_gate(state).await;
                }

                cmd = command_rx.recv() => {
                    let Some(cmd) = cmd else {
                        info!("Command channel closed, shutting down");
                        break;
                    };
                    if matches!(cmd, AppCommand::Quit) {
                        info!("Shutdown requested");
                        break;
                    }
                    if let Err(e) = self.handle_command(cmd).await {
                        error!(error = ?e, "Command failed");
                        println!("error: {}", e);
                    }
                }
            }
        }

        self.unmount_session().await;

        let _ = self.shutdown_tx.send(true);
        info!("Spinup shut down successfully");

        Ok(())
    }

    /// Mount or unmount the session view to match the gate.
    #[instrument(skip(self))]
    pub(crate) async fn apply_gate(&mut self, state: GateState) {
        match (state, self.session.is_some()) {
            (GateState::Unlocked, false) => {
                self.session = Some(SessionController::new(
                    Arc::clone(&self.recorder),
                    self.config.recording.recorder_config(),
                ));
                info!("Session view mounted");
                println!("Signed in. Commands: start, stop, status, whoami, quit");
            }
            (GateState::Locked, true) => {
                self.unmount_session().await;
                println!("Signed out. Use: login <email> <password>");
            }
            (GateState::Locked, false) => {
                println!("Sign in with: login <email> <password>");
            }
            (GateState::Unlocked, true) => {}
        }
    }

    /// Drop the session controller, stopping a live recording first.
    async fn unmount_session(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };

        if session.state().running {
            let timeout = self.config.recorder.timeout();
            match time::timeout(timeout, session.stop()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(error = ?e, "Failed to stop recording while unmounting session")
                }
                Err(_) => warn!(?timeout, "Recorder stop timed out while unmounting session"),
            }
        }

        info!("Session view unmounted");
    }

    #[instrument(skip(self))]
    pub(crate) async fn handle_command(&mut self, cmd: AppCommand) -> AppResult<()> {
        match cmd {
            AppCommand::Login(credentials) => self.login(credentials).await,
            AppCommand::Start => {
                let timeout = self.config.recorder.timeout();
                let session = self.session_mut()?;
                bounded("start", timeout, session.start()).await?;
                println!("Recording started");
                Ok(())
            }
            AppCommand::Stop => {
                let timeout = self.config.recorder.timeout();
                let session = self.session_mut()?;
                bounded("stop", timeout, session.stop()).await?;
                println!("Recording stopped at {}", session.display());
                Ok(())
            }
            AppCommand::Status => {
                self.print_status();
                Ok(())
            }
            AppCommand::WhoAmI => self.print_profile(),
            AppCommand::Quit => Ok(()),
        }
    }

    async fn login(&mut self, credentials: Credentials) -> AppResult<()> {
        if self.gate.is_authenticated() {
            println!("Already signed in");
            return Ok(());
        }

        let state = self.login.login(&credentials).await?;

        // The reload inside login already published the new state; mount now
        // so the next command sees the session without waiting on the watch.
        self.apply_gate(state).await;
        Ok(())
    }

    #[track_caller]
    fn session_mut(&mut self) -> AppResult<&mut SessionController<Arc<R>>> {
        self.session.as_mut().ok_or_else(|| AppError::NotSignedIn {
            location: ErrorLocation::from(Location::caller()),
        })
    }

    fn print_status(&self) {
        match self.session() {
            None => println!("gate: {:?}", self.gate.state()),
            Some(session) => {
                let state = session.state();
                println!(
                    "gate: {:?}  recording: {}  elapsed: {}  start: {}  stop: {}",
                    self.gate.state(),
                    if state.running { "yes" } else { "no" },
                    session.display(),
                    if session.can_start() { "enabled" } else { "disabled" },
                    if session.can_stop() { "enabled" } else { "disabled" },
                );
            }
        }
    }

    fn print_profile(&self) -> AppResult<()> {
        if !self.gate.is_authenticated() {
            return Err(AppError::NotSignedIn {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let store = self.gate.store();
        let name = store.get(NAME_KEY)?.unwrap_or_default();
        let email = store.get(EMAIL_KEY)?.unwrap_or_default();
        println!("{} <{}>", name, email);

        Ok(())
    }
}

/// Await a controller call, abandoning it after `timeout`.
///
/// The controller only transitions once the call returns, so an abandoned
/// call leaves the session state untouched.
#[track_caller]
fn bounded<F>(
    operation: &'static str,
    timeout: std::time::Duration,
    call: F,
) -> impl Future<Output = AppResult<()>>
where
    F: Future<Output = CoreResult<()>>,
{
    let location = ErrorLocation::from(Location::caller());

    async move {
        match time::timeout(timeout, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(AppError::RecorderTimedOut {
                operation,
                seconds: timeout.as_secs(),
                location,
            }),
        }
    }
}
