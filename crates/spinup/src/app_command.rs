use spinup_core::Credentials;

/// Commands sent from the command reader to the main application.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Verify credentials and unlock the session view.
    Login(Credentials),
    /// Start a recording session.
    Start,
    /// Stop the current recording session.
    Stop,
    /// Print gate and session state.
    Status,
    /// Print the signed-in profile.
    WhoAmI,
    /// Request application shutdown.
    Quit,
}
