/// In-memory state of the recording session.
///
/// `elapsed_seconds` only advances while `running` is true and is reset to
/// zero exactly when a session successfully starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// True while a recording session is active.
    pub running: bool,
    /// Whole seconds since the current or most recent session started.
    pub elapsed_seconds: u64,
}
