mod controller;
mod elapsed;
mod state;
mod ticker;

pub(crate) use ticker::SessionTicker;

pub use {
    controller::SessionController,
    elapsed::{ElapsedTime, format_time},
    state::SessionState,
};
