use std::fmt;

const SECONDS_PER_HOUR: u64 = 3600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Elapsed seconds split into display components.
///
/// Hours are unbounded; past 99 the hours field simply grows wider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTime {
    /// Whole hours.
    pub hours: u64,
    /// Minutes within the hour, 0..=59.
    pub minutes: u8,
    /// Seconds within the minute, 0..=59.
    pub seconds: u8,
}

/// Split a second count into hours, minutes and seconds.
pub fn format_time(total_seconds: u64) -> ElapsedTime {
    ElapsedTime {
        hours: total_seconds / SECONDS_PER_HOUR,
        minutes: ((total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE) as u8,
        seconds: (total_seconds % SECONDS_PER_MINUTE) as u8,
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
