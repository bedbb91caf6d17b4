//! Text shown for the countdown: the clock readout and the status line.

use std::fmt;

use crate::state::{Phase, TimerState};

/// Formats seconds as `M:SS`. Minutes are not capped at 59.
///
/// ```rust
/// use ringtimer::format::format_clock;
///
/// assert_eq!(format_clock(65), "1:05");
/// assert_eq!(format_clock(5), "0:05");
/// assert_eq!(format_clock(7200), "120:00");
/// ```
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Status line under the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Time is up.
    Alert,
    CountingDown,
    Paused,
}

impl Status {
    pub fn of(state: &TimerState) -> Self {
        match state.phase() {
            Phase::Completed => Status::Alert,
            Phase::Running => Status::CountingDown,
            Phase::Idle => Status::Paused,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Alert => f.write_str("🔔 Time's up!"),
            Status::CountingDown => f.write_str("Counting down..."),
            Status::Paused => f.write_str("Paused"),
        }
    }
}

/// Glyph for the start/pause control: what pressing it would do.
pub fn control_glyph(running: bool) -> &'static str {
    if running {
        "⏸"
    } else {
        "▶"
    }
}
