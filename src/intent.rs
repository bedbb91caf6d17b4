//! Intent handlers: user and environment requests turned into new state.
//!
//! Every handler is a total function from the current [`TimerState`] and its
//! input to the next state. Bad input never panics and never breaks the
//! state's invariants; rejected input leaves the state exactly as it was.
//!
//! ```rust
//! use ringtimer::intent::{apply, Intent};
//! use ringtimer::state::TimerState;
//!
//! let state = TimerState::default();
//! let state = apply(state, &Intent::SetDuration("5".into()));
//! assert_eq!(state.duration(), 300);
//!
//! // Out of range: ignored.
//! let same = apply(state, &Intent::SetDuration("200".into()));
//! assert_eq!(same, state);
//! ```

use tracing::debug;

use crate::error::DurationError;
use crate::state::{
    validate_minutes, TimerState, LARGE_RADIUS, MAX_MINUTES, MIN_MINUTES, RADIUS_BREAKPOINT,
    SMALL_RADIUS,
};

/// A discrete request to change the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Start if paused, pause if running.
    StartPause,
    /// Stop and refill to the configured duration.
    Reset,
    ToggleTheme,
    /// Replace the duration with raw user text holding whole minutes.
    SetDuration(String),
    /// Move the duration by whole minutes, clamped to the allowed range.
    StepDuration(i32),
    /// The viewport is now `width` pixels wide.
    Resize { width: u32 },
}

impl Intent {
    /// Whether this intent can change what the next tick does.
    ///
    /// Ticks scheduled before such an intent must be dropped.
    pub fn supersedes_ticks(&self) -> bool {
        matches!(
            self,
            Intent::StartPause | Intent::Reset | Intent::SetDuration(_) | Intent::StepDuration(_)
        )
    }
}

/// Applies one intent.
pub fn apply(state: TimerState, intent: &Intent) -> TimerState {
    match intent {
        Intent::StartPause => start_pause(state),
        Intent::Reset => reset(state),
        Intent::ToggleTheme => toggle_theme(state),
        Intent::SetDuration(raw) => change_duration(state, raw),
        Intent::StepDuration(delta) => step_duration(state, *delta),
        Intent::Resize { width } => resize(state, *width),
    }
}

pub fn start_pause(state: TimerState) -> TimerState {
    state.toggled_running()
}

pub fn reset(state: TimerState) -> TimerState {
    state.reset()
}

pub fn toggle_theme(state: TimerState) -> TimerState {
    state.with_theme_toggled()
}

/// Parses whole minutes from user text and checks the allowed range.
pub fn parse_minutes(raw: &str) -> Result<u32, DurationError> {
    let trimmed = raw.trim();
    let minutes: i64 = trimmed
        .parse()
        .map_err(|_| DurationError::NotANumber(trimmed.to_string()))?;
    validate_minutes(minutes)
}

/// Sets duration and remaining time from raw minute text.
///
/// Input that does not parse, or falls outside 1-120 minutes, is ignored.
pub fn change_duration(state: TimerState, raw: &str) -> TimerState {
    match parse_minutes(raw) {
        Ok(minutes) => state.with_duration_minutes(minutes),
        Err(err) => {
            debug!("Ignoring duration change: {}", err);
            state
        }
    }
}

/// Moves the duration by `delta` minutes, stopping at the range limits.
pub fn step_duration(state: TimerState, delta: i32) -> TimerState {
    let target = i64::from(state.duration_minutes()) + i64::from(delta);
    let clamped = target.clamp(i64::from(MIN_MINUTES), i64::from(MAX_MINUTES));
    // Clamped to the minute range, so the cast is lossless.
    let minutes = clamped as u32;
    if minutes == state.duration_minutes() {
        return state;
    }
    state.with_duration_minutes(minutes)
}

/// Picks the ring radius for a viewport width. There are only two sizes.
pub fn radius_for_width(width: u32) -> u16 {
    if width < RADIUS_BREAKPOINT {
        SMALL_RADIUS
    } else {
        LARGE_RADIUS
    }
}

pub fn resize(state: TimerState, width: u32) -> TimerState {
    state.with_display_radius(radius_for_width(width))
}
