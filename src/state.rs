//! The countdown's state value and its transitions.
//!
//! [`TimerState`] is a small `Copy` value. Every transition is a method that
//! consumes the current value and returns the next one, so a state can never
//! be observed half-updated. The bubbletea model in [`crate::timer`] owns the
//! single live instance.
//!
//! ```rust
//! use ringtimer::state::{Phase, TimerState};
//!
//! let state = TimerState::default();
//! assert_eq!(state.remaining(), 60);
//! assert_eq!(state.phase(), Phase::Idle);
//!
//! let state = state.toggled_running();
//! let (state, _) = state.ticked();
//! assert_eq!(state.remaining(), 59);
//! ```

use crate::error::DurationError;
use crate::theme::Theme;

/// Shortest configurable countdown, in minutes.
pub const MIN_MINUTES: u32 = 1;
/// Longest configurable countdown, in minutes.
pub const MAX_MINUTES: u32 = 120;
/// Countdown length at startup, in minutes.
pub const DEFAULT_MINUTES: u32 = 1;
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Ring radius used below [`RADIUS_BREAKPOINT`].
pub const SMALL_RADIUS: u16 = 100;
/// Ring radius used at or above [`RADIUS_BREAKPOINT`].
pub const LARGE_RADIUS: u16 = 150;
/// Viewport width (pixels) at which the ring switches to [`LARGE_RADIUS`].
pub const RADIUS_BREAKPOINT: u32 = 500;

/// Where the countdown is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not ticking, time left.
    Idle,
    /// Ticking, time left.
    Running,
    /// Remaining time reached zero. Only a reset or a new duration leaves it.
    Completed,
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The countdown was paused or already at zero; nothing changed.
    Ignored,
    /// One second was taken off and time is still left.
    Advanced,
    /// This tick took the last second.
    Completed,
}

/// The whole state of one countdown.
///
/// Invariants, upheld by every constructor and transition:
/// - `MIN_MINUTES * 60 <= duration <= MAX_MINUTES * 60`
/// - `remaining <= duration`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    remaining: u32,
    duration: u32,
    running: bool,
    theme: Theme,
    display_radius: u16,
}

impl Default for TimerState {
    fn default() -> Self {
        let duration = DEFAULT_MINUTES * SECONDS_PER_MINUTE;
        Self {
            remaining: duration,
            duration,
            running: false,
            theme: Theme::default(),
            display_radius: LARGE_RADIUS,
        }
    }
}

impl TimerState {
    /// Creates a paused countdown of `minutes` minutes.
    pub fn new(minutes: u32) -> Result<Self, DurationError> {
        let minutes = validate_minutes(i64::from(minutes))?;
        Ok(Self::default().with_duration_minutes(minutes))
    }

    /// Seconds left before completion.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Configured countdown length in seconds.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Configured countdown length in whole minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration / SECONDS_PER_MINUTE
    }

    /// Whether the countdown has been started and not paused since.
    ///
    /// This stays `true` after completion until the user pauses or resets.
    pub fn running(&self) -> bool {
        self.running
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Radius the presentation layer should draw the ring with.
    pub fn display_radius(&self) -> u16 {
        self.display_radius
    }

    pub fn phase(&self) -> Phase {
        if self.remaining == 0 {
            Phase::Completed
        } else if self.running {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    /// Whether a tick delivered now would advance the countdown.
    pub fn should_tick(&self) -> bool {
        self.running && self.remaining > 0
    }

    /// Checks the duration and remaining-time invariants.
    pub fn is_valid(&self) -> bool {
        let min = MIN_MINUTES * SECONDS_PER_MINUTE;
        let max = MAX_MINUTES * SECONDS_PER_MINUTE;
        (min..=max).contains(&self.duration) && self.remaining <= self.duration
    }

    /// Flips the running flag. At zero this has no visible effect until reset.
    #[must_use]
    pub fn toggled_running(self) -> Self {
        Self {
            running: !self.running,
            ..self
        }
    }

    /// Stops the countdown and refills it to the configured duration.
    #[must_use]
    pub fn reset(self) -> Self {
        Self {
            running: false,
            remaining: self.duration,
            ..self
        }
    }

    /// Sets both duration and remaining time to `minutes` minutes.
    ///
    /// `minutes` must already be validated; out-of-range values are pulled
    /// into range so the invariants survive a caller mistake. The running
    /// flag is left alone.
    #[must_use]
    pub fn with_duration_minutes(self, minutes: u32) -> Self {
        let seconds = minutes.clamp(MIN_MINUTES, MAX_MINUTES) * SECONDS_PER_MINUTE;
        Self {
            duration: seconds,
            remaining: seconds,
            ..self
        }
    }

    /// Advances the countdown by one second if it is ticking.
    #[must_use]
    pub fn ticked(self) -> (Self, TickOutcome) {
        if !self.should_tick() {
            return (self, TickOutcome::Ignored);
        }
        let remaining = self.remaining - 1;
        let outcome = if remaining == 0 {
            TickOutcome::Completed
        } else {
            TickOutcome::Advanced
        };
        (Self { remaining, ..self }, outcome)
    }

    #[must_use]
    pub fn with_theme_toggled(self) -> Self {
        Self {
            theme: self.theme.toggled(),
            ..self
        }
    }

    #[must_use]
    pub fn with_theme(self, theme: Theme) -> Self {
        Self { theme, ..self }
    }

    #[must_use]
    pub fn with_display_radius(self, display_radius: u16) -> Self {
        Self {
            display_radius,
            ..self
        }
    }
}

/// Checks that a minute count is inside `[MIN_MINUTES, MAX_MINUTES]`.
pub fn validate_minutes(minutes: i64) -> Result<u32, DurationError> {
    if minutes < i64::from(MIN_MINUTES) || minutes > i64::from(MAX_MINUTES) {
        return Err(DurationError::OutOfRange(minutes));
    }
    // Range checked above, so the cast is lossless.
    Ok(minutes as u32)
}
