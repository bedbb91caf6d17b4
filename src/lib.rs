#![doc(html_root_url = "https://docs.rs/ringtimer/")]

//! # ringtimer
//!
//! A single-screen countdown timer for the terminal, built on
//! [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs). Set a
//! duration, start, pause or reset it, and watch a ring empty as the time
//! runs out. A light/dark theme toggle and a bell at zero round it off.
//!
//! ## Architecture
//!
//! The countdown engine is plain data plus pure functions, wrapped in a
//! bubbletea component:
//!
//! - [`state`]: the [`TimerState`] value and its transitions
//! - [`intent`]: user and environment requests mapped to new state
//! - [`timer`]: the component that ticks the state once a second, drops
//!   superseded ticks and rings the [`notify`] collaborator at zero
//! - [`progress`]: remaining time mapped onto a ring outline, and a
//!   character-cell ring renderer
//! - [`format`]: the `M:SS` readout and status line
//!
//! [`app`] is the full-screen program the `ringtimer` binary runs.
//!
//! ## Driving the engine by hand
//!
//! ```rust
//! use ringtimer::prelude::*;
//!
//! let mut timer = timer_new(1).unwrap().with_notifier(Silent);
//! timer.apply(Intent::StartPause);
//!
//! // A host would deliver these after one second each.
//! for _ in 0..10 {
//!     let tick = timer.pending_tick().unwrap();
//!     timer.update(Box::new(tick));
//! }
//! assert_eq!(timer.view(), "0:50");
//! assert_eq!(timer.status(), Status::CountingDown);
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod format;
pub mod help;
pub mod intent;
pub mod key;
pub mod notify;
pub mod progress;
pub mod state;
pub mod theme;
pub mod timer;

pub use error::{ConfigError, DurationError, NotifyError};
pub use format::{format_clock, Status};
pub use intent::Intent;
pub use progress::{circumference, offset};
pub use state::{Phase, TimerState};
pub use theme::Theme;
pub use timer::{
    new as timer_new, new_with_interval as timer_new_with_interval, Model as Timer,
    TickMsg as TimerTickMsg, TimeoutMsg as TimerTimeoutMsg,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::format::{format_clock, Status};
    pub use crate::intent::{apply, Intent};
    pub use crate::notify::{Notifier, Silent, TerminalBell};
    pub use crate::progress::{circumference, fraction_remaining, offset};
    pub use crate::state::{Phase, TickOutcome, TimerState};
    pub use crate::theme::Theme;
    pub use crate::timer::{
        new as timer_new, new_with_interval as timer_new_with_interval, IntentMsg,
        Model as Timer, TickMsg as TimerTickMsg, TimeoutMsg as TimerTimeoutMsg,
    };
}
