//! Countdown timer component for bubbletea-rs applications.
//!
//! [`Model`] owns one [`TimerState`] and drives it with one-second ticks.
//! Ticks are one-shot commands: each accepted tick schedules the next, and
//! only while the countdown is running with time left. Any intent that
//! changes what the next tick would do invalidates the tick already in
//! flight, so a pause, reset or duration change is never followed by a
//! stale decrement.
//!
//! When the last second is taken the model calls its [`Notifier`] once and
//! emits a [`TimeoutMsg`].
//!
//! # Basic Usage
//!
//! ```rust
//! use ringtimer::timer::{new, new_with_interval};
//! use std::time::Duration;
//!
//! // A paused five-minute countdown ticking once a second.
//! let timer = new(5).unwrap();
//! assert_eq!(timer.view(), "5:00");
//! assert!(!timer.running());
//!
//! // A faster tick, handy for demos.
//! let timer = new_with_interval(1, Duration::from_millis(100)).unwrap();
//! assert_eq!(timer.interval, Duration::from_millis(100));
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg, Cmd};
//! use ringtimer::intent::Intent;
//! use ringtimer::timer::{Model, TimeoutMsg};
//!
//! struct MyApp {
//!     timer: Model,
//! }
//!
//! impl BubbleTeaModel for MyApp {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut timer = Model::default();
//!         let cmd = timer.apply(Intent::StartPause);
//!         (Self { timer }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(timeout) = msg.downcast_ref::<TimeoutMsg>() {
//!             if timeout.id == self.timer.id() {
//!                 // Countdown finished.
//!             }
//!         }
//!         self.timer.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("{} {}", self.timer.view(), self.timer.status())
//!     }
//! }
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::DurationError;
use crate::format::{format_clock, Status};
use crate::intent::{self, Intent};
use crate::notify::{Notifier, NotifierHandle};
use crate::state::{Phase, TickOutcome, TimerState};

/// Default time between ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

// Internal ID management for timer instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message delivered by a scheduled tick.
///
/// The tag records which generation of the countdown scheduled the tick.
/// A tick from an older generation is dropped.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The timer that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// Sent once when a countdown reaches zero.
#[derive(Debug, Clone)]
pub struct TimeoutMsg {
    pub id: i64,
}

/// Routes an [`Intent`] to a timer through the message loop.
///
/// An `id` of `0` addresses every timer.
#[derive(Debug, Clone)]
pub struct IntentMsg {
    pub id: i64,
    pub intent: Intent,
}

/// Countdown component.
#[derive(Debug, Clone)]
pub struct Model {
    /// Time between ticks. Each tick takes one second off the countdown
    /// whatever this is set to.
    pub interval: Duration,
    id: i64,
    tag: i64,
    state: TimerState,
    notifier: NotifierHandle,
}

/// Creates a paused countdown of `minutes` minutes with custom tick spacing.
pub fn new_with_interval(minutes: u32, interval: Duration) -> Result<Model, DurationError> {
    Ok(from_state(TimerState::new(minutes)?, interval))
}

/// Creates a paused countdown of `minutes` minutes ticking once a second.
pub fn new(minutes: u32) -> Result<Model, DurationError> {
    new_with_interval(minutes, DEFAULT_INTERVAL)
}

/// Wraps an existing state. The countdown resumes ticking on [`Model::init`]
/// if the state is running.
pub fn from_state(state: TimerState, interval: Duration) -> Model {
    Model {
        interval,
        id: next_id(),
        tag: 0,
        state,
        notifier: NotifierHandle::default(),
    }
}

impl Model {
    /// Replaces the completion notifier.
    pub fn with_notifier<N: Notifier + 'static>(mut self, notifier: N) -> Self {
        self.notifier = NotifierHandle::new(notifier);
        self
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// The current state value.
    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn running(&self) -> bool {
        self.state.running()
    }

    /// Whether the countdown has reached zero.
    pub fn completed(&self) -> bool {
        self.state.phase() == Phase::Completed
    }

    /// The tick message the outstanding tick will deliver, if one should be
    /// outstanding.
    ///
    /// Lets a host drive the countdown without real timers.
    pub fn pending_tick(&self) -> Option<TickMsg> {
        if !self.state.should_tick() {
            return None;
        }
        Some(TickMsg {
            id: self.id,
            tag: self.tag,
        })
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn timed_out(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(TimeoutMsg { id }) as Msg
        })
    }

    /// Returns a command that delivers `intent` to this timer.
    pub fn send(&self, intent: Intent) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(IntentMsg {
                id,
                intent: intent.clone(),
            }) as Msg
        })
    }

    /// Returns a command that starts or pauses this timer.
    pub fn toggle(&self) -> Cmd {
        self.send(Intent::StartPause)
    }

    /// Applies an intent right away and returns the next tick, if any.
    pub fn apply(&mut self, intent: Intent) -> Option<Cmd> {
        let before = self.state;
        self.state = intent::apply(before, &intent);
        if !intent.supersedes_ticks() || self.state == before {
            return None;
        }

        // Drop whatever tick is in flight for the old state.
        self.tag += 1;
        debug!(
            "Timer {}: {:?} -> remaining={} running={}",
            self.id,
            intent,
            self.state.remaining(),
            self.state.running()
        );
        if self.state.should_tick() {
            Some(self.tick())
        } else {
            None
        }
    }

    /// Starts ticking if the wrapped state is already running.
    pub fn init(&self) -> Option<Cmd> {
        if self.state.should_tick() {
            Some(self.tick())
        } else {
            None
        }
    }

    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(intent_msg) = msg.downcast_ref::<IntentMsg>() {
            if intent_msg.id != 0 && intent_msg.id != self.id {
                return None;
            }
            return self.apply(intent_msg.intent.clone());
        }

        if let Some(tick_msg) = msg.downcast_ref::<TickMsg>() {
            if tick_msg.id != self.id || tick_msg.tag != self.tag {
                return None;
            }

            let (next, outcome) = self.state.ticked();
            self.state = next;
            return match outcome {
                TickOutcome::Ignored => None,
                TickOutcome::Advanced => Some(self.tick()),
                TickOutcome::Completed => Some(self.complete()),
            };
        }

        None
    }

    fn complete(&self) -> Cmd {
        info!(
            "Timer {}: countdown of {} finished",
            self.id,
            format_clock(self.state.duration())
        );
        if let Err(err) = self.notifier.notify() {
            warn!("Timer {}: notification failed: {}", self.id, err);
        }
        self.timed_out()
    }

    /// The `M:SS` readout.
    pub fn view(&self) -> String {
        format_clock(self.state.remaining())
    }

    pub fn status(&self) -> Status {
        Status::of(&self.state)
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let model = Model::default();
        let cmd = model.init();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        from_state(TimerState::default(), DEFAULT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifyError;
    use crate::theme::Theme;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Counting(Arc<AtomicUsize>);

    impl Counting {
        fn calls(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl Notifier for Counting {
        fn notify(&self) -> Result<(), NotifyError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct Broken;

    impl Notifier for Broken {
        fn notify(&self) -> Result<(), NotifyError> {
            Err(NotifyError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no audio device",
            )))
        }
    }

    fn tick_of(timer: &Model) -> Msg {
        Box::new(TickMsg {
            id: timer.id(),
            tag: timer.tag,
        })
    }

    #[test]
    fn test_new_is_paused() {
        let timer = new(3).unwrap();
        assert_eq!(timer.state().remaining(), 180);
        assert_eq!(timer.interval, DEFAULT_INTERVAL);
        assert!(!timer.running());
        assert!(timer.init().is_none());
        assert!(timer.pending_tick().is_none());
    }

    #[test]
    fn test_new_rejects_bad_minutes() {
        assert!(new(0).is_err());
        assert!(new_with_interval(121, Duration::from_millis(5)).is_err());
    }

    #[test]
    fn test_unique_ids() {
        let a = Model::default();
        let b = Model::default();
        assert_ne!(a.id(), b.id());
        assert!(a.id() > 0);
    }

    #[test]
    fn test_start_schedules_tick() {
        let mut timer = Model::default();
        assert!(timer.apply(Intent::StartPause).is_some());
        assert!(timer.running());
        assert!(timer.pending_tick().is_some());
    }

    #[test]
    fn test_tick_decrements_and_reschedules() {
        let mut timer = Model::default();
        timer.apply(Intent::StartPause);
        let cmd = timer.update(tick_of(&timer));
        assert!(cmd.is_some());
        assert_eq!(timer.state().remaining(), 59);
        assert_eq!(timer.view(), "0:59");
    }

    #[test]
    fn test_tick_for_other_timer_ignored() {
        let mut timer = Model::default();
        timer.apply(Intent::StartPause);
        let stray = Box::new(TickMsg {
            id: timer.id() + 999,
            tag: timer.tag,
        });
        assert!(timer.update(stray).is_none());
        assert_eq!(timer.state().remaining(), 60);
    }

    #[test]
    fn test_stale_tick_after_pause_is_dropped() {
        let mut timer = Model::default();
        timer.apply(Intent::StartPause);
        let stale = tick_of(&timer);

        timer.apply(Intent::StartPause);
        assert!(timer.update(stale).is_none());
        assert_eq!(timer.state().remaining(), 60);
    }

    #[test]
    fn test_stale_tick_after_pause_and_resume_is_dropped() {
        let mut timer = Model::default();
        timer.apply(Intent::StartPause);
        let stale = tick_of(&timer);
        timer.apply(Intent::StartPause);
        timer.apply(Intent::StartPause);

        assert!(timer.running());
        assert!(timer.update(stale).is_none());
        assert_eq!(timer.state().remaining(), 60);

        // The tick scheduled by the resume is honoured.
        assert!(timer.update(tick_of(&timer)).is_some());
        assert_eq!(timer.state().remaining(), 59);
    }

    #[test]
    fn test_stale_tick_after_duration_change_is_dropped() {
        let mut timer = Model::default();
        timer.apply(Intent::StartPause);
        let stale = tick_of(&timer);

        let cmd = timer.apply(Intent::SetDuration("2".into()));
        assert!(cmd.is_some(), "still running, so a fresh tick is scheduled");
        assert!(timer.update(stale).is_none());
        assert_eq!(timer.state().remaining(), 120);
    }

    #[test]
    fn test_rejected_duration_keeps_tick_alive() {
        let mut timer = Model::default();
        timer.apply(Intent::StartPause);
        let live = tick_of(&timer);

        assert!(timer.apply(Intent::SetDuration("500".into())).is_none());
        assert!(timer.update(live).is_some());
        assert_eq!(timer.state().remaining(), 59);
    }

    #[test]
    fn test_theme_and_resize_keep_tick_alive() {
        let mut timer = Model::default();
        timer.apply(Intent::StartPause);
        let live = tick_of(&timer);

        assert!(timer.apply(Intent::ToggleTheme).is_none());
        assert!(timer.apply(Intent::Resize { width: 320 }).is_none());
        assert_eq!(timer.state().theme(), Theme::Light);
        assert_eq!(timer.state().display_radius(), 100);
        assert!(timer.update(live).is_some());
    }

    #[test]
    fn test_completion_notifies_once() {
        let counter = Counting::default();
        let mut timer = Model::default().with_notifier(counter.clone());
        timer.apply(Intent::StartPause);

        while let Some(tick) = timer.pending_tick() {
            timer.update(Box::new(tick));
        }

        assert_eq!(timer.state().remaining(), 0);
        assert!(timer.completed());
        assert!(timer.running());
        assert_eq!(timer.status(), Status::Alert);
        assert_eq!(counter.calls(), 1);

        // Further ticks, pauses and resumes never re-fire the chime.
        assert!(timer.update(tick_of(&timer)).is_none());
        timer.apply(Intent::StartPause);
        timer.apply(Intent::StartPause);
        assert!(timer.pending_tick().is_none());
        assert_eq!(counter.calls(), 1);
    }

    #[test]
    fn test_reset_after_completion_allows_new_chime() {
        let counter = Counting::default();
        let mut timer = Model::default().with_notifier(counter.clone());
        for _ in 0..2 {
            timer.apply(Intent::StartPause);
            while let Some(tick) = timer.pending_tick() {
                timer.update(Box::new(tick));
            }
            timer.apply(Intent::Reset);
            assert_eq!(timer.state().remaining(), 60);
            assert!(!timer.running());
        }
        assert_eq!(counter.calls(), 2);
    }

    #[test]
    fn test_notifier_failure_does_not_disturb_state() {
        let mut timer = Model::default().with_notifier(Broken);
        timer.apply(Intent::StartPause);
        while let Some(tick) = timer.pending_tick() {
            timer.update(Box::new(tick));
        }
        assert_eq!(timer.state().remaining(), 0);
        assert!(timer.state().is_valid());
    }

    #[test]
    fn test_intent_msg_routing() {
        let mut timer = Model::default();
        let other = IntentMsg {
            id: timer.id() + 1,
            intent: Intent::Reset,
        };
        timer.apply(Intent::StartPause);
        assert!(timer.update(Box::new(other)).is_none());
        assert!(timer.running());

        let broadcast = IntentMsg {
            id: 0,
            intent: Intent::StartPause,
        };
        timer.update(Box::new(broadcast));
        assert!(!timer.running());
    }

    #[test]
    fn test_init_resumes_running_state() {
        let state = TimerState::default().toggled_running();
        let timer = from_state(state, Duration::from_millis(10));
        assert!(timer.init().is_some());
    }

    #[tokio::test]
    async fn test_tick_command_delivers_tick() {
        let mut timer = new_with_interval(1, Duration::from_millis(5)).unwrap();
        let cmd = timer.apply(Intent::StartPause).expect("tick scheduled");
        let msg = cmd.await.expect("tick message");
        assert!(msg.downcast_ref::<TickMsg>().is_some());
        assert!(timer.update(msg).is_some());
        assert_eq!(timer.state().remaining(), 59);
    }

    #[tokio::test]
    async fn test_send_delivers_intent() {
        let mut timer = Model::default();
        let msg = timer.toggle().await.expect("intent message");
        timer.update(msg);
        assert!(timer.running());
    }
}
