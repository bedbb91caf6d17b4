//! Completion notification.
//!
//! The timer calls a [`Notifier`] once when a countdown reaches zero. It does
//! not wait on the result and never retries: a failed chime is logged and
//! the countdown carries on as if it had played.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use crate::error::NotifyError;

/// Plays the default notification sound.
pub trait Notifier: Send + Sync {
    fn notify(&self) -> Result<(), NotifyError>;
}

/// Rings the terminal bell by writing BEL to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn notify(&self) -> Result<(), NotifyError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// Plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Notifier for Silent {
    fn notify(&self) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Shared handle to a notifier, cheap to clone along with the timer.
#[derive(Clone)]
pub struct NotifierHandle(Arc<dyn Notifier>);

impl NotifierHandle {
    pub fn new<N: Notifier + 'static>(notifier: N) -> Self {
        Self(Arc::new(notifier))
    }

    pub fn notify(&self) -> Result<(), NotifyError> {
        self.0.notify()
    }
}

impl Default for NotifierHandle {
    fn default() -> Self {
        Self::new(TerminalBell)
    }
}

impl fmt::Debug for NotifierHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NotifierHandle(..)")
    }
}
