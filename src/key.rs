//! Key bindings for the countdown screen.
//!
//! A [`Binding`] pairs one or more key presses with the help text shown for
//! them. [`TimerKeyMap`] holds every binding the timer screen reacts to.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A key plus the modifiers that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text for a binding: the key as shown, and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    pub key: String,
    pub desc: String,
}

#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    enabled: bool,
}

impl Binding {
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            enabled: true,
        }
    }

    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    pub fn help(&self) -> &Help {
        &self.help
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether `msg` is one of this binding's key presses.
    ///
    /// Shift is ignored for character keys, since the character itself
    /// already reflects it.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled {
            return false;
        }
        self.keys.iter().any(|k| {
            if k.code != msg.key {
                return false;
            }
            let mods = if matches!(msg.key, KeyCode::Char(_)) {
                msg.modifiers.difference(KeyModifiers::SHIFT)
            } else {
                msg.modifiers
            };
            mods == k.modifiers
        })
    }
}

/// Bindings grouped for the help view.
pub trait KeyMap {
    /// Bindings shown in the one-line help.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings shown in the expanded help, one column per group.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Every key the timer screen understands.
#[derive(Debug, Clone)]
pub struct TimerKeyMap {
    pub start_pause: Binding,
    pub reset: Binding,
    pub theme: Binding,
    pub longer: Binding,
    pub shorter: Binding,
    pub edit_duration: Binding,
    pub help: Binding,
    pub quit: Binding,
}

impl Default for TimerKeyMap {
    fn default() -> Self {
        Self {
            start_pause: Binding::new(vec![KeyCode::Char(' '), KeyCode::Enter])
                .with_help("space", "start/pause"),
            reset: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
            theme: Binding::new(vec![KeyCode::Char('t')]).with_help("t", "theme"),
            longer: Binding::new(vec![KeyCode::Char('+'), KeyCode::Char('=')])
                .with_help("+", "1 min longer"),
            shorter: Binding::new(vec![KeyCode::Char('-')]).with_help("-", "1 min shorter"),
            edit_duration: Binding::new(vec![KeyCode::Char('d')]).with_help("d", "set duration"),
            help: Binding::new(vec![KeyCode::Char('?')]).with_help("?", "more"),
            quit: Binding::new(vec![
                KeyPress::from(KeyCode::Char('q')),
                KeyPress::from((KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ])
            .with_help("q", "quit"),
        }
    }
}

impl KeyMap for TimerKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.start_pause,
            &self.reset,
            &self.edit_duration,
            &self.help,
            &self.quit,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.start_pause, &self.reset],
            vec![&self.edit_duration, &self.longer, &self.shorter],
            vec![&self.theme, &self.help, &self.quit],
        ]
    }
}
