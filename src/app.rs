//! The countdown screen: a bubbletea-rs program model around the timer.
//!
//! [`App`] turns key presses and terminal resizes into [`Intent`]s for the
//! timer and draws the ring, readout, status line, duration field and help.

use bubbletea_rs::{quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use crossterm::event::KeyCode;
use lipgloss_extras::lipgloss;
use once_cell::sync::OnceCell;

use crate::config::Settings;
use crate::format::control_glyph;
use crate::help;
use crate::intent::Intent;
use crate::key::TimerKeyMap;
use crate::progress;
use crate::state::MAX_MINUTES;
use crate::theme::{Palette, Theme};
use crate::timer;

/// Approximate pixel width of one terminal cell, used for the ring breakpoint.
pub const CELL_PIXELS: u32 = 8;
/// Longest minute entry accepted in the duration field.
const MAX_ENTRY_DIGITS: usize = 3;

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Hands settings to the next [`App`] created through `BubbleTeaModel::init`.
///
/// Returns `false` if settings were already installed.
pub fn install_settings(settings: Settings) -> bool {
    SETTINGS.set(settings).is_ok()
}

/// Converts a terminal width in cells to an approximate width in pixels.
pub fn cells_to_pixels(cells: u16) -> u32 {
    u32::from(cells) * CELL_PIXELS
}

pub struct App {
    timer: timer::Model,
    keys: TimerKeyMap,
    help: help::Model,
    ring: progress::Model,
    /// Text typed into the duration field while it is being edited.
    entry: Option<String>,
    width: u16,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        Self {
            timer: settings.timer(),
            keys: TimerKeyMap::default(),
            help: help::Model::new(),
            ring: progress::new(&[]),
            entry: None,
            width: 0,
        }
    }

    pub fn timer(&self) -> &timer::Model {
        &self.timer
    }

    /// Whether the duration field is being edited.
    pub fn editing(&self) -> bool {
        self.entry.is_some()
    }

    fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        if self.entry.is_some() {
            return self.handle_entry_key(key);
        }

        let keys = &self.keys;
        if keys.quit.matches(key) {
            return Some(quit());
        }
        if keys.start_pause.matches(key) {
            return self.timer.apply(Intent::StartPause);
        }
        if keys.reset.matches(key) {
            return self.timer.apply(Intent::Reset);
        }
        if keys.theme.matches(key) {
            return self.timer.apply(Intent::ToggleTheme);
        }
        if keys.longer.matches(key) {
            return self.timer.apply(Intent::StepDuration(1));
        }
        if keys.shorter.matches(key) {
            return self.timer.apply(Intent::StepDuration(-1));
        }
        if keys.edit_duration.matches(key) {
            self.entry = Some(String::new());
            return None;
        }
        if keys.help.matches(key) {
            self.help.show_all = !self.help.show_all;
        }
        None
    }

    fn handle_entry_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        // Quitting works from inside the field too.
        if key.key != KeyCode::Char('q') && self.keys.quit.matches(key) {
            return Some(quit());
        }
        let entry = self.entry.as_mut()?;
        match key.key {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if entry.len() < MAX_ENTRY_DIGITS {
                    entry.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                entry.pop();
                None
            }
            KeyCode::Esc => {
                self.entry = None;
                None
            }
            KeyCode::Enter => {
                let raw = self.entry.take().unwrap_or_default();
                self.timer.apply(Intent::SetDuration(raw))
            }
            _ => None,
        }
    }

    fn handle_resize(&mut self, size: &WindowSizeMsg) -> Option<Cmd> {
        self.width = size.width;
        self.help.width = usize::from(size.width);
        self.timer.apply(Intent::Resize {
            width: cells_to_pixels(size.width),
        })
    }

    fn duration_field(&self, palette: &Palette) -> String {
        let label = palette.muted_style().render("Set Duration (minutes): ");
        let value = match &self.entry {
            Some(entry) => format!("{}▏", entry),
            None => self.timer.state().duration_minutes().to_string(),
        };
        let hint = if self.entry.is_some() {
            palette
                .muted_style()
                .render(&format!("  (1-{}, enter to apply)", MAX_MINUTES))
        } else {
            String::new()
        };
        format!("{}{}{}", label, palette.text_style().render(&value), hint)
    }

    /// Pads `line` on the left so it sits in the middle of the terminal.
    fn center(&self, line: &str, palette: &Palette) -> String {
        let width = usize::from(self.width);
        let visible = lipgloss::width_visible(line);
        if width <= visible {
            return line.to_string();
        }
        let pad = (width - visible) / 2;
        format!("{}{}", palette.text_style().render(&" ".repeat(pad)), line)
    }
}

impl BubbleTeaModel for App {
    fn init() -> (Self, Option<Cmd>) {
        let settings = SETTINGS.get().cloned().unwrap_or_default();
        let app = App::new(&settings);
        let cmd = app.timer.init();
        (app, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key);
        }
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            return self.handle_resize(size);
        }
        self.timer.update(msg)
    }

    fn view(&self) -> String {
        let state = self.timer.state();
        let palette = state.theme().palette();
        let readout = self.timer.view();

        let mut lines: Vec<String> = self
            .ring
            .view(
                state.remaining(),
                state.duration(),
                state.display_radius(),
                state.theme(),
                &readout,
            )
            .lines()
            .map(str::to_string)
            .collect();

        lines.push(String::new());
        lines.push(palette.text_style().bold(true).render(&format!(
            "[{}]  [↺]",
            control_glyph(state.running())
        )));
        lines.push(palette.text_style().render(&self.timer.status().to_string()));
        lines.push(String::new());
        lines.push(self.duration_field(&palette));
        lines.push(palette.muted_style().render(&format!(
            "Dark Theme: {}",
            if state.theme() == Theme::Dark {
                "on"
            } else {
                "off"
            }
        )));
        lines.push(String::new());
        for help_line in self.help.view(&self.keys, state.theme()).lines() {
            lines.push(help_line.to_string());
        }

        lines
            .iter()
            .map(|line| self.center(line, &palette))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
