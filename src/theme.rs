//! Display themes for the countdown screen.
//!
//! The timer ships with two palettes, dark and light. A theme only selects
//! colors; it never influences timing.
//!
//! ```rust
//! use ringtimer::theme::Theme;
//!
//! let theme = Theme::default();
//! assert_eq!(theme, Theme::Dark);
//! assert_eq!(theme.toggled(), Theme::Light);
//! assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
//! ```

use lipgloss_extras::lipgloss::{Color, Style};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// The two display themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light text on a dark background. This is the startup theme.
    #[default]
    Dark,
    /// Dark text on a light background.
    Light,
}

impl Theme {
    /// Returns the other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Returns the string form used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Returns the color palette for this theme.
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: "#282c34",
                text: "#61dafb",
                track: "#dddddd",
                fill: "#61dafb",
                muted: "#626262",
            },
            Theme::Light => Palette {
                background: "#f0f0f0",
                text: "#007BFF",
                track: "#cccccc",
                fill: "#007BFF",
                muted: "#909090",
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a theme name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}', expected 'dark' or 'light'")]
pub struct ParseThemeError(pub String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(ParseThemeError(s.to_string())),
        }
    }
}

/// Hex colors used to paint one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background.
    pub background: &'static str,
    /// Readout and status text.
    pub text: &'static str,
    /// The unfilled part of the ring.
    pub track: &'static str,
    /// The filled part of the ring.
    pub fill: &'static str,
    /// Secondary text such as help and labels.
    pub muted: &'static str,
}

impl Palette {
    /// Style for primary text drawn on the theme background.
    pub fn text_style(&self) -> Style {
        Style::new()
            .foreground(Color::from(self.text))
            .background(Color::from(self.background))
    }

    /// Style for secondary text.
    pub fn muted_style(&self) -> Style {
        Style::new()
            .foreground(Color::from(self.muted))
            .background(Color::from(self.background))
    }

    /// Style for a filled ring cell.
    pub fn fill_style(&self) -> Style {
        Style::new()
            .foreground(Color::from(self.fill))
            .background(Color::from(self.background))
    }

    /// Style for an unfilled ring cell.
    pub fn track_style(&self) -> Style {
        Style::new()
            .foreground(Color::from(self.track))
            .background(Color::from(self.background))
    }
}
