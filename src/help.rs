//! Help line listing the timer's key bindings.
//!
//! Renders a compact single line (`space start/pause • r reset • …`) or,
//! with [`Model::show_all`], one column per binding group. Content wider
//! than [`Model::width`] is cut off with an ellipsis.

use crate::key::{Binding, KeyMap};
use crate::theme::Theme;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

#[derive(Debug, Clone)]
pub struct Model {
    /// Show every group in columns instead of the short line.
    pub show_all: bool,
    /// Maximum rendered width. Zero means unlimited.
    pub width: usize,
    pub short_separator: String,
    pub full_separator: String,
    pub ellipsis: String,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            show_all: false,
            width: 0,
            short_separator: " • ".to_string(),
            full_separator: "    ".to_string(),
            ellipsis: "…".to_string(),
        }
    }
}

struct Styles {
    key: Style,
    desc: Style,
    separator: Style,
}

impl Styles {
    fn for_theme(theme: Theme) -> Self {
        let palette = theme.palette();
        Self {
            key: palette.text_style(),
            desc: palette.muted_style(),
            separator: palette.muted_style(),
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn view<K: KeyMap>(&self, keymap: &K, theme: Theme) -> String {
        let styles = Styles::for_theme(theme);
        if self.show_all {
            self.full_help_view(keymap.full_help(), &styles)
        } else {
            self.short_help_view(keymap.short_help(), &styles)
        }
    }

    fn short_help_view(&self, bindings: Vec<&Binding>, styles: &Styles) -> String {
        let separator = styles
            .separator
            .clone()
            .inline(true)
            .render(&self.short_separator);

        let mut builder = String::new();
        let mut total_width = 0;
        for kb in bindings.iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = kb.help();
            let item = format!(
                "{}{}{}{}",
                sep,
                styles.key.clone().inline(true).render(&help.key),
                styles.desc.clone().inline(true).render(" "),
                styles.desc.clone().inline(true).render(&help.desc)
            );
            let item_width = lipgloss::width_visible(&item);

            if let Some(tail) = self.should_add_item(total_width, item_width, styles) {
                builder.push_str(&tail);
                break;
            }
            total_width += item_width;
            builder.push_str(&item);
        }
        builder
    }

    fn full_help_view(&self, groups: Vec<Vec<&Binding>>, styles: &Styles) -> String {
        let separator = styles
            .separator
            .clone()
            .inline(true)
            .render(&self.full_separator);

        let mut columns = Vec::new();
        let mut total_width = 0;
        for group in groups.iter().filter(|g| g.iter().any(|b| b.enabled())) {
            let rows: Vec<String> = group
                .iter()
                .filter(|b| b.enabled())
                .map(|b| {
                    let help = b.help();
                    format!(
                        "{} {}",
                        styles.key.clone().inline(true).render(&help.key),
                        styles.desc.clone().inline(true).render(&help.desc)
                    )
                })
                .collect();
            let column = rows.join("\n");
            let col_width = lipgloss::width_visible(&column);

            if let Some(tail) = self.should_add_item(total_width, col_width, styles) {
                if !tail.is_empty() {
                    columns.push(tail);
                }
                break;
            }
            total_width += col_width;
            columns.push(column);
        }

        let mut parts = Vec::new();
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                parts.push(separator.as_str());
            }
            parts.push(col.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }

    /// Returns the tail to append instead of an item that does not fit.
    fn should_add_item(
        &self,
        total_width: usize,
        item_width: usize,
        styles: &Styles,
    ) -> Option<String> {
        if self.width == 0 || total_width + item_width <= self.width {
            return None;
        }
        let tail = format!(
            " {}",
            styles.separator.clone().inline(true).render(&self.ellipsis)
        );
        if total_width + lipgloss::width_visible(&tail) < self.width {
            return Some(tail);
        }
        Some(String::new())
    }
}
