//! Progress ring for the countdown screen.
//!
//! Two layers live here. The mapping functions ([`circumference`],
//! [`offset`], [`fraction_remaining`]) turn remaining time into the
//! stroke offset of a ring outline, the same number an SVG
//! `stroke-dashoffset` would take. [`Model`] then draws that ring with
//! character cells in the terminal.
//!
//! # Mapping
//!
//! ```rust
//! use ringtimer::progress::{circumference, offset};
//!
//! // Full ring at the start, empty ring at the end.
//! assert_eq!(offset(300, 300, 150.0), 0.0);
//! assert_eq!(offset(0, 300, 150.0), circumference(150.0));
//! ```
//!
//! # Rendering
//!
//! ```rust
//! use ringtimer::progress::{new, with_fill_characters};
//! use ringtimer::theme::Theme;
//!
//! let ring = new(&[with_fill_characters('●', '·')]);
//! let view = ring.view(45, 60, 100, Theme::Dark, "0:45");
//! assert!(!view.is_empty());
//! ```

use crate::theme::{Palette, Theme};
use std::f64::consts::PI;

/// Pixel radius represented by one character row of the drawn ring.
const PIXELS_PER_ROW: u16 = 15;
/// Smallest drawable ring, in rows from center to outline.
const MIN_ROWS: usize = 3;
/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;
const DEFAULT_THICKNESS: f64 = 0.6;

/// Length of a ring outline of the given radius.
pub fn circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

/// Share of the countdown still left, in `[0, 1]`.
///
/// `1.0` at the start and `0.0` at completion. A zero duration counts as
/// finished.
pub fn fraction_remaining(remaining: u32, duration: u32) -> f64 {
    if duration == 0 || remaining == 0 {
        return 0.0;
    }
    if remaining >= duration {
        return 1.0;
    }
    f64::from(remaining) / f64::from(duration)
}

/// Stroke offset that hides the elapsed share of the ring.
///
/// `0` draws the whole outline, the full circumference hides all of it.
/// Both ends are returned exactly, without going through the division.
pub fn offset(remaining: u32, duration: u32, radius: f64) -> f64 {
    let total = circumference(radius);
    if duration == 0 || remaining == 0 {
        return total;
    }
    if remaining >= duration {
        return 0.0;
    }
    total - fraction_remaining(remaining, duration) * total
}

/// Configuration applied by [`new`].
pub enum RingOption {
    WithFillCharacters(char, char),
    WithThickness(f64),
}

impl RingOption {
    fn apply(&self, m: &mut Model) {
        match self {
            RingOption::WithFillCharacters(full, empty) => {
                m.full = *full;
                m.empty = *empty;
            }
            RingOption::WithThickness(thickness) => {
                m.thickness = thickness.max(0.5);
            }
        }
    }
}

/// Uses `full` for the remaining arc and `empty` for the elapsed arc.
pub fn with_fill_characters(full: char, empty: char) -> RingOption {
    RingOption::WithFillCharacters(full, empty)
}

/// Sets the outline thickness in rows. Values below `0.5` leave gaps.
pub fn with_thickness(thickness: f64) -> RingOption {
    RingOption::WithThickness(thickness)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Blank,
    Filled,
    Elapsed,
    Label(char),
}

/// Character-cell ring renderer.
#[derive(Debug, Clone)]
pub struct Model {
    pub full: char,
    pub empty: char,
    pub thickness: f64,
}

/// Creates a ring renderer with the given options.
pub fn new(opts: &[RingOption]) -> Model {
    let mut m = Model {
        full: '█',
        empty: '░',
        thickness: DEFAULT_THICKNESS,
    };
    for opt in opts {
        opt.apply(&mut m);
    }
    m
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

/// Number of rows from the ring's center to its outline for a display radius.
pub fn rows_for_radius(radius: u16) -> usize {
    usize::from(radius / PIXELS_PER_ROW).max(MIN_ROWS)
}

impl Model {
    /// Renders the ring for the given countdown with `label` in its center.
    ///
    /// The remaining arc starts at twelve o'clock and runs clockwise; the
    /// elapsed share takes over from its far end as time passes.
    pub fn view(
        &self,
        remaining: u32,
        duration: u32,
        radius: u16,
        theme: Theme,
        label: &str,
    ) -> String {
        let rows = self.cells(remaining, duration, radius, label);
        let palette = theme.palette();
        rows.iter()
            .map(|row| render_row(row, self.full, self.empty, &palette))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Lays the ring out on a grid without styling.
    fn cells(&self, remaining: u32, duration: u32, radius: u16, label: &str) -> Vec<Vec<Cell>> {
        let r = rows_for_radius(radius);
        let height = 2 * r + 1;
        let center_x = (r as f64 * CELL_ASPECT).round() as usize;
        let width = 2 * center_x + 1;

        // Arc still drawn, as a share of the whole outline.
        let total = circumference(f64::from(radius));
        let drawn = if total > 0.0 {
            (total - offset(remaining, duration, f64::from(radius))) / total
        } else {
            0.0
        };

        let outline = r as f64 - 0.5;
        let mut grid = vec![vec![Cell::Blank; width]; height];
        for (y, row) in grid.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                let dy = y as f64 - r as f64;
                let dx = (x as f64 - center_x as f64) / CELL_ASPECT;
                let dist = (dx * dx + dy * dy).sqrt();
                if (dist - outline).abs() > self.thickness {
                    continue;
                }
                *cell = if clockwise_share(dx, dy) < drawn {
                    Cell::Filled
                } else {
                    Cell::Elapsed
                };
            }
        }

        let chars: Vec<char> = label.chars().collect();
        let start = center_x.saturating_sub(chars.len() / 2);
        for (i, c) in chars.into_iter().enumerate() {
            if let Some(cell) = grid[r].get_mut(start + i) {
                if *cell == Cell::Blank {
                    *cell = Cell::Label(c);
                }
            }
        }
        grid
    }
}

/// Angle of `(dx, dy)` clockwise from twelve o'clock, as a share of a turn.
fn clockwise_share(dx: f64, dy: f64) -> f64 {
    // Rows grow downwards, so "up" is negative dy.
    let angle = dx.atan2(-dy);
    let angle = if angle < 0.0 { angle + 2.0 * PI } else { angle };
    angle / (2.0 * PI)
}

fn render_row(row: &[Cell], full: char, empty: char, palette: &Palette) -> String {
    let fill = palette.fill_style();
    let track = palette.track_style();
    let text = palette.text_style().bold(true);
    let blank = palette.text_style();

    let mut out = String::new();
    for cell in row {
        let rendered = match cell {
            Cell::Blank => blank.render(" "),
            Cell::Filled => fill.render(&full.to_string()),
            Cell::Elapsed => track.render(&empty.to_string()),
            Cell::Label(c) => text.render(&c.to_string()),
        };
        out.push_str(&rendered);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(grid: &[Vec<Cell>], wanted: Cell) -> usize {
        grid.iter().flatten().filter(|c| **c == wanted).count()
    }

    #[test]
    fn test_offset_boundaries_exact() {
        for radius in [1.0, 100.0, 150.0, 0.25] {
            assert_eq!(offset(60, 60, radius), 0.0);
            assert_eq!(offset(0, 60, radius), 2.0 * PI * radius);
        }
    }

    #[test]
    fn test_offset_midpoint() {
        let c = circumference(100.0);
        assert!((offset(30, 60, 100.0) - c / 2.0).abs() < 1e-9);
        assert!((offset(45, 60, 100.0) - c / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_zero_duration_is_empty_ring() {
        assert_eq!(offset(0, 0, 10.0), circumference(10.0));
    }

    #[test]
    fn test_fraction_remaining() {
        assert_eq!(fraction_remaining(60, 60), 1.0);
        assert_eq!(fraction_remaining(0, 60), 0.0);
        assert_eq!(fraction_remaining(15, 60), 0.25);
    }

    #[test]
    fn test_rows_for_radius() {
        assert_eq!(rows_for_radius(150), 10);
        assert_eq!(rows_for_radius(100), 6);
        assert_eq!(rows_for_radius(10), MIN_ROWS);
    }

    #[test]
    fn test_full_ring_has_no_elapsed_cells() {
        let grid = new(&[]).cells(60, 60, 100, "");
        assert!(count(&grid, Cell::Filled) > 0);
        assert_eq!(count(&grid, Cell::Elapsed), 0);
    }

    #[test]
    fn test_empty_ring_has_no_filled_cells() {
        let grid = new(&[]).cells(0, 60, 100, "");
        assert_eq!(count(&grid, Cell::Filled), 0);
        assert!(count(&grid, Cell::Elapsed) > 0);
    }

    #[test]
    fn test_half_ring_fills_right_side() {
        let grid = new(&[]).cells(30, 60, 150, "");
        let r = rows_for_radius(150);
        let row = &grid[r];
        // Three o'clock is inside the remaining half, nine o'clock is not.
        let right = row.iter().rposition(|c| *c != Cell::Blank).unwrap();
        let left = row.iter().position(|c| *c != Cell::Blank).unwrap();
        assert_eq!(row[right], Cell::Filled);
        assert_eq!(row[left], Cell::Elapsed);
    }

    #[test]
    fn test_label_is_centered() {
        let grid = new(&[]).cells(65, 120, 150, "1:05");
        let r = rows_for_radius(150);
        let label: String = grid[r]
            .iter()
            .filter_map(|c| match c {
                Cell::Label(ch) => Some(*ch),
                _ => None,
            })
            .collect();
        assert_eq!(label, "1:05");
    }

    #[test]
    fn test_view_has_one_line_per_row() {
        let view = new(&[]).view(10, 60, 100, Theme::Light, "0:10");
        assert_eq!(view.lines().count(), 2 * rows_for_radius(100) + 1);
    }

    #[test]
    fn test_options_apply() {
        let ring = new(&[with_fill_characters('#', '.'), with_thickness(0.1)]);
        assert_eq!(ring.full, '#');
        assert_eq!(ring.empty, '.');
        assert_eq!(ring.thickness, 0.5);
    }
}
