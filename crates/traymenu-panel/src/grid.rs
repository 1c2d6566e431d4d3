#![forbid(unsafe_code)]

//! In-memory [`TabularView`] implementation.
//!
//! [`MemoryGrid`] models the host's virtualized grid closely enough to drive
//! the panel engine headless: rows have fixed measured sizes, scrolling is by
//! whole rows, and row rectangles are reported relative to the first
//! displayed row. It also counts measurement passes so callers can check that
//! expensive re-measurement does not happen.

use traymenu_core::color::Rgb;
use traymenu_core::geometry::{Rect, Size};

use crate::view::TabularView;

/// Measured content of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRow {
    /// Width needed by the icon column.
    pub icon_width: i32,
    /// Width needed by the name column.
    pub name_width: i32,
    /// Row height after fitting.
    pub height: i32,
}

impl GridRow {
    pub const fn new(icon_width: i32, name_width: i32, height: i32) -> Self {
        Self {
            icon_width,
            name_width,
            height,
        }
    }
}

/// A headless grid with two content columns.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    rows: Vec<GridRow>,
    first_displayed: usize,
    viewport: Size,
    column_widths: [i32; 2],
    double_buffered: bool,
    selection_colors: Option<(Rgb, Rgb)>,
    row_fit_passes: usize,
    column_fit_passes: usize,
}

impl MemoryGrid {
    /// Create a grid holding `rows`.
    #[must_use]
    pub fn new(rows: Vec<GridRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// `count` identical rows.
    #[must_use]
    pub fn uniform(count: usize, row: GridRow) -> Self {
        Self::new(vec![row; count])
    }

    /// Replace the rows, as when the underlying folder changes.
    pub fn set_rows(&mut self, rows: Vec<GridRow>) {
        self.rows = rows;
        self.first_displayed = self.first_displayed.min(self.rows.len().saturating_sub(1));
    }

    /// Drop rows past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.rows.truncate(len);
        self.first_displayed = self.first_displayed.min(self.rows.len().saturating_sub(1));
    }

    /// Current viewport size.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Icon and name column widths from the last fast fit.
    #[must_use]
    pub fn column_widths(&self) -> [i32; 2] {
        self.column_widths
    }

    /// Whether double buffering was switched on.
    #[must_use]
    pub fn is_double_buffered(&self) -> bool {
        self.double_buffered
    }

    /// Selection background/foreground, if set.
    #[must_use]
    pub fn selection_colors(&self) -> Option<(Rgb, Rgb)> {
        self.selection_colors
    }

    /// How many times `auto_fit_rows` ran.
    #[must_use]
    pub fn row_fit_passes(&self) -> usize {
        self.row_fit_passes
    }

    /// How many times `fast_auto_fit_columns` ran.
    #[must_use]
    pub fn column_fit_passes(&self) -> usize {
        self.column_fit_passes
    }

    fn row_top(&self, row: usize) -> i32 {
        if row >= self.first_displayed {
            self.rows[self.first_displayed..row]
                .iter()
                .map(|r| r.height)
                .sum()
        } else {
            -self.rows[row..self.first_displayed]
                .iter()
                .map(|r| r.height)
                .sum::<i32>()
        }
    }
}

impl TabularView for MemoryGrid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn first_displayed_row(&self) -> usize {
        self.first_displayed
    }

    fn set_first_displayed_row(&mut self, index: usize) {
        self.first_displayed = index.min(self.rows.len().saturating_sub(1));
    }

    fn auto_fit_rows(&mut self) -> i32 {
        self.row_fit_passes += 1;
        self.rows.iter().map(|r| r.height).sum()
    }

    fn fast_auto_fit_columns(&mut self) -> i32 {
        self.column_fit_passes += 1;
        let icon = self.rows.iter().map(|r| r.icon_width).max().unwrap_or(0);
        let name = self.rows.iter().map(|r| r.name_width).max().unwrap_or(0);
        self.column_widths = [icon, name];
        icon + name
    }

    fn row_rect(&self, row: usize) -> Option<Rect> {
        let height = self.rows.get(row)?.height;
        let width = self.column_widths[0] + self.column_widths[1];
        Some(Rect::new(0, self.row_top(row), width, height))
    }

    fn set_viewport_size(&mut self, size: Size) {
        self.viewport = size;
    }

    fn set_double_buffered(&mut self, enabled: bool) {
        self.double_buffered = enabled;
    }

    fn set_selection_colors(&mut self, background: Rgb, foreground: Rgb) {
        self.selection_colors = Some((background, foreground));
    }
}
