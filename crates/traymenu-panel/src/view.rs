#![forbid(unsafe_code)]

//! The tabular view capability a panel draws its rows into.
//!
//! The real widget (a virtualized grid with an icon column and a name
//! column) lives in the host toolkit. Panels only need the operations below.
//! Measurement methods are expensive; the panel calls `auto_fit_rows` at most
//! once per instance and reuses the result.

use traymenu_core::color::Rgb;
use traymenu_core::geometry::{Rect, Size};

/// A scrollable table of rows with two content columns.
pub trait TabularView {
    /// Number of rows currently in the view.
    fn row_count(&self) -> usize;

    /// Index of the topmost visible row.
    fn first_displayed_row(&self) -> usize;

    /// Scroll so `index` is the topmost visible row. Implementations clamp.
    fn set_first_displayed_row(&mut self, index: usize);

    /// Measure every row to fit its content. Returns the summed row height.
    fn auto_fit_rows(&mut self) -> i32;

    /// Size the icon and name columns in one linear pass. Returns their summed width.
    fn fast_auto_fit_columns(&mut self) -> i32;

    /// Rectangle of `row` relative to the view's top-left, as currently
    /// scrolled. `None` when `row` is out of range.
    fn row_rect(&self, row: usize) -> Option<Rect>;

    /// Resize the visible viewport.
    fn set_viewport_size(&mut self, size: Size);

    /// Toggle flicker-free double buffered painting.
    fn set_double_buffered(&mut self, enabled: bool);

    /// Colors of the selected row.
    fn set_selection_colors(&mut self, background: Rgb, foreground: Rgb);
}
