#![forbid(unsafe_code)]

//! Panel placement.
//!
//! Pure geometry: given a panel's measured content and its anchor, compute
//! where the panel goes and how tall its view may be. Nothing here touches a
//! view or a panel; [`crate::panel::Panel`] measures, calls in, and applies.
//!
//! # Root mode (level 0)
//!
//! ```text
//!   view ceiling = monitor work height − title height
//!   x = monitor right − panel width
//!   y = taskbar top − panel height        (bottom edge sits on the taskbar)
//! ```
//!
//! # Child mode (level > 0)
//!
//! ```text
//!   x = parent x − panel width + round(scale factor)
//!   y = parent y + parent view offset + trigger row top
//!   if y + panel height > ceiling: y = ceiling − panel height
//! ```
//!
//! The `round(scale factor)` term keeps the one-pixel seam between parent
//! and child identical at every DPI setting.

use traymenu_core::geometry::{ChildBounds, Monitor, Point, Rect, Size, seam_correction};

use crate::error::LayoutError;

/// Measured content of the panel being placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentMetrics {
    /// Summed height of every row (memoized by the panel).
    pub rows_height: i32,
    /// Icon column plus name column width.
    pub columns_width: i32,
    /// Title bar height, zero for panels without a title.
    pub title_height: i32,
}

/// Computed geometry for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Panel bounds in screen coordinates, title included.
    pub bounds: Rect,
    /// Size of the tabular view below the title.
    pub view_size: Size,
    /// Whether the view needs a vertical scrollbar.
    pub scrollbar: bool,
}

/// What a child panel may read from its parent at layout time.
///
/// A snapshot, not a live binding: if the parent later moves, the child
/// stays put until the coordinator lays it out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentSnapshot {
    /// Parent panel's top-left corner.
    pub location: Point,
    /// Offset of the parent's view below the parent's top edge.
    pub view_offset_y: i32,
    /// Rows in the parent's view right now.
    pub row_count: usize,
    /// Rectangle of the trigger row relative to the parent's view, if it exists.
    pub trigger_row_rect: Option<Rect>,
}

/// Panel placement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEngine {
    scrollbar_allowance: i32,
}

impl LayoutEngine {
    /// Create an engine that widens scrolling views by `scrollbar_allowance`.
    #[must_use]
    pub const fn new(scrollbar_allowance: i32) -> Self {
        Self {
            scrollbar_allowance,
        }
    }

    /// Clamp the view to `max_view_height` and derive width and panel size.
    fn fit(&self, metrics: &ContentMetrics, max_view_height: i32) -> (Size, Size, bool) {
        let max_view_height = max_view_height.max(0);
        let view_height = metrics.rows_height.clamp(0, max_view_height);
        let scrollbar = metrics.rows_height > view_height;
        let mut width = metrics.columns_width.max(0);
        if scrollbar {
            width += self.scrollbar_allowance;
        }
        let view = Size::new(width, view_height);
        let panel = Size::new(width, view_height + metrics.title_height.max(0));
        (view, panel, scrollbar)
    }

    /// Place the root panel in the bottom-right corner of `monitor`.
    #[must_use]
    pub fn place_root(&self, metrics: &ContentMetrics, monitor: &Monitor) -> Placement {
        let (view_size, panel, scrollbar) =
            self.fit(metrics, monitor.work_height() - metrics.title_height);
        let x = monitor.bounds.right() - panel.width;
        let y = monitor.work_bottom() - panel.height;
        Placement {
            bounds: Rect::from_parts(Point::new(x, y), panel),
            view_size,
            scrollbar,
        }
    }

    /// The trigger row's rectangle, or `StaleAnchor` if the parent lost that row.
    pub fn anchor_row(parent: &ParentSnapshot, trigger_row: usize) -> Result<Rect, LayoutError> {
        let stale = LayoutError::StaleAnchor {
            trigger_row,
            row_count: parent.row_count,
        };
        if trigger_row >= parent.row_count {
            return Err(stale);
        }
        parent.trigger_row_rect.ok_or(stale)
    }

    /// Place a child panel to the left of its parent, level with `trigger_row`.
    pub fn place_child(
        &self,
        metrics: &ContentMetrics,
        parent: &ParentSnapshot,
        trigger_row: usize,
        bounds: ChildBounds,
    ) -> Result<Placement, LayoutError> {
        let row = Self::anchor_row(parent, trigger_row)?;
        let (view_size, panel, scrollbar) =
            self.fit(metrics, bounds.height_ceiling - metrics.title_height);
        let x = parent.location.x - panel.width + seam_correction(bounds.scale_factor);
        let mut y = parent.location.y + parent.view_offset_y + row.top();
        if y + panel.height > bounds.height_ceiling {
            y = bounds.height_ceiling - panel.height;
        }
        Ok(Placement {
            bounds: Rect::from_parts(Point::new(x, y), panel),
            view_size,
            scrollbar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGINE: LayoutEngine = LayoutEngine::new(120);

    fn monitor() -> Monitor {
        Monitor::new(Rect::new(0, 0, 1920, 1080), 40)
    }

    fn parent(row_top: i32) -> ParentSnapshot {
        ParentSnapshot {
            location: Point::new(1600, 500),
            view_offset_y: 20,
            row_count: 10,
            trigger_row_rect: Some(Rect::new(0, row_top, 300, 22)),
        }
    }

    #[test]
    fn root_sits_on_taskbar_in_right_corner() {
        let metrics = ContentMetrics {
            rows_height: 400,
            columns_width: 300,
            title_height: 20,
        };
        let p = ENGINE.place_root(&metrics, &monitor());
        assert_eq!(p.bounds, Rect::new(1620, 620, 300, 420));
        assert_eq!(p.view_size, Size::new(300, 400));
        assert!(!p.scrollbar);
        assert_eq!(p.bounds.bottom(), 1040);
    }

    #[test]
    fn tall_root_is_clamped_and_scrolls() {
        let metrics = ContentMetrics {
            rows_height: 5000,
            columns_width: 300,
            title_height: 20,
        };
        let p = ENGINE.place_root(&metrics, &monitor());
        assert!(p.scrollbar);
        assert_eq!(p.view_size, Size::new(420, 1020));
        assert_eq!(p.bounds, Rect::new(1500, 0, 420, 1040));
    }

    #[test]
    fn root_on_secondary_monitor() {
        let m = Monitor::new(Rect::new(1920, 0, 1280, 1024), 0);
        let metrics = ContentMetrics {
            rows_height: 100,
            columns_width: 200,
            title_height: 20,
        };
        let p = ENGINE.place_root(&metrics, &m);
        assert_eq!(p.bounds.right(), 3200);
        assert_eq!(p.bounds.bottom(), 1024);
    }

    #[test]
    fn child_aligns_with_trigger_row() {
        let metrics = ContentMetrics {
            rows_height: 200,
            columns_width: 250,
            title_height: 0,
        };
        let p = ENGINE
            .place_child(&metrics, &parent(44), 2, monitor().child_bounds())
            .unwrap();
        assert_eq!(p.bounds, Rect::new(1600 - 250 + 1, 564, 250, 200));
    }

    #[test]
    fn child_overflowing_ceiling_is_bottom_anchored() {
        let metrics = ContentMetrics {
            rows_height: 600,
            columns_width: 250,
            title_height: 0,
        };
        let p = ENGINE
            .place_child(&metrics, &parent(200), 2, monitor().child_bounds())
            .unwrap();
        assert_eq!(p.bounds.y, 1040 - 600);
        assert_eq!(p.bounds.bottom(), 1040);
    }

    #[test]
    fn child_seam_tracks_scale_factor() {
        let metrics = ContentMetrics {
            rows_height: 100,
            columns_width: 250,
            title_height: 0,
        };
        for (scale, seam) in [(1.0, 1), (1.25, 1), (1.5, 2), (2.0, 2)] {
            let bounds = ChildBounds {
                height_ceiling: 1040,
                scale_factor: scale,
            };
            let p = ENGINE.place_child(&metrics, &parent(0), 0, bounds).unwrap();
            assert_eq!(p.bounds.x, 1600 - 250 + seam, "scale {scale}");
        }
    }

    #[test]
    fn child_with_scrollbar_gets_allowance() {
        let metrics = ContentMetrics {
            rows_height: 3000,
            columns_width: 250,
            title_height: 0,
        };
        let p = ENGINE
            .place_child(&metrics, &parent(0), 0, monitor().child_bounds())
            .unwrap();
        assert!(p.scrollbar);
        assert_eq!(p.bounds.width, 370);
        assert_eq!(p.view_size.height, 1040);
        assert_eq!(p.bounds.y, 0);
    }

    #[test]
    fn stale_trigger_row_is_reported() {
        let metrics = ContentMetrics::default();
        let mut snapshot = parent(0);
        snapshot.row_count = 3;
        let err = ENGINE
            .place_child(&metrics, &snapshot, 5, monitor().child_bounds())
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::StaleAnchor {
                trigger_row: 5,
                row_count: 3
            }
        );
    }

    #[test]
    fn missing_row_rect_is_stale() {
        let mut snapshot = parent(0);
        snapshot.trigger_row_rect = None;
        let err = ENGINE
            .place_child(
                &ContentMetrics::default(),
                &snapshot,
                1,
                monitor().child_bounds(),
            )
            .unwrap_err();
        assert!(err.is_stale_anchor());
    }
}
