#![forbid(unsafe_code)]

//! Screen-space geometric primitives.
//!
//! All coordinates are physical screen pixels with the origin at the top-left
//! of the primary monitor. Positions are signed because secondary monitors may
//! sit left of or above the primary one.

/// A point on the virtual desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair. Both dimensions are non-negative in practice; the
/// constructors saturate negative input to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size, clamping negative dimensions to zero.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Zero size.
    pub const ZERO: Self = Self::new(0, 0);
}

/// A rectangle used for panel bounds, monitor bounds, and row hit boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from a location and a size.
    #[inline]
    pub const fn from_parts(location: Point, size: Size) -> Self {
        Self::new(location.x, location.y, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn location(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Dimensions.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Left edge (inclusive). Alias for `self.x`.
    #[inline]
    pub const fn left(&self) -> i32 {
        self.x
    }

    /// Top edge (inclusive). Alias for `self.y`.
    #[inline]
    pub const fn top(&self) -> i32 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero (or negative) area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

// ---------------------------------------------------------------------------
// Monitors and DPI
// ---------------------------------------------------------------------------

/// A physical monitor as seen by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Monitor {
    /// Full monitor bounds, taskbar included.
    pub bounds: Rect,
    /// Height of the taskbar docked at the bottom of this monitor.
    pub taskbar_height: i32,
    /// DPI scale factor (1.0 = 100%).
    pub scale_factor: f64,
}

impl Monitor {
    /// Create a monitor at 100% scaling.
    pub const fn new(bounds: Rect, taskbar_height: i32) -> Self {
        Self {
            bounds,
            taskbar_height,
            scale_factor: 1.0,
        }
    }

    /// Set the DPI scale factor (builder).
    #[must_use]
    pub const fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Usable height above the taskbar.
    #[inline]
    pub const fn work_height(&self) -> i32 {
        self.bounds.height.saturating_sub(self.taskbar_height)
    }

    /// Screen y coordinate of the taskbar's top edge.
    #[inline]
    pub const fn work_bottom(&self) -> i32 {
        self.bounds.bottom().saturating_sub(self.taskbar_height)
    }

    /// Bounds handed to child panels cascading on this monitor.
    pub const fn child_bounds(&self) -> ChildBounds {
        ChildBounds {
            height_ceiling: self.work_bottom(),
            scale_factor: self.scale_factor,
        }
    }
}

/// Vertical ceiling and DPI scale used when placing a child panel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildBounds {
    /// No child panel may extend below this screen y coordinate.
    pub height_ceiling: i32,
    /// DPI scale factor of the monitor the chain lives on.
    pub scale_factor: f64,
}

/// Pixel correction applied where a child panel meets its parent.
///
/// Rounds half away from zero, so 1.5 yields 2 and 1.25 yields 1.
#[inline]
pub fn seam_correction(scale_factor: f64) -> i32 {
    // f64::round already rounds half away from zero.
    scale_factor.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges_are_exclusive() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
        assert!(r.contains(Point::new(10, 20)));
        assert!(!r.contains(Point::new(40, 20)));
        assert!(!r.contains(Point::new(10, 60)));
    }

    #[test]
    fn rect_contains_negative_coordinates() {
        let r = Rect::new(-1920, 0, 1920, 1080);
        assert!(r.contains(Point::new(-1, 500)));
        assert!(!r.contains(Point::new(0, 500)));
    }

    #[test]
    fn size_clamps_negative() {
        assert_eq!(Size::new(-5, 3), Size::new(0, 3));
    }

    #[test]
    fn empty_rect() {
        assert!(Rect::new(0, 0, 0, 10).is_empty());
        assert!(Rect::new(0, 0, 10, -1).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn monitor_work_area() {
        let m = Monitor::new(Rect::new(0, 0, 1920, 1080), 40);
        assert_eq!(m.work_height(), 1040);
        assert_eq!(m.work_bottom(), 1040);

        let offset = Monitor::new(Rect::new(0, 200, 1280, 1024), 30);
        assert_eq!(offset.work_bottom(), 1194);
    }

    #[test]
    fn child_bounds_carry_scale() {
        let m = Monitor::new(Rect::new(0, 0, 2560, 1440), 48).with_scale_factor(1.5);
        let cb = m.child_bounds();
        assert_eq!(cb.height_ceiling, 1392);
        assert_eq!(cb.scale_factor, 1.5);
    }

    #[test]
    fn seam_rounds_half_away_from_zero() {
        assert_eq!(seam_correction(1.0), 1);
        assert_eq!(seam_correction(1.25), 1);
        assert_eq!(seam_correction(1.5), 2);
        assert_eq!(seam_correction(1.75), 2);
        assert_eq!(seam_correction(2.0), 2);
        assert_eq!(seam_correction(2.5), 3);
    }
}
