//! Monitor layout domain entity.
//!
//! The layout holds every physical monitor rectangle in virtual desktop space
//! together with their union bounding box.  It is built once at startup from
//! the platform's monitor list and never mutated afterwards, so it can be
//! shared freely behind an `Arc`.

use tracing::warn;

use super::geometry::{Point, ScreenRect};

/// Where a point sits relative to the monitor layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointClass {
    /// Inside at least one monitor rectangle.
    OnMonitor,
    /// Inside the union bounding box but on no monitor: a gap between
    /// monitors that do not line up.
    InGap,
    /// Outside the union bounding box entirely.
    Outside,
}

/// The set of monitor rectangles and their union bounding box.
///
/// Monitor order is irrelevant to every query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorLayout {
    monitors: Vec<ScreenRect>,
    bounds: ScreenRect,
}

impl MonitorLayout {
    /// Builds a layout from the platform's monitor rectangles.
    ///
    /// Rectangles with zero width or height cover no pixels and are dropped.
    /// With no usable monitors the bounds stay the zero rectangle and every
    /// point classifies as [`PointClass::Outside`].
    pub fn new(monitors: Vec<ScreenRect>) -> Self {
        let monitors: Vec<ScreenRect> = monitors
            .into_iter()
            .filter(|rect| {
                if rect.is_empty() {
                    warn!("ignoring empty monitor rectangle {rect:?}");
                    false
                } else {
                    true
                }
            })
            .collect();

        let bounds = monitors
            .iter()
            .copied()
            .reduce(|acc, rect| acc.union(&rect))
            .unwrap_or_default();

        Self { monitors, bounds }
    }

    /// Returns the monitor rectangles in the order they were supplied.
    pub fn monitors(&self) -> &[ScreenRect] {
        &self.monitors
    }

    /// Returns the union bounding box of all monitors.
    pub fn bounds(&self) -> ScreenRect {
        self.bounds
    }

    /// Returns `true` when no monitors are known.
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Returns `true` if `point` lies on any monitor.
    pub fn is_on_monitor(&self, point: Point) -> bool {
        self.monitors.iter().any(|rect| rect.contains(point))
    }

    /// Returns the monitor containing `point`, if any.
    pub fn monitor_at(&self, point: Point) -> Option<&ScreenRect> {
        self.monitors.iter().find(|rect| rect.contains(point))
    }

    /// Classifies `point` as on a monitor, in a gap, or outside the desktop.
    pub fn classify(&self, point: Point) -> PointClass {
        if self.is_on_monitor(point) {
            PointClass::OnMonitor
        } else if self.bounds.contains(point) {
            PointClass::InGap
        } else {
            PointClass::Outside
        }
    }

    /// Clamps each axis of `point` independently into the bounding box.
    ///
    /// The result lies in `[x, right - 1]` × `[y, bottom - 1]`.  For an empty
    /// layout this collapses to the bounds origin instead of panicking.
    pub fn clamp(&self, point: Point) -> Point {
        let b = &self.bounds;
        Point {
            x: point.x.min(b.right() - 1).max(b.x),
            y: point.y.min(b.bottom() - 1).max(b.y),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
