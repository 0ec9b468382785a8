//! Gap-crossing cursor correction.
//!
//! When a relative move would drop the cursor into a gap of the
//! [`MonitorLayout`], [`BoundaryCorrector`] casts a ray from the current
//! position in the direction of travel and lands on the first monitor pixel
//! past the gap.  Following the travel vector (rather than snapping to the
//! nearest monitor) keeps fast sweeping gestures feeling continuous.
//!
//! # How the scan works (for beginners)
//!
//! The direction is reduced to a unit step per axis: each of `dx` and `dy`
//! becomes -1, 0 or +1.  Starting at the current cursor position the scan
//! advances one step at a time:
//!
//! ```text
//!  monitor A          gap            monitor B
//! ┌──────────┐ · · · · · · · · · · ┌──────────┐
//! │       c→→→→→→→→→→ r →→→→→→→→→→→→ landing  │
//! └──────────┘ · · · · · · · · · · └──────────┘
//! ```
//!
//! 1. Steps still on the monitor the cursor started on are skipped in one
//!    jump to the last pixel of that monitor along the ray.
//! 2. Once the ray has been off-monitor at least once, the first point that is
//!    on a monitor again is returned.
//! 3. If the ray leaves the desktop bounding box, or spends more than the scan
//!    limit in the gap, the requested destination is clamped to the bounding
//!    box instead.
//!
//! The ray never travels further than the distance to the requested point
//! plus the scan limit, and each monitor it crosses costs one jump, so a move
//! costs `O(monitors² + scan_limit)` whatever the monitor sizes.

use std::sync::Arc;

use tracing::trace;

use super::geometry::{Point, ScreenRect};
use super::layout::{MonitorLayout, PointClass};

/// Maximum number of gap pixels scanned before giving up and clamping.
///
/// Must be at least as wide as the largest hardware gap in either axis.
pub const DEFAULT_GAP_SCAN_LIMIT: u32 = 600;

/// How a requested destination was turned into the final one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Correction {
    /// The destination was already on a monitor.
    Unchanged,
    /// No direction of travel; the cursor stays where it is.
    Stationary,
    /// The ray crossed a gap and landed on the first monitor pixel beyond it.
    JumpedGap,
    /// The destination was clamped into the desktop bounding box.
    Clamped,
    /// No monitors are known, so no correction is possible.
    NoLayout,
}

/// Computes where a cursor move must really land.
///
/// Holds a shared, read-only [`MonitorLayout`]; construct one per process and
/// reuse it for every move.
#[derive(Debug, Clone)]
pub struct BoundaryCorrector {
    layout: Arc<MonitorLayout>,
    scan_limit: u32,
}

impl BoundaryCorrector {
    /// Creates a corrector with [`DEFAULT_GAP_SCAN_LIMIT`].
    pub fn new(layout: Arc<MonitorLayout>) -> Self {
        Self::with_scan_limit(layout, DEFAULT_GAP_SCAN_LIMIT)
    }

    /// Creates a corrector that scans at most `scan_limit` gap pixels.
    pub fn with_scan_limit(layout: Arc<MonitorLayout>, scan_limit: u32) -> Self {
        Self { layout, scan_limit }
    }

    pub fn layout(&self) -> &MonitorLayout {
        &self.layout
    }

    pub fn scan_limit(&self) -> u32 {
        self.scan_limit
    }

    /// Returns the point the cursor should move to when travelling from
    /// `current` towards `requested`.
    ///
    /// Never fails: the result is either on a monitor, `current` itself, or
    /// `requested` clamped to the desktop bounding box.
    pub fn correct(&self, current: Point, requested: Point) -> Point {
        self.correct_with_kind(current, requested).0
    }

    /// Like [`correct`](Self::correct) but also reports which rule applied.
    pub fn correct_with_kind(&self, current: Point, requested: Point) -> (Point, Correction) {
        if self.layout.is_empty() {
            return (requested, Correction::NoLayout);
        }

        if self.layout.is_on_monitor(requested) {
            return (requested, Correction::Unchanged);
        }

        let step_x = unit_step(current.x, requested.x);
        let step_y = unit_step(current.y, requested.y);
        if step_x == 0 && step_y == 0 {
            return (current, Correction::Stationary);
        }

        let mut scan = current;
        // A cursor that already sits off-monitor is treated as mid-gap.
        let mut left_monitor = !self.layout.is_on_monitor(current);
        let mut gap_steps: u32 = 0;
        let travel_limit = chebyshev(current, requested) + u64::from(self.scan_limit);
        let mut travelled: u64 = 0;

        loop {
            if travelled >= travel_limit {
                trace!("ray from {current} ran out after {travelled} px");
                break;
            }
            scan = scan.offset(step_x, step_y);
            travelled += 1;

            match self.layout.classify(scan) {
                PointClass::OnMonitor if left_monitor => {
                    trace!("gap crossed from {current} to {scan} (requested {requested})");
                    return (scan, Correction::JumpedGap);
                }
                PointClass::OnMonitor => {
                    let run = self
                        .layout
                        .monitor_at(scan)
                        .map_or(0, |rect| steps_inside(rect, scan, step_x, step_y));
                    scan = scan.offset(step_x * run, step_y * run);
                    travelled += u64::try_from(run).unwrap_or(0);
                }
                PointClass::Outside => break,
                PointClass::InGap => {
                    left_monitor = true;
                    gap_steps += 1;
                    if gap_steps >= self.scan_limit {
                        trace!("gap scan exhausted after {gap_steps} steps from {current}");
                        break;
                    }
                }
            }
        }

        (self.layout.clamp(requested), Correction::Clamped)
    }
}

/// Number of pixels between `a` and `b` along the longer axis.
fn chebyshev(a: Point, b: Point) -> u64 {
    u64::from(a.x.abs_diff(b.x).max(a.y.abs_diff(b.y)))
}

/// How many more unit steps from `from` stay inside `rect`.
///
/// `from` must lie inside `rect`; an axis with a zero step never limits the run.
fn steps_inside(rect: &ScreenRect, from: Point, step_x: i32, step_y: i32) -> i32 {
    let along = |step: i32, pos: i32, lo: i32, hi_exclusive: i32| -> i64 {
        match step {
            1 => i64::from(hi_exclusive) - 1 - i64::from(pos),
            -1 => i64::from(pos) - i64::from(lo),
            _ => i64::MAX,
        }
    };
    let run = along(step_x, from.x, rect.x, rect.right())
        .min(along(step_y, from.y, rect.y, rect.bottom()))
        .max(0);
    i32::try_from(run).unwrap_or(i32::MAX)
}

/// Sign of `to - from` without overflowing on extreme coordinates.
fn unit_step(from: i32, to: i32) -> i32 {
    (i64::from(to) - i64::from(from)).signum() as i32
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector(monitors: Vec<ScreenRect>) -> BoundaryCorrector {
        BoundaryCorrector::new(Arc::new(MonitorLayout::new(monitors)))
    }

    /// A=(0,0,1920,1080), B=(2500,0,1920,1080): a 580 px gap at x in [1920, 2500).
    fn gapped() -> BoundaryCorrector {
        corrector(vec![
            ScreenRect::new(0, 0, 1920, 1080),
            ScreenRect::new(2500, 0, 1920, 1080),
        ])
    }

    #[test]
    fn test_destination_on_monitor_is_returned_unchanged() {
        let c = gapped();
        let (p, kind) = c.correct_with_kind(Point::new(100, 100), Point::new(3000, 700));
        assert_eq!(p, Point::new(3000, 700));
        assert_eq!(kind, Correction::Unchanged);
    }

    #[test]
    fn test_destination_on_monitor_is_unchanged_for_any_current() {
        let c = gapped();
        let dest = Point::new(1919, 0);
        for current in [Point::new(-50, -50), Point::new(2200, 500), Point::new(9999, 9999)] {
            assert_eq!(c.correct(current, dest), dest);
        }
    }

    #[test]
    fn test_rightward_move_into_gap_lands_on_first_pixel_of_next_monitor() {
        let c = gapped();
        let (p, kind) = c.correct_with_kind(Point::new(1900, 500), Point::new(2000, 500));
        assert_eq!(p, Point::new(2500, 500));
        assert_eq!(kind, Correction::JumpedGap);
    }

    #[test]
    fn test_leftward_move_into_gap_lands_on_last_pixel_of_previous_monitor() {
        let c = gapped();
        let p = c.correct(Point::new(2510, 300), Point::new(2400, 300));
        assert_eq!(p, Point::new(1919, 300));
    }

    #[test]
    fn test_diagonal_move_into_gap_follows_the_diagonal() {
        let c = gapped();
        // From (1910, 100) stepping (+1, +1) reaches x=2500 after 590 steps.
        let p = c.correct(Point::new(1910, 100), Point::new(1950, 140));
        assert_eq!(p, Point::new(2500, 690));
    }

    #[test]
    fn test_long_move_from_far_side_of_monitor_still_crosses_gap() {
        let c = gapped();
        // Walking across monitor A does not use up the gap budget.
        let p = c.correct(Point::new(10, 500), Point::new(2100, 500));
        assert_eq!(p, Point::new(2500, 500));
    }

    #[test]
    fn test_move_leaving_desktop_clamps_requested_destination() {
        let c = gapped();
        let (p, kind) = c.correct_with_kind(Point::new(4400, 500), Point::new(4600, 520));
        assert_eq!(p, Point::new(4419, 520));
        assert_eq!(kind, Correction::Clamped);
    }

    #[test]
    fn test_move_past_single_monitor_edge_clamps_to_edge() {
        let c = corrector(vec![ScreenRect::new(0, 0, 1920, 1080)]);
        let p = c.correct(Point::new(1900, 500), Point::new(1950, 500));
        assert_eq!(p, Point::new(1919, 500));
    }

    #[test]
    fn test_ray_exiting_bounds_inside_gap_clamps_original_destination() {
        // Right monitor is lower; moving up-right from A enters the gap above B
        // and then leaves the top of the bounding box.
        let c = corrector(vec![
            ScreenRect::new(0, 0, 1920, 1080),
            ScreenRect::new(1920, 600, 1920, 1080),
        ]);
        let (p, kind) = c.correct_with_kind(Point::new(1915, 5), Point::new(1935, -15));
        assert_eq!(kind, Correction::Clamped);
        assert_eq!(p, Point::new(1935, 0));
    }

    #[test]
    fn test_scan_exhaustion_clamps_requested_destination() {
        let c = BoundaryCorrector::with_scan_limit(
            Arc::new(MonitorLayout::new(vec![
                ScreenRect::new(0, 0, 1920, 1080),
                ScreenRect::new(2500, 0, 1920, 1080),
            ])),
            100,
        );
        let (p, kind) = c.correct_with_kind(Point::new(1900, 500), Point::new(2000, 500));
        assert_eq!(kind, Correction::Clamped);
        assert_eq!(p, Point::new(2000, 500));
    }

    #[test]
    fn test_no_monitor_along_ray_inside_bounds_yields_clamped_destination() {
        // Vertical move down into the gap below the short monitor: the ray
        // never meets another monitor and exits the bounding box.
        let c = corrector(vec![
            ScreenRect::new(0, 0, 1920, 1080),
            ScreenRect::new(1920, 0, 1920, 600),
        ]);
        let requested = Point::new(2500, 700);
        let p = c.correct(Point::new(2500, 590), requested);
        assert_eq!(p, c.layout().clamp(requested));
    }

    #[test]
    fn test_zero_direction_returns_current() {
        let c = gapped();
        let current = Point::new(2000, 500);
        let (p, kind) = c.correct_with_kind(current, current);
        assert_eq!(p, current);
        assert_eq!(kind, Correction::Stationary);
    }

    #[test]
    fn test_cursor_already_in_gap_lands_on_next_monitor() {
        let c = gapped();
        let p = c.correct(Point::new(2000, 500), Point::new(2010, 500));
        assert_eq!(p, Point::new(2500, 500));
    }

    #[test]
    fn test_empty_layout_passes_destination_through() {
        let c = corrector(Vec::new());
        let (p, kind) = c.correct_with_kind(Point::new(0, 0), Point::new(50, 50));
        assert_eq!(p, Point::new(50, 50));
        assert_eq!(kind, Correction::NoLayout);
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let c = gapped();
        let p = c.correct(Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MAX));
        assert_eq!(p, Point::new(4419, 1079));
    }

    #[test]
    fn test_very_wide_start_monitor_is_crossed_without_walking_it() {
        // Arrange: a 2e9 px wide monitor followed by a 100 px gap.
        let c = BoundaryCorrector::with_scan_limit(
            Arc::new(MonitorLayout::new(vec![
                ScreenRect::new(0, 0, 2_000_000_000, 1),
                ScreenRect::new(2_000_000_100, 0, 10, 1),
            ])),
            600,
        );

        // Act
        let (p, kind) = c.correct_with_kind(Point::new(0, 0), Point::new(2_000_000_050, 0));

        // Assert
        assert_eq!(kind, Correction::JumpedGap);
        assert_eq!(p, Point::new(2_000_000_100, 0));
    }

    #[test]
    fn test_diagonal_skip_stops_at_nearer_edge() {
        let rect = ScreenRect::new(0, 0, 1920, 1080);
        // Bottom edge is 79 steps away, right edge 919.
        assert_eq!(steps_inside(&rect, Point::new(1000, 1000), 1, 1), 79);
        assert_eq!(steps_inside(&rect, Point::new(1000, 1000), -1, 0), 1000);
        assert_eq!(steps_inside(&rect, Point::new(1919, 5), 1, 0), 0);
    }

    #[test]
    fn test_chebyshev_uses_longer_axis() {
        assert_eq!(chebyshev(Point::new(0, 0), Point::new(-30, 12)), 30);
        assert_eq!(
            chebyshev(Point::new(i32::MIN, 0), Point::new(i32::MAX, 0)),
            u64::from(u32::MAX)
        );
    }

    #[test]
    fn test_unit_step_signs() {
        assert_eq!(unit_step(5, 10), 1);
        assert_eq!(unit_step(10, 5), -1);
        assert_eq!(unit_step(7, 7), 0);
        assert_eq!(unit_step(i32::MIN, i32::MAX), 1);
    }
}
