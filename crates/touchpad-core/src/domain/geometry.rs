//! Integer geometry in virtual desktop coordinates.
//!
//! The virtual desktop is the coordinate space the OS uses to place every
//! monitor.  The primary monitor usually starts at (0, 0); other monitors may
//! sit at negative coordinates (left of or above the primary).

use serde::{Deserialize, Serialize};

/// A pixel position in virtual desktop coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point translated by `(dx, dy)`.
    ///
    /// Saturates at the `i32` range so a hostile `drag` cannot overflow.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A rectangular region of the virtual desktop.
///
/// `x` and `y` are the top-left corner and may be negative.  The region is
/// half-open: it covers `x..x + width` horizontally and `y..y + height`
/// vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenRect {
    /// X coordinate of the top-left corner.
    pub x: i32,
    /// Y coordinate of the top-left corner.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ScreenRect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the rightmost X coordinate (exclusive).
    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Returns the bottommost Y coordinate (exclusive).
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Returns `true` if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if `point` lies inside this rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges are
    /// exclusive, so two monitors sharing an edge never both contain a point.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Returns the smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &ScreenRect) -> ScreenRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        ScreenRect {
            x,
            y,
            width: right.abs_diff(x),
            height: bottom.abs_diff(y),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
