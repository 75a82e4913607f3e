#![forbid(unsafe_code)]

//! Geometric primitives and orientation-relative axis mapping.
//!
//! All values are layout units (`f64`). Sizes may be infinite along an axis
//! to express "unbounded" available space during measurement.
//!
//! Layout code never reads `width`/`height` directly. It goes through an
//! [`AxisMap`], which names the two axes relative to the wrap orientation:
//!
//! - **main**: the scroll direction, the axis rows stack along
//!   (height for [`Orientation::Vertical`], width for [`Orientation::Horizontal`]).
//! - **cross**: the direction items fill a row before wrapping
//!   (width for vertical wrap, height for horizontal wrap).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along a physical axis.
    #[inline]
    pub const fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Copy with the coordinate along `axis` replaced.
    #[inline]
    #[must_use]
    pub const fn with(self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Horizontal => Self::new(value, self.y),
            Axis::Vertical => Self::new(self.x, value),
        }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Unbounded on both axes. Used as the available size when measuring a
    /// container for its natural size.
    pub const INFINITE: Self = Self {
        width: f64::INFINITY,
        height: f64::INFINITY,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Length along a physical axis.
    #[inline]
    pub const fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Component-wise minimum.
    #[inline]
    #[must_use]
    pub fn min(self, other: Size) -> Size {
        Size::new(self.width.min(other.width), self.height.min(other.height))
    }

    /// Whether both components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

/// An axis-aligned rectangle in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Create a rectangle at `origin` with `size`.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }
}

/// A physical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The other axis.
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Wrap orientation.
///
/// `Vertical` fills rows left-to-right and stacks extra rows downward, so the
/// content scrolls vertically. `Horizontal` fills columns top-to-bottom and
/// stacks extra columns rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The scroll direction for this orientation.
    #[inline]
    pub const fn main_axis(self) -> Axis {
        match self {
            Orientation::Vertical => Axis::Vertical,
            Orientation::Horizontal => Axis::Horizontal,
        }
    }

    /// The row-fill direction for this orientation.
    #[inline]
    pub const fn cross_axis(self) -> Axis {
        self.main_axis().flip()
    }

    #[inline]
    pub const fn axes(self) -> AxisMap {
        AxisMap::new(self)
    }
}

/// Maps orientation-relative (main, cross) coordinates to physical (x, y).
///
/// One layout algorithm serves both orientations by reading and building
/// geometry exclusively through this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisMap {
    orientation: Orientation,
}

impl AxisMap {
    #[inline]
    pub const fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    #[inline]
    pub const fn main_axis(&self) -> Axis {
        self.orientation.main_axis()
    }

    #[inline]
    pub const fn cross_axis(&self) -> Axis {
        self.orientation.cross_axis()
    }

    /// Length of `size` along the main (scroll) axis.
    #[inline]
    pub const fn main(&self, size: Size) -> f64 {
        size.get(self.main_axis())
    }

    /// Length of `size` along the cross (row-fill) axis.
    #[inline]
    pub const fn cross(&self, size: Size) -> f64 {
        size.get(self.cross_axis())
    }

    /// Coordinate of `point` along the main axis.
    #[inline]
    pub const fn main_pos(&self, point: Point) -> f64 {
        point.get(self.main_axis())
    }

    /// Coordinate of `point` along the cross axis.
    #[inline]
    pub const fn cross_pos(&self, point: Point) -> f64 {
        point.get(self.cross_axis())
    }

    /// Build a physical size from (cross, main) lengths.
    #[inline]
    pub const fn size(&self, cross: f64, main: f64) -> Size {
        match self.orientation {
            Orientation::Vertical => Size::new(cross, main),
            Orientation::Horizontal => Size::new(main, cross),
        }
    }

    /// Build a physical point from (cross, main) coordinates.
    #[inline]
    pub const fn point(&self, cross: f64, main: f64) -> Point {
        match self.orientation {
            Orientation::Vertical => Point::new(cross, main),
            Orientation::Horizontal => Point::new(main, cross),
        }
    }

    /// Build a physical rect from orientation-relative position and size.
    #[inline]
    pub const fn rect(&self, cross: f64, main: f64, cross_len: f64, main_len: f64) -> Rect {
        let origin = self.point(cross, main);
        let size = self.size(cross_len, main_len);
        Rect::from_origin_size(origin, size)
    }
}
