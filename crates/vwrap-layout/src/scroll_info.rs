#![forbid(unsafe_code)]

//! Scroll geometry: extent, viewport, and offset.
//!
//! Invariant: on each axis `0 <= offset <= max(0, extent - viewport)`.
//! Out-of-range requests are clamped, never reported.

use vwrap_core::geometry::{Axis, Point, Rect, Size};

/// Extent, viewport, and offset of a scrollable panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollInfo {
    extent: Size,
    viewport: Size,
    offset: Point,
    /// Set by offset changes; cleared by [`ScrollInfo::take_measure_request`].
    measure_requested: bool,
}

/// Result of [`ScrollInfo::make_visible`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MakeVisible {
    /// Offset delta applied on each axis before clamping.
    pub scroll_amount: Point,
    /// Part of the target visible after scrolling, in viewport coordinates.
    pub visible: Rect,
}

impl ScrollInfo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn extent(&self) -> Size {
        self.extent
    }

    #[inline]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[inline]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Largest valid offset on `axis`.
    #[inline]
    pub fn max_offset(&self, axis: Axis) -> f64 {
        let max = self.extent.get(axis) - self.viewport.get(axis);
        if max.is_finite() { max.max(0.0) } else { 0.0 }
    }

    /// Whether content overflows the viewport on `axis`.
    #[inline]
    pub fn can_scroll(&self, axis: Axis) -> bool {
        self.viewport.get(axis) < self.extent.get(axis)
    }

    /// Store a new viewport and extent, pulling the offset back inside the
    /// scrollable range if it now overruns.
    ///
    /// Returns `true` when extent, viewport, or offset changed, which is the
    /// host's cue to refresh its scrollbars.
    pub fn update(&mut self, viewport: Size, extent: Size) -> bool {
        let mut changed = false;
        if extent != self.extent {
            self.extent = extent;
            changed = true;
        }
        if viewport != self.viewport {
            self.viewport = viewport;
            changed = true;
        }
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let max = self.max_offset(axis);
            if self.offset.get(axis) > max {
                self.offset = self.offset.with(axis, max);
                changed = true;
            }
        }
        changed
    }

    /// Overwrite the whole geometry without clamping.
    ///
    /// Used inside a grouping context, where the parent owns scrolling and the
    /// offset is the group's viewport location.
    pub(crate) fn assign(&mut self, viewport: Size, extent: Size, offset: Point) {
        self.viewport = viewport;
        self.extent = extent;
        self.offset = offset;
    }

    /// Clamp `value` into the scrollable range of `axis`.
    pub fn clamp_offset(&self, axis: Axis, value: f64) -> f64 {
        if value.is_nan() || value < 0.0 || !self.can_scroll(axis) {
            return 0.0;
        }
        value.min(self.max_offset(axis))
    }

    /// Set the offset on `axis`, clamped, and request a layout pass.
    ///
    /// Returns `true` if the stored offset changed.
    pub fn set_offset(&mut self, axis: Axis, value: f64) -> bool {
        let clamped = self.clamp_offset(axis, value);
        let changed = clamped != self.offset.get(axis);
        self.offset = self.offset.with(axis, clamped);
        self.measure_requested = true;
        changed
    }

    /// Shift the offset on `axis` by `delta`.
    pub fn scroll_by(&mut self, axis: Axis, delta: f64) -> bool {
        self.set_offset(axis, self.offset.get(axis) + delta)
    }

    /// Scroll the minimal amount on each axis so `target` (content
    /// coordinates) fits in the viewport.
    ///
    /// When the target is larger than the viewport its leading edge wins.
    pub fn make_visible(&mut self, target: Rect) -> MakeVisible {
        let amount = |axis: Axis| {
            let offset = self.offset.get(axis);
            let viewport = self.viewport.get(axis);
            let start = target.origin().get(axis);
            let end = start + target.size().get(axis);
            if start < offset {
                start - offset
            } else if end > offset + viewport {
                // Never scroll the leading edge out of view.
                (end - (offset + viewport)).min(start - offset)
            } else {
                0.0
            }
        };
        let scroll_amount = Point::new(amount(Axis::Horizontal), amount(Axis::Vertical));

        self.scroll_by(Axis::Horizontal, scroll_amount.x);
        self.scroll_by(Axis::Vertical, scroll_amount.y);

        let window = Rect::from_origin_size(self.offset, self.viewport);
        let visible = target
            .intersection_opt(&window)
            .map(|r| Rect::new(r.x - self.offset.x, r.y - self.offset.y, r.width, r.height))
            .unwrap_or_default();

        MakeVisible {
            scroll_amount,
            visible,
        }
    }

    /// Flag that the next frame needs a measure pass.
    #[inline]
    pub(crate) fn request_measure(&mut self) {
        self.measure_requested = true;
    }

    /// Consume a pending layout request raised by an offset change.
    pub fn take_measure_request(&mut self) -> bool {
        std::mem::take(&mut self.measure_requested)
    }
}
