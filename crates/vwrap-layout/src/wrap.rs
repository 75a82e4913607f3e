#![forbid(unsafe_code)]

//! Wrap layout arithmetic.
//!
//! Items share one child size. Along the cross axis they fill a row, then
//! wrap; rows stack along the main (scroll) axis. Every function here reads
//! and writes geometry through an [`AxisMap`], so vertical and horizontal
//! wrap run the same code.

use vwrap_core::geometry::{AxisMap, Rect, Size};

use crate::config::SpacingMode;

/// Where the child size for a pass came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildSizeSource {
    /// Configured item size.
    Fixed,
    /// Desired size of the first realized container.
    FirstRealized,
    /// A container realized only to measure it.
    Sampled,
    /// Nothing to measure (empty collection).
    Empty,
}

/// Pick the child size for a measure pass.
///
/// A configured size wins, then the first realized container's desired size.
/// Only when neither exists is `sample` called to realize and measure one.
///
/// # Errors
///
/// Whatever `sample` returns.
pub fn resolve_child_size<E>(
    fixed: Option<Size>,
    first_realized: Option<Size>,
    sample: impl FnOnce() -> Result<Option<Size>, E>,
) -> Result<(Size, ChildSizeSource), E> {
    if let Some(size) = fixed {
        return Ok((size, ChildSizeSource::Fixed));
    }
    if let Some(size) = first_realized {
        return Ok((size, ChildSizeSource::FirstRealized));
    }
    Ok(match sample()? {
        Some(size) => (size, ChildSizeSource::Sampled),
        None => (Size::ZERO, ChildSizeSource::Empty),
    })
}

/// Row geometry for one measure/arrange cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub axes: AxisMap,
    pub child_size: Size,
    pub item_count: usize,
    /// Always at least 1.
    pub items_per_row: usize,
    pub row_count: usize,
}

/// Gaps applied along the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    /// Between neighbouring items.
    pub inner: f64,
    /// Before the first item of a row.
    pub outer: f64,
}

impl Spacing {
    /// Distribute `unused` space over a row of `per_row` items.
    pub fn distribute(mode: SpacingMode, unused: f64, per_row: usize) -> Self {
        if !unused.is_finite() || unused <= 0.0 {
            return Self::default();
        }
        match mode {
            SpacingMode::Uniform => {
                let gap = unused / (per_row + 1) as f64;
                Self {
                    inner: gap,
                    outer: gap,
                }
            }
            SpacingMode::BetweenItemsOnly => Self {
                inner: unused / per_row.saturating_sub(1).max(1) as f64,
                outer: 0.0,
            },
            SpacingMode::StartAndEndOnly => Self {
                inner: 0.0,
                outer: unused / 2.0,
            },
            SpacingMode::None => Self::default(),
        }
    }
}

impl RowLayout {
    /// Row layout with an explicit per-row capacity.
    pub fn new(axes: AxisMap, child_size: Size, item_count: usize, items_per_row: usize) -> Self {
        let items_per_row = items_per_row.max(1);
        Self {
            axes,
            child_size,
            item_count,
            items_per_row,
            row_count: item_count.div_ceil(items_per_row),
        }
    }

    /// Fit as many children per row as `available` allows.
    ///
    /// An unbounded cross axis puts every item in a single row.
    pub fn fit(axes: AxisMap, child_size: Size, available: Size, item_count: usize) -> Self {
        let available_cross = axes.cross(available);
        let child_cross = axes.cross(child_size);
        let per_row = if !available_cross.is_finite() || child_cross <= 0.0 {
            item_count
        } else {
            // Float-to-int `as` saturates; floor first so partial slots don't count.
            (available_cross / child_cross).floor() as usize
        };
        Self::new(axes, child_size, item_count, per_row)
    }

    /// Size of one row along the main axis.
    #[inline]
    pub fn row_main(&self) -> f64 {
        self.axes.main(self.child_size)
    }

    #[inline]
    pub fn row_of(&self, index: usize) -> usize {
        index / self.items_per_row
    }

    #[inline]
    pub fn column_of(&self, index: usize) -> usize {
        index % self.items_per_row
    }

    /// Total content size.
    ///
    /// With spacing active and a bounded cross axis, rows span the full
    /// available cross size; otherwise they are exactly as wide as their items.
    pub fn extent(&self, available: Size, spacing: SpacingMode) -> Size {
        let available_cross = self.axes.cross(available);
        let cross = if spacing != SpacingMode::None && available_cross.is_finite() {
            available_cross
        } else {
            self.axes.cross(self.child_size) * self.items_per_row as f64
        };
        let main = self.row_main() * self.row_count as f64;
        self.axes.size(cross, main)
    }

    /// Child size used for arrange.
    ///
    /// Stretching divides the final cross size evenly between the row's slots,
    /// capped at `max_stretch`.
    pub fn arrange_child_size(
        &self,
        final_size: Size,
        stretch: bool,
        max_stretch: Option<f64>,
    ) -> Size {
        if !stretch {
            return self.child_size;
        }
        let per_slot = self.axes.cross(final_size) / self.items_per_row as f64;
        let cross = per_slot.min(max_stretch.unwrap_or(f64::INFINITY));
        self.axes.size(cross, self.row_main())
    }

    /// Gaps for a row arranged in `final_size` with children of `child_size`.
    pub fn spacing(&self, final_size: Size, child_size: Size, mode: SpacingMode) -> Spacing {
        let final_cross = self.axes.cross(final_size);
        let row_cross = self.axes.cross(child_size) * self.items_per_row as f64;
        let unused = final_cross - row_cross.min(final_cross);
        Spacing::distribute(mode, unused, self.items_per_row)
    }

    /// Rect for the item at `index`, shifted by the scroll offset.
    ///
    /// `offset_cross`/`offset_main` are the offsets along the cross and main axes.
    pub fn place(
        &self,
        index: usize,
        child_size: Size,
        spacing: Spacing,
        offset_cross: f64,
        offset_main: f64,
    ) -> Rect {
        let child_cross = self.axes.cross(child_size);
        let child_main = self.axes.main(child_size);
        let cross = spacing.outer + self.column_of(index) as f64 * (child_cross + spacing.inner);
        let main = self.row_of(index) as f64 * child_main;
        self.axes.rect(
            cross - offset_cross,
            main - offset_main,
            child_cross,
            child_main,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vwrap_core::geometry::Orientation;

    const EPS: f64 = 1e-9;

    fn vertical() -> AxisMap {
        Orientation::Vertical.axes()
    }

    fn fit(child: Size, available: Size, count: usize) -> RowLayout {
        RowLayout::fit(vertical(), child, available, count)
    }

    #[test]
    fn fixed_size_wins_over_realized() {
        let (size, source) = resolve_child_size::<()>(
            Some(Size::new(10.0, 10.0)),
            Some(Size::new(20.0, 20.0)),
            || panic!("sample must not run"),
        )
        .unwrap();
        assert_eq!(size, Size::new(10.0, 10.0));
        assert_eq!(source, ChildSizeSource::Fixed);
    }

    #[test]
    fn realized_size_wins_over_sampling() {
        let (size, source) =
            resolve_child_size::<()>(None, Some(Size::new(20.0, 30.0)), || panic!("no sample"))
                .unwrap();
        assert_eq!(size, Size::new(20.0, 30.0));
        assert_eq!(source, ChildSizeSource::FirstRealized);
    }

    #[test]
    fn sampling_runs_last() {
        let (size, source) =
            resolve_child_size::<()>(None, None, || Ok(Some(Size::new(5.0, 6.0)))).unwrap();
        assert_eq!(size, Size::new(5.0, 6.0));
        assert_eq!(source, ChildSizeSource::Sampled);

        let (size, source) = resolve_child_size::<()>(None, None, || Ok(None)).unwrap();
        assert_eq!(size, Size::ZERO);
        assert_eq!(source, ChildSizeSource::Empty);

        let err = resolve_child_size(None, None, || Err("boom")).unwrap_err();
        assert_eq!(err, "boom");
    }

    #[test]
    fn fit_floors_row_capacity() {
        let layout = fit(Size::new(50.0, 50.0), Size::new(520.0, 500.0), 1000);
        assert_eq!(layout.items_per_row, 10);
        assert_eq!(layout.row_count, 100);
    }

    #[test]
    fn fit_keeps_at_least_one_per_row() {
        let layout = fit(Size::new(50.0, 50.0), Size::new(20.0, 500.0), 3);
        assert_eq!(layout.items_per_row, 1);
        assert_eq!(layout.row_count, 3);
    }

    #[test]
    fn fit_unbounded_cross_uses_single_row() {
        let layout = fit(Size::new(50.0, 50.0), Size::INFINITE, 42);
        assert_eq!(layout.items_per_row, 42);
        assert_eq!(layout.row_count, 1);
    }

    #[test]
    fn fit_empty_collection() {
        let layout = fit(Size::ZERO, Size::new(100.0, 100.0), 0);
        assert_eq!(layout.items_per_row, 1);
        assert_eq!(layout.row_count, 0);
    }

    #[test]
    fn extent_with_and_without_spacing() {
        let layout = fit(Size::new(50.0, 40.0), Size::new(520.0, 500.0), 95);
        assert_eq!(
            layout.extent(Size::new(520.0, 500.0), SpacingMode::Uniform),
            Size::new(520.0, 400.0)
        );
        assert_eq!(
            layout.extent(Size::new(520.0, 500.0), SpacingMode::None),
            Size::new(500.0, 400.0)
        );
    }

    #[test]
    fn horizontal_extent_swaps_axes() {
        let axes = Orientation::Horizontal.axes();
        let layout = RowLayout::fit(axes, Size::new(40.0, 50.0), Size::new(500.0, 520.0), 95);
        assert_eq!(layout.items_per_row, 10);
        assert_eq!(
            layout.extent(Size::new(500.0, 520.0), SpacingMode::Uniform),
            Size::new(400.0, 520.0)
        );
    }

    #[test]
    fn uniform_spacing_splits_evenly() {
        let spacing = Spacing::distribute(SpacingMode::Uniform, 55.0, 10);
        assert!((spacing.inner - 5.0).abs() < EPS);
        assert_eq!(spacing.inner, spacing.outer);
    }

    #[test]
    fn between_items_only_spacing() {
        let spacing = Spacing::distribute(SpacingMode::BetweenItemsOnly, 90.0, 10);
        assert_eq!((spacing.inner, spacing.outer), (10.0, 0.0));
        // A single item per row has nothing between.
        let single = Spacing::distribute(SpacingMode::BetweenItemsOnly, 90.0, 1);
        assert_eq!((single.inner, single.outer), (90.0, 0.0));
    }

    #[test]
    fn start_and_end_only_spacing() {
        let spacing = Spacing::distribute(SpacingMode::StartAndEndOnly, 30.0, 4);
        assert_eq!((spacing.inner, spacing.outer), (0.0, 15.0));
    }

    #[test]
    fn no_spacing_and_no_leftover() {
        let none = Spacing::default();
        assert_eq!(Spacing::distribute(SpacingMode::None, 30.0, 4), none);
        assert_eq!(Spacing::distribute(SpacingMode::Uniform, 0.0, 4), none);
        assert_eq!(
            Spacing::distribute(SpacingMode::Uniform, f64::INFINITY, 4),
            none
        );
    }

    #[test]
    fn place_vertical_with_offsets() {
        let layout = RowLayout::new(vertical(), Size::new(50.0, 40.0), 100, 10);
        let spacing = Spacing {
            inner: 2.0,
            outer: 3.0,
        };
        let rect = layout.place(23, layout.child_size, spacing, 0.0, 60.0);
        // column 3, row 2
        assert_eq!(rect, Rect::new(3.0 + 3.0 * 52.0, 80.0 - 60.0, 50.0, 40.0));
    }

    #[test]
    fn place_horizontal_swaps_axes() {
        let axes = Orientation::Horizontal.axes();
        let layout = RowLayout::new(axes, Size::new(40.0, 50.0), 100, 10);
        let rect = layout.place(23, layout.child_size, Spacing::default(), 0.0, 0.0);
        // column 3 stacks downward, row 2 stacks rightward.
        assert_eq!(rect, Rect::new(80.0, 150.0, 40.0, 50.0));
    }

    #[test]
    fn stretch_divides_final_size() {
        let layout = RowLayout::new(vertical(), Size::new(50.0, 40.0), 100, 4);
        let stretched = layout.arrange_child_size(Size::new(260.0, 500.0), true, None);
        assert_eq!(stretched, Size::new(65.0, 40.0));
        let capped = layout.arrange_child_size(Size::new(260.0, 500.0), true, Some(60.0));
        assert_eq!(capped, Size::new(60.0, 40.0));
        let unstretched = layout.arrange_child_size(Size::new(260.0, 500.0), false, None);
        assert_eq!(unstretched, layout.child_size);
    }

    #[test]
    fn spacing_uses_stretched_size() {
        let layout = RowLayout::new(vertical(), Size::new(50.0, 40.0), 100, 4);
        let final_size = Size::new(260.0, 500.0);
        let capped = layout.arrange_child_size(final_size, true, Some(60.0));
        let spacing = layout.spacing(final_size, capped, SpacingMode::Uniform);
        // 260 - 4 * 60 = 20 left over, 5 gaps.
        assert!((spacing.inner - 4.0).abs() < EPS);

        let full = layout.arrange_child_size(final_size, true, None);
        let spacing = layout.spacing(final_size, full, SpacingMode::Uniform);
        assert_eq!(spacing, Spacing::default());
    }
}
