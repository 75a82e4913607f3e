#![forbid(unsafe_code)]

//! Realized item range calculation.
//!
//! Pixel caches widen the viewport window *before* positions are resolved to
//! rows; item and page caches widen the index range *after*. The two orders
//! give different effective cache sizes at row boundaries and are kept
//! distinct on purpose.

use std::ops::Range;

use crate::config::{CacheLength, CacheUnit, ScrollUnit};
use crate::error::ConfigError;
use crate::host::GroupConstraints;
use crate::scroll_info::ScrollInfo;
use crate::wrap::RowLayout;

/// Inclusive range of item indices, or empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ItemRange {
    bounds: Option<(usize, usize)>,
}

impl ItemRange {
    /// The empty range.
    pub const EMPTY: Self = Self { bounds: None };

    /// `start..=end`. Empty if `start > end`.
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self {
                bounds: Some((start, end)),
            }
        } else {
            Self::EMPTY
        }
    }

    /// Every index of a collection with `count` items.
    pub const fn all(count: usize) -> Self {
        if count == 0 {
            Self::EMPTY
        } else {
            Self::new(0, count - 1)
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    /// First index, if any.
    #[inline]
    pub const fn start(&self) -> Option<usize> {
        match self.bounds {
            Some((start, _)) => Some(start),
            None => None,
        }
    }

    /// Last index (inclusive), if any.
    #[inline]
    pub const fn end(&self) -> Option<usize> {
        match self.bounds {
            Some((_, end)) => Some(end),
            None => None,
        }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        match self.bounds {
            Some((start, end)) => end - start + 1,
            None => 0,
        }
    }

    #[inline]
    pub const fn contains(&self, index: usize) -> bool {
        match self.bounds {
            Some((start, end)) => start <= index && index <= end,
            None => false,
        }
    }

    /// Iterate indices in ascending order.
    pub fn iter(&self) -> Range<usize> {
        match self.bounds {
            Some((start, end)) => start..end + 1,
            None => 0..0,
        }
    }
}

/// False for zero, negative, and NaN.
#[inline]
fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// Inputs shared by the flat and grouped calculations.
#[derive(Debug, Clone, Copy)]
pub struct RangeRequest<'a> {
    pub layout: &'a RowLayout,
    pub scroll: &'a ScrollInfo,
    pub cache: CacheLength,
    /// `false` realizes the whole collection.
    pub virtualizing: bool,
}

impl RangeRequest<'_> {
    fn row_main(&self) -> f64 {
        self.layout.row_main()
    }

    /// Row containing main-axis `position`, clamped to existing rows.
    fn row_at(&self, position: f64) -> usize {
        let row_main = self.row_main();
        let last_row = self.layout.row_count.saturating_sub(1);
        if !is_positive(row_main) || !is_positive(position) {
            return 0;
        }
        // `as` saturates, so huge positions land on the last row.
        ((position / row_main).floor() as usize).min(last_row)
    }

    /// Widen `[start, end]` by item counts.
    fn expand_items(&self, start: usize, end: usize, before: usize, after: usize) -> ItemRange {
        let last = self.layout.item_count - 1;
        ItemRange::new(
            start.saturating_sub(before),
            end.saturating_add(after).min(last),
        )
    }

    /// Realized range for a panel that owns its own scrolling.
    pub fn flat(&self) -> ItemRange {
        let count = self.layout.item_count;
        if count == 0 {
            return ItemRange::EMPTY;
        }
        if !self.virtualizing || !is_positive(self.row_main()) {
            return ItemRange::all(count);
        }

        let axes = self.layout.axes;
        let mut window_start = axes.main_pos(self.scroll.offset());
        let mut window_end = window_start + axes.main(self.scroll.viewport());

        if self.cache.unit == CacheUnit::Pixel {
            let extent = axes.main(self.scroll.extent());
            window_start = (window_start - self.cache.before).max(0.0);
            window_end = (window_end + self.cache.after).min(extent);
        }

        let per_row = self.layout.items_per_row;
        let start_row = self.row_at(window_start);
        let end_row = self.row_at(window_end).max(start_row);

        let start = start_row * per_row;
        let end = (end_row * per_row + per_row - 1).min(count - 1);

        match self.cache.unit {
            CacheUnit::Pixel => ItemRange::new(start, end),
            CacheUnit::Item => self.expand_items(
                start,
                end,
                self.cache.before as usize,
                self.cache.after as usize,
            ),
            CacheUnit::Page => {
                let per_page = end - start + 1;
                self.expand_items(
                    start,
                    end,
                    (self.cache.before as usize).saturating_mul(per_page),
                    (self.cache.after as usize).saturating_mul(per_page),
                )
            }
        }
    }

    /// Realized range for a panel nested in a grouping layout.
    ///
    /// The window comes from the parent's viewport (shifted past the group
    /// header) rather than from this panel's own offset. May be empty when the
    /// group lies outside the parent's viewport.
    ///
    /// # Errors
    ///
    /// [`ConfigError::PageCacheInGroup`] when the parent requests a page cache.
    pub fn grouped(
        &self,
        group: &GroupConstraints,
        scroll_unit: ScrollUnit,
        virtualize_when_grouping: bool,
    ) -> Result<ItemRange, ConfigError> {
        if group.cache.unit == CacheUnit::Page {
            return Err(ConfigError::PageCacheInGroup);
        }
        let count = self.layout.item_count;
        if count == 0 {
            return Ok(ItemRange::EMPTY);
        }
        let row_main = self.row_main();
        if !self.virtualizing || !virtualize_when_grouping || !is_positive(row_main) {
            return Ok(ItemRange::all(count));
        }

        let axes = self.layout.axes;
        let extent = axes.main(self.scroll.extent());
        let location = axes.main_pos(group.viewport.origin());

        let (offset_row, offset_px) = match scroll_unit {
            ScrollUnit::Item => {
                // Logical units: the header occupies the first row position.
                let row = if location >= 1.0 {
                    (location.floor() as usize - 1).min(self.layout.row_count - 1)
                } else {
                    0
                };
                (row, row as f64 * row_main)
            }
            ScrollUnit::Pixel => {
                let header = axes.main(group.header_size);
                let px = (location - header).max(0.0).min(extent);
                (self.row_at(px), px)
            }
        };

        let viewport_len = axes
            .main(group.viewport.size())
            .min((extent - offset_px).max(0.0))
            .max(0.0);
        let rows_in_viewport = (((offset_px + viewport_len) / row_main).ceil() as usize)
            .saturating_sub((offset_px / row_main).floor() as usize);

        let per_row = self.layout.items_per_row;
        let start = offset_row * per_row;
        let end_exclusive = ((offset_row + rows_in_viewport) * per_row).min(count);
        let visible = if end_exclusive > start {
            Some((start, end_exclusive - 1))
        } else {
            None
        };

        let range = match (group.cache.unit, visible) {
            (_, None) => ItemRange::EMPTY,
            (CacheUnit::Pixel, Some((start, end))) => {
                let before_px = group.cache.before.min(offset_px);
                let after_px = group
                    .cache
                    .after
                    .min((extent - viewport_len - offset_px).max(0.0));
                let rows_before = (before_px / row_main).floor() as usize;
                let window_end = offset_px + viewport_len;
                let rows_after = ((window_end + after_px) / row_main).ceil() as usize
                    - (window_end / row_main).ceil() as usize;
                ItemRange::new(
                    start.saturating_sub(rows_before * per_row),
                    end.saturating_add(rows_after * per_row).min(count - 1),
                )
            }
            (_, Some((start, end))) => self.expand_items(
                start,
                end,
                group.cache.before as usize,
                group.cache.after as usize,
            ),
        };
        Ok(range)
    }
}
