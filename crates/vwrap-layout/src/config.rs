#![forbid(unsafe_code)]

//! Panel configuration.
//!
//! [`PanelConfig`] is a plain value: build it with the `with_*` methods, check
//! it with [`PanelConfig::validate`], hand it to the panel. The panel validates
//! again at the start of every measure pass.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use vwrap_core::geometry::{Axis, Orientation, Size};

use crate::error::ConfigError;

/// How leftover row space is distributed between items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpacingMode {
    /// Items packed with zero gap.
    None,
    /// Equal gaps before the first item, between items, and after the last.
    #[default]
    Uniform,
    /// Gaps only between items.
    BetweenItemsOnly,
    /// Half the leftover space at each end of the row, no gaps between items.
    StartAndEndOnly,
}

/// Unit of [`CacheLength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CacheUnit {
    /// Layout units along the scroll axis, applied before rows are resolved.
    Pixel,
    /// Item counts, applied after rows are resolved to indices.
    Item,
    /// Multiples of the visible item count.
    #[default]
    Page,
}

/// How much beyond the viewport to keep realized.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CacheLength {
    pub before: f64,
    pub after: f64,
    pub unit: CacheUnit,
}

impl CacheLength {
    pub const fn new(before: f64, after: f64, unit: CacheUnit) -> Self {
        Self {
            before,
            after,
            unit,
        }
    }

    /// No cache, in item units.
    pub const fn none() -> Self {
        Self::new(0.0, 0.0, CacheUnit::Item)
    }

    pub const fn pixels(before: f64, after: f64) -> Self {
        Self::new(before, after, CacheUnit::Pixel)
    }

    pub const fn items(before: usize, after: usize) -> Self {
        Self::new(before as f64, after as f64, CacheUnit::Item)
    }

    pub const fn pages(before: usize, after: usize) -> Self {
        Self::new(before as f64, after as f64, CacheUnit::Page)
    }

    /// Returns an error if either length is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if ok(self.before) && ok(self.after) {
            Ok(())
        } else {
            Err(ConfigError::InvalidCacheLength {
                before: self.before,
                after: self.after,
            })
        }
    }
}

impl Default for CacheLength {
    /// One page before and after the viewport.
    fn default() -> Self {
        Self::pages(1, 1)
    }
}

/// Whether scroll steps are measured in layout units or in items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScrollUnit {
    #[default]
    Pixel,
    Item,
}

/// What happens to a container whose item leaves the realized range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VirtualizationMode {
    /// Discard it.
    Standard,
    /// Return it to the recycle pool.
    #[default]
    Recycling,
}

/// Configuration surface of [`crate::VirtualizingWrapPanel`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PanelConfig {
    /// Forces a uniform child size. `None` infers it from realized containers.
    pub item_size: Option<Size>,
    pub orientation: Orientation,
    pub spacing_mode: SpacingMode,
    /// Master switch for spacing. `false` behaves as [`SpacingMode::None`].
    pub spacing_enabled: bool,
    /// Stretch children along the cross axis to fill the row.
    pub stretch_items: bool,
    /// Upper bound on the stretched cross size. `None` is unbounded.
    pub max_stretch_size: Option<f64>,
    pub cache: CacheLength,
    /// `false` realizes the whole collection.
    pub virtualizing: bool,
    /// `false` realizes every item of a nested group.
    pub virtualize_when_grouping: bool,
    pub virtualization_mode: VirtualizationMode,
    pub scroll_unit: ScrollUnit,
    /// Pixel step for line scrolling.
    pub scroll_line_delta: f64,
    /// Pixel step for wheel scrolling.
    pub mouse_wheel_delta: f64,
    /// Item step for line scrolling.
    pub scroll_line_delta_item: usize,
    /// Item step for wheel scrolling.
    pub mouse_wheel_delta_item: usize,
    /// Axis the wheel scrolls. `None` follows the orientation's scroll axis.
    pub wheel_axis: Option<Axis>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            item_size: None,
            orientation: Orientation::Vertical,
            spacing_mode: SpacingMode::Uniform,
            spacing_enabled: true,
            stretch_items: false,
            max_stretch_size: None,
            cache: CacheLength::default(),
            virtualizing: true,
            virtualize_when_grouping: true,
            virtualization_mode: VirtualizationMode::Recycling,
            scroll_unit: ScrollUnit::Pixel,
            scroll_line_delta: 16.0,
            mouse_wheel_delta: 48.0,
            scroll_line_delta_item: 1,
            mouse_wheel_delta_item: 3,
            wheel_axis: None,
        }
    }
}

impl PanelConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_item_size(mut self, size: Size) -> Self {
        self.item_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_spacing_mode(mut self, mode: SpacingMode) -> Self {
        self.spacing_mode = mode;
        self
    }

    #[must_use]
    pub fn with_spacing_enabled(mut self, enabled: bool) -> Self {
        self.spacing_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_stretch_items(mut self, stretch: bool) -> Self {
        self.stretch_items = stretch;
        self
    }

    #[must_use]
    pub fn with_max_stretch_size(mut self, max: f64) -> Self {
        self.max_stretch_size = Some(max);
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: CacheLength) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn with_virtualizing(mut self, virtualizing: bool) -> Self {
        self.virtualizing = virtualizing;
        self
    }

    #[must_use]
    pub fn with_virtualize_when_grouping(mut self, enabled: bool) -> Self {
        self.virtualize_when_grouping = enabled;
        self
    }

    #[must_use]
    pub fn with_virtualization_mode(mut self, mode: VirtualizationMode) -> Self {
        self.virtualization_mode = mode;
        self
    }

    /// Shorthand for [`VirtualizationMode::Recycling`] vs [`VirtualizationMode::Standard`].
    #[must_use]
    pub fn with_recycling(self, recycling: bool) -> Self {
        self.with_virtualization_mode(if recycling {
            VirtualizationMode::Recycling
        } else {
            VirtualizationMode::Standard
        })
    }

    #[must_use]
    pub fn with_scroll_unit(mut self, unit: ScrollUnit) -> Self {
        self.scroll_unit = unit;
        self
    }

    #[must_use]
    pub fn with_scroll_line_delta(mut self, delta: f64) -> Self {
        self.scroll_line_delta = delta;
        self
    }

    #[must_use]
    pub fn with_mouse_wheel_delta(mut self, delta: f64) -> Self {
        self.mouse_wheel_delta = delta;
        self
    }

    #[must_use]
    pub fn with_scroll_line_delta_item(mut self, items: usize) -> Self {
        self.scroll_line_delta_item = items;
        self
    }

    #[must_use]
    pub fn with_mouse_wheel_delta_item(mut self, items: usize) -> Self {
        self.mouse_wheel_delta_item = items;
        self
    }

    #[must_use]
    pub fn with_wheel_axis(mut self, axis: Axis) -> Self {
        self.wheel_axis = Some(axis);
        self
    }

    #[inline]
    pub fn is_recycling(&self) -> bool {
        self.virtualization_mode == VirtualizationMode::Recycling
    }

    /// The spacing mode in effect once the master switch is applied.
    #[inline]
    pub fn effective_spacing(&self) -> SpacingMode {
        if self.spacing_enabled {
            self.spacing_mode
        } else {
            SpacingMode::None
        }
    }

    /// Axis the wheel scrolls when no override is set.
    #[inline]
    pub fn resolved_wheel_axis(&self) -> Axis {
        self.wheel_axis
            .unwrap_or_else(|| self.orientation.main_axis())
    }

    /// Check for structurally invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(size) = self.item_size {
            let ok = |v: f64| v.is_finite() && v > 0.0;
            if !ok(size.width) || !ok(size.height) {
                return Err(ConfigError::InvalidItemSize {
                    width: size.width,
                    height: size.height,
                });
            }
        }
        self.cache.validate()?;
        for (name, value) in [
            ("scroll_line_delta", self.scroll_line_delta),
            ("mouse_wheel_delta", self.mouse_wheel_delta),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidScrollDelta { name, value });
            }
        }
        if self.scroll_line_delta_item == 0 {
            return Err(ConfigError::ZeroItemDelta {
                name: "scroll_line_delta_item",
            });
        }
        if self.mouse_wheel_delta_item == 0 {
            return Err(ConfigError::ZeroItemDelta {
                name: "mouse_wheel_delta_item",
            });
        }
        if let Some(max) = self.max_stretch_size
            && (max.is_nan() || max <= 0.0)
        {
            return Err(ConfigError::InvalidStretchLimit { value: max });
        }
        Ok(())
    }
}
