#![forbid(unsafe_code)]

//! The virtualizing wrap panel.
//!
//! [`VirtualizingWrapPanel`] ties the pieces together for one host surface.
//! Each frame the host calls [`measure`](VirtualizingWrapPanel::measure) and
//! then [`arrange`](VirtualizingWrapPanel::arrange):
//!
//! 1. resolve the child size and fit items into rows,
//! 2. update extent and viewport (clamping the offset),
//! 3. compute the realized item range,
//! 4. realize containers entering the range and virtualize those leaving it,
//! 5. on arrange, place every realized container.
//!
//! # Example
//!
//! ```ignore
//! let mut panel = VirtualizingWrapPanel::new(
//!     PanelConfig::default().with_item_size(Size::new(50.0, 50.0)),
//! );
//! panel.measure(&mut host, Size::new(500.0, 500.0))?;
//! let placements = panel.arrange(&mut host, Size::new(500.0, 500.0));
//! panel.line_down();
//! if panel.take_measure_request() {
//!     panel.measure(&mut host, Size::new(500.0, 500.0))?;
//! }
//! ```

use vwrap_core::geometry::{Axis, Orientation, Point, Rect, Size};

use crate::config::PanelConfig;
use crate::error::LayoutError;
use crate::host::{
    ContainerHost, GroupConstraints, ItemsChanged, ScrollBarPolicy, ScrollBarState,
    ScrollOwnerState, Visibility,
};
use crate::range::{ItemRange, RangeRequest};
use crate::realize::{ContainerId, RealizationStats, Realizer};
use crate::scroll::{ScrollCommand, ScrollDirection, ScrollStep};
use crate::scroll_info::{MakeVisible, ScrollInfo};
use crate::wrap::{RowLayout, resolve_child_size};

/// Where a realized container was placed by the last arrange pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub index: usize,
    pub id: ContainerId,
    /// Panel-relative rect, already shifted by the scroll offset.
    pub rect: Rect,
}

/// A virtualizing wrap panel over containers of type `C`.
#[derive(Debug)]
pub struct VirtualizingWrapPanel<C> {
    config: PanelConfig,
    /// Axis vertical wheel motion scrolls. Derived from the configuration.
    wheel_axis: Axis,
    scroll: ScrollInfo,
    realizer: Realizer<C>,
    layout: RowLayout,
    range: ItemRange,
    group: Option<GroupConstraints>,
    previous_vertical: Visibility,
    previous_horizontal: Visibility,
}

impl<C> Default for VirtualizingWrapPanel<C> {
    fn default() -> Self {
        Self::new(PanelConfig::default())
    }
}

impl<C> VirtualizingWrapPanel<C> {
    #[must_use]
    pub fn new(config: PanelConfig) -> Self {
        Self {
            wheel_axis: config.resolved_wheel_axis(),
            layout: RowLayout::new(config.orientation.axes(), Size::ZERO, 0, 1),
            config,
            scroll: ScrollInfo::new(),
            realizer: Realizer::new(),
            range: ItemRange::EMPTY,
            group: None,
            previous_vertical: Visibility::Collapsed,
            previous_horizontal: Visibility::Collapsed,
        }
    }

    // --- Configuration ---

    #[inline]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Replace the whole configuration. Takes effect on the next measure.
    pub fn set_config(&mut self, config: PanelConfig) {
        self.config = config;
        self.wheel_axis = self.config.resolved_wheel_axis();
        self.scroll.request_measure();
    }

    /// Change the wrap orientation and re-derive the wheel axis.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.config.orientation = orientation;
        self.wheel_axis = self.config.resolved_wheel_axis();
        self.scroll.request_measure();
    }

    /// Override which axis vertical wheel motion scrolls.
    pub fn set_wheel_axis(&mut self, axis: Axis) {
        self.config.wheel_axis = Some(axis);
        self.wheel_axis = axis;
    }

    #[inline]
    pub fn wheel_axis(&self) -> Axis {
        self.wheel_axis
    }

    /// Install or clear the constraints of an enclosing grouping layout.
    ///
    /// While set, the parent owns scrolling: the viewport and offset come from
    /// the constraints and arrange does not shift by the main offset.
    pub fn set_group_constraints(&mut self, constraints: Option<GroupConstraints>) {
        self.group = constraints;
        self.scroll.request_measure();
    }

    #[inline]
    pub fn group_constraints(&self) -> Option<&GroupConstraints> {
        self.group.as_ref()
    }

    // --- Layout passes ---

    /// Run a measure pass against `available` and return the desired size.
    ///
    /// # Errors
    ///
    /// [`LayoutError::Config`] for invalid configuration (including a
    /// page-unit cache from a grouping context), [`LayoutError::Generation`]
    /// when the host cannot produce a container. Containers realized before a
    /// generation failure stay bound.
    pub fn measure<H>(&mut self, host: &mut H, available: Size) -> Result<Size, LayoutError>
    where
        H: ContainerHost<Container = C> + ?Sized,
    {
        let item_count = host.item_count();
        let _span = vwrap_core::debug_span!(
            "wrap_measure",
            available_width = available.width,
            available_height = available.height,
            item_count,
            grouped = self.group.is_some()
        )
        .entered();

        if let Err(err) = self.config.validate() {
            vwrap_core::warn!(error = %err, "invalid panel configuration");
            return Err(err.into());
        }

        if let Some(owner) = host.scroll_owner()
            && self.scrollbar_flapping(owner)
        {
            vwrap_core::debug!("scrollbar visibility flapping, skipping measure");
            return Ok(available);
        }

        let axes = self.config.orientation.axes();
        let available = match &self.group {
            // The group's available size is unbounded; its viewport stands in.
            Some(group) => {
                let viewport = group.viewport.size();
                axes.size(
                    axes.cross(viewport),
                    (axes.main(viewport) - axes.main(group.header_size)).max(0.0),
                )
            }
            None => available,
        };

        let first_realized = self.realizer.first_desired_size();
        let realizer = &mut self.realizer;
        // Only read by the debug event below.
        let (child_size, _source) = resolve_child_size(self.config.item_size, first_realized, || {
            if item_count == 0 {
                Ok(None)
            } else {
                realizer.realize_one(&mut *host, 0).map(Some)
            }
        })?;

        let layout = RowLayout::fit(axes, child_size, available, item_count);
        let extent = layout.extent(available, self.config.effective_spacing());

        let desired = match &self.group {
            Some(group) => {
                self.scroll
                    .assign(group.viewport.size(), extent, group.viewport.origin());
                extent
            }
            None => {
                let desired = available.min(extent);
                if self.scroll.update(desired, extent) {
                    host.invalidate_scroll_info();
                }
                desired
            }
        };

        let request = RangeRequest {
            layout: &layout,
            scroll: &self.scroll,
            cache: self.config.cache,
            virtualizing: self.config.virtualizing,
        };
        let range = match &self.group {
            Some(group) => {
                let request = RangeRequest {
                    cache: group.cache,
                    ..request
                };
                let grouped = request.grouped(
                    group,
                    self.config.scroll_unit,
                    self.config.virtualize_when_grouping,
                );
                match grouped {
                    Ok(range) => range,
                    Err(err) => {
                        vwrap_core::warn!(error = %err, "rejected group constraints");
                        return Err(err.into());
                    }
                }
            }
            None => request.flat(),
        };

        let viewport = self.scroll.viewport();
        let _bound = self.realizer.realize(host, range, Some(viewport))?;
        let _unbound = self
            .realizer
            .virtualize(host, range, self.config.is_recycling());

        vwrap_core::debug!(
            child_source = ?_source,
            items_per_row = layout.items_per_row,
            rows = layout.row_count,
            extent_width = extent.width,
            extent_height = extent.height,
            range = ?range,
            bound = _bound,
            unbound = _unbound,
            realized = self.realizer.len(),
            pooled = self.realizer.pooled(),
            "measured"
        );

        self.layout = layout;
        self.range = range;
        Ok(desired)
    }

    /// Whether an `Auto` scrollbar just went hidden while the scroll surface
    /// is itself mid-measure. Records the current visibilities either way.
    fn scrollbar_flapping(&mut self, owner: ScrollOwnerState) -> bool {
        fn got_hidden(bar: ScrollBarState, previous: Visibility) -> bool {
            bar.policy == ScrollBarPolicy::Auto
                && bar.computed != Visibility::Visible
                && bar.computed != previous
        }

        let vertical = got_hidden(owner.vertical, self.previous_vertical);
        let horizontal = got_hidden(owner.horizontal, self.previous_horizontal);
        self.previous_vertical = owner.vertical.computed;
        self.previous_horizontal = owner.horizontal.computed;
        !owner.measure_valid && (vertical || horizontal)
    }

    /// Place every realized container within `final_size`.
    ///
    /// Returns the placements in ascending index order; each one has also been
    /// passed to [`ContainerHost::arrange`].
    pub fn arrange<H>(&mut self, host: &mut H, final_size: Size) -> Vec<Placement>
    where
        H: ContainerHost<Container = C> + ?Sized,
    {
        let _span = vwrap_core::debug_span!(
            "wrap_arrange",
            final_width = final_size.width,
            final_height = final_size.height,
            realized = self.realizer.len()
        )
        .entered();

        let layout = self.layout;
        let axes = layout.axes;
        let offset = self.scroll.offset();
        let offset_cross = axes.cross_pos(offset);
        // Inside a group the parent panel scrolls the main axis.
        let offset_main = if self.group.is_some() {
            0.0
        } else {
            axes.main_pos(offset)
        };

        let child_size = layout.arrange_child_size(
            final_size,
            self.config.stretch_items,
            self.config.max_stretch_size,
        );
        let spacing = layout.spacing(final_size, child_size, self.config.effective_spacing());
        // A cached group outside the parent viewport gets no main size.
        let collapsed = axes.main(final_size) == 0.0;

        let mut placements = Vec::with_capacity(self.realizer.len());
        for (index, id, container) in self.realizer.iter_mut() {
            let rect = if collapsed {
                Rect::default()
            } else {
                layout.place(index, child_size, spacing, offset_cross, offset_main)
            };
            host.arrange(container, rect);
            placements.push(Placement { index, id, rect });
        }
        placements
    }

    /// React to a collection mutation.
    ///
    /// Affected containers are unbound immediately and a measure is requested.
    pub fn on_items_changed<H>(&mut self, host: &mut H, change: ItemsChanged)
    where
        H: ContainerHost<Container = C> + ?Sized,
    {
        self.realizer
            .on_items_changed(host, change, self.config.is_recycling());
        self.scroll.request_measure();
    }

    /// Drop every realized and pooled container.
    pub fn clear(&mut self) {
        self.realizer.clear();
        self.range = ItemRange::EMPTY;
        self.scroll.request_measure();
    }

    /// Consume a pending measure request raised by scrolling, mutation, or
    /// reconfiguration.
    pub fn take_measure_request(&mut self) -> bool {
        self.scroll.take_measure_request()
    }

    // --- Scrolling ---

    /// Apply a line, page, or wheel command. Returns `true` if the offset moved.
    pub fn scroll(&mut self, command: ScrollCommand) -> bool {
        let (axis, delta) = command.resolve(
            &self.config,
            self.wheel_axis,
            self.layout.child_size,
            self.scroll.viewport(),
        );
        vwrap_core::trace!(?command, ?axis, delta, "scroll command");
        self.scroll.scroll_by(axis, delta)
    }

    fn step(&mut self, step: ScrollStep, direction: ScrollDirection) -> bool {
        self.scroll(ScrollCommand::new(step, direction))
    }

    pub fn line_up(&mut self) -> bool {
        self.step(ScrollStep::Line, ScrollDirection::Up)
    }

    pub fn line_down(&mut self) -> bool {
        self.step(ScrollStep::Line, ScrollDirection::Down)
    }

    pub fn line_left(&mut self) -> bool {
        self.step(ScrollStep::Line, ScrollDirection::Left)
    }

    pub fn line_right(&mut self) -> bool {
        self.step(ScrollStep::Line, ScrollDirection::Right)
    }

    pub fn page_up(&mut self) -> bool {
        self.step(ScrollStep::Page, ScrollDirection::Up)
    }

    pub fn page_down(&mut self) -> bool {
        self.step(ScrollStep::Page, ScrollDirection::Down)
    }

    pub fn page_left(&mut self) -> bool {
        self.step(ScrollStep::Page, ScrollDirection::Left)
    }

    pub fn page_right(&mut self) -> bool {
        self.step(ScrollStep::Page, ScrollDirection::Right)
    }

    pub fn wheel_up(&mut self) -> bool {
        self.step(ScrollStep::Wheel, ScrollDirection::Up)
    }

    pub fn wheel_down(&mut self) -> bool {
        self.step(ScrollStep::Wheel, ScrollDirection::Down)
    }

    pub fn wheel_left(&mut self) -> bool {
        self.step(ScrollStep::Wheel, ScrollDirection::Left)
    }

    pub fn wheel_right(&mut self) -> bool {
        self.step(ScrollStep::Wheel, ScrollDirection::Right)
    }

    pub fn set_horizontal_offset(&mut self, offset: f64) -> bool {
        self.scroll.set_offset(Axis::Horizontal, offset)
    }

    pub fn set_vertical_offset(&mut self, offset: f64) -> bool {
        self.scroll.set_offset(Axis::Vertical, offset)
    }

    /// Scroll minimally so `target` (content coordinates) is in view.
    pub fn make_visible(&mut self, target: Rect) -> MakeVisible {
        self.scroll.make_visible(target)
    }

    /// Scroll so the row holding `index` starts at the top of the viewport.
    pub fn bring_index_into_view(&mut self, index: usize) -> bool {
        let row_start = self.layout.row_of(index) as f64 * self.layout.row_main();
        self.scroll
            .set_offset(self.layout.axes.main_axis(), row_start)
    }

    // --- Read-only state ---

    #[inline]
    pub fn extent(&self) -> Size {
        self.scroll.extent()
    }

    #[inline]
    pub fn viewport(&self) -> Size {
        self.scroll.viewport()
    }

    #[inline]
    pub fn offset(&self) -> Point {
        self.scroll.offset()
    }

    #[inline]
    pub fn scroll_info(&self) -> &ScrollInfo {
        &self.scroll
    }

    /// Item range realized by the last measure pass.
    #[inline]
    pub fn item_range(&self) -> ItemRange {
        self.range
    }

    /// Row geometry from the last measure pass.
    #[inline]
    pub fn row_layout(&self) -> &RowLayout {
        &self.layout
    }

    #[inline]
    pub fn stats(&self) -> RealizationStats {
        self.realizer.stats()
    }

    #[inline]
    pub fn realizer(&self) -> &Realizer<C> {
        &self.realizer
    }

    #[inline]
    pub fn container(&self, index: usize) -> Option<&C> {
        self.realizer.container(index)
    }

    #[inline]
    pub fn slot_from_index(&self, index: usize) -> Option<usize> {
        self.realizer.slot_from_index(index)
    }

    #[inline]
    pub fn index_from_slot(&self, slot: usize) -> Option<usize> {
        self.realizer.index_from_slot(slot)
    }
}
