#![forbid(unsafe_code)]

//! Line, page, and wheel scroll commands.
//!
//! Commands resolve to a signed delta on one physical axis. Applying the delta
//! always goes through [`ScrollInfo::set_offset`](crate::scroll_info::ScrollInfo::set_offset),
//! so every command is clamped the same way.

use vwrap_core::geometry::{Axis, Size};

use crate::config::{PanelConfig, ScrollUnit};

/// Step size of a scroll command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollStep {
    Line,
    Page,
    Wheel,
}

/// Physical direction of a scroll command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// `-1.0` toward the content start, `1.0` toward the end.
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Up | Self::Left => -1.0,
            Self::Down | Self::Right => 1.0,
        }
    }

    /// The direction with the same sign on the other axis.
    #[inline]
    const fn transpose(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Down => Self::Right,
            Self::Left => Self::Up,
            Self::Right => Self::Down,
        }
    }
}

/// A scroll request from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollCommand {
    pub step: ScrollStep,
    pub direction: ScrollDirection,
}

impl ScrollCommand {
    pub const LINE_UP: Self = Self::new(ScrollStep::Line, ScrollDirection::Up);
    pub const LINE_DOWN: Self = Self::new(ScrollStep::Line, ScrollDirection::Down);
    pub const LINE_LEFT: Self = Self::new(ScrollStep::Line, ScrollDirection::Left);
    pub const LINE_RIGHT: Self = Self::new(ScrollStep::Line, ScrollDirection::Right);
    pub const PAGE_UP: Self = Self::new(ScrollStep::Page, ScrollDirection::Up);
    pub const PAGE_DOWN: Self = Self::new(ScrollStep::Page, ScrollDirection::Down);
    pub const PAGE_LEFT: Self = Self::new(ScrollStep::Page, ScrollDirection::Left);
    pub const PAGE_RIGHT: Self = Self::new(ScrollStep::Page, ScrollDirection::Right);
    pub const WHEEL_UP: Self = Self::new(ScrollStep::Wheel, ScrollDirection::Up);
    pub const WHEEL_DOWN: Self = Self::new(ScrollStep::Wheel, ScrollDirection::Down);
    pub const WHEEL_LEFT: Self = Self::new(ScrollStep::Wheel, ScrollDirection::Left);
    pub const WHEEL_RIGHT: Self = Self::new(ScrollStep::Wheel, ScrollDirection::Right);

    pub const fn new(step: ScrollStep, direction: ScrollDirection) -> Self {
        Self { step, direction }
    }

    /// Resolve the command to `(axis, delta)`.
    ///
    /// `wheel_axis` is the axis vertical wheel motion should scroll. When it is
    /// horizontal, wheel up/down are routed to wheel left/right.
    pub fn resolve(
        self,
        config: &PanelConfig,
        wheel_axis: Axis,
        child_size: Size,
        viewport: Size,
    ) -> (Axis, f64) {
        let reroute = self.step == ScrollStep::Wheel
            && self.direction.axis() == Axis::Vertical
            && wheel_axis != Axis::Vertical;
        let direction = if reroute {
            self.direction.transpose()
        } else {
            self.direction
        };
        let axis = direction.axis();
        let viewport_len = viewport.get(axis);
        let child_len = child_size.get(axis);

        let amount = match (self.step, config.scroll_unit) {
            (ScrollStep::Page, _) => viewport_len,
            (ScrollStep::Line, ScrollUnit::Pixel) => config.scroll_line_delta,
            (ScrollStep::Wheel, ScrollUnit::Pixel) => config.mouse_wheel_delta,
            (ScrollStep::Line, ScrollUnit::Item) => {
                item_step(child_len, config.scroll_line_delta_item, viewport_len)
            }
            (ScrollStep::Wheel, ScrollUnit::Item) => {
                item_step(child_len, config.mouse_wheel_delta_item, viewport_len)
            }
        };
        (axis, direction.sign() * amount)
    }
}

/// `items` children along an axis, never more than one viewport.
fn item_step(child_len: f64, items: usize, viewport_len: f64) -> f64 {
    (child_len * items as f64).min(viewport_len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vwrap_core::geometry::Orientation;

    const CHILD: Size = Size {
        width: 40.0,
        height: 50.0,
    };
    const VIEWPORT: Size = Size {
        width: 300.0,
        height: 120.0,
    };

    fn resolve(command: ScrollCommand, config: &PanelConfig) -> (Axis, f64) {
        command.resolve(config, config.resolved_wheel_axis(), CHILD, VIEWPORT)
    }

    #[test]
    fn pixel_steps_use_configured_deltas() {
        let config = PanelConfig::default();
        let delta = |command| resolve(command, &config);
        assert_eq!(delta(ScrollCommand::LINE_DOWN), (Axis::Vertical, 16.0));
        assert_eq!(delta(ScrollCommand::LINE_LEFT), (Axis::Horizontal, -16.0));
        assert_eq!(delta(ScrollCommand::WHEEL_UP), (Axis::Vertical, -48.0));
        assert_eq!(delta(ScrollCommand::WHEEL_RIGHT), (Axis::Horizontal, 48.0));
    }

    #[test]
    fn page_steps_use_viewport_of_scrolled_axis() {
        let config = PanelConfig::default();
        let delta = |command| resolve(command, &config);
        assert_eq!(delta(ScrollCommand::PAGE_DOWN), (Axis::Vertical, 120.0));
        assert_eq!(delta(ScrollCommand::PAGE_LEFT), (Axis::Horizontal, -300.0));
    }

    #[test]
    fn item_steps_are_capped_at_viewport() {
        let config = PanelConfig::default().with_scroll_unit(ScrollUnit::Item);
        let delta = |command| resolve(command, &config);
        assert_eq!(delta(ScrollCommand::LINE_DOWN), (Axis::Vertical, 50.0));
        // Three rows of 50 exceed the 120 viewport.
        assert_eq!(delta(ScrollCommand::WHEEL_DOWN), (Axis::Vertical, 120.0));
        assert_eq!(delta(ScrollCommand::WHEEL_LEFT), (Axis::Horizontal, -120.0));
        assert_eq!(delta(ScrollCommand::PAGE_UP), (Axis::Vertical, -120.0));
    }

    #[test]
    fn horizontal_wrap_routes_wheel_to_horizontal_axis() {
        let config = PanelConfig::default().with_orientation(Orientation::Horizontal);
        let delta = |command| resolve(command, &config);
        assert_eq!(delta(ScrollCommand::WHEEL_DOWN), (Axis::Horizontal, 48.0));
        assert_eq!(delta(ScrollCommand::WHEEL_UP), (Axis::Horizontal, -48.0));
        // Line commands are never rerouted.
        assert_eq!(delta(ScrollCommand::LINE_DOWN), (Axis::Vertical, 16.0));
    }

    #[test]
    fn explicit_wheel_axis_overrides_orientation() {
        let config = PanelConfig::default()
            .with_orientation(Orientation::Horizontal)
            .with_wheel_axis(Axis::Vertical);
        let delta = resolve(ScrollCommand::WHEEL_DOWN, &config);
        assert_eq!(delta, (Axis::Vertical, 48.0));
    }
}
