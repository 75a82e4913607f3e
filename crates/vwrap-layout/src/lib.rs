#![forbid(unsafe_code)]

//! Virtualizing wrap-panel layout engine.
//!
//! Lays out a large collection of uniformly sized items in wrapping rows and
//! keeps only the items in and around the viewport realized as containers.
//!
//! - [`VirtualizingWrapPanel`] - measure/arrange orchestration and scroll entry points
//! - [`scroll_info`] - extent, viewport, and clamped offset
//! - [`range`] - which item indices must be realized
//! - [`realize`] - container realization, virtualization, and the recycle pool
//! - [`wrap`] - child size, rows, spacing, and placement
//! - [`scroll`] - line/page/wheel commands
//! - [`host`] - what the embedding surface provides
//!
//! Vertical and horizontal wrap share one implementation: all arithmetic runs
//! on the orientation-relative main (scroll) and cross (row-fill) axes of an
//! [`AxisMap`](vwrap_core::geometry::AxisMap).

pub mod config;
pub mod error;
pub mod host;
pub mod panel;
pub mod range;
pub mod realize;
pub mod scroll;
pub mod scroll_info;
pub mod wrap;

pub use config::{CacheLength, CacheUnit, PanelConfig, ScrollUnit, SpacingMode, VirtualizationMode};
pub use error::{ConfigError, GenerateError, LayoutError};
pub use host::{
    ContainerHost, GroupConstraints, ItemsAction, ItemsChanged, ScrollBarPolicy, ScrollBarState,
    ScrollOwnerState, Visibility,
};
pub use panel::{Placement, VirtualizingWrapPanel};
pub use range::ItemRange;
pub use realize::{ContainerId, RealizationStats, Realizer};
pub use scroll::{ScrollCommand, ScrollDirection, ScrollStep};
pub use scroll_info::{MakeVisible, ScrollInfo};
pub use vwrap_core::geometry::{Axis, Orientation, Point, Rect, Size};
pub use wrap::{ChildSizeSource, RowLayout, Spacing};
