#![forbid(unsafe_code)]

//! Collaborator interfaces.
//!
//! The engine never owns items. It talks to the host through
//! [`ContainerHost`], which creates, binds and measures containers, and learns
//! about collection mutations through [`ItemsChanged`] notifications.

use vwrap_core::geometry::{Rect, Size};

use crate::config::CacheLength;
use crate::error::GenerateError;

/// Host-side container generation and measurement.
///
/// `Container` is whatever the host renders an item with. The engine keeps
/// realized containers in its slot table and recycle pool and only hands them
/// back to the host through these callbacks.
pub trait ContainerHost {
    type Container;

    /// Number of items in the backing collection.
    fn item_count(&self) -> usize;

    /// Create a fresh container for `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] when the collection has no item at `index`.
    fn generate(&mut self, index: usize) -> Result<Self::Container, GenerateError>;

    /// Bind `container` to the item at `index`. Called for fresh and reused
    /// containers alike.
    fn prepare(&mut self, container: &mut Self::Container, index: usize);

    /// Measure `container` against `available` and return its desired size.
    fn measure(&mut self, container: &mut Self::Container, available: Size) -> Size;

    /// Unbind hook for a container entering the recycle pool.
    fn recycle(&mut self, container: &mut Self::Container) {
        let _ = container;
    }

    /// Offer nested-virtualization constraints to `container`.
    ///
    /// Containers that are themselves virtualizing group hosts accept them and
    /// return `true`; they are then measured against the constrained viewport.
    fn propagate_constraints(
        &mut self,
        container: &mut Self::Container,
        constraints: &GroupConstraints,
    ) -> bool {
        let _ = (container, constraints);
        false
    }

    /// Place `container` at `rect` (relative to the panel).
    fn arrange(&mut self, container: &mut Self::Container, rect: Rect) {
        let _ = (container, rect);
    }

    /// Scrollbar state of the surrounding scroll surface, if any.
    fn scroll_owner(&self) -> Option<ScrollOwnerState> {
        None
    }

    /// Request that scrollbars re-read extent, viewport, and offset.
    fn invalidate_scroll_info(&mut self) {}
}

/// Constraints a parent grouping layout imposes on a nested panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupConstraints {
    /// The parent's viewport in this group's coordinates.
    pub viewport: Rect,
    pub cache: CacheLength,
    /// Desired size of the group header preceding the items.
    pub header_size: Size,
}

impl GroupConstraints {
    pub const fn new(viewport: Rect, cache: CacheLength, header_size: Size) -> Self {
        Self {
            viewport,
            cache,
            header_size,
        }
    }
}

/// Kind of collection mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemsAction {
    Insert,
    Remove,
    Replace,
    Move,
}

/// A collection mutation notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemsChanged {
    pub action: ItemsAction,
    /// First affected index (destination for moves).
    pub position: usize,
    /// Source index for moves; equal to `position` otherwise.
    pub old_position: usize,
    pub count: usize,
}

impl ItemsChanged {
    pub const fn insert(position: usize, count: usize) -> Self {
        Self {
            action: ItemsAction::Insert,
            position,
            old_position: position,
            count,
        }
    }

    pub const fn remove(position: usize, count: usize) -> Self {
        Self {
            action: ItemsAction::Remove,
            position,
            old_position: position,
            count,
        }
    }

    pub const fn replace(position: usize, count: usize) -> Self {
        Self {
            action: ItemsAction::Replace,
            position,
            old_position: position,
            count,
        }
    }

    pub const fn moved(old_position: usize, position: usize, count: usize) -> Self {
        Self {
            action: ItemsAction::Move,
            position,
            old_position,
            count,
        }
    }
}

/// Scrollbar display policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScrollBarPolicy {
    Disabled,
    #[default]
    Auto,
    Hidden,
    Visible,
}

/// Whether a scrollbar is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    Visible,
    #[default]
    Collapsed,
}

/// One scrollbar as reported by the scroll surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollBarState {
    pub policy: ScrollBarPolicy,
    pub computed: Visibility,
}

/// Scroll surface state read at the start of each measure pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOwnerState {
    pub vertical: ScrollBarState,
    pub horizontal: ScrollBarState,
    /// Whether the surface's own measure is currently valid.
    pub measure_valid: bool,
}
