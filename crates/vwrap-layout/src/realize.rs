#![forbid(unsafe_code)]

//! Container lifecycle: realization, virtualization, and the recycle pool.
//!
//! Realized containers live in a slot table ordered by item index, so a slot
//! position and an item index translate into each other by binary search.
//! Containers leaving the realized range go to a pool (recycling mode) or are
//! dropped (standard mode). The pool is private to [`Realizer`]; nothing else
//! can reach a pooled container.
//!
//! After a reconcile every index of the range has a bound, measured container
//! and no index outside it does.

use std::fmt;

use vwrap_core::geometry::{Rect, Size};

use crate::config::CacheLength;
use crate::error::GenerateError;
use crate::host::{ContainerHost, GroupConstraints, ItemsAction, ItemsChanged};
use crate::range::ItemRange;

/// Identity of a container instance across bind/recycle cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Counters for container churn, cumulative since creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RealizationStats {
    /// Containers created by the host.
    pub generated: u64,
    /// Containers taken from the pool and rebound.
    pub reused: u64,
    /// Containers returned to the pool.
    pub recycled: u64,
    /// Containers dropped.
    pub discarded: u64,
}

#[derive(Debug)]
struct Slot<C> {
    index: usize,
    id: ContainerId,
    desired: Size,
    container: C,
}

#[derive(Debug)]
struct Pooled<C> {
    id: ContainerId,
    container: C,
}

/// Owner of every realized and pooled container.
#[derive(Debug)]
pub struct Realizer<C> {
    slots: Vec<Slot<C>>,
    pool: Vec<Pooled<C>>,
    /// Largest number of simultaneously realized containers seen so far.
    pool_capacity: usize,
    next_id: u64,
    stats: RealizationStats,
}

impl<C> Default for Realizer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Realizer<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            pool: Vec::new(),
            pool_capacity: 0,
            next_id: 0,
            stats: RealizationStats::default(),
        }
    }

    /// Number of realized containers.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of containers waiting in the recycle pool.
    #[inline]
    pub fn pooled(&self) -> usize {
        self.pool.len()
    }

    #[inline]
    pub fn stats(&self) -> RealizationStats {
        self.stats
    }

    /// Slot position of the container bound to `index`.
    pub fn slot_from_index(&self, index: usize) -> Option<usize> {
        self.slots.binary_search_by_key(&index, |s| s.index).ok()
    }

    /// Item index bound at slot position `slot`.
    pub fn index_from_slot(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).map(|s| s.index)
    }

    pub fn container(&self, index: usize) -> Option<&C> {
        self.slot_from_index(index)
            .map(|pos| &self.slots[pos].container)
    }

    pub fn container_id(&self, index: usize) -> Option<ContainerId> {
        self.slot_from_index(index).map(|pos| self.slots[pos].id)
    }

    /// Desired size recorded for the container bound to `index`.
    pub fn desired_size(&self, index: usize) -> Option<Size> {
        self.slot_from_index(index)
            .map(|pos| self.slots[pos].desired)
    }

    /// Desired size of the lowest realized index.
    pub fn first_desired_size(&self) -> Option<Size> {
        self.slots.first().map(|s| s.desired)
    }

    /// Realized item indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().map(|s| s.index)
    }

    /// Realized `(index, id, container)` triples in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, ContainerId, &C)> + '_ {
        self.slots.iter().map(|s| (s.index, s.id, &s.container))
    }

    /// Mutable variant of [`Realizer::iter`].
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, ContainerId, &mut C)> + '_ {
        self.slots
            .iter_mut()
            .map(|s| (s.index, s.id, &mut s.container))
    }

    /// Bind and measure a container for every index in `range`.
    ///
    /// Walks the range in ascending order. Indices that already have a
    /// container are left alone apart from nested-group constraint propagation.
    /// When `nested_viewport` is set, containers that accept
    /// [`GroupConstraints`] get that viewport with a zero cache and are
    /// re-measured against it.
    ///
    /// Returns the number of newly bound containers.
    ///
    /// # Errors
    ///
    /// Stops at the first index the host cannot generate.
    pub fn realize<H>(
        &mut self,
        host: &mut H,
        range: ItemRange,
        nested_viewport: Option<Size>,
    ) -> Result<usize, GenerateError>
    where
        H: ContainerHost<Container = C> + ?Sized,
    {
        let nested = nested_viewport.map(|viewport| {
            GroupConstraints::new(Rect::from_size(viewport), CacheLength::none(), Size::ZERO)
        });
        let mut bound = 0;
        for index in range.iter() {
            let pos = match self.slots.binary_search_by_key(&index, |s| s.index) {
                Ok(pos) => pos,
                Err(pos) => {
                    self.bind(host, index, pos)?;
                    bound += 1;
                    pos
                }
            };
            if let Some(constraints) = &nested {
                let slot = &mut self.slots[pos];
                if host.propagate_constraints(&mut slot.container, constraints) {
                    slot.desired = host.measure(&mut slot.container, constraints.viewport.size());
                }
            }
        }
        self.pool_capacity = self.pool_capacity.max(self.slots.len());
        self.check_slot_table();
        Ok(bound)
    }

    /// Bind a single index, if it is not bound yet, and return its desired size.
    ///
    /// Used to sample the child size when none is known yet.
    ///
    /// # Errors
    ///
    /// Propagates the host's generation failure.
    pub fn realize_one<H>(&mut self, host: &mut H, index: usize) -> Result<Size, GenerateError>
    where
        H: ContainerHost<Container = C> + ?Sized,
    {
        let pos = match self.slots.binary_search_by_key(&index, |s| s.index) {
            Ok(pos) => pos,
            Err(pos) => {
                self.bind(host, index, pos)?;
                pos
            }
        };
        self.pool_capacity = self.pool_capacity.max(self.slots.len());
        Ok(self.slots[pos].desired)
    }

    fn bind<H>(&mut self, host: &mut H, index: usize, pos: usize) -> Result<(), GenerateError>
    where
        H: ContainerHost<Container = C> + ?Sized,
    {
        let (id, mut container) = match self.pool.pop() {
            Some(pooled) => {
                self.stats.reused += 1;
                vwrap_core::trace!(index, id = pooled.id.get(), "reusing pooled container");
                (pooled.id, pooled.container)
            }
            None => {
                let container = host.generate(index)?;
                let id = ContainerId(self.next_id);
                self.next_id += 1;
                self.stats.generated += 1;
                vwrap_core::trace!(index, id = id.get(), "generated container");
                (id, container)
            }
        };
        host.prepare(&mut container, index);
        let desired = host.measure(&mut container, Size::INFINITE);
        self.slots.insert(
            pos,
            Slot {
                index,
                id,
                desired,
                container,
            },
        );
        Ok(())
    }

    /// Unbind every container whose index lies outside `range`.
    ///
    /// Walks slots from the highest position down. Returns the number of
    /// containers unbound.
    pub fn virtualize<H>(&mut self, host: &mut H, range: ItemRange, recycling: bool) -> usize
    where
        H: ContainerHost<Container = C> + ?Sized,
    {
        let mut unbound = 0;
        for pos in (0..self.slots.len()).rev() {
            if !range.contains(self.slots[pos].index) {
                self.unbind(host, pos, recycling);
                unbound += 1;
            }
        }
        self.check_slot_table();
        unbound
    }

    /// Unbind containers for indices in `[start, start + count)`.
    fn unbind_window<H>(
        &mut self,
        host: &mut H,
        start: usize,
        count: usize,
        recycling: bool,
    ) -> usize
    where
        H: ContainerHost<Container = C> + ?Sized,
    {
        let end = start.saturating_add(count);
        let first = self.slots.partition_point(|s| s.index < start);
        let last = self.slots.partition_point(|s| s.index < end);
        for pos in (first..last).rev() {
            self.unbind(host, pos, recycling);
        }
        last - first
    }

    fn unbind<H>(&mut self, host: &mut H, pos: usize, recycling: bool)
    where
        H: ContainerHost<Container = C> + ?Sized,
    {
        let pool = recycling && self.pool.len() < self.pool_capacity;
        vwrap_core::trace!(
            index = self.slots[pos].index,
            id = self.slots[pos].id.get(),
            pooled = pool,
            "unbinding container"
        );
        let mut slot = self.slots.remove(pos);
        if pool {
            assert!(
                !self.pool.iter().any(|p| p.id == slot.id),
                "container {} recycled twice",
                slot.id
            );
            host.recycle(&mut slot.container);
            let Slot { id, container, .. } = slot;
            self.pool.push(Pooled { id, container });
            self.stats.recycled += 1;
        } else {
            self.stats.discarded += 1;
        }
    }

    /// Shift bound indices `>= from` by `delta`.
    fn shift(&mut self, from: usize, delta: isize) {
        for slot in self.slots.iter_mut().filter(|s| s.index >= from) {
            slot.index = slot.index.saturating_add_signed(delta);
        }
    }

    /// React to a collection mutation before the next range computation.
    ///
    /// Removed, replaced, and moved-out indices lose their containers
    /// immediately. Surviving containers keep their items and have their
    /// indices shifted to the items' new positions.
    pub fn on_items_changed<H>(
        &mut self,
        host: &mut H,
        change: ItemsChanged,
        recycling: bool,
    ) -> usize
    where
        H: ContainerHost<Container = C> + ?Sized,
    {
        let count = change.count;
        let delta = isize::try_from(count).unwrap_or(isize::MAX);
        let unbound = match change.action {
            ItemsAction::Insert => {
                self.shift(change.position, delta);
                0
            }
            ItemsAction::Remove => {
                let unbound = self.unbind_window(host, change.position, count, recycling);
                self.shift(change.position.saturating_add(count), -delta);
                unbound
            }
            ItemsAction::Replace => self.unbind_window(host, change.position, count, recycling),
            ItemsAction::Move => {
                let unbound = self.unbind_window(host, change.old_position, count, recycling);
                self.shift(change.old_position.saturating_add(count), -delta);
                self.shift(change.position, delta);
                unbound
            }
        };
        vwrap_core::debug!(
            action = ?change.action,
            position = change.position,
            count,
            unbound,
            "items changed"
        );
        self.check_slot_table();
        unbound
    }

    /// Drop every realized and pooled container.
    pub fn clear(&mut self) {
        self.stats.discarded += (self.slots.len() + self.pool.len()) as u64;
        self.slots.clear();
        self.pool.clear();
    }

    fn check_slot_table(&self) {
        assert!(
            self.slots.windows(2).all(|w| w[0].index < w[1].index),
            "slot table out of order"
        );
    }
}
