// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered rendering: one overlay root per document, one slot per open disclosure.
//!
//! The [`OverlayRoot`] is a top-level tree root placed after the body, so its
//! content is outside every layout ancestor of the widget that opened it and
//! stacks above the body. Each [`Portal`] claims a slot while its owner is open
//! and releases it on close.
//!
//! Nothing is mounted before the surface is ready. A portal asked to open earlier
//! stays [`PortalState::Pending`] and mounts on the next sync after
//! [`OverlayRoot::attach_surface`].
//!
//! ```rust
//! use kurbo::Rect;
//! use vitrine_primitives::layer::{OverlayRoot, Portal, PortalChange};
//! use vitrine_tree::Tree;
//!
//! let mut tree = Tree::new();
//! let mut overlay = OverlayRoot::new(&mut tree, Rect::new(0.0, 0.0, 800.0, 600.0));
//! let mut portal = Portal::new();
//!
//! assert_eq!(portal.sync(true, &mut overlay, &mut tree, "dialog"), PortalChange::Deferred);
//! overlay.attach_surface();
//! let PortalChange::Mounted(slot) = portal.sync(true, &mut overlay, &mut tree, "dialog") else {
//!     unreachable!()
//! };
//! assert!(tree.contains(overlay.element(), slot));
//!
//! assert_eq!(portal.sync(false, &mut overlay, &mut tree, "dialog"), PortalChange::Unmounted);
//! assert!(!tree.is_alive(slot));
//! assert!(overlay.stats().is_balanced());
//! ```

use alloc::vec::Vec;
use kurbo::Rect;
use vitrine_tree::{Element, ElementFlags, ElementId, ElementKind, Tree};

/// Stacking level of the overlay root. Slots stack above it in mount order.
pub const OVERLAY_Z: i32 = 1000;

/// Identifier of a claimed slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(u32);

/// Proof of one mount, consumed by exactly one [`OverlayRoot::unmount`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a mounted slot stays in the overlay until its handle is unmounted"]
pub struct MountHandle {
    slot: SlotId,
    element: ElementId,
}

impl MountHandle {
    /// The slot element content is mounted under.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The slot id.
    pub fn slot(&self) -> SlotId {
        self.slot
    }
}

/// Lifetime mount counters of an overlay root.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerStats {
    /// Slots ever mounted.
    pub mounts: u64,
    /// Slots ever unmounted.
    pub unmounts: u64,
}

impl LayerStats {
    /// Whether every mount has been matched by an unmount.
    pub fn is_balanced(&self) -> bool {
        self.mounts == self.unmounts
    }
}

/// The document's top-level layer.
#[derive(Debug)]
pub struct OverlayRoot {
    element: ElementId,
    viewport: Rect,
    ready: bool,
    slots: Vec<(SlotId, ElementId)>,
    next_slot: u32,
    stats: LayerStats,
}

impl OverlayRoot {
    /// Insert the overlay root as the last root of `tree`.
    pub fn new(tree: &mut Tree, viewport: Rect) -> Self {
        let element = tree.insert(
            None,
            Element::new(ElementKind::Generic, "overlay-root", viewport)
                .with_z_index(OVERLAY_Z)
                .with_flags(ElementFlags::VISIBLE),
        );
        Self {
            element,
            viewport,
            ready: false,
            slots: Vec::new(),
            next_slot: 0,
            stats: LayerStats::default(),
        }
    }

    /// The overlay root element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Whether content may be mounted.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Mark the surface ready. Returns `true` on the first call.
    pub fn attach_surface(&mut self) -> bool {
        let first = !self.ready;
        if first {
            tracing::debug!("overlay surface attached");
        }
        self.ready = true;
        first
    }

    /// Claim a slot. Returns `None` while the surface is not ready.
    pub fn mount(&mut self, tree: &mut Tree, label: &str) -> Option<MountHandle> {
        if !self.ready {
            return None;
        }
        let slot = SlotId(self.next_slot);
        self.next_slot += 1;
        // Later slots stack above earlier ones.
        let z = OVERLAY_Z.saturating_add_unsigned(self.next_slot);
        let element = tree.insert(
            Some(self.element),
            Element::new(ElementKind::Generic, label, self.viewport)
                .with_z_index(z)
                .with_flags(ElementFlags::VISIBLE),
        );
        self.slots.push((slot, element));
        self.stats.mounts += 1;
        tracing::debug!(slot = slot.0, label, "overlay slot mounted");
        Some(MountHandle { slot, element })
    }

    /// Release a slot and remove everything mounted in it.
    pub fn unmount(&mut self, tree: &mut Tree, handle: MountHandle) {
        let before = self.slots.len();
        self.slots.retain(|(slot, _)| *slot != handle.slot);
        debug_assert_eq!(before, self.slots.len() + 1, "slot unmounted twice");
        tree.remove(handle.element);
        self.stats.unmounts += 1;
        tracing::debug!(slot = handle.slot.0, "overlay slot unmounted");
    }

    /// Number of occupied slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slot elements in mount order.
    pub fn slot_elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.slots.iter().map(|(_, element)| *element)
    }

    /// Lifetime counters.
    pub fn stats(&self) -> LayerStats {
        self.stats
    }
}

/// Mount state of one portal.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum PortalState {
    /// Closed, nothing mounted.
    #[default]
    Idle,
    /// Open, waiting for the surface.
    Pending,
    /// Open and mounted.
    Mounted(MountHandle),
}

/// What a [`Portal::sync`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PortalChange {
    /// A slot was mounted; content goes under this element.
    Mounted(ElementId),
    /// The slot was unmounted.
    Unmounted,
    /// Open, but the surface is not ready yet.
    Deferred,
    /// Nothing to do.
    Unchanged,
}

/// Ties a disclosure's open state to a slot in the overlay root.
#[derive(Debug, Default)]
pub struct Portal {
    state: PortalState,
}

impl Portal {
    /// An idle portal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &PortalState {
        &self.state
    }

    /// The mounted slot element, if any.
    pub fn slot(&self) -> Option<ElementId> {
        match &self.state {
            PortalState::Mounted(handle) => Some(handle.element()),
            _ => None,
        }
    }

    /// Bring the portal in line with `open`.
    pub fn sync(
        &mut self,
        open: bool,
        overlay: &mut OverlayRoot,
        tree: &mut Tree,
        label: &str,
    ) -> PortalChange {
        match (open, core::mem::take(&mut self.state)) {
            (true, PortalState::Mounted(handle)) => {
                self.state = PortalState::Mounted(handle);
                PortalChange::Unchanged
            }
            (true, previous) => match overlay.mount(tree, label) {
                Some(handle) => {
                    let element = handle.element();
                    self.state = PortalState::Mounted(handle);
                    PortalChange::Mounted(element)
                }
                None => {
                    let was_pending = previous == PortalState::Pending;
                    self.state = PortalState::Pending;
                    if was_pending {
                        PortalChange::Unchanged
                    } else {
                        PortalChange::Deferred
                    }
                }
            },
            (false, PortalState::Mounted(handle)) => {
                overlay.unmount(tree, handle);
                PortalChange::Unmounted
            }
            (false, PortalState::Pending | PortalState::Idle) => PortalChange::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Tree, OverlayRoot) {
        let mut tree = Tree::new();
        tree.insert(
            None,
            Element::new(ElementKind::Generic, "body", Rect::new(0.0, 0.0, 100.0, 100.0)),
        );
        let overlay = OverlayRoot::new(&mut tree, Rect::new(0.0, 0.0, 100.0, 100.0));
        (tree, overlay)
    }

    #[test]
    fn overlay_root_follows_body() {
        let (tree, overlay) = setup();
        assert_eq!(tree.roots().last(), Some(&overlay.element()));
        assert_eq!(tree.roots().len(), 2);
    }

    #[test]
    fn nothing_mounts_before_surface_is_ready() {
        let (mut tree, mut overlay) = setup();
        let mut portal = Portal::new();
        assert_eq!(
            portal.sync(true, &mut overlay, &mut tree, "p"),
            PortalChange::Deferred
        );
        assert_eq!(
            portal.sync(true, &mut overlay, &mut tree, "p"),
            PortalChange::Unchanged
        );
        assert_eq!(overlay.slot_count(), 0);
        assert_eq!(portal.state(), &PortalState::Pending);

        // Closing before the surface is ready never mounted, so nothing unmounts.
        assert_eq!(
            portal.sync(false, &mut overlay, &mut tree, "p"),
            PortalChange::Unchanged
        );
        assert_eq!(overlay.stats(), LayerStats::default());
    }

    #[test]
    fn open_close_cycles_balance() {
        let (mut tree, mut overlay) = setup();
        assert!(overlay.attach_surface());
        assert!(!overlay.attach_surface());
        let mut portal = Portal::new();
        for n in 1..=5_u64 {
            assert!(matches!(
                portal.sync(true, &mut overlay, &mut tree, "p"),
                PortalChange::Mounted(_)
            ));
            assert_eq!(overlay.slot_count(), 1);
            assert_eq!(
                portal.sync(false, &mut overlay, &mut tree, "p"),
                PortalChange::Unmounted
            );
            assert_eq!(overlay.slot_count(), 0);
            assert_eq!(
                overlay.stats(),
                LayerStats {
                    mounts: n,
                    unmounts: n
                }
            );
        }
    }

    #[test]
    fn later_slots_stack_above_earlier_ones() {
        let (mut tree, mut overlay) = setup();
        overlay.attach_surface();
        let mut first = Portal::new();
        let mut second = Portal::new();
        first.sync(true, &mut overlay, &mut tree, "first");
        second.sync(true, &mut overlay, &mut tree, "second");
        let (Some(a), Some(b)) = (first.slot(), second.slot()) else {
            panic!("both portals should be mounted");
        };
        assert!(tree.get(b).unwrap().z_index > tree.get(a).unwrap().z_index);
        assert_eq!(overlay.slot_elements().collect::<Vec<_>>(), [a, b]);
    }
}
