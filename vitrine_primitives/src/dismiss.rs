// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-interaction dismissal for open Select content.

use smallvec::SmallVec;
use vitrine_event_state::listeners::{ListenerId, ListenerKind, ListenerRegistry};
use vitrine_tree::{ElementId, Tree};

use crate::types::WidgetId;

/// Closes a disclosure when a pointer press lands outside its regions.
///
/// Regions are resolved once, at activation. A press counts as inside when its
/// target is one of the regions or a descendant of one. A press that hit nothing
/// is outside.
#[derive(Debug)]
pub struct OutsideDismissal {
    regions: SmallVec<[ElementId; 2]>,
    listener: ListenerId,
}

impl OutsideDismissal {
    /// Register a pointer-down listener for `owner` guarding `regions`.
    pub fn activate(
        listeners: &mut ListenerRegistry<WidgetId>,
        owner: WidgetId,
        regions: &[ElementId],
    ) -> Self {
        let listener = listeners.register(ListenerKind::PointerDown, owner);
        tracing::debug!(?owner, regions = regions.len(), "outside dismissal activated");
        Self {
            regions: regions.iter().copied().collect(),
            listener,
        }
    }

    /// Whether a press on `target` is outside every region.
    pub fn is_outside(&self, tree: &Tree, target: Option<ElementId>) -> bool {
        match target {
            Some(target) => !self
                .regions
                .iter()
                .any(|&region| tree.contains(region, target)),
            None => true,
        }
    }

    /// Guarded regions.
    pub fn regions(&self) -> &[ElementId] {
        &self.regions
    }

    /// The pointer listener registration.
    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Remove the pointer listener.
    pub fn deactivate(self, listeners: &mut ListenerRegistry<WidgetId>) {
        let removed = listeners.remove(self.listener);
        debug_assert!(removed, "outside dismissal listener removed twice");
    }
}
