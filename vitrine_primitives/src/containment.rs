// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus containment for open Dialog content.
//!
//! Activation computes a fresh [`FocusBoundary`] over the content subtree, installs
//! a [`FocusTrap`] and registers one document key listener. Deactivation consumes
//! the containment and removes that registration.

use vitrine_event_state::key::{Key, KeyEvent};
use vitrine_event_state::listeners::{ListenerId, ListenerKind, ListenerRegistry};
use vitrine_focus::{FocusBoundary, FocusMove, FocusTrap, TrapAction};
use vitrine_tree::{ElementId, Tree};

use crate::types::WidgetId;

/// Map a key press to the focus movement it asks for.
pub fn focus_move_of(event: &KeyEvent) -> Option<FocusMove> {
    match event.key {
        Key::Tab if event.shift() => Some(FocusMove::Backward),
        Key::Tab => Some(FocusMove::Forward),
        Key::Escape => Some(FocusMove::Leave),
        _ => None,
    }
}

/// Installed focus containment of one open disclosure.
#[derive(Debug)]
pub struct FocusContainment {
    trap: FocusTrap<ElementId>,
    listener: ListenerId,
}

impl FocusContainment {
    /// Activate over `content` and return the element to focus first, if any.
    pub fn activate(
        tree: &Tree,
        content: ElementId,
        listeners: &mut ListenerRegistry<WidgetId>,
        owner: WidgetId,
    ) -> (Self, Option<ElementId>) {
        let boundary = FocusBoundary::new(tree.focusables_in(content));
        tracing::debug!(?owner, tab_stops = boundary.len(), "focus containment activated");
        let (trap, initial) = FocusTrap::activate(boundary);
        let listener = listeners.register(ListenerKind::KeyDown, owner);
        (Self { trap, listener }, initial)
    }

    /// Decide how to handle `event` given the focused element.
    pub fn on_key(&self, event: &KeyEvent, focused: Option<ElementId>) -> TrapAction<ElementId> {
        match focus_move_of(event) {
            Some(movement) => self.trap.on_move(movement, focused),
            None => TrapAction::Pass,
        }
    }

    /// Tab stops computed at activation.
    pub fn boundary(&self) -> &FocusBoundary<ElementId> {
        self.trap.boundary()
    }

    /// The key listener registration.
    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    /// Remove the key listener.
    pub fn deactivate(self, listeners: &mut ListenerRegistry<WidgetId>) {
        let removed = listeners.remove(self.listener);
        debug_assert!(removed, "focus containment listener removed twice");
    }
}
