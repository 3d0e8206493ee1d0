// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Open/closed state shared by Dialog and Select.

use alloc::boxed::Box;

use crate::controllable::{ChangeCallback, Controllable};

/// Open/closed state machine of one disclosure instance.
///
/// Controlled when an external `open` value is supplied at construction, and
/// uncontrolled otherwise. Nothing can switch an instance between the two.
///
/// ```rust
/// use vitrine_primitives::DisclosureController;
///
/// let mut disclosure = DisclosureController::new(None, false, None);
/// disclosure.request_open_change(true);
/// assert!(disclosure.open());
/// disclosure.request_open_change(false);
/// assert!(!disclosure.open());
/// ```
#[derive(Debug)]
pub struct DisclosureController {
    state: Controllable<bool>,
}

impl DisclosureController {
    /// Build from the `open`, `default_open` and `on_open_change` props.
    pub fn new(
        open: Option<bool>,
        default_open: bool,
        on_open_change: Option<ChangeCallback<bool>>,
    ) -> Self {
        let mut state = Controllable::new(open, default_open);
        if let Some(cb) = on_open_change {
            state = state.with_on_change(cb);
        }
        Self { state }
    }

    /// An uncontrolled, initially closed disclosure with no callback.
    pub fn uncontrolled() -> Self {
        Self::new(None, false, None)
    }

    /// A controlled disclosure notifying `on_open_change`.
    pub fn controlled(open: bool, on_open_change: impl FnMut(bool) + 'static) -> Self {
        Self::new(Some(open), false, Some(Box::new(on_open_change)))
    }

    /// Whether the disclosure is open.
    pub fn open(&self) -> bool {
        *self.state.value()
    }

    /// Whether the owner holds the open state.
    pub fn is_controlled(&self) -> bool {
        self.state.is_controlled()
    }

    /// Ask to open or close. Returns `true` if [`open`](Self::open) changed.
    pub fn request_open_change(&mut self, next: bool) -> bool {
        tracing::debug!(next, controlled = self.is_controlled(), "open change requested");
        self.state.request_change(next)
    }

    /// Apply the owner's `open` prop. Ignored when uncontrolled.
    pub fn sync_external(&mut self, open: bool) -> bool {
        self.state.sync_external(open)
    }
}
