// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controlled and uncontrolled state behind one interface.
//!
//! A [`Controllable`] is either [`Control::Owned`] (the widget keeps the value) or
//! [`Control::Delegated`] (the owner keeps the value and the widget only reports
//! requests). The variant is chosen once, at construction, from whether an
//! external value was supplied.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use vitrine_primitives::controllable::Controllable;
//!
//! // Owned: requests take effect.
//! let mut owned = Controllable::new(None, false);
//! owned.request_change(true);
//! assert!(*owned.value());
//!
//! // Delegated: requests only notify; the owner pushes the new value back.
//! let seen = Rc::new(Cell::new(None));
//! let sink = seen.clone();
//! let mut delegated = Controllable::new(Some(true), false)
//!     .with_on_change(Box::new(move |next: bool| sink.set(Some(next))));
//! delegated.request_change(false);
//! assert_eq!(seen.get(), Some(false));
//! assert!(*delegated.value());
//! delegated.sync_external(false);
//! assert!(!*delegated.value());
//! ```

use alloc::boxed::Box;
use core::fmt;

/// Change notification handed the requested value.
pub type ChangeCallback<T> = Box<dyn FnMut(T)>;

/// Who holds the authoritative value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Control<T> {
    /// The widget owns the value; requests overwrite it.
    Owned(T),
    /// The owner supplied the value; requests leave it alone.
    Delegated(T),
}

impl<T> Control<T> {
    fn get(&self) -> &T {
        match self {
            Self::Owned(v) | Self::Delegated(v) => v,
        }
    }
}

/// A value that is either controlled by an owner or managed internally.
pub struct Controllable<T> {
    control: Control<T>,
    on_change: Option<ChangeCallback<T>>,
}

impl<T: fmt::Debug> fmt::Debug for Controllable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controllable")
            .field("control", &self.control)
            .field("has_on_change", &self.on_change.is_some())
            .finish()
    }
}

impl<T: Clone + PartialEq + fmt::Debug> Controllable<T> {
    /// Delegated when `external` is supplied, otherwise owned and seeded with `default`.
    pub fn new(external: Option<T>, default: T) -> Self {
        let control = match external {
            Some(value) => Control::Delegated(value),
            None => Control::Owned(default),
        };
        Self {
            control,
            on_change: None,
        }
    }

    /// Attach the change notification.
    #[must_use]
    pub fn with_on_change(mut self, on_change: ChangeCallback<T>) -> Self {
        self.on_change = Some(on_change);
        self
    }

    /// Current effective value.
    pub fn value(&self) -> &T {
        self.control.get()
    }

    /// Whether the owner holds the value.
    pub fn is_controlled(&self) -> bool {
        matches!(self.control, Control::Delegated(_))
    }

    /// The control variant.
    pub fn control(&self) -> &Control<T> {
        &self.control
    }

    /// Request a new value.
    ///
    /// Owned state is overwritten; delegated state is left untouched. The change
    /// notification runs in both cases, with `next`. Returns `true` if the effective
    /// value changed.
    pub fn request_change(&mut self, next: T) -> bool {
        let changed = match &mut self.control {
            Control::Owned(value) => {
                let changed = *value != next;
                *value = next.clone();
                changed
            }
            Control::Delegated(_) => false,
        };
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(next);
        }
        changed
    }

    /// Push a new value from the owner.
    ///
    /// Only delegated state accepts it; owned state ignores it. Returns `true` if the
    /// effective value changed.
    pub fn sync_external(&mut self, value: T) -> bool {
        match &mut self.control {
            Control::Delegated(current) => {
                let changed = *current != value;
                *current = value;
                changed
            }
            Control::Owned(current) => {
                tracing::debug!(?current, ignored = ?value, "external value ignored by owned state");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn recorder<T: 'static>() -> (Rc<RefCell<Vec<T>>>, ChangeCallback<T>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        (log, Box::new(move |v: T| sink.borrow_mut().push(v)))
    }

    #[test]
    fn owned_value_tracks_the_last_request() {
        let (log, cb) = recorder();
        let mut state = Controllable::new(None, 0_u32).with_on_change(cb);
        for next in [3, 1, 4, 1, 5] {
            state.request_change(next);
            assert_eq!(*state.value(), next);
        }
        assert!(!state.is_controlled());
        assert_eq!(*log.borrow(), [3, 1, 4, 1, 5]);
    }

    #[test]
    fn delegated_value_ignores_requests() {
        let (log, cb) = recorder();
        let mut state = Controllable::new(Some(7_u32), 0).with_on_change(cb);
        assert!(!state.request_change(8));
        assert!(!state.request_change(9));
        assert_eq!(*state.value(), 7);
        assert!(state.is_controlled());
        assert_eq!(*log.borrow(), [8, 9]);
    }

    #[test]
    fn sync_external_applies_to_delegated_only() {
        let mut delegated = Controllable::new(Some(1_u32), 0);
        assert!(delegated.sync_external(2));
        assert!(!delegated.sync_external(2));
        assert_eq!(*delegated.value(), 2);

        let mut owned = Controllable::new(None, 1_u32);
        assert!(!owned.sync_external(2));
        assert_eq!(*owned.value(), 1);
        assert_eq!(owned.control(), &Control::Owned(1));
    }

    #[test]
    fn request_reports_effective_change() {
        let mut state = Controllable::new(None, false);
        assert!(state.request_change(true));
        assert!(!state.request_change(true));
        assert!(state.request_change(false));
    }
}
