// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-value selection for Select.
//!
//! The registry holds the one selected value (or the empty value) and mirrors the
//! controlled/uncontrolled duality of [`DisclosureController`]. Committing a
//! selection always asks the owning disclosure to close.
//!
//! ```rust
//! use vitrine_primitives::{DisclosureController, SelectItem, SelectionRegistry};
//!
//! let mut disclosure = DisclosureController::new(None, true, None);
//! let mut selection = SelectionRegistry::new(None, None);
//!
//! assert!(selection.select_item(&SelectItem::new("B", "Bravo"), &mut disclosure));
//! assert_eq!(selection.current_value(), "B");
//! assert!(!disclosure.open());
//!
//! disclosure.request_open_change(true);
//! assert!(!selection.select_item(&SelectItem::new("A", "Alfa").disabled(true), &mut disclosure));
//! assert_eq!(selection.current_value(), "B");
//! assert!(disclosure.open());
//! ```

use alloc::string::String;

use crate::controllable::{ChangeCallback, Controllable};
use crate::disclosure::DisclosureController;

/// One selectable option.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectItem {
    /// Value committed when the option is chosen.
    pub value: String,
    /// Text shown for the option.
    pub label: String,
    /// Disabled options ignore every selection attempt.
    pub disabled: bool,
}

impl SelectItem {
    /// An enabled option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Mark the option disabled (or enabled).
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// The selected value of one Select.
#[derive(Debug)]
pub struct SelectionRegistry {
    state: Controllable<String>,
}

impl SelectionRegistry {
    /// Controlled when `value` is supplied; otherwise seeded with `default_value`
    /// or the empty value.
    pub fn new(value: Option<String>, default_value: Option<String>) -> Self {
        Self {
            state: Controllable::new(value, default_value.unwrap_or_default()),
        }
    }

    /// Attach the value-change notification.
    #[must_use]
    pub fn with_on_value_change(mut self, on_value_change: ChangeCallback<String>) -> Self {
        self.state = self.state.with_on_change(on_value_change);
        self
    }

    /// The selected value, or `""` when nothing is selected.
    pub fn current_value(&self) -> &str {
        self.state.value()
    }

    /// Whether `value` is the selected one.
    pub fn is_selected(&self, value: &str) -> bool {
        self.current_value() == value
    }

    /// Whether the owner holds the value.
    pub fn is_controlled(&self) -> bool {
        self.state.is_controlled()
    }

    /// Commit `value` and ask `disclosure` to close.
    pub fn select(&mut self, value: &str, disclosure: &mut DisclosureController) {
        tracing::debug!(value, controlled = self.is_controlled(), "selection committed");
        self.state.request_change(String::from(value));
        disclosure.request_open_change(false);
    }

    /// Commit `item` unless it is disabled. Returns `false` for disabled items,
    /// which leave both the value and the disclosure untouched.
    pub fn select_item(&mut self, item: &SelectItem, disclosure: &mut DisclosureController) -> bool {
        if item.disabled {
            tracing::trace!(value = %item.value, "disabled item ignored");
            return false;
        }
        self.select(&item.value, disclosure);
        true
    }

    /// Apply the owner's `value` prop. Ignored when uncontrolled.
    pub fn sync_external(&mut self, value: String) -> bool {
        self.state.sync_external(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[test]
    fn uncontrolled_defaults_to_empty() {
        let selection = SelectionRegistry::new(None, None);
        assert_eq!(selection.current_value(), "");
        assert!(!selection.is_selected("A"));
    }

    #[test]
    fn at_most_one_value_is_selected() {
        let mut disclosure = DisclosureController::new(None, true, None);
        let mut selection = SelectionRegistry::new(None, Some("A".into()));
        let values = ["A", "B", "C"];
        assert_eq!(values.iter().filter(|v| selection.is_selected(v)).count(), 1);

        selection.select("C", &mut disclosure);
        let selected: Vec<_> = values.iter().filter(|v| selection.is_selected(v)).collect();
        assert_eq!(selected, [&"C"]);

        selection.select("Z", &mut disclosure);
        assert_eq!(values.iter().filter(|v| selection.is_selected(v)).count(), 0);
    }

    #[test]
    fn controlled_select_notifies_and_closes() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let mut disclosure = DisclosureController::new(None, true, None);
        let mut selection = SelectionRegistry::new(Some("A".into()), None)
            .with_on_value_change(Box::new(move |v: String| sink.borrow_mut().push(v)));

        selection.select("B", &mut disclosure);
        assert_eq!(selection.current_value(), "A");
        assert_eq!(*calls.borrow(), ["B"]);
        assert!(!disclosure.open());

        assert!(selection.sync_external("B".into()));
        assert!(selection.is_selected("B"));
    }

    #[test]
    fn disabled_items_change_nothing() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let mut disclosure = DisclosureController::new(None, true, None);
        let mut selection = SelectionRegistry::new(None, None)
            .with_on_value_change(Box::new(move |v: String| sink.borrow_mut().push(v)));

        let item = SelectItem::new("A", "Alfa").disabled(true);
        assert!(!selection.select_item(&item, &mut disclosure));
        assert_eq!(selection.current_value(), "");
        assert!(disclosure.open());
        assert!(calls.borrow().is_empty());
    }
}
