// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus containment for open disclosures.
//!
//! A [`FocusTrap`] is built from a [`FocusBoundary`] computed when a disclosure opens.
//! While the trap is installed, the host asks it what to do with every Tab, Shift+Tab
//! and Escape press:
//!
//! - Tab on the last entry wraps to the first; Shift+Tab on the first wraps to the last.
//! - Any other Tab press is left to the platform ([`TrapAction::Pass`]).
//! - Escape asks the owner to close ([`TrapAction::Dismiss`]).
//!
//! ```rust
//! use vitrine_focus::{FocusBoundary, FocusMove, FocusTrap, TrapAction};
//!
//! let (trap, initial) = FocusTrap::activate(FocusBoundary::new(vec!['A', 'B', 'C']));
//! assert_eq!(initial, Some('A'));
//! assert_eq!(trap.on_move(FocusMove::Forward, Some('C')), TrapAction::Redirect('A'));
//! assert_eq!(trap.on_move(FocusMove::Backward, Some('A')), TrapAction::Redirect('C'));
//! assert_eq!(trap.on_move(FocusMove::Forward, Some('A')), TrapAction::Pass);
//! assert_eq!(trap.on_move(FocusMove::Leave, Some('B')), TrapAction::Dismiss);
//! ```

use alloc::vec::Vec;

use crate::FocusMove;

/// Ordered tab stops of a disclosure's content, first and last being the cycle endpoints.
///
/// Computed fresh on every open; content is dynamic, so a boundary is never reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusBoundary<K> {
    entries: Vec<K>,
}

impl<K> Default for FocusBoundary<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + Eq> FocusBoundary<K> {
    /// Wrap tab stops listed in document order.
    pub fn new(entries: Vec<K>) -> Self {
        Self { entries }
    }

    /// First tab stop, if any.
    pub fn first(&self) -> Option<K> {
        self.entries.first().copied()
    }

    /// Last tab stop, if any.
    pub fn last(&self) -> Option<K> {
        self.entries.last().copied()
    }

    /// Whether `id` is one of the tab stops.
    pub fn contains(&self, id: K) -> bool {
        self.entries.contains(&id)
    }

    /// Number of tab stops.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the content has no tab stops.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tab stops in order.
    pub fn as_slice(&self) -> &[K] {
        &self.entries
    }
}

/// What the host should do with an intercepted focus movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrapAction<K> {
    /// Prevent the default action and move focus to this node.
    Redirect(K),
    /// Prevent the default action and ask the owner to close.
    Dismiss,
    /// Leave the event to default handling.
    Pass,
}

/// Installed focus containment over one [`FocusBoundary`].
#[derive(Clone, Debug)]
pub struct FocusTrap<K> {
    boundary: FocusBoundary<K>,
}

impl<K: Copy + Eq> FocusTrap<K> {
    /// Install a trap and return the node that should receive initial focus.
    ///
    /// The initial target is the first tab stop; with no tab stops there is nothing
    /// to focus and the host leaves focus where it is.
    pub fn activate(boundary: FocusBoundary<K>) -> (Self, Option<K>) {
        let initial = boundary.first();
        (Self { boundary }, initial)
    }

    /// The boundary this trap was activated with.
    pub fn boundary(&self) -> &FocusBoundary<K> {
        &self.boundary
    }

    /// Decide how to handle a focus movement while the trap is installed.
    pub fn on_move(&self, movement: FocusMove, focused: Option<K>) -> TrapAction<K> {
        match movement {
            FocusMove::Leave => TrapAction::Dismiss,
            FocusMove::Forward => match (focused, self.boundary.last(), self.boundary.first()) {
                (Some(f), Some(last), Some(first)) if f == last => TrapAction::Redirect(first),
                _ => TrapAction::Pass,
            },
            FocusMove::Backward => match (focused, self.boundary.first(), self.boundary.last()) {
                (Some(f), Some(first), Some(last)) if f == first => TrapAction::Redirect(last),
                _ => TrapAction::Pass,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn cycles_at_both_endpoints() {
        let (trap, initial) = FocusTrap::activate(FocusBoundary::new(vec![1_u32, 2, 3]));
        assert_eq!(initial, Some(1));
        assert_eq!(trap.on_move(FocusMove::Forward, Some(3)), TrapAction::Redirect(1));
        assert_eq!(trap.on_move(FocusMove::Backward, Some(1)), TrapAction::Redirect(3));
        assert_eq!(trap.on_move(FocusMove::Forward, Some(2)), TrapAction::Pass);
        assert_eq!(trap.on_move(FocusMove::Backward, Some(2)), TrapAction::Pass);
    }

    #[test]
    fn empty_boundary_never_redirects() {
        let (trap, initial) = FocusTrap::<u32>::activate(FocusBoundary::default());
        assert_eq!(initial, None);
        assert_eq!(trap.on_move(FocusMove::Forward, Some(7)), TrapAction::Pass);
        assert_eq!(trap.on_move(FocusMove::Backward, None), TrapAction::Pass);
        assert_eq!(trap.on_move(FocusMove::Leave, None), TrapAction::Dismiss);
    }

    #[test]
    fn single_stop_keeps_focus_on_itself() {
        let (trap, _) = FocusTrap::activate(FocusBoundary::new(vec![5_u32]));
        assert_eq!(trap.on_move(FocusMove::Forward, Some(5)), TrapAction::Redirect(5));
        assert_eq!(trap.on_move(FocusMove::Backward, Some(5)), TrapAction::Redirect(5));
    }

    #[test]
    fn focus_outside_the_boundary_passes() {
        let (trap, _) = FocusTrap::activate(FocusBoundary::new(vec![1_u32, 2]));
        assert!(!trap.boundary().contains(9));
        assert_eq!(trap.on_move(FocusMove::Forward, Some(9)), TrapAction::Pass);
        assert_eq!(trap.on_move(FocusMove::Forward, None), TrapAction::Pass);
    }
}
