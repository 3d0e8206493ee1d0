// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Focus: tab order and focus containment.
//!
//! - [`FocusMove`] is what a key press asks of focus: forward (Tab), backward
//!   (Shift+Tab), or out of the current scope (Escape).
//! - [`TabOrder`] arranges tab stops the way a platform does when nobody intercepts
//!   Tab: positive tab indices first, ascending, then everything else in document
//!   order.
//! - [`FocusTrap`] keeps Tab cycling inside a [`FocusBoundary`] while a disclosure is
//!   open and turns Escape into a dismissal request.
//!
//! ```rust
//! use vitrine_focus::{FocusMove, TabOrder};
//!
//! // (id, tab index) in document order.
//! let order = TabOrder::new([('a', None), ('b', Some(2)), ('c', Some(1)), ('d', Some(0))]);
//! assert_eq!(order.stops(), ['c', 'b', 'a', 'd']);
//!
//! assert_eq!(order.step(Some('a'), FocusMove::Forward), Some('d'));
//! assert_eq!(order.step(Some('d'), FocusMove::Forward), Some('c'));
//! assert_eq!(order.step(None, FocusMove::Backward), Some('d'));
//! ```
//!
//! Ids are any small copyable handle, `vitrine_tree::ElementId` in practice.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

mod trap;

pub use trap::{FocusBoundary, FocusTrap, TrapAction};

/// A requested focus movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusMove {
    /// Tab.
    Forward,
    /// Shift+Tab.
    Backward,
    /// Escape.
    Leave,
}

/// Tab stops sorted into platform traversal order. Stepping past either end wraps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabOrder<K> {
    stops: Vec<K>,
}

impl<K: Copy + Eq> TabOrder<K> {
    /// Sort `(id, tab_index)` pairs given in document order.
    ///
    /// Only positive tab indices lift a stop ahead of document order; zero and
    /// negative ones behave like no index at all.
    pub fn new(stops: impl IntoIterator<Item = (K, Option<i32>)>) -> Self {
        let mut ranked: Vec<(K, Option<i32>)> = stops
            .into_iter()
            .map(|(id, tab_index)| (id, tab_index.filter(|t| *t > 0)))
            .collect();
        // Stable, so document order breaks ties.
        ranked.sort_by_key(|&(_, rank)| match rank {
            Some(rank) => (false, rank),
            None => (true, 0),
        });
        Self {
            stops: ranked.into_iter().map(|(id, _)| id).collect(),
        }
    }

    /// Stops in traversal order.
    pub fn stops(&self) -> &[K] {
        &self.stops
    }

    /// The stop after (or before) `from`.
    ///
    /// With nothing focused, or focus on something that is not a stop, Tab enters
    /// at the first stop and Shift+Tab at the last. [`FocusMove::Leave`] never moves
    /// focus here; containers handle it.
    pub fn step(&self, from: Option<K>, direction: FocusMove) -> Option<K> {
        let at = from.and_then(|from| self.stops.iter().position(|s| *s == from));
        let index = match (direction, at) {
            (FocusMove::Leave, _) => return None,
            (FocusMove::Forward, None) => 0,
            (FocusMove::Backward, None) => self.stops.len().checked_sub(1)?,
            (FocusMove::Forward, Some(i)) if i + 1 < self.stops.len() => i + 1,
            (FocusMove::Forward, Some(_)) => 0,
            (FocusMove::Backward, Some(i)) if i > 0 => i - 1,
            (FocusMove::Backward, Some(_)) => self.stops.len() - 1,
        };
        self.stops.get(index).copied()
    }
}
