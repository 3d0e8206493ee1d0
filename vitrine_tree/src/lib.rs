// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Tree: a small, headless element tree.
//!
//! The tree plays the role a document plays for a browser-hosted widget: it is where
//! primitives mount their parts, where pointer input is resolved to a target, and where
//! focusable candidates are discovered in document order.
//!
//! - Elements carry a [`ElementKind`], a debug label, world-space bounds, a z-index,
//!   an optional tab index and [`ElementFlags`].
//! - [`ElementId`] is generational: ids of removed elements go stale and every query
//!   treats them as absent.
//! - Roots are ordered; document order is a pre-order walk of each root in turn.
//!
//! ## Not a layout engine
//!
//! Callers place elements by writing their world-space bounds directly. There are no
//! transforms, clips or batched commits; updates are visible to the next query.
//!
//! ## Stacking
//!
//! An element stacks at the highest `z_index` found along its ancestry (itself included),
//! so the children of a raised layer stay above everything the layer covers.
//! Among equal stacking levels, deeper elements win, then newer ones.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use vitrine_tree::{Element, ElementKind, QueryFilter, Tree};
//!
//! let mut tree = Tree::new();
//! let body = tree.insert(None, Element::new(ElementKind::Generic, "body", Rect::new(0.0, 0.0, 100.0, 100.0)));
//! let button = tree.insert(Some(body), Element::new(ElementKind::Button, "ok", Rect::new(10.0, 10.0, 30.0, 20.0)));
//!
//! let hit = tree.hit_test_point(Point::new(15.0, 15.0), QueryFilter::new().visible().pickable()).unwrap();
//! assert_eq!(hit.element, button);
//! assert_eq!(hit.path, vec![body, button]);
//! assert!(tree.contains(body, button));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Hit, QueryFilter, Tree};
pub use types::{Element, ElementFlags, ElementId, ElementKind};
