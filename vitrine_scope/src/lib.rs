// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Scope: scoped shared state for headless UI trees.
//!
//! A root component publishes a value for the duration of its subtree, and any
//! descendant can read the nearest enclosing value of a given type without the
//! value being threaded through every intermediate constructor.
//!
//! - [`ScopeStack::publish`] opens a scope and returns a [`ScopeHandle`].
//! - [`ScopeStack::read`] returns the innermost published value of the
//!   requested type, or `None` when no enclosing scope published one.
//! - [`ScopeStack::close`] ends a scope (and every scope opened inside it).
//! - [`ScopeStack::provide`] is the closure form of publish + close.
//!
//! Scopes nest, and an inner publish of the same type shadows the outer one
//! only until the inner scope closes.
//!
//! ```rust
//! use vitrine_scope::ScopeStack;
//!
//! #[derive(Debug, PartialEq)]
//! struct Owner(u32);
//!
//! let mut scopes = ScopeStack::new();
//! assert_eq!(scopes.read::<Owner>(), None);
//!
//! scopes.provide(Owner(1), |scopes| {
//!     assert_eq!(scopes.read::<Owner>(), Some(&Owner(1)));
//!     scopes.provide(Owner(2), |scopes| {
//!         assert_eq!(scopes.read::<Owner>(), Some(&Owner(2)));
//!     });
//!     assert_eq!(scopes.read::<Owner>(), Some(&Owner(1)));
//! });
//!
//! assert_eq!(scopes.read::<Owner>(), None);
//! ```
//!
//! The stack is owned by whoever walks the tree (typically a builder), so there
//! is no ambient global state: two independent trees use two stacks.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};

/// Handle to an open scope, returned by [`ScopeStack::publish`].
///
/// Pass it back to [`ScopeStack::close`] to end the scope.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a published scope stays open until its handle is passed to `close`"]
pub struct ScopeHandle {
    depth: usize,
}

impl ScopeHandle {
    /// Zero-based nesting depth of the scope this handle refers to.
    pub const fn depth(&self) -> usize {
        self.depth
    }
}

struct Frame {
    type_id: TypeId,
    value: Box<dyn Any>,
}

/// A stack of published values, innermost last.
#[derive(Default)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl core::fmt::Debug for ScopeStack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScopeStack")
            .field("depth", &self.frames.len())
            .finish_non_exhaustive()
    }
}

impl ScopeStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open scopes.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when no scope is open.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Open a scope publishing `value` to everything read until it closes.
    pub fn publish<T: Any>(&mut self, value: T) -> ScopeHandle {
        let depth = self.frames.len();
        self.frames.push(Frame {
            type_id: TypeId::of::<T>(),
            value: Box::new(value),
        });
        ScopeHandle { depth }
    }

    /// Read the innermost published value of type `T`.
    ///
    /// Returns `None` when no open scope published a `T`; callers are expected
    /// to treat that as "not inside an owner" and do nothing.
    pub fn read<T: Any>(&self) -> Option<&T> {
        let wanted = TypeId::of::<T>();
        self.frames
            .iter()
            .rev()
            .find(|frame| frame.type_id == wanted)
            .and_then(|frame| frame.value.downcast_ref::<T>())
    }

    /// Close the scope referred to by `handle`.
    ///
    /// Scopes opened after it are closed too, so a forgotten inner handle
    /// cannot leak its value past the outer scope.
    pub fn close(&mut self, handle: ScopeHandle) {
        debug_assert!(
            handle.depth < self.frames.len(),
            "scope handle closed twice or out of order"
        );
        self.frames.truncate(handle.depth);
    }

    /// Run `f` inside a scope publishing `value`.
    pub fn provide<T: Any, R>(&mut self, value: T, f: impl FnOnce(&mut Self) -> R) -> R {
        let handle = self.publish(value);
        let result = f(self);
        self.close(handle);
        result
    }
}
