// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Event State: small state machines and bookkeeping for input events.
//!
//! - [`key`]: key events and modifier state.
//! - [`click`]: click recognition from pointer down/up pairs.
//! - [`listeners`]: a registry of document-level listeners with balanced
//!   registration and removal.
//!
//! None of these types run handlers. They record what happened and answer
//! questions ("was that a click?", "who is listening for key presses right now?"),
//! and the host decides what to call.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod click;
pub mod key;
pub mod listeners;
