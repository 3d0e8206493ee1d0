// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Primitives: headless, accessible Dialog and Select.
//!
//! Both widgets are compositions of small parts sharing one owner:
//!
//! - A [`DisclosureController`] holds the open flag, either owned by the widget
//!   (uncontrolled) or delegated to its owner (controlled).
//! - Parts find their owner through the [`Builder`]'s scope stack, so a part is
//!   bound to the innermost enclosing widget of its kind.
//! - Dialog content is portaled into the document's overlay root (see [`layer`]),
//!   contains focus while mounted and locks page scroll.
//! - Select content renders beside its trigger, closes on outside presses and
//!   commits through a [`SelectionRegistry`].
//!
//! Open content exists in the document only while open. Every transition is
//! applied synchronously by the [`Ui`] entry point that caused it.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use vitrine_event_state::key::Key;
//! use vitrine_primitives::{DialogContentProps, DialogProps, Ui};
//!
//! let mut ui = Ui::default();
//! let dialog = ui.build(|b| {
//!     b.dialog(DialogProps::new(), |b| {
//!         b.dialog_trigger("Details", Rect::new(10.0, 10.0, 110.0, 40.0));
//!         b.dialog_content(DialogContentProps::default(), |b| {
//!             b.dialog_title("Artwork", Rect::new(400.0, 220.0, 800.0, 250.0));
//!             b.button("Save", Rect::new(400.0, 540.0, 480.0, 570.0));
//!         });
//!     })
//! });
//!
//! ui.click_label("Details");
//! assert_eq!(ui.is_open(dialog), Some(true));
//! assert!(ui.document().is_scroll_locked());
//!
//! ui.press(Key::Escape);
//! assert_eq!(ui.is_open(dialog), Some(false));
//! assert!(ui.document().find_by_label("Artwork").is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod controllable;
pub mod layer;
pub mod scroll;

mod builder;
mod containment;
mod dialog;
mod disclosure;
mod dismiss;
mod document;
mod select;
mod selection;
mod types;
mod ui;

pub use builder::Builder;
pub use containment::{FocusContainment, focus_move_of};
pub use dialog::{DialogContentProps, DialogProps};
pub use disclosure::DisclosureController;
pub use dismiss::OutsideDismissal;
pub use document::{Document, DocumentConfig, ScrollLock};
pub use scroll::{ScrollAffordance, ScrollViewport};
pub use select::{SELECT_Z, SelectContentProps, SelectProps};
pub use selection::{SelectItem, SelectionRegistry};
pub use types::{Part, WidgetId, WidgetKind};
pub use ui::{PointerEvent, Ui};
