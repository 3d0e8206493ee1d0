// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Gallery: a paginated, filterable wall of framed items.
//!
//! - [`ItemSource`] loads items; [`JsonSource`] reads a JSON array.
//! - [`Catalog`] sorts them newest first and lists institutions; [`Pagination`]
//!   slices a filtered list into pages.
//! - [`Gallery`] lays the page out in a [`vitrine_primitives::Ui`]: an institution
//!   filter built on Select and one controlled detail Dialog per card.

mod catalog;
mod classes;
mod config;
mod error;
mod gallery;
mod item;
mod source;

pub use catalog::{Catalog, Pagination};
pub use classes::merge_classes;
pub use config::GalleryConfig;
pub use error::{GalleryError, Result};
pub use gallery::{CardView, Gallery};
pub use item::{Item, Orientation};
pub use source::{ItemSource, JsonSource};
