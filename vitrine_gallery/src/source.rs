// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Where gallery items come from.
//!
//! Sources make no ordering promise; the [`Catalog`](crate::Catalog) sorts.

use std::collections::HashSet;

use crate::error::{GalleryError, Result};
use crate::item::Item;

/// A provider of gallery items.
pub trait ItemSource {
    /// Load every item.
    fn load(&self) -> Result<Vec<Item>>;
}

impl ItemSource for Vec<Item> {
    fn load(&self) -> Result<Vec<Item>> {
        check_unique(self.clone())
    }
}

impl ItemSource for [Item] {
    fn load(&self) -> Result<Vec<Item>> {
        check_unique(self.to_vec())
    }
}

/// Items from a JSON array.
#[derive(Clone, Debug)]
pub struct JsonSource {
    text: String,
}

impl JsonSource {
    /// Wrap JSON text. Nothing is parsed until [`ItemSource::load`].
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ItemSource for JsonSource {
    fn load(&self) -> Result<Vec<Item>> {
        let items: Vec<Item> = serde_json::from_str(&self.text)?;
        tracing::debug!(count = items.len(), "gallery items parsed");
        check_unique(items)
    }
}

fn check_unique(items: Vec<Item>) -> Result<Vec<Item>> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in &items {
        if !seen.insert(item.id.as_str()) {
            return Err(GalleryError::DuplicateId(item.id.clone()));
        }
    }
    Ok(items)
}
