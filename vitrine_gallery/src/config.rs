// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gallery layout and copy settings.

use kurbo::Size;
use vitrine_primitives::DocumentConfig;

/// Gallery layout and copy.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryConfig {
    /// Cards per page.
    pub items_per_page: usize,
    /// Document the gallery is laid out in.
    pub document: DocumentConfig,
    /// Size of one card frame.
    pub card_size: Size,
    /// Horizontal space between cards.
    pub card_gap: f64,
    /// Page heading.
    pub title: String,
    /// Text beside the institution filter.
    pub filter_label: String,
    /// Filter entry that shows every institution.
    pub all_label: String,
    /// Shown when the filter matches nothing.
    pub empty_notice: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            items_per_page: 4,
            document: DocumentConfig::default(),
            card_size: Size::new(240.0, 320.0),
            card_gap: 40.0,
            title: String::from("Wall of Fame"),
            filter_label: String::from("Filter by institution:"),
            all_label: String::from("All institutions"),
            empty_notice: String::from("No items found for this institution."),
        }
    }
}
