// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sorting, filtering and paging of gallery items.
//!
//! ```rust
//! use vitrine_gallery::{Catalog, Item, Pagination};
//!
//! let item = |id: &str, institution: &str, year| Item {
//!     id: id.into(),
//!     title: id.to_uppercase(),
//!     institution: institution.into(),
//!     year,
//!     image: format!("{id}.png"),
//!     width: None,
//!     height: None,
//! };
//! let catalog = Catalog::new(vec![
//!     item("a", "North", 2018),
//!     item("b", "South", 2022),
//!     item("c", "North", 2020),
//! ]);
//!
//! assert_eq!(catalog.institutions(), ["North", "South"]);
//! let north: Vec<_> = catalog.filtered("North").map(|i| i.id.as_str()).collect();
//! assert_eq!(north, ["c", "a"]);
//!
//! let mut pages = Pagination::new(catalog.count("").unwrap_or(0), 2);
//! assert_eq!(pages.total_pages(), 2);
//! assert!(pages.next());
//! assert_eq!(pages.range(), 2..3);
//! ```

use std::collections::BTreeSet;
use std::ops::Range;

use crate::item::Item;

/// Items sorted newest first, plus the institutions they come from.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    items: Vec<Item>,
    institutions: Vec<String>,
}

impl Catalog {
    /// Sort `items` by year, newest first. Items of the same year keep their order.
    pub fn new(mut items: Vec<Item>) -> Self {
        items.sort_by(|a, b| b.year.cmp(&a.year));
        let institutions = items
            .iter()
            .map(|i| i.institution.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Self {
            items,
            institutions,
        }
    }

    /// Every item, newest first.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Unique institutions in ascending order.
    pub fn institutions(&self) -> &[String] {
        &self.institutions
    }

    /// Items from `institution`, newest first. The empty filter matches everything.
    pub fn filtered<'a>(&'a self, institution: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .filter(move |i| institution.is_empty() || i.institution == institution)
    }

    /// Number of items matching `institution`, or `None` for an unknown institution.
    pub fn count(&self, institution: &str) -> Option<usize> {
        if institution.is_empty() || self.institutions.iter().any(|i| i == institution) {
            Some(self.filtered(institution).count())
        } else {
            None
        }
    }
}

/// One-based page position over a list of known length.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    per_page: usize,
    total_items: usize,
}

impl Pagination {
    /// Start on page 1. A page size of zero is treated as one.
    pub fn new(total_items: usize, per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            total_items,
        }
    }

    /// Current page, starting at 1.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages; zero for an empty list.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    /// Index range of the current page.
    pub fn range(&self) -> Range<usize> {
        let start = (self.page - 1) * self.per_page;
        let start = start.min(self.total_items);
        start..(start + self.per_page).min(self.total_items)
    }

    /// Whether there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Whether page navigation is worth showing.
    pub fn shows_navigation(&self) -> bool {
        self.total_pages() > 1
    }

    /// Step back, stopping at page 1. Returns `true` if the page changed.
    pub fn previous(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Step forward, stopping at the last page. Returns `true` if the page changed.
    pub fn next(&mut self) -> bool {
        self.go_to(self.page + 1)
    }

    /// Jump to `page`, clamped to `1..=total_pages`. Returns `true` if the page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        let page = page.clamp(1, self.total_pages().max(1));
        let changed = page != self.page;
        self.page = page;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, institution: &str, year: i32) -> Item {
        Item {
            id: id.into(),
            title: id.into(),
            institution: institution.into(),
            year,
            image: String::new(),
            width: None,
            height: None,
        }
    }

    #[test]
    fn sorts_newest_first_and_keeps_ties_stable() {
        let catalog = Catalog::new(vec![
            item("old", "A", 2001),
            item("tie1", "B", 2010),
            item("new", "A", 2020),
            item("tie2", "A", 2010),
        ]);
        let ids: Vec<_> = catalog.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["new", "tie1", "tie2", "old"]);
    }

    #[test]
    fn institutions_are_unique_and_sorted() {
        let catalog = Catalog::new(vec![
            item("1", "Zeta", 1),
            item("2", "Alpha", 2),
            item("3", "Zeta", 3),
        ]);
        assert_eq!(catalog.institutions(), ["Alpha", "Zeta"]);
        assert_eq!(catalog.count("Zeta"), Some(2));
        assert_eq!(catalog.count(""), Some(3));
        assert_eq!(catalog.count("Nowhere"), None);
        assert_eq!(catalog.filtered("Nowhere").count(), 0);
    }

    #[test]
    fn pages_clamp_at_both_ends() {
        let mut pages = Pagination::new(9, 4);
        assert_eq!(pages.total_pages(), 3);
        assert!(!pages.has_previous());
        assert!(!pages.previous());
        assert_eq!(pages.range(), 0..4);

        assert!(pages.next());
        assert!(pages.next());
        assert_eq!(pages.range(), 8..9);
        assert!(!pages.has_next());
        assert!(!pages.next());
        assert_eq!(pages.page(), 3);

        assert!(pages.go_to(1));
        assert!(!pages.go_to(0));
        assert_eq!(pages.page(), 1);
    }

    #[test]
    fn empty_list_has_no_navigation() {
        let mut pages = Pagination::new(0, 4);
        assert_eq!(pages.total_pages(), 0);
        assert!(!pages.shows_navigation());
        assert!(!pages.next());
        assert_eq!(pages.page(), 1);
        assert_eq!(pages.range(), 0..0);

        let single = Pagination::new(4, 4);
        assert!(!single.shows_navigation());
        assert_eq!(Pagination::new(3, 0).per_page(), 1);
    }
}
