// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walk through the gallery: page, filter, open a card and dismiss it.
//!
//! Run:
//! - `cargo run -p vitrine_demos --example gallery_walkthrough`
//! - `RUST_LOG=debug cargo run -p vitrine_demos --example gallery_walkthrough` to see
//!   every open, mount and listener change.

use tracing_subscriber::EnvFilter;
use vitrine_event_state::key::Key;
use vitrine_gallery::{Gallery, GalleryConfig, JsonSource};

fn print_page(gallery: &Gallery) {
    println!(
        "filter = {:?}, {}",
        gallery.filter(),
        gallery.status_text().unwrap_or("single page")
    );
    for item in gallery.current_items() {
        println!("  {} ({}, {})", item.title, item.institution, item.year);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let source = JsonSource::new(include_str!("items.json"));
    let mut gallery = Gallery::new(&source, GalleryConfig::default())?;
    print_page(&gallery);

    gallery.click_label("Next page");
    print_page(&gallery);

    // Open the filter and pick an institution; the page resets to 1.
    gallery.click_label("All institutions");
    gallery.click_label("North Museum");
    print_page(&gallery);

    let first = gallery.current_items()[0].title.clone();
    gallery.click_label(&first);
    println!(
        "opened {first:?}: open = {:?}, page scroll locked = {}",
        gallery.current_items().first().and_then(|i| gallery.is_card_open(&i.id)),
        gallery.ui().document().is_scroll_locked()
    );

    // Tab cycles inside the dialog; Escape asks the gallery to close it.
    gallery.press(Key::Tab);
    gallery.press(Key::Escape);
    let listeners = gallery.ui().document().listeners().stats();
    println!(
        "closed: page scroll locked = {}, listeners registered {} / removed {}",
        gallery.ui().document().is_scroll_locked(),
        listeners.registered,
        listeners.removed
    );

    Ok(())
}
