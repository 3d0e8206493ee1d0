// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The gallery page: heading, institution filter, card grid and page navigation.
//!
//! The gallery owns the state its primitives are controlled by. Primitive callbacks
//! only queue requests; the gallery applies them once the input event has been
//! fully dispatched, then pushes the new props back down.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use kurbo::{Point, Rect};
use vitrine_event_state::key::{Key, KeyEvent};
use vitrine_primitives::{
    Builder, DialogContentProps, DialogProps, SelectContentProps, SelectItem, SelectProps, Ui,
    WidgetId,
};
use vitrine_tree::{Element, ElementFlags, ElementId, ElementKind};

use crate::catalog::{Catalog, Pagination};
use crate::classes::{card_tilt, merge_classes};
use crate::config::GalleryConfig;
use crate::error::Result;
use crate::item::{Item, Orientation};
use crate::source::ItemSource;

const HEADING_TOP: f64 = 32.0;
const FILTER_TOP: f64 = 112.0;
const GRID_TOP: f64 = 200.0;
const CAPTION_EXTENT: f64 = 24.0;
const NAV_EXTENT: f64 = 40.0;
const PANEL_MAX_WIDTH: f64 = 896.0;
const PANEL_PADDING: f64 = 24.0;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Request {
    Filter(String),
    CardOpen { item: String, open: bool },
}

type Requests = Rc<RefCell<Vec<Request>>>;

/// A card on the current page.
#[derive(Clone, Debug)]
pub struct CardView {
    /// Id of the item shown.
    pub item_id: String,
    /// The card element; activating it opens the detail dialog.
    pub element: ElementId,
    /// The card's detail dialog.
    pub dialog: WidgetId,
    /// Composed class name.
    pub class_name: String,
    /// Image framing.
    pub orientation: Orientation,
    open: bool,
}

impl CardView {
    /// Whether the gallery holds this card's dialog open.
    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[derive(Debug, Default)]
struct PageView {
    container: Option<ElementId>,
    cards: Vec<CardView>,
    previous: Option<ElementId>,
    next: Option<ElementId>,
    status: Option<ElementId>,
    empty_notice: Option<ElementId>,
}

/// A paginated, filterable gallery hosted in its own [`Ui`].
///
/// ```rust
/// use vitrine_gallery::{Gallery, GalleryConfig, JsonSource};
///
/// let source = JsonSource::new(r#"[
///     {"id":"a","title":"Harbor","institution":"North Museum","year":2019,"image":"a.png"},
///     {"id":"b","title":"Orchard","institution":"South Library","year":2022,"image":"b.png"}
/// ]"#);
/// let mut gallery = Gallery::new(&source, GalleryConfig::default()).unwrap();
/// assert_eq!(gallery.current_items()[0].title, "Orchard");
///
/// gallery.click_label("Harbor");
/// assert_eq!(gallery.is_card_open("a"), Some(true));
/// ```
pub struct Gallery {
    ui: Ui,
    catalog: Catalog,
    config: GalleryConfig,
    filter: String,
    pagination: Pagination,
    filter_select: WidgetId,
    view: PageView,
    requests: Requests,
}

impl fmt::Debug for Gallery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gallery")
            .field("filter", &self.filter)
            .field("pagination", &self.pagination)
            .field("cards", &self.view.cards.len())
            .finish_non_exhaustive()
    }
}

impl Gallery {
    /// Load items from `source` and build the first page.
    pub fn new<S: ItemSource + ?Sized>(source: &S, config: GalleryConfig) -> Result<Self> {
        let catalog = Catalog::new(source.load()?);
        let mut ui = Ui::new(config.document);
        let requests = Requests::default();
        let filter_select = build_chrome(&mut ui, &config, catalog.institutions(), &requests);
        let pagination = Pagination::new(catalog.items().len(), config.items_per_page);
        tracing::debug!(
            items = catalog.items().len(),
            institutions = catalog.institutions().len(),
            "gallery loaded"
        );

        let mut gallery = Self {
            ui,
            catalog,
            config,
            filter: String::new(),
            pagination,
            filter_select,
            view: PageView::default(),
            requests,
        };
        gallery.render_page();
        Ok(gallery)
    }

    /// The hosting UI.
    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    /// All items, newest first.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The active institution filter; empty for all.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// The institution filter Select.
    pub fn filter_select(&self) -> WidgetId {
        self.filter_select
    }

    /// The current page, starting at 1.
    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    /// Number of pages for the active filter.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages()
    }

    /// Items on the current page.
    pub fn current_items(&self) -> Vec<&Item> {
        let range = self.pagination.range();
        self.catalog
            .filtered(&self.filter)
            .skip(range.start)
            .take(range.len())
            .collect()
    }

    /// Cards on the current page.
    pub fn cards(&self) -> &[CardView] {
        &self.view.cards
    }

    /// Whether an item's detail dialog is open, if the item is on the current page.
    pub fn is_card_open(&self, item_id: &str) -> Option<bool> {
        let card = self.view.cards.iter().find(|c| c.item_id == item_id)?;
        self.ui.is_open(card.dialog)
    }

    /// Whether page navigation is shown.
    pub fn shows_navigation(&self) -> bool {
        self.view.status.is_some()
    }

    /// The "page X of Y" text, when navigation is shown.
    pub fn status_text(&self) -> Option<&str> {
        let status = self.view.status?;
        self.ui.document().tree().get(status).map(|e| e.label.as_str())
    }

    /// Whether the empty notice is shown.
    pub fn shows_empty_notice(&self) -> bool {
        self.view.empty_notice.is_some()
    }

    /// The previous and next page buttons, when shown.
    pub fn navigation_buttons(&self) -> Option<(ElementId, ElementId)> {
        self.view.previous.zip(self.view.next)
    }

    // --- input ---

    /// Click at `position`.
    pub fn click(&mut self, position: Point) -> Option<ElementId> {
        let clicked = self.ui.click(position);
        if let Some(element) = clicked {
            self.activate(element);
        }
        self.apply_requests();
        clicked
    }

    /// Click the center of the first element labelled `label`.
    pub fn click_label(&mut self, label: &str) -> Option<ElementId> {
        let id = self.ui.document().find_by_label(label)?;
        let center = self.ui.document().tree().get(id)?.bounds.center();
        self.click(center)
    }

    /// Press a key.
    pub fn key_down(&mut self, event: KeyEvent) -> bool {
        let focused = self.ui.focused();
        let prevented = self.ui.key_down(event);
        if !prevented
            && event.is_activation()
            && let Some(focused) = focused
        {
            self.activate(focused);
        }
        self.apply_requests();
        prevented
    }

    /// Press a key without modifiers.
    pub fn press(&mut self, key: Key) -> bool {
        self.key_down(KeyEvent::new(key))
    }

    /// Scroll at `position`.
    pub fn scroll(&mut self, position: Point, delta: f64) -> bool {
        let moved = self.ui.scroll(position, delta);
        self.apply_requests();
        moved
    }

    /// Focus an element.
    pub fn focus(&mut self, id: ElementId) -> bool {
        self.ui.focus(id)
    }

    // --- state ---

    /// Show only items from `institution` (empty for all) and return to page 1.
    pub fn set_filter(&mut self, institution: impl Into<String>) {
        self.filter = institution.into();
        self.ui.set_select_value(self.filter_select, self.filter.clone());
        let matching = self.catalog.filtered(&self.filter).count();
        self.pagination = Pagination::new(matching, self.config.items_per_page);
        tracing::debug!(filter = %self.filter, matching, "gallery filter changed");
        self.render_page();
    }

    /// Go back one page. Returns `true` if the page changed.
    pub fn previous_page(&mut self) -> bool {
        let changed = self.pagination.previous();
        if changed {
            self.render_page();
        }
        changed
    }

    /// Go forward one page. Returns `true` if the page changed.
    pub fn next_page(&mut self) -> bool {
        let changed = self.pagination.next();
        if changed {
            self.render_page();
        }
        changed
    }

    /// Open or close an item's detail dialog. Returns `false` if the item is not on
    /// the current page.
    pub fn set_card_open(&mut self, item_id: &str, open: bool) -> bool {
        let Some(card) = self.view.cards.iter_mut().find(|c| c.item_id == item_id) else {
            return false;
        };
        card.open = open;
        let dialog = card.dialog;
        self.ui.set_dialog_open(dialog, open)
    }

    fn activate(&mut self, element: ElementId) {
        let enabled = self
            .ui
            .document()
            .tree()
            .get(element)
            .is_some_and(|e| !e.flags.contains(ElementFlags::DISABLED));
        if !enabled {
            return;
        }
        if Some(element) == self.view.previous {
            self.previous_page();
        } else if Some(element) == self.view.next {
            self.next_page();
        } else if let Some(card) = self.view.cards.iter().find(|c| c.element == element) {
            self.requests.borrow_mut().push(Request::CardOpen {
                item: card.item_id.clone(),
                open: true,
            });
        }
    }

    fn apply_requests(&mut self) {
        loop {
            let pending = std::mem::take(&mut *self.requests.borrow_mut());
            if pending.is_empty() {
                break;
            }
            for request in pending {
                match request {
                    Request::Filter(value) => self.set_filter(value),
                    Request::CardOpen { item, open } => {
                        self.set_card_open(&item, open);
                    }
                }
            }
        }
    }

    fn render_page(&mut self) {
        if let Some(container) = self.view.container.take() {
            self.ui.remove_element(container);
        }
        let items: Vec<Item> = self.current_items().into_iter().cloned().collect();
        let matching = self.catalog.filtered(&self.filter).count();
        let pagination = self.pagination;
        let config = &self.config;
        let requests = &self.requests;
        let viewport = config.document.viewport;
        let center = viewport.center().x;

        let mut view = PageView::default();
        self.ui.build(|b| {
            let container = b.container(
                Element::new(ElementKind::Generic, "gallery-page", viewport)
                    .with_flags(ElementFlags::VISIBLE),
                |b| {
                    let count = items.len() as f64;
                    let row = count * config.card_size.width + (count - 1.0).max(0.0) * config.card_gap;
                    for (index, item) in items.iter().enumerate() {
                        let x0 = center - row / 2.0
                            + index as f64 * (config.card_size.width + config.card_gap);
                        let frame = Rect::from_origin_size((x0, GRID_TOP), config.card_size);
                        let element = b.button(item.title.as_str(), frame);
                        b.text(
                            item.year.to_string(),
                            Rect::new(frame.x0, frame.y1 + 8.0, frame.x1, frame.y1 + 8.0 + CAPTION_EXTENT),
                        );
                        let orientation = item.orientation();
                        let dialog = card_dialog(b, item, config, requests);
                        view.cards.push(CardView {
                            item_id: item.id.clone(),
                            element,
                            dialog,
                            class_name: merge_classes([
                                Some("card"),
                                Some(card_tilt(index)),
                                Some(match orientation {
                                    Orientation::Landscape => "frame-landscape",
                                    Orientation::Portrait => "frame-portrait",
                                }),
                            ]),
                            orientation,
                            open: false,
                        });
                    }

                    let nav_top = GRID_TOP + config.card_size.height + CAPTION_EXTENT + 56.0;
                    if pagination.shows_navigation() {
                        let previous = Element::new(
                            ElementKind::Button,
                            "Previous page",
                            Rect::new(center - 140.0, nav_top, center - 100.0, nav_top + NAV_EXTENT),
                        )
                        .disabled(!pagination.has_previous());
                        let next = Element::new(
                            ElementKind::Button,
                            "Next page",
                            Rect::new(center + 100.0, nav_top, center + 140.0, nav_top + NAV_EXTENT),
                        )
                        .disabled(!pagination.has_next());
                        view.previous = Some(b.element(previous));
                        view.status = Some(b.text(
                            format!("Page {} of {}", pagination.page(), pagination.total_pages()),
                            Rect::new(center - 90.0, nav_top, center + 90.0, nav_top + NAV_EXTENT),
                        ));
                        view.next = Some(b.element(next));
                    }

                    if matching == 0 {
                        view.empty_notice = Some(b.text(
                            config.empty_notice.as_str(),
                            Rect::new(center - 300.0, GRID_TOP + 40.0, center + 300.0, GRID_TOP + 80.0),
                        ));
                    }
                },
            );
            view.container = Some(container);
        });
        tracing::debug!(
            page = pagination.page(),
            total = pagination.total_pages(),
            cards = view.cards.len(),
            "gallery page rendered"
        );
        self.view = view;
    }
}

/// Heading, filter label and the institution Select. Returns the Select.
fn build_chrome(
    ui: &mut Ui,
    config: &GalleryConfig,
    institutions: &[String],
    requests: &Requests,
) -> WidgetId {
    let center = config.document.viewport.center().x;
    let mut entries = vec![SelectItem::new("", config.all_label.as_str())];
    entries.extend(institutions.iter().map(|i| SelectItem::new(i.as_str(), i.as_str())));
    let sink = requests.clone();
    let props = SelectProps::new()
        .value("")
        .on_value_change(move |value| sink.borrow_mut().push(Request::Filter(value)));
    let trigger = Rect::new(center - 140.0, FILTER_TOP, center + 140.0, FILTER_TOP + 40.0);
    let placeholder = config.all_label.clone();

    ui.build(|b| {
        b.text(
            config.title.as_str(),
            Rect::new(center - 300.0, HEADING_TOP, center + 300.0, HEADING_TOP + 48.0),
        );
        b.text(
            config.filter_label.as_str(),
            Rect::new(center - 340.0, FILTER_TOP, center - 150.0, FILTER_TOP + 40.0),
        );
        b.select(props, trigger, |b| {
            b.select_trigger(trigger, |b| {
                b.select_value(placeholder, trigger.inset(-8.0));
            });
            b.select_content(SelectContentProps::default(), move |b| {
                for entry in &entries {
                    b.select_item(entry.clone());
                }
            });
        })
    })
}

/// A card's controlled detail dialog.
fn card_dialog(
    b: &mut Builder<'_>,
    item: &Item,
    config: &GalleryConfig,
    requests: &Requests,
) -> WidgetId {
    let viewport = config.document.viewport;
    let width = PANEL_MAX_WIDTH.min(viewport.width() - 64.0);
    let height = viewport.height() * 0.9;
    let panel = Rect::from_center_size(viewport.center(), (width, height));

    let sink = requests.clone();
    let id = item.id.clone();
    let props = DialogProps::new().open(false).on_open_change(move |open| {
        sink.borrow_mut().push(Request::CardOpen {
            item: id.clone(),
            open,
        });
    });
    let item = item.clone();
    b.dialog(props, move |b| {
        let content = DialogContentProps {
            bounds: panel,
            ..DialogContentProps::default()
        };
        b.dialog_content(content, move |b| {
            let x0 = panel.x0 + PANEL_PADDING;
            // Leave room for the close button.
            let x1 = panel.x1 - 64.0;
            let y0 = panel.y0 + PANEL_PADDING;
            b.dialog_header(Rect::new(x0, y0, x1, y0 + 88.0), |b| {
                b.dialog_title(item.title.as_str(), Rect::new(x0, y0, x1, y0 + 32.0));
                b.dialog_description(
                    item.institution.as_str(),
                    Rect::new(x0, y0 + 40.0, x1, y0 + 60.0),
                );
                b.text(item.year.to_string(), Rect::new(x0, y0 + 64.0, x1, y0 + 84.0));
            });
            let area = Rect::new(
                x0,
                y0 + 88.0 + PANEL_PADDING,
                panel.x1 - PANEL_PADDING,
                panel.y1 - PANEL_PADDING,
            );
            b.element(Element::new(
                ElementKind::Image,
                item.image.as_str(),
                fit(area, item.orientation().aspect()),
            ));
        });
    })
}

/// The largest rect of the given height/width ratio that fits `area`, centered
/// horizontally and aligned to its top.
fn fit(area: Rect, aspect: f64) -> Rect {
    let width = area.width().min(area.height() / aspect);
    let height = width * aspect;
    let x0 = area.center().x - width / 2.0;
    Rect::new(x0, area.y0, x0 + width, area.y0 + height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_the_aspect_inside_the_area() {
        let area = Rect::new(0.0, 0.0, 800.0, 300.0);
        let landscape = fit(area, Orientation::Landscape.aspect());
        assert_eq!(landscape.height(), 300.0);
        assert_eq!(landscape.width(), 400.0);
        assert_eq!(landscape.center().x, 400.0);

        let tall = Rect::new(0.0, 0.0, 300.0, 1000.0);
        let portrait = fit(tall, Orientation::Portrait.aspect());
        assert_eq!(portrait.width(), 300.0);
        assert_eq!(portrait.height(), 400.0);
    }
}
