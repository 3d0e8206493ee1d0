// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document a [`Ui`](crate::Ui) renders into.
//!
//! A document is an element tree with two roots: the body, where widgets are
//! built, and the [`OverlayRoot`], where open Dialog content is mounted. It also
//! carries the document-wide state browsers keep next to the DOM: the focused
//! element, document-level listeners and the body scroll lock.

use kurbo::Rect;
use vitrine_event_state::listeners::ListenerRegistry;
use vitrine_tree::{Element, ElementFlags, ElementId, ElementKind, Tree};

use crate::layer::OverlayRoot;
use crate::scroll::ScrollViewport;
use crate::types::WidgetId;

/// Document configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DocumentConfig {
    /// Visible area. The overlay root and Dialog backdrops cover it.
    pub viewport: Rect,
    /// Height of the scrollable page behind the viewport.
    pub page_extent: f64,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
        Self {
            viewport,
            page_extent: viewport.height(),
        }
    }
}

/// Token for one hold on the body scroll lock.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "the page stays locked until the lock is released"]
pub struct ScrollLock(());

/// Element tree plus document-wide interaction state.
#[derive(Debug)]
pub struct Document {
    pub(crate) tree: Tree,
    pub(crate) body: ElementId,
    pub(crate) overlay: OverlayRoot,
    pub(crate) listeners: ListenerRegistry<WidgetId>,
    pub(crate) focused: Option<ElementId>,
    scroll_locks: u32,
    page: ScrollViewport,
    config: DocumentConfig,
}

impl Document {
    /// An empty document with a body and an overlay root.
    pub fn new(config: DocumentConfig) -> Self {
        let mut tree = Tree::new();
        let body = tree.insert(
            None,
            Element::new(ElementKind::Generic, "body", config.viewport),
        );
        let overlay = OverlayRoot::new(&mut tree, config.viewport);
        Self {
            tree,
            body,
            overlay,
            listeners: ListenerRegistry::new(),
            focused: None,
            scroll_locks: 0,
            page: ScrollViewport::new(config.viewport.height(), config.page_extent),
            config,
        }
    }

    /// The element tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The body root.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// The overlay root.
    pub fn overlay(&self) -> &OverlayRoot {
        &self.overlay
    }

    /// Document-level listeners.
    pub fn listeners(&self) -> &ListenerRegistry<WidgetId> {
        &self.listeners
    }

    /// The configuration the document was created with.
    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// The focused element.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Whether `id` can take focus right now.
    pub fn can_focus(&self, id: ElementId) -> bool {
        self.tree.get(id).is_some_and(Element::is_focusable) && self.tree.is_rendered(id)
    }

    /// Move focus to `target`, or blur with `None`.
    ///
    /// Returns `false` and leaves focus alone when `target` cannot take focus.
    pub fn focus(&mut self, target: Option<ElementId>) -> bool {
        if let Some(id) = target
            && !self.can_focus(id)
        {
            return false;
        }
        if self.focused != target {
            tracing::trace!(from = ?self.focused, to = ?target, "focus moved");
        }
        self.focused = target;
        true
    }

    /// Drop focus if the focused element is gone or can no longer take it.
    pub(crate) fn drop_stale_focus(&mut self) {
        if let Some(id) = self.focused
            && !self.can_focus(id)
        {
            self.focused = None;
        }
    }

    /// Whether page scrolling is locked.
    pub fn is_scroll_locked(&self) -> bool {
        self.scroll_locks > 0
    }

    /// Number of outstanding scroll locks.
    pub fn scroll_lock_count(&self) -> u32 {
        self.scroll_locks
    }

    /// Take a hold on the body scroll lock.
    pub fn lock_scroll(&mut self) -> ScrollLock {
        self.scroll_locks += 1;
        tracing::trace!(holds = self.scroll_locks, "page scroll locked");
        ScrollLock(())
    }

    /// Release a hold on the body scroll lock.
    pub fn unlock_scroll(&mut self, lock: ScrollLock) {
        let ScrollLock(()) = lock;
        debug_assert!(self.scroll_locks > 0, "scroll lock released twice");
        self.scroll_locks = self.scroll_locks.saturating_sub(1);
        tracing::trace!(holds = self.scroll_locks, "page scroll lock released");
    }

    /// Current page scroll offset.
    pub fn page_offset(&self) -> f64 {
        self.page.offset()
    }

    /// Scroll the page unless locked. Returns `true` if the page moved.
    pub(crate) fn scroll_page(&mut self, delta: f64) -> bool {
        if self.is_scroll_locked() {
            return false;
        }
        self.page.scroll_by(delta)
    }

    /// Topmost pickable element under `point`.
    pub fn hit_test(&self, point: kurbo::Point) -> Option<ElementId> {
        self.tree
            .hit_test_point(point, vitrine_tree::QueryFilter::new().visible().pickable())
            .map(|hit| hit.element)
    }

    /// First live element, in document order, whose label is `label`.
    pub fn find_by_label(&self, label: &str) -> Option<ElementId> {
        self.tree
            .document_order()
            .into_iter()
            .find(|&id| self.tree.get(id).is_some_and(|e| e.label == label))
    }

    /// Whether `id` is live and visible along its ancestry.
    pub fn is_rendered(&self, id: ElementId) -> bool {
        self.tree.is_rendered(id)
    }

    /// Set or clear `flag` on an element.
    pub(crate) fn set_flag(&mut self, id: ElementId, flag: ElementFlags, on: bool) {
        if let Some(element) = self.tree.get_mut(id) {
            element.flags.set(flag, on);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DocumentConfig::default())
    }
}
