// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host that owns a document and the widgets built into it.
//!
//! ## Event order
//!
//! - **Pointer down**: hit test, document pointer listeners in registration order
//!   (outside dismissal), then the default action (focus the nearest tab stop
//!   under the pointer, or blur).
//! - **Pointer up**: click recognition against the matching press; a click
//!   activates the nearest interactive part at or above the target.
//! - **Key down**: the focused element's own part handler, then document key
//!   listeners in registration order (focus containment), then the default
//!   action (Tab traversal, button activation) unless a handler prevented it.
//!
//! A listener removed while an event is being dispatched is not invoked for the
//! rest of that event. Every state change is fully applied, including mounting,
//! unmounting and listener bookkeeping, before the entry point returns.
//!
//! The first input event attaches the overlay surface; see
//! [`Ui::attach_surface`].

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;
use kurbo::Point;
use vitrine_event_state::click::{ClickOutcome, ClickTracker, PointerId};
use vitrine_event_state::key::{Key, KeyEvent};
use vitrine_event_state::listeners::ListenerKind;
use vitrine_focus::{FocusMove, TabOrder, TrapAction};
use vitrine_tree::{ElementFlags, ElementId, ElementKind};

use crate::builder::Builder;
use crate::dialog::DialogState;
use crate::disclosure::DisclosureController;
use crate::document::{Document, DocumentConfig};
use crate::scroll::ScrollAffordance;
use crate::select::{MountedSelect, SelectState};
use crate::selection::SelectItem;
use crate::types::{Part, WidgetId, WidgetKind};

pub(crate) enum Widget {
    Dialog(DialogState),
    Select(SelectState),
}

impl Widget {
    fn kind(&self) -> WidgetKind {
        match self {
            Self::Dialog(_) => WidgetKind::Dialog,
            Self::Select(_) => WidgetKind::Select,
        }
    }

    fn disclosure(&self) -> &DisclosureController {
        match self {
            Self::Dialog(d) => &d.disclosure,
            Self::Select(s) => &s.disclosure,
        }
    }

    fn disclosure_mut(&mut self) -> &mut DisclosureController {
        match self {
            Self::Dialog(d) => &mut d.disclosure,
            Self::Select(s) => &mut s.disclosure,
        }
    }

    fn root(&self) -> ElementId {
        match self {
            Self::Dialog(d) => d.root,
            Self::Select(s) => s.root,
        }
    }
}

/// A pointer press or release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// World-space position.
    pub position: Point,
    /// Pointer identity; `None` is the primary pointer.
    pub pointer: Option<PointerId>,
    /// Timestamp in milliseconds.
    pub time: u64,
}

impl PointerEvent {
    /// A primary-pointer event at `position`, time zero.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            pointer: None,
            time: 0,
        }
    }

    /// Set the timestamp.
    #[must_use]
    pub fn with_time(mut self, time: u64) -> Self {
        self.time = time;
        self
    }

    /// Set the pointer identity.
    #[must_use]
    pub fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = Some(pointer);
        self
    }
}

/// Owns a [`Document`] and hosts Dialog and Select instances inside it.
///
/// ```rust
/// use kurbo::Rect;
/// use vitrine_primitives::{SelectContentProps, SelectItem, SelectProps, Ui};
///
/// let mut ui = Ui::default();
/// let select = ui.build(|b| {
///     b.select(SelectProps::new(), Rect::new(10.0, 10.0, 200.0, 40.0), |b| {
///         b.select_trigger(Rect::new(10.0, 10.0, 200.0, 40.0), |b| {
///             b.select_value("Pick a letter", Rect::new(12.0, 12.0, 180.0, 38.0));
///         });
///         b.select_content(SelectContentProps::default(), |b| {
///             b.select_item(SelectItem::new("A", "Alfa"));
///             b.select_item(SelectItem::new("B", "Bravo"));
///         });
///     })
/// });
///
/// ui.click_label("Pick a letter");
/// assert_eq!(ui.is_open(select), Some(true));
/// ui.click_label("Bravo");
/// assert_eq!(ui.select_value(select), Some("B"));
/// assert_eq!(ui.is_open(select), Some(false));
/// ```
pub struct Ui {
    pub(crate) doc: Document,
    pub(crate) widgets: HashMap<WidgetId, Widget>,
    pub(crate) parts: HashMap<ElementId, Part>,
    next_widget: u32,
    dirty: Vec<WidgetId>,
    clicks: ClickTracker<ElementId>,
}

impl fmt::Debug for Ui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ui")
            .field("doc", &self.doc)
            .field("widgets", &self.widgets.len())
            .field("parts", &self.parts.len())
            .finish_non_exhaustive()
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(DocumentConfig::default())
    }
}

impl Ui {
    /// A host with an empty document.
    pub fn new(config: DocumentConfig) -> Self {
        Self {
            doc: Document::new(config),
            widgets: HashMap::new(),
            parts: HashMap::new(),
            next_widget: 0,
            dirty: Vec::new(),
            clicks: ClickTracker::new(),
        }
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    // --- building ---

    /// Build into the body.
    pub fn build<R>(&mut self, f: impl FnOnce(&mut Builder<'_>) -> R) -> R {
        let body = self.doc.body;
        self.build_under(body, f)
    }

    /// Build under `parent` (the body if `parent` is stale).
    pub fn build_under<R>(&mut self, parent: ElementId, f: impl FnOnce(&mut Builder<'_>) -> R) -> R {
        let parent = if self.doc.tree.is_alive(parent) {
            parent
        } else {
            self.doc.body
        };
        let mut builder = Builder::new(self, parent);
        let result = f(&mut builder);
        drop(builder);
        self.flush();
        result
    }

    pub(crate) fn insert_widget(&mut self, widget: Widget) -> WidgetId {
        let id = WidgetId(self.next_widget);
        self.next_widget += 1;
        self.widgets.insert(id, widget);
        self.dirty.push(id);
        id
    }

    pub(crate) fn mark_dirty(&mut self, id: WidgetId) {
        if !self.dirty.contains(&id) {
            self.dirty.push(id);
        }
    }

    /// Reconcile every widget whose state changed, including widgets created by
    /// the reconciliation itself.
    pub(crate) fn flush(&mut self) {
        while !self.dirty.is_empty() {
            let batch = core::mem::take(&mut self.dirty);
            for id in batch {
                match self.widgets.get(&id).map(Widget::kind) {
                    Some(WidgetKind::Dialog) => self.reconcile_dialog(id),
                    Some(WidgetKind::Select) => self.reconcile_select(id),
                    None => {}
                }
            }
        }
    }

    fn request_open(&mut self, id: WidgetId, next: bool) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.disclosure_mut().request_open_change(next);
            self.mark_dirty(id);
            self.flush();
        }
    }

    fn toggle(&mut self, id: WidgetId) {
        if let Some(open) = self.is_open(id) {
            self.request_open(id, !open);
        }
    }

    // --- input ---

    /// Mark the overlay surface ready and mount any Dialog content opened before.
    ///
    /// Called implicitly by every input entry point.
    pub fn attach_surface(&mut self) {
        if !self.doc.overlay.attach_surface() {
            return;
        }
        let mut dialogs: Vec<WidgetId> = self
            .widgets
            .iter()
            .filter(|(_, w)| w.kind() == WidgetKind::Dialog)
            .map(|(id, _)| *id)
            .collect();
        dialogs.sort_unstable();
        for id in dialogs {
            self.mark_dirty(id);
        }
        self.flush();
    }

    /// Press a pointer. Returns the hit target.
    pub fn pointer_down(&mut self, event: PointerEvent) -> Option<ElementId> {
        self.attach_surface();
        let target = self.doc.hit_test(event.position);
        if let Some(target) = target {
            self.clicks
                .press(event.pointer, target, event.position, event.time);
        }

        for (listener, owner) in self.doc.listeners.snapshot(ListenerKind::PointerDown) {
            if !self.doc.listeners.is_registered(listener) {
                continue;
            }
            let outside = match self.widgets.get(&owner) {
                Some(Widget::Select(select)) => select
                    .mounted
                    .as_ref()
                    .and_then(MountedSelect::dismissal)
                    .is_some_and(|d| d.is_outside(&self.doc.tree, target)),
                _ => false,
            };
            if outside {
                tracing::debug!(?owner, ?target, "pointer down outside select");
                self.request_open(owner, false);
            }
        }

        let focus_target = target.and_then(|t| self.focusable_ancestor(t));
        self.doc.focus(focus_target);
        self.flush();
        target
    }

    /// Release a pointer. Returns the clicked element, if the release completed a click.
    pub fn pointer_up(&mut self, event: PointerEvent) -> Option<ElementId> {
        self.attach_surface();
        let target = self.doc.hit_test(event.position);
        match self
            .clicks
            .release(event.pointer, target.as_ref(), event.position, event.time)
        {
            ClickOutcome::Clicked(element) if self.doc.tree.is_alive(element) => {
                self.activate(element);
                self.flush();
                Some(element)
            }
            _ => None,
        }
    }

    /// Press and release the primary pointer at `position`.
    pub fn click(&mut self, position: Point) -> Option<ElementId> {
        let event = PointerEvent::at(position);
        self.pointer_down(event);
        self.pointer_up(event)
    }

    /// Click the center of an element.
    pub fn click_element(&mut self, id: ElementId) -> Option<ElementId> {
        let center = self.doc.tree.get(id)?.bounds.center();
        self.click(center)
    }

    /// Click the center of the first element labelled `label`.
    pub fn click_label(&mut self, label: &str) -> Option<ElementId> {
        let id = self.doc.find_by_label(label)?;
        self.click_element(id)
    }

    /// Press a key. Returns `true` if a handler prevented the default action.
    pub fn key_down(&mut self, event: KeyEvent) -> bool {
        self.attach_surface();
        let mut prevented = self.dispatch_focused_key(&event);
        prevented |= self.dispatch_key_listeners(&event);
        if !prevented {
            self.default_key_action(&event);
        }
        self.flush();
        prevented
    }

    /// Press a key without modifiers.
    pub fn press(&mut self, key: Key) -> bool {
        self.key_down(KeyEvent::new(key))
    }

    /// Scroll by `delta` at `position`: the Select viewport under the pointer, or
    /// the page. Returns `true` if something moved.
    pub fn scroll(&mut self, position: Point, delta: f64) -> bool {
        self.attach_surface();
        let owner = self.doc.hit_test(position).and_then(|target| {
            self.doc
                .tree
                .path_to(target)
                .iter()
                .rev()
                .find_map(|id| match self.parts.get(id) {
                    Some(
                        Part::SelectContent(w)
                        | Part::SelectViewport(w)
                        | Part::SelectItem(w)
                        | Part::SelectLabel(w)
                        | Part::SelectGroup(w)
                        | Part::SelectSeparator(w)
                        | Part::SelectScrollUp(w)
                        | Part::SelectScrollDown(w),
                    ) => Some(*w),
                    _ => None,
                })
        });
        match owner {
            Some(owner) => self.scroll_select(owner, delta),
            None => self.doc.scroll_page(delta),
        }
    }

    /// Focus an element. Returns `false` if it cannot take focus.
    pub fn focus(&mut self, id: ElementId) -> bool {
        self.move_focus(id)
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.doc.focus(None);
    }

    /// The focused element.
    pub fn focused(&self) -> Option<ElementId> {
        self.doc.focused
    }

    pub(crate) fn move_focus(&mut self, target: ElementId) -> bool {
        if !self.doc.focus(Some(target)) {
            return false;
        }
        if let Some(Part::SelectItem(owner)) = self.parts.get(&target).copied() {
            self.reveal_select_row(owner, target);
        }
        true
    }

    fn focusable_ancestor(&self, id: ElementId) -> Option<ElementId> {
        self.doc
            .tree
            .path_to(id)
            .into_iter()
            .rev()
            .find(|&a| self.doc.can_focus(a))
    }

    fn activate(&mut self, element: ElementId) {
        if self
            .doc
            .tree
            .get(element)
            .is_some_and(|e| e.flags.contains(ElementFlags::DISABLED))
        {
            return;
        }
        let path = self.doc.tree.path_to(element);
        let Some((bound, part)) = path.iter().rev().find_map(|id| {
            self.parts
                .get(id)
                .filter(|p| p.is_interactive())
                .map(|p| (*id, *p))
        }) else {
            return;
        };
        match part {
            Part::DialogTrigger(w) => self.request_open(w, true),
            Part::DialogClose(w) => self.request_open(w, false),
            // Only a click on the backdrop itself dismisses.
            Part::DialogOverlay(w) if bound == element => self.request_open(w, false),
            Part::SelectTrigger(w) => self.toggle(w),
            Part::SelectItem(w) => {
                self.select_element(w, bound);
                self.flush();
            }
            _ => {}
        }
    }

    fn dispatch_focused_key(&mut self, event: &KeyEvent) -> bool {
        let Some(focused) = self.doc.focused else {
            return false;
        };
        if !event.is_activation() {
            return false;
        }
        match self.parts.get(&focused).copied() {
            Some(Part::SelectTrigger(w)) => {
                self.toggle(w);
                true
            }
            Some(Part::SelectItem(w)) => {
                let enabled = self
                    .doc
                    .tree
                    .get(focused)
                    .is_some_and(|e| !e.flags.contains(ElementFlags::DISABLED));
                if enabled {
                    self.select_element(w, focused);
                    self.flush();
                }
                enabled
            }
            _ => false,
        }
    }

    fn dispatch_key_listeners(&mut self, event: &KeyEvent) -> bool {
        let mut prevented = false;
        for (listener, owner) in self.doc.listeners.snapshot(ListenerKind::KeyDown) {
            if !self.doc.listeners.is_registered(listener) {
                continue;
            }
            let focused = self.doc.focused;
            let action = match self.widgets.get(&owner) {
                Some(Widget::Dialog(dialog)) => dialog
                    .mounted
                    .as_ref()
                    .map(|m| m.containment.on_key(event, focused)),
                _ => None,
            };
            match action {
                Some(TrapAction::Redirect(target)) => {
                    self.move_focus(target);
                    prevented = true;
                }
                Some(TrapAction::Dismiss) => {
                    tracing::debug!(?owner, "dismiss key pressed");
                    self.request_open(owner, false);
                }
                Some(TrapAction::Pass) | None => {}
            }
        }
        prevented
    }

    fn default_key_action(&mut self, event: &KeyEvent) {
        match event.key {
            Key::Tab => {
                let direction = if event.shift() {
                    FocusMove::Backward
                } else {
                    FocusMove::Forward
                };
                let tree = &self.doc.tree;
                let order = TabOrder::new(
                    tree.focusables()
                        .into_iter()
                        .map(|id| (id, tree.get(id).and_then(|e| e.tab_index))),
                );
                if let Some(next) = order.step(self.doc.focused, direction) {
                    self.move_focus(next);
                }
            }
            Key::Enter | Key::Space => {
                let Some(focused) = self.doc.focused else {
                    return;
                };
                let activates = self.doc.tree.get(focused).is_some_and(|e| {
                    matches!(
                        (e.kind, event.key),
                        (ElementKind::Button, _) | (ElementKind::Link, Key::Enter)
                    )
                });
                if activates {
                    self.activate(focused);
                }
            }
            _ => {}
        }
    }

    // --- props ---

    /// Push a controlled Dialog's `open` prop. Returns `false` if `id` is not a Dialog.
    pub fn set_dialog_open(&mut self, id: WidgetId, open: bool) -> bool {
        let Some(Widget::Dialog(dialog)) = self.widgets.get_mut(&id) else {
            return false;
        };
        dialog.disclosure.sync_external(open);
        self.mark_dirty(id);
        self.flush();
        true
    }

    /// Push a controlled Select's `open` prop. Returns `false` if `id` is not a Select.
    pub fn set_select_open(&mut self, id: WidgetId, open: bool) -> bool {
        let Some(Widget::Select(select)) = self.widgets.get_mut(&id) else {
            return false;
        };
        select.disclosure.sync_external(open);
        self.mark_dirty(id);
        self.flush();
        true
    }

    /// Push a controlled Select's `value` prop. Returns `false` if `id` is not a Select.
    pub fn set_select_value(&mut self, id: WidgetId, value: impl Into<String>) -> bool {
        let Some(Widget::Select(select)) = self.widgets.get_mut(&id) else {
            return false;
        };
        select.selection.sync_external(value.into());
        self.mark_dirty(id);
        self.flush();
        true
    }

    // --- teardown ---

    /// Tear a widget down, unmounting open content. Returns `false` for stale ids.
    pub fn remove_widget(&mut self, id: WidgetId) -> bool {
        if !self.widgets.contains_key(&id) {
            return false;
        }
        self.teardown_widget(id);
        true
    }

    /// Remove an element subtree, tearing down every widget rooted inside it.
    ///
    /// The body and the overlay root cannot be removed. Returns the number of
    /// elements removed by the final subtree removal.
    pub fn remove_element(&mut self, id: ElementId) -> usize {
        if id == self.doc.body || id == self.doc.overlay.element() {
            return 0;
        }
        let tree = &self.doc.tree;
        let mut inside: Vec<WidgetId> = self
            .widgets
            .iter()
            .filter(|(_, w)| tree.contains(id, w.root()))
            .map(|(w, _)| *w)
            .collect();
        inside.sort_unstable();
        for widget in inside {
            self.teardown_widget(widget);
        }
        let removed = self.doc.tree.remove(id);
        self.purge_stale();
        removed
    }

    pub(crate) fn teardown_widget(&mut self, id: WidgetId) {
        let Some(widget) = self.widgets.remove(&id) else {
            return;
        };
        self.dirty.retain(|w| *w != id);
        match widget {
            Widget::Dialog(mut dialog) => {
                if let Some(mounted) = dialog.mounted.take() {
                    self.release_dialog_content(id, mounted);
                }
                dialog
                    .portal
                    .sync(false, &mut self.doc.overlay, &mut self.doc.tree, "dialog-portal");
                for child in dialog.children {
                    self.teardown_widget(child);
                }
                self.doc.tree.remove(dialog.root);
            }
            Widget::Select(mut select) => {
                if let Some(mounted) = select.mounted.take() {
                    self.unmount_select_content(id, mounted);
                }
                for child in select.children {
                    self.teardown_widget(child);
                }
                self.doc.tree.remove(select.root);
            }
        }
        self.purge_stale();
        tracing::debug!(?id, "widget torn down");
    }

    /// Forget bindings, presses and focus that point at removed elements.
    pub(crate) fn purge_stale(&mut self) {
        let tree = &self.doc.tree;
        self.parts.retain(|id, _| tree.is_alive(*id));
        self.clicks.forget_where(|id| tree.is_alive(*id));
        self.doc.drop_stale_focus();
    }

    // --- queries ---

    /// Number of live widgets.
    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Kind of a live widget.
    pub fn widget_kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.widgets.get(&id).map(Widget::kind)
    }

    /// Whether a widget is open, as its parts see it.
    pub fn is_open(&self, id: WidgetId) -> Option<bool> {
        self.widgets.get(&id).map(|w| w.disclosure().open())
    }

    /// Whether a widget's open state is controlled by its owner.
    pub fn is_controlled(&self, id: WidgetId) -> Option<bool> {
        self.widgets.get(&id).map(|w| w.disclosure().is_controlled())
    }

    /// A Select's current value.
    pub fn select_value(&self, id: WidgetId) -> Option<&str> {
        match self.widgets.get(&id) {
            Some(Widget::Select(select)) => Some(select.selection.current_value()),
            _ => None,
        }
    }

    /// Whether `value` is a Select's current value.
    pub fn is_selected(&self, id: WidgetId, value: &str) -> Option<bool> {
        match self.widgets.get(&id) {
            Some(Widget::Select(select)) => Some(select.selection.is_selected(value)),
            _ => None,
        }
    }

    /// The part an element plays, if any.
    pub fn part(&self, element: ElementId) -> Option<Part> {
        self.parts.get(&element).copied()
    }

    /// The mounted content element of an open widget.
    pub fn content(&self, id: WidgetId) -> Option<ElementId> {
        match self.widgets.get(&id)? {
            Widget::Dialog(dialog) => dialog.mounted.as_ref().map(|m| m.panel),
            Widget::Select(select) => select.mounted.as_ref().map(|m| m.content),
        }
    }

    /// The trigger element of a Select.
    pub fn select_trigger(&self, id: WidgetId) -> Option<ElementId> {
        match self.widgets.get(&id)? {
            Widget::Select(select) => select.trigger,
            Widget::Dialog(_) => None,
        }
    }

    /// The focus boundary of an open Dialog.
    pub fn focus_boundary(&self, id: WidgetId) -> Option<&[ElementId]> {
        match self.widgets.get(&id)? {
            Widget::Dialog(dialog) => dialog
                .mounted
                .as_ref()
                .map(|m| m.containment.boundary().as_slice()),
            Widget::Select(_) => None,
        }
    }

    /// Scroll indicator flags of an open Select.
    pub fn scroll_affordance(&self, id: WidgetId) -> Option<ScrollAffordance> {
        match self.widgets.get(&id)? {
            Widget::Select(select) => select.mounted.as_ref().map(MountedSelect::affordance),
            Widget::Dialog(_) => None,
        }
    }

    /// Scroll offset of an open Select's viewport.
    pub fn scroll_offset(&self, id: WidgetId) -> Option<f64> {
        match self.widgets.get(&id)? {
            Widget::Select(select) => select.mounted.as_ref().map(|m| m.viewport.offset()),
            Widget::Dialog(_) => None,
        }
    }

    /// Option elements of an open Select, in order.
    pub fn select_items(&self, id: WidgetId) -> Vec<ElementId> {
        match self.widgets.get(&id) {
            Some(Widget::Select(select)) => select.mounted.as_ref().map_or_else(Vec::new, |m| {
                m.rows
                    .iter()
                    .map(|r| r.element)
                    .filter(|e| m.items.contains_key(e))
                    .collect()
            }),
            _ => Vec::new(),
        }
    }

    /// The option bound to an element.
    pub fn item(&self, element: ElementId) -> Option<&SelectItem> {
        let Some(Part::SelectItem(owner)) = self.parts.get(&element) else {
            return None;
        };
        match self.widgets.get(owner)? {
            Widget::Select(select) => select.mounted.as_ref()?.items.get(&element),
            Widget::Dialog(_) => None,
        }
    }

    /// Whether the option bound to an element is the selected one.
    pub fn is_item_selected(&self, element: ElementId) -> Option<bool> {
        let item = self.item(element)?;
        let Some(Part::SelectItem(owner)) = self.parts.get(&element) else {
            return None;
        };
        self.is_selected(*owner, &item.value)
    }
}
