// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative construction of widgets and their parts.
//!
//! A [`Builder`] walks a widget tree top-down. Widget roots publish themselves on
//! a [`ScopeStack`] for the duration of their children; part constructors read the
//! nearest enclosing owner and bind to it. A part declared outside any owner is
//! built as a plain element with no behavior.
//!
//! Content templates are not run at build time. They are stored on the owner and
//! run every time it opens, with the owner republished around them.
//!
//! ```rust
//! use kurbo::Rect;
//! use vitrine_primitives::{DialogContentProps, DialogProps, Ui};
//!
//! let mut ui = Ui::default();
//! let dialog = ui.build(|b| {
//!     b.dialog(DialogProps::new(), |b| {
//!         b.dialog_trigger("Open", Rect::new(10.0, 10.0, 90.0, 40.0));
//!         b.dialog_content(DialogContentProps::default(), |b| {
//!             b.dialog_title("Hello", Rect::new(400.0, 220.0, 700.0, 240.0));
//!         });
//!     })
//! });
//!
//! ui.click_label("Open");
//! assert_eq!(ui.is_open(dialog), Some(true));
//! assert!(ui.document().find_by_label("Hello").is_some());
//! ```

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;
use kurbo::Rect;
use vitrine_scope::ScopeStack;
use vitrine_tree::{Element, ElementFlags, ElementId, ElementKind};

use crate::dialog::{DialogContentProps, DialogProps, DialogState};
use crate::document::Document;
use crate::select::{SelectContentProps, SelectProps, SelectState};
use crate::selection::SelectItem;
use crate::types::{Part, WidgetId};
use crate::ui::{Ui, Widget};

#[derive(Copy, Clone, Debug)]
struct DialogScope(WidgetId);

#[derive(Copy, Clone, Debug)]
struct SelectScope(WidgetId);

#[derive(Copy, Clone, Debug)]
struct SelectContentScope(WidgetId);

/// Builds elements and widgets into a [`Ui`].
///
/// Obtained from [`Ui::build`] or [`Ui::build_under`].
pub struct Builder<'a> {
    ui: &'a mut Ui,
    scopes: ScopeStack,
    parents: Vec<ElementId>,
    /// Widgets created at each widget nesting level; the first frame is the caller's.
    created: Vec<Vec<WidgetId>>,
}

impl core::fmt::Debug for Builder<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Builder")
            .field("scopes", &self.scopes)
            .field("parents", &self.parents)
            .finish_non_exhaustive()
    }
}

impl<'a> Builder<'a> {
    pub(crate) fn new(ui: &'a mut Ui, parent: ElementId) -> Self {
        Self {
            ui,
            scopes: ScopeStack::new(),
            parents: vec![parent],
            created: vec![Vec::new()],
        }
    }

    /// Widgets created directly at the top level of this build.
    pub(crate) fn finish(self) -> Vec<WidgetId> {
        self.created.into_iter().next().unwrap_or_default()
    }

    fn scoped<T: Any>(&mut self, value: T, f: impl FnOnce(&mut Self)) {
        let handle = self.scopes.publish(value);
        f(self);
        self.scopes.close(handle);
    }

    pub(crate) fn enter_dialog(&mut self, id: WidgetId, f: impl FnOnce(&mut Self)) {
        self.scoped(DialogScope(id), f);
    }

    pub(crate) fn enter_select_content(&mut self, id: WidgetId, f: impl FnOnce(&mut Self)) {
        self.scoped(SelectScope(id), |b| b.scoped(SelectContentScope(id), f));
    }

    fn allocate_widget(&mut self, widget: Widget) -> WidgetId {
        let id = self.ui.insert_widget(widget);
        if let Some(frame) = self.created.last_mut() {
            frame.push(id);
        }
        id
    }

    fn with_parent(&mut self, parent: ElementId, f: impl FnOnce(&mut Self)) {
        self.parents.push(parent);
        f(self);
        self.parents.pop();
    }

    fn bind(&mut self, element: ElementId, part: Option<Part>) -> ElementId {
        if let Some(part) = part {
            self.ui.parts.insert(element, part);
        }
        element
    }

    /// The document being built into.
    pub fn document(&self) -> &Document {
        &self.ui.doc
    }

    /// The element new elements are appended to.
    pub fn parent(&self) -> ElementId {
        self.parents.last().copied().unwrap_or(self.ui.doc.body)
    }

    /// Append a plain element.
    pub fn element(&mut self, element: Element) -> ElementId {
        let parent = self.parent();
        self.ui.doc.tree.insert(Some(parent), element)
    }

    /// Append an element and build its children.
    pub fn container(&mut self, element: Element, children: impl FnOnce(&mut Self)) -> ElementId {
        let id = self.element(element);
        self.with_parent(id, children);
        id
    }

    /// Append a text element.
    pub fn text(&mut self, label: impl Into<String>, bounds: Rect) -> ElementId {
        self.element(Element::new(ElementKind::Text, label, bounds))
    }

    /// Append a button with no behavior of its own.
    pub fn button(&mut self, label: impl Into<String>, bounds: Rect) -> ElementId {
        self.element(Element::new(ElementKind::Button, label, bounds))
    }

    // --- Dialog ---

    /// Create a Dialog and build its parts.
    pub fn dialog(&mut self, props: DialogProps, children: impl FnOnce(&mut Self)) -> WidgetId {
        let root = self.element(
            Element::new(ElementKind::Generic, "dialog", Rect::ZERO).with_flags(ElementFlags::VISIBLE),
        );
        let id = self.allocate_widget(Widget::Dialog(DialogState::new(props.into_controller(), root)));
        self.ui.parts.insert(root, Part::DialogRoot(id));

        self.created.push(Vec::new());
        self.with_parent(root, |b| b.enter_dialog(id, children));
        let nested = self.created.pop().unwrap_or_default();
        if let Some(Widget::Dialog(dialog)) = self.ui.widgets.get_mut(&id) {
            dialog.children = nested;
        }
        tracing::debug!(?id, "dialog created");
        id
    }

    fn dialog_owner(&self) -> Option<WidgetId> {
        self.scopes.read::<DialogScope>().map(|s| s.0)
    }

    /// A button that opens the enclosing Dialog.
    pub fn dialog_trigger(&mut self, label: impl Into<String>, bounds: Rect) -> ElementId {
        let id = self.button(label, bounds);
        let part = self.dialog_owner().map(Part::DialogTrigger);
        self.bind(id, part)
    }

    /// A button that closes the enclosing Dialog.
    pub fn dialog_close(&mut self, label: impl Into<String>, bounds: Rect) -> ElementId {
        let id = self.button(label, bounds);
        let part = self.dialog_owner().map(Part::DialogClose);
        self.bind(id, part)
    }

    /// Declare the content of the enclosing Dialog.
    ///
    /// `template` runs every time the Dialog opens. Declaring content twice keeps the
    /// last declaration; declaring it outside a Dialog does nothing.
    pub fn dialog_content(
        &mut self,
        props: DialogContentProps,
        template: impl Fn(&mut Builder<'_>) + 'static,
    ) {
        let Some(owner) = self.dialog_owner() else {
            tracing::trace!("dialog content declared outside a dialog");
            return;
        };
        if let Some(Widget::Dialog(dialog)) = self.ui.widgets.get_mut(&owner) {
            dialog.content = Some((props, Rc::new(template)));
        }
    }

    /// A header block.
    pub fn dialog_header(&mut self, bounds: Rect, children: impl FnOnce(&mut Self)) -> ElementId {
        let id = self.container(
            Element::new(ElementKind::Generic, "dialog-header", bounds),
            children,
        );
        let part = self.dialog_owner().map(Part::DialogHeader);
        self.bind(id, part)
    }

    /// A footer block.
    pub fn dialog_footer(&mut self, bounds: Rect, children: impl FnOnce(&mut Self)) -> ElementId {
        let id = self.container(
            Element::new(ElementKind::Generic, "dialog-footer", bounds),
            children,
        );
        let part = self.dialog_owner().map(Part::DialogFooter);
        self.bind(id, part)
    }

    /// Title text.
    pub fn dialog_title(&mut self, label: impl Into<String>, bounds: Rect) -> ElementId {
        let id = self.text(label, bounds);
        let part = self.dialog_owner().map(Part::DialogTitle);
        self.bind(id, part)
    }

    /// Description text.
    pub fn dialog_description(&mut self, label: impl Into<String>, bounds: Rect) -> ElementId {
        let id = self.text(label, bounds);
        let part = self.dialog_owner().map(Part::DialogDescription);
        self.bind(id, part)
    }

    // --- Select ---

    /// Create a Select and build its parts.
    pub fn select(
        &mut self,
        props: SelectProps,
        bounds: Rect,
        children: impl FnOnce(&mut Self),
    ) -> WidgetId {
        let root = self.element(
            Element::new(ElementKind::Generic, "select", bounds).with_flags(ElementFlags::VISIBLE),
        );
        let id = self.allocate_widget(Widget::Select(SelectState::new(props, root)));
        self.ui.parts.insert(root, Part::SelectRoot(id));

        self.created.push(Vec::new());
        self.with_parent(root, |b| b.scoped(SelectScope(id), children));
        let nested = self.created.pop().unwrap_or_default();
        if let Some(Widget::Select(select)) = self.ui.widgets.get_mut(&id) {
            select.children = nested;
        }
        tracing::debug!(?id, "select created");
        id
    }

    fn select_owner(&self) -> Option<WidgetId> {
        self.scopes.read::<SelectScope>().map(|s| s.0)
    }

    fn select_content_owner(&self) -> Option<WidgetId> {
        self.scopes.read::<SelectContentScope>().map(|s| s.0)
    }

    /// The button that toggles the enclosing Select.
    pub fn select_trigger(&mut self, bounds: Rect, children: impl FnOnce(&mut Self)) -> ElementId {
        let id = self.container(
            Element::new(ElementKind::Button, "select-trigger", bounds),
            children,
        );
        let owner = self.select_owner();
        if let Some(owner) = owner
            && let Some(Widget::Select(select)) = self.ui.widgets.get_mut(&owner)
        {
            select.trigger = Some(id);
        }
        self.bind(id, owner.map(Part::SelectTrigger))
    }

    /// Text showing the current value, or `placeholder` while nothing is selected.
    pub fn select_value(&mut self, placeholder: impl Into<String>, bounds: Rect) -> ElementId {
        let placeholder = placeholder.into();
        let owner = self.select_owner();
        let shown = match owner.and_then(|o| self.ui.widgets.get(&o)) {
            Some(Widget::Select(select)) if !select.selection.current_value().is_empty() => {
                String::from(select.selection.current_value())
            }
            _ => placeholder.clone(),
        };
        let id = self.text(shown, bounds);
        if let Some(owner) = owner
            && let Some(Widget::Select(select)) = self.ui.widgets.get_mut(&owner)
        {
            select.values.push((id, placeholder));
        }
        self.bind(id, owner.map(Part::SelectValue))
    }

    /// Declare the options of the enclosing Select.
    ///
    /// `template` runs every time the Select opens. Declaring it outside a Select
    /// does nothing.
    pub fn select_content(
        &mut self,
        props: SelectContentProps,
        template: impl Fn(&mut Builder<'_>) + 'static,
    ) {
        let Some(owner) = self.select_owner() else {
            tracing::trace!("select content declared outside a select");
            return;
        };
        if let Some(Widget::Select(select)) = self.ui.widgets.get_mut(&owner) {
            select.content = Some((props, Rc::new(template)));
        }
    }

    fn row_extent(&self, owner: WidgetId, separator: bool) -> Option<f64> {
        match self.ui.widgets.get(&owner) {
            Some(Widget::Select(select)) => select.mounted.as_ref().map(|m| {
                if separator {
                    m.props.separator_extent
                } else {
                    m.props.item_extent
                }
            }),
            _ => None,
        }
    }

    fn push_row(&mut self, owner: WidgetId, element: ElementId, extent: f64, pickable: bool) {
        if let Some(Widget::Select(select)) = self.ui.widgets.get_mut(&owner)
            && let Some(mounted) = select.mounted.as_mut()
        {
            mounted.push_row(element, extent, pickable);
        }
    }

    /// One option. Disabled options are not tab stops and ignore selection.
    pub fn select_item(&mut self, item: SelectItem) -> ElementId {
        let element = Element::new(ElementKind::Generic, item.label.as_str(), Rect::ZERO)
            .with_tab_index(if item.disabled { -1 } else { 0 })
            .disabled(item.disabled);
        let id = self.element(element);
        let Some(owner) = self.select_content_owner() else {
            return id;
        };
        if let Some(extent) = self.row_extent(owner, false) {
            self.push_row(owner, id, extent, true);
        }
        if let Some(Widget::Select(select)) = self.ui.widgets.get_mut(&owner)
            && let Some(mounted) = select.mounted.as_mut()
        {
            mounted.items.insert(id, item);
        }
        self.bind(id, Some(Part::SelectItem(owner)))
    }

    /// A group of options.
    pub fn select_group(&mut self, children: impl FnOnce(&mut Self)) -> ElementId {
        let id = self.container(
            Element::new(ElementKind::Generic, "select-group", Rect::ZERO)
                .with_flags(ElementFlags::VISIBLE),
            children,
        );
        let part = self.select_content_owner().map(Part::SelectGroup);
        self.bind(id, part)
    }

    /// A label row.
    pub fn select_label(&mut self, label: impl Into<String>) -> ElementId {
        let id = self.text(label, Rect::ZERO);
        let Some(owner) = self.select_content_owner() else {
            return id;
        };
        if let Some(extent) = self.row_extent(owner, false) {
            self.push_row(owner, id, extent, true);
        }
        self.bind(id, Some(Part::SelectLabel(owner)))
    }

    /// A separator row.
    pub fn select_separator(&mut self) -> ElementId {
        let id = self.element(
            Element::new(ElementKind::Generic, "select-separator", Rect::ZERO)
                .with_flags(ElementFlags::VISIBLE),
        );
        let Some(owner) = self.select_content_owner() else {
            return id;
        };
        if let Some(extent) = self.row_extent(owner, true) {
            self.push_row(owner, id, extent, false);
        }
        self.bind(id, Some(Part::SelectSeparator(owner)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Ui;

    #[test]
    fn parts_outside_an_owner_are_plain_elements() {
        let mut ui = Ui::default();
        let (trigger, close, item) = ui.build(|b| {
            let trigger = b.dialog_trigger("Open", Rect::new(0.0, 0.0, 10.0, 10.0));
            let close = b.dialog_close("Close", Rect::new(20.0, 0.0, 30.0, 10.0));
            b.dialog_content(DialogContentProps::default(), |_| {});
            let item = b.select_item(SelectItem::new("A", "Alfa"));
            (trigger, close, item)
        });
        assert_eq!(ui.part(trigger), None);
        assert_eq!(ui.part(close), None);
        assert_eq!(ui.part(item), None);
        assert_eq!(ui.widget_count(), 0);
        // Activating them is a no-op.
        assert_eq!(ui.click_element(trigger), Some(trigger));
        assert_eq!(ui.document().overlay().slot_count(), 0);
    }

    #[test]
    fn nested_owners_bind_to_the_innermost_scope() {
        let mut ui = Ui::default();
        let (outer, inner, outer_trigger, inner_trigger) = ui.build(|b| {
            let mut inner = None;
            let mut inner_trigger = None;
            let mut outer_trigger = None;
            let outer = b.dialog(DialogProps::new(), |b| {
                inner = Some(b.dialog(DialogProps::new(), |b| {
                    inner_trigger = Some(b.dialog_trigger("inner", Rect::ZERO));
                }));
                outer_trigger = Some(b.dialog_trigger("outer", Rect::ZERO));
            });
            (outer, inner.unwrap(), outer_trigger.unwrap(), inner_trigger.unwrap())
        });
        assert_eq!(ui.part(outer_trigger), Some(Part::DialogTrigger(outer)));
        assert_eq!(ui.part(inner_trigger), Some(Part::DialogTrigger(inner)));
        assert_ne!(outer, inner);
    }

    #[test]
    fn select_value_shows_placeholder_then_value() {
        let mut ui = Ui::default();
        let (plain, seeded) = ui.build(|b| {
            let mut plain = None;
            let mut seeded = None;
            b.select(SelectProps::new(), Rect::ZERO, |b| {
                plain = Some(b.select_value("Pick one", Rect::ZERO));
            });
            b.select(SelectProps::new().default_value("B"), Rect::ZERO, |b| {
                seeded = Some(b.select_value("Pick one", Rect::ZERO));
            });
            (plain.unwrap(), seeded.unwrap())
        });
        let label = |id| ui.document().tree().get(id).unwrap().label.clone();
        assert_eq!(label(plain), "Pick one");
        assert_eq!(label(seeded), "B");
    }
}
