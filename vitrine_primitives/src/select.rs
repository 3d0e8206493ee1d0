// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select: a dropdown disclosure with single-value selection.
//!
//! Content is mounted under the Select root while open. Options are laid out as
//! rows in a scrolling viewport, with scroll indicators shown only while content is
//! hidden in their direction. A pointer press outside both the trigger and the
//! content closes the dropdown.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;
use kurbo::Rect;
use vitrine_tree::{Element, ElementFlags, ElementId, ElementKind};

use crate::builder::Builder;
use crate::controllable::ChangeCallback;
use crate::dialog::Template;
use crate::disclosure::DisclosureController;
use crate::dismiss::OutsideDismissal;
use crate::scroll::{ScrollAffordance, ScrollViewport};
use crate::selection::{SelectItem, SelectionRegistry};
use crate::types::{Part, WidgetId};
use crate::ui::{Ui, Widget};

/// Stacking level of open Select content, relative to the body.
pub const SELECT_Z: i32 = 50;

/// Root props of a Select.
///
/// ```rust
/// use vitrine_primitives::SelectProps;
///
/// let uncontrolled = SelectProps::new().default_value("B");
/// let controlled = SelectProps::new().value("").on_value_change(|v| println!("{v}"));
/// # let _ = (uncontrolled, controlled);
/// ```
#[derive(Default)]
pub struct SelectProps {
    value: Option<String>,
    default_value: Option<String>,
    on_value_change: Option<ChangeCallback<String>>,
    open: Option<bool>,
    on_open_change: Option<ChangeCallback<bool>>,
}

impl fmt::Debug for SelectProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectProps")
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("open", &self.open)
            .field("has_on_value_change", &self.on_value_change.is_some())
            .field("has_on_open_change", &self.on_open_change.is_some())
            .finish()
    }
}

impl SelectProps {
    /// Uncontrolled, closed, nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Control the value from the owner.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Initial value when uncontrolled.
    #[must_use]
    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Notified with every committed value.
    #[must_use]
    pub fn on_value_change(mut self, on_value_change: impl FnMut(String) + 'static) -> Self {
        self.on_value_change = Some(Box::new(on_value_change));
        self
    }

    /// Control the open state from the owner.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Notified with every requested open state.
    #[must_use]
    pub fn on_open_change(mut self, on_open_change: impl FnMut(bool) + 'static) -> Self {
        self.on_open_change = Some(Box::new(on_open_change));
        self
    }

    pub(crate) fn into_parts(self) -> (DisclosureController, SelectionRegistry) {
        let disclosure = DisclosureController::new(self.open, false, self.on_open_change);
        let mut selection = SelectionRegistry::new(self.value, self.default_value);
        if let Some(cb) = self.on_value_change {
            selection = selection.with_on_value_change(cb);
        }
        (disclosure, selection)
    }
}

/// Layout props of the Select content.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SelectContentProps {
    /// Height of an option or label row.
    pub item_extent: f64,
    /// Height of a separator row.
    pub separator_extent: f64,
    /// The viewport grows with its rows up to this height, then scrolls.
    pub max_viewport_extent: f64,
    /// Minimum content width.
    pub min_width: f64,
    /// Height of each scroll indicator.
    pub indicator_extent: f64,
}

impl Default for SelectContentProps {
    fn default() -> Self {
        Self {
            item_extent: 32.0,
            separator_extent: 9.0,
            max_viewport_extent: 384.0,
            min_width: 128.0,
            indicator_extent: 24.0,
        }
    }
}

pub(crate) struct SelectState {
    pub(crate) disclosure: DisclosureController,
    pub(crate) selection: SelectionRegistry,
    pub(crate) root: ElementId,
    pub(crate) trigger: Option<ElementId>,
    pub(crate) values: Vec<(ElementId, String)>,
    pub(crate) content: Option<(SelectContentProps, Template)>,
    pub(crate) mounted: Option<MountedSelect>,
    pub(crate) children: Vec<WidgetId>,
}

impl SelectState {
    pub(crate) fn new(props: SelectProps, root: ElementId) -> Self {
        let (disclosure, selection) = props.into_parts();
        Self {
            disclosure,
            selection,
            root,
            trigger: None,
            values: Vec::new(),
            content: None,
            mounted: None,
            children: Vec::new(),
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Row {
    pub(crate) element: ElementId,
    pub(crate) top: f64,
    pub(crate) extent: f64,
    pub(crate) pickable: bool,
}

pub(crate) struct MountedSelect {
    pub(crate) props: SelectContentProps,
    pub(crate) content: ElementId,
    viewport_element: ElementId,
    scroll_up: ElementId,
    scroll_down: ElementId,
    pub(crate) viewport: ScrollViewport,
    pub(crate) rows: Vec<Row>,
    pub(crate) items: HashMap<ElementId, SelectItem>,
    dismissal: Option<OutsideDismissal>,
    nested: Vec<WidgetId>,
}

impl MountedSelect {
    /// Add a row below the existing ones.
    pub(crate) fn push_row(&mut self, element: ElementId, extent: f64, pickable: bool) {
        let top = self.rows.last().map_or(0.0, |r| r.top + r.extent);
        self.rows.push(Row {
            element,
            top,
            extent,
            pickable,
        });
    }

    fn content_extent(&self) -> f64 {
        self.rows.last().map_or(0.0, |r| r.top + r.extent)
    }

    pub(crate) fn dismissal(&self) -> Option<&OutsideDismissal> {
        self.dismissal.as_ref()
    }

    pub(crate) fn affordance(&self) -> ScrollAffordance {
        self.viewport.affordance()
    }
}

impl Ui {
    /// Bring a Select's content and value display in line with its state.
    pub(crate) fn reconcile_select(&mut self, id: WidgetId) {
        let Some(Widget::Select(select)) = self.widgets.get_mut(&id) else {
            return;
        };
        let open = select.disclosure.open();
        if open && select.mounted.is_none() && select.content.is_some() {
            self.mount_select_content(id);
        } else if !open && let Some(mounted) = select.mounted.take() {
            self.unmount_select_content(id, mounted);
        }
        self.refresh_select_value(id);
    }

    fn refresh_select_value(&mut self, id: WidgetId) {
        let Some(Widget::Select(select)) = self.widgets.get(&id) else {
            return;
        };
        let value = select.selection.current_value();
        for (element, placeholder) in &select.values {
            let shown = if value.is_empty() { placeholder.as_str() } else { value };
            self.doc.tree.set_label(*element, shown);
        }
    }

    fn mount_select_content(&mut self, id: WidgetId) {
        let Some(Widget::Select(select)) = self.widgets.get_mut(&id) else {
            return;
        };
        let Some((props, template)) = select.content.clone() else {
            return;
        };
        let anchor_id = select.trigger.unwrap_or(select.root);
        let root = select.root;
        let anchor = self
            .doc
            .tree
            .get(anchor_id)
            .map_or(Rect::ZERO, |e| e.bounds);

        let tree = &mut self.doc.tree;
        let content = tree.insert(
            Some(root),
            Element::new(ElementKind::Generic, "select-content", Rect::ZERO).with_z_index(SELECT_Z),
        );
        let scroll_up = tree.insert(
            Some(content),
            Element::new(ElementKind::Generic, "select-scroll-up", Rect::ZERO)
                .with_z_index(SELECT_Z + 1),
        );
        let viewport_element = tree.insert(
            Some(content),
            Element::new(ElementKind::Generic, "select-viewport", Rect::ZERO),
        );
        let scroll_down = tree.insert(
            Some(content),
            Element::new(ElementKind::Generic, "select-scroll-down", Rect::ZERO)
                .with_z_index(SELECT_Z + 1),
        );
        self.parts.insert(content, Part::SelectContent(id));
        self.parts.insert(scroll_up, Part::SelectScrollUp(id));
        self.parts.insert(viewport_element, Part::SelectViewport(id));
        self.parts.insert(scroll_down, Part::SelectScrollDown(id));

        if let Some(Widget::Select(select)) = self.widgets.get_mut(&id) {
            select.mounted = Some(MountedSelect {
                props,
                content,
                viewport_element,
                scroll_up,
                scroll_down,
                viewport: ScrollViewport::new(0.0, 0.0),
                rows: Vec::new(),
                items: HashMap::new(),
                dismissal: None,
                nested: Vec::new(),
            });
        }

        let mut builder = Builder::new(self, viewport_element);
        builder.enter_select_content(id, |b| (*template)(b));
        let nested = builder.finish();

        let Some(Widget::Select(select)) = self.widgets.get_mut(&id) else {
            return;
        };
        let Some(mounted) = select.mounted.as_mut() else {
            return;
        };
        let extent = mounted.content_extent();
        let viewport_extent = extent.min(props.max_viewport_extent);
        let width = anchor.width().max(props.min_width);
        let bounds = Rect::new(anchor.x0, anchor.y1, anchor.x0 + width, anchor.y1 + viewport_extent);
        self.doc.tree.set_bounds(content, bounds);
        self.doc.tree.set_bounds(viewport_element, bounds);
        self.doc.tree.set_bounds(
            scroll_up,
            Rect::new(bounds.x0, bounds.y0, bounds.x1, bounds.y0 + props.indicator_extent),
        );
        self.doc.tree.set_bounds(
            scroll_down,
            Rect::new(bounds.x0, bounds.y1 - props.indicator_extent, bounds.x1, bounds.y1),
        );
        mounted.viewport = ScrollViewport::new(viewport_extent, extent);
        mounted.nested = nested;
        mounted.dismissal = Some(OutsideDismissal::activate(
            &mut self.doc.listeners,
            id,
            &[anchor_id, content],
        ));
        tracing::debug!(?id, rows = mounted.rows.len(), extent, "select content mounted");
        self.layout_select_rows(id);
    }

    pub(crate) fn unmount_select_content(&mut self, id: WidgetId, mounted: MountedSelect) {
        let MountedSelect {
            content,
            dismissal,
            nested,
            ..
        } = mounted;
        if let Some(dismissal) = dismissal {
            dismissal.deactivate(&mut self.doc.listeners);
        }
        for widget in nested {
            self.teardown_widget(widget);
        }
        self.doc.tree.remove(content);
        self.purge_stale();
        tracing::debug!(?id, "select content unmounted");
    }

    /// Position rows for the current scroll offset and refresh the indicators.
    pub(crate) fn layout_select_rows(&mut self, id: WidgetId) {
        let Some(Widget::Select(select)) = self.widgets.get(&id) else {
            return;
        };
        let Some(mounted) = select.mounted.as_ref() else {
            return;
        };
        let Some(bounds) = self.doc.tree.get(mounted.content).map(|e| e.bounds) else {
            return;
        };
        let offset = mounted.viewport.offset();
        for row in &mounted.rows {
            let y0 = bounds.y0 + row.top - offset;
            self.doc
                .tree
                .set_bounds(row.element, Rect::new(bounds.x0, y0, bounds.x1, y0 + row.extent));
            let visible = mounted.viewport.is_span_visible(row.top, row.top + row.extent);
            self.doc
                .set_flag(row.element, ElementFlags::PICKABLE, row.pickable && visible);
        }
        let affordance = mounted.affordance();
        self.doc
            .set_flag(mounted.scroll_up, ElementFlags::VISIBLE, affordance.can_scroll_up);
        self.doc
            .set_flag(mounted.scroll_down, ElementFlags::VISIBLE, affordance.can_scroll_down);
    }

    /// Scroll a Select's viewport. Returns `true` if it moved.
    pub(crate) fn scroll_select(&mut self, id: WidgetId, delta: f64) -> bool {
        let moved = match self.widgets.get_mut(&id) {
            Some(Widget::Select(select)) => select
                .mounted
                .as_mut()
                .is_some_and(|m| m.viewport.scroll_by(delta)),
            _ => false,
        };
        // Indicators are recomputed on every scroll event, moved or not.
        self.layout_select_rows(id);
        moved
    }

    /// Scroll a Select's viewport so `element`'s row is fully visible.
    pub(crate) fn reveal_select_row(&mut self, id: WidgetId, element: ElementId) {
        let moved = match self.widgets.get_mut(&id) {
            Some(Widget::Select(select)) => select.mounted.as_mut().is_some_and(|m| {
                let row = m.rows.iter().find(|r| r.element == element).copied();
                row.is_some_and(|r| m.viewport.scroll_into_view(r.top, r.top + r.extent))
            }),
            _ => false,
        };
        if moved {
            self.layout_select_rows(id);
        }
    }

    /// Commit the option bound to `element`.
    pub(crate) fn select_element(&mut self, id: WidgetId, element: ElementId) {
        let Some(Widget::Select(select)) = self.widgets.get_mut(&id) else {
            return;
        };
        let Some(item) = select
            .mounted
            .as_ref()
            .and_then(|m| m.items.get(&element))
            .cloned()
        else {
            return;
        };
        let SelectState {
            disclosure,
            selection,
            ..
        } = select;
        if selection.select_item(&item, disclosure) {
            self.mark_dirty(id);
        }
    }
}
