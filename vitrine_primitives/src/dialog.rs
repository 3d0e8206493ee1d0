// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dialog: a modal disclosure whose content is mounted into the overlay root.
//!
//! While open, the content
//! - is mounted into its own overlay slot, behind it a full-viewport backdrop,
//! - holds focus containment (Tab cycles inside, Escape requests close),
//! - holds a body scroll lock.
//!
//! All three are released in the same step that unmounts the content.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use kurbo::Rect;
use vitrine_tree::{Element, ElementId, ElementKind};

use crate::builder::Builder;
use crate::containment::FocusContainment;
use crate::controllable::ChangeCallback;
use crate::disclosure::DisclosureController;
use crate::document::ScrollLock;
use crate::layer::{Portal, PortalChange};
use crate::types::{Part, WidgetId};
use crate::ui::{Ui, Widget};

/// A content template, instantiated every time the owner opens.
pub(crate) type Template = Rc<dyn Fn(&mut Builder<'_>)>;

/// Root props of a Dialog.
///
/// ```rust
/// use vitrine_primitives::DialogProps;
///
/// let uncontrolled = DialogProps::new().default_open(true);
/// let controlled = DialogProps::new().open(false).on_open_change(|next| println!("{next}"));
/// # let _ = (uncontrolled, controlled);
/// ```
#[derive(Default)]
pub struct DialogProps {
    pub(crate) open: Option<bool>,
    pub(crate) default_open: bool,
    pub(crate) on_open_change: Option<ChangeCallback<bool>>,
}

impl fmt::Debug for DialogProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogProps")
            .field("open", &self.open)
            .field("default_open", &self.default_open)
            .field("has_on_open_change", &self.on_open_change.is_some())
            .finish()
    }
}

impl DialogProps {
    /// Uncontrolled and initially closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Control the open state from the owner.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Initial open state when uncontrolled.
    #[must_use]
    pub fn default_open(mut self, default_open: bool) -> Self {
        self.default_open = default_open;
        self
    }

    /// Notified with every requested open state.
    #[must_use]
    pub fn on_open_change(mut self, on_open_change: impl FnMut(bool) + 'static) -> Self {
        self.on_open_change = Some(Box::new(on_open_change));
        self
    }

    pub(crate) fn into_controller(self) -> DisclosureController {
        DisclosureController::new(self.open, self.default_open, self.on_open_change)
    }
}

/// Props of the Dialog content panel.
#[derive(Clone, Debug, PartialEq)]
pub struct DialogContentProps {
    /// Panel bounds.
    pub bounds: Rect,
    /// Append a close button after the content.
    pub show_close_button: bool,
    /// Accessible name of the built-in close button.
    pub close_label: String,
}

impl Default for DialogContentProps {
    fn default() -> Self {
        Self {
            bounds: Rect::new(384.0, 200.0, 896.0, 600.0),
            show_close_button: true,
            close_label: String::from("Close"),
        }
    }
}

/// Side of the built-in close button, inset from the panel's top-right corner.
const CLOSE_BUTTON_EXTENT: f64 = 24.0;
const CLOSE_BUTTON_INSET: f64 = 16.0;

pub(crate) struct DialogState {
    pub(crate) disclosure: DisclosureController,
    pub(crate) root: ElementId,
    pub(crate) content: Option<(DialogContentProps, Template)>,
    pub(crate) portal: Portal,
    pub(crate) mounted: Option<MountedDialog>,
    pub(crate) children: Vec<WidgetId>,
}

impl DialogState {
    pub(crate) fn new(disclosure: DisclosureController, root: ElementId) -> Self {
        Self {
            disclosure,
            root,
            content: None,
            portal: Portal::new(),
            mounted: None,
            children: Vec::new(),
        }
    }
}

pub(crate) struct MountedDialog {
    pub(crate) panel: ElementId,
    pub(crate) containment: FocusContainment,
    lock: ScrollLock,
    nested: Vec<WidgetId>,
}

impl Ui {
    /// Bring a Dialog's mounted content in line with its open state.
    pub(crate) fn reconcile_dialog(&mut self, id: WidgetId) {
        let Some(Widget::Dialog(dialog)) = self.widgets.get_mut(&id) else {
            return;
        };
        if dialog.content.is_none() {
            return;
        }
        let open = dialog.disclosure.open();
        if !open && let Some(mounted) = dialog.mounted.take() {
            self.release_dialog_content(id, mounted);
        }
        let Some(Widget::Dialog(dialog)) = self.widgets.get_mut(&id) else {
            return;
        };
        match dialog
            .portal
            .sync(open, &mut self.doc.overlay, &mut self.doc.tree, "dialog-portal")
        {
            PortalChange::Mounted(slot) => self.mount_dialog_content(id, slot),
            PortalChange::Unmounted => self.purge_stale(),
            PortalChange::Deferred => {
                tracing::debug!(?id, "dialog content deferred until the surface is ready");
            }
            PortalChange::Unchanged => {}
        }
    }

    fn mount_dialog_content(&mut self, id: WidgetId, slot: ElementId) {
        let Some(Widget::Dialog(dialog)) = self.widgets.get(&id) else {
            return;
        };
        let Some((props, template)) = dialog.content.clone() else {
            return;
        };

        let viewport = self.doc.config().viewport;
        let backdrop = self.doc.tree.insert(
            Some(slot),
            Element::new(ElementKind::Generic, "dialog-overlay", viewport),
        );
        self.parts.insert(backdrop, Part::DialogOverlay(id));
        let panel = self.doc.tree.insert(
            Some(slot),
            Element::new(ElementKind::Generic, "dialog-content", props.bounds),
        );
        self.parts.insert(panel, Part::DialogContent(id));

        let mut builder = Builder::new(self, panel);
        builder.enter_dialog(id, |b| {
            (*template)(b);
            if props.show_close_button {
                let b0 = props.bounds;
                let close = Rect::new(
                    b0.x1 - CLOSE_BUTTON_INSET - CLOSE_BUTTON_EXTENT,
                    b0.y0 + CLOSE_BUTTON_INSET,
                    b0.x1 - CLOSE_BUTTON_INSET,
                    b0.y0 + CLOSE_BUTTON_INSET + CLOSE_BUTTON_EXTENT,
                );
                b.dialog_close(props.close_label.as_str(), close);
            }
        });
        let nested = builder.finish();

        let (containment, initial) =
            FocusContainment::activate(&self.doc.tree, panel, &mut self.doc.listeners, id);
        if let Some(first) = initial {
            self.move_focus(first);
        }
        let lock = self.doc.lock_scroll();
        tracing::debug!(?id, nested = nested.len(), "dialog content mounted");

        if let Some(Widget::Dialog(dialog)) = self.widgets.get_mut(&id) {
            dialog.mounted = Some(MountedDialog {
                panel,
                containment,
                lock,
                nested,
            });
        }
    }

    /// Release everything an open Dialog holds besides its slot.
    pub(crate) fn release_dialog_content(&mut self, id: WidgetId, mounted: MountedDialog) {
        let MountedDialog {
            containment,
            lock,
            nested,
            ..
        } = mounted;
        containment.deactivate(&mut self.doc.listeners);
        self.doc.unlock_scroll(lock);
        for widget in nested {
            self.teardown_widget(widget);
        }
        tracing::debug!(?id, "dialog content released");
    }
}
