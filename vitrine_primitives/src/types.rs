// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget identifiers and part roles.

/// Identifier of a Dialog or Select instance hosted by a [`Ui`](crate::Ui).
///
/// Ids are never reused, so a torn-down widget's id stays stale forever.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) u32);

/// The two primitives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// A modal disclosure.
    Dialog,
    /// A dropdown selector.
    Select,
}

/// The role an element plays for the widget that created it.
///
/// Elements built outside any widget scope have no part.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    /// Structural root of a Dialog.
    DialogRoot(WidgetId),
    /// Opens the Dialog when activated.
    DialogTrigger(WidgetId),
    /// Closes the Dialog when activated.
    DialogClose(WidgetId),
    /// Full-viewport backdrop behind open content.
    DialogOverlay(WidgetId),
    /// The open content panel.
    DialogContent(WidgetId),
    /// Header block.
    DialogHeader(WidgetId),
    /// Footer block.
    DialogFooter(WidgetId),
    /// Title text.
    DialogTitle(WidgetId),
    /// Description text.
    DialogDescription(WidgetId),
    /// Structural root of a Select.
    SelectRoot(WidgetId),
    /// Toggles the Select when activated.
    SelectTrigger(WidgetId),
    /// Shows the current value or the placeholder.
    SelectValue(WidgetId),
    /// The open dropdown.
    SelectContent(WidgetId),
    /// The scrolling area holding the options.
    SelectViewport(WidgetId),
    /// One option.
    SelectItem(WidgetId),
    /// A group of options.
    SelectGroup(WidgetId),
    /// A group label.
    SelectLabel(WidgetId),
    /// A separator between options.
    SelectSeparator(WidgetId),
    /// Indicator shown while content is hidden above.
    SelectScrollUp(WidgetId),
    /// Indicator shown while content is hidden below.
    SelectScrollDown(WidgetId),
}

impl Part {
    /// The widget this part belongs to.
    pub fn owner(self) -> WidgetId {
        match self {
            Self::DialogRoot(w)
            | Self::DialogTrigger(w)
            | Self::DialogClose(w)
            | Self::DialogOverlay(w)
            | Self::DialogContent(w)
            | Self::DialogHeader(w)
            | Self::DialogFooter(w)
            | Self::DialogTitle(w)
            | Self::DialogDescription(w)
            | Self::SelectRoot(w)
            | Self::SelectTrigger(w)
            | Self::SelectValue(w)
            | Self::SelectContent(w)
            | Self::SelectViewport(w)
            | Self::SelectItem(w)
            | Self::SelectGroup(w)
            | Self::SelectLabel(w)
            | Self::SelectSeparator(w)
            | Self::SelectScrollUp(w)
            | Self::SelectScrollDown(w) => w,
        }
    }

    /// Whether activating this part does something.
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            Self::DialogTrigger(_)
                | Self::DialogClose(_)
                | Self::DialogOverlay(_)
                | Self::SelectTrigger(_)
                | Self::SelectItem(_)
        )
    }
}
