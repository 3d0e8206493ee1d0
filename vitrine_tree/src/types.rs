// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: identifiers, flags, kinds and element data.

use alloc::string::String;
use kurbo::Rect;

/// Identifier for an element in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element flags controlling visibility, picking and interactivity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is visible. Hidden elements hide their whole subtree.
        const VISIBLE  = 0b0000_0001;
        /// Element is pickable (participates in hit testing).
        const PICKABLE = 0b0000_0010;
        /// Element is disabled: it cannot take focus.
        const DISABLED = 0b0000_0100;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// What an element is, as far as focus and activation are concerned.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A plain container.
    #[default]
    Generic,
    /// Inline text.
    Text,
    /// An image.
    Image,
    /// A button.
    Button,
    /// A hyperlink.
    Link,
    /// A single-line text input.
    Input,
    /// A native select box.
    SelectBox,
    /// A multi-line text input.
    TextArea,
}

impl ElementKind {
    /// Whether elements of this kind take focus without an explicit tab index.
    pub const fn is_natively_focusable(self) -> bool {
        matches!(
            self,
            Self::Button | Self::Link | Self::Input | Self::SelectBox | Self::TextArea
        )
    }
}

/// Element data stored in the tree.
#[derive(Clone, Debug, Default)]
pub struct Element {
    /// Kind of element.
    pub kind: ElementKind,
    /// Human-readable label (text content or accessible name).
    pub label: String,
    /// World-space bounds used for hit testing.
    pub bounds: Rect,
    /// Stacking level. Higher is on top; inherited by descendants.
    pub z_index: i32,
    /// Explicit tab index. `Some(-1)` removes a non-native element from tab order.
    pub tab_index: Option<i32>,
    /// Visibility, picking and disabled flags.
    pub flags: ElementFlags,
}

impl Element {
    /// Create an element with default flags and no tab index.
    pub fn new(kind: ElementKind, label: impl Into<String>, bounds: Rect) -> Self {
        Self {
            kind,
            label: label.into(),
            bounds,
            ..Self::default()
        }
    }

    /// Set the stacking level.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set an explicit tab index.
    #[must_use]
    pub fn with_tab_index(mut self, tab_index: i32) -> Self {
        self.tab_index = Some(tab_index);
        self
    }

    /// Replace the flags.
    #[must_use]
    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark the element disabled (or enabled).
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.flags.set(ElementFlags::DISABLED, disabled);
        self
    }

    /// Whether this element, on its own, is a tab stop.
    ///
    /// Native controls are tab stops; other elements are tab stops when they carry
    /// a tab index other than `-1`. Disabled and hidden elements never are.
    pub fn is_focusable(&self) -> bool {
        if !self.flags.contains(ElementFlags::VISIBLE) || self.flags.contains(ElementFlags::DISABLED)
        {
            return false;
        }
        self.kind.is_natively_focusable() || self.tab_index.is_some_and(|t| t != -1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focusability_follows_kind_and_tab_index() {
        let r = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(Element::new(ElementKind::Button, "b", r).is_focusable());
        assert!(!Element::new(ElementKind::Generic, "div", r).is_focusable());
        assert!(Element::new(ElementKind::Generic, "div", r).with_tab_index(0).is_focusable());
        assert!(!Element::new(ElementKind::Generic, "div", r).with_tab_index(-1).is_focusable());
        assert!(!Element::new(ElementKind::Button, "b", r).disabled(true).is_focusable());
        assert!(
            !Element::new(ElementKind::Link, "a", r)
                .with_flags(ElementFlags::PICKABLE)
                .is_focusable()
        );
    }
}
