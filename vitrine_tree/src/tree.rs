// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The element arena: slots, links between elements, and the queries hosts run.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::types::{Element, ElementFlags, ElementId};

/// Top-level element tree.
///
/// Roots are kept in insertion order; document order visits each root's subtree
/// in turn, parents before children, children in insertion order.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use vitrine_tree::{Element, ElementKind, Tree};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(None, Element::new(ElementKind::Generic, "root", Rect::new(0.0, 0.0, 100.0, 100.0)));
/// let a = tree.insert(Some(root), Element::new(ElementKind::Button, "a", Rect::ZERO));
/// let b = tree.insert(Some(root), Element::new(ElementKind::Button, "b", Rect::ZERO));
///
/// assert_eq!(tree.document_order(), vec![root, a, b]);
/// tree.remove(a);
/// assert!(!tree.is_alive(a));
/// assert_eq!(tree.children_of(root), &[b]);
/// ```
#[derive(Default)]
pub struct Tree {
    slots: Vec<Option<Node>>,
    /// Generation last handed out per slot. Survives removal so stale ids stay stale.
    issued: Vec<u32>,
    vacant: Vec<usize>,
    roots: Vec<ElementId>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tree")
            .field("live", &self.len())
            .field("slots", &self.slots.len())
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

/// The topmost element under a point.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched element.
    pub element: ElementId,
    /// Path from root to element (inclusive).
    pub path: Vec<ElementId>,
}

/// Filters applied during hit testing.
#[derive(Clone, Copy, Debug)]
pub struct QueryFilter {
    /// Only elements containing all these flags are included.
    pub required_flags: ElementFlags,
    /// Elements containing any of these flags are excluded.
    pub excluded_flags: ElementFlags,
}

impl Default for QueryFilter {
    fn default() -> Self {
        Self {
            required_flags: ElementFlags::empty(),
            excluded_flags: ElementFlags::empty(),
        }
    }
}

impl QueryFilter {
    /// Create a new empty filter (includes all elements).
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter to only visible elements.
    pub fn visible(mut self) -> Self {
        self.required_flags |= ElementFlags::VISIBLE;
        self
    }

    /// Filter to only pickable elements.
    pub fn pickable(mut self) -> Self {
        self.required_flags |= ElementFlags::PICKABLE;
        self
    }

    /// Filter out disabled elements.
    pub fn enabled(mut self) -> Self {
        self.excluded_flags |= ElementFlags::DISABLED;
        self
    }

    /// Check if an element's flags satisfy this filter.
    pub fn matches(&self, flags: ElementFlags) -> bool {
        flags.contains(self.required_flags) && !flags.intersects(self.excluded_flags)
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    element: Element,
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new element as the last child of `parent` (or as the last root if `None`).
    ///
    /// A stale `parent` inserts the element as a root.
    pub fn insert(&mut self, parent: Option<ElementId>, element: Element) -> ElementId {
        let id = self.allocate(element);
        match parent {
            Some(p) if self.is_alive(p) => self.link_parent(id, p),
            _ => self.roots.push(id),
        }
        id
    }

    fn allocate(&mut self, element: Element) -> ElementId {
        let slot = match self.vacant.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(None);
                self.issued.push(0);
                self.slots.len() - 1
            }
        };
        let generation = self.issued[slot].saturating_add(1);
        self.issued[slot] = generation;
        self.slots[slot] = Some(Node {
            generation,
            parent: None,
            children: Vec::new(),
            element,
        });
        #[allow(
            clippy::cast_possible_truncation,
            reason = "element slots are addressed with 32 bits"
        )]
        ElementId::new(slot as u32, generation)
    }

    /// Remove an element and its subtree.
    ///
    /// Returns the number of elements removed (zero for a stale id).
    pub fn remove(&mut self, id: ElementId) -> usize {
        if !self.is_alive(id) {
            return 0;
        }
        match self.node(id).parent {
            Some(parent) => self.unlink_parent(id, parent),
            None => self.roots.retain(|r| *r != id),
        }
        self.remove_detached(id)
    }

    fn remove_detached(&mut self, id: ElementId) -> usize {
        let children = core::mem::take(&mut self.node_mut(id).children);
        let mut removed = 1;
        for child in children {
            removed += self.remove_detached(child);
        }
        self.slots[id.idx()] = None;
        self.vacant.push(id.idx());
        removed
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.slots
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|n| n.is_some()).count()
    }

    /// Returns `true` if the tree has no live elements.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Element data for a live id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.node_opt(id).map(|n| &n.element)
    }

    /// Mutable element data for a live id.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.node_opt_mut(id).map(|n| &mut n.element)
    }

    /// Update bounds.
    pub fn set_bounds(&mut self, id: ElementId, bounds: Rect) {
        if let Some(e) = self.get_mut(id) {
            e.bounds = bounds;
        }
    }

    /// Update flags.
    pub fn set_flags(&mut self, id: ElementId, flags: ElementFlags) {
        if let Some(e) = self.get_mut(id) {
            e.flags = flags;
        }
    }

    /// Update the label.
    pub fn set_label(&mut self, id: ElementId, label: &str) {
        if let Some(e) = self.get_mut(id)
            && e.label != label
        {
            e.label.clear();
            e.label.push_str(label);
        }
    }

    /// Roots in document order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Returns the parent of an element if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of an element, or an empty slice if the id is stale.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.node_opt(id).map_or(&[], |n| &n.children)
    }

    /// Returns `true` if `node` is `ancestor` or one of its descendants.
    ///
    /// Stale ids are contained in nothing.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(node) {
            return false;
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    /// Path from the root to `id` (inclusive), or empty for a stale id.
    pub fn path_to(&self, id: ElementId) -> Vec<ElementId> {
        let mut path = Vec::new();
        let mut current = self.is_alive(id).then_some(id);
        while let Some(node) = current {
            path.push(node);
            current = self.parent_of(node);
        }
        path.reverse();
        path
    }

    /// Whether the element and all of its ancestors are visible.
    pub fn is_rendered(&self, id: ElementId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let mut current = Some(id);
        while let Some(node) = current {
            if !self.node(node).element.flags.contains(ElementFlags::VISIBLE) {
                return false;
            }
            current = self.parent_of(node);
        }
        true
    }

    /// All live elements in document order.
    pub fn document_order(&self) -> Vec<ElementId> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.collect_subtree(root, &mut out);
        }
        out
    }

    /// `root` and its descendants in document order, or empty for a stale id.
    pub fn subtree(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if self.is_alive(root) {
            self.collect_subtree(root, &mut out);
        }
        out
    }

    /// Tab stops within `root` (inclusive) in document order.
    ///
    /// An element qualifies when [`Element::is_focusable`] holds and every ancestor
    /// is visible.
    pub fn focusables_in(&self, root: ElementId) -> Vec<ElementId> {
        self.subtree(root)
            .into_iter()
            .filter(|&id| self.node(id).element.is_focusable() && self.is_rendered(id))
            .collect()
    }

    /// Tab stops across the whole document, in document order.
    pub fn focusables(&self) -> Vec<ElementId> {
        self.document_order()
            .into_iter()
            .filter(|&id| self.node(id).element.is_focusable() && self.is_rendered(id))
            .collect()
    }

    /// Hit test a world-space point and return the topmost element and its path.
    ///
    /// - Elements must satisfy the [`QueryFilter`], be rendered, and contain the
    ///   point within their bounds.
    /// - Among candidates, the higher inherited stacking level wins; if that ties,
    ///   deeper elements win; if that also ties, the later one in document order wins.
    pub fn hit_test_point(&self, point: Point, filter: QueryFilter) -> Option<Hit> {
        let mut best: Option<(ElementId, i32, usize)> = None;

        for id in self.document_order() {
            let element = &self.node(id).element;
            if !filter.matches(element.flags) || !element.bounds.contains(point) {
                continue;
            }
            if !self.is_rendered(id) {
                continue;
            }
            let (z, depth) = self.stacking(id);
            // Document order is visited front to back, so ties go to the later element.
            let on_top = best.is_none_or(|(_, z_best, depth_best)| {
                z > z_best || (z == z_best && depth >= depth_best)
            });
            if on_top {
                best = Some((id, z, depth));
            }
        }

        best.map(|(element, _, _)| Hit {
            element,
            path: self.path_to(element),
        })
    }

    // --- internals ---

    /// Inherited stacking level and depth of a live element.
    fn stacking(&self, id: ElementId) -> (i32, usize) {
        let mut z = i32::MIN;
        let mut depth = 0;
        let mut current = Some(id);
        while let Some(node) = current {
            let n = self.node(node);
            z = z.max(n.element.z_index);
            depth += 1;
            current = n.parent;
        }
        (z, depth)
    }

    fn collect_subtree(&self, root: ElementId, out: &mut Vec<ElementId>) {
        let mut stack = alloc::vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            // Reverse so children are visited in insertion order.
            for &child in self.node(id).children.iter().rev() {
                stack.push(child);
            }
        }
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: ElementId) -> &Node {
        self.slots[id.idx()].as_ref().expect("dangling ElementId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.slots[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn node_opt(&self, id: ElementId) -> Option<&Node> {
        let n = self.slots.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.slots.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
