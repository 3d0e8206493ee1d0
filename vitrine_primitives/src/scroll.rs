// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll state for Select content.

/// Which scroll indicators a viewport should show.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrollAffordance {
    /// Content is hidden above the viewport.
    pub can_scroll_up: bool,
    /// Content is hidden below the viewport.
    pub can_scroll_down: bool,
}

impl ScrollAffordance {
    /// Derive the flags from a scroll position.
    pub fn compute(offset: f64, content_extent: f64, viewport_extent: f64) -> Self {
        Self {
            can_scroll_up: offset > 0.0,
            can_scroll_down: offset < content_extent - viewport_extent,
        }
    }
}

/// A one-dimensional scroll viewport over content of known extent.
///
/// The offset is kept within `[0, max(0, content_extent - viewport_extent)]`.
///
/// ```rust
/// use vitrine_primitives::scroll::ScrollViewport;
///
/// let mut viewport = ScrollViewport::new(100.0, 250.0);
/// assert!(viewport.affordance().can_scroll_down);
/// viewport.scroll_by(1000.0);
/// assert_eq!(viewport.offset(), 150.0);
/// assert!(!viewport.affordance().can_scroll_down);
/// assert!(viewport.affordance().can_scroll_up);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollViewport {
    offset: f64,
    viewport_extent: f64,
    content_extent: f64,
}

impl ScrollViewport {
    /// A viewport scrolled to the top.
    #[must_use]
    pub fn new(viewport_extent: f64, content_extent: f64) -> Self {
        Self {
            offset: 0.0,
            viewport_extent: viewport_extent.max(0.0),
            content_extent: content_extent.max(0.0),
        }
    }

    /// Current offset from the top of the content.
    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    /// Visible extent.
    #[must_use]
    pub const fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Total content extent.
    #[must_use]
    pub const fn content_extent(&self) -> f64 {
        self.content_extent
    }

    /// Largest reachable offset.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Set the offset, clamped. Returns `true` if it moved.
    pub fn set_offset(&mut self, offset: f64) -> bool {
        let clamped = if offset.is_nan() {
            0.0
        } else {
            offset.clamp(0.0, self.max_offset())
        };
        let moved = clamped != self.offset;
        self.offset = clamped;
        moved
    }

    /// Scroll by `delta`, clamped. Returns `true` if the offset moved.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        self.set_offset(self.offset + delta)
    }

    /// Scroll the least amount that makes `[start, end)` fully visible.
    ///
    /// Spans taller than the viewport align their start with the top.
    pub fn scroll_into_view(&mut self, start: f64, end: f64) -> bool {
        if start < self.offset || end - start > self.viewport_extent {
            self.set_offset(start)
        } else if end > self.offset + self.viewport_extent {
            self.set_offset(end - self.viewport_extent)
        } else {
            false
        }
    }

    /// Whether any part of `[start, end)` is inside the viewport.
    #[must_use]
    pub fn is_span_visible(&self, start: f64, end: f64) -> bool {
        end > self.offset && start < self.offset + self.viewport_extent
    }

    /// Indicator flags for the current offset.
    #[must_use]
    pub fn affordance(&self) -> ScrollAffordance {
        ScrollAffordance::compute(self.offset, self.content_extent, self.viewport_extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affordance_follows_offset() {
        assert_eq!(
            ScrollAffordance::compute(0.0, 300.0, 100.0),
            ScrollAffordance {
                can_scroll_up: false,
                can_scroll_down: true
            }
        );
        assert_eq!(
            ScrollAffordance::compute(50.0, 300.0, 100.0),
            ScrollAffordance {
                can_scroll_up: true,
                can_scroll_down: true
            }
        );
        assert_eq!(
            ScrollAffordance::compute(200.0, 300.0, 100.0),
            ScrollAffordance {
                can_scroll_up: true,
                can_scroll_down: false
            }
        );
    }

    #[test]
    fn content_that_fits_never_scrolls() {
        let mut viewport = ScrollViewport::new(100.0, 60.0);
        assert_eq!(viewport.affordance(), ScrollAffordance::default());
        assert!(!viewport.scroll_by(10.0));
        assert_eq!(viewport.offset(), 0.0);
        assert_eq!(viewport.max_offset(), 0.0);
    }

    #[test]
    fn offsets_are_clamped() {
        let mut viewport = ScrollViewport::new(100.0, 250.0);
        assert!(!viewport.scroll_by(-20.0));
        assert!(viewport.set_offset(400.0));
        assert_eq!(viewport.offset(), 150.0);
        assert!(viewport.set_offset(f64::NAN));
        assert_eq!(viewport.offset(), 0.0);
    }

    #[test]
    fn scroll_into_view_moves_the_least() {
        let mut viewport = ScrollViewport::new(100.0, 400.0);
        // Already visible.
        assert!(!viewport.scroll_into_view(10.0, 40.0));
        // Below: align the end with the bottom edge.
        assert!(viewport.scroll_into_view(150.0, 180.0));
        assert_eq!(viewport.offset(), 80.0);
        // Above: align the start with the top edge.
        assert!(viewport.scroll_into_view(20.0, 50.0));
        assert_eq!(viewport.offset(), 20.0);
        assert!(viewport.is_span_visible(20.0, 50.0));
        assert!(!viewport.is_span_visible(200.0, 230.0));
    }
}
