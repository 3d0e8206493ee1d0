// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click recognition from pointer press/release pairs.
//!
//! A press records the element under the pointer. The matching release completes a
//! click on that element when it lands on the same element, or when it lands
//! elsewhere but stays inside the [`ClickTolerance`]. The tolerance exists because
//! parts move between press and release: a select row can scroll under the pointer,
//! or a dialog can mount over the spot that was pressed.
//!
//! ```
//! use kurbo::Point;
//! use vitrine_event_state::click::{ClickOutcome, ClickTracker};
//!
//! let mut clicks: ClickTracker<&str> = ClickTracker::new();
//! clicks.press(None, "trigger", Point::new(10.0, 20.0), 1000);
//! assert_eq!(
//!     clicks.release(None, Some(&"trigger"), Point::new(300.0, 20.0), 4000),
//!     ClickOutcome::Clicked("trigger")
//! );
//!
//! // Released over another element, too far away.
//! clicks.press(None, "trigger", Point::new(10.0, 20.0), 5000);
//! assert_eq!(
//!     clicks.release(None, Some(&"backdrop"), Point::new(60.0, 20.0), 5010),
//!     ClickOutcome::Missed(Some("trigger"))
//! );
//! ```

use alloc::collections::BTreeMap;
use core::num::NonZeroU64;
use kurbo::Point;

/// Identifier of a pointer, for hosts that track several at once.
pub type PointerId = NonZeroU64;

/// The pointer used when a host does not say which one moved.
const PRIMARY: PointerId = NonZeroU64::MIN;

/// How far a release may stray from its press and still complete a click.
///
/// Both limits apply only when the release lands on a different element than the
/// press. `None` lifts a limit; lifting both means a stray release never clicks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClickTolerance {
    /// Largest pointer travel, in world units.
    pub max_distance: Option<f64>,
    /// Largest press duration, in milliseconds.
    pub max_elapsed: Option<u64>,
}

impl Default for ClickTolerance {
    fn default() -> Self {
        Self {
            max_distance: Some(5.0),
            max_elapsed: Some(100),
        }
    }
}

impl ClickTolerance {
    /// A tolerance that never accepts a stray release.
    pub const STRICT: Self = Self {
        max_distance: None,
        max_elapsed: None,
    };

    fn accepts(&self, travel: f64, elapsed: u64) -> bool {
        if self.max_distance.is_none() && self.max_elapsed.is_none() {
            return false;
        }
        self.max_distance.is_none_or(|limit| travel <= limit)
            && self.max_elapsed.is_none_or(|limit| elapsed <= limit)
    }
}

#[derive(Clone, Debug)]
struct Press<K> {
    target: K,
    at: Point,
    time: u64,
}

/// What a release amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome<K> {
    /// The release completed a click on the pressed element.
    Clicked(K),
    /// No click. Carries the pressed element, if the pointer had a press.
    Missed(Option<K>),
}

/// Tracks open presses per pointer and turns releases into clicks.
#[derive(Clone, Debug)]
pub struct ClickTracker<K> {
    presses: BTreeMap<PointerId, Press<K>>,
    tolerance: ClickTolerance,
}

impl<K> Default for ClickTracker<K> {
    fn default() -> Self {
        Self::with_tolerance(ClickTolerance::default())
    }
}

impl<K> ClickTracker<K> {
    /// A tracker with the default tolerance (5 units, 100 ms).
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker with a custom tolerance.
    pub fn with_tolerance(tolerance: ClickTolerance) -> Self {
        Self {
            presses: BTreeMap::new(),
            tolerance,
        }
    }

    /// The tolerance in effect.
    pub fn tolerance(&self) -> ClickTolerance {
        self.tolerance
    }

    /// Record a press on `target`. A second press of the same pointer replaces the first.
    pub fn press(&mut self, pointer: Option<PointerId>, target: K, at: Point, time: u64) {
        self.presses
            .insert(pointer.unwrap_or(PRIMARY), Press { target, at, time });
    }

    /// Whether `pointer` is currently held down.
    pub fn is_pressed(&self, pointer: Option<PointerId>) -> bool {
        self.presses.contains_key(&pointer.unwrap_or(PRIMARY))
    }

    /// Forget the press of `pointer` without producing a click.
    pub fn abandon(&mut self, pointer: Option<PointerId>) -> bool {
        self.presses.remove(&pointer.unwrap_or(PRIMARY)).is_some()
    }

    /// Forget every press whose target fails `keep`.
    ///
    /// Hosts call this after removing elements, so releasing over the spot where a
    /// removed element used to be cannot click it.
    pub fn forget_where(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.presses.retain(|_, press| keep(&press.target));
    }
}

impl<K: PartialEq> ClickTracker<K> {
    /// Release `pointer` over `over` (or over nothing).
    pub fn release(
        &mut self,
        pointer: Option<PointerId>,
        over: Option<&K>,
        at: Point,
        time: u64,
    ) -> ClickOutcome<K> {
        let Some(press) = self.presses.remove(&pointer.unwrap_or(PRIMARY)) else {
            return ClickOutcome::Missed(None);
        };
        let stray = over != Some(&press.target);
        if stray
            && !self
                .tolerance
                .accepts(press.at.distance(at), time.saturating_sub(press.time))
        {
            return ClickOutcome::Missed(Some(press.target));
        }
        ClickOutcome::Clicked(press.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Point = Point::new(100.0, 100.0);

    #[test]
    fn release_on_the_pressed_element_clicks_regardless_of_travel() {
        let mut clicks = ClickTracker::new();
        clicks.press(None, 1_u32, ORIGIN, 0);
        assert_eq!(
            clicks.release(None, Some(&1), Point::new(900.0, 900.0), 60_000),
            ClickOutcome::Clicked(1)
        );
        assert!(!clicks.is_pressed(None));
    }

    #[test]
    fn stray_release_within_tolerance_clicks() {
        let mut clicks = ClickTracker::new();
        clicks.press(None, 1_u32, ORIGIN, 0);
        assert_eq!(
            clicks.release(None, Some(&2), Point::new(103.0, 104.0), 100),
            ClickOutcome::Clicked(1)
        );

        clicks.press(None, 1, ORIGIN, 0);
        assert_eq!(
            clicks.release(None, None, Point::new(103.0, 104.0), 50),
            ClickOutcome::Clicked(1)
        );
    }

    #[test]
    fn stray_release_outside_tolerance_misses() {
        let mut clicks = ClickTracker::new();
        clicks.press(None, 1_u32, ORIGIN, 0);
        assert_eq!(
            clicks.release(None, Some(&2), Point::new(110.0, 100.0), 10),
            ClickOutcome::Missed(Some(1))
        );

        clicks.press(None, 1, ORIGIN, 0);
        assert_eq!(
            clicks.release(None, Some(&2), ORIGIN, 101),
            ClickOutcome::Missed(Some(1))
        );
    }

    #[test]
    fn strict_tolerance_rejects_every_stray_release() {
        let mut clicks = ClickTracker::with_tolerance(ClickTolerance::STRICT);
        clicks.press(None, 1_u32, ORIGIN, 0);
        assert_eq!(
            clicks.release(None, Some(&2), ORIGIN, 0),
            ClickOutcome::Missed(Some(1))
        );
    }

    #[test]
    fn lifted_distance_limit_keeps_the_time_limit() {
        let tolerance = ClickTolerance {
            max_distance: None,
            max_elapsed: Some(100),
        };
        let mut clicks = ClickTracker::with_tolerance(tolerance);
        clicks.press(None, 1_u32, ORIGIN, 0);
        assert_eq!(
            clicks.release(None, Some(&2), Point::new(500.0, 500.0), 100),
            ClickOutcome::Clicked(1)
        );
    }

    #[test]
    fn release_without_press_misses() {
        let mut clicks: ClickTracker<u32> = ClickTracker::new();
        assert_eq!(
            clicks.release(None, Some(&1), ORIGIN, 0),
            ClickOutcome::Missed(None)
        );
    }

    #[test]
    fn pointers_are_tracked_separately() {
        let mouse = PointerId::new(1).unwrap();
        let touch = PointerId::new(7).unwrap();
        let mut clicks = ClickTracker::new();
        clicks.press(Some(mouse), 1_u32, ORIGIN, 0);
        clicks.press(Some(touch), 2, Point::new(300.0, 300.0), 5);

        assert_eq!(
            clicks.release(Some(touch), Some(&2), Point::new(300.0, 300.0), 20),
            ClickOutcome::Clicked(2)
        );
        assert!(clicks.is_pressed(Some(mouse)));
        assert!(clicks.abandon(Some(mouse)));
        assert!(!clicks.abandon(Some(mouse)));
    }

    #[test]
    fn forgotten_targets_never_click() {
        let mut clicks = ClickTracker::new();
        clicks.press(None, 1_u32, ORIGIN, 0);
        clicks.forget_where(|target| *target != 1);
        assert_eq!(
            clicks.release(None, Some(&1), ORIGIN, 0),
            ClickOutcome::Missed(None)
        );
    }
}
