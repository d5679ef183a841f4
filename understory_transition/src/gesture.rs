// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge-swipe recognizer ownership and interactive swipe tracking.
//!
//! Two recognizers compete for the leading-edge swipe: the host's default
//! back gesture and a custom one that drives interactive shared pops. The custom
//! recognizer is an owned resource. [`GestureOwner`] is its only writer and is
//! itself owned by the [`Coordinator`](crate::Coordinator); nothing else may
//! arm or disarm it while a session is active.
//!
//! [`EdgeSwipe`] tracks one in-flight swipe: where it started, how far across the
//! container it has travelled, and whether releasing it should complete or cancel
//! the pop. Its progress is published through a [`SwipeProgress`] handle that the
//! animation runtime can hold on to without borrowing the coordinator.

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;
use core::num::NonZeroU64;

use kurbo::{Point, Vec2};

use crate::config::TransitionConfig;

/// Which recognizer currently owns the leading-edge swipe.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RecognizerState {
    /// The host's default back gesture owns the swipe.
    #[default]
    Disarmed,
    /// The custom recognizer is armed because the top screen arrived with a
    /// shared push; swiping reverses that push interactively.
    ArmedForPush,
    /// The custom recognizer is driving an interactive shared pop in flight.
    ArmedForPop,
}

impl RecognizerState {
    /// Whether the custom recognizer is installed.
    pub const fn is_armed(self) -> bool {
        !matches!(self, Self::Disarmed)
    }
}

/// Platform side of the custom edge recognizer.
///
/// Both calls must be idempotent; [`GestureOwner`] only issues them when the
/// armed/disarmed state actually flips, but hosts should not rely on that.
pub trait EdgeGestureHost {
    /// Install the custom recognizer and suspend the default back gesture.
    fn arm(&mut self);
    /// Remove the custom recognizer and restore the default back gesture.
    fn disarm(&mut self);
}

impl<G: EdgeGestureHost + ?Sized> EdgeGestureHost for &mut G {
    fn arm(&mut self) {
        (**self).arm();
    }

    fn disarm(&mut self) {
        (**self).disarm();
    }
}

/// Host that ignores arming requests, for setups without a custom recognizer.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoGesture;

impl EdgeGestureHost for NoGesture {
    fn arm(&mut self) {}
    fn disarm(&mut self) {}
}

/// Single writer of the custom recognizer's state.
#[derive(Debug)]
pub struct GestureOwner<G> {
    host: G,
    state: RecognizerState,
}

impl<G: EdgeGestureHost> GestureOwner<G> {
    /// Take ownership of `host`, assuming the custom recognizer starts disarmed.
    pub fn new(host: G) -> Self {
        Self {
            host,
            state: RecognizerState::Disarmed,
        }
    }

    /// Current recognizer state.
    pub fn state(&self) -> RecognizerState {
        self.state
    }

    /// Read-only access to the platform host.
    pub fn host(&self) -> &G {
        &self.host
    }

    /// Move to `next`, telling the host only when armed-ness changes.
    pub(crate) fn set(&mut self, next: RecognizerState) {
        let prev = self.state;
        if prev == next {
            return;
        }
        self.state = next;
        match (prev.is_armed(), next.is_armed()) {
            (false, true) => {
                tracing::debug!(
                    target: "understory_transition",
                    ?next,
                    "arming custom edge recognizer"
                );
                self.host.arm();
            }
            (true, false) => {
                tracing::debug!(
                    target: "understory_transition",
                    "disarming custom edge recognizer"
                );
                self.host.disarm();
            }
            _ => {}
        }
    }

    pub(crate) fn into_host(self) -> G {
        self.host
    }
}

/// What releasing an interactive swipe should do with the pop in flight.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SwipeRelease {
    /// Play the pop to completion.
    Complete,
    /// Roll the pop back; the stack stays as it was.
    Cancel,
}

/// Identifies one accepted swipe.
///
/// Returned by [`Coordinator::begin_swipe`](crate::Coordinator::begin_swipe); a pop
/// is only interactive when its navigation event carries the id of the swipe in
/// flight.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwipeId(pub(crate) NonZeroU64);

impl fmt::Display for SwipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Read-only view of a swipe's progress, shared with the animation runtime.
///
/// The tracker that created it is the only writer. Once the swipe ends the handle
/// keeps the last published value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SwipeProgress(Rc<Cell<f64>>);

impl SwipeProgress {
    /// Progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.0.get()
    }

    fn publish(&self, progress: f64) {
        self.0.set(progress);
    }
}

/// Tracker for a single leading-edge swipe.
///
/// Progress is the horizontal translation since the swipe began divided by the
/// container width, clamped to `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSwipe {
    origin: Point,
    width: f64,
    progress: SwipeProgress,
}

impl EdgeSwipe {
    /// Start tracking a swipe at `origin` in a container `width` wide.
    ///
    /// Returns `None` if `origin` lies outside the leading edge strip or the
    /// width is not a positive finite number.
    pub fn begin(origin: Point, width: f64, config: &TransitionConfig) -> Option<Self> {
        if !(width.is_finite() && width > 0.0) {
            return None;
        }
        if !(origin.x >= 0.0 && origin.x <= config.edge_width) {
            return None;
        }
        Some(Self {
            origin,
            width,
            progress: SwipeProgress::default(),
        })
    }

    /// Record a new pointer position and return the updated progress.
    pub fn update(&mut self, position: Point) -> f64 {
        let progress = self.progress_at(position);
        self.progress.publish(progress);
        progress
    }

    /// Progress as of the last [`update`](Self::update).
    pub fn progress(&self) -> f64 {
        self.progress.progress()
    }

    /// A handle that follows this swipe's progress.
    pub fn progress_source(&self) -> SwipeProgress {
        self.progress.clone()
    }

    /// Where the swipe started.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Decide whether releasing at `position` with `velocity` (points/second)
    /// completes or cancels the pop.
    pub fn release(
        &mut self,
        position: Point,
        velocity: Vec2,
        config: &TransitionConfig,
    ) -> SwipeRelease {
        let progress = self.update(position);
        if progress > config.completion_threshold || velocity.x > config.velocity_threshold {
            SwipeRelease::Complete
        } else {
            SwipeRelease::Cancel
        }
    }

    fn progress_at(&self, position: Point) -> f64 {
        let dx = (position - self.origin).x / self.width;
        if dx.is_nan() { 0.0 } else { dx.clamp(0.0, 1.0) }
    }
}
