// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation state machine: standard vs shared vs interactive transitions.
//!
//! ## States
//!
//! ```text
//! Idle ──navigation──▶ resolving ──▶ StandardTransition ──finish──▶ Idle
//!                                └─▶ SharedTransition   ──finish──▶ Idle
//! ```
//!
//! Resolution runs synchronously inside [`Coordinator::on_will_transition`], so
//! the resolving step is never observable from outside. Exactly one
//! [`TransitionSession`] exists between a navigation event and the matching
//! [`Coordinator::finish`]; a second navigation event in that window is rejected
//! with [`TransitionError::ConcurrentSession`] and changes nothing.
//!
//! ## Which entries are compared
//!
//! - Push: the current top screen's entry for the selected group, against the
//!   new screen's unscoped entry.
//! - Pop: the popping screen's unscoped entry, against the revealed screen's
//!   entry for the selected group.
//!
//! ## Recognizer ownership
//!
//! The coordinator is the single writer of the custom edge recognizer.
//!
//! - A shared push arms it ([`RecognizerState::ArmedForPush`]) so the user can
//!   swipe the push back.
//! - A shared pop driven by a live swipe moves it to
//!   [`RecognizerState::ArmedForPop`] for the duration of the session.
//! - Any navigation that resolves to the standard transition disarms it.
//!
//! ## Interactive pops
//!
//! [`Coordinator::begin_swipe`] returns a [`SwipeId`]. A pop is interactive only
//! when its [`NavigationEvent`] carries that id ([`NavigationEvent::with_swipe`])
//! and it resolves to a shared transition. Every navigation event consumes the
//! pending swipe, so a swipe that did not lead to its pop cannot make a later
//! back-button pop interactive. A [`LifecycleEvent::DidShow`] received while idle
//! also drops it.
//!
//! Every stack level remembers the recognizer state in force while it was on top.
//! A completed pop restores the revealed level's state. A cancelled session, push
//! or pop, restores the state in force before it began, since the stack did not
//! change.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;
use core::num::NonZeroU64;

use kurbo::{Point, Vec2};

use crate::config::TransitionConfig;
use crate::driver::{InteractiveTransitionDriver, TransitionPlan};
use crate::error::TransitionError;
use crate::forwarder::{LifecycleEvent, LifecycleForwarder, LifecycleObserver, ObserverId};
use crate::gesture::{
    EdgeGestureHost, EdgeSwipe, GestureOwner, RecognizerState, SwipeId, SwipeRelease,
};
use crate::lookup::ViewLookup;
use crate::registry::TransitionMap;
use crate::resolver::resolve;
use crate::types::NavigationOperation;

/// Identifies one navigation session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionToken(NonZeroU64);

impl SessionToken {
    /// Raw token value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// How a session ended, as reported by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransitionOutcome {
    /// The navigation took effect.
    Completed,
    /// The navigation was aborted (for example, a swipe released too early); the
    /// stack is unchanged.
    Cancelled,
}

/// Observable coordinator phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CoordinatorPhase {
    /// No navigation in flight.
    Idle,
    /// The host is playing its default transition.
    StandardTransition,
    /// A shared-element transition is playing.
    SharedTransition {
        /// Whether a live swipe drives its progress.
        interactive: bool,
    },
}

/// Per-navigation state, alive from the navigation event until [`Coordinator::finish`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransitionSession {
    /// Session identity.
    pub token: SessionToken,
    /// Direction of the navigation.
    pub operation: NavigationOperation,
    /// Number of matched pairs; zero for a standard transition.
    pub matched: usize,
    /// Whether a live swipe drives the transition.
    pub interactive: bool,
    previous: RecognizerState,
}

impl TransitionSession {
    /// Whether this session plays a shared-element transition.
    pub fn is_shared(&self) -> bool {
        self.matched > 0
    }
}

/// A navigation request from the host.
#[derive(Copy, Clone, Debug)]
pub struct NavigationEvent<'a, S> {
    /// Push or pop.
    pub operation: NavigationOperation,
    /// Screen on top before the navigation.
    pub from: &'a S,
    /// Screen on top after the navigation.
    pub to: &'a S,
    /// Transition group selected on the list-bearing screen (the push source or
    /// the pop destination), if any.
    pub group: Option<&'a str>,
    /// Swipe that started this pop, as returned by
    /// [`Coordinator::begin_swipe`].
    pub swipe: Option<SwipeId>,
}

impl<'a, S> NavigationEvent<'a, S> {
    /// `to` is pushed on top of `from`.
    pub fn push(from: &'a S, to: &'a S) -> Self {
        Self {
            operation: NavigationOperation::Push,
            from,
            to,
            group: None,
            swipe: None,
        }
    }

    /// `from` is popped, revealing `to`.
    pub fn pop(from: &'a S, to: &'a S) -> Self {
        Self {
            operation: NavigationOperation::Pop,
            from,
            to,
            group: None,
            swipe: None,
        }
    }

    /// Select a transition group.
    #[must_use]
    pub fn with_group(mut self, group: Option<&'a str>) -> Self {
        self.group = group;
        self
    }

    /// Mark this pop as driven by the swipe `swipe`.
    #[must_use]
    pub fn with_swipe(mut self, swipe: SwipeId) -> Self {
        self.swipe = Some(swipe);
        self
    }
}

/// Shared-transition coordinator for one navigation stack.
///
/// `S` is the host's screen identity and `G` the platform side of the custom
/// edge recognizer.
pub struct Coordinator<S, G> {
    config: TransitionConfig,
    gesture: GestureOwner<G>,
    session: Option<TransitionSession>,
    next_id: NonZeroU64,
    // Recognizer state of each covered stack level, bottom first.
    levels: Vec<RecognizerState>,
    swipe: Option<ActiveSwipe>,
    observers: LifecycleForwarder<S>,
}

impl<S, G: fmt::Debug> fmt::Debug for Coordinator<S, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("config", &self.config)
            .field("gesture", &self.gesture)
            .field("session", &self.session)
            .field("levels", &self.levels)
            .field("swipe", &self.swipe)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}

impl<S, G: EdgeGestureHost> Coordinator<S, G> {
    /// Create an idle coordinator with the default configuration.
    pub fn new(gesture: G) -> Self {
        Self::with_config(gesture, TransitionConfig::default())
    }

    /// Create an idle coordinator.
    pub fn with_config(gesture: G, config: TransitionConfig) -> Self {
        Self {
            config,
            gesture: GestureOwner::new(gesture),
            session: None,
            next_id: NonZeroU64::MIN,
            levels: Vec::new(),
            swipe: None,
            observers: LifecycleForwarder::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Toggle shared transitions globally. Takes effect at the next navigation event.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> CoordinatorPhase {
        match &self.session {
            None => CoordinatorPhase::Idle,
            Some(s) if s.is_shared() => CoordinatorPhase::SharedTransition {
                interactive: s.interactive,
            },
            Some(_) => CoordinatorPhase::StandardTransition,
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&TransitionSession> {
        self.session.as_ref()
    }

    /// Current state of the custom edge recognizer.
    pub fn recognizer(&self) -> RecognizerState {
        self.gesture.state()
    }

    /// Read-only access to the platform gesture host.
    pub fn gesture_host(&self) -> &G {
        self.gesture.host()
    }

    /// Tear down the coordinator and return the platform gesture host.
    pub fn into_gesture_host(self) -> G {
        self.gesture.into_host()
    }

    /// Register a lifecycle observer that keeps receiving every notification.
    pub fn add_observer(&mut self, observer: impl LifecycleObserver<S> + 'static) -> ObserverId {
        self.observers.add(observer)
    }

    /// Remove a lifecycle observer.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// Forward a lifecycle notification to every observer, unconditionally.
    ///
    /// A [`LifecycleEvent::DidShow`] while idle means the stack settled without
    /// the pending swipe starting a pop, so the swipe is dropped.
    pub fn on_lifecycle_event(&mut self, event: &LifecycleEvent<'_, S>) {
        if matches!(event, LifecycleEvent::DidShow { .. }) && self.session.is_none() {
            if let Some(dropped) = self.swipe.take() {
                tracing::debug!(
                    target: "understory_transition",
                    swipe = %dropped.id,
                    "screen settled before the swipe started a pop; swipe dropped"
                );
            }
        }
        self.observers.forward(event);
    }

    /// Decide how the host should animate `event`.
    ///
    /// `from_root` resolves tags on the screen that is on top before the
    /// navigation, `to_root` on the screen that is on top after it.
    ///
    /// Returns [`TransitionPlan::Standard`] when nothing matches or shared
    /// transitions are disabled; returns an error without side effects if a
    /// session is already active.
    pub fn on_will_transition<L>(
        &mut self,
        map: &TransitionMap<S>,
        event: NavigationEvent<'_, S>,
        from_root: &L,
        to_root: &L,
    ) -> Result<TransitionPlan<L::View>, TransitionError>
    where
        S: Hash + Eq,
        L: ViewLookup + ?Sized,
    {
        if let Some(active) = &self.session {
            tracing::error!(
                target: "understory_transition",
                active = %active.token,
                rejected = %event.operation,
                "navigation event arrived while a session is active; rejected"
            );
            return Err(TransitionError::ConcurrentSession {
                active: active.token,
                rejected: event.operation,
            });
        }

        let operation = event.operation;
        let previous = self.gesture.state();
        let token = SessionToken(self.mint());
        // The pending swipe belongs to this event or to none at all.
        let swipe = self.swipe.take();

        let pairs = if self.config.enabled {
            let (from_entry, to_entry) = match operation {
                NavigationOperation::Push => (
                    map.lookup(event.from, event.group),
                    map.lookup(event.to, None),
                ),
                NavigationOperation::Pop => (
                    map.lookup(event.from, None),
                    map.lookup(event.to, event.group),
                ),
            };
            resolve(from_entry, to_entry, from_root, to_root).pairs
        } else {
            Vec::new()
        };

        if pairs.is_empty() {
            self.gesture.set(RecognizerState::Disarmed);
            self.session = Some(TransitionSession {
                token,
                operation,
                matched: 0,
                interactive: false,
                previous,
            });
            tracing::debug!(
                target: "understory_transition",
                session = %token,
                %operation,
                "standard transition"
            );
            return Ok(TransitionPlan::Standard(token));
        }

        let swipe = swipe.filter(|active| {
            operation == NavigationOperation::Pop && event.swipe == Some(active.id)
        });
        let progress = swipe.as_ref().map(|active| active.tracker.progress_source());
        let interactive = swipe.is_some();
        self.swipe = swipe;
        match operation {
            NavigationOperation::Push => self.gesture.set(RecognizerState::ArmedForPush),
            NavigationOperation::Pop if interactive => {
                self.gesture.set(RecognizerState::ArmedForPop);
            }
            NavigationOperation::Pop => {}
        }

        self.session = Some(TransitionSession {
            token,
            operation,
            matched: pairs.len(),
            interactive,
            previous,
        });
        tracing::debug!(
            target: "understory_transition",
            session = %token,
            %operation,
            matched = pairs.len(),
            interactive,
            "shared transition"
        );
        Ok(TransitionPlan::Shared(InteractiveTransitionDriver {
            token,
            operation,
            pairs,
            progress,
        }))
    }

    /// Report that the session identified by `token` ended.
    ///
    /// Returns the closed session. A token that is not the active session's is
    /// rejected and leaves all state untouched.
    pub fn finish(
        &mut self,
        token: SessionToken,
        outcome: TransitionOutcome,
    ) -> Result<TransitionSession, TransitionError> {
        let active = self.session.map(|s| s.token);
        let Some(session) = self.session.take_if(|s| s.token == token) else {
            tracing::error!(
                target: "understory_transition",
                got = %token,
                ?active,
                "completion reported for a session that is not active"
            );
            return Err(TransitionError::StaleSession { active, got: token });
        };

        self.swipe = None;
        let next = match (session.operation, outcome) {
            (_, TransitionOutcome::Cancelled) => session.previous,
            (NavigationOperation::Push, TransitionOutcome::Completed) => {
                self.levels.push(session.previous);
                self.gesture.state()
            }
            (NavigationOperation::Pop, TransitionOutcome::Completed) => {
                self.levels.pop().unwrap_or_default()
            }
        };
        self.gesture.set(next);

        tracing::debug!(
            target: "understory_transition",
            session = %token,
            ?outcome,
            recognizer = ?next,
            "session closed"
        );
        Ok(session)
    }

    /// Begin an interactive pop swipe at `origin` in a container `width` wide.
    ///
    /// Returns the swipe's id if it is accepted. The host should then pop the top
    /// screen with a [`NavigationEvent`] carrying that id. A swipe is only
    /// accepted while idle, while shared transitions are enabled, and while the
    /// custom recognizer is armed for the top screen.
    pub fn begin_swipe(&mut self, origin: Point, width: f64) -> Option<SwipeId> {
        if self.session.is_some()
            || !self.config.enabled
            || self.gesture.state() != RecognizerState::ArmedForPush
        {
            return None;
        }
        let tracker = EdgeSwipe::begin(origin, width, &self.config)?;
        let id = SwipeId(self.mint());
        self.swipe = Some(ActiveSwipe { id, tracker });
        Some(id)
    }

    /// Track the swipe and return its progress, or `None` if no swipe is in flight.
    ///
    /// The driver of an interactive pop sees the new progress through its
    /// [`progress`](InteractiveTransitionDriver::progress).
    pub fn update_swipe(&mut self, position: Point) -> Option<f64> {
        self.swipe.as_mut().map(|s| s.tracker.update(position))
    }

    /// Progress of the swipe in flight, in `[0, 1]`.
    pub fn swipe_progress(&self) -> Option<f64> {
        self.swipe.as_ref().map(|s| s.tracker.progress())
    }

    /// Release the swipe and decide whether the pop completes.
    ///
    /// The host plays the rest of the animation accordingly and then calls
    /// [`finish`](Self::finish) with the matching outcome.
    pub fn release_swipe(&mut self, position: Point, velocity: Vec2) -> Option<SwipeRelease> {
        let config = self.config;
        let mut swipe = self.swipe.take()?;
        Some(swipe.tracker.release(position, velocity, &config))
    }

    /// Abort the swipe in flight (for example, the touch was cancelled).
    ///
    /// Returns [`SwipeRelease::Cancel`] if there was a swipe to abort.
    pub fn cancel_swipe(&mut self) -> Option<SwipeRelease> {
        self.swipe.take().map(|_| SwipeRelease::Cancel)
    }

    /// Number of covered stack levels the coordinator is tracking.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    // Ids only need to differ from the live session's and the pending swipe's,
    // so wrapping back to one after `u64::MAX` is safe.
    fn mint(&mut self) -> NonZeroU64 {
        let id = self.next_id;
        self.next_id = match id.checked_add(1) {
            Some(next) => next,
            None => {
                tracing::warn!(
                    target: "understory_transition",
                    "session and swipe ids wrapped around"
                );
                NonZeroU64::MIN
            }
        };
        id
    }
}

/// The accepted swipe, until a navigation event consumes it.
#[derive(Clone, Debug)]
struct ActiveSwipe {
    id: SwipeId,
    tracker: EdgeSwipe,
}
