// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The artifact handed to the host's animation runtime.
//!
//! [`InteractiveTransitionDriver`] performs no matching. It carries the resolved
//! pairs, the operation, and, for interactive transitions, a [`SwipeProgress`]
//! handle the coordinator keeps up to date as the swipe moves. The host reports
//! the end of the animation through
//! [`Coordinator::finish`](crate::Coordinator::finish) with
//! [`token`](InteractiveTransitionDriver::token), which returns the coordinator
//! to idle.

use alloc::vec::Vec;

use crate::coordinator::SessionToken;
use crate::gesture::SwipeProgress;
use crate::types::{MatchedPair, NavigationOperation};

/// Data handoff for one shared transition.
#[derive(Clone, Debug)]
pub struct InteractiveTransitionDriver<V> {
    pub(crate) token: SessionToken,
    pub(crate) operation: NavigationOperation,
    pub(crate) pairs: Vec<MatchedPair<V>>,
    pub(crate) progress: Option<SwipeProgress>,
}

impl<V> InteractiveTransitionDriver<V> {
    /// Session this transition belongs to.
    pub fn token(&self) -> SessionToken {
        self.token
    }

    /// Direction of the navigation.
    pub fn operation(&self) -> NavigationOperation {
        self.operation
    }

    /// Views to morph, in destination order.
    pub fn pairs(&self) -> &[MatchedPair<V>] {
        &self.pairs
    }

    /// Take ownership of the pairs.
    pub fn into_pairs(self) -> Vec<MatchedPair<V>> {
        self.pairs
    }

    /// Whether progress is driven by an edge swipe rather than played to completion.
    pub fn is_interactive(&self) -> bool {
        self.progress.is_some()
    }

    /// Progress of the driving swipe in `[0, 1]`, or `None` when not interactive.
    pub fn progress(&self) -> Option<f64> {
        self.progress.as_ref().map(SwipeProgress::progress)
    }

    /// Handle following the driving swipe, for runtimes that poll it themselves.
    pub fn progress_source(&self) -> Option<&SwipeProgress> {
        self.progress.as_ref()
    }
}

/// What the host should do for one navigation event.
#[derive(Clone, Debug)]
pub enum TransitionPlan<V> {
    /// Use the host's default animation and back gesture.
    Standard(SessionToken),
    /// Play a shared-element transition.
    Shared(InteractiveTransitionDriver<V>),
}

impl<V> TransitionPlan<V> {
    /// Session to report completion for.
    pub fn token(&self) -> SessionToken {
        match self {
            Self::Standard(token) => *token,
            Self::Shared(driver) => driver.token,
        }
    }

    /// Whether the host should fall back to its default transition.
    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Standard(_))
    }

    /// The driver, if this is a shared transition.
    pub fn driver(&self) -> Option<&InteractiveTransitionDriver<V>> {
        match self {
            Self::Standard(_) => None,
            Self::Shared(driver) => Some(driver),
        }
    }

    /// Consume the plan, keeping only the driver.
    pub fn into_driver(self) -> Option<InteractiveTransitionDriver<V>> {
        match self {
            Self::Standard(_) => None,
            Self::Shared(driver) => Some(driver),
        }
    }
}
