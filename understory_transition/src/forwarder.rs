// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pass-through of navigation lifecycle notifications.
//!
//! Installing the coordinator must not hide lifecycle callbacks from code that
//! was already observing the navigation stack. [`LifecycleForwarder`] keeps an
//! explicit, ordered list of observers and hands every event to each of them,
//! regardless of whether the current navigation is standard or shared. It does
//! no filtering and swallows nothing.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// A navigation lifecycle notification delivered by the host.
#[derive(Debug)]
pub enum LifecycleEvent<'a, S> {
    /// `screen` is about to become the top of the stack.
    WillShow {
        /// Screen being shown.
        screen: &'a S,
        /// Whether the host animates the change.
        animated: bool,
    },
    /// `screen` has become the top of the stack.
    DidShow {
        /// Screen that was shown.
        screen: &'a S,
        /// Whether the host animated the change.
        animated: bool,
    },
}

impl<S> LifecycleEvent<'_, S> {
    /// Screen the event is about.
    pub fn screen(&self) -> &S {
        match self {
            Self::WillShow { screen, .. } | Self::DidShow { screen, .. } => screen,
        }
    }
}

/// Receiver of forwarded lifecycle notifications.
pub trait LifecycleObserver<S> {
    /// Handle one notification.
    fn on_lifecycle(&mut self, event: &LifecycleEvent<'_, S>);
}

impl<S, F> LifecycleObserver<S> for F
where
    F: FnMut(&LifecycleEvent<'_, S>),
{
    fn on_lifecycle(&mut self, event: &LifecycleEvent<'_, S>) {
        self(event);
    }
}

/// Handle returned by [`LifecycleForwarder::add`], used to remove an observer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered list of lifecycle observers.
pub struct LifecycleForwarder<S> {
    observers: Vec<(ObserverId, Box<dyn LifecycleObserver<S>>)>,
    next_id: u64,
}

impl<S> fmt::Debug for LifecycleForwarder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleForwarder")
            .field("observers", &self.observers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<S> Default for LifecycleForwarder<S> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<S> LifecycleForwarder<S> {
    /// Create an empty forwarder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer; it is called after every observer added before it.
    pub fn add(&mut self, observer: impl LifecycleObserver<S> + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `event` to every observer, in registration order.
    pub fn forward(&mut self, event: &LifecycleEvent<'_, S>) {
        for (_, observer) in &mut self.observers {
            observer.on_lifecycle(event);
        }
    }
}
