// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition map: which shared elements each screen declares.
//!
//! ## Overview
//!
//! [`TransitionMap`] stores, per screen, the [`TransitionDescriptor`]s of the
//! shared elements that are currently attached. Descriptors are partitioned by
//! transition group: the unscoped set (`group == None`) and one set per named
//! group. Lookups return the descriptors of exactly one partition, in
//! registration order.
//!
//! ## Population
//!
//! The view-tagging layer calls [`TransitionMap::register`] when an element
//! attaches and [`TransitionMap::unregister`] when it detaches. List-recycling
//! widgets sometimes create an element twice and drop one copy without a detach
//! notification, so two descriptors may share a name. This is tolerated: both
//! are kept and the resolver decides between them. Re-registering the same tag
//! on the same screen replaces the previous descriptor in place.
//!
//! The map is never cached by consumers; the coordinator queries it fresh on every
//! navigation event.

use alloc::string::String;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::types::{TransitionDescriptor, ViewTag};

type Descriptors = SmallVec<[TransitionDescriptor; 4]>;

#[derive(Clone, Debug, Default)]
struct ScreenTransitions {
    unscoped: Descriptors,
    groups: HashMap<String, Descriptors>,
}

impl ScreenTransitions {
    fn partition(&self, group: Option<&str>) -> &[TransitionDescriptor] {
        match group {
            None => &self.unscoped,
            Some(g) => self.groups.get(g).map(|d| d.as_slice()).unwrap_or(&[]),
        }
    }

    fn remove_tag(&mut self, tag: ViewTag) -> Option<TransitionDescriptor> {
        if let Some(pos) = self.unscoped.iter().position(|d| d.tag == tag) {
            return Some(self.unscoped.remove(pos));
        }
        let mut emptied = None;
        let mut removed = None;
        for (name, list) in &mut self.groups {
            if let Some(pos) = list.iter().position(|d| d.tag == tag) {
                removed = Some(list.remove(pos));
                if list.is_empty() {
                    emptied = Some(name.clone());
                }
                break;
            }
        }
        if let Some(name) = emptied {
            self.groups.remove(&name);
        }
        removed
    }

    fn len(&self) -> usize {
        self.unscoped.len() + self.groups.values().map(SmallVec::len).sum::<usize>()
    }

    fn is_empty(&self) -> bool {
        self.unscoped.is_empty() && self.groups.is_empty()
    }
}

/// Registry of shared-element descriptors keyed by screen and transition group.
///
/// `S` is the host's screen identity (a page id, a view-controller handle, …).
#[derive(Clone, Debug)]
pub struct TransitionMap<S> {
    screens: HashMap<S, ScreenTransitions>,
}

impl<S> Default for TransitionMap<S> {
    fn default() -> Self {
        Self {
            screens: HashMap::new(),
        }
    }
}

impl<S: Hash + Eq> TransitionMap<S> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attached shared element for `screen`.
    ///
    /// A descriptor already registered with the same tag on this screen is
    /// replaced, even if its name or group changed.
    pub fn register(&mut self, screen: S, descriptor: TransitionDescriptor) {
        let entry = self.screens.entry(screen).or_default();
        entry.remove_tag(descriptor.tag);
        match &descriptor.group {
            None => entry.unscoped.push(descriptor),
            Some(g) => entry
                .groups
                .entry(g.clone())
                .or_default()
                .push(descriptor),
        }
    }

    /// Forget the element carrying `tag` on `screen`.
    ///
    /// Returns the removed descriptor, or `None` if it was not registered.
    pub fn unregister(&mut self, screen: &S, tag: ViewTag) -> Option<TransitionDescriptor> {
        let entry = self.screens.get_mut(screen)?;
        let removed = entry.remove_tag(tag);
        if entry.is_empty() {
            self.screens.remove(screen);
        }
        removed
    }

    /// Drop every descriptor of `screen`, typically once it leaves the stack.
    ///
    /// Returns `true` if the screen had any descriptors.
    pub fn remove_screen(&mut self, screen: &S) -> bool {
        self.screens.remove(screen).is_some()
    }

    /// Descriptors of one partition of `screen`, in registration order.
    ///
    /// `group == None` selects the unscoped set. Unknown screens and groups yield
    /// an empty slice.
    pub fn lookup(&self, screen: &S, group: Option<&str>) -> &[TransitionDescriptor] {
        self.screens
            .get(screen)
            .map(|s| s.partition(group))
            .unwrap_or(&[])
    }

    /// Whether `screen` has any registered descriptor.
    pub fn contains_screen(&self, screen: &S) -> bool {
        self.screens.contains_key(screen)
    }

    /// Total number of descriptors registered for `screen`, across all groups.
    pub fn len(&self, screen: &S) -> usize {
        self.screens.get(screen).map_or(0, ScreenTransitions::len)
    }

    /// Whether the map holds no descriptors at all.
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.screens.clear();
    }
}
