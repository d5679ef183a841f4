// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core value types shared by the registry, resolver, and coordinator.

use alloc::string::String;
use core::fmt;

/// Opaque identifier of a rendered view within one screen's hierarchy.
///
/// Tags are unique within a single screen snapshot at matching time, but not
/// across time: list-recycling widgets may briefly keep a stale view alive next
/// to its replacement. A newer view always carries a larger tag, which is what
/// the resolver's tie-break relies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewTag(pub u64);

impl fmt::Display for ViewTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One candidate shared element declared by a screen.
///
/// Two elements on different screens are "the same element" when their
/// [`name`](Self::name) matches. The optional [`group`](Self::group)
/// partitions a screen's descriptors into independent transition sets (for
/// example, one set per list row).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionDescriptor {
    /// Tag of the live view carrying this element.
    pub tag: ViewTag,
    /// Logical key both screens agree on.
    pub name: String,
    /// Optional transition group; `None` is the screen's unscoped set.
    pub group: Option<String>,
}

impl TransitionDescriptor {
    /// Create an unscoped descriptor.
    pub fn new(tag: ViewTag, name: impl Into<String>) -> Self {
        Self {
            tag,
            name: name.into(),
            group: None,
        }
    }

    /// Place this descriptor in a transition group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// The group as a borrowed key, as used by registry lookups.
    pub fn group_key(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

/// Kind of navigation being performed on the stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavigationOperation {
    /// A new screen is presented on top of the current one.
    Push,
    /// The top screen is removed, revealing the one below.
    Pop,
}

impl NavigationOperation {
    /// The operation that undoes this one.
    pub const fn reversed(self) -> Self {
        match self {
            Self::Push => Self::Pop,
            Self::Pop => Self::Push,
        }
    }
}

impl fmt::Display for NavigationOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Push => "push",
            Self::Pop => "pop",
        })
    }
}

/// A resolved pair of live views to morph into one another.
///
/// Pairs only live for the duration of one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedPair<V> {
    /// View on the incoming (destination) screen.
    pub incoming: V,
    /// View on the outgoing (source) screen.
    pub outgoing: V,
}

impl<V> MatchedPair<V> {
    /// Map both views through `f`, keeping their roles.
    pub fn map<U>(self, mut f: impl FnMut(V) -> U) -> MatchedPair<U> {
        MatchedPair {
            incoming: f(self.incoming),
            outgoing: f(self.outgoing),
        }
    }
}
