// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tag → live view lookups provided by the platform view layer.
//!
//! A [`ViewLookup`] answers "which live view, if any, carries this tag under this
//! screen's root?". It is a pure query: implementations must not mutate the
//! hierarchy. The resolver calls it once per destination descriptor and once per
//! tried source candidate.

use alloc::collections::BTreeMap;
use core::fmt;
use core::hash::BuildHasher;

use hashbrown::HashMap;

use crate::types::ViewTag;

/// Lookup of live views by tag within one screen's rendered hierarchy.
pub trait ViewLookup {
    /// Handle to a live view.
    type View: Clone;

    /// Return the live view carrying `tag`, or `None` if nothing under this root has it.
    fn view_with_tag(&self, tag: ViewTag) -> Option<Self::View>;
}

impl<T: ViewLookup + ?Sized> ViewLookup for &T {
    type View = T::View;

    fn view_with_tag(&self, tag: ViewTag) -> Option<Self::View> {
        (**self).view_with_tag(tag)
    }
}

impl<V: Clone, H: BuildHasher> ViewLookup for HashMap<ViewTag, V, H> {
    type View = V;

    fn view_with_tag(&self, tag: ViewTag) -> Option<V> {
        self.get(&tag).cloned()
    }
}

impl<V: Clone> ViewLookup for BTreeMap<ViewTag, V> {
    type View = V;

    fn view_with_tag(&self, tag: ViewTag) -> Option<V> {
        self.get(&tag).cloned()
    }
}

/// Adapts a closure into a [`ViewLookup`].
///
/// ```
/// use understory_transition::lookup::{LookupFn, ViewLookup};
/// use understory_transition::ViewTag;
///
/// let root = LookupFn(|tag: ViewTag| (tag.0 % 2 == 0).then_some(tag.0 * 10));
/// assert_eq!(root.view_with_tag(ViewTag(4)), Some(40));
/// assert_eq!(root.view_with_tag(ViewTag(3)), None);
/// ```
#[derive(Clone, Copy)]
pub struct LookupFn<F>(pub F);

impl<F> fmt::Debug for LookupFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupFn").finish_non_exhaustive()
    }
}

impl<F, V> ViewLookup for LookupFn<F>
where
    F: Fn(ViewTag) -> Option<V>,
    V: Clone,
{
    type View = V;

    fn view_with_tag(&self, tag: ViewTag) -> Option<V> {
        (self.0)(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_lookups_return_owned_handles() {
        let mut hashed: HashMap<ViewTag, &str> = HashMap::new();
        hashed.insert(ViewTag(1), "a");
        let mut ordered = BTreeMap::new();
        ordered.insert(ViewTag(2), "b");

        assert_eq!(hashed.view_with_tag(ViewTag(1)), Some("a"));
        assert_eq!(hashed.view_with_tag(ViewTag(2)), None);
        assert_eq!((&ordered).view_with_tag(ViewTag(2)), Some("b"));
    }
}
