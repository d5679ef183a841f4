// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Matching of outgoing elements to incoming elements.
//!
//! ## Algorithm
//!
//! [`resolve`] walks the **destination** descriptors in order, so an element that
//! exists only on the source screen is never animated into nothing. For each
//! destination descriptor:
//!
//! 1. Its live view is looked up in the destination hierarchy. If there is none,
//!    the descriptor is skipped and a [`ResolveDiagnostic::UnresolvedDestination`]
//!    is recorded.
//! 2. Every source descriptor with the same name is a candidate. Candidates are
//!    tried by **descending tag**: recycling widgets may leave a stale duplicate
//!    alive for a moment, and the live replacement always carries the larger tag.
//! 3. The first candidate whose view resolves in the source hierarchy wins.
//!    Candidates that do not resolve are recorded as
//!    [`ResolveDiagnostic::UnresolvedSource`]; if none resolves the descriptor is
//!    dropped with [`ResolveDiagnostic::Unmatched`].
//!
//! Resolution never fails. Problems only narrow the output, and an empty
//! [`Resolution`] is an ordinary result that selects the standard transition.
//!
//! ## Example
//!
//! ```
//! use hashbrown::HashMap;
//! use understory_transition::{resolve, TransitionDescriptor, ViewTag};
//!
//! // A recycled list left a stale "card" (tag 5) next to the live one (tag 9).
//! let from = [
//!     TransitionDescriptor::new(ViewTag(5), "card"),
//!     TransitionDescriptor::new(ViewTag(9), "card"),
//! ];
//! let to = [TransitionDescriptor::new(ViewTag(1), "card")];
//!
//! let from_root: HashMap<ViewTag, &str> =
//!     [(ViewTag(5), "stale"), (ViewTag(9), "live")].into_iter().collect();
//! let to_root: HashMap<ViewTag, &str> = [(ViewTag(1), "detail")].into_iter().collect();
//!
//! let resolution = resolve(&from, &to, &from_root, &to_root);
//! assert_eq!(resolution.pairs.len(), 1);
//! assert_eq!(resolution.pairs[0].outgoing, "live");
//! assert_eq!(resolution.pairs[0].incoming, "detail");
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::lookup::ViewLookup;
use crate::types::{MatchedPair, TransitionDescriptor, ViewTag};

/// Non-fatal observation made while resolving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveDiagnostic {
    /// A destination descriptor has no live view in the destination hierarchy.
    UnresolvedDestination {
        /// Tag that did not resolve.
        tag: ViewTag,
        /// Name of the descriptor.
        name: String,
    },
    /// A source candidate has no live view and the next candidate was tried.
    UnresolvedSource {
        /// Tag that did not resolve.
        tag: ViewTag,
        /// Name of the descriptor.
        name: String,
    },
    /// No source candidate resolved for a live destination element.
    Unmatched {
        /// Tag of the destination element that was dropped.
        tag: ViewTag,
        /// Name of the descriptor.
        name: String,
    },
}

/// Output of [`resolve`].
#[derive(Clone, Debug)]
pub struct Resolution<V> {
    /// Matched pairs, in destination order.
    pub pairs: Vec<MatchedPair<V>>,
    /// Everything that narrowed the result.
    pub diagnostics: Vec<ResolveDiagnostic>,
}

impl<V> Default for Resolution<V> {
    fn default() -> Self {
        Self {
            pairs: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

impl<V> Resolution<V> {
    /// Whether no pair was matched.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Match `to` descriptors against `from` descriptors.
///
/// `from_root` resolves tags in the outgoing screen's hierarchy and `to_root` in the
/// incoming one. See the [module docs](self) for the matching rules.
pub fn resolve<L>(
    from: &[TransitionDescriptor],
    to: &[TransitionDescriptor],
    from_root: &L,
    to_root: &L,
) -> Resolution<L::View>
where
    L: ViewLookup + ?Sized,
{
    let mut out = Resolution::default();
    if from.is_empty() {
        return out;
    }

    for dest in to {
        let Some(incoming) = to_root.view_with_tag(dest.tag) else {
            tracing::debug!(
                target: "understory_transition",
                tag = dest.tag.0,
                name = %dest.name,
                "destination element has no live view; skipped"
            );
            out.diagnostics.push(ResolveDiagnostic::UnresolvedDestination {
                tag: dest.tag,
                name: dest.name.clone(),
            });
            continue;
        };

        let mut candidates: SmallVec<[&TransitionDescriptor; 4]> =
            from.iter().filter(|d| d.name == dest.name).collect();
        candidates.sort_by(|a, b| b.tag.cmp(&a.tag));

        let mut outgoing = None;
        for candidate in candidates {
            if let Some(view) = from_root.view_with_tag(candidate.tag) {
                outgoing = Some(view);
                break;
            }
            tracing::debug!(
                target: "understory_transition",
                tag = candidate.tag.0,
                name = %candidate.name,
                "source candidate has no live view; trying next"
            );
            out.diagnostics.push(ResolveDiagnostic::UnresolvedSource {
                tag: candidate.tag,
                name: candidate.name.clone(),
            });
        }

        match outgoing {
            Some(outgoing) => out.pairs.push(MatchedPair { incoming, outgoing }),
            None => out.diagnostics.push(ResolveDiagnostic::Unmatched {
                tag: dest.tag,
                name: dest.name.clone(),
            }),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::vec;

    fn root(entries: &[(u64, &'static str)]) -> BTreeMap<ViewTag, &'static str> {
        entries.iter().map(|&(t, v)| (ViewTag(t), v)).collect()
    }

    fn d(tag: u64, name: &str) -> TransitionDescriptor {
        TransitionDescriptor::new(ViewTag(tag), name)
    }

    #[test]
    fn greatest_tag_wins_among_duplicates() {
        let from = [d(5, "card"), d(9, "card")];
        let to = [d(1, "card")];
        let from_root = root(&[(5, "stale"), (9, "live")]);
        let to_root = root(&[(1, "detail")]);

        let r = resolve(&from, &to, &from_root, &to_root);
        assert_eq!(
            r.pairs,
            vec![MatchedPair {
                incoming: "detail",
                outgoing: "live"
            }]
        );
        assert!(r.diagnostics.is_empty(), "no fallback should have been needed");
    }

    #[test]
    fn falls_through_to_lower_tag_when_newest_is_gone() {
        let from = [d(5, "card"), d(9, "card")];
        let to = [d(1, "card")];
        let from_root = root(&[(5, "older")]);
        let to_root = root(&[(1, "detail")]);

        let r = resolve(&from, &to, &from_root, &to_root);
        assert_eq!(r.pairs[0].outgoing, "older");
        assert_eq!(
            r.diagnostics,
            vec![ResolveDiagnostic::UnresolvedSource {
                tag: ViewTag(9),
                name: "card".into()
            }]
        );
    }

    #[test]
    fn empty_source_yields_nothing() {
        let to = [d(1, "card")];
        let r = resolve(&[], &to, &root(&[]), &root(&[(1, "detail")]));
        assert!(r.is_empty());
        assert!(r.diagnostics.is_empty(), "no work is done without a source");
    }

    #[test]
    fn unresolved_destination_is_skipped_not_fatal() {
        let from = [d(5, "title"), d(6, "card")];
        let to = [d(1, "title"), d(2, "card")];
        let from_root = root(&[(5, "src-title"), (6, "src-card")]);
        let to_root = root(&[(2, "dst-card")]);

        let r = resolve(&from, &to, &from_root, &to_root);
        assert_eq!(
            r.pairs,
            vec![MatchedPair {
                incoming: "dst-card",
                outgoing: "src-card"
            }]
        );
        assert_eq!(
            r.diagnostics,
            vec![ResolveDiagnostic::UnresolvedDestination {
                tag: ViewTag(1),
                name: "title".into()
            }]
        );
    }

    #[test]
    fn source_only_elements_are_ignored_and_order_follows_destination() {
        let from = [d(5, "a"), d(6, "b"), d(7, "only-here")];
        let to = [d(2, "b"), d(1, "a")];
        let from_root = root(&[(5, "src-a"), (6, "src-b"), (7, "src-x")]);
        let to_root = root(&[(1, "dst-a"), (2, "dst-b")]);

        let r = resolve(&from, &to, &from_root, &to_root);
        let outgoing: Vec<_> = r.pairs.iter().map(|p| p.outgoing).collect();
        assert_eq!(outgoing, ["src-b", "src-a"]);
    }

    #[test]
    fn exhausted_candidates_drop_the_descriptor() {
        let from = [d(5, "card")];
        let to = [d(1, "card")];
        let r = resolve(&from, &to, &root(&[]), &root(&[(1, "detail")]));

        assert!(r.is_empty());
        assert_eq!(
            r.diagnostics.last(),
            Some(&ResolveDiagnostic::Unmatched {
                tag: ViewTag(1),
                name: "card".into()
            })
        );
    }
}
