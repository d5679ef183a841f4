// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for matching and push/pop symmetry.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use understory_transition::gesture::NoGesture;
use understory_transition::{
    Coordinator, InteractiveTransitionDriver, MatchedPair, NavigationEvent, TransitionDescriptor,
    TransitionMap, TransitionOutcome, ViewTag, resolve,
};

const NAMES: [&str; 3] = ["card", "title", "avatar"];

/// Views are `(screen, tag)` so handles from different screens never collide.
type View = (u8, u64);

fn descriptors() -> impl Strategy<Value = Vec<TransitionDescriptor>> {
    prop::collection::vec((0_u64..24, 0_usize..NAMES.len()), 0..10).prop_map(|raw| {
        // Tags are unique within one snapshot.
        let mut seen = BTreeSet::new();
        raw.into_iter()
            .filter(|(tag, _)| seen.insert(*tag))
            .map(|(tag, name)| TransitionDescriptor::new(ViewTag(tag), NAMES[name]))
            .collect()
    })
}

fn hierarchy(
    screen: u8,
    descriptors: &[TransitionDescriptor],
    live: &[bool],
) -> BTreeMap<ViewTag, View> {
    descriptors
        .iter()
        .zip(live.iter().cycle())
        .filter(|(_, alive)| **alive)
        .map(|(d, _)| (d.tag, (screen, d.tag.0)))
        .collect()
}

fn pairs_of(driver: Option<&InteractiveTransitionDriver<View>>) -> Vec<MatchedPair<View>> {
    driver.map(|d| d.pairs().to_vec()).unwrap_or_default()
}

proptest! {
    #[test]
    fn pairs_only_reference_live_views(
        from in descriptors(),
        to in descriptors(),
        from_live in prop::collection::vec(any::<bool>(), 1..8),
        to_live in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let from_root = hierarchy(0, &from, &from_live);
        let to_root = hierarchy(1, &to, &to_live);
        let resolution = resolve(&from, &to, &from_root, &to_root);

        for pair in &resolution.pairs {
            prop_assert!(from_root.values().any(|v| *v == pair.outgoing));
            prop_assert!(to_root.values().any(|v| *v == pair.incoming));
        }
        prop_assert!(resolution.pairs.len() <= to.len());
    }

    #[test]
    fn chosen_source_is_greatest_live_tag_with_same_name(
        from in descriptors(),
        to in descriptors(),
        from_live in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let from_root = hierarchy(0, &from, &from_live);
        let to_root = hierarchy(1, &to, &[true]);
        let resolution = resolve(&from, &to, &from_root, &to_root);

        let by_tag: BTreeMap<u64, &str> =
            to.iter().map(|d| (d.tag.0, d.name.as_str())).collect();
        for pair in &resolution.pairs {
            let name = by_tag[&pair.incoming.1];
            let best = from
                .iter()
                .filter(|d| d.name == name && from_root.contains_key(&d.tag))
                .map(|d| d.tag.0)
                .max();
            prop_assert_eq!(Some(pair.outgoing.1), best);
        }
    }

    #[test]
    fn empty_source_never_matches(to in descriptors()) {
        let to_root = hierarchy(1, &to, &[true]);
        let from_root: BTreeMap<ViewTag, View> = BTreeMap::new();
        prop_assert!(resolve(&[], &to, &from_root, &to_root).pairs.is_empty());
    }

    #[test]
    fn pop_mirrors_push(list in descriptors(), detail in descriptors()) {
        let mut map = TransitionMap::new();
        for d in &list {
            map.register(1_u8, d.clone().with_group("row"));
        }
        for d in &detail {
            map.register(2_u8, d.clone());
        }
        let list_root = hierarchy(1, &list, &[true]);
        let detail_root = hierarchy(2, &detail, &[true]);

        let mut coordinator = Coordinator::new(NoGesture);
        let event = NavigationEvent::push(&1, &2).with_group(Some("row"));
        let push = coordinator.on_will_transition(&map, event, &list_root, &detail_root).unwrap();
        let pushed = pairs_of(push.driver());
        coordinator.finish(push.token(), TransitionOutcome::Completed).unwrap();

        let event = NavigationEvent::pop(&2, &1).with_group(Some("row"));
        let pop = coordinator.on_will_transition(&map, event, &detail_root, &list_root).unwrap();
        let popped = pairs_of(pop.driver());
        coordinator.finish(pop.token(), TransitionOutcome::Completed).unwrap();

        // With one live element per name on each side, every pair is found in
        // both directions with incoming/outgoing swapped.
        let unique_names = |ds: &[TransitionDescriptor]| {
            let names: BTreeSet<_> = ds.iter().map(|d| d.name.as_str()).collect();
            names.len() == ds.len()
        };
        if unique_names(&list) && unique_names(&detail) {
            let mut forward: Vec<(View, View)> =
                pushed.iter().map(|p| (p.outgoing, p.incoming)).collect();
            let mut backward: Vec<(View, View)> =
                popped.iter().map(|p| (p.incoming, p.outgoing)).collect();
            forward.sort_unstable();
            backward.sort_unstable();
            prop_assert_eq!(forward, backward);
        }
        prop_assert_eq!(pushed.is_empty(), popped.is_empty());
        prop_assert_eq!(coordinator.depth(), 0);
    }
}
