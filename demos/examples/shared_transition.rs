// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared transition walkthrough: list → detail push, a swipe back that is
//! released too early, then a swipe back that completes.
//!
//! Run:
//! - `cargo run -p understory_demos --example shared_transition`

use hashbrown::HashMap;
use kurbo::{Point, Vec2};
use understory_demos::{EdgePan, Screen, describe};
use understory_transition::gesture::SwipeRelease;
use understory_transition::{
    Coordinator, LifecycleEvent, NavigationEvent, TransitionDescriptor, TransitionMap,
    TransitionOutcome, ViewTag,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(true)
        .init();

    // The list was recycled: row 4's avatar exists twice, the stale copy has the lower tag.
    let mut map = TransitionMap::new();
    for (tag, name) in [(41, "avatar"), (48, "avatar"), (49, "name")] {
        let descriptor = TransitionDescriptor::new(ViewTag(tag), name).with_group("row-4");
        map.register(Screen::List, descriptor);
    }
    for (tag, name) in [(2, "avatar"), (3, "name"), (4, "bio")] {
        map.register(Screen::Detail, TransitionDescriptor::new(ViewTag(tag), name));
    }

    let list: HashMap<ViewTag, &'static str> = [
        (ViewTag(41), "list/avatar(stale)"),
        (ViewTag(48), "list/avatar"),
        (ViewTag(49), "list/name"),
    ]
    .into_iter()
    .collect();
    // The bio view has not been rendered yet; it is skipped.
    let detail: HashMap<ViewTag, &'static str> =
        [(ViewTag(2), "detail/avatar"), (ViewTag(3), "detail/name")]
            .into_iter()
            .collect();

    let mut coordinator = Coordinator::new(EdgePan::default());
    coordinator.add_observer(|event: &LifecycleEvent<'_, Screen>| {
        println!("  [legacy observer] {event:?}");
    });

    println!("push list -> detail");
    let push = match coordinator.on_will_transition(
        &map,
        NavigationEvent::push(&Screen::List, &Screen::Detail).with_group(Some("row-4")),
        &list,
        &detail,
    ) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("navigation rejected: {err}");
            return;
        }
    };
    describe(&push);
    coordinator.on_lifecycle_event(&LifecycleEvent::WillShow {
        screen: &Screen::Detail,
        animated: true,
    });
    if let Err(err) = coordinator.finish(push.token(), TransitionOutcome::Completed) {
        eprintln!("{err}");
    }
    coordinator.on_lifecycle_event(&LifecycleEvent::DidShow {
        screen: &Screen::Detail,
        animated: true,
    });

    for (attempt, release_x, velocity) in [(1, 120.0, 40.0), (2, 260.0, 0.0)] {
        println!("swipe back, attempt {attempt}");
        let Some(swipe) = coordinator.begin_swipe(Point::new(6.0, 300.0), 390.0) else {
            println!("  swipe not accepted");
            continue;
        };
        let pop = match coordinator.on_will_transition(
            &map,
            NavigationEvent::pop(&Screen::Detail, &Screen::List)
                .with_group(Some("row-4"))
                .with_swipe(swipe),
            &detail,
            &list,
        ) {
            Ok(plan) => plan,
            Err(err) => {
                eprintln!("navigation rejected: {err}");
                return;
            }
        };
        describe(&pop);
        coordinator.update_swipe(Point::new(release_x - 20.0, 300.0));
        if let Some(progress) = pop.driver().and_then(|driver| driver.progress()) {
            println!("  animation runtime sees progress {progress:.2}");
        }
        let release = Point::new(release_x, 300.0);
        let outcome = match coordinator.release_swipe(release, Vec2::new(velocity, 0.0)) {
            Some(SwipeRelease::Complete) => TransitionOutcome::Completed,
            Some(SwipeRelease::Cancel) | None => TransitionOutcome::Cancelled,
        };
        match coordinator.finish(pop.token(), outcome) {
            Ok(session) => println!(
                "  session {} {outcome:?}; recognizer now {:?}",
                session.token,
                coordinator.recognizer()
            ),
            Err(err) => eprintln!("{err}"),
        }
    }

    let installed = coordinator.gesture_host().installed;
    println!("custom edge pan installed at exit: {installed}");
}
