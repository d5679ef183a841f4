// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any
// missing links
// cargo rdme --workspace-project=understory_transition --heading-base-level=0

//! Understory Transition: shared-element transitions for navigation stacks.
//!
//! ## Overview
//!
//! When a screen is pushed or popped, some elements of the outgoing screen should
//! morph into their counterparts on the incoming screen. This crate decides
//! *which* elements match and *whether* the host should play a shared transition,
//! an interactive (swipe-driven) one, or its own default. It does not animate
//! anything; the host's animation runtime receives the matched views and plays
//! them.
//!
//! ## Pieces
//!
//! - [`TransitionMap`]: per screen and transition group, the
//!   [`TransitionDescriptor`]s (view tag + transition name) of attached elements.
//! - [`resolve`]: matches destination descriptors to source descriptors by name,
//!   breaking ties between duplicates (left behind by list recycling) in favor of
//!   the greatest tag, and drops anything without a live view.
//! - [`Coordinator`]: the state machine run on every navigation event. It picks
//!   the registry entries, resolves them, and either returns
//!   [`TransitionPlan::Standard`] or an [`InteractiveTransitionDriver`]. It is the
//!   sole owner of the custom edge recognizer ([`gesture`]) and rejects a
//!   navigation event that arrives while another session is active.
//! - [`LifecycleForwarder`]: passes every lifecycle notification to previously
//!   installed observers, whatever branch the coordinator took.
//!
//! ## Workflow
//!
//! ```
//! use hashbrown::HashMap;
//! use understory_transition::gesture::NoGesture;
//! use understory_transition::{
//!     Coordinator, NavigationEvent, TransitionDescriptor, TransitionMap, TransitionOutcome,
//!     ViewTag,
//! };
//!
//! // Screen 1 lists cards; row "r7" is selected. Screen 2 shows the card in detail.
//! let mut map = TransitionMap::new();
//! map.register(1_u32, TransitionDescriptor::new(ViewTag(70), "card").with_group("r7"));
//! map.register(2_u32, TransitionDescriptor::new(ViewTag(3), "card"));
//!
//! let list: HashMap<ViewTag, &str> = [(ViewTag(70), "list-card")].into_iter().collect();
//! let detail: HashMap<ViewTag, &str> = [(ViewTag(3), "detail-card")].into_iter().collect();
//!
//! let mut coordinator = Coordinator::new(NoGesture);
//! let event = NavigationEvent::push(&1, &2).with_group(Some("r7"));
//! let plan = coordinator.on_will_transition(&map, event, &list, &detail).unwrap();
//!
//! let driver = plan.driver().expect("cards match");
//! assert_eq!(driver.pairs()[0].outgoing, "list-card");
//! assert_eq!(driver.pairs()[0].incoming, "detail-card");
//!
//! // The host plays the animation, then closes the session.
//! coordinator.finish(plan.token(), TransitionOutcome::Completed).unwrap();
//! ```
//!
//! ## Diagnostics
//!
//! Resolution problems are reported on the [`Resolution`] value and logged with
//! `tracing` under the `understory_transition` target. Sequencing mistakes by the
//! host surface as [`TransitionError`].
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod config;
pub mod coordinator;
pub mod driver;
pub mod error;
pub mod forwarder;
pub mod gesture;
pub mod lookup;
pub mod registry;
pub mod resolver;
pub mod types;

pub use config::TransitionConfig;
pub use coordinator::{
    Coordinator, CoordinatorPhase, NavigationEvent, SessionToken, TransitionOutcome,
    TransitionSession,
};
pub use driver::{InteractiveTransitionDriver, TransitionPlan};
pub use error::TransitionError;
pub use forwarder::{LifecycleEvent, LifecycleForwarder, LifecycleObserver};
pub use lookup::ViewLookup;
pub use registry::TransitionMap;
pub use resolver::{Resolution, ResolveDiagnostic, resolve};
pub use types::{MatchedPair, NavigationOperation, TransitionDescriptor, ViewTag};
