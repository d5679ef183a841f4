// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixtures shared by the Understory Transition demos.

use understory_transition::TransitionPlan;
use understory_transition::gesture::EdgeGestureHost;

/// Screens of the demo navigation stack.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// A recycled list of contacts.
    List,
    /// One contact in detail.
    Detail,
}

/// Stand-in for the platform's custom edge-pan recognizer.
#[derive(Debug, Default)]
pub struct EdgePan {
    /// Whether the custom recognizer is currently installed.
    pub installed: bool,
}

impl EdgeGestureHost for EdgePan {
    fn arm(&mut self) {
        self.installed = true;
        println!("  [platform] custom edge pan installed, default back swipe suspended");
    }

    fn disarm(&mut self) {
        self.installed = false;
        println!("  [platform] custom edge pan removed, default back swipe restored");
    }
}

/// Print what the host would do with `plan`.
pub fn describe(plan: &TransitionPlan<&'static str>) {
    match plan {
        TransitionPlan::Standard(token) => println!("  session {token}: standard transition"),
        TransitionPlan::Shared(driver) => {
            println!(
                "  session {}: shared {} (interactive: {})",
                driver.token(),
                driver.operation(),
                driver.is_interactive()
            );
            for pair in driver.pairs() {
                println!("    {} -> {}", pair.outgoing, pair.incoming);
            }
        }
    }
}
