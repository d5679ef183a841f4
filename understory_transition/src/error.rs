// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequencing errors reported by the coordinator.
//!
//! Resolution problems are not errors; see
//! [`ResolveDiagnostic`](crate::resolver::ResolveDiagnostic). The errors here mean
//! the host integration delivered callbacks out of order. The offending call is
//! rejected without touching recognizer state, so falling back to the standard
//! transition is always safe.

use crate::coordinator::SessionToken;
use crate::types::NavigationOperation;

/// Host sequencing error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// A navigation event arrived while another session was still active.
    #[error("{rejected} requested while session {active} is still active")]
    ConcurrentSession {
        /// Session that is still in flight.
        active: SessionToken,
        /// Operation of the rejected event.
        rejected: NavigationOperation,
    },
    /// Completion was reported for a session that is not the active one.
    #[error("completion reported for session {got}, but the active session is {active:?}")]
    StaleSession {
        /// Active session, if any.
        active: Option<SessionToken>,
        /// Token the host reported.
        got: SessionToken,
    },
}
