// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator configuration.

/// Tunables for the [`Coordinator`](crate::Coordinator).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransitionConfig {
    /// Global toggle. When `false` every navigation uses the standard transition.
    pub enabled: bool,
    /// Fraction of the container width past which a released interactive pop completes.
    pub completion_threshold: f64,
    /// Horizontal release velocity (points/second) past which an interactive pop
    /// completes regardless of progress.
    pub velocity_threshold: f64,
    /// Width of the leading-edge strip in which an interactive pop may begin.
    pub edge_width: f64,
}

impl Default for TransitionConfig {
    /// Halfway across the container, 300 points/second, and a 20 point edge strip.
    fn default() -> Self {
        Self {
            enabled: true,
            completion_threshold: 0.5,
            velocity_threshold: 300.0,
            edge_width: 20.0,
        }
    }
}

impl TransitionConfig {
    /// Configuration with shared transitions switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}
