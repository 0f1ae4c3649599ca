// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for building pipelines out of configuration.
//!
//! Static composition (`sequence`, `Branch::then`) is checked by the type system;
//! these errors cover the dynamic surface where a pipeline is assembled from data.
//! They are always reported while building, never deferred to iteration time.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    /// A stage names a component the factory does not know.
    #[error("unknown component '{name}'; available: {}", available.join(", "))]
    UnknownComponent {
        name: String,
        available: Vec<&'static str>,
    },

    /// A component exists but its options do not describe a valid instance.
    #[error("invalid options for component '{component}': {reason}")]
    InvalidOptions { component: String, reason: String },

    /// A racing composite needs at least one branch to race.
    #[error("race stage has no branches")]
    EmptyRace,
}
