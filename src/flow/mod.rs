// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Composites built on top of the core: racing branches, folds over their
//! results, and an iteration driver that re-runs a pipeline until it settles.
//!
//! ```text
//!            ┌── branch 0 ──┐
//! state ──▶ Race ── branch 1 ──▶ Fold ──▶ state      (SimpleIterator repeats this)
//!            └── branch 2 ──┘
//! ```

pub mod fold;
pub mod iterator;
pub mod race;

use std::sync::Arc;

use crate::state::State;

pub use fold::{ArgMinFold, Fold};
pub use iterator::SimpleIterator;
pub use race::Race;

/// Ordering key read from a completed state; lower is better.
pub type KeyFn = Arc<dyn Fn(&State) -> Option<f64> + Send + Sync>;

/// Default key: the `energy` recorded in the state's result.
pub fn energy_key() -> KeyFn {
    Arc::new(State::energy)
}
