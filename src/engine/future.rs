// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Inputs accepted by [`Run::run`](crate::traits::Run::run).
//!
//! A caller may hand a pipeline a plain [`State`], an already resolved
//! [`Present`] wrapper, or the handle of an iteration still in flight. All three
//! collapse into [`StateInput`] so `run` makes one explicit decision instead of
//! probing its argument.

use crate::engine::worker_pool::StateFuture;
use crate::state::State;

/// An already produced value presented through a future-like surface.
///
/// Lets synchronous call sites be treated like asynchronous ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Present<T> {
    value: T,
}

impl<T: Clone> Present<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn result(&self) -> T {
        self.value.clone()
    }

    pub fn done(&self) -> bool {
        true
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// What `run` starts from.
#[derive(Debug)]
pub enum StateInput {
    /// A state available right now.
    Immediate(State),
    /// A state some other iteration is still producing.
    Pending(StateFuture),
}

impl StateInput {
    pub fn is_pending(&self) -> bool {
        matches!(self, StateInput::Pending(_))
    }
}

impl From<State> for StateInput {
    fn from(state: State) -> Self {
        StateInput::Immediate(state)
    }
}

impl From<Present<State>> for StateInput {
    fn from(present: Present<State>) -> Self {
        StateInput::Immediate(present.into_inner())
    }
}

impl From<StateFuture> for StateInput {
    fn from(future: StateFuture) -> Self {
        StateInput::Pending(future)
    }
}
