// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::engine::{Branch, StateFuture, StateInput, WorkerPool};
use crate::errors::ComponentError;
use crate::observability::messages::{executor::TaskSubmitted, StructuredLog};
use crate::state::State;

/// The base unit of computation: a blocking, single-step transform over [`State`].
///
/// `iterate` must not change anything the caller can observe through `state`; it
/// returns a new state instead. The same instance may iterate concurrently on
/// independent states submitted through the worker pool, so any interior state a
/// component keeps must be synchronized.
pub trait Component: Send + Sync {
    fn iterate(&self, state: &State) -> Result<State, ComponentError>;

    /// Best-effort request to end an in-flight iteration early.
    ///
    /// Advisory only and never fails. Long-running components hold a
    /// [`StopSignal`](crate::traits::StopSignal) and check it inside their loops.
    fn stop(&self) {}

    /// Drops a stop that reached this component while it was idle, so it cannot
    /// cut short a later iteration. Composites forward it to their children.
    fn rearm(&self) {}

    fn name(&self) -> &str;

    /// Lets sequence composition flatten nested branches.
    fn as_branch(&self) -> Option<&Branch> {
        None
    }
}

/// Shared handle to a component; what pipelines are built from.
pub type ComponentRef = Arc<dyn Component>;

/// Asynchronous entry point available on every shared component.
pub trait Run {
    /// Schedules one iteration on `pool` and returns its handle without blocking.
    ///
    /// `input` may be a plain state, an already resolved [`Present`](crate::engine::Present),
    /// or the handle of an upstream iteration. A pending input is awaited on the pool's
    /// runtime before the iteration is queued; a failed upstream resolves this handle
    /// to the same error.
    fn run(&self, pool: &WorkerPool, input: impl Into<StateInput>) -> StateFuture;
}

impl<C> Run for Arc<C>
where
    C: Component + ?Sized + 'static,
{
    fn run(&self, pool: &WorkerPool, input: impl Into<StateInput>) -> StateFuture {
        let input = input.into();
        TaskSubmitted {
            component: self.name(),
            pending_input: input.is_pending(),
        }
        .log();

        let component = Arc::clone(self);
        pool.submit_state(input, move |state| component.iterate(&state))
    }
}
