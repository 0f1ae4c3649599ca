// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde_json::json;

use crate::errors::ComponentError;
use crate::flow::{energy_key, KeyFn};
use crate::observability::messages::{flow::IterationFinished, StructuredLog};
use crate::state::{State, StateUpdate};
use crate::traits::{Component, ComponentRef, StopSignal};

/// Debug key holding the number of iterations the driver ran.
pub const ITERATIONS_KEY: &str = "iterations";

/// Re-runs a component on its own output until the result settles.
///
/// Ends after `max_iter` iterations, once the key has stayed the same for
/// `convergence` consecutive iterations, or when stopped. The inner component's
/// errors end the loop and propagate unchanged.
pub struct SimpleIterator {
    inner: ComponentRef,
    max_iter: usize,
    convergence: usize,
    key: KeyFn,
    signal: StopSignal,
}

impl SimpleIterator {
    pub fn new(inner: ComponentRef, max_iter: usize, convergence: usize) -> Self {
        Self {
            inner,
            max_iter,
            convergence,
            key: energy_key(),
            signal: StopSignal::new(),
        }
    }

    /// Judges convergence by `key` instead of [`State::energy`].
    pub fn with_key<F>(mut self, key: F) -> Self
    where
        F: Fn(&State) -> Option<f64> + Send + Sync + 'static,
    {
        let key: KeyFn = Arc::new(key);
        self.key = key;
        self
    }
}

impl Component for SimpleIterator {
    fn iterate(&self, state: &State) -> Result<State, ComponentError> {
        let guard = self.signal.arm();

        let mut current = state.clone();
        let mut last_key = (self.key)(&current);
        let mut unchanged = 0;
        let mut iterations = 0;
        let mut reason = "max_iter";

        while iterations < self.max_iter {
            if guard.is_stopped() {
                reason = "stopped";
                break;
            }

            current = self.inner.iterate(&current)?;
            iterations += 1;

            let key = (self.key)(&current);
            if key == last_key {
                unchanged += 1;
            } else {
                unchanged = 0;
                last_key = key;
            }
            if unchanged >= self.convergence {
                reason = "converged";
                break;
            }
        }

        IterationFinished {
            iterations,
            reason,
            key: last_key,
        }
        .log();

        Ok(current.updated(StateUpdate::new().debug([(ITERATIONS_KEY, json!(iterations))])))
    }

    fn stop(&self) {
        self.signal.stop();
        self.inner.stop();
    }

    fn rearm(&self) {
        self.signal.rearm();
        self.inner.rearm();
    }

    fn name(&self) -> &str {
        "simple_iterator"
    }
}
