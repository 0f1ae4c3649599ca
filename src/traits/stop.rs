// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cooperative stop flag for long-running components.
//!
//! A component owns a `StopSignal`, calls [`StopSignal::arm`] when an iteration
//! begins and polls the returned guard inside its loop. [`StopSignal::stop`]
//! cancels the token shared by every in-flight iteration of that component. A stop
//! that arrives while nothing is running applies to the next iteration that
//! starts, unless [`StopSignal::rearm`] drops it first. When the last iteration
//! holding a cancelled token finishes, the signal re-arms with a fresh token.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct StopSignal {
    inner: Mutex<Armed>,
}

#[derive(Debug)]
struct Armed {
    token: CancellationToken,
    active: usize,
}

impl StopSignal {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Armed {
                token: CancellationToken::new(),
                active: 0,
            }),
        }
    }

    /// Registers an iteration; keep the guard alive for as long as it runs.
    pub fn arm(&self) -> StopGuard<'_> {
        let mut armed = self.lock();
        armed.active += 1;
        StopGuard {
            signal: self,
            token: armed.token.clone(),
        }
    }

    /// Cancels the current token. Safe to call at any time, from any thread.
    pub fn stop(&self) {
        self.lock().token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.lock().token.is_cancelled()
    }

    /// Drops a stop that arrived while no iteration was running.
    ///
    /// A stop aimed at running iterations stays in force.
    pub fn rearm(&self) {
        let mut armed = self.lock();
        if armed.active == 0 && armed.token.is_cancelled() {
            armed.token = CancellationToken::new();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Armed> {
        // a poisoned lock still guards a valid token
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// One running iteration's view of a [`StopSignal`].
#[derive(Debug)]
pub struct StopGuard<'a> {
    signal: &'a StopSignal,
    token: CancellationToken,
}

impl StopGuard<'_> {
    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The underlying token, for code that wants to `select!` on cancellation.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for StopGuard<'_> {
    fn drop(&mut self) {
        let mut armed = self.signal.lock();
        armed.active = armed.active.saturating_sub(1);
        if armed.active == 0 && armed.token.is_cancelled() {
            armed.token = CancellationToken::new();
        }
    }
}
