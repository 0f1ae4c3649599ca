// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, Instant};

use crate::config::consts::STOP_POLL_INTERVAL_MS;
use crate::errors::ComponentError;
use crate::state::{State, StateUpdate};
use crate::traits::{Component, StopSignal};

/// Debug key recording how a sleep ended.
pub const SLEEP_DEBUG_KEY: &str = "sleep";

/// Configuration for the Sleep component
#[derive(Debug, Clone, Deserialize)]
pub struct SleepConfig {
    pub millis: u64,
}

/// Sleep component - blocks for a fixed time, or until stopped.
///
/// Stands in for an interruptible search loop: it polls its stop signal between
/// short naps and returns as soon as a stop arrives.
pub struct Sleep {
    duration: Duration,
    signal: StopSignal,
}

impl Sleep {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            signal: StopSignal::new(),
        }
    }

    pub fn from_config(config: SleepConfig) -> Self {
        Self::new(Duration::from_millis(config.millis))
    }
}

impl Component for Sleep {
    fn iterate(&self, state: &State) -> Result<State, ComponentError> {
        let guard = self.signal.arm();
        let started = Instant::now();
        let poll = Duration::from_millis(STOP_POLL_INTERVAL_MS);

        let mut interrupted = false;
        while started.elapsed() < self.duration {
            if guard.is_stopped() {
                interrupted = true;
                break;
            }
            let remaining = self.duration.saturating_sub(started.elapsed());
            std::thread::sleep(remaining.min(poll));
        }

        Ok(state.updated(StateUpdate::new().debug([(
            SLEEP_DEBUG_KEY,
            json!({
                "slept_ms": started.elapsed().as_millis() as u64,
                "interrupted": interrupted,
            }),
        )])))
    }

    fn stop(&self) {
        self.signal.stop();
    }

    fn rearm(&self) {
        self.signal.rearm();
    }

    fn name(&self) -> &str {
        "sleep"
    }
}
