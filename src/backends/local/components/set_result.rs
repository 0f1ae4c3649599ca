// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use serde_json::Value;

use crate::errors::ComponentError;
use crate::state::{State, StateUpdate};
use crate::traits::Component;

/// Configuration for the SetResult component
#[derive(Debug, Clone, Deserialize)]
pub struct SetResultConfig {
    pub result: Value,
}

/// SetResult component - replaces the state's result with a fixed value
pub struct SetResult {
    result: Value,
}

impl SetResult {
    pub fn new(result: Value) -> Self {
        Self { result }
    }

    pub fn from_config(config: SetResultConfig) -> Self {
        Self::new(config.result)
    }
}

impl Component for SetResult {
    fn iterate(&self, state: &State) -> Result<State, ComponentError> {
        Ok(state.updated(StateUpdate::new().result(self.result.clone())))
    }

    fn name(&self) -> &str {
        "set_result"
    }
}
