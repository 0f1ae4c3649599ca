// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ComponentError;
use crate::state::State;
use crate::traits::Component;

/// Identity component - returns its input unchanged
#[derive(Debug, Default)]
pub struct Identity;

impl Identity {
    pub fn new() -> Self {
        Self
    }
}

impl Component for Identity {
    fn iterate(&self, state: &State) -> Result<State, ComponentError> {
        Ok(state.clone())
    }

    fn name(&self) -> &str {
        "identity"
    }
}
