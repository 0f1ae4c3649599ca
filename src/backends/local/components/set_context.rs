// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::errors::ComponentError;
use crate::state::{Fields, State, StateUpdate};
use crate::traits::Component;

/// Configuration for the SetContext component
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetContextConfig {
    #[serde(default)]
    pub values: Fields,
}

/// SetContext component - merges fixed entries into the state's context
pub struct SetContext {
    values: Fields,
}

impl SetContext {
    pub fn new(values: Fields) -> Self {
        Self { values }
    }

    pub fn from_config(config: SetContextConfig) -> Self {
        Self::new(config.values)
    }
}

impl Component for SetContext {
    fn iterate(&self, state: &State) -> Result<State, ComponentError> {
        Ok(state.updated(StateUpdate {
            context: Some(self.values.clone()),
            ..StateUpdate::default()
        }))
    }

    fn name(&self) -> &str {
        "set_context"
    }
}
