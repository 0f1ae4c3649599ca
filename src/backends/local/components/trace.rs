// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use serde_json::json;

use crate::errors::ComponentError;
use crate::state::{State, StateUpdate};
use crate::traits::Component;

/// Configuration for the Trace component
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceConfig {
    pub label: Option<String>,
}

/// Trace component - marks `debug[label] = true` as the state passes through
pub struct Trace {
    label: String,
}

impl Trace {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn from_config(config: TraceConfig) -> Self {
        Self::new(config.label.unwrap_or_else(|| "trace".to_string()))
    }
}

impl Component for Trace {
    fn iterate(&self, state: &State) -> Result<State, ComponentError> {
        tracing::trace!(label = %self.label, "trace component reached");
        Ok(state.updated(StateUpdate::new().debug([(self.label.clone(), json!(true))])))
    }

    fn name(&self) -> &str {
        "trace"
    }
}
