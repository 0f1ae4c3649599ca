// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use crate::errors::ComponentError;
use crate::state::{State, StateUpdate};
use crate::traits::Component;

/// A stub component that passes its input through unchanged
pub struct StubComponent {
    pub id: String,
}

impl StubComponent {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl Component for StubComponent {
    fn iterate(&self, state: &State) -> Result<State, ComponentError> {
        Ok(state.clone())
    }

    fn name(&self) -> &str {
        &self.id
    }
}

/// A component that always fails for testing failure scenarios
pub struct FailingComponent {
    pub id: String,
    pub message: String,
}

impl FailingComponent {
    pub fn new(id: &str, message: &str) -> Self {
        Self {
            id: id.to_string(),
            message: message.to_string(),
        }
    }
}

impl Component for FailingComponent {
    fn iterate(&self, _state: &State) -> Result<State, ComponentError> {
        Err(ComponentError::failed(&self.id, &self.message))
    }

    fn name(&self) -> &str {
        &self.id
    }
}

/// A component that panics for testing panic capture on pool workers
pub struct PanickingComponent;

impl Component for PanickingComponent {
    fn iterate(&self, _state: &State) -> Result<State, ComponentError> {
        panic!("panicking component reached")
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

/// Records every `iterate` and `stop` call into a shared log.
///
/// `iterate` appends the label to `context["path"]` so tests can see the order
/// states flowed through.
pub struct RecordingComponent {
    pub label: String,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl RecordingComponent {
    pub fn new(label: &str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            label: label.to_string(),
            log,
        }
    }
}

impl Component for RecordingComponent {
    fn iterate(&self, state: &State) -> Result<State, ComponentError> {
        self.log.lock().unwrap().push(format!("iterate:{}", self.label));

        let mut path = match state.context.get("path") {
            Some(Value::Array(path)) => path.clone(),
            _ => Vec::new(),
        };
        path.push(json!(self.label));
        Ok(state.updated(StateUpdate::new().context([("path", Value::Array(path))])))
    }

    fn stop(&self) {
        self.log.lock().unwrap().push(format!("stop:{}", self.label));
    }

    fn name(&self) -> &str {
        &self.label
    }
}
