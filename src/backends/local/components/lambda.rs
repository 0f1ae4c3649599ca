// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ComponentError;
use crate::state::State;
use crate::traits::Component;

type IterateFn = dyn Fn(&State) -> Result<State, ComponentError> + Send + Sync;

/// Component backed by a closure.
///
/// ```rust
/// use hades::backends::local::Lambda;
/// use hades::state::{State, StateUpdate};
/// use hades::traits::Component;
/// use serde_json::json;
///
/// let tag = Lambda::new("tag", |state: &State| {
///     Ok(state.updated(StateUpdate::new().context([("tagged", json!(true))])))
/// });
///
/// let out = tag.iterate(&State::new()).unwrap();
/// assert_eq!(out.context["tagged"], json!(true));
/// ```
pub struct Lambda {
    name: String,
    iterate: Box<IterateFn>,
}

impl Lambda {
    pub fn new<F>(name: impl Into<String>, iterate: F) -> Self
    where
        F: Fn(&State) -> Result<State, ComponentError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            iterate: Box::new(iterate),
        }
    }
}

impl Component for Lambda {
    fn iterate(&self, state: &State) -> Result<State, ComponentError> {
        (self.iterate)(state)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
