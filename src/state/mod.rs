// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Computation state threaded through every component of a pipeline.
//!
//! A [`State`] carries three fields:
//!
//! * `result` - the payload produced by the last component; replace-only
//! * `context` - side information components leave for downstream components
//! * `debug` - tracing and diagnostics, never read by production logic
//!
//! States are values. Components receive `&State` and return a new `State`;
//! [`State::updated`] builds that new value from a [`StateUpdate`] without touching
//! the original. All payloads are owned `serde_json` values, so a clone is a deep
//! copy and two states never share mutable substructure.
//!
//! # Example
//! ```rust
//! use hades::state::{State, StateUpdate};
//! use serde_json::json;
//!
//! let state = State::new().with_context([("a", json!(1)), ("b", json!(2))]);
//! let next = state.updated(StateUpdate::new().context([("b", json!(3)), ("c", json!(4))]));
//!
//! assert_eq!(next.context, json!({"a": 1, "b": 3, "c": 4}).as_object().cloned().unwrap());
//! assert_eq!(state.context["b"], json!(2));
//! ```

mod merge;

pub use merge::{merge_fields, merge_one_level};

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Key of the candidate inside a result built by [`State::from_candidate`].
pub const SAMPLE_KEY: &str = "sample";

/// Key of the ordering value inside a result built by [`State::from_candidate`].
pub const ENERGY_KEY: &str = "energy";

/// String-keyed mapping used for `context` and `debug`.
pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub context: Fields,
    #[serde(default)]
    pub debug: Fields,
}

impl State {
    /// Empty state: no result, empty context and debug.
    pub fn new() -> Self {
        Self::default()
    }

    /// State wrapping an already completed result.
    pub fn from_result(result: Value) -> Self {
        Self {
            result: Some(result),
            ..Self::default()
        }
    }

    /// Initial state for a raw candidate scored by `objective`.
    ///
    /// The result becomes `{"sample": candidate, "energy": objective(candidate)}`,
    /// which is what [`State::energy`] and the default fold key read back.
    pub fn from_candidate<F>(candidate: Value, objective: F) -> Self
    where
        F: FnOnce(&Value) -> f64,
    {
        let energy = objective(&candidate);
        let mut result = Fields::new();
        result.insert(SAMPLE_KEY.to_string(), candidate);
        result.insert(ENERGY_KEY.to_string(), json!(energy));
        Self::from_result(Value::Object(result))
    }

    /// Builder-style variant of a context update, used mostly to seed states.
    pub fn with_context<K, I>(self, entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        self.updated(StateUpdate::new().context(entries))
    }

    /// Ordering key of the result, if it carries one.
    ///
    /// Reads `result["energy"]` as a number; any other shape has no key.
    pub fn energy(&self) -> Option<f64> {
        self.result.as_ref()?.get(ENERGY_KEY)?.as_f64()
    }

    /// Returns a new state with `update` applied.
    ///
    /// `result` is replaced whenever the update carries one. `context` and `debug`
    /// take the one-level merge of [`merge_fields`]. Fields the update leaves out
    /// are copied from `self`.
    pub fn updated(&self, update: StateUpdate) -> State {
        let StateUpdate {
            result,
            context,
            debug,
        } = update;

        State {
            result: match result {
                Some(result) => Some(result),
                None => self.result.clone(),
            },
            context: match context {
                Some(context) => merge_fields(&self.context, &context),
                None => self.context.clone(),
            },
            debug: match debug {
                Some(debug) => merge_fields(&self.debug, &debug),
                None => self.debug.clone(),
            },
        }
    }

    /// Explicit deep copy, used when handing a state across a concurrency boundary.
    pub fn copy(&self) -> State {
        self.clone()
    }
}

/// Field-level update applied by [`State::updated`].
///
/// Every field is optional; an absent field leaves the base value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub result: Option<Value>,
    pub context: Option<Fields>,
    pub debug: Option<Fields>,
}

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(mut self, result: Value) -> Self {
        self.result = Some(result);
        self
    }

    /// Adds context entries; calling it twice accumulates entries.
    pub fn context<K, I>(mut self, entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        extend(self.context.get_or_insert_with(Fields::new), entries);
        self
    }

    /// Adds debug entries; calling it twice accumulates entries.
    pub fn debug<K, I>(mut self, entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        extend(self.debug.get_or_insert_with(Fields::new), entries);
        self
    }
}

fn extend<K, I>(fields: &mut Fields, entries: I)
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    for (key, value) in entries {
        fields.insert(key.into(), value);
    }
}
