// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::components::*;
use crate::errors::CompositionError;
use crate::traits::ComponentRef;

/// Factory for creating local (in-process) components by name
pub struct LocalComponentFactory;

impl LocalComponentFactory {
    /// Create a component instance from its name and options.
    ///
    /// - "identity" -> Identity
    /// - "set_context" -> SetContext (`values`: mapping merged into context)
    /// - "set_result" -> SetResult (`result`: value that replaces the result)
    /// - "trace" -> Trace (`label`: debug key, defaults to "trace")
    /// - "sleep" -> Sleep (`millis`: how long to block unless stopped)
    pub fn create_component(
        name: &str,
        options: &serde_yaml::Value,
    ) -> Result<ComponentRef, CompositionError> {
        match name {
            "identity" => Ok(Arc::new(Identity::new())),
            "set_context" => Ok(Arc::new(SetContext::from_config(parse_options(name, options)?))),
            "set_result" => Ok(Arc::new(SetResult::from_config(parse_options(name, options)?))),
            "trace" => Ok(Arc::new(Trace::from_config(parse_options(name, options)?))),
            "sleep" => Ok(Arc::new(Sleep::from_config(parse_options(name, options)?))),
            _ => Err(CompositionError::UnknownComponent {
                name: name.to_string(),
                available: Self::list_available_implementations(),
            }),
        }
    }

    /// List all available local component implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec!["identity", "set_context", "set_result", "trace", "sleep"]
    }

    pub fn is_implementation_available(name: &str) -> bool {
        Self::list_available_implementations().contains(&name)
    }
}

/// Deserializes component options; absent options read as an empty mapping so
/// required fields are still reported by name.
fn parse_options<T: DeserializeOwned>(
    component: &str,
    options: &serde_yaml::Value,
) -> Result<T, CompositionError> {
    let options = match options {
        serde_yaml::Value::Null => serde_yaml::Value::Mapping(serde_yaml::Mapping::new()),
        other => other.clone(),
    };
    serde_yaml::from_value(options).map_err(|e| CompositionError::InvalidOptions {
        component: component.to_string(),
        reason: e.to_string(),
    })
}
