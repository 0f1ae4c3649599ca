// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::{validate_config, Config, PipelineBuilder};
use crate::engine::{Branch, WorkerPool};
use crate::errors::ConfigError;

/// Runtime builder - creates the worker pool and the pipeline from configuration.
///
/// # Examples
///
/// ```
/// use hades::config::{Config, RuntimeBuilder};
/// use hades::state::State;
/// use hades::traits::Run;
///
/// let config: Config = serde_yaml::from_str(
///     "pipeline:\n  - type: local\n    component: trace\n    options: { label: seen }\n",
/// )
/// .unwrap();
///
/// let (pool, pipeline) = RuntimeBuilder::from_config(&config).unwrap();
/// let out = pipeline.into_ref().run(&pool, State::new()).result().unwrap();
///
/// assert_eq!(out.debug["seen"], serde_json::json!(true));
/// pool.shutdown();
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Validates `cfg`, then builds the shared pool and the pipeline that uses it.
    pub fn from_config(cfg: &Config) -> Result<(Arc<WorkerPool>, Branch), ConfigError> {
        validate_config(cfg).map_err(ConfigError::Invalid)?;
        let pool = Arc::new(WorkerPool::from_config(&cfg.executor)?);
        let pipeline = PipelineBuilder::from_config(cfg, &pool)?;
        Ok((pool, pipeline))
    }
}
