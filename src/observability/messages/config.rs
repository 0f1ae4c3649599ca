// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration loading and pipeline building.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Configuration file loaded and parsed.
///
/// # Log Level
/// `info!`
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub stage_count: usize,
    pub max_workers: usize,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded pipeline config '{}': {} top-level stages, max_workers={}",
            self.path, self.stage_count, self.max_workers
        )
    }
}

impl StructuredLog for ConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            stage_count = self.stage_count,
            max_workers = self.max_workers,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("config_loaded", span_name = name, path = self.path)
    }
}

/// Validation rule failed.
///
/// # Log Level
/// `error!`
pub struct ValidationFailed<'a> {
    pub rule: &'a str,
    pub detail: &'a str,
}

impl Display for ValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Config validation failed ({}): {}", self.rule, self.detail)
    }
}

impl StructuredLog for ValidationFailed<'_> {
    fn log(&self) {
        tracing::error!(rule = self.rule, detail = self.detail, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("validation_failed", span_name = name, rule = self.rule)
    }
}

/// Pipeline built from configuration.
///
/// # Log Level
/// `debug!`
pub struct PipelineBuilt {
    pub leaf_count: usize,
}

impl Display for PipelineBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Pipeline built with {} top-level components", self.leaf_count)
    }
}

impl StructuredLog for PipelineBuilt {
    fn log(&self) {
        tracing::debug!(leaf_count = self.leaf_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("pipeline_built", span_name = name, leaf_count = self.leaf_count)
    }
}
