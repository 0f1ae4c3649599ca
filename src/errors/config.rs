// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::CompositionError;

/// Errors raised while loading or validating a pipeline configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// One or more validation rules failed; every message is kept.
    #[error("configuration validation failed:\n{}", .0.join("\n"))]
    Invalid(Vec<String>),

    #[error(transparent)]
    Composition(#[from] CompositionError),
}
