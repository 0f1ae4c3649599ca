// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_CONVERGENCE, DEFAULT_MAX_ITER, DEFAULT_MAX_WORKERS};
use crate::errors::ConfigError;
use crate::observability::messages::config::ConfigLoaded;
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure: the worker pool plus the pipeline it runs.
///
/// # Fields
/// * `executor` - Worker pool options (optional, defaults apply)
/// * `pipeline` - Stages run in order; each is a local component, a race or a loop
///
/// # Example
/// ```yaml
/// executor:
///   max_workers: 4
/// pipeline:
///   - type: local
///     component: set_context
///     options:
///       values: { source: "config" }
///   - type: race
///     fold: argmin
///     branches:
///       - - type: local
///           component: set_result
///           options: { result: { energy: 1.0 } }
///       - - type: local
///           component: set_result
///           options: { result: { energy: -1.0 } }
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub executor: ExecutorConfig,
    pub pipeline: Vec<StageConfig>,
}

/// Worker pool options.
///
/// # Fields
/// * `max_workers` - Units of work allowed to run at once (defaults to 4)
/// * `thread_name` - Name of the pool's runtime threads
/// * `shutdown_timeout_ms` - How long shutdown waits for running work
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutorConfig {
    pub max_workers: Option<usize>,
    pub thread_name: Option<String>,
    pub shutdown_timeout_ms: Option<u64>,
}

impl ExecutorConfig {
    pub fn effective_max_workers(&self) -> usize {
        self.max_workers.unwrap_or(DEFAULT_MAX_WORKERS)
    }
}

/// One stage of a pipeline.
///
/// # Variants
/// * `Local` - A component from the local factory, with its options
/// * `Race` - Branches raced against each other, reduced by a fold
/// * `Loop` - Stages re-run until their result converges
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StageConfig {
    Local {
        component: String,
        #[serde(default)]
        options: serde_yaml::Value,
    },
    Race {
        branches: Vec<Vec<StageConfig>>,
        #[serde(default)]
        fold: FoldKind,
    },
    Loop {
        stages: Vec<StageConfig>,
        #[serde(default = "default_max_iter")]
        max_iter: usize,
        #[serde(default = "default_convergence")]
        convergence: usize,
    },
}

/// How a race reduces its branches' states.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FoldKind {
    /// Lowest `energy` wins
    #[default]
    Argmin,
}

fn default_max_iter() -> usize {
    DEFAULT_MAX_ITER
}

fn default_convergence() -> usize {
    DEFAULT_CONVERGENCE
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path.as_ref())?;
    let cfg: Config = serde_yaml::from_str(&content)?;

    ConfigLoaded {
        path: &path.as_ref().display().to_string(),
        stage_count: cfg.pipeline.len(),
        max_workers: cfg.executor.effective_max_workers(),
    }
    .log();

    Ok(cfg)
}

/// Load and validate a config from a YAML file
///
/// Every validation problem is collected and reported together.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
executor:
  max_workers: 3
pipeline:
  - type: local
    component: identity
  - type: race
    branches:
      - - type: local
          component: trace
      - - type: local
          component: sleep
          options: { millis: 5 }
  - type: loop
    max_iter: 7
    stages:
      - type: local
        component: identity
"#;

        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.executor.max_workers, Some(3));
        assert_eq!(cfg.pipeline.len(), 3);
        assert!(matches!(
            &cfg.pipeline[1],
            StageConfig::Race { branches, fold: FoldKind::Argmin } if branches.len() == 2
        ));
        assert!(matches!(
            &cfg.pipeline[2],
            StageConfig::Loop { max_iter: 7, convergence: DEFAULT_CONVERGENCE, .. }
        ));
    }

    #[test]
    fn executor_section_is_optional() {
        let cfg: Config = serde_yaml::from_str("pipeline: []").unwrap();
        assert_eq!(cfg.executor.effective_max_workers(), DEFAULT_MAX_WORKERS);
        assert!(cfg.executor.thread_name.is_none());
    }

    #[test]
    fn unknown_stage_type_fails_to_parse() {
        let yaml = "pipeline:\n  - type: teleport\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_load_and_validate_valid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "pipeline:\n  - type: local\n    component: set_context\n    options:\n      values: {{ a: 1 }}"
        )
        .unwrap();

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.pipeline.len(), 1);
    }

    #[test]
    fn test_load_and_validate_reports_problems() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "executor:\n  max_workers: 0\npipeline: []").unwrap();

        match load_and_validate_config(file.path()) {
            Err(ConfigError::Invalid(problems)) => assert_eq!(problems.len(), 2),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_config("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
