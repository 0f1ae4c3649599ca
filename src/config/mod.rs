// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod pipeline;
mod runtime;
mod validation;

pub mod consts;

pub use loader::{load_and_validate_config, load_config, Config, ExecutorConfig, FoldKind, StageConfig};
pub use pipeline::PipelineBuilder;
pub use runtime::RuntimeBuilder;
pub use validation::{required_workers, validate_config};
