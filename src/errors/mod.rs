// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod component;
mod composition;
mod config;

pub use component::ComponentError;
pub use composition::CompositionError;
pub use config::ConfigError;
