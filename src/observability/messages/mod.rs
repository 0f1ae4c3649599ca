// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `engine` - branch iteration and stop propagation
//! * `executor` - worker pool lifecycle and task scheduling
//! * `flow` - racing composites, folds and iteration drivers
//! * `config` - pipeline configuration loading and building

use tracing::Span;

pub mod config;
pub mod engine;
pub mod executor;
pub mod flow;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emits the message as a tracing event.
    fn log(&self);

    /// Opens a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
