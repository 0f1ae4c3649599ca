// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Every diagnostic line the runtime emits is a small struct with a `Display`
//! implementation and a [`StructuredLog`](messages::StructuredLog) implementation
//! that picks the level and the structured fields. Call sites never format log
//! text themselves.
//!
//! # Usage
//!
//! ```rust
//! use hades::observability::messages::{engine::ComponentFailed, StructuredLog};
//! use hades::errors::ComponentError;
//!
//! let error = ComponentError::failed("tabu", "no samples");
//! ComponentFailed {
//!     component: "tabu",
//!     position: 0,
//!     error: &error,
//! }
//! .log();
//! ```
//!
//! The binary installs a `tracing-subscriber` fmt layer filtered by `RUST_LOG`;
//! the library only emits events.

pub mod messages;
