// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for branch iteration and stop propagation.

use crate::errors::ComponentError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Branch iteration started.
///
/// # Log Level
/// `debug!` - branches iterate on every step of a driver loop
pub struct BranchIterationStarted {
    pub component_count: usize,
}

impl Display for BranchIterationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Branch iteration started: {} components", self.component_count)
    }
}

impl StructuredLog for BranchIterationStarted {
    fn log(&self) {
        tracing::debug!(component_count = self.component_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "branch_iteration",
            span_name = name,
            component_count = self.component_count,
        )
    }
}

/// Branch iteration completed.
///
/// # Log Level
/// `debug!`
pub struct BranchIterationCompleted {
    pub component_count: usize,
    pub duration: Duration,
}

impl Display for BranchIterationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Branch iteration completed: {} components in {:?}",
            self.component_count, self.duration
        )
    }
}

impl StructuredLog for BranchIterationCompleted {
    fn log(&self) {
        tracing::debug!(
            component_count = self.component_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "branch_iteration_completed",
            span_name = name,
            component_count = self.component_count,
            duration = ?self.duration,
        )
    }
}

/// A component inside a branch failed; the error propagates unchanged.
///
/// # Log Level
/// `warn!` - the failure is returned to the caller, which decides what to do
///
/// # Example
/// ```
/// use hades::errors::ComponentError;
/// use hades::observability::messages::engine::ComponentFailed;
///
/// let error = ComponentError::failed("decomposer", "empty problem");
/// let msg = ComponentFailed {
///     component: "decomposer",
///     position: 2,
///     error: &error,
/// };
///
/// assert!(msg.to_string().contains("position 2"));
/// ```
pub struct ComponentFailed<'a> {
    pub component: &'a str,
    pub position: usize,
    pub error: &'a ComponentError,
}

impl Display for ComponentFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Component '{}' at position {} failed: {}",
            self.component, self.position, self.error
        )
    }
}

impl StructuredLog for ComponentFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            component = self.component,
            position = self.position,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "component_failed",
            span_name = name,
            component = self.component,
            position = self.position,
        )
    }
}

/// Stop requested on a composite; forwarded to every child.
///
/// # Log Level
/// `debug!`
pub struct StopForwarded<'a> {
    pub composite: &'a str,
    pub child_count: usize,
}

impl Display for StopForwarded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stop requested on '{}', forwarding to {} children",
            self.composite, self.child_count
        )
    }
}

impl StructuredLog for StopForwarded<'_> {
    fn log(&self) {
        tracing::debug!(
            composite = self.composite,
            child_count = self.child_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stop_forwarded",
            span_name = name,
            composite = self.composite,
            child_count = self.child_count,
        )
    }
}
