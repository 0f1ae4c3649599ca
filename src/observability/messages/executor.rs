// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the worker pool lifecycle.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Worker pool created.
///
/// # Log Level
/// `info!` - happens once per process
///
/// # Example
/// ```
/// use hades::observability::messages::executor::WorkerPoolStarted;
///
/// let msg = WorkerPoolStarted {
///     max_workers: 4,
///     owns_runtime: true,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct WorkerPoolStarted {
    pub max_workers: usize,
    pub owns_runtime: bool,
}

impl Display for WorkerPoolStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Worker pool started: max_workers={}, owns_runtime={}",
            self.max_workers, self.owns_runtime
        )
    }
}

impl StructuredLog for WorkerPoolStarted {
    fn log(&self) {
        tracing::info!(
            max_workers = self.max_workers,
            owns_runtime = self.owns_runtime,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "worker_pool",
            span_name = name,
            max_workers = self.max_workers,
            owns_runtime = self.owns_runtime,
        )
    }
}

/// Unit of work submitted to the pool.
///
/// # Log Level
/// `trace!` - one per iteration
pub struct TaskSubmitted<'a> {
    pub component: &'a str,
    pub pending_input: bool,
}

impl Display for TaskSubmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Submitted '{}' to worker pool (pending_input={})",
            self.component, self.pending_input
        )
    }
}

impl StructuredLog for TaskSubmitted<'_> {
    fn log(&self) {
        tracing::trace!(
            component = self.component,
            pending_input = self.pending_input,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "task_submitted",
            span_name = name,
            component = self.component,
        )
    }
}

/// Submission refused because the pool was already shut down.
///
/// # Log Level
/// `warn!`
pub struct SubmissionRejected<'a> {
    pub component: &'a str,
}

impl Display for SubmissionRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected '{}': worker pool is shut down", self.component)
    }
}

impl StructuredLog for SubmissionRejected<'_> {
    fn log(&self) {
        tracing::warn!(component = self.component, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("submission_rejected", span_name = name, component = self.component)
    }
}

/// Worker pool shut down.
///
/// # Log Level
/// `info!`
pub struct WorkerPoolShutdown {
    pub timeout: Duration,
}

impl Display for WorkerPoolShutdown {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Worker pool shutting down (timeout {:?})", self.timeout)
    }
}

impl StructuredLog for WorkerPoolShutdown {
    fn log(&self) {
        tracing::info!(timeout_ms = self.timeout.as_millis() as u64, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("worker_pool_shutdown", span_name = name, timeout = ?self.timeout)
    }
}
