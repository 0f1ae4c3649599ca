// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for racing composites, folds and iteration drivers.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Race started with the given number of branches.
///
/// # Log Level
/// `debug!`
pub struct RaceStarted {
    pub branch_count: usize,
}

impl Display for RaceStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Race started with {} branches", self.branch_count)
    }
}

impl StructuredLog for RaceStarted {
    fn log(&self) {
        tracing::debug!(branch_count = self.branch_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("race", span_name = name, branch_count = self.branch_count)
    }
}

/// First branch of a race finished; the others are asked to stop.
///
/// # Log Level
/// `debug!`
///
/// # Example
/// ```
/// use hades::observability::messages::flow::RaceFirstCompleted;
/// use std::time::Duration;
///
/// let msg = RaceFirstCompleted {
///     branch_index: 1,
///     branch_count: 3,
///     elapsed: Duration::from_millis(40),
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct RaceFirstCompleted {
    pub branch_index: usize,
    pub branch_count: usize,
    pub elapsed: Duration,
}

impl Display for RaceFirstCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Race branch {} of {} finished first after {:?}; stopping all branches",
            self.branch_index, self.branch_count, self.elapsed
        )
    }
}

impl StructuredLog for RaceFirstCompleted {
    fn log(&self) {
        tracing::debug!(
            branch_index = self.branch_index,
            branch_count = self.branch_count,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "race_first_completed",
            span_name = name,
            branch_index = self.branch_index,
            elapsed = ?self.elapsed,
        )
    }
}

/// Fold picked a state out of several candidates.
///
/// # Log Level
/// `debug!`
pub struct FoldSelected {
    pub selected_index: usize,
    pub candidate_count: usize,
    pub key: Option<f64>,
}

impl Display for FoldSelected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Fold selected state {} of {} (key={:?})",
            self.selected_index, self.candidate_count, self.key
        )
    }
}

impl StructuredLog for FoldSelected {
    fn log(&self) {
        tracing::debug!(
            selected_index = self.selected_index,
            candidate_count = self.candidate_count,
            key = ?self.key,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "fold_selected",
            span_name = name,
            selected_index = self.selected_index,
            candidate_count = self.candidate_count,
        )
    }
}

/// Iteration driver finished.
///
/// # Log Level
/// `info!` - end of a complete solve
pub struct IterationFinished<'a> {
    pub iterations: usize,
    pub reason: &'a str,
    pub key: Option<f64>,
}

impl Display for IterationFinished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Iteration finished after {} iterations ({}), key={:?}",
            self.iterations, self.reason, self.key
        )
    }
}

impl StructuredLog for IterationFinished<'_> {
    fn log(&self) {
        tracing::info!(
            iterations = self.iterations,
            reason = self.reason,
            key = ?self.key,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "iteration_finished",
            span_name = name,
            iterations = self.iterations,
            reason = self.reason,
        )
    }
}
