// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while a component iterates.
//!
//! A `ComponentError` produced by a leaf travels unchanged through every enclosing
//! `Branch`, `Race` and `SimpleIterator`, and through the worker pool's task handles,
//! so the caller observes the original failure wherever it reads the result.

use thiserror::Error;

/// Failure of a single component iteration (or of the machinery delivering it).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// The component's own logic rejected the state or failed to transform it.
    #[error("component '{component}' failed: {message}")]
    Failed { component: String, message: String },

    /// The unit of work panicked on a pool worker.
    #[error("component task panicked: {message}")]
    Panicked { message: String },

    /// The unit of work was dropped before it produced a state.
    #[error("component task was cancelled before completion")]
    Cancelled,

    /// Work was submitted to a pool that has already been shut down.
    #[error("worker pool has been shut down")]
    PoolShutDown,

    /// A fold was handed no states to choose from.
    #[error("nothing to fold: no states were produced")]
    EmptyFold,
}

impl ComponentError {
    /// Shorthand for [`ComponentError::Failed`].
    pub fn failed(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Translates a tokio join failure into the error a caller sees from `result()`.
    pub(crate) fn from_join(err: tokio::task::JoinError) -> Self {
        if err.is_panic() {
            let payload = err.into_panic();
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "non-string panic payload".to_string()
            };
            Self::Panicked { message }
        } else {
            Self::Cancelled
        }
    }
}
