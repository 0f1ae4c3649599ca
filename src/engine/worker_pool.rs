// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Bounded worker pool shared by every component of a process.
//!
//! The pool decouples the caller's thread from the blocking `iterate` calls it
//! schedules. It sits on a tokio runtime, either its own or one the application
//! already runs, and gates every unit of work behind a semaphore with
//! `max_workers` permits. Work beyond that limit waits for a permit; the blocking
//! body itself runs on tokio's blocking thread pool.
//!
//! # Lifecycle
//!
//! Construct one pool at startup, share it by `Arc`, and call
//! [`WorkerPool::shutdown`] once at exit. Submissions after shutdown resolve to
//! [`ComponentError::PoolShutDown`].
//!
//! # Examples
//!
//! ```rust
//! use hades::engine::WorkerPool;
//!
//! let pool = WorkerPool::new(4).unwrap();
//! let handle = pool.submit(|| Ok(21 * 2));
//!
//! assert_eq!(handle.result(), Ok(42));
//! pool.shutdown();
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::config::consts::{DEFAULT_MAX_WORKERS, DEFAULT_SHUTDOWN_TIMEOUT_MS, DEFAULT_THREAD_NAME};
use crate::config::ExecutorConfig;
use crate::engine::future::StateInput;
use crate::errors::ComponentError;
use crate::observability::messages::executor::{
    SubmissionRejected, WorkerPoolShutdown, WorkerPoolStarted,
};
use crate::observability::messages::StructuredLog;
use crate::state::State;

/// Handle of an iteration scheduled on the pool.
pub type StateFuture = TaskHandle<State>;

pub struct WorkerPool {
    runtime: Mutex<Option<Runtime>>,
    handle: Handle,
    permits: Arc<Semaphore>,
    max_workers: usize,
    shutdown_timeout: Duration,
}

impl WorkerPool {
    /// Creates a pool on a dedicated runtime. `max_workers` is clamped to at least 1.
    pub fn new(max_workers: usize) -> std::io::Result<Self> {
        Self::from_config(&ExecutorConfig {
            max_workers: Some(max_workers),
            ..ExecutorConfig::default()
        })
    }

    pub fn from_config(config: &ExecutorConfig) -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name(
                config
                    .thread_name
                    .clone()
                    .unwrap_or_else(|| DEFAULT_THREAD_NAME.to_string()),
            )
            .enable_all()
            .build()?;

        let handle = runtime.handle().clone();
        let mut pool = Self::assemble(
            handle,
            config.max_workers.unwrap_or(DEFAULT_MAX_WORKERS),
            Some(runtime),
        );
        pool.shutdown_timeout = Duration::from_millis(
            config
                .shutdown_timeout_ms
                .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_MS),
        );
        Ok(pool)
    }

    /// Creates a pool on a runtime the application already owns.
    ///
    /// Shutting this pool down closes it for new work but leaves the runtime running.
    pub fn with_handle(handle: Handle, max_workers: usize) -> Self {
        Self::assemble(handle, max_workers, None)
    }

    fn assemble(handle: Handle, max_workers: usize, runtime: Option<Runtime>) -> Self {
        let max_workers = max_workers.max(1);
        WorkerPoolStarted {
            max_workers,
            owns_runtime: runtime.is_some(),
        }
        .log();

        Self {
            runtime: Mutex::new(runtime),
            handle,
            permits: Arc::new(Semaphore::new(max_workers)),
            max_workers,
            shutdown_timeout: Duration::from_millis(DEFAULT_SHUTDOWN_TIMEOUT_MS),
        }
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Workers not currently running a unit of work.
    pub fn idle_workers(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn is_shut_down(&self) -> bool {
        self.permits.is_closed()
    }

    /// Runs `work` on a pool worker and returns a handle to its outcome.
    ///
    /// Errors returned by `work`, and panics inside it, are captured and surfaced
    /// by the handle.
    pub fn submit<T, F>(&self, work: F) -> TaskHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, ComponentError> + Send + 'static,
    {
        if self.is_shut_down() {
            SubmissionRejected { component: "task" }.log();
            return TaskHandle::ready(Err(ComponentError::PoolShutDown));
        }

        let permits = Arc::clone(&self.permits);
        TaskHandle::spawned(self.handle.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| ComponentError::PoolShutDown)?;
            tokio::task::spawn_blocking(work)
                .await
                .map_err(ComponentError::from_join)?
        }))
    }

    /// Resolves `input` to a state, then runs `work` on it on a pool worker.
    ///
    /// Waiting for a pending input does not hold a worker.
    pub fn submit_state<F>(&self, input: StateInput, work: F) -> StateFuture
    where
        F: FnOnce(State) -> Result<State, ComponentError> + Send + 'static,
    {
        if self.is_shut_down() {
            SubmissionRejected { component: "state" }.log();
            return TaskHandle::ready(Err(ComponentError::PoolShutDown));
        }

        let permits = Arc::clone(&self.permits);
        TaskHandle::spawned(self.handle.spawn(async move {
            let state = match input {
                StateInput::Immediate(state) => state,
                StateInput::Pending(upstream) => upstream.await?,
            };
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|_| ComponentError::PoolShutDown)?;
            tokio::task::spawn_blocking(move || work(state))
                .await
                .map_err(ComponentError::from_join)?
        }))
    }

    /// Closes the pool for new work and, if it owns its runtime, shuts that down.
    ///
    /// Work still queued for a permit resolves to `PoolShutDown`. Running work gets
    /// up to the configured timeout to finish. Must not be called from inside an
    /// async task on the pool's own runtime.
    pub fn shutdown(&self) {
        WorkerPoolShutdown {
            timeout: self.shutdown_timeout,
        }
        .log();

        self.permits.close();
        let runtime = self
            .runtime
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(runtime) = runtime {
            runtime.shutdown_timeout(self.shutdown_timeout);
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.permits.close();
        let runtime = self
            .runtime
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(runtime) = runtime {
            runtime.shutdown_background();
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("max_workers", &self.max_workers)
            .field("idle_workers", &self.idle_workers())
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

/// Completion handle for a unit of work.
///
/// `result()` blocks the calling thread until the work finishes; `.await` waits
/// asynchronously. Either way a failure inside the work comes back as the error.
pub struct TaskHandle<T> {
    inner: Inner<T>,
}

enum Inner<T> {
    Spawned(JoinHandle<Result<T, ComponentError>>),
    Ready(Option<Result<T, ComponentError>>),
}

impl<T> TaskHandle<T> {
    fn spawned(handle: JoinHandle<Result<T, ComponentError>>) -> Self {
        Self {
            inner: Inner::Spawned(handle),
        }
    }

    fn ready(outcome: Result<T, ComponentError>) -> Self {
        Self {
            inner: Inner::Ready(Some(outcome)),
        }
    }

    /// Whether the work has finished; never blocks.
    pub fn done(&self) -> bool {
        match &self.inner {
            Inner::Spawned(handle) => handle.is_finished(),
            Inner::Ready(_) => true,
        }
    }

    /// Blocks until the work finishes and returns its outcome.
    ///
    /// Call only from a thread that may block: a plain thread or a pool worker,
    /// not an async task.
    pub fn result(self) -> Result<T, ComponentError> {
        futures::executor::block_on(self)
    }
}

// The outcome is never pinned in place.
impl<T> Unpin for TaskHandle<T> {}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T, ComponentError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().inner {
            Inner::Spawned(handle) => Pin::new(handle).poll(cx).map(|joined| match joined {
                Ok(outcome) => outcome,
                Err(err) => Err(ComponentError::from_join(err)),
            }),
            Inner::Ready(outcome) => {
                Poll::Ready(outcome.take().unwrap_or(Err(ComponentError::Cancelled)))
            }
        }
    }
}

impl<T> std::fmt::Debug for TaskHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle").field("done", &self.done()).finish()
    }
}
