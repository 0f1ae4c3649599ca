// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod branch;
pub mod future;
pub mod worker_pool;

pub use branch::{sequence, Branch};
pub use future::{Present, StateInput};
pub use worker_pool::{StateFuture, TaskHandle, WorkerPool};
