// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // component backends
pub mod config;     // pipeline config + builders
pub mod engine;     // worker pool, futures, branches
pub mod errors;     // error handling
pub mod flow;       // race, fold, iteration
pub mod observability;
pub mod state;      // state payload + merge
pub mod traits;     // component + stop abstractions
