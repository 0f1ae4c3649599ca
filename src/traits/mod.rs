// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod component;
pub mod stop;

pub use component::{Component, ComponentRef, Run};
pub use stop::{StopGuard, StopSignal};
