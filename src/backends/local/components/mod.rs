// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod identity;
pub mod lambda;
pub mod set_context;
pub mod set_result;
pub mod sleep;
pub mod trace;

pub use identity::*;
pub use lambda::*;
pub use set_context::*;
pub use set_result::*;
pub use sleep::*;
pub use trace::*;
