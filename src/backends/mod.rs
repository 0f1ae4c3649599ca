// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Ready-made leaf components.
//!
//! ## Local Backend
//! In-process components that the pipeline loader can instantiate by name:
//! - **identity**: passes the state through
//! - **set_context** / **set_result**: write fixed context entries or a fixed result
//! - **trace**: marks a debug key as the state passes
//! - **sleep**: blocks until its time is up or it is stopped
//! - **Lambda**: closure-backed component for programmatic pipelines
//!
//! ## Stub Backend (Test-Only)
//! - **StubComponent**: no-op component for composition tests
//! - **FailingComponent**: returns a fixed error
//! - **PanickingComponent**: panics on iterate
//! - **RecordingComponent**: logs iterate/stop calls in order

pub mod local;
#[cfg(test)]
pub mod stub;
