// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequential composite component.
//!
//! A [`Branch`] runs a fixed, ordered list of components, feeding each one the
//! state the previous one returned. Component N starts only after component N-1
//! has returned. A failing component ends the branch and its error is returned
//! as-is; branches never catch or retry.
//!
//! Pipelines are built with [`sequence`] and [`Branch::then`]. Both flatten: a
//! branch composed with a branch yields one flat list of leaves, which makes
//! composition associative.
//!
//! ```rust
//! use std::sync::Arc;
//! use hades::backends::local::Identity;
//! use hades::engine::{sequence, Branch};
//! use hades::traits::ComponentRef;
//!
//! let a: ComponentRef = Arc::new(Identity::new());
//! let b: ComponentRef = Arc::new(Identity::new());
//! let c: ComponentRef = Arc::new(Identity::new());
//!
//! let left = sequence(a.clone(), b.clone()).then(c.clone());
//! let right = sequence(a, Branch::new([b, c]).into_ref());
//!
//! assert_eq!(left.len(), 3);
//! assert_eq!(right.len(), 3);
//! ```

use std::sync::Arc;
use std::time::Instant;

use crate::errors::ComponentError;
use crate::observability::messages::engine::{
    BranchIterationCompleted, BranchIterationStarted, ComponentFailed, StopForwarded,
};
use crate::observability::messages::StructuredLog;
use crate::state::State;
use crate::traits::{Component, ComponentRef};

#[derive(Clone, Default)]
pub struct Branch {
    components: Vec<ComponentRef>,
}

impl Branch {
    /// Branch over `components` exactly as given; nested branches are kept as
    /// single components. Use [`sequence`] to get flattening.
    pub fn new<I>(components: I) -> Self
    where
        I: IntoIterator<Item = ComponentRef>,
    {
        Self {
            components: components.into_iter().collect(),
        }
    }

    pub fn components(&self) -> &[ComponentRef] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// New branch running `self` and then `next`. Neither operand changes.
    pub fn then(&self, next: ComponentRef) -> Branch {
        let mut components = self.components.clone();
        components.extend(flatten(&next));
        Branch { components }
    }

    pub fn into_ref(self) -> ComponentRef {
        Arc::new(self)
    }
}

/// Composes `first` followed by `second` into one flat branch.
pub fn sequence(first: ComponentRef, second: ComponentRef) -> Branch {
    let mut components = flatten(&first);
    components.extend(flatten(&second));
    Branch { components }
}

fn flatten(component: &ComponentRef) -> Vec<ComponentRef> {
    match component.as_branch() {
        Some(branch) => branch.components.clone(),
        None => vec![Arc::clone(component)],
    }
}

impl Component for Branch {
    fn iterate(&self, state: &State) -> Result<State, ComponentError> {
        let start_msg = BranchIterationStarted {
            component_count: self.components.len(),
        };
        let span = start_msg.span("branch");
        let _guard = span.enter();
        start_msg.log();

        let started = Instant::now();
        let mut current = state.clone();
        for (position, component) in self.components.iter().enumerate() {
            current = component.iterate(&current).map_err(|error| {
                ComponentFailed {
                    component: component.name(),
                    position,
                    error: &error,
                }
                .log();
                error
            })?;
        }

        BranchIterationCompleted {
            component_count: self.components.len(),
            duration: started.elapsed(),
        }
        .log();

        Ok(current)
    }

    /// Forwards to every component in order, whether or not anything is running.
    fn stop(&self) {
        StopForwarded {
            composite: self.name(),
            child_count: self.components.len(),
        }
        .log();

        for component in &self.components {
            component.stop();
        }
    }

    fn rearm(&self) {
        for component in &self.components {
            component.rearm();
        }
    }

    fn name(&self) -> &str {
        "branch"
    }

    fn as_branch(&self) -> Option<&Branch> {
        Some(self)
    }
}

impl std::fmt::Debug for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Branch")
            .field(
                "components",
                &self.components.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{FailingComponent, RecordingComponent, StubComponent};
    use crate::state::StateUpdate;
    use serde_json::json;

    fn recorder(label: &str, log: &Arc<std::sync::Mutex<Vec<String>>>) -> Arc<RecordingComponent> {
        Arc::new(RecordingComponent::new(label, Arc::clone(log)))
    }

    fn same(a: &ComponentRef, b: &ComponentRef) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
    }

    #[test]
    fn sequence_of_three_is_flat_and_ordered() {
        let a: ComponentRef = Arc::new(StubComponent::new("a"));
        let b: ComponentRef = Arc::new(StubComponent::new("b"));
        let c: ComponentRef = Arc::new(StubComponent::new("c"));

        let chained = sequence(a.clone(), b.clone()).then(c.clone());
        let left = Branch::new([a.clone(), b.clone()]).then(c.clone());
        let right = sequence(a.clone(), Branch::new([b.clone(), c.clone()]).into_ref());

        for branch in [&chained, &left, &right] {
            assert_eq!(branch.len(), 3);
            assert!(same(&branch.components()[0], &a));
            assert!(same(&branch.components()[1], &b));
            assert!(same(&branch.components()[2], &c));
        }
    }

    #[test]
    fn branch_with_branch_concatenates() {
        let a: ComponentRef = Arc::new(StubComponent::new("a"));
        let b: ComponentRef = Arc::new(StubComponent::new("b"));
        let ab = Branch::new([a.clone(), b.clone()]);

        let abab = ab.then(ab.clone().into_ref());
        assert_eq!(
            format!("{:?}", abab),
            r#"Branch { components: ["a", "b", "a", "b"] }"#
        );
    }

    #[test]
    fn composition_leaves_operands_untouched() {
        let a: ComponentRef = Arc::new(StubComponent::new("a"));
        let b: ComponentRef = Arc::new(StubComponent::new("b"));
        let base = Branch::new([a.clone()]);

        let _longer = base.then(b.clone());
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn iterate_threads_state_in_order() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let branch = Branch::new([
            recorder("first", &log) as ComponentRef,
            recorder("second", &log) as ComponentRef,
            recorder("third", &log) as ComponentRef,
        ]);

        let out = branch.iterate(&State::new()).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["iterate:first", "iterate:second", "iterate:third"]
        );
        // each recorder appends its label to context["path"] from its input
        assert_eq!(out.context["path"], json!(["first", "second", "third"]));
    }

    #[test]
    fn output_equals_last_component_fed_previous_output() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let first = recorder("first", &log);
        let second = recorder("second", &log);
        let branch = Branch::new([first.clone() as ComponentRef, second.clone() as ComponentRef]);

        let input = State::from_result(json!(1));
        let expected = second.iterate(&first.iterate(&input).unwrap()).unwrap();
        assert_eq!(branch.iterate(&input).unwrap(), expected);
    }

    #[test]
    fn empty_branch_is_identity() {
        let state = State::from_result(json!({"energy": 1.0})).with_context([("k", json!(1))]);
        assert_eq!(Branch::default().iterate(&state).unwrap(), state);
    }

    #[test]
    fn iterate_does_not_mutate_input() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let branch = Branch::new([recorder("only", &log) as ComponentRef]);
        let input = State::new().updated(StateUpdate::new().debug([("seen", json!(false))]));
        let snapshot = input.clone();

        branch.iterate(&input).unwrap();
        assert_eq!(input, snapshot);
    }

    #[test]
    fn failure_propagates_unchanged_and_stops_the_sequence() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let branch = Branch::new([
            recorder("before", &log) as ComponentRef,
            Arc::new(FailingComponent::new("broken", "no samples")) as ComponentRef,
            recorder("after", &log) as ComponentRef,
        ]);

        let err = branch.iterate(&State::new()).unwrap_err();
        assert_eq!(err, ComponentError::failed("broken", "no samples"));
        assert_eq!(*log.lock().unwrap(), vec!["iterate:before"]);
    }

    #[test]
    fn stop_reaches_every_child_once_in_order() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let inner = Branch::new([recorder("b", &log) as ComponentRef, recorder("c", &log) as ComponentRef]);
        let branch = sequence(recorder("a", &log), inner.into_ref());

        branch.stop();
        assert_eq!(*log.lock().unwrap(), vec!["stop:a", "stop:b", "stop:c"]);
    }

    #[test]
    fn stop_on_empty_branch_is_a_no_op() {
        Branch::default().stop();
    }
}
