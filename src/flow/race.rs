// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Racing composite.
//!
//! Every branch iterates concurrently on the shared pool against its own copy of
//! the input state. When the first branch returns, the branches still running are
//! asked to stop; the race then waits for every branch and hands their states, in
//! branch order, to its [`Fold`]. Stops that reach a branch after it finished are
//! dropped before the next iteration.
//!
//! `iterate` blocks a thread while the branches run, and each branch takes a pool
//! worker. A race run through the pool therefore needs `branches + 1` workers to
//! make progress.

use std::sync::Arc;
use std::time::Instant;

use futures::future::{join_all, select_all};

use crate::engine::{StateFuture, WorkerPool};
use crate::errors::ComponentError;
use crate::flow::Fold;
use crate::observability::messages::engine::StopForwarded;
use crate::observability::messages::flow::{RaceFirstCompleted, RaceStarted};
use crate::observability::messages::StructuredLog;
use crate::state::State;
use crate::traits::{Component, ComponentRef, Run};

pub struct Race {
    branches: Vec<ComponentRef>,
    fold: Arc<dyn Fold>,
    pool: Arc<WorkerPool>,
}

impl Race {
    pub fn new<I, F>(pool: Arc<WorkerPool>, branches: I, fold: F) -> Self
    where
        I: IntoIterator<Item = ComponentRef>,
        F: Fold + 'static,
    {
        Self {
            branches: branches.into_iter().collect(),
            fold: Arc::new(fold),
            pool,
        }
    }

    pub fn branches(&self) -> &[ComponentRef] {
        &self.branches
    }

    /// Stops the branches whose handles have not completed yet.
    fn stop_pending(&self, handles: &[StateFuture], indices: &[usize]) {
        let pending: Vec<&ComponentRef> = handles
            .iter()
            .zip(indices)
            .filter(|(handle, _)| !handle.done())
            .map(|(_, &index)| &self.branches[index])
            .collect();

        StopForwarded {
            composite: self.name(),
            child_count: pending.len(),
        }
        .log();

        for branch in pending {
            branch.stop();
        }
    }
}

impl Component for Race {
    fn iterate(&self, state: &State) -> Result<State, ComponentError> {
        if self.branches.is_empty() {
            return self.fold.fold(Vec::new());
        }

        let start_msg = RaceStarted {
            branch_count: self.branches.len(),
        };
        let span = start_msg.span("race");
        let _guard = span.enter();
        start_msg.log();

        let started = Instant::now();
        let running: Vec<_> = self
            .branches
            .iter()
            .map(|branch| branch.run(&self.pool, state.copy()))
            .collect();
        // select_all swap-removes; mirror it to keep branch indices
        let mut indices: Vec<usize> = (0..running.len()).collect();

        let (first_outcome, position, remaining) =
            futures::executor::block_on(select_all(running));
        let first_index = indices.swap_remove(position);

        RaceFirstCompleted {
            branch_index: first_index,
            branch_count: self.branches.len(),
            elapsed: started.elapsed(),
        }
        .log();
        self.stop_pending(&remaining, &indices);

        let mut outcomes: Vec<Option<Result<State, ComponentError>>> =
            (0..self.branches.len()).map(|_| None).collect();
        outcomes[first_index] = Some(first_outcome);
        let rest = futures::executor::block_on(join_all(remaining));
        for (index, outcome) in indices.into_iter().zip(rest) {
            outcomes[index] = Some(outcome);
        }

        // a branch that finished just before its stop landed must not keep it
        self.rearm();

        let states = outcomes
            .into_iter()
            .flatten()
            .collect::<Result<Vec<_>, _>>()?;
        self.fold.fold(states)
    }

    fn stop(&self) {
        StopForwarded {
            composite: self.name(),
            child_count: self.branches.len(),
        }
        .log();

        for branch in &self.branches {
            branch.stop();
        }
    }

    fn rearm(&self) {
        for branch in &self.branches {
            branch.rearm();
        }
    }

    fn name(&self) -> &str {
        "race"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::local::{Lambda, SetResult, Sleep};
    use crate::flow::SimpleIterator;
    use crate::state::StateUpdate;
    use crate::backends::stub::{FailingComponent, RecordingComponent};
    use crate::engine::sequence;
    use crate::flow::ArgMinFold;
    use serde_json::json;
    use std::time::Duration;

    fn pool() -> Arc<WorkerPool> {
        Arc::new(WorkerPool::new(4).unwrap())
    }

    fn scored(energy: f64) -> ComponentRef {
        Arc::new(SetResult::new(json!({ "energy": energy })))
    }

    #[test]
    fn folds_all_branches() {
        let race = Race::new(pool(), [scored(2.0), scored(-3.0), scored(1.0)], ArgMinFold::new());
        let out = race.iterate(&State::new()).unwrap();
        assert_eq!(out.energy(), Some(-3.0));
    }

    #[test]
    fn first_finisher_stops_the_slow_branch() {
        let slow: ComponentRef = sequence(
            Arc::new(Sleep::new(Duration::from_secs(30))),
            scored(-100.0),
        )
        .into_ref();
        let race = Race::new(pool(), [scored(5.0), slow], ArgMinFold::new());

        let started = Instant::now();
        let out = race.iterate(&State::new()).unwrap();

        assert!(started.elapsed() < Duration::from_secs(10));
        // the interrupted sleeper still returns, so its branch completes too
        assert_eq!(out.energy(), Some(-100.0));
    }

    fn napper(millis: u64, energy: f64) -> ComponentRef {
        sequence(Arc::new(Sleep::new(Duration::from_millis(millis))), scored(energy)).into_ref()
    }

    #[test]
    fn winner_is_not_stopped_across_repeated_races() {
        let race = Race::new(pool(), [napper(100, 1.0), napper(5_000, 2.0)], ArgMinFold::new());

        for round in 0..3 {
            let started = Instant::now();
            let out = race.iterate(&State::new()).unwrap();

            assert!(started.elapsed() >= Duration::from_millis(100), "round {}", round);
            assert_eq!(out.energy(), Some(1.0));
            assert_eq!(out.debug["sleep"]["interrupted"], json!(false), "round {}", round);
            assert!(out.debug["sleep"]["slept_ms"].as_u64().unwrap() >= 100);
        }
    }

    #[test]
    fn iterated_race_lets_every_winner_finish() {
        let record_nap: ComponentRef = Arc::new(Lambda::new("record_nap", |state: &State| {
            let mut naps = match state.context.get("naps") {
                Some(serde_json::Value::Array(naps)) => naps.clone(),
                _ => Vec::new(),
            };
            naps.push(state.debug["sleep"].clone());
            Ok(state.updated(StateUpdate::new().context([("naps", json!(naps))])))
        }));
        let fast = sequence(napper(40, 1.0), record_nap).into_ref();
        let race: ComponentRef =
            Arc::new(Race::new(pool(), [fast, napper(5_000, 2.0)], ArgMinFold::new()));
        let driver = SimpleIterator::new(race, 3, 10);

        let out = driver.iterate(&State::new()).unwrap();

        let naps = out.context["naps"].as_array().unwrap();
        assert_eq!(naps.len(), 3);
        for nap in naps {
            assert_eq!(nap["interrupted"], json!(false));
            assert!(nap["slept_ms"].as_u64().unwrap() >= 40);
        }
        assert_eq!(out.debug["iterations"], json!(3));
    }

    #[test]
    fn every_branch_gets_its_own_copy() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let branches: Vec<ComponentRef> = vec![
            Arc::new(RecordingComponent::new("left", Arc::clone(&log))),
            Arc::new(RecordingComponent::new("right", Arc::clone(&log))),
        ];
        let race = Race::new(
            pool(),
            branches,
            ArgMinFold::by(|s| s.context["path"].as_array().map(|p| p.len() as f64)),
        );

        let input = State::new().with_context([("path", json!(["root"]))]);
        let out = race.iterate(&input).unwrap();

        let path = out.context["path"].as_array().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(input.context["path"], json!(["root"]));
    }

    #[test]
    fn branch_failure_propagates() {
        let race = Race::new(
            pool(),
            [scored(1.0), Arc::new(FailingComponent::new("qpu", "offline")) as ComponentRef],
            ArgMinFold::new(),
        );
        assert_eq!(
            race.iterate(&State::new()),
            Err(ComponentError::failed("qpu", "offline"))
        );
    }

    #[test]
    fn empty_race_reports_empty_fold() {
        let race = Race::new(pool(), Vec::<ComponentRef>::new(), ArgMinFold::new());
        assert_eq!(race.iterate(&State::new()), Err(ComponentError::EmptyFold));
    }

    #[test]
    fn race_composes_like_any_component() {
        let pool = pool();
        let race: ComponentRef = Arc::new(Race::new(
            Arc::clone(&pool),
            [scored(4.0), scored(2.0)],
            ArgMinFold::new(),
        ));
        let pipeline = sequence(race, Arc::new(crate::backends::local::Trace::new("after"))).into_ref();

        let out = pipeline.run(&pool, State::new()).result().unwrap();
        assert_eq!(out.energy(), Some(2.0));
        assert_eq!(out.debug["after"], json!(true));
    }
}
