// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::ComponentError;
use crate::flow::{energy_key, KeyFn};
use crate::observability::messages::{flow::FoldSelected, StructuredLog};
use crate::state::State;

/// Reduces the states produced by concurrent branches to a single state.
pub trait Fold: Send + Sync {
    fn fold(&self, states: Vec<State>) -> Result<State, ComponentError>;

    fn name(&self) -> &str;
}

/// Picks the state with the lowest key.
///
/// States without a key rank after every state with one. Ties go to the earliest
/// state, so the choice is deterministic for a given branch order.
#[derive(Clone)]
pub struct ArgMinFold {
    key: KeyFn,
}

impl ArgMinFold {
    /// Arg-min over [`State::energy`].
    pub fn new() -> Self {
        Self { key: energy_key() }
    }

    pub fn by<F>(key: F) -> Self
    where
        F: Fn(&State) -> Option<f64> + Send + Sync + 'static,
    {
        Self { key: Arc::new(key) }
    }
}

impl Default for ArgMinFold {
    fn default() -> Self {
        Self::new()
    }
}

fn ranks_before(candidate: Option<f64>, current: Option<f64>) -> bool {
    match (candidate, current) {
        (Some(candidate), Some(current)) => candidate.total_cmp(&current).is_lt(),
        (Some(_), None) => true,
        (None, _) => false,
    }
}

impl Fold for ArgMinFold {
    fn fold(&self, states: Vec<State>) -> Result<State, ComponentError> {
        let mut best: Option<(usize, Option<f64>)> = None;
        for (index, state) in states.iter().enumerate() {
            let key = (self.key)(state);
            let better = match best {
                None => true,
                Some((_, best_key)) => ranks_before(key, best_key),
            };
            if better {
                best = Some((index, key));
            }
        }

        let (index, key) = best.ok_or(ComponentError::EmptyFold)?;
        FoldSelected {
            selected_index: index,
            candidate_count: states.len(),
            key,
        }
        .log();

        states
            .into_iter()
            .nth(index)
            .ok_or(ComponentError::EmptyFold)
    }

    fn name(&self) -> &str {
        "argmin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scored(energy: f64, tag: &str) -> State {
        State::from_result(json!({"energy": energy, "tag": tag}))
    }

    #[test]
    fn picks_lowest_energy() {
        let states = vec![scored(3.0, "a"), scored(-1.5, "b"), scored(0.0, "c")];
        let best = ArgMinFold::new().fold(states).unwrap();
        assert_eq!(best.result.unwrap()["tag"], json!("b"));
    }

    #[test]
    fn ties_go_to_the_earliest_state() {
        let states = vec![scored(1.0, "first"), scored(1.0, "second")];
        let best = ArgMinFold::new().fold(states).unwrap();
        assert_eq!(best.result.unwrap()["tag"], json!("first"));
    }

    #[test]
    fn unscored_states_rank_last() {
        let states = vec![State::new(), scored(10.0, "scored"), State::from_result(json!("x"))];
        let best = ArgMinFold::new().fold(states).unwrap();
        assert_eq!(best.energy(), Some(10.0));
    }

    #[test]
    fn all_unscored_returns_first() {
        let states = vec![State::from_result(json!(1)), State::from_result(json!(2))];
        let best = ArgMinFold::new().fold(states).unwrap();
        assert_eq!(best.result, Some(json!(1)));
    }

    #[test]
    fn custom_key() {
        let fold = ArgMinFold::by(|s| s.context.get("cost").and_then(|v| v.as_f64()));
        let states = vec![
            State::new().with_context([("cost", json!(5))]),
            State::new().with_context([("cost", json!(2))]),
        ];
        assert_eq!(fold.fold(states).unwrap().context["cost"], json!(2));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(ArgMinFold::new().fold(vec![]), Err(ComponentError::EmptyFold));
    }
}
