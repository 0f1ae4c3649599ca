// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::local::LocalComponentFactory;
use crate::config::{Config, StageConfig};
use crate::observability::messages::config::ValidationFailed;
use crate::observability::messages::StructuredLog;

/// Validate a pipeline configuration.
///
/// Checks that:
/// * the pipeline has at least one stage
/// * `executor.max_workers` is at least 1
/// * every local stage names a known component
/// * every race has branches and none of them is empty
/// * every loop has stages and a non-zero iteration budget
/// * the pool has enough workers for the deepest set of races to make progress
///
/// Returns all problems found rather than stopping at the first.
pub fn validate_config(cfg: &Config) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();

    if cfg.pipeline.is_empty() {
        report(&mut problems, "empty_pipeline", "pipeline has no stages".to_string());
    }

    let max_workers = cfg.executor.effective_max_workers();
    if max_workers == 0 {
        report(
            &mut problems,
            "max_workers",
            "executor.max_workers must be at least 1".to_string(),
        );
    }

    validate_stages(&cfg.pipeline, "pipeline", &mut problems);

    let needed = required_workers(&cfg.pipeline);
    if max_workers > 0 && needed > max_workers {
        report(
            &mut problems,
            "worker_starvation",
            format!(
                "pipeline needs at least {} workers to run without starving its races, but max_workers is {}",
                needed, max_workers
            ),
        );
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}

/// Workers the pipeline holds at its peak when driven through `run`.
///
/// The pipeline itself takes one worker. A race blocks the worker it runs on and
/// every one of its branches takes another, plus whatever its own races need.
pub fn required_workers(stages: &[StageConfig]) -> usize {
    1 + extra_workers(stages)
}

fn extra_workers(stages: &[StageConfig]) -> usize {
    stages.iter().map(stage_extra_workers).max().unwrap_or(0)
}

fn stage_extra_workers(stage: &StageConfig) -> usize {
    match stage {
        StageConfig::Local { .. } => 0,
        StageConfig::Race { branches, .. } => branches
            .iter()
            .map(|branch| 1 + extra_workers(branch))
            .sum(),
        StageConfig::Loop { stages, .. } => extra_workers(stages),
    }
}

fn validate_stages(stages: &[StageConfig], path: &str, problems: &mut Vec<String>) {
    for (index, stage) in stages.iter().enumerate() {
        let here = format!("{}[{}]", path, index);
        match stage {
            StageConfig::Local { component, .. } => {
                if !LocalComponentFactory::is_implementation_available(component) {
                    report(
                        problems,
                        "unknown_component",
                        format!("{}: unknown component '{}'", here, component),
                    );
                }
            }
            StageConfig::Race { branches, .. } => {
                if branches.is_empty() {
                    report(problems, "empty_race", format!("{}: race has no branches", here));
                }
                for (branch_index, branch) in branches.iter().enumerate() {
                    let branch_path = format!("{}.branches[{}]", here, branch_index);
                    if branch.is_empty() {
                        report(problems, "empty_branch", format!("{}: branch has no stages", branch_path));
                    }
                    validate_stages(branch, &branch_path, problems);
                }
            }
            StageConfig::Loop {
                stages, max_iter, ..
            } => {
                if stages.is_empty() {
                    report(problems, "empty_loop", format!("{}: loop has no stages", here));
                }
                if *max_iter == 0 {
                    report(problems, "max_iter", format!("{}: max_iter must be at least 1", here));
                }
                validate_stages(stages, &format!("{}.stages", here), problems);
            }
        }
    }
}

fn report(problems: &mut Vec<String>, rule: &str, detail: String) {
    ValidationFailed {
        rule,
        detail: &detail,
    }
    .log();
    problems.push(detail);
}
