// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::backends::local::LocalComponentFactory;
use crate::config::{Config, FoldKind, StageConfig};
use crate::engine::{Branch, WorkerPool};
use crate::errors::CompositionError;
use crate::flow::{ArgMinFold, Race, SimpleIterator};
use crate::observability::messages::config::PipelineBuilt;
use crate::observability::messages::StructuredLog;
use crate::traits::ComponentRef;

/// Turns stage configurations into a component tree.
///
/// Every problem is reported here, while building; nothing runs until the
/// returned branch is iterated.
pub struct PipelineBuilder;

impl PipelineBuilder {
    pub fn from_config(cfg: &Config, pool: &Arc<WorkerPool>) -> Result<Branch, CompositionError> {
        let pipeline = Self::build_stages(&cfg.pipeline, pool)?;
        PipelineBuilt {
            leaf_count: pipeline.len(),
        }
        .log();
        Ok(pipeline)
    }

    /// Composes `stages` in order into one flat branch.
    pub fn build_stages(
        stages: &[StageConfig],
        pool: &Arc<WorkerPool>,
    ) -> Result<Branch, CompositionError> {
        stages.iter().try_fold(Branch::default(), |pipeline, stage| {
            Ok(pipeline.then(Self::build_stage(stage, pool)?))
        })
    }

    fn build_stage(
        stage: &StageConfig,
        pool: &Arc<WorkerPool>,
    ) -> Result<ComponentRef, CompositionError> {
        match stage {
            StageConfig::Local { component, options } => {
                LocalComponentFactory::create_component(component, options)
            }
            StageConfig::Race { branches, fold } => {
                if branches.is_empty() {
                    return Err(CompositionError::EmptyRace);
                }
                let branches = branches
                    .iter()
                    .map(|branch| Self::build_stages(branch, pool).map(Branch::into_ref))
                    .collect::<Result<Vec<_>, _>>()?;
                let race = match fold {
                    FoldKind::Argmin => Race::new(Arc::clone(pool), branches, ArgMinFold::new()),
                };
                Ok(Arc::new(race))
            }
            StageConfig::Loop {
                stages,
                max_iter,
                convergence,
            } => {
                let inner = Self::build_stages(stages, pool)?.into_ref();
                Ok(Arc::new(SimpleIterator::new(inner, *max_iter, *convergence)))
            }
        }
    }
}
