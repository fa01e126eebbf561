//! Tree construction loop.
//!
//! Every iteration of [`Planner::build`] runs the same cycle:
//! 1. **Sampling**: draw a random configuration from the
//!    [`ConfigurationSpace`] using the planner's own RNG.
//! 2. **Extending**: find the nearest tree vertex, then steer from it toward
//!    the sample again and again, inserting each new configuration as a child
//!    of the previous one, until [`Steering::steer`] reports the sample is
//!    within the stop threshold.
//! 3. The inserted configurations form that iteration's [`Chain`], which is
//!    appended to the [`BuildTrace`] (possibly empty).
//!
//! Unlike textbook RRT, which adds at most one vertex per sample, one sample
//! here grows a straight multi-vertex branch.

use crate::{
    config::Config,
    configuration::Configuration,
    error::{Result, RrtError},
    space::ConfigurationSpace,
    steering::Steering,
    tree::Tree,
    types::VertexId,
};
use log::{debug, info, trace};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlannerState {
    Idle,
    Sampling,
    Extending,
    Done,
}

/// Configurations inserted during one planner iteration.
///
/// The chain hangs off `anchor` (the vertex nearest to the sample), and its
/// vertices were allocated back to back, so `configs[i]` is vertex
/// `first + i` and its parent is vertex `first + i - 1` (or `anchor` for
/// `i == 0`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub anchor: VertexId,
    pub first: VertexId,
    pub configs: Vec<Configuration>,
}

impl Chain {
    fn new(anchor: VertexId, first: VertexId) -> Self {
        Self {
            anchor,
            first,
            configs: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn vertex_ids(&self) -> Range<VertexId> {
        self.first..self.first + self.configs.len()
    }
}

/// Ordered record of every iteration's [`Chain`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildTrace {
    chains: Vec<Chain>,
}

impl BuildTrace {
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Total number of vertices added across all chains.
    pub fn vertex_count(&self) -> usize {
        self.chains.iter().map(Chain::len).sum()
    }
}

/// Planner driven by the seedable generator used for configured builds.
pub type SeededPlanner = Planner<ChaCha8Rng>;

/// Owns one tree build: the space, the growing tree, the steering rule, the
/// RNG, and the trace of what each iteration added.
#[derive(Debug)]
pub struct Planner<R> {
    space: ConfigurationSpace,
    tree: Tree,
    steering: Steering,
    rng: R,
    trace: BuildTrace,
    state: PlannerState,
    seed: Option<u64>,
}

impl Planner<ChaCha8Rng> {
    /// Builds a planner from a validated [`Config`].
    ///
    /// When `cfg.rng_seed` is `None` a fresh seed is drawn and logged, so the
    /// build can still be reproduced via [`Planner::seed`].
    pub fn from_config(cfg: &Config) -> Result<Self> {
        cfg.validate()?;
        let seed = cfg.rng_seed.unwrap_or_else(|| rand::rng().random());
        info!("planner seed = {seed}");

        let mut planner = Self::new(
            cfg.space()?,
            cfg.root_config(),
            cfg.steering()?,
            ChaCha8Rng::seed_from_u64(seed),
        )?;
        planner.seed = Some(seed);
        Ok(planner)
    }
}

impl<R: Rng> Planner<R> {
    pub fn new(
        space: ConfigurationSpace,
        root: Configuration,
        steering: Steering,
        rng: R,
    ) -> Result<Self> {
        if root.dim() != space.dim() {
            return Err(RrtError::DimensionMismatch {
                expected: space.dim(),
                actual: root.dim(),
            });
        }

        Ok(Self {
            space,
            tree: Tree::new(root),
            steering,
            rng,
            trace: BuildTrace::default(),
            state: PlannerState::Idle,
            seed: None,
        })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn trace(&self) -> &BuildTrace {
        &self.trace
    }

    pub fn space(&self) -> &ConfigurationSpace {
        &self.space
    }

    pub fn steering(&self) -> &Steering {
        &self.steering
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }

    /// Seed of the internal RNG, when the planner was built from a [`Config`].
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Runs `iterations` sample/extend cycles with the given `step`.
    ///
    /// Each call appends `iterations` chains to the trace; calling it again
    /// continues growing the same tree.
    ///
    /// ### Errors
    /// - [`RrtError::InvalidStepConfiguration`] if `step` is not strictly
    ///   below the stop threshold. Nothing is sampled in that case.
    /// - Any tree or dimension error raised while extending aborts the build;
    ///   vertices inserted before the failure stay in the tree.
    pub fn build(&mut self, iterations: u32, step: f64) -> Result<&BuildTrace> {
        self.steering.check_step(step)?;
        info!(
            "building {iterations} iterations (step = {step}, stop_threshold = {}, vertices = {})",
            self.steering.stop_threshold(),
            self.tree.len()
        );

        for _ in 0..iterations {
            self.grow(step)?;
        }

        self.state = PlannerState::Done;
        info!(
            "build done: {} vertices, {} chains",
            self.tree.len(),
            self.trace.len()
        );
        Ok(&self.trace)
    }

    /// Runs a single sample/extend cycle and returns the chain it recorded.
    pub fn grow_once(&mut self, step: f64) -> Result<&Chain> {
        self.steering.check_step(step)?;
        self.grow(step)?;
        Ok(&self.trace.chains[self.trace.chains.len() - 1])
    }

    /// Extends from `near` toward `target` until within the stop threshold.
    ///
    /// The returned chain is not recorded in the trace.
    pub fn extend(
        &mut self,
        near: VertexId,
        target: &Configuration,
        step: f64,
    ) -> Result<Chain> {
        self.steering.check_step(step)?;
        self.extend_unchecked(near, target, step)
    }

    fn grow(&mut self, step: f64) -> Result<()> {
        self.state = PlannerState::Sampling;
        let sample = self.space.sample(&mut self.rng);
        let near = self.tree.nearest(&sample)?;

        self.state = PlannerState::Extending;
        let chain = self.extend_unchecked(near, &sample, step)?;
        debug!(
            "iteration {}: sample {sample}, nearest {near}, {} new vertices",
            self.trace.len(),
            chain.len()
        );

        self.trace.chains.push(chain);
        self.state = PlannerState::Idle;
        Ok(())
    }

    fn extend_unchecked(
        &mut self,
        near: VertexId,
        target: &Configuration,
        step: f64,
    ) -> Result<Chain> {
        let mut chain = Chain::new(near, self.tree.len());
        let mut current = near;

        loop {
            let from = self.tree.config(current)?;
            let Some(next) = self.steering.steer(from, target, step)? else {
                break;
            };

            let id = self.tree.add_child(current, next.clone())?;
            trace!("vertex {id} = {next} (parent {current})");
            chain.configs.push(next);
            current = id;
        }

        Ok(chain)
    }
}
