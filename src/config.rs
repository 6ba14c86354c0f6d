use crate::engine::ClusterEngine;
use crate::primitive::Primitive;
use crate::stop_rule::StopRule;
use rand::prelude::*;
use std::cell::RefCell;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&ClusterEngine<T>);
pub type RoundDoneCallbackFn<'a, T> = &'a dyn Fn(&ClusterEngine<T>, usize, usize);

/// What the centroid update step does with a cluster that currently has
/// no member points.
///
/// Recomputing an empty cluster's mean would divide by zero, so the
/// update step never does; it applies one of these policies instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyClusterPolicy {
    /// Redraw the centroid uniformly from the data's current bounding
    /// box, giving it a fresh chance to capture points next round.
    Reseed,
    /// Leave the centroid at its previous position.
    Freeze,
}

/// Configuration for a clustering run: the random number generator to
/// use, a couple of callbacks for status information, and the policies
/// applied during seeding, centroid updates and the convergence loop.
///
/// For detailed information about all options, have a look at
/// [`EngineConfigBuilder`].
pub struct EngineConfig<'a, T: Primitive> {
    /// Callback that is called when centroid initialization finished.
    /// ## Arguments
    /// - **engine**: The engine, with freshly seeded centroids
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each convergence round.
    /// ## Arguments
    /// - **engine**: The engine, after the round's assignment and update
    /// - **round**: Number of the finished round (starting at 1)
    /// - **moved**: Points reassigned by the round's assignment step
    pub(crate) round_done: RoundDoneCallbackFn<'a, T>,
    /// Random number generator used for seeding and re-seeding.
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// Policy for clusters that end an assignment round with no members.
    pub(crate) empty_cluster_policy: EmptyClusterPolicy,
    /// Minimum squared distance enforced between seeded centroids.
    pub(crate) min_separation: Option<T>,
    /// Early-stopping rule for the convergence loop.
    pub(crate) stop_rule: StopRule<T>,
}

impl<'a, T: Primitive> Default for EngineConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            round_done: &|_, _, _| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            empty_cluster_policy: EmptyClusterPolicy::Reseed,
            min_separation: None,
            stop_rule: StopRule::Stable,
        }
    }
}

impl<'a, T: Primitive> EngineConfig<'a, T> {
    /// Use the [`EngineConfigBuilder`] to build an [`EngineConfig`] instance.
    pub fn build() -> EngineConfigBuilder<'a, T> {
        EngineConfigBuilder { config: EngineConfig::default() }
    }
}

impl<'a, T: Primitive> std::fmt::Debug for EngineConfig<'a, T> {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Ok(())
    }
}

pub struct EngineConfigBuilder<'a, T: Primitive> {
    config: EngineConfig<'a, T>,
}

impl<'a, T: Primitive> EngineConfigBuilder<'a, T> {
    /// Set the callback that should be called after centroid
    /// initialization, before the first assignment round.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done;
        self
    }

    /// Set the callback that should be called after each round of a
    /// running convergence loop.
    pub fn round_done(mut self, round_done: RoundDoneCallbackFn<'a, T>) -> Self {
        self.config.round_done = round_done;
        self
    }

    /// Set the random number generator used for seeding and re-seeding
    /// centroids. Use a seeded generator for deterministically
    /// repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd));
        self
    }

    /// Set the policy applied to clusters that have no member points
    /// when centroids are recomputed.
    /// ## Default
    /// [`EmptyClusterPolicy::Reseed`]
    pub fn empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster_policy = policy;
        self
    }

    /// Require freshly seeded centroids to be at least this squared
    /// distance apart. Seeding redraws a bounded number of times to
    /// satisfy the separation and then keeps the last candidate.
    /// ## Default
    /// No separation requirement.
    pub fn min_separation(mut self, min_separation: T) -> Self {
        self.config.min_separation = Some(min_separation);
        self
    }

    /// Set the early-stopping rule evaluated by the convergence loop.
    /// For more information, see the documentation of [`StopRule`].
    /// ## Default
    /// [`StopRule::Stable`]
    pub fn stop_rule(mut self, stop_rule: StopRule<T>) -> Self {
        self.config.stop_rule = stop_rule;
        self
    }

    /// Return the internally built configuration structure.
    pub fn build(self) -> EngineConfig<'a, T> {
        self.config
    }
}
