use crate::config::EngineConfig;
use crate::engine::ClusterEngine;
use crate::error::{Error, Result};
use crate::primitive::Primitive;
use log::debug;

/// Why a convergence run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// An assignment round moved no points: the fixed point was reached
    /// and further rounds would change nothing.
    Stable,
    /// The round cap was reached first.
    RoundLimit,
    /// The configured [`StopRule`](crate::StopRule) ended the run early.
    Stalled,
}

/// Summary of a finished convergence run.
#[derive(Clone, Debug)]
pub struct Convergence {
    /// Number of assignment/update rounds that ran.
    pub rounds: usize,
    /// Moved-point count of the final round.
    pub moved: usize,
    /// Why the run ended.
    pub termination: Termination,
}

impl<T: Primitive> ClusterEngine<T> {
    /// Runs assignment/update rounds until the assignment is stable
    /// (no point moved), the configured stop rule fires, or `max_rounds`
    /// rounds have run.
    ///
    /// Requires initialized centroids. The round cap is mandatory:
    /// assignments can oscillate on pathological inputs, so an unbounded
    /// loop is not offered. After each round the config's `round_done`
    /// callback is fired. Final assignments, centroids and cluster sizes
    /// are read from the engine afterwards.
    pub fn converge(&mut self, max_rounds: usize, config: &EngineConfig<'_, T>) -> Result<Convergence> {
        if max_rounds == 0 {
            return Err(Error::InvalidParameter { name: "max_rounds", message: "must be non-zero" });
        }

        let mut rule = config.stop_rule.create_logic();
        let mut last_moved = self.point_count();
        for round in 1..=max_rounds {
            let moved = self.run_assignment()?;
            self.update_centroids(config)?;
            (config.round_done)(self, round, moved);
            last_moved = moved;

            if moved == 0 {
                debug!("assignment stable after {} rounds", round);
                return Ok(Convergence { rounds: round, moved, termination: Termination::Stable });
            }
            let distortion = self.total_distortion().unwrap_or_else(T::zero);
            if !rule.next(distortion) {
                debug!("stop rule ended the run after {} rounds", round);
                return Ok(Convergence { rounds: round, moved, termination: Termination::Stalled });
            }
        }
        Ok(Convergence { rounds: max_rounds, moved: last_moved, termination: Termination::RoundLimit })
    }
}
