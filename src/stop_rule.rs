use crate::primitive::Primitive;

/// Early-stopping rules for the convergence loop.
///
/// The loop always terminates when an assignment round moves no points,
/// or when the round cap is reached. A stop rule can additionally end a
/// run whose total distortion has stopped improving, which is useful on
/// data where the last few reassignments oscillate without meaningfully
/// changing the result.
pub enum StopRule<T: Primitive> {
    /// No early stopping: run until the assignment is stable or the
    /// round cap is hit.
    Stable,
    /// Stop directly after the first round whose distortion improvement
    /// was not larger than `threshold`.
    /// ## Fields:
    /// - **threshold**: Threshold used to detect an improvement (`improvement > threshold`)
    NoImprovement { threshold: T },
    /// Stop when there has been no improvement larger than `threshold`
    /// for `x` consecutive rounds.
    /// ## Fields:
    /// - **x**: Amount of consecutive rounds without improvement, after which the run is stopped
    /// - **threshold**: Threshold used to detect an improvement (`improvement > threshold`)
    /// - **abort_on_negative**: Whether a negative improvement stops the run instantly (**true**),
    ///   or is handled like "no improvement" (**false**)
    NoImprovementForXRounds { x: usize, threshold: T, abort_on_negative: bool },
}

impl<T: Primitive> StopRule<T> {
    pub(crate) fn create_logic(&self) -> Box<dyn StopRuleLogic<T>> {
        match *self {
            StopRule::Stable => Box::new(StableLogic),
            StopRule::NoImprovement { threshold } => Box::new(NoImprovementLogic {
                threshold,
                prev_distortion: T::infinity(),
            }),
            StopRule::NoImprovementForXRounds { x, threshold, abort_on_negative } => {
                Box::new(NoImprovementForXRoundsLogic {
                    x,
                    threshold,
                    abort_on_negative,
                    prev_distortion: T::infinity(),
                    no_improvement_counter: 0,
                })
            }
        }
    }
}

/// Per-run state of a [`StopRule`].
pub(crate) trait StopRuleLogic<T: Primitive> {
    /// Has to be called once per finished round, with the round's total
    /// distortion.
    /// ## Returns
    /// - **true** if the run should continue
    /// - **false** if the run should stop
    fn next(&mut self, distortion: T) -> bool;
}

struct StableLogic;
impl<T: Primitive> StopRuleLogic<T> for StableLogic {
    fn next(&mut self, _: T) -> bool {
        true
    }
}

struct NoImprovementLogic<T: Primitive> {
    threshold: T,
    prev_distortion: T,
}
impl<T: Primitive> StopRuleLogic<T> for NoImprovementLogic<T> {
    fn next(&mut self, distortion: T) -> bool {
        let improvement = self.prev_distortion - distortion;
        self.prev_distortion = distortion;
        improvement > self.threshold
    }
}

struct NoImprovementForXRoundsLogic<T: Primitive> {
    x: usize,
    threshold: T,
    abort_on_negative: bool,
    prev_distortion: T,
    no_improvement_counter: usize,
}
impl<T: Primitive> StopRuleLogic<T> for NoImprovementForXRoundsLogic<T> {
    fn next(&mut self, distortion: T) -> bool {
        let improvement = self.prev_distortion - distortion;
        self.prev_distortion = distortion;
        if self.abort_on_negative && improvement < T::zero() {
            return false;
        }
        if improvement > self.threshold {
            self.no_improvement_counter = 0;
        } else {
            self.no_improvement_counter += 1;
        }
        self.no_improvement_counter < self.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_never_stops() {
        let mut logic = StopRule::<f64>::Stable.create_logic();
        assert_eq!(logic.next(3000.0), true);
        assert_eq!(logic.next(3000.0), true);
        assert_eq!(logic.next(9000.0), true);
    }

    #[test]
    fn no_improvement_f32() {
        no_improvement::<f32>();
    }
    #[test]
    fn no_improvement_f64() {
        no_improvement::<f64>();
    }

    fn no_improvement<T: Primitive>() {
        {
            // The first call always improves from infinity.
            let mut logic = StopRule::NoImprovement { threshold: T::from(0.0005).unwrap() }.create_logic();
            assert_eq!(logic.next(T::from(3000.0).unwrap()), true);
            assert_eq!(logic.next(T::from(3000.0).unwrap()), false);
        }
        {
            // Improvement below the threshold stops the run.
            let mut logic = StopRule::NoImprovement { threshold: T::from(0.0005).unwrap() }.create_logic();
            assert_eq!(logic.next(T::from(3000.0).unwrap()), true);
            assert_eq!(logic.next(T::from(2999.99959).unwrap()), false);
        }
        {
            // Improvement above the threshold continues the run.
            let mut logic = StopRule::NoImprovement { threshold: T::from(0.0005).unwrap() }.create_logic();
            assert_eq!(logic.next(T::from(3000.0).unwrap()), true);
            assert_eq!(logic.next(T::from(2999.99935).unwrap()), true);
        }
        {
            let mut logic = StopRule::NoImprovement { threshold: T::from(0.0005).unwrap() }.create_logic();
            assert_eq!(logic.next(T::from(3000.0).unwrap()), true);
            assert_eq!(logic.next(T::from(2000.0).unwrap()), true);
            assert_eq!(logic.next(T::from(1999.99).unwrap()), true);
            assert_eq!(logic.next(T::from(1999.99999999).unwrap()), false);
        }
    }

    #[test]
    fn no_improvement_for_x_rounds_f32() {
        no_improvement_for_x_rounds::<f32>();
    }
    #[test]
    fn no_improvement_for_x_rounds_f64() {
        no_improvement_for_x_rounds::<f64>();
    }

    fn no_improvement_for_x_rounds<T: Primitive>() {
        {
            // x = 1 behaves like NoImprovement.
            let mut logic = StopRule::NoImprovementForXRounds {
                x: 1,
                threshold: T::from(0.0005).unwrap(),
                abort_on_negative: false,
            }
            .create_logic();
            assert_eq!(logic.next(T::from(3000.0).unwrap()), true);
            assert_eq!(logic.next(T::from(3000.0).unwrap()), false);
        }
        {
            // An improving round resets the counter.
            let mut logic = StopRule::NoImprovementForXRounds {
                x: 2,
                threshold: T::from(0.0005).unwrap(),
                abort_on_negative: false,
            }
            .create_logic();
            assert_eq!(logic.next(T::from(3000.0).unwrap()), true);
            assert_eq!(logic.next(T::from(2000.0).unwrap()), true);
            assert_eq!(logic.next(T::from(2000.0).unwrap()), true);
            assert_eq!(logic.next(T::from(1999.0).unwrap()), true);
            assert_eq!(logic.next(T::from(1999.0).unwrap()), true);
            assert_eq!(logic.next(T::from(1999.0).unwrap()), false);
        }
        {
            // A negative improvement stops instantly when requested,
            // even if its absolute value is below the threshold.
            let mut logic = StopRule::NoImprovementForXRounds {
                x: 2,
                threshold: T::from(0.0005).unwrap(),
                abort_on_negative: true,
            }
            .create_logic();
            assert_eq!(logic.next(T::from(3000.0).unwrap()), true);
            assert_eq!(logic.next(T::from(3000.0004).unwrap()), false);
        }
        {
            // Without abort_on_negative, a regression counts as "no improvement".
            let mut logic = StopRule::NoImprovementForXRounds {
                x: 2,
                threshold: T::from(0.0005).unwrap(),
                abort_on_negative: false,
            }
            .create_logic();
            assert_eq!(logic.next(T::from(3000.0).unwrap()), true);
            assert_eq!(logic.next(T::from(3001.0).unwrap()), true);
            assert_eq!(logic.next(T::from(3002.0).unwrap()), false);
        }
    }
}
