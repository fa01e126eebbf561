//! # Steering
//! Straight-line extension from a tree vertex toward a sampled target.
//!
//! Each call moves exactly `step` along the segment `near -> target`, until
//! the remaining distance drops below the stop threshold.

use crate::{
    configuration::Configuration,
    error::{Result, RrtError},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Steering {
    stop_threshold: f64,
}

impl Steering {
    /// ### Parameters
    /// - `stop_threshold` - Distance below which [`Steering::steer`] stops
    ///   extending toward a target.
    ///
    /// ### Errors
    /// [`RrtError::InvalidStopThreshold`] unless the threshold is positive
    /// and finite.
    pub fn new(stop_threshold: f64) -> Result<Self> {
        if !(stop_threshold.is_finite() && stop_threshold > 0.0) {
            return Err(RrtError::InvalidStopThreshold(stop_threshold));
        }
        Ok(Self { stop_threshold })
    }

    pub fn stop_threshold(&self) -> f64 {
        self.stop_threshold
    }

    /// Checks that repeated steering with `step` is guaranteed to stop.
    ///
    /// Each call shortens the remaining distance by exactly `step`, so
    /// `step < stop_threshold` ensures it lands below the threshold instead
    /// of jumping past the target.
    pub fn check_step(&self, step: f64) -> Result<()> {
        if !(step.is_finite() && step > 0.0 && step < self.stop_threshold) {
            return Err(RrtError::InvalidStepConfiguration {
                step,
                stop_threshold: self.stop_threshold,
            });
        }
        Ok(())
    }

    /// Next configuration `step` away from `near` toward `target`.
    ///
    /// For each dimension the result is `near[i] + (step / d) * (target[i] - near[i])`
    /// with `d = near.distance(target)`.
    ///
    /// ### Parameters
    /// - `near` - Configuration to extend from.
    /// - `target` - Configuration to extend toward.
    /// - `step` - Extension length; callers validate it with
    ///   [`Steering::check_step`].
    ///
    /// ### Returns
    /// - `Ok(Some(next))` while `d >= stop_threshold`.
    /// - `Ok(None)` once `near` is within the stop threshold of `target`.
    ///
    /// ### Errors
    /// [`RrtError::DimensionMismatch`] if `near` and `target` differ in length.
    pub fn steer(
        &self,
        near: &Configuration,
        target: &Configuration,
        step: f64,
    ) -> Result<Option<Configuration>> {
        let d = near.distance(target)?;
        if d < self.stop_threshold {
            return Ok(None);
        }

        let scale = step / d;
        let values = near
            .values()
            .iter()
            .zip(target.values())
            .map(|(n, t)| n + scale * (t - n))
            .collect();

        Ok(Some(Configuration::new(values)))
    }
}
