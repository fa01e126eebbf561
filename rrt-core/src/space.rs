use crate::{
    configuration::Configuration,
    error::{Result, RrtError},
};
use rand::{
    Rng,
    distr::{Distribution, Uniform},
};

/// Axis-aligned, bounded configuration space.
///
/// Only used to draw samples; it does not clamp or validate other
/// configurations.
#[derive(Clone, Debug)]
pub struct ConfigurationSpace {
    bounds: Vec<[f64; 2]>,
    samplers: Vec<Uniform<f64>>,
}

impl ConfigurationSpace {
    /// Creates a space with one `[min, max]` pair per dimension.
    ///
    /// A uniform distribution is prepared for every dimension up front, so
    /// [`ConfigurationSpace::sample`] cannot fail later.
    ///
    /// ### Parameters
    /// - `bounds` - Inclusive `[min, max]` per dimension; `min == max` pins
    ///   that dimension to a single value.
    ///
    /// ### Errors
    /// - [`RrtError::EmptySpace`] if `bounds` is empty.
    /// - [`RrtError::InvalidBounds`] if a bound is not finite, `min > max`,
    ///   or the range is too wide to sample uniformly (e.g.
    ///   `[-f64::MAX, f64::MAX]`).
    pub fn new(bounds: Vec<[f64; 2]>) -> Result<Self> {
        if bounds.is_empty() {
            return Err(RrtError::EmptySpace);
        }

        let samplers = bounds
            .iter()
            .enumerate()
            .map(|(dim, &[min, max])| {
                Uniform::new_inclusive(min, max)
                    .map_err(|_| RrtError::InvalidBounds { dim, min, max })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { bounds, samplers })
    }

    pub fn dim(&self) -> usize {
        self.bounds.len()
    }

    pub fn bounds(&self) -> &[[f64; 2]] {
        &self.bounds
    }

    /// Whether `config` has this space's dimensionality and lies inside
    /// every bound.
    pub fn contains(&self, config: &Configuration) -> bool {
        config.dim() == self.dim()
            && config
                .values()
                .iter()
                .zip(&self.bounds)
                .all(|(&v, &[min, max])| (min..=max).contains(&v))
    }

    /// Draws one value per dimension, uniformly from `[min, max]`.
    ///
    /// ### Parameters
    /// - `rng` - Random source; a seeded generator makes the draw reproducible.
    ///
    /// ### Returns
    /// A [`Configuration`] with [`ConfigurationSpace::dim`] coordinates.
    pub fn sample(&self, rng: &mut impl Rng) -> Configuration {
        let values = self
            .samplers
            .iter()
            .zip(&self.bounds)
            .map(|(uniform, &[min, max])| {
                if min == max {
                    min
                } else {
                    uniform.sample(rng)
                }
            })
            .collect();

        Configuration::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn samples_stay_within_bounds() {
        let space = ConfigurationSpace::new(vec![[-10.0, 10.0], [-25.0, 25.0]]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..1000 {
            let c = space.sample(&mut rng);
            assert_eq!(c.dim(), 2);
            assert!(c[0] >= -10.0 && c[0] <= 10.0, "x out of bounds: {c}");
            assert!(c[1] >= -25.0 && c[1] <= 25.0, "y out of bounds: {c}");
            assert!(space.contains(&c));
        }
    }

    #[test]
    fn one_dimensional_samples_stay_within_bounds() {
        let space = ConfigurationSpace::new(vec![[0.0, 2.0]]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        for _ in 0..100 {
            let c = space.sample(&mut rng);
            assert_eq!(c.dim(), 1);
            assert!(c[0] >= 0.0 && c[0] <= 2.0);
        }
    }

    #[test]
    fn degenerate_dimension_samples_its_only_value() {
        let space = ConfigurationSpace::new(vec![[8.0, 8.0], [-1.0, 1.0]]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let c = space.sample(&mut rng);
        assert_eq!(c[0], 8.0);
    }

    #[test]
    fn same_seed_gives_same_samples() {
        let space = ConfigurationSpace::new(vec![[-10.0, 10.0], [-25.0, 25.0]]).unwrap();
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(space.sample(&mut a), space.sample(&mut b));
        }
    }

    #[test]
    fn rejects_inverted_bounds() {
        let err = ConfigurationSpace::new(vec![[0.0, 1.0], [5.0, -5.0]]).unwrap_err();
        assert!(matches!(err, RrtError::InvalidBounds { dim: 1, .. }));
    }

    #[test]
    fn rejects_bounds_too_wide_to_sample() {
        assert!(matches!(
            ConfigurationSpace::new(vec![[-f64::MAX, f64::MAX]]),
            Err(RrtError::InvalidBounds { dim: 0, .. })
        ));
        assert!(matches!(
            ConfigurationSpace::new(vec![[0.0, 1.0], [0.0, f64::MAX]]),
            Err(RrtError::InvalidBounds { dim: 1, .. })
        ));
    }

    #[test]
    fn wide_but_finite_bounds_sample_without_panicking() {
        let space = ConfigurationSpace::new(vec![[-1e300, 1e300]]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            let c = space.sample(&mut rng);
            assert!(space.contains(&c));
        }
    }

    #[test]
    fn rejects_non_finite_and_empty_bounds() {
        assert!(matches!(
            ConfigurationSpace::new(vec![[f64::NAN, 1.0]]),
            Err(RrtError::InvalidBounds { dim: 0, .. })
        ));
        assert!(matches!(
            ConfigurationSpace::new(Vec::new()),
            Err(RrtError::EmptySpace)
        ));
    }
}
