use std::ops::RangeInclusive;

use crate::error::{FuzzyError, FuzzyResult};
use crate::linspace::Linspace;

/// Largest grid a universe may be sampled on.
pub const MAX_UNIVERSE_POINTS: usize = 1_000_000;

/// A discretized closed interval.
///
/// The grid always contains both endpoints. When `step` does not divide the
/// range evenly, the point count is rounded and the spacing adjusted slightly.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    min: f64,
    max: f64,
    points: Vec<f64>,
}

impl Universe {
    /// Fails on an empty or non-finite range, a step that is not positive or
    /// wider than the range, and grids larger than [`MAX_UNIVERSE_POINTS`].
    pub fn new(range: RangeInclusive<f64>, step: f64) -> FuzzyResult<Self> {
        let min = *range.start();
        let max = *range.end();
        let span = max - min;

        if !min.is_finite() || !max.is_finite() || !step.is_finite() || step <= 0. || span <= 0. || step > span {
            return Err(FuzzyError::InvalidUniverse { min, max, step });
        }

        let num = (span / step).round() + 1.;

        if !num.is_finite() || num > MAX_UNIVERSE_POINTS as f64 {
            return Err(FuzzyError::InvalidUniverse { min, max, step });
        }

        let num = num as usize;
        let points = Linspace::new(min, max, num).collect();

        Ok(Self { min, max, points })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.
    }

    /// Pulls `x` onto the universe. NaN has no nearest bound and lands on `min`.
    pub fn clamp(&self, x: f64) -> f64 {
        if x.is_nan() {
            self.min
        } else {
            x.clamp(self.min, self.max)
        }
    }
}

#[test]
fn test_universe_grid() {
    let universe = Universe::new(0. ..=100., 1.).unwrap();

    assert_eq!(universe.points().len(), 101);
    assert_eq!(universe.points()[0], 0.);
    assert_eq!(universe.points()[100], 100.);
    assert!(universe.points().windows(2).all(|w| w[0] < w[1]));
    assert_eq!(universe.midpoint(), 50.);

    let fine = Universe::new(0. ..=10., 0.5).unwrap();

    assert_eq!(fine.points().len(), 21);
    assert_eq!(fine.points()[20], 10.);
}

#[test]
fn test_universe_clamp() {
    let universe = Universe::new(0. ..=30., 1.).unwrap();

    assert_eq!(universe.clamp(-4.), 0.);
    assert_eq!(universe.clamp(45.), 30.);
    assert_eq!(universe.clamp(12.5), 12.5);
    assert_eq!(universe.clamp(f64::NAN), 0.);
    assert_eq!(universe.clamp(f64::INFINITY), 30.);
}

#[test]
fn test_universe_rejects_bad_bounds() {
    assert!(Universe::new(10. ..=0., 1.).is_err());
    assert!(Universe::new(0. ..=10., 0.).is_err());
    assert!(Universe::new(0. ..=10., -1.).is_err());
    assert!(Universe::new(0. ..=10., 20.).is_err());
    assert!(Universe::new(0. ..=f64::INFINITY, 1.).is_err());
}

#[test]
fn test_universe_rejects_oversized_grids() {
    assert!(matches!(
        Universe::new(0. ..=100., 1e-300),
        Err(FuzzyError::InvalidUniverse { step, .. }) if step == 1e-300
    ));
    assert!(Universe::new(0. ..=100., 1e-9).is_err());
    assert!(Universe::new(0. ..=100., f64::MIN_POSITIVE).is_err());

    let densest = Universe::new(0. ..=1., 1. / (MAX_UNIVERSE_POINTS - 1) as f64).unwrap();

    assert_eq!(densest.points().len(), MAX_UNIVERSE_POINTS);
}
