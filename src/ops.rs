use std::iter::Sum;
use std::ops::AddAssign;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::math::interp;

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => ProductionLink::Min.apply(u, v),
            Self::Prod => ProductionLink::Prod.apply(u, v),
            Self::BoundedProd => ProductionLink::BoundedProd.apply(u, v),
            Self::DrasticProd => ProductionLink::DrasticProd.apply(u, v),
        }
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise, and for merging rules that share a consequent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => ProductionLink::Max.apply(u, v),
            Self::ProbOr => ProductionLink::ProbOr.apply(u, v),
            Self::BoundedSum => ProductionLink::BoundedSum.apply(u, v),
            Self::DrasticSum => ProductionLink::DrasticSum.apply(u, v),
        }
    }
}

/// Implication operator shaping a consequent set by its rule's activation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationOp {
    /// Mamdani: clip the set at the activation height
    #[default]
    Min,
    /// Larsen: scale the set by the activation
    Prod,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, activation: F, membership: impl IntoIterator<Item = F>) -> impl Iterator<Item = F> {
        membership.into_iter().map(move |m| match self {
            Self::Min => F::min(activation, m),
            Self::Prod => activation * m,
        })
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionLink {
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl ProductionLink {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.apply(u, v))
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Discrete centroid over the grid points: sum(y * mu) / sum(mu)
    #[default]
    Centroid,
    /// Center of Gravity of the piecewise-linear curve through the samples
    Cog,
    /// Bisector of Area
    Boa,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Largest value for which the membership function is maximum
    Lom,
    /// Smallest value for which the membership function is maximum
    Som,
}

impl DefuzzificationOp {
    /// Whether the method integrates between samples, and so needs the grid
    /// refined with every breakpoint of the aggregated curve.
    pub fn needs_refined_universe(self) -> bool {
        !matches!(self, Self::Centroid)
    }

    /// Callers guarantee `universe` is sorted, matches `membership` in length and
    /// that the membership is not identically zero.
    pub fn call<F: Float + Sum + AddAssign>(self, universe: &[F], membership: &[F]) -> F {
        match self {
            Self::Centroid => {
                let (num, den) = universe
                    .iter()
                    .zip(membership)
                    .fold((F::zero(), F::zero()), |(num, den), (&u, &m)| (num + u * m, den + m));

                num / den
            },
            Self::Cog => {
                let n_areas = universe.len().saturating_sub(1);
                let mut areas = Vec::with_capacity(n_areas);
                let mut centroids = Vec::with_capacity(n_areas);
                let two = F::one() + F::one();
                let three = two + F::one();

                for i in 0..n_areas {
                    let base = universe[i + 1] - universe[i];
                    let area_rect = F::min(membership[i], membership[i + 1]) * base;
                    let center_rect = universe[i] + base / two;
                    let (area_tria, center_tri) = if membership[i + 1] == membership[i] {
                        (F::zero(), F::zero())
                    } else if membership[i + 1] > membership[i] {
                        (
                            base * F::abs(membership[i + 1] - membership[i]) / two,
                            universe[i] + two / three * base,
                        )
                    } else {
                        (
                            base * F::abs(membership[i + 1] - membership[i]) / two,
                            universe[i] + F::one() / three * base,
                        )
                    };
                    let area = area_rect + area_tria;
                    let center = if area == F::zero() {
                        F::zero()
                    } else {
                        (area_rect * center_rect + area_tria * center_tri) / area
                    };

                    areas.push(area);
                    centroids.push(center);
                }

                let den = areas.iter().copied().sum::<F>();
                let num = areas
                    .into_iter()
                    .zip(centroids)
                    .map(|(area, cent)| area * cent)
                    .sum::<F>();

                num / den
            },
            Self::Boa => {
                let n_areas = universe.len().saturating_sub(1);
                let two = F::one() + F::one();
                let areas: Vec<F> = (0..n_areas)
                    .map(|i| (membership[i] + membership[i + 1]) * (universe[i + 1] - universe[i]) / two)
                    .collect();

                let total_area = areas.iter().copied().sum::<F>();
                let target = total_area / two;
                let mut cum_area = F::zero();

                for (i, area) in areas.iter().copied().enumerate() {
                    cum_area += area;

                    if cum_area >= target {
                        let coords = [(cum_area - area, universe[i]), (cum_area, universe[i + 1])];

                        return interp(Some(target), &coords).pop().unwrap_or(universe[i]);
                    }
                }

                universe.last().copied().unwrap_or_else(F::zero)
            },
            Self::Mom => {
                let (len, sum) = Self::maxima(universe, membership).fold((0usize, F::zero()), |(len, sum), u| {
                    (len + 1, sum + u)
                });

                sum / F::from(len).unwrap_or_else(F::one)
            },
            Self::Lom => Self::maxima(universe, membership).fold(F::neg_infinity(), F::max),
            Self::Som => Self::maxima(universe, membership).fold(F::infinity(), F::min),
        }
    }

    fn maxima<'a, F: Float + 'a>(universe: &'a [F], membership: &'a [F]) -> impl Iterator<Item = F> + 'a {
        let maximum = membership.iter().copied().fold(F::neg_infinity(), F::max);

        universe
            .iter()
            .copied()
            .zip(membership.iter().copied())
            .filter_map(move |(u, m)| if m == maximum { Some(u) } else { None })
    }
}

#[test]
fn test_t_norms_and_conorms() {
    assert_eq!(AndOp::Min.call(0.3, 0.7), 0.3);
    assert_eq!(AndOp::Prod.call(0.5, 0.5), 0.25);
    assert_eq!(AndOp::BoundedProd.call(0.25, 0.5), 0.);
    assert_eq!(AndOp::DrasticProd.call(0.4, 1.), 0.4);
    assert_eq!(AndOp::DrasticProd.call(0.4, 0.9), 0.);
    assert_eq!(OrOp::Max.call(0.3, 0.7), 0.7);
    assert_eq!(OrOp::ProbOr.call(0.5, 0.5), 0.75);
    assert_eq!(OrOp::BoundedSum.call(0.75, 0.5), 1.);
    assert_eq!(OrOp::DrasticSum.call(0., 0.4), 0.4);
    assert_eq!(OrOp::DrasticSum.call(0.2, 0.4), 1.);
}

#[test]
fn test_implication_clips_or_scales() {
    let set = [0., 0.5, 1., 0.5, 0.];

    assert_eq!(
        ImplicationOp::Min.call(0.6, set).collect::<Vec<_>>(),
        vec![0., 0.5, 0.6, 0.5, 0.]
    );
    assert_eq!(
        ImplicationOp::Prod.call(0.5, set).collect::<Vec<_>>(),
        vec![0., 0.25, 0.5, 0.25, 0.]
    );
    assert_eq!(
        ProductionLink::Max.call([0., 0.2, 0.9], [0.5, 0.1, 0.3]).collect::<Vec<_>>(),
        vec![0.5, 0.2, 0.9]
    );
}

#[test]
fn test_defuzzification_of_a_plateau() {
    let universe = [0., 1., 2., 3., 4.];
    let membership = [0., 1., 1., 1., 0.];

    assert_eq!(DefuzzificationOp::Centroid.call(&universe, &membership), 2.);
    assert!((DefuzzificationOp::Cog.call(&universe, &membership) - 2.).abs() < 1e-12);
    assert_eq!(DefuzzificationOp::Boa.call(&universe, &membership), 2.);
    assert_eq!(DefuzzificationOp::Mom.call(&universe, &membership), 2.);
    assert_eq!(DefuzzificationOp::Som.call(&universe, &membership), 1.);
    assert_eq!(DefuzzificationOp::Lom.call(&universe, &membership), 3.);
}

#[test]
fn test_cog_integrates_between_samples() {
    // Right triangle rising from 0 to 3: its centroid sits at two thirds.
    let universe = [0., 3.];
    let membership = [0., 1.];

    assert!((DefuzzificationOp::Cog.call(&universe, &membership) - 2.).abs() < 1e-12);
    assert_eq!(DefuzzificationOp::Centroid.call(&universe, &membership), 3.);
}
