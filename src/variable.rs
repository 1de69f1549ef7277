use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};
use tracing::{debug, trace};

use crate::error::{FuzzyError, FuzzyResult};
use crate::membership::MembershipFunction;
use crate::terms::{Term, Terms};
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Typed handle to a declared variable. `I` is the variable's own term enum.
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Variable<I> {
    pub fn key(&self) -> VariableKey {
        self.0
    }
}

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

impl<I> Debug for Variable<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

/// Every variable of a fuzzy system, inputs and output alike.
pub struct Variables<T>(pub(crate) SlotMap<VariableKey, FuzzyVariable<T>>);

impl<T: Copy + PartialEq + Debug> Variables<T> {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    /// Declares a variable over `universe_range`. If the step value is not
    /// provided, it defaults to 1.
    pub fn add<I: Into<T> + Term + Debug>(
        &mut self,
        name: &str,
        universe_range: RangeInclusive<f64>,
        terms: Terms<I>,
        step: Option<f64>,
    ) -> FuzzyResult<Variable<I>> {
        let universe = Universe::new(universe_range, step.unwrap_or(1.))?;

        if terms.is_empty() {
            return Err(FuzzyError::EmptyVariable {
                variable: name.to_owned(),
            });
        }

        let mut declared = Vec::with_capacity(terms.len());

        for (term, membership) in terms.0.iter() {
            let (lo, hi) = membership.support();

            if hi < universe.min() || lo > universe.max() {
                return Err(FuzzyError::TermOutsideUniverse {
                    variable: name.to_owned(),
                    term: format!("{term:?}"),
                });
            }

            declared.push((term.into(), *membership));
        }

        trace!(variable = name, terms = declared.len(), points = universe.points().len(), "variable declared");

        let key = self.0.insert(FuzzyVariable {
            name: name.to_owned(),
            universe,
            terms: declared,
        });

        Ok(Variable(key, PhantomData))
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<&FuzzyVariable<T>> {
        self.0.get(var.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Copy + PartialEq + Debug> Default for Variables<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A universe and the named fuzzy sets covering it.
#[derive(Clone, Debug)]
pub struct FuzzyVariable<T> {
    name: String,
    universe: Universe,
    terms: Vec<(T, MembershipFunction)>,
}

impl<T: Copy + PartialEq> FuzzyVariable<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Terms in declaration order.
    pub fn terms(&self) -> &[(T, MembershipFunction)] {
        &self.terms
    }

    pub fn membership_function(&self, term: T) -> Option<&MembershipFunction> {
        self.terms.iter().find(|(t, _)| *t == term).map(|(_, mf)| mf)
    }

    /// Degree of `x` in every term, after clamping `x` onto the universe.
    pub fn fuzzify(&self, x: f64) -> Membership<T> {
        let clamped = self.universe.clamp(x);

        if clamped != x {
            debug!(variable = %self.name, value = x, clamped, "input clamped to universe");
        }

        Membership {
            value: clamped,
            degrees: self.terms.iter().map(|(term, mf)| (*term, mf.eval(clamped))).collect(),
        }
    }

    /// The grid merged with `extra` points, clamped to the universe, sorted and
    /// deduplicated. Lets area-based defuzzifiers see every kink of a clipped curve.
    pub(crate) fn refined_universe(&self, extra: impl IntoIterator<Item = f64>) -> Vec<f64> {
        let extra = extra
            .into_iter()
            .filter(|p| p.is_finite())
            .map(|p| self.universe.clamp(p));
        let mut universe: Vec<_> = self.universe.points().iter().copied().chain(extra).collect();

        universe.sort_unstable_by(f64::total_cmp);
        universe.dedup();
        universe
    }
}

/// The result of fuzzifying one crisp value: the clamped value and its degree
/// in each term, in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Membership<T> {
    value: f64,
    degrees: Vec<(T, f64)>,
}

impl<T: Copy + PartialEq> Membership<T> {
    /// The crisp value after clamping.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Degree in `term`, or zero if the variable has no such term.
    pub fn get(&self, term: impl Into<T>) -> f64 {
        let term = term.into();

        self.degrees
            .iter()
            .find(|(t, _)| *t == term)
            .map_or(0., |(_, degree)| *degree)
    }

    pub fn iter(&self) -> impl Iterator<Item = (T, f64)> + '_ {
        self.degrees.iter().copied()
    }

    /// The first term holding the largest degree.
    pub fn dominant(&self) -> Option<T> {
        let mut best: Option<(T, f64)> = None;

        for (term, degree) in self.iter() {
            if best.map_or(true, |(_, top)| degree > top) {
                best = Some((term, degree));
            }
        }

        best.map(|(term, _)| term)
    }
}
