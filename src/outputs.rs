use slotmap::SecondaryMap;

use crate::variable::{Variable, VariableKey};

/// Everything one evaluation produced, from the clamped inputs down to the
/// defuzzified value.
#[derive(Clone, Debug)]
pub struct Outputs<T> {
    crisp: f64,
    fired: bool,
    inputs: SecondaryMap<VariableKey, f64>,
    firing_strengths: Vec<f64>,
    activations: Vec<(T, f64)>,
    universe: Vec<f64>,
    aggregate: Vec<f64>,
}

impl<T: Copy + PartialEq> Outputs<T> {
    pub(crate) fn new(
        crisp: f64,
        fired: bool,
        inputs: SecondaryMap<VariableKey, f64>,
        firing_strengths: Vec<f64>,
        activations: Vec<(T, f64)>,
        universe: Vec<f64>,
        aggregate: Vec<f64>,
    ) -> Self {
        Self {
            crisp,
            fired,
            inputs,
            firing_strengths,
            activations,
            universe,
            aggregate,
        }
    }

    /// The defuzzified output, unrounded.
    pub fn crisp(&self) -> f64 {
        self.crisp
    }

    /// False when the aggregate was identically zero and `crisp` fell back to
    /// the output universe's midpoint.
    pub fn any_rule_fired(&self) -> bool {
        self.fired
    }

    /// The input value actually used for `var`, after clamping.
    pub fn input<I>(&self, var: Variable<I>) -> Option<f64> {
        self.inputs.get(var.0).copied()
    }

    /// Firing strength of each rule, in rule base order.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    /// Height each output term was clipped at.
    pub fn activation(&self, term: impl Into<T>) -> f64 {
        let term = term.into();

        self.activations
            .iter()
            .find(|(t, _)| *t == term)
            .map_or(0., |(_, activation)| *activation)
    }

    pub fn activations(&self) -> &[(T, f64)] {
        &self.activations
    }

    /// The aggregated output set as `(point, membership)` samples.
    pub fn aggregate(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.universe.iter().copied().zip(self.aggregate.iter().copied())
    }
}
