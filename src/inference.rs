use std::fmt::Debug;

use slotmap::SecondaryMap;
use tracing::{debug, trace, warn};

use crate::dsl::Expr;
use crate::error::{FuzzyError, FuzzyResult};
use crate::inputs::Inputs;
use crate::ops::*;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{FuzzyVariable, Membership, Variable, VariableKey, Variables};

/// Operator selection for a Mamdani-style evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MamdaniInference {
    and_op: AndOp,
    or_op: OrOp,
    imp_op: ImplicationOp,
    prod_link: ProductionLink,
    defuzz_op: DefuzzificationOp,
}

impl MamdaniInference {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        imp_op: ImplicationOp,
        prod_link: ProductionLink,
        defuzz_op: DefuzzificationOp,
    ) -> Self {
        Self {
            and_op,
            or_op,
            imp_op,
            prod_link,
            defuzz_op,
        }
    }

    pub fn defuzz_op(&self) -> DefuzzificationOp {
        self.defuzz_op
    }
}

/// Per-variable fuzzification of one set of inputs.
#[derive(Clone, Debug)]
pub struct Fuzzified<T>(SecondaryMap<VariableKey, Membership<T>>);

impl<T: Copy + PartialEq> Fuzzified<T> {
    pub fn get<I>(&self, var: Variable<I>) -> Option<&Membership<T>> {
        self.0.get(var.0)
    }

    fn degree(&self, key: VariableKey, term: T) -> f64 {
        self.0.get(key).map_or(0., |membership| membership.get(term))
    }
}

/// A validated variable set and rule base with a single output variable.
///
/// Immutable once built; evaluation only reads it, so one system can serve any
/// number of threads.
pub struct FuzzySystem<T> {
    variables: Variables<T>,
    rules: Rules<T>,
    inference: MamdaniInference,
    output: VariableKey,
}

impl<T: Copy + PartialEq + Debug> FuzzySystem<T> {
    /// Checks every rule against the declared variables before accepting them:
    /// each proposition must name a declared variable and one of its terms, and
    /// every consequent must be a single proposition on the same output variable.
    pub fn new(variables: Variables<T>, rules: Rules<T>, inference: MamdaniInference) -> FuzzyResult<Self> {
        let mut output: Option<VariableKey> = None;

        for (i, rule) in rules.iter().enumerate() {
            for (key, term) in rule.premise.propositions() {
                Self::check_proposition(&variables, i, key, term)?;
            }

            let Expr::Is(key, term) = &rule.consequence else {
                return Err(FuzzyError::CompoundConsequent { rule: i });
            };

            Self::check_proposition(&variables, i, *key, term)?;

            match output {
                None => output = Some(*key),
                Some(expected) if expected != *key => {
                    return Err(FuzzyError::MultipleOutputs {
                        rule: i,
                        expected: variables.0[expected].name().to_owned(),
                        found: variables.0[*key].name().to_owned(),
                    });
                },
                Some(_) => {},
            }
        }

        let output = output.ok_or(FuzzyError::EmptyRuleBase)?;

        debug!(
            variables = variables.len(),
            rules = rules.len(),
            output = variables.0[output].name(),
            "fuzzy system built"
        );

        Ok(Self {
            variables,
            rules,
            inference,
            output,
        })
    }

    fn check_proposition(variables: &Variables<T>, rule: usize, key: VariableKey, term: &T) -> FuzzyResult<()> {
        let var = variables.0.get(key).ok_or(FuzzyError::UnknownVariable { rule })?;

        if var.membership_function(*term).is_none() {
            return Err(FuzzyError::UnknownTerm {
                rule,
                variable: var.name().to_owned(),
                term: format!("{term:?}"),
            });
        }

        Ok(())
    }

    pub fn variables(&self) -> &Variables<T> {
        &self.variables
    }

    pub fn rules(&self) -> &Rules<T> {
        &self.rules
    }

    pub fn inference(&self) -> &MamdaniInference {
        &self.inference
    }

    pub fn output_variable(&self) -> &FuzzyVariable<T> {
        &self.variables.0[self.output]
    }

    /// Degree of `x` in every term of `var`, or `None` if `var` belongs to
    /// another system.
    pub fn fuzzify<I>(&self, var: Variable<I>, x: f64) -> Option<Membership<T>> {
        self.variables.get(var).map(|v| v.fuzzify(x))
    }

    /// Fuzzifies every input variable. A variable without a value keeps no
    /// memberships, so every proposition on it has degree zero.
    pub fn fuzzify_inputs(&self, inputs: &Inputs) -> Fuzzified<T> {
        let mut fuzzified = SecondaryMap::with_capacity(self.variables.len());

        for (key, var) in self.variables.0.iter() {
            if key == self.output {
                continue;
            }

            match inputs.0.get(&key) {
                Some(value) => {
                    fuzzified.insert(key, var.fuzzify(*value));
                },
                None => warn!(variable = %var.name(), "no input supplied; memberships treated as zero"),
            }
        }

        Fuzzified(fuzzified)
    }

    /// Firing strength of the rule at `index`, or `None` past the end of the
    /// rule base.
    pub fn evaluate_rule(&self, index: usize, fuzzified: &Fuzzified<T>) -> Option<f64> {
        self.rules.0.get(index).map(|rule| self.strength(&rule.premise, fuzzified))
    }

    fn strength(&self, expr: &Expr<T>, fuzzified: &Fuzzified<T>) -> f64 {
        match expr {
            Expr::Is(key, term) => fuzzified.degree(*key, *term),
            Expr::And(exprs) => exprs
                .iter()
                .map(|expr| self.strength(expr, fuzzified))
                .reduce(|u, v| self.inference.and_op.call(u, v))
                .unwrap_or(0.),
            Expr::Or(exprs) => exprs
                .iter()
                .map(|expr| self.strength(expr, fuzzified))
                .reduce(|u, v| self.inference.or_op.call(u, v))
                .unwrap_or(0.),
        }
    }

    /// Runs one full Mamdani pass and never fails.
    ///
    /// An input variable missing from `inputs` is not an error here: it is
    /// logged with `warn!` and all of its memberships count as zero, so every
    /// rule mentioning it fires at zero. If that leaves the aggregate empty the
    /// crisp value is the output universe's midpoint and
    /// [`Outputs::any_rule_fired`] is false. Callers that need a hard failure
    /// must check their inputs first; [`crate::PriorityEngine`] always supplies
    /// all three.
    pub fn eval(&self, inputs: &Inputs) -> Outputs<T> {
        let fuzzified = self.fuzzify_inputs(inputs);
        let output = self.output_variable();
        let MamdaniInference {
            or_op,
            imp_op,
            prod_link,
            defuzz_op,
            ..
        } = self.inference;

        // Fire rules
        let firing_strengths: Vec<f64> = self
            .rules
            .iter()
            .map(|rule| self.strength(&rule.premise, &fuzzified))
            .collect();

        // Rules sharing a consequent are merged by the or operator
        let mut activations: Vec<(T, f64)> = output.terms().iter().map(|(term, _)| (*term, 0.)).collect();

        for (rule, strength) in self.rules.iter().zip(&firing_strengths) {
            if let Expr::Is(_, term) = &rule.consequence {
                if let Some((_, activation)) = activations.iter_mut().find(|(t, _)| t == term) {
                    *activation = or_op.call(*activation, *strength);
                }
            }
        }

        // Sample the shaped consequents
        let universe = if defuzz_op.needs_refined_universe() {
            let kinks = output
                .terms()
                .iter()
                .zip(&activations)
                .flat_map(|((_, mf), (_, activation))| {
                    mf.breakpoints().into_iter().chain(mf.level_crossings(*activation))
                })
                .collect::<Vec<_>>();

            output.refined_universe(kinks)
        } else {
            output.universe().points().to_vec()
        };

        // Aggregate
        let aggregate = output
            .terms()
            .iter()
            .zip(&activations)
            .map(|((_, mf), (_, activation))| {
                imp_op
                    .call(*activation, universe.iter().map(|y| mf.eval(*y)))
                    .collect::<Vec<_>>()
            })
            .reduce(|agg, curve| prod_link.call(agg, curve).collect())
            .unwrap_or_else(|| vec![0.; universe.len()]);

        // Defuzzificate
        let fired = aggregate.iter().sum::<f64>() > 0.;
        let crisp = if fired {
            defuzz_op.call(&universe, &aggregate)
        } else {
            let midpoint = output.universe().midpoint();

            warn!(output = %output.name(), midpoint, "no rule fired; falling back to the universe midpoint");

            midpoint
        };

        trace!(crisp, fired, "inference complete");

        let mut clamped = SecondaryMap::with_capacity(fuzzified.0.len());

        for (key, membership) in fuzzified.0.iter() {
            clamped.insert(key, membership.value());
        }

        Outputs::new(crisp, fired, clamped, firing_strengths, activations, universe, aggregate)
    }

    /// The output term with the greatest membership at `score`. Ties go to the
    /// term declared first.
    ///
    /// This re-evaluates the output sets at a single point, so near an
    /// intersection it can name a different term than the one that dominated
    /// the aggregate.
    pub fn label_for(&self, score: f64) -> T {
        match self.output_variable().fuzzify(score).dominant() {
            Some(term) => term,
            None => unreachable!("declared variables always hold at least one term"),
        }
    }
}
