//! Mamdani fuzzy inference, and a task-priority knowledge base built on it.
//!
//! Crisp inputs are clamped onto their universes and fuzzified against
//! overlapping membership functions. Each rule fires with the AND of its
//! premise, clips its consequent set at that strength, the clipped sets are
//! unioned pointwise and the union is reduced to one crisp value by a centroid.
//!
//! The default centroid is the discrete `sum(y * mu) / sum(mu)` over the grid
//! points. Set `defuzzification = "cog"` in [`PriorityConfig`] for the
//! piecewise-linear centre of gravity that scores the extremes 9.29 and 90.71
//! instead of 9.02 and 90.98.
//!
//! ```rust,ignore
//! use fuzzy_priority::{Priority, PriorityEngine};
//!
//! let engine = PriorityEngine::new()?;
//! let result = engine.prioritize(0., 10., 10.);
//!
//! assert_eq!(result.label, Priority::VeryHigh);
//! ```

mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod priority;
mod rules;
mod terms;
mod universe;
mod variable;

pub use config::{PriorityConfig, DEFAULT_STEP};
pub use dsl::Expr;
pub use error::{FuzzyError, FuzzyResult};
pub use inference::{Fuzzified, FuzzySystem, MamdaniInference};
pub use inputs::Inputs;
pub use membership::{MembershipFunction, Shape};
pub use ops::{AndOp, DefuzzificationOp, ImplicationOp, OrOp, ProductionLink};
pub use outputs::Outputs;
pub use priority::{
    round_score, Deadline, Difficulty, Importance, InferenceResult, Priority, PriorityEngine, TaskInputs, TaskTerm,
    MAX_DEADLINE_DAYS, MAX_RATING, MAX_SCORE,
};
pub use rules::{Rule, Rules};
pub use terms::{Key, Term, Terms};
pub use universe::{Universe, MAX_UNIVERSE_POINTS};
pub use variable::{FuzzyVariable, Membership, Variable, VariableKey, Variables};
