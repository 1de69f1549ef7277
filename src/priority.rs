//! The task-priority knowledge base: three inputs, one output, sixteen rules.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::PriorityConfig;
use crate::error::FuzzyResult;
use crate::inference::FuzzySystem;
use crate::inputs::Inputs;
use crate::membership::MembershipFunction;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::terms::{Key, Terms};
use crate::variable::{Membership, Variable, Variables};

pub const MAX_DEADLINE_DAYS: f64 = 30.;
pub const MAX_RATING: f64 = 10.;
pub const MAX_SCORE: f64 = 100.;

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deadline {
    Close,
    Moderate,
    Far,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

/// Output sets, declared lowest first. Labelling ties resolve in this order.
#[derive(Clone, Copy, Debug, Eq, Hash, Key, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every term of the priority system.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TaskTerm {
    Deadline(Deadline),
    Importance(Importance),
    Difficulty(Difficulty),
    Priority(Priority),
}

macro_rules! task_terms {
    ($($term:ident),* $(,)?) => {
        $(
            impl From<$term> for TaskTerm {
                fn from(term: $term) -> Self {
                    Self::$term(term)
                }
            }
        )*
    };
}

task_terms!(Deadline, Importance, Difficulty, Priority);

/// The crisp inputs of one task, as used after clamping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskInputs {
    pub days_to_deadline: f64,
    pub importance: f64,
    pub difficulty: f64,
}

impl TaskInputs {
    pub fn new(days_to_deadline: f64, importance: f64, difficulty: f64) -> Self {
        Self {
            days_to_deadline,
            importance,
            difficulty,
        }
    }
}

/// Rounds a score to two decimals. Reporting only; the engine keeps the raw value.
pub fn round_score(score: f64) -> f64 {
    (score * 100.).round() / 100.
}

fn serialize_rounded<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_score(*score))
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Unrounded centroid in `[0, 100]`; serialised with two decimals.
    #[serde(serialize_with = "serialize_rounded")]
    pub score: f64,
    pub label: Priority,
    pub inputs: TaskInputs,
}

impl InferenceResult {
    pub fn rounded_score(&self) -> f64 {
        round_score(self.score)
    }
}

/// The priority knowledge base, built once and evaluated any number of times.
pub struct PriorityEngine {
    system: FuzzySystem<TaskTerm>,
    deadline: Variable<Deadline>,
    importance: Variable<Importance>,
    difficulty: Variable<Difficulty>,
    priority: Variable<Priority>,
}

impl PriorityEngine {
    pub fn new() -> FuzzyResult<Self> {
        Self::with_config(&PriorityConfig::default())
    }

    pub fn with_config(config: &PriorityConfig) -> FuzzyResult<Self> {
        let step = Some(config.step);
        let mut vars = Variables::<TaskTerm>::new();

        let deadline = vars.add(
            "deadline_days",
            0. ..=MAX_DEADLINE_DAYS,
            Terms::new()
                .with(Deadline::Close, MembershipFunction::trapezoid(0., 0., 1., 3.)?)
                .with(Deadline::Moderate, MembershipFunction::triangle(2., 7., 14.)?)
                .with(Deadline::Far, MembershipFunction::trapezoid(10., 20., 30., 30.)?),
            step,
        )?;
        let importance = vars.add(
            "importance",
            0. ..=MAX_RATING,
            Terms::new()
                .with(Importance::Low, MembershipFunction::trapezoid(0., 0., 2., 4.)?)
                .with(Importance::Medium, MembershipFunction::triangle(3., 5., 7.)?)
                .with(Importance::High, MembershipFunction::trapezoid(6., 8., 10., 10.)?),
            step,
        )?;
        let difficulty = vars.add(
            "difficulty",
            0. ..=MAX_RATING,
            Terms::new()
                .with(Difficulty::Easy, MembershipFunction::trapezoid(0., 0., 2., 4.)?)
                .with(Difficulty::Moderate, MembershipFunction::triangle(3., 5., 7.)?)
                .with(Difficulty::Hard, MembershipFunction::trapezoid(6., 8., 10., 10.)?),
            step,
        )?;
        let priority = vars.add(
            "priority",
            0. ..=MAX_SCORE,
            Terms::new()
                .with(Priority::VeryLow, MembershipFunction::trapezoid(0., 0., 10., 25.)?)
                .with(Priority::Low, MembershipFunction::triangle(15., 30., 45.)?)
                .with(Priority::Medium, MembershipFunction::triangle(35., 50., 65.)?)
                .with(Priority::High, MembershipFunction::triangle(55., 70., 85.)?)
                .with(Priority::VeryHigh, MembershipFunction::trapezoid(75., 90., 100., 100.)?),
            step,
        )?;

        let rules = rule_base(deadline, importance, difficulty, priority);
        let system = FuzzySystem::new(vars, rules, config.inference())?;

        Ok(Self {
            system,
            deadline,
            importance,
            difficulty,
            priority,
        })
    }

    /// Scores one task. Out-of-range inputs are clamped, never rejected, and
    /// the clamped values are echoed back in the result.
    ///
    /// With the default [`DefuzzificationOp::Centroid`](crate::DefuzzificationOp::Centroid) the score is the
    /// discrete centroid over the grid points, so the extremes come out at
    /// 9.02 and 90.98. Scores from a piecewise-linear centre of gravity (9.29
    /// and 90.71 at the extremes) need `defuzzification = "cog"` in the
    /// [`PriorityConfig`].
    pub fn prioritize(&self, days_to_deadline: f64, importance: f64, difficulty: f64) -> InferenceResult {
        let outputs = self.evaluate(days_to_deadline, importance, difficulty);
        let score = outputs.crisp();

        InferenceResult {
            score,
            label: self.label_for(score),
            inputs: TaskInputs {
                days_to_deadline: outputs.input(self.deadline).unwrap_or(days_to_deadline),
                importance: outputs.input(self.importance).unwrap_or(importance),
                difficulty: outputs.input(self.difficulty).unwrap_or(difficulty),
            },
        }
    }

    /// Scores many tasks in parallel; results keep the order of `tasks`.
    pub fn prioritize_many(&self, tasks: &[TaskInputs]) -> Vec<InferenceResult> {
        tasks
            .par_iter()
            .map(|task| self.prioritize(task.days_to_deadline, task.importance, task.difficulty))
            .collect()
    }

    /// The full evaluation trace behind [`PriorityEngine::prioritize`].
    pub fn evaluate(&self, days_to_deadline: f64, importance: f64, difficulty: f64) -> Outputs<TaskTerm> {
        let inputs = Inputs::new()
            .with(self.deadline, days_to_deadline)
            .with(self.importance, importance)
            .with(self.difficulty, difficulty);

        self.system.eval(&inputs)
    }

    pub fn label_for(&self, score: f64) -> Priority {
        match self.system.label_for(score) {
            TaskTerm::Priority(priority) => priority,
            other => unreachable!("priority output only declares priority terms, got {other:?}"),
        }
    }

    pub fn fuzzify<I>(&self, var: Variable<I>, x: f64) -> Option<Membership<TaskTerm>> {
        self.system.fuzzify(var, x)
    }

    pub fn system(&self) -> &FuzzySystem<TaskTerm> {
        &self.system
    }

    pub fn deadline(&self) -> Variable<Deadline> {
        self.deadline
    }

    pub fn importance(&self) -> Variable<Importance> {
        self.importance
    }

    pub fn difficulty(&self) -> Variable<Difficulty> {
        self.difficulty
    }

    pub fn priority(&self) -> Variable<Priority> {
        self.priority
    }
}

// Rules 14 and 15 repeat the coverage of 4 and 3. Max aggregation makes the
// repeats harmless; they stay so edits to the sets keep the region covered.
fn rule_base(
    deadline: Variable<Deadline>,
    importance: Variable<Importance>,
    difficulty: Variable<Difficulty>,
    priority: Variable<Priority>,
) -> Rules<TaskTerm> {
    let mut rules = Rules::with_capacity(16);

    // Urgency and importance dominate
    rules.add(
        deadline.is(Deadline::Close).and(importance.is(Importance::High)),
        priority.is(Priority::VeryHigh),
    );
    rules.add(
        deadline.is(Deadline::Close).and(importance.is(Importance::Medium)),
        priority.is(Priority::High),
    );
    rules.add(
        deadline.is(Deadline::Moderate).and(importance.is(Importance::High)),
        priority.is(Priority::High),
    );
    rules.add(
        deadline
            .is(Deadline::Far)
            .and2(importance.is(Importance::High), difficulty.is(Difficulty::Hard)),
        priority.is(Priority::High),
    );
    rules.add(
        deadline
            .is(Deadline::Far)
            .and2(importance.is(Importance::High), difficulty.is(Difficulty::Easy)),
        priority.is(Priority::Medium),
    );

    // Low importance pulls priority down
    rules.add(
        deadline.is(Deadline::Far).and(importance.is(Importance::Low)),
        priority.is(Priority::VeryLow),
    );
    rules.add(
        deadline.is(Deadline::Moderate).and(importance.is(Importance::Low)),
        priority.is(Priority::Low),
    );
    rules.add(
        deadline.is(Deadline::Close).and(importance.is(Importance::Low)),
        priority.is(Priority::Medium),
    );

    // Difficulty adjustments
    rules.add(
        deadline
            .is(Deadline::Close)
            .and2(importance.is(Importance::High), difficulty.is(Difficulty::Hard)),
        priority.is(Priority::VeryHigh),
    );
    rules.add(
        deadline
            .is(Deadline::Close)
            .and2(importance.is(Importance::Medium), difficulty.is(Difficulty::Easy)),
        priority.is(Priority::High),
    );
    rules.add(
        deadline.is(Deadline::Moderate).and(importance.is(Importance::Medium)),
        priority.is(Priority::Medium),
    );
    rules.add(
        difficulty
            .is(Difficulty::Hard)
            .and2(importance.is(Importance::Low), deadline.is(Deadline::Far)),
        priority.is(Priority::VeryLow),
    );
    rules.add(
        difficulty
            .is(Difficulty::Easy)
            .and2(importance.is(Importance::Medium), deadline.is(Deadline::Far)),
        priority.is(Priority::Low),
    );

    // Coverage
    rules.add(
        deadline.is(Deadline::Far).and(importance.is(Importance::High)),
        priority.is(Priority::High),
    );
    rules.add(
        deadline.is(Deadline::Moderate).and(importance.is(Importance::High)),
        priority.is(Priority::High),
    );
    rules.add(
        deadline
            .is(Deadline::Far)
            .and2(importance.is(Importance::Medium), difficulty.is(Difficulty::Moderate)),
        priority.is(Priority::Low),
    );

    rules
}
