/// Errors raised while building a fuzzy system.
///
/// Evaluation itself never fails: every variant here is produced while universes,
/// membership functions, rules or configuration are being put together.
#[derive(Debug, thiserror::Error)]
pub enum FuzzyError {
    #[error("membership breakpoints must be finite and non-decreasing, got {points:?}")]
    InvalidBreakpoints { points: Vec<f64> },

    #[error("invalid universe [{min}, {max}] with step {step}")]
    InvalidUniverse { min: f64, max: f64, step: f64 },

    #[error("variable `{variable}` declares no terms")]
    EmptyVariable { variable: String },

    #[error("term `{term}` of variable `{variable}` lies entirely outside its universe")]
    TermOutsideUniverse { variable: String, term: String },

    #[error("rule {rule} references a variable that was never declared")]
    UnknownVariable { rule: usize },

    #[error("rule {rule} references term `{term}` which variable `{variable}` does not define")]
    UnknownTerm {
        rule: usize,
        variable: String,
        term: String,
    },

    #[error("rule {rule} has a compound consequent; a single `variable is term` is required")]
    CompoundConsequent { rule: usize },

    #[error("rule {rule} targets output `{found}` but earlier rules target `{expected}`")]
    MultipleOutputs {
        rule: usize,
        expected: String,
        found: String,
    },

    #[error("rule base is empty")]
    EmptyRuleBase,

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type FuzzyResult<T> = Result<T, FuzzyError>;
