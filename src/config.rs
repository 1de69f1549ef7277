use serde::{Deserialize, Serialize};

use crate::error::FuzzyResult;
use crate::inference::MamdaniInference;
use crate::ops::{AndOp, DefuzzificationOp, ImplicationOp, OrOp, ProductionLink};

/// Grid spacing used for every universe unless configured otherwise.
pub const DEFAULT_STEP: f64 = 1.0;

/// Tunables for the priority engine. The defaults reproduce the classic
/// min/max Mamdani pipeline with a discrete centroid on a unit grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityConfig {
    /// Spacing of the grid every universe is sampled on.
    pub step: f64,
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub implication: ImplicationOp,
    pub aggregation: ProductionLink,
    pub defuzzification: DefuzzificationOp,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            and_op: AndOp::default(),
            or_op: OrOp::default(),
            implication: ImplicationOp::default(),
            aggregation: ProductionLink::default(),
            defuzzification: DefuzzificationOp::default(),
        }
    }
}

impl PriorityConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> FuzzyResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn inference(&self) -> MamdaniInference {
        MamdaniInference::new(
            self.and_op,
            self.or_op,
            self.implication,
            self.aggregation,
            self.defuzzification,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FuzzyError;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(PriorityConfig::from_toml_str("").unwrap(), PriorityConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = PriorityConfig::from_toml_str(
            r#"
            step = 0.5
            defuzzification = "cog"
            aggregation = "prob_or"
            "#,
        )
        .unwrap();

        assert_eq!(config.step, 0.5);
        assert_eq!(config.defuzzification, DefuzzificationOp::Cog);
        assert_eq!(config.aggregation, ProductionLink::ProbOr);
        assert_eq!(config.and_op, AndOp::Min);
        assert_eq!(config.inference().defuzz_op(), DefuzzificationOp::Cog);
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        assert!(matches!(
            PriorityConfig::from_toml_str(r#"defuzzification = "median""#),
            Err(FuzzyError::Config(_))
        ));
    }
}
