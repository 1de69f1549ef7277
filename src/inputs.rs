use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Crisp values for the input variables of one evaluation.
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add<I>(&mut self, var: Variable<I>, val: f64) {
        self.0.insert(var.0, val);
    }

    pub fn with<I>(mut self, var: Variable<I>, val: f64) -> Self {
        self.add(var, val);
        self
    }

    pub fn get<I>(&self, var: Variable<I>) -> Option<f64> {
        self.0.get(&var.0).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::MembershipFunction;
    use crate::terms::{Key, Terms};
    use crate::variable::Variables;

    #[derive(Clone, Copy, Debug, Key, PartialEq)]
    enum Temp {
        Cold,
        Hot,
    }

    #[test]
    fn test_later_values_replace_earlier_ones() {
        let mut vars = Variables::<Temp>::new();
        let terms = Terms::new()
            .with(Temp::Cold, MembershipFunction::trapezoid(0., 0., 10., 20.).unwrap())
            .with(Temp::Hot, MembershipFunction::trapezoid(10., 20., 40., 40.).unwrap());
        let temp = vars.add("temp", 0. ..=40., terms, None).unwrap();
        let mut inputs = Inputs::new().with(temp, 12.);

        assert_eq!(inputs.get(temp), Some(12.));

        inputs.add(temp, 31.);

        assert_eq!(inputs.get(temp), Some(31.));
    }
}
