pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::membership::MembershipFunction;

/// The fuzzy sets of one variable, keyed by that variable's term enum.
///
/// Iteration follows the enum's declaration order, which is also the order
/// ties are broken in when labelling a crisp value.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, MembershipFunction>);

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, value: MembershipFunction) {
        self.0.insert(key, value);
    }

    pub fn with(mut self, key: K, value: MembershipFunction) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: K) -> Option<&MembershipFunction> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Term> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn test_terms_follow_declaration_order() {
    #[derive(Clone, Copy, Debug, Key, PartialEq)]
    enum Size {
        Small,
        Medium,
        Large,
    }

    let terms = Terms::new()
        .with(Size::Large, MembershipFunction::trapezoid(6., 8., 10., 10.).unwrap())
        .with(Size::Small, MembershipFunction::trapezoid(0., 0., 2., 4.).unwrap())
        .with(Size::Medium, MembershipFunction::triangle(3., 5., 7.).unwrap());

    let order: Vec<_> = terms.0.iter().map(|(k, _)| k).collect();

    assert_eq!(order, vec![Size::Small, Size::Medium, Size::Large]);
    assert_eq!(terms.len(), 3);
    assert_eq!(terms.get(Size::Medium).map(|mf| mf.eval(5.)), Some(1.));
}
