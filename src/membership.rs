use crate::error::{FuzzyError, FuzzyResult};

/// Shape a membership function was declared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Triangle,
    Trapezoid,
}

/// A piecewise-linear membership function.
///
/// Triangles are stored as trapezoids whose flat top has collapsed to a single
/// point, so `(a, b, c)` becomes `(a, b, b, c)`. When `a == b` (or `c == d`) the
/// function is a shoulder and holds 1 all the way to that edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MembershipFunction {
    shape: Shape,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl MembershipFunction {
    /// Triangle peaking at `b` and reaching zero at `a` and `c`.
    pub fn triangle(a: f64, b: f64, c: f64) -> FuzzyResult<Self> {
        Self::checked(Shape::Triangle, [a, b, b, c])
    }

    /// Trapezoid with a flat top between `b` and `c`, zero outside `[a, d]`.
    pub fn trapezoid(a: f64, b: f64, c: f64, d: f64) -> FuzzyResult<Self> {
        Self::checked(Shape::Trapezoid, [a, b, c, d])
    }

    fn checked(shape: Shape, [a, b, c, d]: [f64; 4]) -> FuzzyResult<Self> {
        let points = [a, b, c, d];
        let finite = points.iter().all(|p| p.is_finite());
        let ordered = points.windows(2).all(|w| w[0] <= w[1]);

        if !finite || !ordered {
            let points = match shape {
                Shape::Triangle => vec![a, b, d],
                Shape::Trapezoid => points.to_vec(),
            };

            return Err(FuzzyError::InvalidBreakpoints { points });
        }

        Ok(Self { shape, a, b, c, d })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Degree of membership of `x`, always within `[0, 1]`.
    pub fn eval(&self, x: f64) -> f64 {
        if x < self.a || x > self.d {
            0.
        } else if self.b <= x && x <= self.c {
            1.
        } else if x < self.b {
            (x - self.a) / (self.b - self.a)
        } else {
            (self.d - x) / (self.d - self.c)
        }
    }

    /// The closed interval outside of which membership is zero.
    pub fn support(&self) -> (f64, f64) {
        (self.a, self.d)
    }

    /// The declared breakpoints, three for a triangle and four for a trapezoid.
    pub fn breakpoints(&self) -> Vec<f64> {
        match self.shape {
            Shape::Triangle => vec![self.a, self.b, self.d],
            Shape::Trapezoid => vec![self.a, self.b, self.c, self.d],
        }
    }

    /// Points where a ramp of the function crosses `level`. Only meaningful for
    /// `0 < level < 1`; flat regions never cross.
    pub fn level_crossings(&self, level: f64) -> impl Iterator<Item = f64> {
        let in_range = level > 0. && level < 1.;
        let rising = (in_range && self.a < self.b).then(|| self.a + level * (self.b - self.a));
        let falling = (in_range && self.c < self.d).then(|| self.d - level * (self.d - self.c));

        rising.into_iter().chain(falling)
    }
}

#[test]
fn test_triangle_peak_and_feet() {
    let mf = MembershipFunction::triangle(3., 5., 7.).unwrap();

    assert_eq!(mf.eval(5.), 1.);
    assert_eq!(mf.eval(3.), 0.);
    assert_eq!(mf.eval(7.), 0.);
    assert_eq!(mf.eval(4.), 0.5);
    assert_eq!(mf.eval(6.5), 0.25);
    assert_eq!(mf.eval(-100.), 0.);
    assert_eq!(mf.eval(100.), 0.);
    assert_eq!(mf.breakpoints(), vec![3., 5., 7.]);
    assert_eq!(mf.shape(), Shape::Triangle);
}

#[test]
fn test_trapezoid_shoulders() {
    let close = MembershipFunction::trapezoid(0., 0., 1., 3.).unwrap();

    assert_eq!(close.eval(0.), 1.);
    assert_eq!(close.eval(1.), 1.);
    assert_eq!(close.eval(2.), 0.5);
    assert_eq!(close.eval(3.), 0.);

    let far = MembershipFunction::trapezoid(10., 20., 30., 30.).unwrap();

    assert_eq!(far.eval(10.), 0.);
    assert_eq!(far.eval(15.), 0.5);
    assert_eq!(far.eval(30.), 1.);
    assert_eq!(far.support(), (10., 30.));
}

#[test]
fn test_rejects_malformed_breakpoints() {
    assert!(matches!(
        MembershipFunction::trapezoid(0., 3., 2., 4.),
        Err(FuzzyError::InvalidBreakpoints { .. })
    ));
    assert!(matches!(
        MembershipFunction::triangle(7., 5., 3.),
        Err(FuzzyError::InvalidBreakpoints { points }) if points == vec![7., 5., 3.]
    ));
    assert!(MembershipFunction::triangle(0., f64::NAN, 1.).is_err());
    assert!(MembershipFunction::trapezoid(0., 1., 2., f64::INFINITY).is_err());
}

#[test]
fn test_level_crossings() {
    let high = MembershipFunction::triangle(55., 70., 85.).unwrap();

    assert_eq!(high.level_crossings(0.4).collect::<Vec<_>>(), vec![61., 79.]);
    assert_eq!(high.level_crossings(1.).count(), 0);

    let very_low = MembershipFunction::trapezoid(0., 0., 10., 25.).unwrap();

    assert_eq!(very_low.level_crossings(0.2).collect::<Vec<_>>(), vec![22.]);
}
