use num::Float;

/// Similar to numpy.interp: piecewise-linear interpolation of `x_input` over the
/// `(x, y)` coordinates, which must be sorted by `x`. Values outside the
/// coordinates take the nearest endpoint's `y`.
pub(crate) fn interp<F: Float>(x_input: impl IntoIterator<Item = F>, coords: &[(F, F)]) -> Vec<F> {
    x_input
        .into_iter()
        .map(|x| {
            let (Some(&(first_x, first_y)), Some(&(last_x, last_y))) = (coords.first(), coords.last()) else {
                return F::zero();
            };

            if x <= first_x {
                return first_y;
            }
            if x >= last_x {
                return last_y;
            }

            for window in coords.windows(2) {
                let (x1, y1) = window[0];
                let (x2, y2) = window[1];

                if x1 <= x && x <= x2 {
                    // Vertical segment: take its upper end.
                    if x2 == x1 {
                        return y2;
                    }

                    return y1 + (x - x1) * (y2 - y1) / (x2 - x1);
                }
            }

            last_y
        })
        .collect()
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let coords = [(1., 3.), (2., 2.), (3., 0.)];

    assert_eq!(interp(x, &coords), vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(x, &coords), vec![4., 0., 2.]);
}

#[test]
fn test_interp_vertical_segment() {
    let coords = [(0., 0.), (1., 0.), (1., 1.), (2., 1.)];

    assert_eq!(interp([1.], &coords), vec![0.]);
    assert_eq!(interp([1.5], &coords), vec![1.]);
    assert!(interp([0.5], &[]).iter().all(|v: &f64| *v == 0.));
}
