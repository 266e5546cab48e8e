//! Ordering and normalization conventions shared by the eigensolvers.

/// Relative threshold below which a vector component counts as zero when the
/// sign of an eigenvector is canonicalized.
const SIGN_TOLERANCE: f64 = 1e-12;

/// Largest absolute value in `values` (0 for an empty slice, NaN-propagating).
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0f64, |m, v| {
        if v.is_nan() || m.is_nan() {
            f64::NAN
        } else {
            m.max(v.abs())
        }
    })
}

/// Stable sort by ascending absolute value of the key.
///
/// This is the project-wide order for eigenvalues: `[-3, 1, 2]` sorts to
/// `[1, 2, -3]`.
pub fn sort_by_abs<T>(items: &mut [T], key: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| key(a).abs().total_cmp(&key(b).abs()));
}

/// Scale `v` so its largest-magnitude component is ±1 and its first
/// non-negligible component is positive.
///
/// A zero (or non-finite) vector is returned unchanged.
pub fn canonicalize<const N: usize>(v: [f64; N]) -> [f64; N] {
    let m = max_abs(&v);
    if !(m > 0.0) || !m.is_finite() {
        return v;
    }

    let threshold = m * SIGN_TOLERANCE;
    let sign = v
        .iter()
        .find(|x| x.abs() > threshold)
        .map_or(1.0, |x| x.signum());

    let scale = sign * m;
    v.map(|x| {
        let y = x / scale;
        // fold -0.0 into +0.0 so equal inputs give bit-identical outputs
        if y == 0.0 {
            0.0
        } else {
            y
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_order_is_not_value_order() {
        let mut xs = vec![-3.0, 1.0, 2.0, -0.5];
        sort_by_abs(&mut xs, |x| *x);
        assert_eq!(xs, vec![-0.5, 1.0, 2.0, -3.0]);
    }

    #[test]
    fn canonical_sign_and_scale() {
        assert_eq!(canonicalize([-2.0, 4.0, 1.0]), [0.5, -1.0, -0.25]);
        assert_eq!(canonicalize([0.0, -3.0, 1.5]), [0.0, 1.0, -0.5]);
        // a negligible leading component does not decide the sign
        let v = canonicalize([1e-20, -3.0]);
        assert_eq!(v[1], 1.0);
        assert!(v[0].abs() < 1e-20);
        assert_eq!(canonicalize([0.0, 0.0]), [0.0, 0.0]);
    }

    #[test]
    fn max_abs_propagates_nan() {
        assert_eq!(max_abs(&[1.0, -4.0, 2.0]), 4.0);
        assert!(max_abs(&[1.0, f64::NAN]).is_nan());
        assert_eq!(max_abs(&[]), 0.0);
    }
}
