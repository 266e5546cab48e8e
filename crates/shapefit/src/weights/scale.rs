//! Robust spread statistics over residual magnitudes.
//!
//! All estimators take a borrowed slice and sort a private copy. Inputs with
//! NaN entries give unspecified (but non-panicking) results.

/// Median of `values`; NaN for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    match values {
        [] => f64::NAN,
        [v] => *v,
        [a, b] => 0.5 * (a + b),
        _ => {
            let mut sorted = values.to_vec();
            sorted.sort_by(f64::total_cmp);
            let mid = sorted.len() / 2;
            if sorted.len() % 2 == 1 {
                sorted[mid]
            } else {
                0.5 * (sorted[mid - 1] + sorted[mid])
            }
        }
    }
}

/// Returns `(median, mad)` with `mad = median(|x − median(x)|)`.
pub fn median_absolute_deviation(values: &[f64]) -> (f64, f64) {
    let center = median(values);
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    (center, median(&deviations))
}

/// Returns `(mean, aad)` with `aad = mean(|x − mean(x)|)`.
pub fn average_absolute_deviation(values: &[f64]) -> (f64, f64) {
    let center = mean(values);
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    (center, mean(&deviations))
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[1.0, 4.0, 1.0, 6.0, 2.0, 9.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 6.0, 2.0, 9.0, 2.0]), 3.0);
        assert_eq!(median(&[2.0, 3.0, 1.0, 4.0]), 2.5);
    }

    #[test]
    fn median_small_inputs() {
        assert!(median(&[]).is_nan());
        assert_eq!(median(&[7.0]), 7.0);
        assert_eq!(median(&[7.0, 2.0]), 4.5);
    }

    #[test]
    fn median_leaves_input_untouched() {
        let values = [3.0, 1.0, 2.0];
        let _ = median(&values);
        assert_eq!(values, [3.0, 1.0, 2.0]);
    }

    #[test]
    fn mad_reference() {
        let (center, mad) = median_absolute_deviation(&[1.0, 1.0, 2.0, 2.0, 4.0, 6.0, 9.0]);
        assert_eq!(center, 2.0);
        assert_eq!(mad, 1.0);
    }

    #[test]
    fn aad_reference() {
        let (center, aad) = average_absolute_deviation(&[2.0, 2.0, 3.0, 4.0, 14.0]);
        assert_relative_eq!(center, 5.0);
        assert_relative_eq!(aad, 3.6, epsilon = 1e-12);
    }

    #[test]
    fn empty_deviation_is_nan() {
        let (m, mad) = median_absolute_deviation(&[]);
        assert!(m.is_nan() && mad.is_nan());
        let (m, aad) = average_absolute_deviation(&[]);
        assert!(m.is_nan() && aad.is_nan());
    }
}
