//! Weight kernels mapping residual magnitudes to IRLS weights in [0, 1].

use serde::{Deserialize, Serialize};

use crate::error::{ensure_non_negative, Result};

/// Smallest weight Tukey hands out to an inlier, so no point inside the
/// threshold drops out of the sums entirely.
const TUKEY_FLOOR: f64 = 1e-20;

/// Kernel shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kernel {
    /// Biweight: smooth down-weighting, hard rejection above the threshold.
    Tukey,
    /// Unit weight up to the threshold, `k/e` above it.
    Huber,
}

impl Kernel {
    pub fn weights(self, errs: &[f64], threshold: f64) -> Result<Vec<f64>> {
        match self {
            Self::Tukey => tukey_weights(errs, threshold),
            Self::Huber => huber_weights(errs, threshold),
        }
    }
}

#[inline]
fn tukey_weight(e: f64, c: f64) -> f64 {
    if e > c {
        return 0.0;
    }
    let n = e / c;
    let m = 1.0 - n * n;
    (m * m).max(TUKEY_FLOOR)
}

#[inline]
fn huber_weight(e: f64, k: f64) -> f64 {
    if e <= k {
        1.0
    } else {
        k / e
    }
}

/// Tukey biweight `(1 − (e/c)²)²` for `e ≤ c`, zero beyond.
pub fn tukey_weights(errs: &[f64], c: f64) -> Result<Vec<f64>> {
    ensure_non_negative("c", c)?;
    let c = c + f64::EPSILON;
    Ok(errs.iter().map(|&e| tukey_weight(e, c)).collect())
}

/// Huber weights: 1 for `e ≤ k`, `k/e` beyond.
pub fn huber_weights(errs: &[f64], k: f64) -> Result<Vec<f64>> {
    ensure_non_negative("k", k)?;
    let k = k + f64::EPSILON;
    Ok(errs.iter().map(|&e| huber_weight(e, k)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FitError;
    use approx::assert_relative_eq;

    #[test]
    fn tukey_reference() {
        let w = tukey_weights(&[0.0, 0.5, 1.0, 1.5, 2.0, 2.5], 2.0).unwrap();
        assert_relative_eq!(w[0], 1.0);
        assert_relative_eq!(w[1], 225.0 / 256.0, epsilon = 1e-12);
        assert_relative_eq!(w[2], 9.0 / 16.0, epsilon = 1e-12);
        assert_relative_eq!(w[3], 49.0 / 256.0, epsilon = 1e-12);
        assert!(w[4] > 0.0 && w[4] < 1e-12);
        assert_eq!(w[5], 0.0);
    }

    #[test]
    fn huber_reference() {
        let w = huber_weights(&[0.0, 2.0, 2.5, 3.0, 3.5, 4.0], 2.0).unwrap();
        assert_eq!(w[0], 1.0);
        assert_eq!(w[1], 1.0);
        assert_relative_eq!(w[2], 0.8, epsilon = 1e-12);
        assert_relative_eq!(w[3], 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(w[4], 4.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(w[5], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn zero_threshold_keeps_exact_fits() {
        let w = tukey_weights(&[0.0, 1e-3], 0.0).unwrap();
        assert_eq!(w, vec![1.0, 0.0]);
        let w = huber_weights(&[0.0, 1.0], 0.0).unwrap();
        assert_eq!(w[0], 1.0);
        assert!(w[1] > 0.0 && w[1] < 1e-15);
    }

    #[test]
    fn negative_constant_is_rejected() {
        assert_eq!(
            tukey_weights(&[1.0], -1.0),
            Err(FitError::InvalidKernelConstant {
                name: "c",
                value: -1.0
            })
        );
        assert!(huber_weights(&[1.0], f64::NAN).is_err());
    }

    #[test]
    fn weights_stay_in_unit_interval() {
        let errs: Vec<f64> = (0..200).map(|i| i as f64 * 0.05).collect();
        for kernel in [Kernel::Tukey, Kernel::Huber] {
            for w in kernel.weights(&errs, 3.0).unwrap() {
                assert!((0.0..=1.0).contains(&w), "{:?} gave {}", kernel, w);
            }
        }
    }
}
