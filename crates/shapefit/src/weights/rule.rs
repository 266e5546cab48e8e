use serde::{Deserialize, Serialize};

use super::kernel::{huber_weights, Kernel};
use super::scale::{average_absolute_deviation, median, median_absolute_deviation};
use crate::error::{ensure_non_negative, Result};

/// Lasso threshold relative to the largest residual.
const LASSO_RELATIVE_FLOOR: f64 = 1e-3;

/// Statistic that sets the kernel threshold from the current residuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleEstimator {
    /// `median + max(min_scale, multiplier · MAD)`.
    Mad,
    /// `mean + max(min_scale, multiplier · AAD)`.
    Aad,
    /// `max(min_scale, multiplier · median)`.
    Median,
    /// `max(min_scale, multiplier)`, independent of the residuals.
    Fixed,
}

/// Residual-to-weight rule applied once per IRLS iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightRule {
    /// A kernel thresholded by a robust scale statistic.
    Kernel {
        kernel: Kernel,
        scale: ScaleEstimator,
        /// Factor applied to the scale statistic.
        multiplier: f64,
        /// Lower bound on the scaled statistic.
        #[serde(default)]
        min_scale: f64,
    },
    /// Huber with a threshold tied to the smallest residual; drives the
    /// iteration towards the least-absolute-deviation fit.
    Lasso,
}

impl WeightRule {
    pub const fn kernel(kernel: Kernel, scale: ScaleEstimator, multiplier: f64, min_scale: f64) -> Self {
        Self::Kernel {
            kernel,
            scale,
            multiplier,
            min_scale,
        }
    }

    pub const fn tukey_mad(c: f64) -> Self {
        Self::kernel(Kernel::Tukey, ScaleEstimator::Mad, c, 0.0)
    }

    pub const fn tukey_aad(c: f64) -> Self {
        Self::kernel(Kernel::Tukey, ScaleEstimator::Aad, c, 0.0)
    }

    pub const fn huber_mad(k: f64) -> Self {
        Self::kernel(Kernel::Huber, ScaleEstimator::Mad, k, 0.0)
    }

    pub const fn huber_aad(k: f64) -> Self {
        Self::kernel(Kernel::Huber, ScaleEstimator::Aad, k, 0.0)
    }

    /// Tukey at `c` times the median residual, never below the resolution
    /// of the input points.
    pub const fn tukey_median(c: f64, points_resolution: f64) -> Self {
        Self::kernel(Kernel::Tukey, ScaleEstimator::Median, c, points_resolution)
    }

    pub const fn huber_median(k: f64, points_resolution: f64) -> Self {
        Self::kernel(Kernel::Huber, ScaleEstimator::Median, k, points_resolution)
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Kernel {
                multiplier,
                min_scale,
                ..
            } => {
                ensure_non_negative("multiplier", multiplier)?;
                ensure_non_negative("min_scale", min_scale)
            }
            Self::Lasso => Ok(()),
        }
    }

    /// Weights for `errs` and the threshold they were computed with.
    pub fn weigh(&self, errs: &[f64]) -> Result<(Vec<f64>, f64)> {
        self.validate()?;
        match *self {
            Self::Kernel {
                kernel,
                scale,
                multiplier,
                min_scale,
            } => {
                let threshold = match scale {
                    ScaleEstimator::Mad => {
                        let (center, mad) = median_absolute_deviation(errs);
                        center + min_scale.max(multiplier * mad)
                    }
                    ScaleEstimator::Aad => {
                        let (center, aad) = average_absolute_deviation(errs);
                        center + min_scale.max(multiplier * aad)
                    }
                    ScaleEstimator::Median => min_scale.max(multiplier * median(errs)),
                    ScaleEstimator::Fixed => min_scale.max(multiplier),
                };
                Ok((kernel.weights(errs, threshold)?, threshold))
            }
            Self::Lasso => {
                let (lo, hi) = errs
                    .iter()
                    .fold((f64::INFINITY, 0.0_f64), |(lo, hi), &e| (lo.min(e), hi.max(e)));
                let threshold = lo.max(hi * LASSO_RELATIVE_FLOOR);
                Ok((huber_weights(errs, threshold)?, threshold))
            }
        }
    }
}
