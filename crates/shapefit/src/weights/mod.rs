//! Residual weighting for iteratively reweighted least squares.
//!
//! [`WeightRule`] combines a [`Kernel`] with a [`ScaleEstimator`]: every
//! iteration the estimator turns the current residual magnitudes into a
//! threshold and the kernel turns each residual into a weight in [0, 1].
//!
//! Reference multipliers for the scale-based rules (approximately 95%
//! efficiency under Gaussian noise):
//!
//! | rule        | multiplier |
//! |-------------|------------|
//! | Tukey + MAD | 3.160      |
//! | Tukey + AAD | 3.738      |
//! | Huber + MAD | 0.907      |
//! | Huber + AAD | 1.073      |

mod kernel;
mod rule;
mod scale;

pub use kernel::{huber_weights, tukey_weights, Kernel};
pub use rule::{ScaleEstimator, WeightRule};
pub use scale::{average_absolute_deviation, median, median_absolute_deviation};
