//! Fitting drivers.
//!
//! - [`mse`]: one unweighted least-squares pass.
//! - [`weighted`]: one pass with caller-supplied weights.
//! - [`robust`]: iteratively reweighted least squares with a [`WeightRule`].
//! - [`mae`]: IRLS with the Lasso rule, approximating least absolute
//!   deviations.
//!
//! Every driver accumulates moments in a centroid-normalized [`Frame`] and
//! reports models and distances in caller coordinates. Degenerate input
//! yields the model's invalid sentinel; only misuse of the API is an error.
//! Ellipse drivers fall back to the circle fit (as an ellipse with equal
//! axes) for 3 or 4 points.
//!
//! [`WeightRule`]: crate::weights::WeightRule

mod frame;
mod irls;
mod model;

pub mod mae;
pub mod mse;
pub mod robust;
pub mod weighted;

pub use frame::Frame;
pub use irls::{ConvergenceRule, FitReport, IrlsConfig, Termination};
pub use model::FitModel;
