//! shapefit — robust least-squares fitting of lines, circles and ellipses.
//!
//! The crate is layered bottom-up:
//!
//! 1. **Roots** – closed-form complex roots of monic quadratics and cubics.
//! 2. **Linalg** – compact symmetric 2×2/3×3 matrices with analytic
//!    eigendecomposition.
//! 3. **Moments** – weighted power sums of point coordinates.
//! 4. **Solver** – moment sums to the best-fit line, circle or ellipse.
//! 5. **Weights** – Tukey/Huber kernels driven by robust scale estimates.
//! 6. **Fitting** – MSE, weighted, robust (IRLS) and MAE drivers.
//!
//! # Example
//! ```
//! use shapefit::{fitting::robust, Circle};
//!
//! let truth = Circle::new(3.0, -1.0, 2.0);
//! let thetas: Vec<f64> = (0..25).map(|i| i as f64 * 0.25).collect();
//! let mut points = truth.points(&thetas);
//! points.push([12.0, 9.0]);
//!
//! let fitted = robust::fit_circle_default(&points).unwrap();
//! assert!((fitted.r - 2.0).abs() < 1e-3);
//! ```
//!
//! Points are `[x, y]` pairs. Fits on degenerate input return the model's
//! invalid sentinel (check `is_valid()`); [`FitError`] is reserved for
//! invalid arguments.

pub mod error;
pub mod fitting;
pub mod geometry;
pub mod linalg;
pub mod moments;
pub mod solver;
pub mod weights;

pub use error::{FitError, Result};
pub use fitting::{ConvergenceRule, FitReport, IrlsConfig, Termination};
pub use geometry::{points_from_xy, Circle, ConicCoeffs, Ellipse, Line};
pub use weights::{Kernel, ScaleEstimator, WeightRule};
