//! Small dense linear algebra for the closed-form solvers.
//!
//! Symmetric 2×2 and 3×3 matrices are stored in compact form (upper
//! triangle only) and decomposed analytically: the characteristic polynomial
//! is solved in closed form ([`roots`]) and each eigenvector is read off the
//! null space of `M − λI`.
//!
//! Eigendecomposition conventions:
//! - pairs are ordered by ascending |λ| (not by signed value);
//! - each eigenvector has its largest component equal to ±1 and its first
//!   non-negligible component positive, so results are reproducible;
//! - `eps` is relative: entries below `eps · max|mᵢⱼ|` count as zero. Closed
//!   form roots of a repeated eigenvalue are only accurate to about
//!   √ε·|M|, so `eps` should stay well above machine precision
//!   ([`DEFAULT_EIGEN_EPS`]).

pub mod d2;
pub mod d3;
pub mod order;
pub mod roots;

pub use d2::SymmetricMatrix2;
pub use d3::SymmetricMatrix3;
pub use roots::{cubic_roots, quadratic_roots};

/// Default relative zero threshold for eigendecomposition.
pub const DEFAULT_EIGEN_EPS: f64 = 1e-8;

/// Eigenvalue with its (canonically scaled) eigenvector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eigenpair<const N: usize> {
    pub value: f64,
    pub vector: [f64; N],
}

impl<const N: usize> Eigenpair<N> {
    pub const fn new(value: f64, vector: [f64; N]) -> Self {
        Self { value, vector }
    }
}
