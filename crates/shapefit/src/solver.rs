//! Closed-form least-squares solvers on moment sums.
//!
//! Each solver maps a moment tuple to the best-fit model for the points that
//! produced it, or to the model's invalid sentinel when the sums describe a
//! degenerate configuration. Solvers work in whatever frame the sums were
//! accumulated in; the fitting drivers feed them centroid-normalized sums.

use nalgebra::{Matrix3, Vector3};

use crate::geometry::{Circle, Ellipse, Line};
use crate::linalg::{d3, SymmetricMatrix3, DEFAULT_EIGEN_EPS};
use crate::moments::{Moments2, Moments3, Moments4};

/// Total least-squares line: the normal is the minor principal axis of the
/// weighted scatter.
pub fn solve_line(m: &Moments2) -> Line {
    if !(m.sw > 0.0) {
        return Line::invalid();
    }

    let u = m.sxx - m.syy - (m.sx * m.sx - m.sy * m.sy) / m.sw;
    let v = 2.0 * (m.sxy - m.sx * m.sy / m.sw);
    let theta = -0.5 * v.atan2(u);
    let (sin, cos) = theta.sin_cos();
    let phi = -(sin * m.sx + cos * m.sy) / m.sw;

    let line = Line::new(sin, cos, phi);
    if line.is_valid() {
        line
    } else {
        Line::invalid()
    }
}

/// Algebraic (Kåsa) circle: least squares on `x² + y² + a·x + b·y + c`.
pub fn solve_circle(m: &Moments3) -> Circle {
    if !(m.sw > 0.0) {
        return Circle::invalid();
    }

    let s = SymmetricMatrix3::new(m.sxx, m.syy, m.sw, m.sxy, m.sy, m.sx);
    let det = s.det();
    if !(det > 0.0) || !det.is_finite() {
        return Circle::invalid();
    }

    let rhs = Vector3::new(-m.sxyy - m.sxxx, -m.sxxy - m.syyy, -m.sxx - m.syy);
    let abc = s.inverse() * rhs;
    let circle = Circle::from_implicit(abc[0], abc[1], abc[2]);
    if circle.is_valid() {
        circle
    } else {
        Circle::invalid()
    }
}

/// Direct ellipse-specific fit under the constraint `4ac − b² = 1`.
///
/// The linear part `(d, e, f)` is eliminated through the Schur complement of
/// the `(x, y, 1)` block, leaving a 3×3 generalized eigenproblem
/// `M·a₁ = λ·C·a₁` on the quadratic part.
pub fn solve_ellipse(m: &Moments4) -> Ellipse {
    if !(m.sw > 0.0) {
        return Ellipse::invalid();
    }

    // (x², xy, y²) against itself, against (x, y, 1), and (x, y, 1) against itself
    let s1 = SymmetricMatrix3::new(m.sxxxx, m.sxxyy, m.syyyy, m.sxxxy, m.sxyyy, m.sxxyy);
    let s2 = Matrix3::new(
        m.sxxx, m.sxxy, m.sxx, //
        m.sxxy, m.sxyy, m.sxy, //
        m.sxyy, m.syyy, m.syy,
    );
    let s3 = SymmetricMatrix3::new(m.sxx, m.syy, m.sw, m.sxy, m.sy, m.sx);
    let det = s3.det();
    if !(det > 0.0) || !det.is_finite() {
        return Ellipse::invalid();
    }

    let t = s3.inverse() * s2.transpose();
    let reduced = s1.to_matrix() - s2 * t;

    // C⁻¹·M with C = [[0, 0, 2], [0, −1, 0], [2, 0, 0]]
    let system = Matrix3::from_rows(&[
        reduced.row(2) * 0.5,
        reduced.row(1) * -1.0,
        reduced.row(0) * 0.5,
    ]);

    let Some(quadratic) = d3::eigen_decompose_general(&system, DEFAULT_EIGEN_EPS)
        .into_iter()
        .map(|pair| Vector3::from(pair.vector))
        .find(|v| 4.0 * v[0] * v[2] - v[1] * v[1] > 0.0)
    else {
        return Ellipse::invalid();
    };

    let linear = -(t * quadratic);
    Ellipse::from_implicit(
        quadratic[0],
        quadratic[1],
        quadratic[2],
        linear[0],
        linear[1],
        linear[2],
    )
}
