//! Compact symmetric 2×2 matrices and their analytic eigendecomposition.

use std::ops::{Add, Mul, Sub};

use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

use super::order::{canonicalize, max_abs, sort_by_abs};
use super::roots::quadratic_roots;
use super::Eigenpair;

/// Symmetric 2×2 matrix stored as its upper triangle.
///
/// ```text
/// | m11 m12 |
/// | m12 m22 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetricMatrix2 {
    pub m11: f64,
    pub m22: f64,
    pub m12: f64,
}

impl SymmetricMatrix2 {
    pub const fn new(m11: f64, m22: f64, m12: f64) -> Self {
        Self { m11, m22, m12 }
    }

    /// Symmetrize a general matrix by averaging its off-diagonal pair.
    pub fn from_matrix(m: &Matrix2<f64>) -> Self {
        Self::new(m[(0, 0)], m[(1, 1)], 0.5 * (m[(0, 1)] + m[(1, 0)]))
    }

    pub fn to_matrix(&self) -> Matrix2<f64> {
        Matrix2::new(self.m11, self.m12, self.m12, self.m22)
    }

    pub fn max_abs(&self) -> f64 {
        max_abs(&[self.m11, self.m22, self.m12])
    }

    pub fn det(&self) -> f64 {
        self.m11 * self.m22 - self.m12 * self.m12
    }

    /// Inverse via the adjugate. A singular matrix yields non-finite entries.
    pub fn inverse(&self) -> Self {
        let d = 1.0 / self.det();
        Self::new(self.m22 * d, self.m11 * d, -self.m12 * d)
    }

    /// `A · S · Aᵀ`, which is symmetric again.
    pub fn squeeze_mul(&self, a: &Matrix2<f64>) -> Self {
        let m = a * self.to_matrix() * a.transpose();
        Self::from_matrix(&m)
    }

    /// Eigenpairs ordered by ascending |λ|; see [`crate::linalg`] for the
    /// meaning of `eps`.
    pub fn eigen_decompose(&self, eps: f64) -> [Eigenpair<2>; 2] {
        let veps = eps * self.max_abs();

        if self.m12.abs() <= veps {
            let mut pairs = [
                Eigenpair::new(self.m11, [1.0, 0.0]),
                Eigenpair::new(self.m22, [0.0, 1.0]),
            ];
            sort_by_abs(&mut pairs, |p| p.value);
            return pairs;
        }

        let (r1, r2) = quadratic_roots(-(self.m11 + self.m22), self.det());
        let mut values = [r1.re, r2.re];
        sort_by_abs(&mut values, |v| *v);

        let rows_of = |lambda: f64| {
            [
                [self.m11 - lambda, self.m12],
                [self.m12, self.m22 - lambda],
            ]
        };

        let v0 = null_vector(&rows_of(values[0]), veps, None);
        let v1 = null_vector(&rows_of(values[1]), veps, Some(&v0));
        [Eigenpair::new(values[0], v0), Eigenpair::new(values[1], v1)]
    }
}

/// Eigenpairs of a general 2×2 matrix with real spectrum, ordered by
/// ascending |λ|. Complex-conjugate eigenvalues are dropped.
pub fn eigen_decompose_general(m: &Matrix2<f64>, eps: f64) -> Vec<Eigenpair<2>> {
    let scale = m.amax();
    let veps = eps * scale;
    let tr = m[(0, 0)] + m[(1, 1)];
    let (r1, r2) = quadratic_roots(-tr, m.determinant());

    let imag_tol = eps.sqrt() * scale;
    let mut values: Vec<f64> = [r1, r2]
        .into_iter()
        .filter(|r| r.im.abs() <= imag_tol.max(eps.sqrt() * r.re.abs()))
        .map(|r| r.re)
        .collect();
    sort_by_abs(&mut values, |v| *v);

    let mut out: Vec<Eigenpair<2>> = Vec::with_capacity(values.len());
    for lambda in values {
        let rows = [
            [m[(0, 0)] - lambda, m[(0, 1)]],
            [m[(1, 0)], m[(1, 1)] - lambda],
        ];
        let prev = out.last().map(|p| p.vector);
        out.push(Eigenpair::new(lambda, null_vector(&rows, veps, prev.as_ref())));
    }
    out
}

// ── Null space ─────────────────────────────────────────────────────────────

/// Shape of the null space of a (near-)singular 2×2 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NullSpace2 {
    /// One row survives; the null vector is orthogonal to it.
    Row { row: usize },
    /// Both rows vanish; every vector is null.
    Everything,
}

fn classify(rows: &[[f64; 2]; 2], veps: f64) -> NullSpace2 {
    let mags = [max_abs(&rows[0]), max_abs(&rows[1])];
    if !(mags[0] > veps) && !(mags[1] > veps) {
        return NullSpace2::Everything;
    }
    let row = if mags[1] > mags[0] { 1 } else { 0 };
    NullSpace2::Row { row }
}

/// Canonical null vector of `rows`. When `exclude` is given (a previously
/// returned eigenvector of the same matrix) and every direction is null, the
/// result is chosen orthogonal to it.
fn null_vector(rows: &[[f64; 2]; 2], veps: f64, exclude: Option<&[f64; 2]>) -> [f64; 2] {
    let v = match classify(rows, veps) {
        NullSpace2::Row { row } => {
            let [p, q] = rows[row];
            [q, -p]
        }
        NullSpace2::Everything => match exclude {
            Some(&[x, y]) => [-y, x],
            None => [1.0, 0.0],
        },
    };
    canonicalize(v)
}

// ── Arithmetic ─────────────────────────────────────────────────────────────

impl Add for SymmetricMatrix2 {
    type Output = SymmetricMatrix2;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.m11 + rhs.m11, self.m22 + rhs.m22, self.m12 + rhs.m12)
    }
}

impl Sub for SymmetricMatrix2 {
    type Output = SymmetricMatrix2;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.m11 - rhs.m11, self.m22 - rhs.m22, self.m12 - rhs.m12)
    }
}

impl Mul for SymmetricMatrix2 {
    type Output = Matrix2<f64>;

    fn mul(self, rhs: Self) -> Matrix2<f64> {
        self.to_matrix() * rhs.to_matrix()
    }
}

impl Mul<Matrix2<f64>> for SymmetricMatrix2 {
    type Output = Matrix2<f64>;

    fn mul(self, rhs: Matrix2<f64>) -> Matrix2<f64> {
        self.to_matrix() * rhs
    }
}

impl Mul<SymmetricMatrix2> for Matrix2<f64> {
    type Output = Matrix2<f64>;

    fn mul(self, rhs: SymmetricMatrix2) -> Matrix2<f64> {
        self * rhs.to_matrix()
    }
}

impl Mul<Vector2<f64>> for SymmetricMatrix2 {
    type Output = Vector2<f64>;

    fn mul(self, v: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            self.m11 * v.x + self.m12 * v.y,
            self.m12 * v.x + self.m22 * v.y,
        )
    }
}
