//! Compact symmetric 3×3 matrices and their analytic eigendecomposition.

use std::ops::{Add, Mul, Sub};

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use super::order::{canonicalize, max_abs, sort_by_abs};
use super::roots::cubic_roots;
use super::Eigenpair;

/// Symmetric 3×3 matrix stored as its upper triangle.
///
/// ```text
/// | m11 m12 m13 |
/// | m12 m22 m23 |
/// | m13 m23 m33 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymmetricMatrix3 {
    pub m11: f64,
    pub m22: f64,
    pub m33: f64,
    pub m12: f64,
    pub m23: f64,
    pub m13: f64,
}

impl SymmetricMatrix3 {
    /// Diagonal first, then the (1,2), (2,3), (1,3) off-diagonal entries.
    pub const fn new(m11: f64, m22: f64, m33: f64, m12: f64, m23: f64, m13: f64) -> Self {
        Self {
            m11,
            m22,
            m33,
            m12,
            m23,
            m13,
        }
    }

    /// Symmetrize a general matrix by averaging each off-diagonal pair.
    pub fn from_matrix(m: &Matrix3<f64>) -> Self {
        Self::new(
            m[(0, 0)],
            m[(1, 1)],
            m[(2, 2)],
            0.5 * (m[(0, 1)] + m[(1, 0)]),
            0.5 * (m[(1, 2)] + m[(2, 1)]),
            0.5 * (m[(0, 2)] + m[(2, 0)]),
        )
    }

    pub fn to_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.m11, self.m12, self.m13, //
            self.m12, self.m22, self.m23, //
            self.m13, self.m23, self.m33,
        )
    }

    pub fn max_abs(&self) -> f64 {
        max_abs(&[self.m11, self.m22, self.m33, self.m12, self.m23, self.m13])
    }

    pub fn trace(&self) -> f64 {
        self.m11 + self.m22 + self.m33
    }

    /// Sum of the three principal 2×2 minors.
    pub fn minor_sum(&self) -> f64 {
        self.m11 * self.m22 + self.m22 * self.m33 + self.m33 * self.m11
            - self.m12 * self.m12
            - self.m23 * self.m23
            - self.m13 * self.m13
    }

    pub fn det(&self) -> f64 {
        let Self {
            m11,
            m22,
            m33,
            m12,
            m23,
            m13,
        } = *self;
        m11 * (m22 * m33 - m23 * m23) - m12 * (m12 * m33 - m23 * m13)
            + m13 * (m12 * m23 - m22 * m13)
    }

    /// Inverse via the adjugate. A singular matrix yields non-finite entries.
    pub fn inverse(&self) -> Self {
        let Self {
            m11,
            m22,
            m33,
            m12,
            m23,
            m13,
        } = *self;
        let d = 1.0 / self.det();
        Self::new(
            (m22 * m33 - m23 * m23) * d,
            (m11 * m33 - m13 * m13) * d,
            (m11 * m22 - m12 * m12) * d,
            (m13 * m23 - m12 * m33) * d,
            (m12 * m13 - m11 * m23) * d,
            (m12 * m23 - m13 * m22) * d,
        )
    }

    /// `A · S · Aᵀ`, which is symmetric again.
    pub fn squeeze_mul(&self, a: &Matrix3<f64>) -> Self {
        Self::from_matrix(&(a * self.to_matrix() * a.transpose()))
    }

    /// Eigenpairs ordered by ascending |λ|.
    ///
    /// The eigenvalues come from the characteristic cubic
    /// `λ³ − tr·λ² + minors·λ − det`. The eigenvectors are mutually
    /// orthogonal, also within the eigenspace of a repeated eigenvalue.
    pub fn eigen_decompose(&self, eps: f64) -> [Eigenpair<3>; 3] {
        let veps = eps * self.max_abs();

        if self.m12.abs() <= veps && self.m23.abs() <= veps && self.m13.abs() <= veps {
            let mut pairs = [
                Eigenpair::new(self.m11, [1.0, 0.0, 0.0]),
                Eigenpair::new(self.m22, [0.0, 1.0, 0.0]),
                Eigenpair::new(self.m33, [0.0, 0.0, 1.0]),
            ];
            sort_by_abs(&mut pairs, |p| p.value);
            return pairs;
        }

        let (r1, r2, r3) = cubic_roots(-self.trace(), self.minor_sum(), -self.det());
        // symmetric: the imaginary parts are rounding noise
        let mut values = [r1.re, r2.re, r3.re];
        sort_by_abs(&mut values, |v| *v);

        let full = self.to_matrix();
        let first = null_vector(&shifted_rows(&full, values[0]), veps, None);
        let second = orthogonal_null_vector(&shifted_rows(&full, values[1]), veps, &first);
        // eigenvectors of a symmetric matrix are mutually orthogonal
        let third = canonicalize(cross(&first, &second));
        [
            Eigenpair::new(values[0], first),
            Eigenpair::new(values[1], second),
            Eigenpair::new(values[2], third),
        ]
    }
}

/// Eigenpairs of a general 3×3 matrix, ordered by ascending |λ|.
///
/// Eigenvalues with a non-negligible imaginary part are dropped, so fewer
/// than three pairs may come back.
pub fn eigen_decompose_general(m: &Matrix3<f64>, eps: f64) -> Vec<Eigenpair<3>> {
    let scale = m.amax();
    let veps = eps * scale;

    let tr = m.trace();
    let minors = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)] + m[(0, 0)] * m[(2, 2)]
        - m[(0, 2)] * m[(2, 0)]
        + m[(1, 1)] * m[(2, 2)]
        - m[(1, 2)] * m[(2, 1)];
    let (r1, r2, r3) = cubic_roots(-tr, minors, -m.determinant());

    let imag_tol = eps.sqrt();
    let mut values: Vec<f64> = [r1, r2, r3]
        .into_iter()
        .filter(|r| r.im.abs() <= imag_tol * r.re.abs().max(scale))
        .map(|r| r.re)
        .collect();
    sort_by_abs(&mut values, |v| *v);

    // roots of a repeated eigenvalue only agree to about √eps·|M|
    let repeat_tol = eps.sqrt() * scale;
    let mut pairs: Vec<Eigenpair<3>> = Vec::with_capacity(values.len());
    for lambda in values {
        let rows = shifted_rows(m, lambda);
        let candidate = null_vector(&rows, veps, None);
        let cluster: Vec<[f64; 3]> = pairs
            .iter()
            .filter(|p| (p.value - lambda).abs() <= repeat_tol)
            .map(|p| p.vector)
            .collect();
        let v = if is_independent(&candidate, &cluster) {
            candidate
        } else {
            // a defective eigenvalue has no second vector; keep the candidate
            spread_null_vector(&rows, repeat_tol, &cluster).unwrap_or(candidate)
        };
        pairs.push(Eigenpair::new(lambda, v));
    }
    pairs
}

fn shifted_rows(m: &Matrix3<f64>, lambda: f64) -> [[f64; 3]; 3] {
    let mut rows = [[0.0; 3]; 3];
    for (i, row) in rows.iter_mut().enumerate() {
        for (j, x) in row.iter_mut().enumerate() {
            *x = m[(i, j)] - if i == j { lambda } else { 0.0 };
        }
    }
    rows
}

// ── Null space ─────────────────────────────────────────────────────────────

/// Shape of the null space of a (near-)singular 3×3 matrix, with the rows and
/// pivot the vector is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NullSpace3 {
    /// Two independent rows: the null vector is their cross product.
    Line { rows: (usize, usize) },
    /// One independent row; `pivot` is its largest-magnitude column.
    Plane { row: usize, pivot: usize },
    /// All rows vanish.
    Everything,
}

const ROW_PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

/// Minimum |row × exclude| / (|row|·|exclude|) for `exclude` to be usable
/// when picking a vector inside a null plane.
const EXCLUDE_MIN_SINE: f64 = 1e-3;

fn classify(rows: &[[f64; 3]; 3], veps: f64) -> NullSpace3 {
    let mags = rows.map(|r| max_abs(&r));
    let live = |i: usize| mags[i] > veps;

    let Some(row) = (0..3).filter(|&i| live(i)).reduce(|a, b| if mags[b] > mags[a] { b } else { a })
    else {
        return NullSpace3::Everything;
    };

    let mut best: Option<((usize, usize), f64)> = None;
    for (i, j) in ROW_PAIRS {
        if !live(i) || !live(j) {
            continue;
        }
        let n = norm(&cross(&rows[i], &rows[j]));
        if best.map_or(true, |(_, b)| n > b) {
            best = Some(((i, j), n));
        }
    }
    if let Some((pair, n)) = best {
        if n > veps * mags[row] {
            return NullSpace3::Line { rows: pair };
        }
    }

    let r = &rows[row];
    let pivot = (0..3).fold(0, |k, c| if r[c].abs() > r[k].abs() { c } else { k });
    NullSpace3::Plane { row, pivot }
}

/// Canonical null vector of `rows`.
///
/// `exclude` is an eigenvector already returned for the same matrix; inside
/// a null plane the result is taken orthogonal to it.
fn null_vector(rows: &[[f64; 3]; 3], veps: f64, exclude: Option<&[f64; 3]>) -> [f64; 3] {
    let v = match classify(rows, veps) {
        NullSpace3::Line { rows: (i, j) } => cross(&rows[i], &rows[j]),
        NullSpace3::Plane { row, pivot } => {
            let r = &rows[row];
            let orthogonal = exclude.and_then(|e| {
                let c = cross(r, e);
                (norm(&c) > EXCLUDE_MIN_SINE * norm(r) * norm(e)).then_some(c)
            });
            match orthogonal {
                Some(c) => c,
                None => {
                    // solve r·v = 0 on the pivot and the weakest other column
                    let other = (0..3)
                        .filter(|&c| c != pivot)
                        .fold(None, |acc: Option<usize>, c| match acc {
                            Some(k) if r[k].abs() <= r[c].abs() => Some(k),
                            _ => Some(c),
                        })
                        .unwrap_or((pivot + 1) % 3);
                    let mut v = [0.0; 3];
                    v[other] = r[pivot];
                    v[pivot] = -r[other];
                    v
                }
            }
        }
        NullSpace3::Everything => match exclude {
            Some(e) => cross(e, &least_aligned_axis(e)),
            None => [1.0, 0.0, 0.0],
        },
    };
    canonicalize(v)
}

/// Null vector of `rows` orthogonal to `prev`, an eigenvector already
/// returned for the same symmetric matrix.
///
/// A repeated root computed in closed form is off by about √eps·|M|, which
/// can leave `M − λI` looking rank 2 and hand back `prev` again. The vector
/// is then rebuilt from the dominant row, which spans the normal of the
/// null plane.
fn orthogonal_null_vector(rows: &[[f64; 3]; 3], veps: f64, prev: &[f64; 3]) -> [f64; 3] {
    let v = null_vector(rows, veps, Some(prev));
    if dot(&v, prev).abs() <= EXCLUDE_MIN_SINE * norm(&v) * norm(prev) {
        return v;
    }
    let r = dominant_row(rows);
    let c = cross(r, prev);
    let w = if max_abs(r) > veps && norm(&c) > EXCLUDE_MIN_SINE * norm(r) * norm(prev) {
        c
    } else {
        cross(prev, &least_aligned_axis(prev))
    };
    canonicalize(w)
}

/// Null vector of `rows` independent of the eigenvectors in `taken`, which
/// share its (repeated) eigenvalue. `None` when no such vector fits `rows`
/// to within `tol`, as for a defective eigenvalue.
fn spread_null_vector(rows: &[[f64; 3]; 3], tol: f64, taken: &[[f64; 3]]) -> Option<[f64; 3]> {
    let w = match taken {
        [] => return None,
        [e] => {
            let r = dominant_row(rows);
            if max_abs(r) <= tol {
                cross(e, &least_aligned_axis(e))
            } else {
                cross(r, e)
            }
        }
        [e1, e2, ..] => cross(e1, e2),
    };
    let n = norm(&w);
    let fits = n > 0.0 && rows.iter().all(|row| dot(row, &w).abs() <= tol * n);
    (fits && is_independent(&w, taken)).then(|| canonicalize(w))
}

/// Whether `v` is outside the span of `taken` (at most two vectors).
fn is_independent(v: &[f64; 3], taken: &[[f64; 3]]) -> bool {
    match taken {
        [] => true,
        [e] => norm(&cross(v, e)) > EXCLUDE_MIN_SINE * norm(v) * norm(e),
        [e1, e2, ..] => {
            dot(&cross(e1, e2), v).abs() > EXCLUDE_MIN_SINE * norm(e1) * norm(e2) * norm(v)
        }
    }
}

fn dominant_row(rows: &[[f64; 3]; 3]) -> &[f64; 3] {
    rows.iter()
        .fold(&rows[0], |best, r| if max_abs(r) > max_abs(best) { r } else { best })
}

/// Coordinate axis with the smallest component of `e`.
fn least_aligned_axis(e: &[f64; 3]) -> [f64; 3] {
    let k = (0..3).fold(0, |k, c| if e[c].abs() < e[k].abs() { c } else { k });
    let mut axis = [0.0; 3];
    axis[k] = 1.0;
    axis
}

fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(v: &[f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

// ── Arithmetic ─────────────────────────────────────────────────────────────

impl Add for SymmetricMatrix3 {
    type Output = SymmetricMatrix3;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.m11 + rhs.m11,
            self.m22 + rhs.m22,
            self.m33 + rhs.m33,
            self.m12 + rhs.m12,
            self.m23 + rhs.m23,
            self.m13 + rhs.m13,
        )
    }
}

impl Sub for SymmetricMatrix3 {
    type Output = SymmetricMatrix3;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.m11 - rhs.m11,
            self.m22 - rhs.m22,
            self.m33 - rhs.m33,
            self.m12 - rhs.m12,
            self.m23 - rhs.m23,
            self.m13 - rhs.m13,
        )
    }
}

impl Mul for SymmetricMatrix3 {
    type Output = Matrix3<f64>;

    fn mul(self, rhs: Self) -> Matrix3<f64> {
        self.to_matrix() * rhs.to_matrix()
    }
}

impl Mul<Matrix3<f64>> for SymmetricMatrix3 {
    type Output = Matrix3<f64>;

    fn mul(self, rhs: Matrix3<f64>) -> Matrix3<f64> {
        self.to_matrix() * rhs
    }
}

impl Mul<SymmetricMatrix3> for Matrix3<f64> {
    type Output = Matrix3<f64>;

    fn mul(self, rhs: SymmetricMatrix3) -> Matrix3<f64> {
        self * rhs.to_matrix()
    }
}

impl Mul<Vector3<f64>> for SymmetricMatrix3 {
    type Output = Vector3<f64>;

    fn mul(self, v: Vector3<f64>) -> Vector3<f64> {
        Vector3::new(
            self.m11 * v.x + self.m12 * v.y + self.m13 * v.z,
            self.m12 * v.x + self.m22 * v.y + self.m23 * v.z,
            self.m13 * v.x + self.m23 * v.y + self.m33 * v.z,
        )
    }
}
