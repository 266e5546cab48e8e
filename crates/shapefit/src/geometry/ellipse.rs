//! Ellipses in geometric and general-conic form.

use serde::{Deserialize, Serialize};

/// General conic: A x² + B xy + C y² + D x + E y + F = 0
/// Stored as [A, B, C, D, E, F].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConicCoeffs(pub [f64; 6]);

/// Geometric ellipse parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Center x.
    pub cx: f64,
    /// Center y.
    pub cy: f64,
    /// Semi-major axis length.
    pub a: f64,
    /// Semi-minor axis length.
    pub b: f64,
    /// Rotation angle of the major axis from +x, in radians (−π/2, π/2].
    pub angle: f64,
}

// ── Conic coefficients ─────────────────────────────────────────────────────

impl ConicCoeffs {
    /// Algebraic distance of a point (x, y) to this conic.
    pub fn algebraic_distance(&self, x: f64, y: f64) -> f64 {
        let [a, b, c, d, e, f] = self.0;
        a * x * x + b * x * y + c * y * y + d * x + e * y + f
    }

    /// 4AC − B², positive for ellipses.
    pub fn discriminant(&self) -> f64 {
        let [a, b, c, ..] = self.0;
        4.0 * a * c - b * b
    }

    pub fn is_ellipse(&self) -> bool {
        self.discriminant() > 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Convert to geometric ellipse parameters; see [`Ellipse::from_implicit`].
    pub fn to_ellipse(self) -> Ellipse {
        let [a, b, c, d, e, f] = self.0;
        Ellipse::from_implicit(a, b, c, d, e, f)
    }
}

// ── Ellipse ────────────────────────────────────────────────────────────────

impl Ellipse {
    pub const fn new(cx: f64, cy: f64, a: f64, b: f64, angle: f64) -> Self {
        Self {
            cx,
            cy,
            a,
            b,
            angle,
        }
    }

    /// NaN-filled sentinel for a failed fit.
    pub const fn invalid() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN)
    }

    /// Check basic validity: positive semi-axes, finite values.
    pub fn is_valid(&self) -> bool {
        self.a > 0.0
            && self.b > 0.0
            && self.a.is_finite()
            && self.b.is_finite()
            && self.cx.is_finite()
            && self.cy.is_finite()
            && self.angle.is_finite()
    }

    /// From `a x² + b xy + c y² + d x + e y + f = 0`.
    ///
    /// The quadratic part is diagonalized by rotating through
    /// `½·atan2(b, a − c)`, the square is completed in the rotated frame and
    /// the center is rotated back. Non-ellipse conics (4ac − b² ≤ 0) and
    /// imaginary ellipses give the invalid sentinel.
    pub fn from_implicit(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        if !(4.0 * a * c - b * b > 0.0) {
            return Self::invalid();
        }
        // positive-definite quadratic part
        let (a, b, c, d, e, f) = if a < 0.0 {
            (-a, -b, -c, -d, -e, -f)
        } else {
            (a, b, c, d, e, f)
        };

        let theta = if b == 0.0 && a == c {
            0.0
        } else {
            0.5 * b.atan2(a - c)
        };
        let (sn, cs) = theta.sin_cos();

        // rotated coefficients; the xy term vanishes and ra >= rc
        let ra = a * cs * cs + b * cs * sn + c * sn * sn;
        let rc = a * sn * sn - b * cs * sn + c * cs * cs;
        let rd = d * cs + e * sn;
        let re = e * cs - d * sn;

        let (u, v) = (-rd / (2.0 * ra), -re / (2.0 * rc));
        let gamma = rd * rd / (4.0 * ra) + re * re / (4.0 * rc) - f;

        let major = (gamma / rc).sqrt();
        let minor = (gamma / ra).sqrt();
        let angle = if ra > rc {
            theta + std::f64::consts::FRAC_PI_2
        } else {
            theta
        };

        let ellipse = Self::new(
            u * cs - v * sn,
            u * sn + v * cs,
            major,
            minor,
            normalize_angle(angle),
        );
        if ellipse.is_valid() {
            ellipse
        } else {
            Self::invalid()
        }
    }

    /// Convert back to conic coefficients, scaled so that the conic evaluates
    /// to −1 at the center.
    pub fn to_conic(self) -> ConicCoeffs {
        let (sin_a, cos_a) = self.angle.sin_cos();
        let a2 = self.a * self.a;
        let b2 = self.b * self.b;

        let ca = cos_a * cos_a / a2 + sin_a * sin_a / b2;
        let cb = 2.0 * cos_a * sin_a * (1.0 / a2 - 1.0 / b2);
        let cc = sin_a * sin_a / a2 + cos_a * cos_a / b2;
        let cd = -2.0 * ca * self.cx - cb * self.cy;
        let ce = -cb * self.cx - 2.0 * cc * self.cy;
        let cf = ca * self.cx * self.cx + cb * self.cx * self.cy + cc * self.cy * self.cy - 1.0;

        ConicCoeffs([ca, cb, cc, cd, ce, cf])
    }

    pub fn center(&self) -> [f64; 2] {
        [self.cx, self.cy]
    }

    /// Aspect ratio a/b (always >= 1 when canonicalized).
    pub fn aspect_ratio(&self) -> f64 {
        self.a / self.b
    }

    /// Point at eccentric anomaly `t`.
    pub fn point(&self, t: f64) -> [f64; 2] {
        let (sin_a, cos_a) = self.angle.sin_cos();
        let px = self.a * t.cos();
        let py = self.b * t.sin();
        [
            self.cx + cos_a * px - sin_a * py,
            self.cy + sin_a * px + cos_a * py,
        ]
    }

    pub fn points(&self, ts: &[f64]) -> Vec<[f64; 2]> {
        ts.iter().map(|&t| self.point(t)).collect()
    }

    /// Sample `n` points evenly in eccentric anomaly.
    pub fn sample_points(&self, n: usize) -> Vec<[f64; 2]> {
        (0..n)
            .map(|i| self.point(2.0 * std::f64::consts::PI * (i as f64) / (n as f64)))
            .collect()
    }

    /// Radial distance from `p` to the boundary: the gap between `p` and the
    /// boundary point on the ray from the center through `p`.
    ///
    /// Exact for circles; for the center itself the semi-minor axis is
    /// returned.
    pub fn distance(&self, p: [f64; 2]) -> f64 {
        let (sin_a, cos_a) = self.angle.sin_cos();
        let (dx, dy) = (p[0] - self.cx, p[1] - self.cy);
        let u = cos_a * dx + sin_a * dy;
        let v = -sin_a * dx + cos_a * dy;

        let s = (u / self.a).hypot(v / self.b);
        if s == 0.0 {
            return self.b;
        }
        dx.hypot(dy) * (1.0 - 1.0 / s).abs()
    }

    pub fn distances(&self, points: &[[f64; 2]]) -> Vec<f64> {
        points.iter().map(|&p| self.distance(p)).collect()
    }
}

/// Normalize angle to (−π/2, π/2].
pub(crate) fn normalize_angle(mut angle: f64) -> f64 {
    if !angle.is_finite() {
        return angle;
    }
    let pi = std::f64::consts::PI;
    while angle > pi / 2.0 {
        angle -= pi;
    }
    while angle <= -pi / 2.0 {
        angle += pi;
    }
    angle
}
