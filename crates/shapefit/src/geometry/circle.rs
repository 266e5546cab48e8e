use serde::{Deserialize, Serialize};

use super::Ellipse;

/// Circle with center `(cx, cy)` and radius `r`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Circle {
    pub const fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r }
    }

    /// From the implicit form `x² + y² + a·x + b·y + c = 0`.
    ///
    /// An imaginary circle (`cx² + cy² < c`) comes back with a NaN radius
    /// and is therefore invalid.
    pub fn from_implicit(a: f64, b: f64, c: f64) -> Self {
        let cx = -a / 2.0;
        let cy = -b / 2.0;
        Self::new(cx, cy, (cx * cx + cy * cy - c).sqrt())
    }

    /// Implicit coefficients `(a, b, c)`; inverse of [`Circle::from_implicit`].
    pub fn to_implicit(&self) -> [f64; 3] {
        [
            -2.0 * self.cx,
            -2.0 * self.cy,
            self.cx * self.cx + self.cy * self.cy - self.r * self.r,
        ]
    }

    /// Circumscribed circle of a triangle. Collinear points give the invalid
    /// circle.
    pub fn from_points(p: [f64; 2], q: [f64; 2], s: [f64; 2]) -> Self {
        let d = 2.0 * (p[0] * (q[1] - s[1]) + q[0] * (s[1] - p[1]) + s[0] * (p[1] - q[1]));
        if d == 0.0 || !d.is_finite() {
            return Self::invalid();
        }

        let (pp, qq, ss) = (
            p[0] * p[0] + p[1] * p[1],
            q[0] * q[0] + q[1] * q[1],
            s[0] * s[0] + s[1] * s[1],
        );
        let cx = (pp * (q[1] - s[1]) + qq * (s[1] - p[1]) + ss * (p[1] - q[1])) / d;
        let cy = (pp * (s[0] - q[0]) + qq * (p[0] - s[0]) + ss * (q[0] - p[0])) / d;
        Self::new(cx, cy, (p[0] - cx).hypot(p[1] - cy))
    }

    /// NaN-filled sentinel for a failed fit.
    pub const fn invalid() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN)
    }

    /// Finite center and a finite, non-negative radius.
    pub fn is_valid(&self) -> bool {
        self.cx.is_finite() && self.cy.is_finite() && self.r.is_finite() && self.r >= 0.0
    }

    pub fn center(&self) -> [f64; 2] {
        [self.cx, self.cy]
    }

    pub fn point(&self, theta: f64) -> [f64; 2] {
        let (sin, cos) = theta.sin_cos();
        [self.cx + self.r * cos, self.cy + self.r * sin]
    }

    pub fn points(&self, thetas: &[f64]) -> Vec<[f64; 2]> {
        thetas.iter().map(|&t| self.point(t)).collect()
    }

    /// Signed distance, negative inside.
    pub fn signed_distance(&self, p: [f64; 2]) -> f64 {
        (p[0] - self.cx).hypot(p[1] - self.cy) - self.r
    }

    pub fn distances(&self, points: &[[f64; 2]]) -> Vec<f64> {
        points
            .iter()
            .map(|&p| self.signed_distance(p).abs())
            .collect()
    }

    /// The same curve as an ellipse with equal semi-axes.
    pub fn to_ellipse(&self) -> Ellipse {
        if !self.is_valid() {
            return Ellipse::invalid();
        }
        Ellipse {
            cx: self.cx,
            cy: self.cy,
            a: self.r,
            b: self.r,
            angle: 0.0,
        }
    }
}
