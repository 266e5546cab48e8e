use serde::{Deserialize, Serialize};

/// Line `a·x + b·y + c = 0`.
///
/// The coefficients are not required to be normalized; distances and the
/// normal-form accessors divide by `√(a² + b²)` where needed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Line from its normal angle θ and offset φ:
    /// `sin θ · x + cos θ · y + φ = 0`.
    pub fn from_normal_form(theta: f64, phi: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(sin, cos, phi)
    }

    /// Line through two points, with a unit normal. Coincident points give
    /// the invalid line.
    pub fn from_points(p: [f64; 2], q: [f64; 2]) -> Self {
        let (dx, dy) = (q[0] - p[0], q[1] - p[1]);
        let len = dx.hypot(dy);
        if !(len > 0.0) {
            return Self::invalid();
        }
        let (a, b) = (-dy / len, dx / len);
        Self::new(a, b, -(a * p[0] + b * p[1]))
    }

    /// `y = slope · x + y_intercept`.
    pub fn from_slope_intercept(slope: f64, y_intercept: f64) -> Self {
        Self::new(-slope, 1.0, -y_intercept)
    }

    /// `x = slope · y + x_intercept`.
    pub fn from_inverse_slope(slope: f64, x_intercept: f64) -> Self {
        Self::new(1.0, -slope, -x_intercept)
    }

    /// NaN-filled sentinel for a failed fit.
    pub const fn invalid() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN)
    }

    /// All coefficients finite and the normal non-zero.
    pub fn is_valid(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite() && self.normal_len() > 0.0
    }

    fn normal_len(&self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Same line scaled to a unit normal.
    pub fn normalized(&self) -> Self {
        let n = self.normal_len();
        Self::new(self.a / n, self.b / n, self.c / n)
    }

    /// Normal angle θ with `(a, b) ∝ (sin θ, cos θ)`.
    pub fn theta(&self) -> f64 {
        self.a.atan2(self.b)
    }

    /// Signed offset φ of the normal form.
    pub fn phi(&self) -> f64 {
        self.c / self.normal_len()
    }

    /// `y` on the line at `x`.
    pub fn y_at(&self, x: f64) -> f64 {
        -(self.a * x + self.c) / self.b
    }

    /// `x` on the line at `y`.
    pub fn x_at(&self, y: f64) -> f64 {
        -(self.b * y + self.c) / self.a
    }

    pub fn y_at_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.y_at(x)).collect()
    }

    pub fn x_at_many(&self, ys: &[f64]) -> Vec<f64> {
        ys.iter().map(|&y| self.x_at(y)).collect()
    }

    /// Point at arc length `t` from the foot of the perpendicular through
    /// the origin.
    pub fn point(&self, t: f64) -> [f64; 2] {
        let Self { a, b, c } = self.normalized();
        [-c * a + t * b, -c * b - t * a]
    }

    pub fn points(&self, ts: &[f64]) -> Vec<[f64; 2]> {
        ts.iter().map(|&t| self.point(t)).collect()
    }

    /// Signed distance; positive on the side the normal `(a, b)` points to.
    pub fn signed_distance(&self, p: [f64; 2]) -> f64 {
        (self.a * p[0] + self.b * p[1] + self.c) / self.normal_len()
    }

    pub fn distance(&self, p: [f64; 2]) -> f64 {
        self.signed_distance(p).abs()
    }

    pub fn distances(&self, points: &[[f64; 2]]) -> Vec<f64> {
        let Self { a, b, c } = self.normalized();
        points
            .iter()
            .map(|&[x, y]| (a * x + b * y + c).abs())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_form_round_trip() {
        let line = Line::from_normal_form(0.7, -2.5);
        assert_relative_eq!(line.theta(), 0.7, epsilon = 1e-12);
        assert_relative_eq!(line.phi(), -2.5, epsilon = 1e-12);

        // scaling does not change the normal form
        let scaled = Line::new(3.0 * line.a, 3.0 * line.b, 3.0 * line.c);
        assert_relative_eq!(scaled.theta(), 0.7, epsilon = 1e-12);
        assert_relative_eq!(scaled.phi(), -2.5, epsilon = 1e-12);
    }

    #[test]
    fn slope_forms() {
        let line = Line::from_slope_intercept(2.0, -1.0);
        assert_relative_eq!(line.y_at(3.0), 5.0);
        assert_relative_eq!(line.x_at(5.0), 3.0);
        assert_eq!(line.y_at_many(&[0.0, 1.0]), vec![-1.0, 1.0]);

        let line = Line::from_inverse_slope(0.5, 4.0);
        assert_relative_eq!(line.x_at(2.0), 5.0);
        assert_eq!(line.x_at_many(&[0.0, -2.0]), vec![4.0, 3.0]);
    }

    #[test]
    fn through_two_points() {
        let line = Line::from_points([1.0, 1.0], [3.0, 5.0]);
        assert!(line.is_valid());
        assert_relative_eq!(line.distance([1.0, 1.0]), 0.0, epsilon = 1e-12);
        assert_relative_eq!(line.distance([3.0, 5.0]), 0.0, epsilon = 1e-12);
        assert_relative_eq!(line.a.hypot(line.b), 1.0, epsilon = 1e-12);

        assert!(!Line::from_points([2.0, 2.0], [2.0, 2.0]).is_valid());
    }

    #[test]
    fn distances_ignore_coefficient_scale() {
        // x - y = 0, scaled by 10
        let line = Line::new(10.0, -10.0, 0.0);
        let d = line.distances(&[[1.0, 1.0], [1.0, 0.0], [0.0, 2.0]]);
        assert_relative_eq!(d[0], 0.0);
        assert_relative_eq!(d[1], std::f64::consts::FRAC_1_SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(d[2], std::f64::consts::SQRT_2, epsilon = 1e-12);
        assert_relative_eq!(line.signed_distance([1.0, 0.0]), d[1], epsilon = 1e-12);
        assert_relative_eq!(line.signed_distance([0.0, 1.0]), -d[1], epsilon = 1e-12);
    }

    #[test]
    fn parametric_points_lie_on_line() {
        let line = Line::new(3.0, -4.0, 7.0);
        let pts = line.points(&[-5.0, 0.0, 2.5, 10.0]);
        for (p, d) in pts.iter().zip(line.distances(&pts)) {
            assert!(d < 1e-12, "{:?} is {} away", p, d);
        }
        let p0 = line.point(0.0);
        let p1 = line.point(1.0);
        assert_relative_eq!((p1[0] - p0[0]).hypot(p1[1] - p0[1]), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_sentinel() {
        assert!(!Line::invalid().is_valid());
        assert!(!Line::new(0.0, 0.0, 1.0).is_valid());
        assert!(!Line::new(1.0, f64::INFINITY, 0.0).is_valid());
        assert!(Line::new(0.0, 1.0, 0.0).is_valid());
    }
}
