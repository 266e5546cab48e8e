use crate::geometry::{Circle, Ellipse, Line};
use crate::moments::{MomentSums, Moments2, Moments3, Moments4};
use crate::solver;

use super::frame::Frame;

/// A shape the fitting drivers can estimate from weighted moment sums.
pub trait FitModel: Copy + std::fmt::Debug {
    /// Fewer points than this give the invalid sentinel.
    const MIN_POINTS: usize;
    /// Name used in log events.
    const NAME: &'static str;

    /// Moment tuple the closed-form solver consumes.
    type Moments: MomentSums;

    fn solve(moments: &Self::Moments) -> Self;

    fn invalid() -> Self;

    fn is_valid(&self) -> bool;

    /// Unsigned point-to-model distances, in the frame of `points`.
    fn distances(&self, points: &[[f64; 2]]) -> Vec<f64>;

    /// Map a model solved in `frame` back to caller coordinates.
    fn to_global(self, frame: &Frame) -> Self;

    /// Largest absolute change in any parameter between two models.
    fn parameter_delta(&self, other: &Self) -> f64;
}

impl FitModel for Line {
    const MIN_POINTS: usize = 2;
    const NAME: &'static str = "line";
    type Moments = Moments2;

    fn solve(moments: &Moments2) -> Self {
        solver::solve_line(moments)
    }

    fn invalid() -> Self {
        Line::invalid()
    }

    fn is_valid(&self) -> bool {
        Line::is_valid(self)
    }

    fn distances(&self, points: &[[f64; 2]]) -> Vec<f64> {
        Line::distances(self, points)
    }

    fn to_global(self, frame: &Frame) -> Self {
        // unit normal is preserved by a similarity transform
        Line::new(
            self.a,
            self.b,
            frame.length_to_global(self.c) - self.a * frame.mx - self.b * frame.my,
        )
    }

    fn parameter_delta(&self, other: &Self) -> f64 {
        // orientation of the normal is arbitrary
        let (p, q) = (self.normalized(), other.normalized());
        let same = max_abs_diff(&[p.a, p.b, p.c], &[q.a, q.b, q.c]);
        let flipped = max_abs_diff(&[p.a, p.b, p.c], &[-q.a, -q.b, -q.c]);
        same.min(flipped)
    }
}

impl FitModel for Circle {
    const MIN_POINTS: usize = 3;
    const NAME: &'static str = "circle";
    type Moments = Moments3;

    fn solve(moments: &Moments3) -> Self {
        solver::solve_circle(moments)
    }

    fn invalid() -> Self {
        Circle::invalid()
    }

    fn is_valid(&self) -> bool {
        Circle::is_valid(self)
    }

    fn distances(&self, points: &[[f64; 2]]) -> Vec<f64> {
        Circle::distances(self, points)
    }

    fn to_global(self, frame: &Frame) -> Self {
        let [cx, cy] = frame.to_global(self.center());
        Circle::new(cx, cy, frame.length_to_global(self.r))
    }

    fn parameter_delta(&self, other: &Self) -> f64 {
        max_abs_diff(
            &[self.cx, self.cy, self.r],
            &[other.cx, other.cy, other.r],
        )
    }
}

impl FitModel for Ellipse {
    const MIN_POINTS: usize = 5;
    const NAME: &'static str = "ellipse";
    type Moments = Moments4;

    fn solve(moments: &Moments4) -> Self {
        solver::solve_ellipse(moments)
    }

    fn invalid() -> Self {
        Ellipse::invalid()
    }

    fn is_valid(&self) -> bool {
        Ellipse::is_valid(self)
    }

    fn distances(&self, points: &[[f64; 2]]) -> Vec<f64> {
        Ellipse::distances(self, points)
    }

    fn to_global(self, frame: &Frame) -> Self {
        let [cx, cy] = frame.to_global(self.center());
        Ellipse::new(
            cx,
            cy,
            frame.length_to_global(self.a),
            frame.length_to_global(self.b),
            self.angle,
        )
    }

    /// The angle change is scaled by the elongation `(a − b) / a`: the
    /// orientation of a near-circular ellipse is undefined and may swing
    /// freely between iterates.
    fn parameter_delta(&self, other: &Self) -> f64 {
        // angles live on (−π/2, π/2] and wrap with period π
        let d = (self.angle - other.angle).rem_euclid(std::f64::consts::PI);
        let elongation = |e: &Ellipse| if e.a > 0.0 { 1.0 - e.b / e.a } else { 1.0 };
        let angle = d.min(std::f64::consts::PI - d) * elongation(self).max(elongation(other));
        max_abs_diff(
            &[self.cx, self.cy, self.a, self.b],
            &[other.cx, other.cy, other.a, other.b],
        )
        .max(angle)
    }
}

fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
