//! Single unweighted least-squares pass.

use crate::geometry::{Circle, Ellipse, Line};

use super::irls::{fit_unweighted, needs_circle_fallback};

pub fn fit_line(points: &[[f64; 2]]) -> Line {
    fit_unweighted(points)
}

pub fn fit_circle(points: &[[f64; 2]]) -> Circle {
    fit_unweighted(points)
}

/// Fewer than five points are fitted as a circle.
pub fn fit_ellipse(points: &[[f64; 2]]) -> Ellipse {
    if needs_circle_fallback(points.len()) {
        return fit_circle(points).to_ellipse();
    }
    fit_unweighted(points)
}
