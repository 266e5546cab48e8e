//! Single weighted least-squares pass with caller-supplied weights.

use crate::error::{ensure_len, Result};
use crate::geometry::{Circle, Ellipse, Line};

use super::irls::{fit_once, needs_circle_fallback};

/// `weights` must have one entry per point.
pub fn fit_line(points: &[[f64; 2]], weights: &[f64]) -> Result<Line> {
    fit_once(points, Some(weights))
}

pub fn fit_circle(points: &[[f64; 2]], weights: &[f64]) -> Result<Circle> {
    fit_once(points, Some(weights))
}

/// Fewer than five points are fitted as a circle.
pub fn fit_ellipse(points: &[[f64; 2]], weights: &[f64]) -> Result<Ellipse> {
    ensure_len(points.len(), weights.len())?;
    if needs_circle_fallback(points.len()) {
        return Ok(fit_circle(points, weights)?.to_ellipse());
    }
    fit_once(points, Some(weights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FitError;
    use crate::fitting::mse;
    use approx::assert_relative_eq;

    #[test]
    fn zero_weight_removes_points() {
        let truth = Line::from_slope_intercept(-0.5, 3.0);
        let mut pts = truth.points(&[-2.0, 0.0, 1.0, 4.0]);
        pts.push([0.0, 100.0]);
        let fitted = fit_line(&pts, &[1.0, 1.0, 1.0, 1.0, 0.0]).unwrap();
        assert_relative_eq!(fitted.y_at(2.0), truth.y_at(2.0), epsilon = 1e-10);
    }

    #[test]
    fn unit_weights_match_unweighted() {
        let ellipse = Ellipse::new(4.0, -1.0, 3.0, 2.0, 1.0);
        let pts = ellipse.sample_points(20);
        let w = vec![1.0; pts.len()];
        assert_eq!(fit_ellipse(&pts, &w).unwrap(), mse::fit_ellipse(&pts));
        assert_eq!(fit_circle(&pts, &w).unwrap(), mse::fit_circle(&pts));
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
        assert_eq!(
            fit_circle(&pts, &[1.0, 1.0]),
            Err(FitError::LengthMismatch {
                expected: 3,
                got: 2
            })
        );
        // checked even when the point count already forces the invalid result
        assert!(fit_line(&pts[..1], &[]).is_err());
        assert!(fit_ellipse(&pts, &[1.0]).is_err());
    }

    #[test]
    fn all_zero_weights_are_invalid() {
        let pts = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        assert!(!fit_circle(&pts, &[0.0; 4]).unwrap().is_valid());
    }
}
