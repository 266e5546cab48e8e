//! Least-absolute-deviation fitting: IRLS with the [`WeightRule::Lasso`]
//! rule.

use crate::error::Result;
use crate::geometry::{Circle, Ellipse, Line};
use crate::weights::WeightRule;

use super::irls::IrlsConfig;
use super::robust;

/// See [`IrlsConfig::mae`] for the usual configuration.
pub fn fit_line(points: &[[f64; 2]], config: &IrlsConfig) -> Result<Line> {
    robust::fit_line(points, &WeightRule::Lasso, config)
}

pub fn fit_circle(points: &[[f64; 2]], config: &IrlsConfig) -> Result<Circle> {
    robust::fit_circle(points, &WeightRule::Lasso, config)
}

pub fn fit_ellipse(points: &[[f64; 2]], config: &IrlsConfig) -> Result<Ellipse> {
    robust::fit_ellipse(points, &WeightRule::Lasso, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FitError;
    use rand::prelude::*;

    #[test]
    fn line_follows_the_majority() {
        let truth = Line::from_slope_intercept(0.25, 1.0);
        let mut rng = StdRng::seed_from_u64(21);
        let mut pts: Vec<[f64; 2]> = (0..20)
            .map(|i| {
                let x = i as f64 * 0.5;
                [x, truth.y_at(x) + rng.gen_range(-0.02..0.02)]
            })
            .collect();
        pts[3][1] -= 6.0;
        pts[10][1] += 10.0;
        let fitted = fit_line(&pts, &IrlsConfig::mae()).unwrap();
        assert!((fitted.y_at(5.0) - truth.y_at(5.0)).abs() < 0.05, "{:?}", fitted);
        assert!((fitted.theta() - truth.theta()).abs() < 0.05);
    }

    #[test]
    fn circle_with_one_outlier() {
        let truth = Circle::new(1.0, 2.0, 4.0);
        let mut pts = truth.points(&(0..24).map(|i| i as f64 * 0.26).collect::<Vec<_>>());
        pts.push([1.0, 20.0]);
        let fitted = fit_circle(&pts, &IrlsConfig::mae()).unwrap();
        assert!((fitted.r - 4.0).abs() < 0.1, "{:?}", fitted);
        assert!((crate::fitting::mse::fit_circle(&pts).r - 4.0).abs() > 1.0);
    }

    #[test]
    fn rejects_bad_config() {
        let cfg = IrlsConfig {
            iters: 0,
            ..IrlsConfig::mae()
        };
        assert_eq!(
            fit_ellipse(&[[0.0, 0.0]; 6], &cfg),
            Err(FitError::InvalidIterations { iters: 0 })
        );
    }
}
