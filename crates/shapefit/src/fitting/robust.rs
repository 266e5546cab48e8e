//! IRLS fitting with a caller-chosen [`WeightRule`].

use crate::error::Result;
use crate::geometry::{Circle, Ellipse, Line};
use crate::weights::WeightRule;

use super::irls::{circle_report_as_ellipse, irls, needs_circle_fallback, FitReport, IrlsConfig};

/// Default rule for [`fit_line_default`].
pub const DEFAULT_LINE_RULE: WeightRule = WeightRule::Lasso;
/// Default rule for [`fit_circle_default`].
pub const DEFAULT_CIRCLE_RULE: WeightRule = WeightRule::tukey_median(1.5, 0.01);
/// Default rule for [`fit_ellipse_default`].
pub const DEFAULT_ELLIPSE_RULE: WeightRule = WeightRule::tukey_median(1.75, 0.01);

pub fn fit_line_report(
    points: &[[f64; 2]],
    rule: &WeightRule,
    config: &IrlsConfig,
) -> Result<FitReport<Line>> {
    irls(points, rule, config)
}

pub fn fit_circle_report(
    points: &[[f64; 2]],
    rule: &WeightRule,
    config: &IrlsConfig,
) -> Result<FitReport<Circle>> {
    irls(points, rule, config)
}

/// Fewer than five points are fitted as a circle with the same rule.
pub fn fit_ellipse_report(
    points: &[[f64; 2]],
    rule: &WeightRule,
    config: &IrlsConfig,
) -> Result<FitReport<Ellipse>> {
    config.validate()?;
    if needs_circle_fallback(points.len()) {
        return fit_circle_report(points, rule, config).map(circle_report_as_ellipse);
    }
    irls(points, rule, config)
}

pub fn fit_line(points: &[[f64; 2]], rule: &WeightRule, config: &IrlsConfig) -> Result<Line> {
    Ok(fit_line_report(points, rule, config)?.model)
}

pub fn fit_circle(points: &[[f64; 2]], rule: &WeightRule, config: &IrlsConfig) -> Result<Circle> {
    Ok(fit_circle_report(points, rule, config)?.model)
}

pub fn fit_ellipse(
    points: &[[f64; 2]],
    rule: &WeightRule,
    config: &IrlsConfig,
) -> Result<Ellipse> {
    Ok(fit_ellipse_report(points, rule, config)?.model)
}

pub fn fit_line_default(points: &[[f64; 2]]) -> Result<Line> {
    fit_line(points, &DEFAULT_LINE_RULE, &IrlsConfig::default())
}

pub fn fit_circle_default(points: &[[f64; 2]]) -> Result<Circle> {
    fit_circle(points, &DEFAULT_CIRCLE_RULE, &IrlsConfig::default())
}

pub fn fit_ellipse_default(points: &[[f64; 2]]) -> Result<Ellipse> {
    fit_ellipse(points, &DEFAULT_ELLIPSE_RULE, &IrlsConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FitError;
    use crate::fitting::{mse, ConvergenceRule, Termination};
    use approx::assert_relative_eq;
    use rand::prelude::*;

    /// 20 noisy points on a line of slope 0.25 with one gross outlier.
    fn line_with_outlier() -> (Line, Vec<[f64; 2]>) {
        let truth = Line::from_slope_intercept(0.25, 1.0);
        let mut rng = StdRng::seed_from_u64(7);
        let mut pts: Vec<[f64; 2]> = (0..20)
            .map(|i| {
                let x = i as f64 * 0.5;
                [x, truth.y_at(x) + rng.gen_range(-0.02..0.02)]
            })
            .collect();
        pts[10][1] += 10.0;
        (truth, pts)
    }

    fn angle_error(a: &Line, b: &Line) -> f64 {
        let d = (a.theta() - b.theta()).rem_euclid(std::f64::consts::PI);
        d.min(std::f64::consts::PI - d)
    }

    fn noisy(pts: Vec<[f64; 2]>, sigma: f64, seed: u64) -> Vec<[f64; 2]> {
        let mut rng = StdRng::seed_from_u64(seed);
        pts.into_iter()
            .map(|[x, y]| [x + rng.gen_range(-sigma..sigma), y + rng.gen_range(-sigma..sigma)])
            .collect()
    }

    #[test]
    fn noiseless_roundtrip() {
        let line = Line::from_normal_form(1.1, -4.0);
        let pts = line.points(&(0..15).map(|i| i as f64 - 7.0).collect::<Vec<_>>());
        let fitted = fit_line_default(&pts).unwrap();
        assert_relative_eq!(fitted.theta(), 1.1, epsilon = 1e-5);
        assert_relative_eq!(fitted.phi(), -4.0, epsilon = 1e-5);

        let circle = Circle::new(40.0, -25.0, 12.0);
        let pts = circle.points(&(0..30).map(|i| i as f64 * 0.2).collect::<Vec<_>>());
        let fitted = fit_circle_default(&pts).unwrap();
        assert_relative_eq!(fitted.cx, 40.0, epsilon = 1e-5);
        assert_relative_eq!(fitted.cy, -25.0, epsilon = 1e-5);
        assert_relative_eq!(fitted.r, 12.0, epsilon = 1e-5);

        let ellipse = Ellipse::new(100.0, 80.0, 30.0, 15.0, 0.3);
        let fitted = fit_ellipse_default(&ellipse.sample_points(40)).unwrap();
        assert_relative_eq!(fitted.cx, 100.0, epsilon = 1e-5);
        assert_relative_eq!(fitted.cy, 80.0, epsilon = 1e-5);
        assert_relative_eq!(fitted.a, 30.0, epsilon = 1e-5);
        assert_relative_eq!(fitted.b, 15.0, epsilon = 1e-5);
        assert_relative_eq!(fitted.angle, 0.3, epsilon = 1e-5);
    }

    #[test]
    fn single_outlier_does_not_tilt_robust_lines() {
        let (truth, pts) = line_with_outlier();
        let plain = mse::fit_line(&pts);
        assert!(angle_error(&plain, &truth) > 0.1);

        let cfg = IrlsConfig::default();
        for rule in [
            WeightRule::tukey_mad(3.160),
            WeightRule::huber_mad(0.907),
            WeightRule::Lasso,
        ] {
            let fitted = fit_line(&pts, &rule, &cfg).unwrap();
            let err = angle_error(&fitted, &truth);
            assert!(err < 0.02, "{:?}: angle error {}", rule, err);
        }
    }

    #[test]
    fn circle_rejects_outliers() {
        let truth = Circle::new(5.0, 5.0, 3.0);
        let mut pts = noisy(truth.points(&(0..40).map(|i| i as f64 * 0.157).collect::<Vec<_>>()), 0.01, 5);
        pts.extend([[20.0, 20.0], [-10.0, 4.0], [5.0, 15.0]]);

        let plain = mse::fit_circle(&pts);
        let robust = fit_circle_default(&pts).unwrap();
        assert!((plain.r - truth.r).abs() > 0.5);
        assert!((robust.r - truth.r).abs() < 0.02, "radius {}", robust.r);
        assert!((robust.cx - truth.cx).abs() < 0.02);
        assert!((robust.cy - truth.cy).abs() < 0.02);
    }

    #[test]
    fn ellipse_rejects_outliers() {
        let truth = Ellipse::new(10.0, -4.0, 6.0, 3.0, -0.5);
        let mut pts = noisy(truth.sample_points(60), 0.01, 9);
        pts.extend([[30.0, 0.0], [10.0, 20.0], [-12.0, -4.0], [10.5, -4.5]]);

        let report = fit_ellipse_report(&pts, &DEFAULT_ELLIPSE_RULE, &IrlsConfig::default()).unwrap();
        let e = report.model;
        assert!(e.is_valid());
        assert!((e.cx - truth.cx).abs() < 0.05);
        assert!((e.cy - truth.cy).abs() < 0.05);
        assert!((e.a - truth.a).abs() < 0.05);
        assert!((e.b - truth.b).abs() < 0.05);
        assert!((e.angle - truth.angle).abs() < 0.05);
        assert!(report.iterations >= 1);
    }

    #[test]
    fn too_few_points_give_invalid_models() {
        let cfg = IrlsConfig::default();
        let rule = WeightRule::tukey_mad(3.160);
        let report = fit_line_report(&[[1.0, 2.0]], &rule, &cfg).unwrap();
        assert!(!report.model.is_valid());
        assert_eq!(report.termination, Termination::Degenerate);
        assert!(!fit_circle(&[[0.0, 0.0], [1.0, 0.0]], &rule, &cfg).unwrap().is_valid());
        assert!(!fit_ellipse(&[[0.0, 0.0], [1.0, 0.0]], &rule, &cfg).unwrap().is_valid());
        assert!(!fit_ellipse(&[], &rule, &cfg).unwrap().is_valid());
    }

    #[test]
    fn four_point_ellipse_is_the_circle_fit() {
        let pts = [[1.0, 0.0], [0.0, 1.1], [-1.0, 0.0], [0.1, -1.0]];
        let rule = DEFAULT_ELLIPSE_RULE;
        let cfg = IrlsConfig::default();
        let circle = fit_circle(&pts, &rule, &cfg).unwrap();
        let ellipse = fit_ellipse(&pts, &rule, &cfg).unwrap();
        assert!(circle.is_valid());
        assert_eq!(ellipse, circle.to_ellipse());
    }

    #[test]
    fn contract_violations() {
        let (_, pts) = line_with_outlier();
        let rule = WeightRule::Lasso;
        let cfg = IrlsConfig {
            iters: 1,
            ..IrlsConfig::default()
        };
        assert_eq!(
            fit_line(&pts, &rule, &cfg),
            Err(FitError::InvalidIterations { iters: 1 })
        );

        let cfg = IrlsConfig {
            tolerance: 0.0,
            ..IrlsConfig::default()
        };
        assert!(matches!(
            fit_ellipse(&pts[..3], &rule, &cfg),
            Err(FitError::InvalidTolerance { .. })
        ));

        let bad = WeightRule::tukey_median(-1.0, 0.01);
        assert!(matches!(
            fit_circle(&pts, &bad, &IrlsConfig::default()),
            Err(FitError::InvalidKernelConstant { .. })
        ));
        // contract checks come before the point-count check
        assert!(fit_line(&[], &bad, &IrlsConfig::default()).is_err());
    }

    #[test]
    fn divergence_keeps_last_accepted_model() {
        // a tiny fixed threshold rejects every point of a noisy circle
        let truth = Circle::new(0.0, 0.0, 1.0);
        let pts = noisy(truth.points(&(0..20).map(|i| i as f64 * 0.3).collect::<Vec<_>>()), 0.05, 2);
        let rule = WeightRule::kernel(
            crate::weights::Kernel::Tukey,
            crate::weights::ScaleEstimator::Fixed,
            1e-9,
            0.0,
        );
        let report = fit_circle_report(&pts, &rule, &IrlsConfig::default()).unwrap();
        assert_eq!(report.termination, Termination::Diverged);
        assert_eq!(report.iterations, 1);
        assert!(report.scale.is_nan());
        assert_eq!(report.model, mse::fit_circle(&pts));
    }

    #[test]
    fn parameter_delta_convergence() {
        let (truth, pts) = line_with_outlier();
        let cfg = IrlsConfig {
            iters: 50,
            convergence: ConvergenceRule::ParameterDelta,
            ..IrlsConfig::default()
        };
        let report = fit_line_report(&pts, &WeightRule::tukey_mad(3.160), &cfg).unwrap();
        assert_eq!(report.termination, Termination::Converged);
        assert!(report.iterations < 50);
        assert!(angle_error(&report.model, &truth) < 0.02);
    }

    #[test]
    fn lasso_warm_start_stays_robust() {
        let (truth, pts) = line_with_outlier();
        let cfg = IrlsConfig {
            lasso_warm_start: true,
            ..IrlsConfig::default()
        };
        let fitted = fit_line(&pts, &WeightRule::tukey_mad(3.160), &cfg).unwrap();
        assert!(angle_error(&fitted, &truth) < 0.02);
    }
}
