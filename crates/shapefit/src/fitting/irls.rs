use serde::{Deserialize, Serialize};

use crate::error::{ensure_len, FitError, Result};
use crate::geometry::{Circle, Ellipse};
use crate::moments::MomentSums;
use crate::weights::WeightRule;

use super::frame::Frame;
use super::model::FitModel;

/// When the IRLS loop stops early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceRule {
    /// The weight threshold stopped shrinking by more than the tolerance.
    #[default]
    Scale,
    /// No model parameter moved by more than the tolerance.
    ParameterDelta,
}

/// Iteration controls for the reweighting loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IrlsConfig {
    /// Maximum number of reweighting passes. Must be greater than 1.
    pub iters: usize,
    /// Convergence threshold; must be strictly positive.
    pub tolerance: f64,
    /// Quantity compared against `tolerance`.
    pub convergence: ConvergenceRule,
    /// Start from one Lasso-weighted refit of the unweighted solution
    /// instead of the unweighted solution itself.
    pub lasso_warm_start: bool,
}

impl Default for IrlsConfig {
    fn default() -> Self {
        Self {
            iters: 16,
            tolerance: 1e-4,
            convergence: ConvergenceRule::Scale,
            lasso_warm_start: false,
        }
    }
}

impl IrlsConfig {
    /// Defaults for least-absolute-deviation fitting.
    pub fn mae() -> Self {
        Self {
            tolerance: 1e-8,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.iters <= 1 {
            return Err(FitError::InvalidIterations { iters: self.iters });
        }
        if !(self.tolerance > 0.0) {
            return Err(FitError::InvalidTolerance {
                tolerance: self.tolerance,
            });
        }
        Ok(())
    }
}

/// How a fit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The convergence rule was met.
    Converged,
    /// A reweighted solve failed; the previous model was kept.
    Diverged,
    /// The iteration budget ran out.
    ExhaustedBudget,
    /// The initial unweighted fit was already invalid (too few or degenerate
    /// points); no reweighting ran.
    Degenerate,
}

/// Fitted model with iteration diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitReport<M> {
    pub model: M,
    /// Reweighting passes run, including the one that ended the loop.
    pub iterations: usize,
    pub termination: Termination,
    /// Weight threshold of the last accepted pass; NaN if none was accepted.
    pub scale: f64,
}

impl<M: FitModel> FitReport<M> {
    fn degenerate() -> Self {
        Self {
            model: M::invalid(),
            iterations: 0,
            termination: Termination::Degenerate,
            scale: f64::NAN,
        }
    }
}

impl<M> FitReport<M> {
    pub fn map<N>(self, f: impl FnOnce(M) -> N) -> FitReport<N> {
        FitReport {
            model: f(self.model),
            iterations: self.iterations,
            termination: self.termination,
            scale: self.scale,
        }
    }
}

/// One closed-form pass over `points`, optionally weighted.
///
/// Sums are accumulated in a centroid-normalized frame and the solution is
/// mapped back. Fewer than `M::MIN_POINTS` points give the invalid model.
pub(crate) fn fit_once<M: FitModel>(points: &[[f64; 2]], weights: Option<&[f64]>) -> Result<M> {
    if let Some(w) = weights {
        ensure_len(points.len(), w.len())?;
    }
    if points.len() < M::MIN_POINTS {
        return Ok(M::invalid());
    }
    let frame = Frame::new(points);
    solve_in_frame(&frame, &frame.to_local(points), weights)
}

/// Unweighted single pass.
pub(crate) fn fit_unweighted<M: FitModel>(points: &[[f64; 2]]) -> M {
    // accumulation only fails on a weight length mismatch
    fit_once(points, None).unwrap_or_else(|_| M::invalid())
}

fn solve_in_frame<M: FitModel>(
    frame: &Frame,
    local: &[[f64; 2]],
    weights: Option<&[f64]>,
) -> Result<M> {
    let moments = <M::Moments as MomentSums>::accumulate(local, weights)?;
    Ok(M::solve(&moments).to_global(frame))
}

/// Iteratively reweighted least squares.
///
/// Starts from the unweighted fit; each pass weighs the current distances
/// with `rule`, refits on the weighted sums, and either accepts the
/// candidate, stops on convergence, or stops on a failed solve keeping the
/// last accepted model.
pub(crate) fn irls<M: FitModel>(
    points: &[[f64; 2]],
    rule: &WeightRule,
    config: &IrlsConfig,
) -> Result<FitReport<M>> {
    config.validate()?;
    rule.validate()?;

    if points.len() < M::MIN_POINTS {
        tracing::debug!(
            shape = M::NAME,
            points = points.len(),
            min = M::MIN_POINTS,
            "too few points"
        );
        return Ok(FitReport::degenerate());
    }

    let frame = Frame::new(points);
    let local = frame.to_local(points);

    let mut model: M = solve_in_frame(&frame, &local, None)?;
    if !model.is_valid() {
        tracing::debug!(shape = M::NAME, "initial fit is degenerate");
        return Ok(FitReport::degenerate());
    }
    tracing::debug!(shape = M::NAME, ?model, "initial fit");

    if config.lasso_warm_start {
        let (w, _) = WeightRule::Lasso.weigh(&model.distances(points))?;
        let warm: M = solve_in_frame(&frame, &local, Some(w.as_slice()))?;
        if warm.is_valid() {
            tracing::trace!(shape = M::NAME, model = ?warm, "lasso warm start");
            model = warm;
        }
    }

    let mut scale = f64::NAN;
    for iter in 0..config.iters {
        let errs = model.distances(points);
        let (w, new_scale) = rule.weigh(&errs)?;
        let candidate: M = solve_in_frame(&frame, &local, Some(w.as_slice()))?;

        if !candidate.is_valid() {
            tracing::debug!(shape = M::NAME, iter, scale, "reweighted fit diverged");
            return Ok(FitReport {
                model,
                iterations: iter + 1,
                termination: Termination::Diverged,
                scale,
            });
        }

        let converged = match config.convergence {
            ConvergenceRule::Scale => new_scale <= scale && scale - new_scale < config.tolerance,
            ConvergenceRule::ParameterDelta => {
                model.parameter_delta(&candidate) < config.tolerance
            }
        };

        model = candidate;
        scale = new_scale;
        tracing::trace!(shape = M::NAME, iter, scale, ?model, "reweighted fit");

        if converged {
            tracing::debug!(shape = M::NAME, iter, scale, "converged");
            return Ok(FitReport {
                model,
                iterations: iter + 1,
                termination: Termination::Converged,
                scale,
            });
        }
    }

    tracing::debug!(shape = M::NAME, iters = config.iters, scale, "iteration budget exhausted");
    Ok(FitReport {
        model,
        iterations: config.iters,
        termination: Termination::ExhaustedBudget,
        scale,
    })
}

/// What an ellipse fit can do with a given number of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EllipseSupport {
    Ellipse,
    /// Enough for a circle only.
    Circle,
    /// Not even a circle; the fit is invalid.
    Insufficient,
}

impl EllipseSupport {
    pub(crate) fn for_points(n: usize) -> Self {
        if n >= <Ellipse as FitModel>::MIN_POINTS {
            Self::Ellipse
        } else if n >= <Circle as FitModel>::MIN_POINTS {
            Self::Circle
        } else {
            Self::Insufficient
        }
    }
}

/// Whether an ellipse fit on `n` points has to go through the circle fit.
pub(crate) fn needs_circle_fallback(n: usize) -> bool {
    match EllipseSupport::for_points(n) {
        EllipseSupport::Ellipse => false,
        EllipseSupport::Circle => {
            tracing::warn!(
                points = n,
                "too few points for an ellipse, fitting a circle instead"
            );
            true
        }
        EllipseSupport::Insufficient => {
            tracing::debug!(points = n, "too few points for an ellipse");
            true
        }
    }
}

/// Ellipse report built from the circle fit of the same points.
pub(crate) fn circle_report_as_ellipse(report: FitReport<Circle>) -> FitReport<Ellipse> {
    report.map(|c| c.to_ellipse())
}
