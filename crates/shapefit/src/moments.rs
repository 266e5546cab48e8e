//! Weighted power sums of point coordinates.
//!
//! A degree-N tuple holds `Σ w·xⁱ·yʲ` for every `i + j ≤ N`, with the weight
//! sum `sw` as the first field. Tuples are rebuilt from scratch for every
//! solve; plain multiply-add, no compensated summation.

use crate::error::{ensure_len, Result};

/// Construction of a moment tuple from points and optional weights.
pub trait MomentSums: Sized {
    /// Accumulate over `points`. With `weights`, its length must equal the
    /// number of points.
    fn accumulate(points: &[[f64; 2]], weights: Option<&[f64]>) -> Result<Self>;
}

fn weighted<'a>(
    points: &'a [[f64; 2]],
    weights: Option<&'a [f64]>,
) -> Result<impl Iterator<Item = (f64, f64, f64)> + 'a> {
    if let Some(w) = weights {
        ensure_len(points.len(), w.len())?;
    }
    Ok(points.iter().enumerate().map(move |(i, &[x, y])| {
        let w = weights.map_or(1.0, |w| w[i]);
        (x, y, w)
    }))
}

/// Sums up to degree 2 (line fitting).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments2 {
    pub sw: f64,
    pub sx: f64,
    pub sy: f64,
    pub sxx: f64,
    pub sxy: f64,
    pub syy: f64,
}

/// Sums up to degree 3 (circle fitting).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments3 {
    pub sw: f64,
    pub sx: f64,
    pub sy: f64,
    pub sxx: f64,
    pub sxy: f64,
    pub syy: f64,
    pub sxxx: f64,
    pub sxxy: f64,
    pub sxyy: f64,
    pub syyy: f64,
}

/// Sums up to degree 4 (ellipse fitting).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments4 {
    pub sw: f64,
    pub sx: f64,
    pub sy: f64,
    pub sxx: f64,
    pub sxy: f64,
    pub syy: f64,
    pub sxxx: f64,
    pub sxxy: f64,
    pub sxyy: f64,
    pub syyy: f64,
    pub sxxxx: f64,
    pub sxxxy: f64,
    pub sxxyy: f64,
    pub sxyyy: f64,
    pub syyyy: f64,
}

impl MomentSums for Moments2 {
    fn accumulate(points: &[[f64; 2]], weights: Option<&[f64]>) -> Result<Self> {
        let mut m = Self::default();
        for (x, y, w) in weighted(points, weights)? {
            let (wx, wy) = (w * x, w * y);
            m.sw += w;
            m.sx += wx;
            m.sy += wy;
            m.sxx += wx * x;
            m.sxy += wx * y;
            m.syy += wy * y;
        }
        Ok(m)
    }
}

impl MomentSums for Moments3 {
    fn accumulate(points: &[[f64; 2]], weights: Option<&[f64]>) -> Result<Self> {
        let mut m = Self::default();
        for (x, y, w) in weighted(points, weights)? {
            let (wx, wy) = (w * x, w * y);
            let (wxx, wxy, wyy) = (wx * x, wx * y, wy * y);
            m.sw += w;
            m.sx += wx;
            m.sy += wy;
            m.sxx += wxx;
            m.sxy += wxy;
            m.syy += wyy;
            m.sxxx += wxx * x;
            m.sxxy += wxx * y;
            m.sxyy += wxy * y;
            m.syyy += wyy * y;
        }
        Ok(m)
    }
}

impl MomentSums for Moments4 {
    fn accumulate(points: &[[f64; 2]], weights: Option<&[f64]>) -> Result<Self> {
        let mut m = Self::default();
        for (x, y, w) in weighted(points, weights)? {
            let (wx, wy) = (w * x, w * y);
            let (wxx, wxy, wyy) = (wx * x, wx * y, wy * y);
            let (wxxx, wxxy, wxyy, wyyy) = (wxx * x, wxx * y, wxy * y, wyy * y);
            m.sw += w;
            m.sx += wx;
            m.sy += wy;
            m.sxx += wxx;
            m.sxy += wxy;
            m.syy += wyy;
            m.sxxx += wxxx;
            m.sxxy += wxxy;
            m.sxyy += wxyy;
            m.syyy += wyyy;
            m.sxxxx += wxxx * x;
            m.sxxxy += wxxx * y;
            m.sxxyy += wxxy * y;
            m.sxyyy += wxyy * y;
            m.syyyy += wyyy * y;
        }
        Ok(m)
    }
}

impl From<Moments4> for Moments3 {
    fn from(m: Moments4) -> Self {
        Self {
            sw: m.sw,
            sx: m.sx,
            sy: m.sy,
            sxx: m.sxx,
            sxy: m.sxy,
            syy: m.syy,
            sxxx: m.sxxx,
            sxxy: m.sxxy,
            sxyy: m.sxyy,
            syyy: m.syyy,
        }
    }
}

impl From<Moments3> for Moments2 {
    fn from(m: Moments3) -> Self {
        Self {
            sw: m.sw,
            sx: m.sx,
            sy: m.sy,
            sxx: m.sxx,
            sxy: m.sxy,
            syy: m.syy,
        }
    }
}
