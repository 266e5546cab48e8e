//! Model types produced by the fitters.
//!
//! Every model has a NaN-filled `invalid()` sentinel and an `is_valid()`
//! check; fitters return the sentinel instead of an error when the data is
//! degenerate for that shape.

mod circle;
mod ellipse;
mod line;

pub use circle::Circle;
pub use ellipse::{ConicCoeffs, Ellipse};
pub use line::Line;

use crate::error::{ensure_len, Result};

/// Zip separate coordinate slices into points.
pub fn points_from_xy(xs: &[f64], ys: &[f64]) -> Result<Vec<[f64; 2]>> {
    ensure_len(xs.len(), ys.len())?;
    Ok(xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect())
}
