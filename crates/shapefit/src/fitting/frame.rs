/// Similarity transform to a well-conditioned local frame:
/// `x' = s·(x − mx)`, `y' = s·(y − my)`, with the centroid at the origin and
/// mean distance √2 from it. Moments are accumulated in this frame; models
/// and distances stay in caller coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub mx: f64,
    pub my: f64,
    pub scale: f64,
}

impl Frame {
    pub fn new(points: &[[f64; 2]]) -> Self {
        if points.is_empty() {
            return Self::identity();
        }
        let n = points.len() as f64;
        let mx = points.iter().map(|p| p[0]).sum::<f64>() / n;
        let my = points.iter().map(|p| p[1]).sum::<f64>() / n;

        let mean_dist = points
            .iter()
            .map(|p| (p[0] - mx).hypot(p[1] - my))
            .sum::<f64>()
            / n;

        let scale = if mean_dist > 1e-15 && mean_dist.is_finite() {
            std::f64::consts::SQRT_2 / mean_dist
        } else {
            1.0
        };
        if !(mx.is_finite() && my.is_finite()) {
            return Self::identity();
        }
        Self { mx, my, scale }
    }

    pub const fn identity() -> Self {
        Self {
            mx: 0.0,
            my: 0.0,
            scale: 1.0,
        }
    }

    pub fn to_local(&self, points: &[[f64; 2]]) -> Vec<[f64; 2]> {
        points
            .iter()
            .map(|p| [self.scale * (p[0] - self.mx), self.scale * (p[1] - self.my)])
            .collect()
    }

    /// Local point back to caller coordinates.
    pub fn to_global(&self, p: [f64; 2]) -> [f64; 2] {
        [p[0] / self.scale + self.mx, p[1] / self.scale + self.my]
    }

    /// Local length back to caller units.
    pub fn length_to_global(&self, d: f64) -> f64 {
        d / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn local_frame_is_centered_and_scaled() {
        let pts = [[10.0, 20.0], [14.0, 20.0], [12.0, 24.0], [12.0, 16.0]];
        let frame = Frame::new(&pts);
        assert_relative_eq!(frame.mx, 12.0);
        assert_relative_eq!(frame.my, 20.0);

        let local = frame.to_local(&pts);
        let mean_dist = local.iter().map(|p| p[0].hypot(p[1])).sum::<f64>() / 4.0;
        assert_relative_eq!(mean_dist, std::f64::consts::SQRT_2, epsilon = 1e-12);

        for (p, q) in pts.iter().zip(&local) {
            let back = frame.to_global(*q);
            assert_relative_eq!(back[0], p[0], epsilon = 1e-12);
            assert_relative_eq!(back[1], p[1], epsilon = 1e-12);
        }
    }

    #[test]
    fn coincident_points_keep_unit_scale() {
        let frame = Frame::new(&[[3.0, 3.0], [3.0, 3.0]]);
        assert_eq!(frame.scale, 1.0);
        assert_eq!(Frame::new(&[]), Frame::identity());
    }
}
