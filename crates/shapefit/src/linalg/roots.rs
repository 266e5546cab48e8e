//! Closed-form roots of monic quadratics and cubics over the complex plane.
//!
//! Both solvers always return the full set of roots (real roots come back with
//! a zero imaginary part). Root order is an implementation detail; callers
//! that care re-sort.

use nalgebra::Complex;

/// Roots of `x² + a1·x + a0 = 0`.
///
/// Picks the square-root branch that adds to `a1` without cancellation and
/// recovers the second root from Vieta's product, so small roots next to a
/// large one keep full precision.
pub fn quadratic_roots(a1: f64, a0: f64) -> (Complex<f64>, Complex<f64>) {
    let mut s = Complex::new(a1 * a1 - 4.0 * a0, 0.0).sqrt();
    if a1 * s.re < 0.0 {
        s = -s;
    }

    let q = -(s + a1) * 0.5;
    if q.norm() == 0.0 {
        // a1 == 0 and a0 == 0
        return (Complex::new(0.0, 0.0), Complex::new(0.0, 0.0));
    }

    (q, Complex::new(a0, 0.0) / q)
}

/// Roots of `x³ + a2·x² + a1·x + a0 = 0` (Cardano).
///
/// Works on the depressed cubic `t³ + p·t + q` with `x = t − a2/3`. The cube
/// root is taken of the larger-magnitude Cardano branch, then the three roots
/// are spread with the primitive cube roots of unity ω and ω².
pub fn cubic_roots(a2: f64, a1: f64, a0: f64) -> (Complex<f64>, Complex<f64>, Complex<f64>) {
    let shift = -a2 / 3.0;
    let p = a1 - a2 * a2 / 3.0;
    let q = 2.0 * a2 * a2 * a2 / 27.0 - a2 * a1 / 3.0 + a0;

    let s = Complex::new(q * q / 4.0 + p * p * p / 27.0, 0.0).sqrt();
    let h = Complex::new(-q / 2.0, 0.0);
    let (c1, c2) = (h + s, h - s);
    let c = if c1.norm() >= c2.norm() { c1 } else { c2 };

    let u = principal_cbrt(c);
    if u.norm() == 0.0 {
        // p == q == 0: triple root
        let r = Complex::new(shift, 0.0);
        return (r, r, r);
    }
    let v = Complex::new(-p / 3.0, 0.0) / u;

    let w = Complex::new(-0.5, 0.75f64.sqrt());
    let w2 = w.conj();

    (
        u + v + shift,
        w * u + w2 * v + shift,
        w2 * u + w * v + shift,
    )
}

fn principal_cbrt(z: Complex<f64>) -> Complex<f64> {
    let r = z.norm();
    if r == 0.0 {
        return Complex::new(0.0, 0.0);
    }
    Complex::from_polar(r.cbrt(), z.arg() / 3.0)
}
