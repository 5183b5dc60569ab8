//! Special functions used by the analytical solutions.

use std::f64::consts::PI;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;
const MAX_ITER: usize = 100;
const EPS: f64 = 1e-15;
const FPMIN: f64 = f64::MIN_POSITIVE / EPS;
const ERFC_ASYMPTOTIC_Z: f64 = 25.0;

/// Gauss error function.
pub fn erf(x: f64) -> f64 {
    libm::erf(x)
}

/// Complementary error function `1 - erf(x)`, accurate in the tail.
pub fn erfc(x: f64) -> f64 {
    libm::erfc(x)
}

/// Exponential integral `E1(x)`, the Theis well function `W(u)`.
///
/// Returns `+inf` at zero and NaN for negative arguments or when neither the
/// series nor the continued fraction converges.
pub fn exp_integral_e1(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return f64::INFINITY;
    }
    if x > 1.0 {
        // Modified Lentz evaluation of the continued fraction.
        let mut b = x + 1.0;
        let mut c = 1.0 / FPMIN;
        let mut d = 1.0 / b;
        let mut h = d;
        for i in 1..=MAX_ITER {
            let an = -((i * i) as f64);
            b += 2.0;
            d = 1.0 / (an * d + b);
            c = b + an / c;
            let del = c * d;
            h *= del;
            if (del - 1.0).abs() <= EPS {
                return h * (-x).exp();
            }
        }
        f64::NAN
    } else {
        let mut sum = -x.ln() - EULER_GAMMA;
        let mut fact = 1.0;
        for i in 1..=MAX_ITER {
            fact *= -x / i as f64;
            let del = -fact / i as f64;
            sum += del;
            if del.abs() < sum.abs() * EPS {
                return sum;
            }
        }
        f64::NAN
    }
}

/// Theis well function `W(u)`.
pub fn well_function(u: f64) -> f64 {
    exp_integral_e1(u)
}

/// Evaluates `exp(a) * erfc(z)` without overflowing when `a` is large.
///
/// Past `a = 700`, or once `erfc(z)` nears underflow, the product is rewritten
/// with the asymptotic expansion of `erfc`. That branch needs `z^2 >= a`, which
/// holds for the reflected term of the Ogata-Banks solution.
pub fn exp_times_erfc(a: f64, z: f64) -> f64 {
    if a <= 700.0 && z < ERFC_ASYMPTOTIC_Z {
        return a.exp() * erfc(z);
    }
    let z2 = z * z;
    let inv = 1.0 / (2.0 * z2);
    let series = 1.0 - inv + 3.0 * inv * inv - 15.0 * inv * inv * inv;
    (a - z2).exp() / (z * PI.sqrt()) * series
}
