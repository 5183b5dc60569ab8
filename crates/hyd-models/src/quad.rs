//! Bounded adaptive Gauss-Kronrod quadrature.

use hyd_core::{ErrorInfo, HydroError};
use log::trace;
use serde::{Deserialize, Serialize};

const XGK: [f64; 8] = [
    0.991_455_371_120_812_639_206_854_697_526_329,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.586_087_235_467_691_130_294_144_845_693_013,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
];

const WGK: [f64; 8] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
];

/// Weights of the embedded 7-point Gauss rule (odd Kronrod nodes plus the centre).
const WG: [f64; 4] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
];

/// Tolerances and work limit for [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadOptions {
    pub abs_tol: f64,
    pub rel_tol: f64,
    /// Maximum number of subintervals before giving up.
    pub max_subdivisions: usize,
}

impl Default for QuadOptions {
    fn default() -> Self {
        Self {
            abs_tol: 1e-10,
            rel_tol: 1e-10,
            max_subdivisions: 200,
        }
    }
}

/// Converged integral with its error estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadOutcome {
    pub value: f64,
    pub error_estimate: f64,
    pub subdivisions: usize,
    pub evaluations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

fn quad_error(code: &str, message: &str, a: f64, b: f64) -> HydroError {
    HydroError::Numeric(
        ErrorInfo::new(code, message)
            .with_context("lower", a)
            .with_context("upper", b),
    )
}

fn kronrod15<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> (f64, f64) {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);
    let fc = f(center);
    let mut kronrod = fc * WGK[7];
    let mut gauss = fc * WG[3];
    for j in 0..7 {
        let dx = half * XGK[j];
        let pair = f(center - dx) + f(center + dx);
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }
    (kronrod * half, ((kronrod - gauss) * half).abs())
}

fn segment<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> Result<Segment, HydroError> {
    let (value, error) = kronrod15(f, a, b);
    if !value.is_finite() || !error.is_finite() {
        return Err(quad_error(
            "hyd_models.quad_non_finite",
            "integrand produced a non-finite value",
            a,
            b,
        ));
    }
    Ok(Segment { a, b, value, error })
}

/// Integrates `f` over `[a, b]` by repeated bisection of the worst subinterval.
///
/// The integrand is only sampled strictly inside each subinterval, so integrable
/// endpoint singularities never get evaluated. Fails with
/// [`HydroError::Numeric`] when the tolerance is not met within
/// `max_subdivisions` subintervals.
pub fn integrate<F: Fn(f64) -> f64>(
    f: F,
    a: f64,
    b: f64,
    opts: &QuadOptions,
) -> Result<QuadOutcome, HydroError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(HydroError::InvalidArgument(
            ErrorInfo::new("hyd_models.quad_bounds", "integration bounds must be finite")
                .with_context("lower", a)
                .with_context("upper", b),
        ));
    }
    if a == b {
        return Ok(QuadOutcome {
            value: 0.0,
            error_estimate: 0.0,
            subdivisions: 0,
            evaluations: 0,
        });
    }
    let mut segments = vec![segment(&f, a, b)?];
    let mut evaluations = 15;
    loop {
        let value: f64 = segments.iter().map(|seg| seg.value).sum();
        let error: f64 = segments.iter().map(|seg| seg.error).sum();
        let target = opts.abs_tol.max(opts.rel_tol * value.abs());
        if error <= target {
            trace!(
                "quadrature converged: value={value:e} error={error:e} segments={}",
                segments.len()
            );
            return Ok(QuadOutcome {
                value,
                error_estimate: error,
                subdivisions: segments.len(),
                evaluations,
            });
        }
        if segments.len() >= opts.max_subdivisions {
            return Err(HydroError::Numeric(
                ErrorInfo::new(
                    "hyd_models.quad_no_convergence",
                    "quadrature did not converge within the subdivision limit",
                )
                .with_context("lower", a)
                .with_context("upper", b)
                .with_context("error_estimate", error)
                .with_context("max_subdivisions", opts.max_subdivisions),
            ));
        }
        let (worst, _) = segments
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |acc, (idx, seg)| {
                if seg.error > acc.1 {
                    (idx, seg.error)
                } else {
                    acc
                }
            });
        let parent = segments.swap_remove(worst);
        let mid = 0.5 * (parent.a + parent.b);
        if mid <= parent.a || mid >= parent.b {
            return Err(quad_error(
                "hyd_models.quad_roundoff",
                "subinterval collapsed below floating point resolution",
                parent.a,
                parent.b,
            ));
        }
        segments.push(segment(&f, parent.a, mid)?);
        segments.push(segment(&f, mid, parent.b)?);
        evaluations += 30;
    }
}
