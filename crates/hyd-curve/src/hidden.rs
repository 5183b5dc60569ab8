//! Random parameter sets for "find the true value" exercises.

use hyd_core::{ErrorInfo, HydroError, ParamDecl, ParameterValues};
use hyd_models::ModelSpec;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_ATTEMPTS: usize = 64;

fn draw(decl: &ParamDecl, rng: &mut StdRng) -> f64 {
    if decl.min == decl.max {
        return decl.min;
    }
    let (lo, hi) = decl.slider_range();
    decl.from_slider(rng.gen_range(lo..=hi)).clamp(decl.min, decl.max)
}

/// Draws a parameter set within the declared bounds from a fixed seed.
///
/// Log-scale parameters are drawn log-uniformly. Sets rejected by the model's
/// own constraints are redrawn; the returned values are the admitted ones.
pub fn draw_hidden_parameters(
    spec: &ModelSpec,
    seed: u64,
) -> Result<ParameterValues, HydroError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut last_error = None;
    for attempt in 0..MAX_ATTEMPTS {
        let candidate: ParameterValues = spec
            .params
            .iter()
            .map(|decl| (decl.name.clone(), draw(decl, &mut rng)))
            .collect();
        match spec.resolve(&candidate) {
            Ok(resolved) => {
                debug!(
                    "hidden parameters for {} drawn after {} attempts",
                    spec.id,
                    attempt + 1
                );
                return Ok(resolved.values().clone());
            }
            Err(err) => last_error = Some(err),
        }
    }
    let mut info = ErrorInfo::new("hyd_curve.hidden_draw", "no admissible parameter set found")
        .with_context("model", &spec.id)
        .with_context("seed", seed)
        .with_context("attempts", MAX_ATTEMPTS);
    if let Some(err) = last_error {
        info = info.with_hint(err.info().message.clone());
    }
    Err(HydroError::InvalidArgument(info))
}
