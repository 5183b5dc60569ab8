//! Error-function models and the S*(alpha, beta) integral built on them.

use std::sync::Arc;

use hyd_core::{Guides, HydroError, ParamDecl, Readout, ReferenceLine, ShadeRule};

use crate::quad::{integrate, QuadOptions};
use crate::special::{erf, erfc};
use crate::spec::{Formula, ModelSpec, ResolvedParameters};

#[derive(Debug, Clone, Copy, Default)]
pub struct Erf;

impl Formula for Erf {
    fn kind(&self) -> &'static str {
        "erf"
    }

    fn eval(&self, _params: &ResolvedParameters, x: f64) -> f64 {
        erf(x)
    }

    fn guides(&self, _params: &ResolvedParameters) -> Guides {
        Guides {
            lines: vec![
                ReferenceLine {
                    label: "upper limit".into(),
                    y: 1.0,
                },
                ReferenceLine {
                    label: "lower limit".into(),
                    y: -1.0,
                },
            ],
            shades: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Erfc;

impl Formula for Erfc {
    fn kind(&self) -> &'static str {
        "erfc"
    }

    fn eval(&self, _params: &ResolvedParameters, x: f64) -> f64 {
        erfc(x)
    }

    fn guides(&self, _params: &ResolvedParameters) -> Guides {
        Guides {
            lines: vec![ReferenceLine {
                label: "upper limit".into(),
                y: 2.0,
            }],
            shades: Vec::new(),
        }
    }
}

pub fn erf_model() -> ModelSpec {
    ModelSpec::new("erf", "Error function", Arc::new(Erf))
        .axis_labels("x", "erf(x)")
        .domain(-3.0, 3.0)
}

pub fn erfc_model() -> ModelSpec {
    ModelSpec::new("erfc", "Complementary error function", Arc::new(Erfc))
        .axis_labels("x", "erfc(x)")
        .domain(-3.0, 3.0)
}

/// Integrand `erf(alpha / sqrt(tau)) erf(beta / sqrt(tau))`, zero at `tau = 0`.
pub fn s_star_integrand(alpha: f64, beta: f64, tau: f64) -> f64 {
    if tau <= 0.0 {
        return 0.0;
    }
    let root = tau.sqrt();
    erf(alpha / root) * erf(beta / root)
}

/// `S*(alpha, beta) = int_0^1 erf(alpha / sqrt(tau)) erf(beta / sqrt(tau)) dtau`.
pub fn s_star(alpha: f64, beta: f64) -> Result<f64, HydroError> {
    let outcome = integrate(
        |tau| s_star_integrand(alpha, beta, tau),
        0.0,
        1.0,
        &QuadOptions::default(),
    )
    .map_err(|err| err.with_context("alpha", alpha).with_context("beta", beta))?;
    Ok(outcome.value)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SStar;

impl Formula for SStar {
    fn kind(&self) -> &'static str {
        "s_star"
    }

    fn eval(&self, params: &ResolvedParameters, tau: f64) -> f64 {
        s_star_integrand(params.value("alpha"), params.value("beta"), tau)
    }

    fn readouts(&self, params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        let value = s_star(params.value("alpha"), params.value("beta"))?;
        Ok(vec![Readout::new("s_star", "S*(alpha, beta)", "-", value)])
    }

    fn guides(&self, _params: &ResolvedParameters) -> Guides {
        Guides {
            lines: Vec::new(),
            shades: vec![ShadeRule::under_curve("S*")],
        }
    }
}

pub fn s_star_model() -> ModelSpec {
    ModelSpec::new("s_star", "S*(alpha, beta) integral", Arc::new(SStar))
        .axis_labels("tau", "erf(alpha/sqrt(tau)) erf(beta/sqrt(tau))")
        .param(ParamDecl::new("alpha", "alpha", "-", (-3.0, 3.0), 1.0, 0.01))
        .param(ParamDecl::new("beta", "beta", "-", (-3.0, 3.0), 1.0, 0.01))
        .domain(0.0, 1.0)
}
