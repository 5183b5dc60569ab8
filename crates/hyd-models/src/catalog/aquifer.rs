//! Coastal interface and solute transport.

use std::collections::BTreeMap;
use std::sync::Arc;

use hyd_core::{
    Domain, ErrorInfo, Guides, HydroError, ParamDecl, ParameterValues, Readout, ReferenceLine,
};

use crate::special::{erfc, exp_times_erfc};
use crate::spec::{Formula, ModelSpec, ResolvedParameters};

const ISLAND_HALF_WIDTH: f64 = 1000.0;

/// Ghyben-Herzberg interface depth below sea level under a freshwater lens,
/// `z(x) = rho_f / (rho_s - rho_f) * h(x)` with `h(x) = h0 sqrt(1 - x / 1000)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GhybenHerzberg;

impl Formula for GhybenHerzberg {
    fn kind(&self) -> &'static str {
        "ghyben_herzberg"
    }

    fn validate(&self, params: &ParameterValues) -> Result<(), HydroError> {
        let fresh = params.value("rho_f");
        let salt = params.value("rho_s");
        if salt <= fresh {
            return Err(HydroError::InvalidArgument(
                ErrorInfo::new(
                    "hyd_models.density_order",
                    "seawater density must exceed freshwater density",
                )
                .with_context("rho_f", fresh)
                .with_context("rho_s", salt),
            ));
        }
        Ok(())
    }

    fn derive(&self, params: &ParameterValues) -> Result<BTreeMap<String, f64>, HydroError> {
        let fresh = params.value("rho_f");
        Ok(BTreeMap::from([(
            "ratio".to_string(),
            fresh / (params.value("rho_s") - fresh),
        )]))
    }

    fn eval(&self, params: &ResolvedParameters, x: f64) -> f64 {
        let head = params.value("head");
        params.derived("ratio") * (head * head * (1.0 - x / ISLAND_HALF_WIDTH)).sqrt()
    }

    fn readouts(&self, params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        let ratio = params.derived("ratio");
        Ok(vec![
            Readout::new("ratio", "Interface depth per metre of head", "-", ratio),
            Readout::new(
                "max_depth",
                "Interface depth below the water divide",
                "m",
                ratio * params.value("head"),
            ),
        ])
    }
}

pub fn ghyben_herzberg() -> ModelSpec {
    ModelSpec::new(
        "ghyben_herzberg",
        "Freshwater-saltwater interface (Ghyben-Herzberg)",
        Arc::new(GhybenHerzberg),
    )
    .axis_labels("distance from the water divide in m", "interface depth in m")
    .param(ParamDecl::new(
        "head",
        "Freshwater head at the divide",
        "m",
        (0.1, 8.0),
        5.0,
        0.1,
    ))
    .param(ParamDecl::new(
        "rho_f",
        "Freshwater density",
        "kg/m3",
        (950.0, 1050.0),
        1000.0,
        1.0,
    ))
    .param(ParamDecl::new(
        "rho_s",
        "Seawater density",
        "kg/m3",
        (950.0, 1050.0),
        1025.0,
        1.0,
    ))
    .domain(0.0, ISLAND_HALF_WIDTH)
}

/// Ogata-Banks breakthrough for a continuous source,
/// `C/C0 = 0.5 [erfc((L - vt) / (2 sqrt(Dt))) + exp(vL/D) erfc((L + vt) / (2 sqrt(Dt)))]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transport1d;

impl Formula for Transport1d {
    fn kind(&self) -> &'static str {
        "transport_1d"
    }

    fn derive(&self, params: &ParameterValues) -> Result<BTreeMap<String, f64>, HydroError> {
        Ok(BTreeMap::from([(
            "dispersion".to_string(),
            params.value("dispersivity") * params.value("velocity"),
        )]))
    }

    fn eval(&self, params: &ResolvedParameters, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let distance = params.value("distance");
        let velocity = params.value("velocity");
        let dispersion = params.derived("dispersion");
        let spread = 2.0 * (dispersion * t).sqrt();
        let advective = erfc((distance - velocity * t) / spread);
        let reflected = exp_times_erfc(
            velocity * distance / dispersion,
            (distance + velocity * t) / spread,
        );
        0.5 * (advective + reflected)
    }

    fn domain(&self, params: &ResolvedParameters, _default: Domain) -> Result<Domain, HydroError> {
        Domain::new(
            0.0,
            3.0 * params.value("distance") / params.value("velocity"),
        )
    }

    fn readouts(&self, params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        let distance = params.value("distance");
        Ok(vec![
            Readout::new(
                "dispersion",
                "Dispersion coefficient D",
                "m2/s",
                params.derived("dispersion"),
            ),
            Readout::new(
                "peclet",
                "Peclet number L/alpha",
                "-",
                distance / params.value("dispersivity"),
            ),
            Readout::new(
                "arrival_time",
                "Advective arrival time L/v",
                "s",
                distance / params.value("velocity"),
            ),
        ])
    }

    fn guides(&self, _params: &ResolvedParameters) -> Guides {
        Guides {
            lines: vec![ReferenceLine {
                label: "source concentration".into(),
                y: 1.0,
            }],
            shades: Vec::new(),
        }
    }
}

pub fn transport_1d() -> Result<ModelSpec, HydroError> {
    ModelSpec::new(
        "transport_1d",
        "1D advection-dispersion breakthrough (Ogata-Banks)",
        Arc::new(Transport1d),
    )
    .axis_labels("time in s", "relative concentration C/C0")
    .param(ParamDecl::new(
        "distance",
        "Distance to the observation point",
        "m",
        (1.0, 100.0),
        15.0,
        0.5,
    ))
    .param(
        ParamDecl::new(
            "velocity",
            "Average linear velocity",
            "m/s",
            (1e-6, 1e-2),
            1e-4,
            0.01,
        )
        .log_scale(),
    )
    .param(ParamDecl::new(
        "dispersivity",
        "Longitudinal dispersivity",
        "m",
        (0.001, 10.0),
        0.1,
        0.001,
    ))
    .domain(0.0, 1.0)
    .with_dynamic_domain()
}
