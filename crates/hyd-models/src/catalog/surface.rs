//! Catchment and soil-surface models: recession, infiltration and groundwater ET.

use std::sync::Arc;

use hyd_core::{
    Guides, HydroError, ParamDecl, ParameterValues, Readout, ReferenceLine, ShadeBound, ShadeRule,
};

use crate::spec::{Formula, ModelSpec, ResolvedParameters};

/// `Q(t) = Q0 exp(-a t)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseflowRecession;

impl Formula for BaseflowRecession {
    fn kind(&self) -> &'static str {
        "baseflow_recession"
    }

    fn eval(&self, params: &ResolvedParameters, t: f64) -> f64 {
        params.value("q0") * (-params.value("a") * t).exp()
    }

    fn guides(&self, _params: &ResolvedParameters) -> Guides {
        Guides {
            lines: Vec::new(),
            shades: vec![ShadeRule::under_curve("baseflow volume")],
        }
    }
}

pub fn baseflow_recession() -> ModelSpec {
    ModelSpec::new(
        "baseflow_recession",
        "Baseflow recession",
        Arc::new(BaseflowRecession),
    )
    .axis_labels("time in d", "flow in m3/s")
    .param(ParamDecl::new(
        "q0",
        "Flow at the start of recession",
        "m3/s",
        (0.0, 5000.0),
        1000.0,
        0.01,
    ))
    .param(
        ParamDecl::new(
            "a",
            "Recession constant of the basin",
            "1/d",
            (1e-3, 1.0),
            1.0,
            0.01,
        )
        .log_scale(),
    )
    .domain(0.0, 91.0)
}

/// Horton decay `f(t) = fc + (f0 - fc) exp(-k t)` against a constant rain rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfiltrationCapacity;

impl Formula for InfiltrationCapacity {
    fn kind(&self) -> &'static str {
        "infiltration_capacity"
    }

    fn normalize(&self, params: &mut ParameterValues) {
        // f0 never drops below the equilibrium capacity
        if let (Some(f0), Some(fc)) = (params.get("f0"), params.get("fc")) {
            if f0 < fc {
                params.set("f0", fc);
            }
        }
    }

    fn eval(&self, params: &ResolvedParameters, t: f64) -> f64 {
        let fc = params.value("fc");
        fc + (params.value("f0") - fc) * (-params.value("k") * t).exp()
    }

    fn readouts(&self, params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        let (f0, fc, k) = (params.value("f0"), params.value("fc"), params.value("k"));
        let prec = params.value("precipitation");
        if prec <= fc {
            return Ok(Vec::new());
        }
        let ponding = if prec >= f0 {
            0.0
        } else {
            -((prec - fc) / (f0 - fc)).ln() / k
        };
        Ok(vec![Readout::new(
            "ponding_time",
            "Time until precipitation exceeds infiltration capacity",
            "s",
            ponding,
        )])
    }

    fn guides(&self, params: &ResolvedParameters) -> Guides {
        let prec = params.value("precipitation");
        let mut guides = Guides {
            lines: vec![ReferenceLine {
                label: "precipitation rate".into(),
                y: prec,
            }],
            shades: vec![ShadeRule {
                label: "precipitation".into(),
                upper: ShadeBound::Constant(prec),
                lower: ShadeBound::Constant(0.0),
                only_where_exceeds: false,
            }],
        };
        if prec > params.value("fc") {
            guides.shades.push(ShadeRule::level_exceeds_curve(
                "precipitation exceeds infiltration capacity",
                prec,
            ));
        }
        guides
    }
}

pub fn infiltration_capacity() -> ModelSpec {
    ModelSpec::new(
        "infiltration_capacity",
        "Infiltration capacity",
        Arc::new(InfiltrationCapacity),
    )
    .axis_labels(
        "time in s",
        "infiltration capacity / precipitation rate in cm/hr",
    )
    .param(ParamDecl::new(
        "f0",
        "Initial infiltration capacity",
        "cm/hr",
        (0.0, 50.0),
        7.0,
        0.01,
    ))
    .param(ParamDecl::new(
        "fc",
        "Equilibrium infiltration capacity",
        "cm/hr",
        (0.0, 50.0),
        5.0,
        0.01,
    ))
    .param(
        ParamDecl::new(
            "k",
            "Rate of infiltration capacity decrease",
            "1/s",
            (1e-5, 1e-2),
            1e-2,
            0.01,
        )
        .log_scale(),
    )
    .param(ParamDecl::new(
        "precipitation",
        "Precipitation",
        "cm/hr",
        (0.0, 50.0),
        3.0,
        0.01,
    ))
    .domain(0.0, 86_400.0)
}

/// MODFLOW EVT package: full rate above the ET surface, linear decline to zero
/// at the extinction depth below it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evapotranspiration;

impl Formula for Evapotranspiration {
    fn kind(&self) -> &'static str {
        "evapotranspiration"
    }

    fn eval(&self, params: &ResolvedParameters, head: f64) -> f64 {
        let surf = params.value("surf");
        let exdp = params.value("exdp");
        let evtr = params.value("evtr");
        let extinction = surf - exdp;
        if head > surf {
            evtr
        } else if head >= extinction {
            evtr * (head - extinction) / exdp
        } else {
            0.0
        }
    }

    fn readouts(&self, params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        Ok(vec![Readout::new(
            "extinction_elevation",
            "Head at which ET ceases",
            "m",
            params.value("surf") - params.value("exdp"),
        )])
    }

    fn guides(&self, params: &ResolvedParameters) -> Guides {
        Guides {
            lines: vec![ReferenceLine {
                label: "maximum ET rate".into(),
                y: params.value("evtr"),
            }],
            shades: vec![ShadeRule::under_curve("groundwater ET")],
        }
    }
}

pub fn evapotranspiration() -> ModelSpec {
    ModelSpec::new(
        "evapotranspiration",
        "Evapotranspiration from groundwater (EVT)",
        Arc::new(Evapotranspiration),
    )
    .axis_labels("aquifer head in m", "ET rate in mm/d")
    .param(ParamDecl::new(
        "surf",
        "ET surface elevation",
        "m",
        (-3.0, 0.0),
        -1.0,
        0.1,
    ))
    .param(ParamDecl::new(
        "exdp",
        "Extinction depth",
        "m",
        (0.1, 5.0),
        4.0,
        0.1,
    ))
    .param(ParamDecl::new(
        "evtr",
        "Maximum ET rate",
        "mm/d",
        (0.1, 20.0),
        2.0,
        0.1,
    ))
    .domain(-10.0, 0.0)
}
