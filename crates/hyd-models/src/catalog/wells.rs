//! Well hydraulics: slug tests, transient and steady drawdown, capture zones.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::sync::Arc;

use hyd_core::{
    Domain, ErrorInfo, Guides, HydroError, ParamDecl, ParameterValues, Readout, ReferenceLine,
};
use log::trace;

use crate::special::well_function;
use crate::spec::{Formula, ModelSpec, ResolvedParameters};

/// Bouwer & Rice slug test: normalised head `H(t)/H0 = exp(-(F/(pi rc^2)) K t)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugTest;

impl Formula for SlugTest {
    fn kind(&self) -> &'static str {
        "slug_test"
    }

    fn validate(&self, params: &ParameterValues) -> Result<(), HydroError> {
        let length = params.value("screen_length");
        let radius = params.value("screen_radius");
        if length / radius <= 1.0 {
            return Err(HydroError::InvalidArgument(
                ErrorInfo::new(
                    "hyd_models.slug_geometry",
                    "screen length must exceed the screen radius",
                )
                .with_context("screen_length", length)
                .with_context("screen_radius", radius),
            ));
        }
        Ok(())
    }

    fn derive(&self, params: &ParameterValues) -> Result<BTreeMap<String, f64>, HydroError> {
        let length = params.value("screen_length");
        let shape = 2.0 * PI * length / (length / params.value("screen_radius")).ln();
        let casing = params.value("casing_radius");
        let rate = shape / (PI * casing * casing) * params.value("k");
        Ok(BTreeMap::from([
            ("shape_factor".to_string(), shape),
            ("decay_rate".to_string(), rate),
        ]))
    }

    fn eval(&self, params: &ResolvedParameters, t: f64) -> f64 {
        (-params.derived("decay_rate") * t).exp()
    }

    fn readouts(&self, params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        let rate = params.derived("decay_rate");
        Ok(vec![
            Readout::new(
                "shape_factor",
                "Geometry factor F",
                "m",
                params.derived("shape_factor"),
            ),
            Readout::new("decay_rate", "Head decay rate", "1/s", rate),
            Readout::new("half_time", "Time to half recovery", "s", 2f64.ln() / rate),
        ])
    }
}

pub fn slug_test() -> ModelSpec {
    ModelSpec::new("slug_test", "Slug test (Bouwer & Rice)", Arc::new(SlugTest))
        .axis_labels("time in s", "normalised head H/H0")
        .param(
            ParamDecl::new(
                "k",
                "Hydraulic conductivity",
                "m/s",
                (1e-6, 1e-2),
                1e-3,
                0.01,
            )
            .log_scale(),
        )
        .param(ParamDecl::new(
            "screen_length",
            "Screen length L",
            "m",
            (0.1, 30.0),
            2.1,
            0.1,
        ))
        .param(ParamDecl::new(
            "screen_radius",
            "Well radius at the screen",
            "m",
            (0.01, 0.5),
            0.085,
            0.005,
        ))
        .param(ParamDecl::new(
            "casing_radius",
            "Casing radius",
            "m",
            (0.005, 0.25),
            0.025,
            0.005,
        ))
        .domain(0.0, 300.0)
}

/// Theis drawdown `s(t) = Q/(4 pi T) W(r^2 S / (4 T t))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TheisDrawdown;

impl Formula for TheisDrawdown {
    fn kind(&self) -> &'static str {
        "theis_drawdown"
    }

    fn eval(&self, params: &ResolvedParameters, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        let transmissivity = params.value("transmissivity");
        let r = params.value("r");
        let u = r * r * params.value("storativity") / (4.0 * transmissivity * t);
        params.value("q") / (4.0 * PI * transmissivity) * well_function(u)
    }

    fn readouts(&self, params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        Ok(vec![Readout::new(
            "diffusivity",
            "Hydraulic diffusivity T/S",
            "m2/s",
            params.value("transmissivity") / params.value("storativity"),
        )])
    }
}

pub fn theis_drawdown() -> ModelSpec {
    ModelSpec::new(
        "theis_drawdown",
        "Transient drawdown (Theis)",
        Arc::new(TheisDrawdown),
    )
    .axis_labels("time in s", "drawdown in m")
    .param(ParamDecl::new(
        "q",
        "Pumping rate",
        "m3/s",
        (0.001, 0.1),
        0.005,
        0.001,
    ))
    .param(
        ParamDecl::new(
            "transmissivity",
            "Transmissivity",
            "m2/s",
            (1e-7, 1.0),
            1e-3,
            0.01,
        )
        .log_scale(),
    )
    .param(
        ParamDecl::new("storativity", "Storativity", "-", (1e-7, 1.0), 1e-4, 0.01).log_scale(),
    )
    .param(ParamDecl::new(
        "r",
        "Distance to the well",
        "m",
        (1.0, 1000.0),
        120.0,
        1.0,
    ))
    .domain(0.0, 10_000.0)
}

const SICHARDT_MAX_ITER: usize = 200;
const SICHARDT_TOL: f64 = 1e-12;

/// Radius of influence from Sichardt, `R = 3000 s_w sqrt(K)`, combined with
/// Thiem's drawdown at the well. Solves `R = c ln(R / rw)` by fixed-point
/// iteration from `R = 2c`.
pub fn sichardt_radius(
    q: f64,
    thickness: f64,
    k: f64,
    well_radius: f64,
) -> Result<f64, HydroError> {
    let c = 3000.0 * q / (2.0 * PI * thickness * k.sqrt());
    let failure = |code: &str, message: &str, radius: f64| {
        HydroError::Numeric(
            ErrorInfo::new(code, message)
                .with_context("c", c)
                .with_context("well_radius", well_radius)
                .with_context("radius", radius),
        )
    };
    let mut radius = 2.0 * c;
    for iter in 0..SICHARDT_MAX_ITER {
        let next = c * (radius / well_radius).ln();
        if !next.is_finite() || next <= well_radius {
            return Err(failure(
                "hyd_models.sichardt_diverged",
                "radius of influence iteration left the admissible range",
                next,
            )
            .with_context("iteration", iter));
        }
        if (next - radius).abs() <= SICHARDT_TOL * next {
            trace!("sichardt radius {next} after {iter} iterations");
            return Ok(next);
        }
        radius = next;
    }
    Err(failure(
        "hyd_models.sichardt_no_convergence",
        "radius of influence did not converge",
        radius,
    )
    .with_context("max_iter", SICHARDT_MAX_ITER))
}

/// Head of the confined Thiem solution, undisturbed beyond the radius of influence.
fn thiem_head(params: &ResolvedParameters, r: f64) -> f64 {
    let head = params.value("head");
    let radius = params.derived("radius_of_influence");
    if r >= radius {
        return head;
    }
    let transmissivity = params.value("k") * params.value("thickness");
    head - params.derived("pumping_rate") * (radius / r).ln() / (2.0 * PI * transmissivity)
}

fn unconfined(message: &str, head: f64, thickness: f64) -> HydroError {
    HydroError::InvalidArgument(
        ErrorInfo::new("hyd_models.thiem_unconfined", message)
            .with_context("head", head)
            .with_context("thickness", thickness)
            .with_hint("the confined solution needs the head above the aquifer top"),
    )
}

fn check_confined(params: &ParameterValues) -> Result<(), HydroError> {
    let head = params.value("head");
    let thickness = params.value("thickness");
    if head <= thickness {
        return Err(unconfined(
            "undisturbed head lies below the aquifer top",
            head,
            thickness,
        ));
    }
    Ok(())
}

/// Head in the well must stay above the aquifer top, otherwise the aquifer
/// turns unconfined around the well.
fn check_well_head(params: &ParameterValues, drawdown: f64) -> Result<(), HydroError> {
    let well_head = params.value("head") - drawdown;
    let thickness = params.value("thickness");
    if well_head <= thickness {
        return Err(unconfined(
            "head in the well falls below the aquifer top",
            well_head,
            thickness,
        )
        .with_context("drawdown", drawdown));
    }
    Ok(())
}

fn thiem_domain(params: &ResolvedParameters) -> Result<Domain, HydroError> {
    Domain::new(
        params.value("well_radius"),
        1.5 * params.derived("radius_of_influence"),
    )
}

fn thiem_readouts(params: &ResolvedParameters) -> Vec<Readout> {
    let drawdown = params.derived("well_drawdown");
    vec![
        Readout::new(
            "radius_of_influence",
            "Radius of influence R",
            "m",
            params.derived("radius_of_influence"),
        ),
        Readout::new(
            "well_head",
            "Head in the well",
            "m",
            params.value("head") - drawdown,
        ),
        Readout::new("well_drawdown", "Drawdown in the well", "m", drawdown),
        Readout::new(
            "pumping_rate",
            "Abstraction rate Q",
            "m3/s",
            params.derived("pumping_rate"),
        ),
    ]
}

fn thiem_guides(params: &ResolvedParameters) -> Guides {
    Guides {
        lines: vec![ReferenceLine {
            label: "aquifer top".into(),
            y: params.value("thickness"),
        }],
        shades: Vec::new(),
    }
}

/// Steady confined drawdown `h(r) = H - Q ln(R/r) / (2 pi K m)` inside the
/// radius of influence, undisturbed head beyond it. `R` follows from the
/// pumping rate through [`sichardt_radius`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThiemConfined;

impl Formula for ThiemConfined {
    fn kind(&self) -> &'static str {
        "thiem_confined"
    }

    fn validate(&self, params: &ParameterValues) -> Result<(), HydroError> {
        check_confined(params)
    }

    fn derive(&self, params: &ParameterValues) -> Result<BTreeMap<String, f64>, HydroError> {
        let q = params.value("q");
        let k = params.value("k");
        let radius = sichardt_radius(
            q,
            params.value("thickness"),
            k,
            params.value("well_radius"),
        )?;
        let drawdown = radius / (3000.0 * k.sqrt());
        check_well_head(params, drawdown)?;
        Ok(BTreeMap::from([
            ("radius_of_influence".to_string(), radius),
            ("well_drawdown".to_string(), drawdown),
            ("pumping_rate".to_string(), q),
        ]))
    }

    fn eval(&self, params: &ResolvedParameters, r: f64) -> f64 {
        thiem_head(params, r)
    }

    fn domain(&self, params: &ResolvedParameters, _default: Domain) -> Result<Domain, HydroError> {
        thiem_domain(params)
    }

    fn readouts(&self, params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        Ok(thiem_readouts(params))
    }

    fn guides(&self, params: &ResolvedParameters) -> Guides {
        thiem_guides(params)
    }
}

/// Thiem with the drawdown in the well prescribed: `R = 3000 s sqrt(K)` and
/// `Q = 2 pi K m s / ln(R / rw)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThiemConfinedDrawdown;

impl Formula for ThiemConfinedDrawdown {
    fn kind(&self) -> &'static str {
        "thiem_confined_drawdown"
    }

    fn validate(&self, params: &ParameterValues) -> Result<(), HydroError> {
        check_confined(params)?;
        check_well_head(params, params.value("drawdown"))
    }

    fn derive(&self, params: &ParameterValues) -> Result<BTreeMap<String, f64>, HydroError> {
        let k = params.value("k");
        let drawdown = params.value("drawdown");
        let well_radius = params.value("well_radius");
        let radius = 3000.0 * drawdown * k.sqrt();
        if radius <= well_radius {
            return Err(HydroError::InvalidArgument(
                ErrorInfo::new(
                    "hyd_models.thiem_radius",
                    "radius of influence does not reach beyond the well",
                )
                .with_context("radius", radius)
                .with_context("well_radius", well_radius),
            ));
        }
        let q = 2.0 * PI * k * params.value("thickness") * drawdown / (radius / well_radius).ln();
        Ok(BTreeMap::from([
            ("radius_of_influence".to_string(), radius),
            ("well_drawdown".to_string(), drawdown),
            ("pumping_rate".to_string(), q),
        ]))
    }

    fn eval(&self, params: &ResolvedParameters, r: f64) -> f64 {
        thiem_head(params, r)
    }

    fn domain(&self, params: &ResolvedParameters, _default: Domain) -> Result<Domain, HydroError> {
        thiem_domain(params)
    }

    fn readouts(&self, params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        Ok(thiem_readouts(params))
    }

    fn guides(&self, params: &ResolvedParameters) -> Guides {
        thiem_guides(params)
    }
}

fn thiem_aquifer_params(spec: ModelSpec) -> ModelSpec {
    spec.axis_labels("distance from the well in m", "hydraulic head in m")
        .param(ParamDecl::new(
            "head",
            "Undisturbed head above the aquifer base",
            "m",
            (5.0, 100.0),
            20.0,
            0.5,
        ))
        .param(ParamDecl::new(
            "thickness",
            "Aquifer thickness",
            "m",
            (1.0, 50.0),
            10.0,
            0.5,
        ))
        .param(
            ParamDecl::new(
                "k",
                "Hydraulic conductivity",
                "m/s",
                (1e-5, 1e-1),
                1e-4,
                0.01,
            )
            .log_scale(),
        )
        .param(ParamDecl::new(
            "well_radius",
            "Well radius",
            "m",
            (0.05, 1.0),
            0.1,
            0.01,
        ))
}

pub fn thiem_confined() -> Result<ModelSpec, HydroError> {
    thiem_aquifer_params(ModelSpec::new(
        "thiem_confined",
        "Steady drawdown in a confined aquifer (Thiem)",
        Arc::new(ThiemConfined),
    ))
    .param(ParamDecl::new(
        "q",
        "Pumping rate",
        "m3/s",
        (0.001, 0.05),
        0.005,
        0.001,
    ))
    .domain(0.1, 300.0)
    .with_dynamic_domain()
}

pub fn thiem_confined_drawdown() -> Result<ModelSpec, HydroError> {
    thiem_aquifer_params(ModelSpec::new(
        "thiem_confined_drawdown",
        "Steady drawdown in a confined aquifer for a given well drawdown (Thiem)",
        Arc::new(ThiemConfinedDrawdown),
    ))
    .param(ParamDecl::new(
        "drawdown",
        "Drawdown in the well",
        "m",
        (0.01, 10.0),
        2.0,
        0.01,
    ))
    .domain(0.1, 90.0)
    .with_dynamic_domain()
}

/// Below this `|c y|` the flow divide uses its Taylor expansion around `y = 0`.
const DIVIDE_SERIES_LIMIT: f64 = 1e-4;

/// Flow divide of a single well in uniform regional flow.
///
/// The well sits at the origin and regional flow runs towards `-x`, so the
/// culmination point lies at `x0 = -Q / (2 pi K i b)` and the zone opens
/// towards `+x`. The curve is evaluated as `x(y)`; plots draw it transposed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WellCapture;

impl WellCapture {
    fn coefficient(params: &ResolvedParameters) -> f64 {
        2.0 * PI * params.value("k") * params.value("i") * params.value("b") / params.value("q")
    }

    fn half_width(params: &ResolvedParameters) -> f64 {
        params.value("q") / (2.0 * params.value("k") * params.value("i") * params.value("b"))
    }
}

impl Formula for WellCapture {
    fn kind(&self) -> &'static str {
        "well_capture"
    }

    fn eval(&self, params: &ResolvedParameters, y: f64) -> f64 {
        let c = Self::coefficient(params);
        let u = c * y;
        if u.abs() < DIVIDE_SERIES_LIMIT {
            return -(1.0 - u * u / 3.0) / c;
        }
        -y / u.tan()
    }

    fn domain(&self, params: &ResolvedParameters, _default: Domain) -> Result<Domain, HydroError> {
        let edge = 0.999 * Self::half_width(params);
        Domain::new(-edge, edge)
    }

    fn readouts(&self, params: &ResolvedParameters) -> Result<Vec<Readout>, HydroError> {
        let half_width = Self::half_width(params);
        Ok(vec![
            Readout::new(
                "culmination_point",
                "Culmination point x0",
                "m",
                -1.0 / Self::coefficient(params),
            ),
            Readout::new("half_width", "Maximum half width", "m", half_width),
            Readout::new("full_width", "Maximum width B", "m", 2.0 * half_width),
        ])
    }
}

pub fn well_capture() -> Result<ModelSpec, HydroError> {
    ModelSpec::new(
        "well_capture",
        "Capture zone of a well in uniform flow",
        Arc::new(WellCapture),
    )
    .axis_labels("x in m", "y in m")
    .param(ParamDecl::new(
        "q",
        "Pumping rate",
        "m3/s",
        (0.001, 0.2),
        0.005,
        0.001,
    ))
    .param(
        ParamDecl::new(
            "k",
            "Hydraulic conductivity",
            "m/s",
            (1e-7, 1.0),
            1e-3,
            0.01,
        )
        .log_scale(),
    )
    .param(
        ParamDecl::new("i", "Regional hydraulic gradient", "-", (1e-7, 1.0), 1e-3, 0.01)
            .log_scale(),
    )
    .param(ParamDecl::new(
        "b",
        "Aquifer thickness",
        "m",
        (1.0, 100.0),
        20.0,
        1.0,
    ))
    .domain(-1.0, 1.0)
    .transposed()
    .with_dynamic_domain()
}
