//! Built-in model catalogue.

mod aquifer;
mod errfn;
mod surface;
mod wells;

use hyd_core::HydroError;

use crate::spec::ModelSpec;

pub use aquifer::{ghyben_herzberg, transport_1d, GhybenHerzberg, Transport1d};
pub use errfn::{
    erf_model, erfc_model, s_star, s_star_integrand, s_star_model, Erf, Erfc, SStar,
};
pub use surface::{
    baseflow_recession, evapotranspiration, infiltration_capacity, BaseflowRecession,
    Evapotranspiration, InfiltrationCapacity,
};
pub use wells::{
    sichardt_radius, slug_test, theis_drawdown, thiem_confined, thiem_confined_drawdown,
    well_capture, SlugTest, TheisDrawdown, ThiemConfined, ThiemConfinedDrawdown, WellCapture,
};

/// Every built-in model in registration order.
pub fn builtin_models() -> Result<Vec<ModelSpec>, HydroError> {
    Ok(vec![
        baseflow_recession(),
        infiltration_capacity(),
        slug_test(),
        erf_model(),
        erfc_model(),
        well_capture()?,
        s_star_model(),
        theis_drawdown(),
        thiem_confined()?,
        thiem_confined_drawdown()?,
        ghyben_herzberg(),
        evapotranspiration(),
        transport_1d()?,
    ])
}
