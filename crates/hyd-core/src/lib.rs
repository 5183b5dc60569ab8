#![deny(missing_docs)]
#![doc = "Core error taxonomy, parameter declarations and domains shared by the hydrolab crates."]

pub mod domain;
pub mod errors;
#[allow(missing_docs)]
pub mod guides;
pub mod hash;
pub mod params;
pub mod serde;

pub use domain::Domain;
pub use errors::{ErrorInfo, HydroError};
pub use guides::{Guides, Readout, ReferenceLine, ShadeBound, ShadeRule};
pub use hash::stable_hash_string;
pub use params::{ParamDecl, ParameterValues, RangePolicy};
pub use serde::{from_json_slice, to_canonical_json_bytes};
