//! JSON export of plot descriptions.

use hyd_core::{from_json_slice, to_canonical_json_bytes, HydroError};

use crate::assemble::PlotSpec;

/// Canonical JSON bytes: sorted keys, stable across runs.
pub fn plot_to_json_bytes(plot: &PlotSpec) -> Result<Vec<u8>, HydroError> {
    to_canonical_json_bytes(plot)
}

pub fn plot_from_json_slice(bytes: &[u8]) -> Result<PlotSpec, HydroError> {
    from_json_slice(bytes)
}
