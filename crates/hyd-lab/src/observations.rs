//! Measured data read from CSV files with `x,y` columns.

use std::path::Path;

use hyd_core::{ErrorInfo, HydroError};
use hyd_curve::Observation;

fn csv_error(code: &str, path: &Path, err: impl ToString) -> HydroError {
    HydroError::Serde(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display()),
    )
}

pub fn read_observations(path: &Path) -> Result<Vec<Observation>, HydroError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .map_err(|err| csv_error("hyd_lab.observations_open", path, err))?;
    reader
        .deserialize()
        .enumerate()
        .map(|(row, record)| {
            record.map_err(|err| {
                csv_error("hyd_lab.observations_parse", path, err).with_context("row", row + 1)
            })
        })
        .collect()
}
