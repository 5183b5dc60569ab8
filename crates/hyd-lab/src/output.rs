//! Writing plot descriptions to disk.

use std::fs;
use std::path::Path;

use hyd_core::{ErrorInfo, HydroError};
use hyd_plot::{plot_to_json_bytes, render_svg, PlotSpec, SvgConfig};
use log::info;

use crate::config::PlotFormat;

pub fn encode_plot(
    plot: &PlotSpec,
    format: PlotFormat,
    svg: &SvgConfig,
) -> Result<Vec<u8>, HydroError> {
    match format {
        PlotFormat::Json => plot_to_json_bytes(plot),
        PlotFormat::Svg => Ok(render_svg(plot, svg).into_bytes()),
    }
}

pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), HydroError> {
    let io_error = |err: std::io::Error| {
        HydroError::Serde(
            ErrorInfo::new("hyd_lab.write", err.to_string()).with_context("path", path.display()),
        )
    };
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, bytes).map_err(io_error)?;
    info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

pub fn write_plot(
    path: &Path,
    plot: &PlotSpec,
    format: PlotFormat,
    svg: &SvgConfig,
) -> Result<(), HydroError> {
    write_bytes(path, &encode_plot(plot, format, svg)?)
}
