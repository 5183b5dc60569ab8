use std::error::Error;

use clap::Args;
use hyd_curve::compute_spec;
use hyd_lab::output::write_plot;
use hyd_lab::report::format_curve;
use hyd_plot::{to_plot_spec, PresentationOptions};

use super::{ModelArgs, PlotOutArgs};

#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    #[command(flatten)]
    pub output: PlotOutArgs,
    /// Independent axis range as MIN,MAX.
    #[arg(long, value_delimiter = ',', num_args = 2, allow_negative_numbers = true)]
    pub x_bounds: Vec<f64>,
    /// Dependent axis range as MIN,MAX.
    #[arg(long, value_delimiter = ',', num_args = 2, allow_negative_numbers = true)]
    pub y_bounds: Vec<f64>,
    /// Leave out reference lines and shaded regions.
    #[arg(long)]
    pub no_guides: bool,
}

fn pair(values: &[f64]) -> Option<(f64, f64)> {
    match values {
        [lo, hi] => Some((*lo, *hi)),
        _ => None,
    }
}

pub fn run(args: &PlotArgs) -> Result<(), Box<dyn Error>> {
    let spec = args.model.spec()?;
    let params = args.model.values(&spec)?;
    let result = compute_spec(
        &spec,
        &params,
        args.model.query_x(&spec, &params)?,
        &args.model.options(),
    )?;
    let mut presentation = if args.no_guides {
        PresentationOptions::default()
    } else {
        PresentationOptions::for_result(&result)
    };
    presentation.title = args.output.title.clone();
    presentation.x_bounds = pair(&args.x_bounds);
    presentation.y_bounds = pair(&args.y_bounds);
    let plot = to_plot_spec(&result.curve, &result.query, &presentation)?;
    write_plot(
        &args.output.out,
        &plot,
        args.output.format(),
        &args.output.svg_config(),
    )?;
    print!("{}", format_curve(&result));
    Ok(())
}
