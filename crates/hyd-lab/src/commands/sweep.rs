use std::error::Error;

use clap::Args;
use hyd_curve::{sweep_parameter_in, sweep_values, swept_param};
use hyd_lab::output::write_plot;
use hyd_models::global;
use hyd_plot::sweep_plot;

use super::{ModelArgs, PlotOutArgs};

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    #[command(flatten)]
    pub output: PlotOutArgs,
    /// Parameter to vary.
    #[arg(long)]
    pub vary: String,
    /// Explicit values, comma separated.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub values: Vec<f64>,
    /// Number of values across the declared range when `--values` is absent.
    #[arg(long, default_value_t = 5)]
    pub count: usize,
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let registry = global()?;
    let spec = args.model.spec()?;
    let params = args.model.values(&spec)?;
    let values = if args.values.is_empty() {
        sweep_values(swept_param(&spec, &args.vary)?, args.count)?
    } else {
        args.values.clone()
    };
    let results = sweep_parameter_in(
        registry,
        &spec.id,
        &params,
        &args.vary,
        &values,
        args.model.query_x(&spec, &params)?,
        &args.model.options(),
    )?;
    let mut plot = sweep_plot(&results, &args.vary, &values)?;
    if let Some(title) = &args.output.title {
        plot.title = title.clone();
    }
    write_plot(
        &args.output.out,
        &plot,
        args.output.format(),
        &args.output.svg_config(),
    )?;
    for (value, result) in values.iter().zip(&results) {
        println!(
            "{} = {}: y({}) = {:.6}",
            args.vary, value, result.query.x, result.query.y
        );
    }
    Ok(())
}
