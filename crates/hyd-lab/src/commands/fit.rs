use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hyd_curve::fit_statistics;
use hyd_lab::observations::read_observations;
use hyd_lab::report::format_fit;

use super::ModelArgs;

#[derive(Args, Debug)]
pub struct FitArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// CSV file with `x,y` columns.
    #[arg(long)]
    pub observations: PathBuf,
}

pub fn run(args: &FitArgs) -> Result<(), Box<dyn Error>> {
    let spec = args.model.spec()?;
    let params = args.model.values(&spec)?;
    let observations = read_observations(&args.observations)?;
    let stats = fit_statistics(&spec.id, &params, &observations)?;
    print!("{}", format_fit(&spec.id, &stats));
    Ok(())
}
