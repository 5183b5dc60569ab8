use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use hyd_core::to_canonical_json_bytes;
use hyd_curve::compute_spec;
use hyd_lab::output::write_bytes;
use hyd_lab::report::format_curve;

use super::ModelArgs;

#[derive(Args, Debug)]
pub struct CurveArgs {
    #[command(flatten)]
    pub model: ModelArgs,
    /// Print the full curve result as canonical JSON instead of the readout.
    #[arg(long)]
    pub json: bool,
    /// Also write the curve result JSON to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &CurveArgs) -> Result<(), Box<dyn Error>> {
    let spec = args.model.spec()?;
    let params = args.model.values(&spec)?;
    let result = compute_spec(
        &spec,
        &params,
        args.model.query_x(&spec, &params)?,
        &args.model.options(),
    )?;
    let bytes = to_canonical_json_bytes(&result)?;
    if let Some(path) = &args.out {
        write_bytes(path, &bytes)?;
    }
    if args.json {
        println!("{}", String::from_utf8(bytes)?);
    } else {
        print!("{}", format_curve(&result));
    }
    Ok(())
}
