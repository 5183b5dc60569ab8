use std::error::Error;

use clap::Args;
use hyd_core::to_canonical_json_bytes;
use hyd_curve::list_models;
use hyd_lab::report::format_models;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the model summaries as canonical JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ListArgs) -> Result<(), Box<dyn Error>> {
    let models = list_models()?;
    if args.json {
        println!("{}", String::from_utf8(to_canonical_json_bytes(&models)?)?);
    } else {
        print!("{}", format_models(&models));
    }
    Ok(())
}
