use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Args;
use hyd_lab::report::{format_curve, format_fit};
use hyd_lab::{load_scenario, run_scenario};

#[derive(Args, Debug)]
pub struct ScenarioArgs {
    /// YAML scenario file.
    #[arg(long)]
    pub config: PathBuf,
    /// Output directory for the plot and `scenario_report.json`.
    #[arg(long, default_value = "hydrolab-out")]
    pub out: PathBuf,
}

pub fn run(args: &ScenarioArgs) -> Result<(), Box<dyn Error>> {
    let config = load_scenario(&args.config)?;
    let base_dir = args.config.parent().unwrap_or(Path::new("."));
    let report = run_scenario(&config, base_dir, &args.out)?;
    print!("{}", format_curve(&report.result));
    if let Some(fit) = &report.fit {
        print!("observations: {}", format_fit(&report.model_id, fit));
    }
    if let Some(fit) = &report.hidden_fit {
        print!("hidden curve: {}", format_fit(&report.model_id, fit));
    }
    println!("plot written to {}", report.plot_path.display());
    Ok(())
}
