use std::error::Error;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    curve::{self, CurveArgs},
    fit::{self, FitArgs},
    list::{self, ListArgs},
    plot::{self, PlotArgs},
    scenario::{self, ScenarioArgs},
    sweep::{self, SweepArgs},
};
use log::LevelFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "hydrolab", about = "Parametric curves for hydrology formulas")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in models with their parameters and domains.
    List(ListArgs),
    /// Evaluate a model and print the readout at the query point.
    Curve(CurveArgs),
    /// Evaluate a model and write its plot as SVG or JSON.
    Plot(PlotArgs),
    /// Plot a family of curves over one parameter.
    Sweep(SweepArgs),
    /// Compare a model against measured (x, y) pairs from a CSV file.
    Fit(FitArgs),
    /// Run a YAML scenario file.
    Scenario(ScenarioArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn dispatch(command: &Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::List(args) => list::run(args),
        Command::Curve(args) => curve::run(args),
        Command::Plot(args) => plot::run(args),
        Command::Sweep(args) => sweep::run(args),
        Command::Fit(args) => fit::run(args),
        Command::Scenario(args) => scenario::run(args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match dispatch(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
