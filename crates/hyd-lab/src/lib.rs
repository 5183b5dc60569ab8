//! Building blocks of the `hydrolab` command line front end.

pub mod config;
pub mod observations;
pub mod output;
pub mod params;
pub mod report;
pub mod scenario;

pub use config::{
    load_scenario, parse_scenario, PlotConfig, PlotFormat, ScenarioConfig, SweepConfig,
};
pub use scenario::{run_scenario, run_scenario_in, ScenarioReport, REPORT_FILE};
