mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::cashflow::CashflowArgs;
use commands::design::TiersArgs;
use commands::estimate::EstimateArgs;
use commands::incentives::{CompareStatesArgs, IncentivesArgs, SummaryArgs, TopStatesArgs};

/// Solar ROI and incentive calculations
#[derive(Parser)]
#[command(
    name = "sroi",
    version,
    about = "Solar ROI and incentive calculations",
    long_about = "Estimate residential solar system sizing, 25-year financing \
                  projections, environmental impact, state incentive benefits \
                  and design tiers. Estimates can optionally pull live roof and \
                  utility-rate data from Google Solar, NREL PVWatts and OpenEI."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full solar estimate from usage, roof and sun exposure
    Estimate(EstimateArgs),
    /// Incentive lookup for a sized system in one state
    Incentives(IncentivesArgs),
    /// Incentive totals bucketed for the summary card
    Summary(SummaryArgs),
    /// Rank all states by incentive benefit for a system
    CompareStates(CompareStatesArgs),
    /// The states with the largest benefit for a reference system
    TopStates(TopStatesArgs),
    /// Conservative / standard / aggressive sizing tiers
    Tiers(TiersArgs),
    /// 25-year cash-flow series for one financing plan
    Cashflow(CashflowArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Estimate(args) => commands::estimate::run_estimate(args),
        Commands::Incentives(args) => commands::incentives::run_incentives(args),
        Commands::Summary(args) => commands::incentives::run_summary(args),
        Commands::CompareStates(args) => commands::incentives::run_compare_states(args),
        Commands::TopStates(args) => commands::incentives::run_top_states(args),
        Commands::Tiers(args) => commands::design::run_tiers(args),
        Commands::Cashflow(args) => commands::cashflow::run_cashflow(args),
        Commands::Version => {
            println!("sroi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
