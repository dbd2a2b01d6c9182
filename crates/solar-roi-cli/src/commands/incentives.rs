use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use solar_roi_core::incentives::{
    compare_state_incentives, incentive_summary, lookup_incentives, top_incentive_states,
    IncentiveQuery,
};
use solar_roi_core::types::PropertyType;

use crate::input;

/// Arguments for an incentive lookup
#[derive(Args)]
pub struct IncentivesArgs {
    /// Path to a JSON or YAML query file (flags are ignored when set)
    #[arg(long)]
    pub input: Option<String>,

    /// 2-letter state code
    #[arg(long)]
    pub state: Option<String>,

    /// System size in kW
    #[arg(long)]
    pub size_kw: Option<Decimal>,

    /// Installed system cost in dollars
    #[arg(long)]
    pub cost: Option<Decimal>,

    /// Property type: residential, commercial or nonprofit
    #[arg(long, default_value = "residential")]
    pub property: String,
}

/// Arguments for the bucketed incentive summary
#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub query: IncentivesArgs,
}

/// Arguments for the all-states comparison
#[derive(Args)]
pub struct CompareStatesArgs {
    /// System size in kW
    #[arg(long)]
    pub size_kw: Decimal,

    /// Installed system cost in dollars
    #[arg(long)]
    pub cost: Decimal,
}

/// Arguments for the top-states ranking
#[derive(Args)]
pub struct TopStatesArgs {
    /// How many states to show
    #[arg(long, default_value = "10")]
    pub count: usize,
}

pub fn run_incentives(args: IncentivesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let query = build_query(&args)?;
    let result = lookup_incentives(&query);
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let query = build_query(&args.query)?;
    let result = incentive_summary(&query);
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare_states(args: CompareStatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rows = compare_state_incentives(
        args.size_kw,
        args.cost,
        PropertyType::Residential,
        Some(chrono::Local::now().date_naive()),
    );
    Ok(serde_json::to_value(rows)?)
}

pub fn run_top_states(args: TopStatesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rows = top_incentive_states(args.count);
    Ok(serde_json::to_value(rows)?)
}

fn build_query(args: &IncentivesArgs) -> Result<IncentiveQuery, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        let mut query: IncentiveQuery = input::file::read_input(path)?;
        if query.as_of.is_none() {
            query.as_of = Some(chrono::Local::now().date_naive());
        }
        return Ok(query);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        let mut query: IncentiveQuery = serde_json::from_value(data)?;
        if query.as_of.is_none() {
            query.as_of = Some(chrono::Local::now().date_naive());
        }
        return Ok(query);
    }

    let state = input::parse_state(args.state.as_deref().ok_or("--state is required")?)?;
    let system_size_kw = args.size_kw.ok_or("--size-kw is required")?;
    let system_cost = args.cost.ok_or("--cost is required")?;
    let property_type = parse_property(&args.property)?;

    Ok(IncentiveQuery {
        state,
        system_size_kw,
        system_cost,
        property_type,
        as_of: Some(chrono::Local::now().date_naive()),
    })
}

fn parse_property(value: &str) -> Result<PropertyType, Box<dyn std::error::Error>> {
    match value.to_ascii_lowercase().as_str() {
        "residential" => Ok(PropertyType::Residential),
        "commercial" => Ok(PropertyType::Commercial),
        "nonprofit" => Ok(PropertyType::Nonprofit),
        other => Err(format!(
            "Unknown property type '{other}' (expected residential, commercial or nonprofit)"
        )
        .into()),
    }
}
