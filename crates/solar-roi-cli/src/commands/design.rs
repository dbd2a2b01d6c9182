use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use solar_roi_core::design::generate_design_tiers;

use crate::input;

/// Arguments for design-tier generation
#[derive(Args)]
pub struct TiersArgs {
    /// Monthly electricity usage in kWh
    #[arg(long)]
    pub monthly_kwh: Decimal,

    /// Sun exposure: poor, fair, good or excellent
    #[arg(long)]
    pub sun: String,

    /// 2-letter state code
    #[arg(long)]
    pub state: String,

    /// Roof area in square feet
    #[arg(long)]
    pub roof_sqft: Decimal,
}

pub fn run_tiers(args: TiersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sun = input::parse_sun(&args.sun)?;
    let state = input::parse_state(&args.state)?;

    let output = generate_design_tiers(
        args.monthly_kwh * dec!(12),
        sun.factor(),
        state,
        args.roof_sqft,
        None,
        Some(chrono::Local::now().date_naive()),
    )?;
    Ok(serde_json::to_value(output)?)
}
