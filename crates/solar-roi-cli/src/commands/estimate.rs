use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use solar_roi_core::calculator::{
    estimate_solar_roi, estimate_with_measured, CalculationInput,
};
use solar_roi_core::production::{monthly_usage_kwh, size_system};
use solar_roi_data::DataSources;

use crate::input;

/// Arguments for a full solar estimate
#[derive(Args)]
pub struct EstimateArgs {
    /// Path to a JSON or YAML input file (flags are ignored when set)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly electricity usage in kWh
    #[arg(long)]
    pub monthly_kwh: Option<Decimal>,

    /// Monthly electricity bill in dollars (used when usage is unknown)
    #[arg(long)]
    pub bill: Option<Decimal>,

    /// Roof area in square feet
    #[arg(long)]
    pub roof_sqft: Option<Decimal>,

    /// Sun exposure: poor, fair, good or excellent
    #[arg(long)]
    pub sun: Option<String>,

    /// 2-letter state code
    #[arg(long)]
    pub state: Option<String>,

    /// Include a battery in the quote
    #[arg(long)]
    pub battery: bool,

    /// Pull live roof analysis and utility rates (requires --lat/--lng)
    #[arg(long)]
    pub live: bool,

    /// Latitude for live data
    #[arg(long)]
    pub lat: Option<f64>,

    /// Longitude for live data
    #[arg(long)]
    pub lng: Option<f64>,

    /// Zip code, used for the rate fallback table
    #[arg(long)]
    pub zip: Option<String>,
}

pub fn run_estimate(args: EstimateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut calc_input: CalculationInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        input_from_flags(&args)?
    };

    if calc_input.as_of.is_none() {
        calc_input.as_of = Some(chrono::Local::now().date_naive());
    }

    if !args.live {
        let output = estimate_solar_roi(&calc_input)?;
        return Ok(serde_json::to_value(output)?);
    }

    // Live path: fetch measured production and a local rate, then run the
    // same calculation on the measured figures.
    let (lat, lng) = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err("--live requires --lat and --lng".into()),
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .ok();

    let monthly = monthly_usage_kwh(calc_input.monthly_kwh, calc_input.monthly_bill)?;
    let target_kw = size_system(
        monthly * dec!(12),
        calc_input.sun_exposure.factor(),
        calc_input.roof_square_feet,
        dec!(1.0),
    );

    let state = calc_input.state;
    let zip = args.zip.clone();
    let runtime = tokio::runtime::Runtime::new()?;
    let (measured, rate) = runtime.block_on(async {
        let sources = DataSources::from_env();
        let measured = sources
            .production_estimate(lat, lng, target_kw, state)
            .await;
        let rate = sources
            .retail_rate(lat, lng, state, zip.as_deref())
            .await;
        (measured, rate)
    });

    calc_input.retail_rate = Some(rate);
    let output = estimate_with_measured(&calc_input, &measured)?;
    Ok(serde_json::to_value(output)?)
}

fn input_from_flags(args: &EstimateArgs) -> Result<CalculationInput, Box<dyn std::error::Error>> {
    let roof_square_feet = args
        .roof_sqft
        .ok_or("--roof-sqft is required (or use --input / stdin)")?;
    let sun_exposure = input::parse_sun(args.sun.as_deref().ok_or("--sun is required")?)?;
    let state = input::parse_state(args.state.as_deref().ok_or("--state is required")?)?;

    Ok(CalculationInput {
        monthly_kwh: args.monthly_kwh,
        monthly_bill: args.bill,
        roof_square_feet,
        sun_exposure,
        state,
        wants_battery: args.battery,
        property_type: solar_roi_core::types::PropertyType::Residential,
        retail_rate: None,
        as_of: None,
    })
}
