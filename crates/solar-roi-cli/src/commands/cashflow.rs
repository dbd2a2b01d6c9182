use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use solar_roi_core::assumptions::ASSUMED_RETAIL_RATE;
use solar_roi_core::cashflow::{payback_from_series, simulate_cash_flow};
use solar_roi_core::financing::FinancingType;

/// Arguments for the cash-flow series
#[derive(Args)]
pub struct CashflowArgs {
    /// Financing plan: cash, loan or lease
    #[arg(long)]
    pub plan: String,

    /// Installed system cost in dollars
    #[arg(long)]
    pub system_cost: Decimal,

    /// Annual production in kWh
    #[arg(long)]
    pub annual_kwh: Decimal,

    /// Retail rate in $/kWh (defaults to the assumed national rate)
    #[arg(long)]
    pub rate: Option<Decimal>,
}

pub fn run_cashflow(args: CashflowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = match args.plan.to_ascii_lowercase().as_str() {
        "cash" => FinancingType::Cash,
        "loan" => FinancingType::Loan,
        "lease" => FinancingType::Lease,
        other => {
            return Err(
                format!("Unknown plan '{other}' (expected cash, loan or lease)").into(),
            )
        }
    };

    let rate = args.rate.unwrap_or(ASSUMED_RETAIL_RATE);
    let series = simulate_cash_flow(plan, args.system_cost, args.annual_kwh, rate);
    let payback = payback_from_series(&series);

    Ok(serde_json::json!({
        "plan": args.plan.to_ascii_lowercase(),
        "payback_years": payback,
        "series": series,
    }))
}
