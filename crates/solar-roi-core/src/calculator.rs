//! The top-level estimate: input from the wizard, one result for the
//! results page.
//!
//! Two entry points share every downstream formula. The simplified path
//! sizes the system from usage and roof area; the measured path takes a
//! provider figure (Google Solar, PVWatts, or the state-average table) and
//! back-derives the effective sun factor, so financing, environmental and
//! incentive numbers stay consistent whichever path produced the size.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::assumptions::{ASSUMED_RETAIL_RATE, BASELINE_YIELD_KWH_PER_KW};
use crate::environmental::{bill_offset_pct, environmental_impact, EnvironmentalImpact};
use crate::error::SolarRoiError;
use crate::financing::{financing_plans, FinancingPlan, FinancingType};
use crate::incentives::{lookup_incentives, IncentiveLookup, IncentiveQuery};
use crate::production::{
    annual_production, effective_sun_factor, monthly_production, monthly_usage_kwh,
    roof_ceiling_kw, size_system, system_cost,
};
use crate::types::{
    with_metadata, ComputationOutput, KilowattHours, Kilowatts, Money, ProductionSource,
    PropertyType, Rate, SquareFeet, SunExposure, UsState,
};
use crate::SolarRoiResult;

/// Everything the calculator wizard collects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Direct usage entry, preferred when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_kwh: Option<Decimal>,
    /// Dollar bill amount, converted at the assumed retail rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_bill: Option<Money>,
    pub roof_square_feet: SquareFeet,
    pub sun_exposure: SunExposure,
    pub state: UsState,
    #[serde(default)]
    pub wants_battery: bool,
    #[serde(default = "default_property_type")]
    pub property_type: PropertyType,
    /// Live utility rate when the provider layer found one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_rate: Option<Rate>,
    /// Incentive-window date; `None` skips window filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

fn default_property_type() -> PropertyType {
    PropertyType::Residential
}

/// A production figure measured by an external source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasuredProduction {
    pub system_size_kw: Kilowatts,
    pub annual_production_kwh: KilowattHours,
    pub source: ProductionSource,
}

/// The complete estimate for the results page.
#[derive(Debug, Clone, Serialize)]
pub struct SolarEstimate {
    pub system_size_kw: Kilowatts,
    pub estimated_annual_production: KilowattHours,
    pub estimated_monthly_production: KilowattHours,
    pub system_cost: Money,
    pub financing: Vec<FinancingPlan>,
    pub environmental: EnvironmentalImpact,
    pub incentives: IncentiveLookup,
    /// Independently computed bill-offset view; always equals
    /// `environmental.grid_independence_pct`
    pub bill_offset_pct: Decimal,
    pub net_cost_after_incentives: Money,
    /// Which source produced the size and production figures
    pub production_source: Option<ProductionSource>,
}

/// Run the full estimate from wizard input alone.
pub fn estimate_solar_roi(
    input: &CalculationInput,
) -> SolarRoiResult<ComputationOutput<SolarEstimate>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let annual_consumption = validated_annual_consumption(input)?;
    let sun_factor = input.sun_exposure.factor();

    let size = size_system(annual_consumption, sun_factor, input.roof_square_feet, dec!(1.0));
    if size <= Decimal::ZERO {
        return Err(SolarRoiError::InvalidInput {
            field: "roof_square_feet".into(),
            reason: "Roof area cannot hold a viable system".into(),
        });
    }

    let ceiling = roof_ceiling_kw(input.roof_square_feet);
    let unconstrained = annual_consumption / (BASELINE_YIELD_KWH_PER_KW * sun_factor);
    if unconstrained > ceiling {
        warnings.push(format!(
            "System size limited by roof area: {size} kW quoted against a \
             {unconstrained:.1} kW usage target"
        ));
    }

    let production = annual_production(size, sun_factor);
    let estimate = assemble(input, size, production, annual_consumption, None, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Solar ROI Estimate (simplified production model)",
        &assumption_set(input, sun_factor),
        warnings,
        elapsed,
        estimate,
    ))
}

/// Run the full estimate with a measured production figure in place of the
/// simplified sizing formula.
pub fn estimate_with_measured(
    input: &CalculationInput,
    measured: &MeasuredProduction,
) -> SolarRoiResult<ComputationOutput<SolarEstimate>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let annual_consumption = validated_annual_consumption(input)?;
    let sun_factor = effective_sun_factor(
        measured.annual_production_kwh,
        measured.system_size_kw,
    )?;
    if measured.annual_production_kwh < Decimal::ZERO {
        return Err(SolarRoiError::InvalidInput {
            field: "annual_production_kwh".into(),
            reason: "Measured production cannot be negative".into(),
        });
    }

    warnings.push(format!(
        "Production measured via {}",
        match measured.source {
            ProductionSource::GoogleSolar => "Google Solar roof analysis",
            ProductionSource::PvWatts => "NREL PVWatts simulation",
            ProductionSource::StateAverage => "state-average irradiance table",
        }
    ));

    let estimate = assemble(
        input,
        measured.system_size_kw,
        measured.annual_production_kwh,
        annual_consumption,
        Some(measured.source),
        &mut warnings,
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Solar ROI Estimate (measured production)",
        &assumption_set(input, sun_factor),
        warnings,
        elapsed,
        estimate,
    ))
}

/// Shared back half of both entry points: cost, financing, environmental,
/// incentives and the bill-offset cross-view.
fn assemble(
    input: &CalculationInput,
    size: Kilowatts,
    production: KilowattHours,
    annual_consumption: KilowattHours,
    source: Option<ProductionSource>,
    warnings: &mut Vec<String>,
) -> SolarEstimate {
    let cost = system_cost(size, input.wants_battery);
    if input.wants_battery {
        warnings.push("Battery storage adder included in system cost".to_string());
    }

    let retail_rate = input.retail_rate.unwrap_or(ASSUMED_RETAIL_RATE);
    let financing = financing_plans(cost, production, retail_rate);
    if let Some(lease) = financing
        .iter()
        .find(|p| p.plan_type == FinancingType::Lease)
    {
        if lease.net_benefit_25yr < Decimal::ZERO {
            warnings.push(
                "Lease payments exceed projected savings over the analysis horizon".to_string(),
            );
        }
    }

    let environmental = environmental_impact(size, production, annual_consumption);
    let bill_offset = bill_offset_pct(production, annual_consumption);

    let incentives = lookup_incentives(&IncentiveQuery {
        state: input.state,
        system_size_kw: size,
        system_cost: cost,
        property_type: input.property_type,
        as_of: input.as_of,
    });
    let net_cost = (cost - incentives.total_estimated_benefit).max(Decimal::ZERO);

    SolarEstimate {
        system_size_kw: size,
        estimated_annual_production: production,
        estimated_monthly_production: monthly_production(production),
        system_cost: cost,
        financing,
        environmental,
        incentives,
        bill_offset_pct: bill_offset,
        net_cost_after_incentives: net_cost,
        production_source: source,
    }
}

fn validated_annual_consumption(input: &CalculationInput) -> SolarRoiResult<KilowattHours> {
    if input.roof_square_feet <= Decimal::ZERO {
        return Err(SolarRoiError::InvalidInput {
            field: "roof_square_feet".into(),
            reason: "Roof area must be positive".into(),
        });
    }
    let monthly = monthly_usage_kwh(input.monthly_kwh, input.monthly_bill)?;
    Ok(monthly * dec!(12))
}

fn assumption_set(input: &CalculationInput, sun_factor: Decimal) -> serde_json::Value {
    serde_json::json!({
        "state": input.state.code(),
        "sun_exposure": input.sun_exposure,
        "sun_factor": sun_factor.to_string(),
        "roof_square_feet": input.roof_square_feet.to_string(),
        "retail_rate": input
            .retail_rate
            .unwrap_or(ASSUMED_RETAIL_RATE)
            .to_string(),
        "wants_battery": input.wants_battery,
        "property_type": input.property_type,
    })
}
