//! Three alternative system sizings for the design comparison page.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::time::Instant;

use crate::assumptions::ASSUMED_RETAIL_RATE;
use crate::error::SolarRoiError;
use crate::financing::{cash_plan, savings_schedule};
use crate::incentives::{lookup_incentives, IncentiveQuery};
use crate::production::{annual_production, size_system, system_cost};
use crate::types::{
    with_metadata, ComputationOutput, KilowattHours, Kilowatts, Money, PropertyType, Rate,
    SquareFeet, UsState,
};
use crate::SolarRoiResult;

/// The three sizing strategies offered side by side.
const TIER_TARGETS: [(&str, Decimal); 3] = [
    ("Starter", dec!(0.70)),
    ("Balanced", dec!(1.00)),
    ("Max Offset", dec!(1.30)),
];

/// One sizing option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignTier {
    pub name: &'static str,
    /// Share of annual consumption this tier aims to offset (percent)
    pub offset_target_pct: Decimal,
    pub system_size_kw: Kilowatts,
    pub annual_production_kwh: KilowattHours,
    pub total_cost: Money,
    pub net_cost_after_incentives: Money,
    pub roi_25yr_pct: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payback_years: Option<Decimal>,
}

/// Generate the conservative / standard / aggressive tiers.
///
/// Every tier is clamped to the same roof ceiling, so when the roof binds
/// before the aggressive target, tiers legitimately collapse to the same
/// size. Sizes are always non-decreasing across the three.
pub fn generate_design_tiers(
    annual_consumption_kwh: KilowattHours,
    sun_factor: Decimal,
    state: UsState,
    roof_square_feet: SquareFeet,
    retail_rate: Option<Rate>,
    as_of: Option<NaiveDate>,
) -> SolarRoiResult<ComputationOutput<Vec<DesignTier>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if annual_consumption_kwh <= Decimal::ZERO {
        return Err(SolarRoiError::InvalidInput {
            field: "annual_consumption_kwh".into(),
            reason: "Annual consumption must be positive".into(),
        });
    }
    if roof_square_feet <= Decimal::ZERO {
        return Err(SolarRoiError::InvalidInput {
            field: "roof_square_feet".into(),
            reason: "Roof area must be positive".into(),
        });
    }

    let rate = retail_rate.unwrap_or(ASSUMED_RETAIL_RATE);
    let tiers: Vec<DesignTier> = TIER_TARGETS
        .iter()
        .map(|&(name, target)| {
            build_tier(
                name,
                target,
                annual_consumption_kwh,
                sun_factor,
                state,
                roof_square_feet,
                rate,
                as_of,
            )
        })
        .collect();

    if tiers[0].system_size_kw == tiers[2].system_size_kw {
        warnings.push("Roof area caps all three tiers to the same size".to_string());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "System Design Tiers (70% / 100% / 130% offset)",
        &serde_json::json!({
            "annual_consumption_kwh": annual_consumption_kwh.to_string(),
            "sun_factor": sun_factor.to_string(),
            "state": state.code(),
            "roof_square_feet": roof_square_feet.to_string(),
            "retail_rate": rate.to_string(),
        }),
        warnings,
        elapsed,
        tiers,
    ))
}

#[allow(clippy::too_many_arguments)]
fn build_tier(
    name: &'static str,
    target: Decimal,
    annual_consumption_kwh: KilowattHours,
    sun_factor: Decimal,
    state: UsState,
    roof_square_feet: SquareFeet,
    retail_rate: Rate,
    as_of: Option<NaiveDate>,
) -> DesignTier {
    let size = size_system(annual_consumption_kwh, sun_factor, roof_square_feet, target);
    let production = annual_production(size, sun_factor);
    let cost = system_cost(size, false);

    let savings = savings_schedule(production, retail_rate);
    let cash = cash_plan(cost, &savings);

    let incentives = lookup_incentives(&IncentiveQuery {
        state,
        system_size_kw: size,
        system_cost: cost,
        property_type: PropertyType::Residential,
        as_of,
    });
    let net_cost = (cost - incentives.total_estimated_benefit).max(Decimal::ZERO);

    DesignTier {
        name,
        offset_target_pct: target * dec!(100),
        system_size_kw: size,
        annual_production_kwh: production,
        total_cost: cost,
        net_cost_after_incentives: net_cost,
        roi_25yr_pct: cash.roi_25yr_pct,
        payback_years: cash.payoff_years,
    }
}
