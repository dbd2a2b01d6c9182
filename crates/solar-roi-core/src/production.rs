//! System sizing and production estimation.
//!
//! The simplified model sizes a system to cover annual consumption at the
//! property's sun exposure, limited by what the roof can physically hold.
//! Measured figures from the provider layer replace these outputs but flow
//! through the same downstream financing and environmental math.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::assumptions::{
    ASSUMED_RETAIL_RATE, BASELINE_YIELD_KWH_PER_KW, BATTERY_COST, COST_PER_WATT,
    INSTALL_BASE_COST, MIN_SYSTEM_KW, SQFT_PER_KW, USABLE_ROOF_FRACTION,
};
use crate::error::SolarRoiError;
use crate::types::{KilowattHours, Kilowatts, Money, SquareFeet};
use crate::SolarRoiResult;

/// Monthly usage in kWh, either given directly or backed out of the bill.
pub fn monthly_usage_kwh(
    monthly_kwh: Option<Decimal>,
    monthly_bill: Option<Money>,
) -> SolarRoiResult<KilowattHours> {
    if let Some(kwh) = monthly_kwh {
        if kwh <= Decimal::ZERO {
            return Err(SolarRoiError::InvalidInput {
                field: "monthly_kwh".into(),
                reason: "Monthly usage must be positive".into(),
            });
        }
        return Ok(kwh);
    }
    if let Some(bill) = monthly_bill {
        if bill <= Decimal::ZERO {
            return Err(SolarRoiError::InvalidInput {
                field: "monthly_bill".into(),
                reason: "Monthly bill must be positive".into(),
            });
        }
        return Ok(bill / ASSUMED_RETAIL_RATE);
    }
    Err(SolarRoiError::InsufficientData(
        "Either monthly_kwh or monthly_bill is required".into(),
    ))
}

/// Largest system the roof can hold (kW), before rounding.
pub fn roof_ceiling_kw(roof_square_feet: SquareFeet) -> Kilowatts {
    roof_square_feet * USABLE_ROOF_FRACTION / SQFT_PER_KW
}

/// Size a system to offset `offset_target` of annual consumption, clamped to
/// the roof and quoted in 0.1 kW steps.
pub fn size_system(
    annual_consumption_kwh: KilowattHours,
    sun_factor: Decimal,
    roof_square_feet: SquareFeet,
    offset_target: Decimal,
) -> Kilowatts {
    let yield_per_kw = BASELINE_YIELD_KWH_PER_KW * sun_factor;
    let target = if yield_per_kw > Decimal::ZERO {
        annual_consumption_kwh * offset_target / yield_per_kw
    } else {
        Decimal::ZERO
    };

    // Quote in 0.1 kW steps; the ceiling is floored so the quoted size never
    // exceeds what the roof holds.
    let target = target.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let ceiling =
        roof_ceiling_kw(roof_square_feet).round_dp_with_strategy(1, RoundingStrategy::ToZero);

    let mut size = target.min(ceiling);
    if MIN_SYSTEM_KW <= ceiling {
        size = size.max(MIN_SYSTEM_KW);
    }
    size.max(Decimal::ZERO)
}

/// Annual production for a sized system (kWh).
pub fn annual_production(system_size_kw: Kilowatts, sun_factor: Decimal) -> KilowattHours {
    system_size_kw * BASELINE_YIELD_KWH_PER_KW * sun_factor
}

/// Monthly production, rounded to whole kWh.
pub fn monthly_production(annual_production_kwh: KilowattHours) -> KilowattHours {
    (annual_production_kwh / dec!(12))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Installed system cost.
pub fn system_cost(system_size_kw: Kilowatts, wants_battery: bool) -> Money {
    let mut cost = INSTALL_BASE_COST + system_size_kw * dec!(1000) * COST_PER_WATT;
    if wants_battery {
        cost += BATTERY_COST;
    }
    cost
}

/// Back-derive the effective sun factor from a measured production figure so
/// measured systems run through the same formulas as estimated ones.
pub fn effective_sun_factor(
    annual_production_kwh: KilowattHours,
    system_size_kw: Kilowatts,
) -> SolarRoiResult<Decimal> {
    if system_size_kw <= Decimal::ZERO {
        return Err(SolarRoiError::DivisionByZero {
            context: "effective sun factor for zero-size system".into(),
        });
    }
    Ok(annual_production_kwh / system_size_kw / BASELINE_YIELD_KWH_PER_KW)
}
