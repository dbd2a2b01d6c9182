//! Environmental impact figures derived from production vs. consumption.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::{CO2_LBS_PER_KWH, CO2_LBS_PER_TREE_YEAR};
use crate::types::{KilowattHours, Kilowatts};

/// Environmental impact of a sized system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    /// Annual CO2 displaced, in whole pounds
    pub annual_co2_offset_lbs: Decimal,
    /// Equivalent number of mature trees planted
    pub trees_equivalent: Decimal,
    /// Share of annual consumption covered by production, capped at 100
    pub grid_independence_pct: Decimal,
}

/// Derive CO2 offset, tree equivalents and grid independence.
///
/// Zero or negative consumption yields a grid independence of 0 rather than
/// an unbounded ratio; a lead with no recorded usage gets no offset claim.
pub fn environmental_impact(
    _system_size_kw: Kilowatts,
    annual_production_kwh: KilowattHours,
    annual_consumption_kwh: KilowattHours,
) -> EnvironmentalImpact {
    let co2 = round_whole(annual_production_kwh * CO2_LBS_PER_KWH);
    let trees = round_whole(co2 / CO2_LBS_PER_TREE_YEAR);

    let grid_independence_pct = if annual_consumption_kwh <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        let pct = round_whole(annual_production_kwh / annual_consumption_kwh * dec!(100));
        pct.min(dec!(100))
    };

    EnvironmentalImpact {
        annual_co2_offset_lbs: co2,
        trees_equivalent: trees,
        grid_independence_pct,
    }
}

/// Percentage of the electric bill offset by production, computed the same
/// way the results page does it. Must agree with
/// [`EnvironmentalImpact::grid_independence_pct`] for any input.
pub fn bill_offset_pct(
    annual_production_kwh: KilowattHours,
    annual_consumption_kwh: KilowattHours,
) -> Decimal {
    if annual_consumption_kwh <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_whole(annual_production_kwh / annual_consumption_kwh * dec!(100)).min(dec!(100))
}

/// Half-up rounding to a whole number.
fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
