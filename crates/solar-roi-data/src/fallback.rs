//! Deterministic fallback tables used when the live providers are down,
//! unconfigured, or have nothing for a location.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use solar_roi_core::calculator::MeasuredProduction;
use solar_roi_core::types::{Kilowatts, ProductionSource, UsState};

/// Overall system derate applied on top of peak-sun-hour production.
const SYSTEM_DERATE: Decimal = dec!(0.77);

/// Average daily peak sun hours by state.
pub fn peak_sun_hours(state: UsState) -> Decimal {
    use UsState::*;
    match state {
        AZ | NM => dec!(6.4),
        NV => dec!(6.2),
        CA | UT | CO => dec!(5.6),
        TX | OK | KS | HI => dec!(5.3),
        FL | GA | SC | NC | AL | MS | LA | AR | TN => dec!(4.9),
        MO | NE | WY | ID | VA | KY => dec!(4.5),
        MD | DE | DC | NJ | WV | IL | IN | IA | SD | MT => dec!(4.2),
        NY | PA | CT | RI | MA | OH | MI | WI | MN | ND | ME | NH | VT => dec!(3.9),
        OR | WA => dec!(3.4),
        AK => dec!(2.5),
    }
}

/// Average residential retail rate by state ($/kWh).
pub fn average_retail_rate(state: UsState) -> Decimal {
    use UsState::*;
    match state {
        HI => dec!(0.42),
        CA => dec!(0.29),
        MA => dec!(0.28),
        CT => dec!(0.27),
        RI => dec!(0.26),
        NH => dec!(0.25),
        AK | ME => dec!(0.23),
        NY | VT => dec!(0.22),
        NJ | MI => dec!(0.18),
        MD | PA | WI | DC => dec!(0.16),
        IL | FL | AZ | CO | NM | MN | OH | IN | GA | SC | NC | AL | VA | DE => dec!(0.15),
        TX | NV | OR | KS | IA | SD | ND | MT | WY | MS | LA | AR | TN | MO | NE | OK | KY
        | WV => dec!(0.13),
        WA | ID | UT => dec!(0.11),
    }
}

/// Metro-level retail-rate overrides keyed by 3-digit zip prefix. Sparse by
/// design; anything unlisted falls through to the state average.
pub fn retail_rate_by_zip_prefix(zip: &str) -> Option<Decimal> {
    let prefix: String = zip.trim().chars().take(3).collect();
    let rate = match prefix.as_str() {
        // New York City boroughs
        "100" | "101" | "102" | "103" | "104" | "112" => dec!(0.25),
        // Boston metro
        "021" | "022" => dec!(0.29),
        // Chicago metro
        "606" | "607" | "608" => dec!(0.16),
        // Phoenix metro
        "850" | "852" | "853" => dec!(0.14),
        // San Francisco / San Jose
        "941" | "945" | "951" => dec!(0.32),
        // Los Angeles basin
        "900" | "902" | "906" | "913" | "917" => dec!(0.28),
        // Miami metro
        "331" | "332" | "333" => dec!(0.15),
        _ => return None,
    };
    Some(rate)
}

/// Production estimate from the state irradiance table, shaped like any
/// other measured figure so it flows through the same override path.
pub fn state_average_production(state: UsState, system_size_kw: Kilowatts) -> MeasuredProduction {
    let annual = system_size_kw * peak_sun_hours(state) * dec!(365) * SYSTEM_DERATE;
    MeasuredProduction {
        system_size_kw,
        annual_production_kwh: annual
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        source: ProductionSource::StateAverage,
    }
}
