//! Every number the engine assumes, in one place.
//!
//! These are deliberately conservative national figures. Live utility rates
//! and measured production from the provider layer override the ones they
//! cover; everything else is fixed for the life of a quote so repeated runs
//! of the same input produce identical output.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Baseline annual yield per kW of nameplate capacity before the sun-exposure
/// multiplier is applied (kWh / kW / yr).
pub const BASELINE_YIELD_KWH_PER_KW: Decimal = dec!(1200);

/// Retail electricity rate used to back usage out of a dollar bill amount
/// when the lead only knows what they pay ($ / kWh).
pub const ASSUMED_RETAIL_RATE: Decimal = dec!(0.17);

/// Annual retail rate escalation applied to projected savings.
pub const RATE_ESCALATION: Decimal = dec!(0.025);

/// Annual panel output degradation.
pub const PANEL_DEGRADATION: Decimal = dec!(0.005);

/// Net-metering credit as a fraction of the retail rate. Exported production
/// is credited at full retail under the modeled flat-credit policy.
pub const NET_METERING_CREDIT: Decimal = dec!(1.00);

/// Roof area consumed per kW of panels (sq ft / kW).
pub const SQFT_PER_KW: Decimal = dec!(54);

/// Fraction of gross roof area usable for panels after setbacks, vents and
/// shading are excluded.
pub const USABLE_ROOF_FRACTION: Decimal = dec!(0.60);

/// Smallest system worth quoting (kW). Applied only when the roof allows it.
pub const MIN_SYSTEM_KW: Decimal = dec!(1.5);

/// Installed cost per watt. The Illinois ($22,000 / 8 kW) and New York
/// ($41,250 / 15 kW) reference quotes both resolve to exactly this figure.
pub const COST_PER_WATT: Decimal = dec!(2.75);

/// Fixed install overhead on top of the per-watt cost.
pub const INSTALL_BASE_COST: Decimal = dec!(0);

/// Flat adder for a battery when the lead asks for storage.
pub const BATTERY_COST: Decimal = dec!(12000);

/// Solar loan terms.
pub const LOAN_TERM_YEARS: u32 = 20;
pub const LOAN_APR: Decimal = dec!(0.065);
pub const LOAN_DOWN_FRACTION: Decimal = dec!(0.10);

/// Lease terms. The monthly payment is a flat fraction of system cost; lease
/// ROI is measured against total lease payments since there is no down
/// payment to measure against.
pub const LEASE_TERM_YEARS: u32 = 20;
pub const LEASE_MONTHLY_FACTOR: Decimal = dec!(0.0055);

/// Financial analysis horizon in years.
pub const ANALYSIS_HORIZON_YEARS: u32 = 25;

/// Grid carbon intensity (lbs CO2 per kWh displaced).
pub const CO2_LBS_PER_KWH: Decimal = dec!(0.4);

/// Annual CO2 sequestration of one mature tree (lbs / yr).
pub const CO2_LBS_PER_TREE_YEAR: Decimal = dec!(20);

/// Lifetime production horizon used to value $/kWh incentives.
pub const INCENTIVE_LIFETIME_YEARS: Decimal = dec!(25);
