//! Static catalog of state and utility solar incentive programs.
//!
//! Compiled once at first use and never mutated. States with no entries —
//! Texas among them — simply resolve to an empty, zero-benefit lookup. The
//! federal ITC is absent: it expired for the period this catalog models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::types::{Money, PropertyType, UsState, Utility};

/// Program category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncentiveType {
    Rebate,
    Grant,
    TaxExemption,
    SalesTaxExemption,
    Other,
}

/// How a program's `amount` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitUnit {
    /// Flat dollar amount
    Dollars,
    /// Dollars per installed watt
    DollarsPerWatt,
    /// Dollars per kWh produced, valued over the system lifetime
    DollarsPerKwh,
    /// Percent of system cost, on a 0-100 scale
    PercentOfCost,
}

/// One incentive program. Serialized outward for the results page and the
/// dashboard; never parsed back in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncentiveRecord {
    /// Stable slug used by the dashboard
    pub id: &'static str,
    pub state: UsState,
    /// None = statewide; Some = only customers of this utility
    pub utility: Option<Utility>,
    pub name: &'static str,
    pub incentive_type: IncentiveType,
    /// Interpreted per `unit`; `PercentOfCost` amounts are 0-100
    pub amount: Decimal,
    pub unit: BenefitUnit,
    /// Per-record benefit cap applied before summation
    pub max_amount: Option<Money>,
    /// Inclusive system-size window (kW)
    pub min_system_kw: Option<Decimal>,
    pub max_system_kw: Option<Decimal>,
    pub eligible_properties: &'static [PropertyType],
    /// Inclusive program window
    pub starts: Option<NaiveDate>,
    pub ends: Option<NaiveDate>,
    pub active: bool,
}

const RESIDENTIAL: &[PropertyType] = &[PropertyType::Residential];
const ALL_PROPERTIES: &[PropertyType] = &[
    PropertyType::Residential,
    PropertyType::Commercial,
    PropertyType::Nonprofit,
];
const NON_RESIDENTIAL: &[PropertyType] = &[PropertyType::Commercial, PropertyType::Nonprofit];

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid catalog date")
}

fn record(
    id: &'static str,
    state: UsState,
    name: &'static str,
    incentive_type: IncentiveType,
    amount: Decimal,
    unit: BenefitUnit,
) -> IncentiveRecord {
    IncentiveRecord {
        id,
        state,
        utility: None,
        name,
        incentive_type,
        amount,
        unit,
        max_amount: None,
        min_system_kw: None,
        max_system_kw: None,
        eligible_properties: RESIDENTIAL,
        starts: None,
        ends: None,
        active: true,
    }
}

/// The full program catalog.
pub fn catalog() -> &'static [IncentiveRecord] {
    static CATALOG: OnceLock<Vec<IncentiveRecord>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

fn build_catalog() -> Vec<IncentiveRecord> {
    use BenefitUnit::*;
    use IncentiveType::*;

    vec![
        // ── Arizona ──────────────────────────────────────────────────
        IncentiveRecord {
            max_amount: Some(dec!(1000)),
            ..record("az-residential-credit", UsState::AZ, "Residential Solar Energy Credit",
                TaxExemption, dec!(25), PercentOfCost)
        },
        IncentiveRecord {
            eligible_properties: ALL_PROPERTIES,
            ..record("az-sales-tax", UsState::AZ, "Solar Equipment Sales Tax Exemption",
                SalesTaxExemption, dec!(5.6), PercentOfCost)
        },
        IncentiveRecord {
            utility: Some(Utility::Aps),
            max_amount: Some(dec!(2500)),
            ..record("az-aps-rebate", UsState::AZ, "APS Residential Solar Rebate",
                Rebate, dec!(0.25), DollarsPerWatt)
        },
        IncentiveRecord {
            utility: Some(Utility::Srp),
            ..record("az-srp-storage", UsState::AZ, "SRP Storage Pilot Credit",
                Grant, dec!(300), Dollars)
        },
        // ── California ───────────────────────────────────────────────
        IncentiveRecord {
            max_amount: Some(dec!(3000)),
            ..record("ca-sgip-grant", UsState::CA, "Self-Generation Incentive Grant",
                Grant, dec!(0.20), DollarsPerWatt)
        },
        record("ca-property-tax", UsState::CA, "Active Solar Property Tax Exclusion",
            TaxExemption, dec!(1500), Dollars),
        IncentiveRecord {
            active: false,
            ..record("ca-legacy-itc-match", UsState::CA, "Legacy State ITC Match",
                Rebate, dec!(500), Dollars)
        },
        // ── Colorado ─────────────────────────────────────────────────
        IncentiveRecord {
            eligible_properties: ALL_PROPERTIES,
            ..record("co-sales-tax", UsState::CO, "Renewable Energy Sales Tax Exemption",
                SalesTaxExemption, dec!(2.9), PercentOfCost)
        },
        IncentiveRecord {
            utility: Some(Utility::XcelEnergy),
            max_amount: Some(dec!(2500)),
            ends: Some(ymd(2027, 12, 31)),
            ..record("co-xcel-rebate", UsState::CO, "Xcel Energy Solar Rewards Rebate",
                Rebate, dec!(0.25), DollarsPerWatt)
        },
        // ── Connecticut ──────────────────────────────────────────────
        IncentiveRecord {
            eligible_properties: ALL_PROPERTIES,
            ..record("ct-sales-tax", UsState::CT, "Solar Sales and Use Tax Exemption",
                SalesTaxExemption, dec!(6.35), PercentOfCost)
        },
        IncentiveRecord {
            utility: Some(Utility::Eversource),
            ..record("ct-eversource-storage", UsState::CT, "Eversource Connected Battery Grant",
                Grant, dec!(1500), Dollars)
        },
        // ── Hawaii ───────────────────────────────────────────────────
        IncentiveRecord {
            max_amount: Some(dec!(5000)),
            ..record("hi-energy-credit", UsState::HI, "Renewable Energy Technologies Credit",
                TaxExemption, dec!(35), PercentOfCost)
        },
        // ── Iowa (window closed; excluded by the date filter) ────────
        IncentiveRecord {
            max_amount: Some(dec!(5000)),
            ends: Some(ymd(2021, 12, 31)),
            ..record("ia-solar-credit", UsState::IA, "Iowa Solar Energy System Credit",
                TaxExemption, dec!(11), PercentOfCost)
        },
        // ── Illinois ─────────────────────────────────────────────────
        IncentiveRecord {
            max_amount: Some(dec!(10500)),
            min_system_kw: Some(dec!(0.5)),
            ..record("il-shines-rebate", UsState::IL, "Illinois Shines Block Rebate",
                Rebate, dec!(1.50), DollarsPerWatt)
        },
        // ── Maryland ─────────────────────────────────────────────────
        IncentiveRecord {
            min_system_kw: Some(dec!(1)),
            max_system_kw: Some(dec!(20)),
            ..record("md-grant", UsState::MD, "Residential Clean Energy Grant",
                Grant, dec!(1000), Dollars)
        },
        IncentiveRecord {
            eligible_properties: ALL_PROPERTIES,
            ..record("md-sales-tax", UsState::MD, "Solar Sales Tax Exemption",
                SalesTaxExemption, dec!(6), PercentOfCost)
        },
        // ── Massachusetts ────────────────────────────────────────────
        IncentiveRecord {
            max_amount: Some(dec!(1000)),
            ..record("ma-state-credit", UsState::MA, "Residential Renewable Income Tax Credit",
                TaxExemption, dec!(15), PercentOfCost)
        },
        IncentiveRecord {
            utility: Some(Utility::NationalGrid),
            ..record("ma-connected-solutions", UsState::MA, "ConnectedSolutions Enrollment Grant",
                Grant, dec!(400), Dollars)
        },
        // ── Minnesota ────────────────────────────────────────────────
        IncentiveRecord {
            utility: Some(Utility::XcelEnergy),
            max_amount: Some(dec!(5000)),
            max_system_kw: Some(dec!(40)),
            ..record("mn-solar-rewards", UsState::MN, "Xcel Solar*Rewards Production Incentive",
                Rebate, dec!(0.04), DollarsPerKwh)
        },
        // ── New Jersey ───────────────────────────────────────────────
        IncentiveRecord {
            max_amount: Some(dec!(8000)),
            ..record("nj-successor-srec", UsState::NJ, "Successor Solar Incentive (SREC-II)",
                Rebate, dec!(0.09), DollarsPerKwh)
        },
        IncentiveRecord {
            eligible_properties: ALL_PROPERTIES,
            ..record("nj-sales-tax", UsState::NJ, "Solar Sales Tax Exemption",
                SalesTaxExemption, dec!(6.625), PercentOfCost)
        },
        IncentiveRecord {
            eligible_properties: NON_RESIDENTIAL,
            max_amount: Some(dec!(10000)),
            ..record("nj-commercial-depreciation", UsState::NJ, "Commercial Accelerated Depreciation",
                TaxExemption, dec!(7), PercentOfCost)
        },
        // ── New Mexico ───────────────────────────────────────────────
        IncentiveRecord {
            max_amount: Some(dec!(6000)),
            ..record("nm-solar-credit", UsState::NM, "New Solar Market Development Credit",
                TaxExemption, dec!(10), PercentOfCost)
        },
        // ── New York ─────────────────────────────────────────────────
        IncentiveRecord {
            max_amount: Some(dec!(5000)),
            min_system_kw: Some(dec!(1)),
            max_system_kw: Some(dec!(25)),
            ..record("ny-sun-rebate", UsState::NY, "NY-Sun Megawatt Block Rebate",
                Rebate, dec!(0.35), DollarsPerWatt)
        },
        IncentiveRecord {
            max_amount: Some(dec!(5000)),
            ..record("ny-state-credit", UsState::NY, "Solar Energy System Equipment Credit",
                TaxExemption, dec!(25), PercentOfCost)
        },
        // ── Oregon ───────────────────────────────────────────────────
        IncentiveRecord {
            max_amount: Some(dec!(5000)),
            ends: Some(ymd(2027, 6, 30)),
            ..record("or-rebate", UsState::OR, "Oregon Solar + Storage Rebate",
                Rebate, dec!(0.20), DollarsPerWatt)
        },
        // ── Rhode Island ─────────────────────────────────────────────
        IncentiveRecord {
            max_amount: Some(dec!(5000)),
            ..record("ri-ref-grant", UsState::RI, "Renewable Energy Fund Grant",
                Grant, dec!(0.65), DollarsPerWatt)
        },
        // ── South Carolina ───────────────────────────────────────────
        IncentiveRecord {
            max_amount: Some(dec!(3500)),
            ..record("sc-state-credit", UsState::SC, "South Carolina Solar Credit",
                TaxExemption, dec!(25), PercentOfCost)
        },
        // ── Vermont ──────────────────────────────────────────────────
        IncentiveRecord {
            utility: Some(Utility::GreenMountainPower),
            ..record("vt-gmp-battery", UsState::VT, "GMP Bring-Your-Own-Device Grant",
                Grant, dec!(850), Dollars)
        },
        // ── Wisconsin ────────────────────────────────────────────────
        IncentiveRecord {
            min_system_kw: Some(dec!(0.5)),
            ..record("wi-focus-grant", UsState::WI, "Focus on Energy Solar Grant",
                Grant, dec!(500), Dollars)
        },
    ]
}
