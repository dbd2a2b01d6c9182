use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Electrical energy in kilowatt-hours
pub type KilowattHours = Decimal;

/// Nameplate capacity in kilowatts
pub type Kilowatts = Decimal;

/// Roof or lot area in square feet
pub type SquareFeet = Decimal;

/// US state (plus DC), identified by postal code.
///
/// Serialized as the 2-letter code, which is what every upstream API and the
/// lead form exchange.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsState {
    AL, AK, AZ, AR, CA, CO, CT, DE, DC, FL,
    GA, HI, ID, IL, IN, IA, KS, KY, LA, ME,
    MD, MA, MI, MN, MS, MO, MT, NE, NV, NH,
    NJ, NM, NY, NC, ND, OH, OK, OR, PA, RI,
    SC, SD, TN, TX, UT, VT, VA, WA, WV, WI,
    WY,
}

impl UsState {
    /// Every jurisdiction the engine knows about, in postal-code order.
    pub const ALL: [UsState; 51] = [
        UsState::AL, UsState::AK, UsState::AZ, UsState::AR, UsState::CA,
        UsState::CO, UsState::CT, UsState::DE, UsState::DC, UsState::FL,
        UsState::GA, UsState::HI, UsState::ID, UsState::IL, UsState::IN,
        UsState::IA, UsState::KS, UsState::KY, UsState::LA, UsState::ME,
        UsState::MD, UsState::MA, UsState::MI, UsState::MN, UsState::MS,
        UsState::MO, UsState::MT, UsState::NE, UsState::NV, UsState::NH,
        UsState::NJ, UsState::NM, UsState::NY, UsState::NC, UsState::ND,
        UsState::OH, UsState::OK, UsState::OR, UsState::PA, UsState::RI,
        UsState::SC, UsState::SD, UsState::TN, UsState::TX, UsState::UT,
        UsState::VT, UsState::VA, UsState::WA, UsState::WV, UsState::WI,
        UsState::WY,
    ];

    /// 2-letter postal code
    pub fn code(&self) -> &'static str {
        match self {
            UsState::AL => "AL", UsState::AK => "AK", UsState::AZ => "AZ",
            UsState::AR => "AR", UsState::CA => "CA", UsState::CO => "CO",
            UsState::CT => "CT", UsState::DE => "DE", UsState::DC => "DC",
            UsState::FL => "FL", UsState::GA => "GA", UsState::HI => "HI",
            UsState::ID => "ID", UsState::IL => "IL", UsState::IN => "IN",
            UsState::IA => "IA", UsState::KS => "KS", UsState::KY => "KY",
            UsState::LA => "LA", UsState::ME => "ME", UsState::MD => "MD",
            UsState::MA => "MA", UsState::MI => "MI", UsState::MN => "MN",
            UsState::MS => "MS", UsState::MO => "MO", UsState::MT => "MT",
            UsState::NE => "NE", UsState::NV => "NV", UsState::NH => "NH",
            UsState::NJ => "NJ", UsState::NM => "NM", UsState::NY => "NY",
            UsState::NC => "NC", UsState::ND => "ND", UsState::OH => "OH",
            UsState::OK => "OK", UsState::OR => "OR", UsState::PA => "PA",
            UsState::RI => "RI", UsState::SC => "SC", UsState::SD => "SD",
            UsState::TN => "TN", UsState::TX => "TX", UsState::UT => "UT",
            UsState::VT => "VT", UsState::VA => "VA", UsState::WA => "WA",
            UsState::WV => "WV", UsState::WI => "WI", UsState::WY => "WY",
        }
    }

    /// Parse a 2-letter code, case-insensitively.
    pub fn from_code(code: &str) -> Option<UsState> {
        let upper = code.trim().to_ascii_uppercase();
        UsState::ALL.iter().copied().find(|s| s.code() == upper)
    }

    /// Full state name for display
    pub fn name(&self) -> &'static str {
        match self {
            UsState::AL => "Alabama", UsState::AK => "Alaska",
            UsState::AZ => "Arizona", UsState::AR => "Arkansas",
            UsState::CA => "California", UsState::CO => "Colorado",
            UsState::CT => "Connecticut", UsState::DE => "Delaware",
            UsState::DC => "District of Columbia", UsState::FL => "Florida",
            UsState::GA => "Georgia", UsState::HI => "Hawaii",
            UsState::ID => "Idaho", UsState::IL => "Illinois",
            UsState::IN => "Indiana", UsState::IA => "Iowa",
            UsState::KS => "Kansas", UsState::KY => "Kentucky",
            UsState::LA => "Louisiana", UsState::ME => "Maine",
            UsState::MD => "Maryland", UsState::MA => "Massachusetts",
            UsState::MI => "Michigan", UsState::MN => "Minnesota",
            UsState::MS => "Mississippi", UsState::MO => "Missouri",
            UsState::MT => "Montana", UsState::NE => "Nebraska",
            UsState::NV => "Nevada", UsState::NH => "New Hampshire",
            UsState::NJ => "New Jersey", UsState::NM => "New Mexico",
            UsState::NY => "New York", UsState::NC => "North Carolina",
            UsState::ND => "North Dakota", UsState::OH => "Ohio",
            UsState::OK => "Oklahoma", UsState::OR => "Oregon",
            UsState::PA => "Pennsylvania", UsState::RI => "Rhode Island",
            UsState::SC => "South Carolina", UsState::SD => "South Dakota",
            UsState::TN => "Tennessee", UsState::TX => "Texas",
            UsState::UT => "Utah", UsState::VT => "Vermont",
            UsState::VA => "Virginia", UsState::WA => "Washington",
            UsState::WV => "West Virginia", UsState::WI => "Wisconsin",
            UsState::WY => "Wyoming",
        }
    }
}

/// Stable utility identity.
///
/// Incentive records reference utilities through this enum rather than
/// free-form name strings, so "APS" and "Arizona Public Service" cannot
/// drift apart in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Utility {
    Aps,
    Srp,
    Tep,
    ComEd,
    Ameren,
    ConEdison,
    PsegLongIsland,
    NationalGrid,
    Eversource,
    XcelEnergy,
    RockyMountainPower,
    PacificPower,
    GreenMountainPower,
    HawaiianElectric,
    Other(String),
}

impl Utility {
    /// Customer-facing utility name
    pub fn name(&self) -> &str {
        match self {
            Utility::Aps => "Arizona Public Service",
            Utility::Srp => "Salt River Project",
            Utility::Tep => "Tucson Electric Power",
            Utility::ComEd => "Commonwealth Edison",
            Utility::Ameren => "Ameren Illinois",
            Utility::ConEdison => "Con Edison",
            Utility::PsegLongIsland => "PSEG Long Island",
            Utility::NationalGrid => "National Grid",
            Utility::Eversource => "Eversource Energy",
            Utility::XcelEnergy => "Xcel Energy",
            Utility::RockyMountainPower => "Rocky Mountain Power",
            Utility::PacificPower => "Pacific Power",
            Utility::GreenMountainPower => "Green Mountain Power",
            Utility::HawaiianElectric => "Hawaiian Electric",
            Utility::Other(name) => name,
        }
    }
}

/// Property class an incentive program accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Residential,
    Commercial,
    Nonprofit,
}

/// Qualitative sun exposure category from the lead form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SunExposure {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SunExposure {
    /// Irradiance multiplier applied to the baseline production yield.
    pub fn factor(&self) -> Decimal {
        match self {
            SunExposure::Poor => dec!(0.70),
            SunExposure::Fair => dec!(0.85),
            SunExposure::Good => dec!(1.00),
            SunExposure::Excellent => dec!(1.15),
        }
    }
}

/// Where a measured production figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionSource {
    GoogleSolar,
    PvWatts,
    StateAverage,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_code_round_trip() {
        for state in UsState::ALL {
            assert_eq!(UsState::from_code(state.code()), Some(state));
        }
    }

    #[test]
    fn state_code_case_insensitive() {
        assert_eq!(UsState::from_code("il"), Some(UsState::IL));
        assert_eq!(UsState::from_code(" ny "), Some(UsState::NY));
        assert_eq!(UsState::from_code("ZZ"), None);
    }

    #[test]
    fn sun_factors_span_the_documented_range() {
        assert_eq!(SunExposure::Poor.factor(), dec!(0.70));
        assert_eq!(SunExposure::Fair.factor(), dec!(0.85));
        assert_eq!(SunExposure::Good.factor(), dec!(1.00));
        assert_eq!(SunExposure::Excellent.factor(), dec!(1.15));
    }

    #[test]
    fn state_serializes_as_postal_code() {
        let json = serde_json::to_string(&UsState::AZ).unwrap();
        assert_eq!(json, "\"AZ\"");
        let back: UsState = serde_json::from_str("\"AZ\"").unwrap();
        assert_eq!(back, UsState::AZ);
    }
}
