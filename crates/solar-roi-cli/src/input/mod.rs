pub mod file;
pub mod stdin;

use solar_roi_core::types::{SunExposure, UsState};

/// Parse a 2-letter state code argument.
pub fn parse_state(code: &str) -> Result<UsState, Box<dyn std::error::Error>> {
    UsState::from_code(code).ok_or_else(|| format!("Unknown state code '{code}'").into())
}

/// Parse a sun-exposure category argument.
pub fn parse_sun(category: &str) -> Result<SunExposure, Box<dyn std::error::Error>> {
    match category.to_ascii_lowercase().as_str() {
        "poor" => Ok(SunExposure::Poor),
        "fair" => Ok(SunExposure::Fair),
        "good" => Ok(SunExposure::Good),
        "excellent" => Ok(SunExposure::Excellent),
        other => Err(format!(
            "Unknown sun exposure '{other}' (expected poor, fair, good or excellent)"
        )
        .into()),
    }
}
