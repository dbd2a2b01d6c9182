use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Estimates
// ---------------------------------------------------------------------------

#[napi]
pub fn estimate_solar_roi(input_json: String) -> NapiResult<String> {
    let input: solar_roi_core::calculator::CalculationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        solar_roi_core::calculator::estimate_solar_roi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn estimate_with_measured(input_json: String, measured_json: String) -> NapiResult<String> {
    let input: solar_roi_core::calculator::CalculationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let measured: solar_roi_core::calculator::MeasuredProduction =
        serde_json::from_str(&measured_json).map_err(to_napi_error)?;
    let output = solar_roi_core::calculator::estimate_with_measured(&input, &measured)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Incentives
// ---------------------------------------------------------------------------

#[napi]
pub fn lookup_incentives(query_json: String) -> NapiResult<String> {
    let query: solar_roi_core::incentives::IncentiveQuery =
        serde_json::from_str(&query_json).map_err(to_napi_error)?;
    let output = solar_roi_core::incentives::lookup_incentives(&query);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn incentive_summary(query_json: String) -> NapiResult<String> {
    let query: solar_roi_core::incentives::IncentiveQuery =
        serde_json::from_str(&query_json).map_err(to_napi_error)?;
    let output = solar_roi_core::incentives::incentive_summary(&query);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_state_incentives(query_json: String) -> NapiResult<String> {
    #[derive(Deserialize)]
    struct CompareRequest {
        system_size_kw: Decimal,
        system_cost: Decimal,
    }
    let request: CompareRequest = serde_json::from_str(&query_json).map_err(to_napi_error)?;
    let output = solar_roi_core::incentives::compare_state_incentives(
        request.system_size_kw,
        request.system_cost,
        solar_roi_core::types::PropertyType::Residential,
        None,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn top_incentive_states(count: u32) -> NapiResult<String> {
    let output = solar_roi_core::incentives::top_incentive_states(count as usize);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// System design
// ---------------------------------------------------------------------------

#[napi]
pub fn generate_design_tiers(request_json: String) -> NapiResult<String> {
    #[derive(Deserialize)]
    struct TiersRequest {
        annual_consumption_kwh: Decimal,
        sun_factor: Decimal,
        state: solar_roi_core::types::UsState,
        roof_square_feet: Decimal,
        #[serde(default)]
        retail_rate: Option<Decimal>,
        #[serde(default)]
        as_of: Option<chrono::NaiveDate>,
    }
    let request: TiersRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    let output = solar_roi_core::design::generate_design_tiers(
        request.annual_consumption_kwh,
        request.sun_factor,
        request.state,
        request.roof_square_feet,
        request.retail_rate,
        request.as_of,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
