//! NREL PVWatts v8 client.

use reqwest::{Client, StatusCode};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use solar_roi_core::calculator::MeasuredProduction;
use solar_roi_core::types::{Kilowatts, ProductionSource};

use crate::error::ProviderError;
use crate::retry::RetryPolicy;
use crate::ProviderResult;

const DEFAULT_BASE_URL: &str = "https://developer.nrel.gov";

/// Fixed array assumptions for a residential rooftop run.
const TILT_DEGREES: &str = "20";
const AZIMUTH_DEGREES: &str = "180";
const SYSTEM_LOSSES_PCT: &str = "14";

/// Client for the PVWatts production simulation.
#[derive(Clone)]
pub struct PvWattsClient {
    base_url: String,
    api_key: String,
    client: Client,
    retry: RetryPolicy,
}

impl PvWattsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(ProviderError::Http)?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client,
            retry: RetryPolicy::default(),
        })
    }

    /// Build from `NREL_API_KEY`, with `NREL_BASE_URL` overriding the
    /// production endpoint for tests.
    pub fn from_env() -> ProviderResult<Self> {
        let api_key = std::env::var("NREL_API_KEY").map_err(|_| {
            ProviderError::Credentials("NREL_API_KEY environment variable not set".into())
        })?;
        let base_url = std::env::var("NREL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base_url, api_key)
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Simulate a fixed rooftop array of the given capacity.
    pub async fn estimate(
        &self,
        latitude: f64,
        longitude: f64,
        system_capacity_kw: Kilowatts,
    ) -> ProviderResult<MeasuredProduction> {
        let url = format!(
            "{}/api/pvwatts/v8.json?api_key={}&lat={latitude}&lon={longitude}\
             &system_capacity={system_capacity_kw}&module_type=0&array_type=1\
             &tilt={TILT_DEGREES}&azimuth={AZIMUTH_DEGREES}&losses={SYSTEM_LOSSES_PCT}",
            self.base_url, self.api_key,
        );
        debug!("pvwatts: simulating {system_capacity_kw} kW at {latitude},{longitude}");

        let response = self
            .retry
            .run("pvwatts", || self.client.get(&url).send())
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.json::<PvWattsResponse>().await?;
                if !body.errors.is_empty() {
                    return Err(ProviderError::Decode(body.errors.join("; ")));
                }
                let ac_annual = body
                    .outputs
                    .and_then(|o| o.ac_annual)
                    .ok_or_else(|| ProviderError::Unavailable("no ac_annual in response".into()))?;
                let annual_production_kwh = Decimal::from_f64(ac_annual)
                    .ok_or_else(|| ProviderError::Decode("ac_annual is not finite".into()))?
                    .round_dp(0);
                Ok(MeasuredProduction {
                    system_size_kw: system_capacity_kw,
                    annual_production_kwh,
                    source: ProductionSource::PvWatts,
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Credentials(
                "NREL rejected the API key".into(),
            )),
            status => Err(ProviderError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PvWattsResponse {
    outputs: Option<PvWattsOutputs>,
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PvWattsOutputs {
    ac_annual: Option<f64>,
}
