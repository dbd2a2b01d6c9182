//! Google Solar API client (buildingInsights:findClosest).

use reqwest::{Client, StatusCode};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use solar_roi_core::calculator::MeasuredProduction;
use solar_roi_core::types::ProductionSource;

use crate::error::ProviderError;
use crate::retry::RetryPolicy;
use crate::ProviderResult;

const DEFAULT_BASE_URL: &str = "https://solar.googleapis.com";

/// Client for Google's roof analysis endpoint.
#[derive(Clone)]
pub struct GoogleSolarClient {
    base_url: String,
    api_key: String,
    client: Client,
    retry: RetryPolicy,
}

impl GoogleSolarClient {
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

    /// Build from `GOOGLE_SOLAR_API_KEY`, with `GOOGLE_SOLAR_BASE_URL`
    /// overriding the production endpoint for tests.
    pub fn from_env() -> ProviderResult<Self> {
        let api_key = std::env::var("GOOGLE_SOLAR_API_KEY").map_err(|_| {
            ProviderError::Credentials("GOOGLE_SOLAR_API_KEY environment variable not set".into())
        })?;
        let base_url =
            std::env::var("GOOGLE_SOLAR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base_url, api_key)
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Closest-building roof analysis, reduced to the largest panel
    /// configuration Google found.
    pub async fn building_insights(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> ProviderResult<MeasuredProduction> {
        let url = format!(
            "{}/v1/buildingInsights:findClosest?location.latitude={latitude}\
             &location.longitude={longitude}&key={}",
            self.base_url, self.api_key,
        );
        debug!("google-solar: querying building insights at {latitude},{longitude}");

        let response = self
            .retry
            .run("google-solar", || self.client.get(&url).send())
            .await?;

        match response.status() {
            StatusCode::OK => {
                let insights = response.json::<BuildingInsights>().await?;
                best_configuration(&insights)
            }
            StatusCode::NOT_FOUND => Err(ProviderError::Unavailable(
                "no building near the requested location".into(),
            )),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Credentials(
                "Google Solar API rejected the key".into(),
            )),
            status => Err(ProviderError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildingInsights {
    solar_potential: Option<SolarPotential>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SolarPotential {
    panel_capacity_watts: f64,
    #[serde(default)]
    solar_panel_configs: Vec<PanelConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PanelConfig {
    panels_count: u32,
    yearly_energy_dc_kwh: f64,
}

fn best_configuration(insights: &BuildingInsights) -> ProviderResult<MeasuredProduction> {
    let potential = insights
        .solar_potential
        .as_ref()
        .ok_or_else(|| ProviderError::Unavailable("building has no solar potential data".into()))?;

    let best = potential
        .solar_panel_configs
        .iter()
        .max_by(|a, b| {
            a.yearly_energy_dc_kwh
                .partial_cmp(&b.yearly_energy_dc_kwh)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .ok_or_else(|| ProviderError::Unavailable("no panel configurations returned".into()))?;

    let size_kw = f64::from(best.panels_count) * potential.panel_capacity_watts / 1000.0;
    let system_size_kw = Decimal::from_f64(size_kw)
        .ok_or_else(|| ProviderError::Decode("panel capacity is not a finite number".into()))?
        .round_dp(2);
    let annual_production_kwh = Decimal::from_f64(best.yearly_energy_dc_kwh)
        .ok_or_else(|| ProviderError::Decode("yearly energy is not a finite number".into()))?
        .round_dp(0);

    if system_size_kw <= Decimal::ZERO {
        return Err(ProviderError::Unavailable(
            "roof analysis produced a zero-size system".into(),
        ));
    }

    Ok(MeasuredProduction {
        system_size_kw,
        annual_production_kwh,
        source: ProductionSource::GoogleSolar,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::RetryPolicy;

    fn insights_body() -> &'static str {
        r#"{
            "solarPotential": {
                "panelCapacityWatts": 400.0,
                "solarPanelConfigs": [
                    {"panelsCount": 10, "yearlyEnergyDcKwh": 5200.0},
                    {"panelsCount": 23, "yearlyEnergyDcKwh": 11500.0}
                ]
            }
        }"#
    }

    #[tokio::test]
    async fn parses_the_largest_configuration() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(insights_body())
            .create_async()
            .await;

        let client = GoogleSolarClient::new(server.url(), "test-key").unwrap();
        let measured = client.building_insights(41.88, -87.62).await.unwrap();

        assert_eq!(measured.system_size_kw, Decimal::from_f64(9.2).unwrap());
        assert_eq!(measured.annual_production_kwh, Decimal::from(11500));
        assert_eq!(measured.source, ProductionSource::GoogleSolar);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn a_5xx_is_retried_until_attempts_run_out() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(500)
            .with_body("upstream exploded")
            .expect(3)
            .create_async()
            .await;

        let client = GoogleSolarClient::new(server.url(), "test-key")
            .unwrap()
            .with_retry_policy(RetryPolicy::immediate(3));
        let result = client.building_insights(41.88, -87.62).await;
        assert!(matches!(result, Err(ProviderError::Api { status: 500, .. })));
        // Exactly max_attempts requests went out
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn does_not_retry_a_404() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let client = GoogleSolarClient::new(server.url(), "test-key")
            .unwrap()
            .with_retry_policy(RetryPolicy::immediate(3));
        let result = client.building_insights(0.0, 0.0).await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_potential_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = GoogleSolarClient::new(server.url(), "test-key").unwrap();
        let result = client.building_insights(41.88, -87.62).await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }
}
