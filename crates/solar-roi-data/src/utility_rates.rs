//! OpenEI utility-rate client.

use reqwest::{Client, StatusCode};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::ProviderError;
use crate::retry::RetryPolicy;
use crate::ProviderResult;

const DEFAULT_BASE_URL: &str = "https://api.openei.org";

/// Client for OpenEI's utility-rate endpoint.
#[derive(Clone)]
pub struct UtilityRatesClient {
    base_url: String,
    api_key: String,
    client: Client,
    retry: RetryPolicy,
}

impl UtilityRatesClient {
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

    /// Build from `OPENEI_API_KEY`, with `OPENEI_BASE_URL` overriding the
    /// production endpoint for tests.
    pub fn from_env() -> ProviderResult<Self> {
        let api_key = std::env::var("OPENEI_API_KEY").map_err(|_| {
            ProviderError::Credentials("OPENEI_API_KEY environment variable not set".into())
        })?;
        let base_url =
            std::env::var("OPENEI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base_url, api_key)
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Residential retail rate ($/kWh) for the utility serving a location.
    pub async fn residential_rate(&self, latitude: f64, longitude: f64) -> ProviderResult<Decimal> {
        let url = format!(
            "{}/utility_rates?version=latest&format=json&api_key={}\
             &lat={latitude}&lon={longitude}",
            self.base_url, self.api_key,
        );
        debug!("openei: querying residential rate at {latitude},{longitude}");

        let response = self
            .retry
            .run("openei", || self.client.get(&url).send())
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.json::<UtilityRatesResponse>().await?;
                let rate = body
                    .outputs
                    .and_then(|o| o.residential)
                    .ok_or_else(|| {
                        ProviderError::Unavailable("no residential rate for location".into())
                    })?;
                let rate = Decimal::from_f64(rate)
                    .ok_or_else(|| ProviderError::Decode("rate is not finite".into()))?;
                if rate <= Decimal::ZERO {
                    return Err(ProviderError::Unavailable(
                        "reported residential rate is not positive".into(),
                    ));
                }
                Ok(rate.round_dp(4))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ProviderError::Credentials(
                "OpenEI rejected the API key".into(),
            )),
            status => Err(ProviderError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UtilityRatesResponse {
    outputs: Option<UtilityRateOutputs>,
}

#[derive(Debug, Deserialize)]
struct UtilityRateOutputs {
    residential: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn parses_the_residential_rate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"outputs": {"residential": 0.1482, "commercial": 0.1211}}"#)
            .create_async()
            .await;

        let client = UtilityRatesClient::new(server.url(), "demo").unwrap();
        let rate = client.residential_rate(41.88, -87.62).await.unwrap();
        assert_eq!(rate, dec!(0.1482));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_rate_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"outputs": {}}"#)
            .create_async()
            .await;

        let client = UtilityRatesClient::new(server.url(), "demo").unwrap();
        let result = client.residential_rate(41.88, -87.62).await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }

    #[tokio::test]
    async fn zero_rate_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"outputs": {"residential": 0.0}}"#)
            .create_async()
            .await;

        let client = UtilityRatesClient::new(server.url(), "demo").unwrap();
        let result = client.residential_rate(41.88, -87.62).await;
        assert!(matches!(result, Err(ProviderError::Unavailable(_))));
    }
}
