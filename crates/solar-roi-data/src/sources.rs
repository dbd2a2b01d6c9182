//! The provider facade the request path talks to.
//!
//! `DataSources` owns whatever clients could be configured, a TTL cache per
//! concern, and the fallback tables. Its two lookups never fail: the worst
//! case is a logged warning and a deterministic table answer.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use solar_roi_core::calculator::MeasuredProduction;
use solar_roi_core::types::{Kilowatts, UsState};

use crate::cache::{CacheStore, MemoryCache};
use crate::fallback::{average_retail_rate, retail_rate_by_zip_prefix, state_average_production};
use crate::google_solar::GoogleSolarClient;
use crate::pvwatts::PvWattsClient;
use crate::utility_rates::UtilityRatesClient;

const PRODUCTION_CACHE_TTL: Duration = Duration::from_secs(6 * 60 * 60);
const RATE_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Best-effort external data, with every failure path ending in a table.
pub struct DataSources {
    google: Option<GoogleSolarClient>,
    pvwatts: Option<PvWattsClient>,
    rates: Option<UtilityRatesClient>,
    production_cache: Arc<dyn CacheStore<MeasuredProduction>>,
    rate_cache: Arc<dyn CacheStore<Decimal>>,
}

impl DataSources {
    pub fn new(
        google: Option<GoogleSolarClient>,
        pvwatts: Option<PvWattsClient>,
        rates: Option<UtilityRatesClient>,
    ) -> Self {
        Self {
            google,
            pvwatts,
            rates,
            production_cache: Arc::new(MemoryCache::new()),
            rate_cache: Arc::new(MemoryCache::new()),
        }
    }

    /// Construct every client whose credentials are present; log and skip
    /// the rest.
    pub fn from_env() -> Self {
        let google = match GoogleSolarClient::from_env() {
            Ok(client) => Some(client),
            Err(err) => {
                info!("google-solar disabled: {err}");
                None
            }
        };
        let pvwatts = match PvWattsClient::from_env() {
            Ok(client) => Some(client),
            Err(err) => {
                info!("pvwatts disabled: {err}");
                None
            }
        };
        let rates = match UtilityRatesClient::from_env() {
            Ok(client) => Some(client),
            Err(err) => {
                info!("openei disabled: {err}");
                None
            }
        };
        Self::new(google, pvwatts, rates)
    }

    /// No live providers at all; everything comes from the tables.
    pub fn offline() -> Self {
        Self::new(None, None, None)
    }

    /// Swap the cache backing stores (shared store for multi-instance
    /// deployments, fakes for tests).
    pub fn with_caches(
        mut self,
        production_cache: Arc<dyn CacheStore<MeasuredProduction>>,
        rate_cache: Arc<dyn CacheStore<Decimal>>,
    ) -> Self {
        self.production_cache = production_cache;
        self.rate_cache = rate_cache;
        self
    }

    /// Measured production for a roof: Google Solar first, PVWatts second,
    /// the state irradiance table last. Never fails.
    pub async fn production_estimate(
        &self,
        latitude: f64,
        longitude: f64,
        target_kw: Kilowatts,
        state: UsState,
    ) -> MeasuredProduction {
        let key = coordinate_key(latitude, longitude, &target_kw);
        if let Some(cached) = self.production_cache.get(&key) {
            debug!("production cache hit for {key}");
            return cached;
        }

        if let Some(google) = &self.google {
            match google.building_insights(latitude, longitude).await {
                Ok(measured) => {
                    self.production_cache
                        .put(key, measured.clone(), PRODUCTION_CACHE_TTL);
                    return measured;
                }
                Err(err) => warn!("google-solar failed, trying pvwatts: {err}"),
            }
        }

        if let Some(pvwatts) = &self.pvwatts {
            match pvwatts.estimate(latitude, longitude, target_kw).await {
                Ok(measured) => {
                    self.production_cache
                        .put(key, measured.clone(), PRODUCTION_CACHE_TTL);
                    return measured;
                }
                Err(err) => warn!("pvwatts failed, using state average: {err}"),
            }
        }

        state_average_production(state, target_kw)
    }

    /// Residential retail rate: OpenEI first, then the zip-prefix table,
    /// then the state average. Never fails.
    pub async fn retail_rate(
        &self,
        latitude: f64,
        longitude: f64,
        state: UsState,
        zip: Option<&str>,
    ) -> Decimal {
        let key = format!("rate:{latitude:.4},{longitude:.4}");
        if let Some(cached) = self.rate_cache.get(&key) {
            debug!("rate cache hit for {key}");
            return cached;
        }

        if let Some(rates) = &self.rates {
            match rates.residential_rate(latitude, longitude).await {
                Ok(rate) => {
                    self.rate_cache.put(key, rate, RATE_CACHE_TTL);
                    return rate;
                }
                Err(err) => warn!("openei failed, using rate tables: {err}"),
            }
        }

        if let Some(rate) = zip.and_then(retail_rate_by_zip_prefix) {
            return rate;
        }
        average_retail_rate(state)
    }
}

fn coordinate_key(latitude: f64, longitude: f64, target_kw: &Kilowatts) -> String {
    format!("prod:{latitude:.4},{longitude:.4}:{target_kw}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use solar_roi_core::types::ProductionSource;

    #[tokio::test]
    async fn offline_production_falls_back_to_state_average() {
        let sources = DataSources::offline();
        let measured = sources
            .production_estimate(41.88, -87.62, dec!(8), UsState::IL)
            .await;
        assert_eq!(measured.source, ProductionSource::StateAverage);
        assert_eq!(measured.system_size_kw, dec!(8));
        assert!(measured.annual_production_kwh > Decimal::ZERO);
    }

    #[tokio::test]
    async fn offline_rate_uses_zip_prefix_before_state_average() {
        let sources = DataSources::offline();
        let nyc = sources
            .retail_rate(40.75, -73.99, UsState::NY, Some("10001"))
            .await;
        assert_eq!(nyc, dec!(0.25));

        let upstate = sources
            .retail_rate(43.04, -76.14, UsState::NY, Some("13201"))
            .await;
        assert_eq!(upstate, average_retail_rate(UsState::NY));
    }

    #[tokio::test]
    async fn rate_lookups_are_cached_within_ttl() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"outputs": {"residential": 0.19}}"#)
            .expect(1)
            .create_async()
            .await;

        let rates = UtilityRatesClient::new(server.url(), "demo").unwrap();
        let sources = DataSources::new(None, None, Some(rates));

        let first = sources.retail_rate(41.88, -87.62, UsState::IL, None).await;
        let second = sources.retail_rate(41.88, -87.62, UsState::IL, None).await;
        assert_eq!(first, dec!(0.19));
        assert_eq!(first, second);
        // Only one request reached the server
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failing_provider_degrades_to_the_table() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let rates = UtilityRatesClient::new(server.url(), "demo").unwrap();
        let sources = DataSources::new(None, None, Some(rates));
        let rate = sources.retail_rate(35.0, -90.0, UsState::TN, None).await;
        assert_eq!(rate, average_retail_rate(UsState::TN));
    }

    #[tokio::test]
    async fn production_failure_cascades_google_then_pvwatts_then_table() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let google = GoogleSolarClient::new(server.url(), "k").unwrap();
        let pvwatts = PvWattsClient::new(server.url(), "k").unwrap();
        let sources = DataSources::new(Some(google), Some(pvwatts), None);

        let measured = sources
            .production_estimate(33.45, -112.07, dec!(10), UsState::AZ)
            .await;
        assert_eq!(measured.source, ProductionSource::StateAverage);
    }
}
