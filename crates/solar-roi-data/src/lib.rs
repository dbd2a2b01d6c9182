//! Best-effort external data for the solar calculator.
//!
//! Every provider here is optional: a missing key, a timeout or a bad
//! payload is logged and answered with the deterministic fallback tables,
//! never surfaced to the lead filling in the wizard.

pub mod cache;
pub mod error;
pub mod fallback;
pub mod google_solar;
pub mod pvwatts;
pub mod retry;
pub mod sources;
pub mod utility_rates;

pub use error::ProviderError;
pub use sources::DataSources;

/// Standard result type for provider calls
pub type ProviderResult<T> = Result<T, ProviderError>;
