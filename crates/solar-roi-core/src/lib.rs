pub mod assumptions;
pub mod environmental;
pub mod error;
pub mod financing;
pub mod production;
pub mod types;

#[cfg(feature = "incentives")]
pub mod incentives;

#[cfg(feature = "incentives")]
pub mod calculator;

#[cfg(feature = "design")]
pub mod design;

#[cfg(feature = "cashflow")]
pub mod cashflow;

pub use error::SolarRoiError;
pub use types::*;

/// Standard result type for all solar-roi operations
pub type SolarRoiResult<T> = Result<T, SolarRoiError>;
