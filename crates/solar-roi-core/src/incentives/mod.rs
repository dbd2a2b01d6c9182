pub mod catalog;
pub mod compare;
pub mod lookup;

pub use catalog::{BenefitUnit, IncentiveRecord, IncentiveType};
pub use compare::{compare_state_incentives, top_incentive_states, StateBenefit};
pub use lookup::{
    incentive_summary, lookup_incentives, AppliedIncentive, IncentiveLookup, IncentiveQuery,
    IncentiveSummary,
};
