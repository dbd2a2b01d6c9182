//! Cross-state incentive comparison.
//!
//! The "best incentive states" view is the head of the computed ranking, not
//! a hand-maintained list, so it can never drift from the catalog.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::incentives::lookup::{lookup_incentives, IncentiveQuery};
use crate::types::{Kilowatts, Money, PropertyType, UsState};

/// Reference system used when ranking states without a concrete quote.
pub const REFERENCE_SYSTEM_KW: Decimal = dec!(8);
pub const REFERENCE_SYSTEM_COST: Decimal = dec!(22000);

/// One row of the state ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateBenefit {
    pub state: UsState,
    pub state_name: &'static str,
    pub total_benefit: Money,
}

/// Run the lookup for every jurisdiction and rank by total benefit,
/// descending; ties break on postal code so the order is stable.
pub fn compare_state_incentives(
    system_size_kw: Kilowatts,
    system_cost: Money,
    property_type: PropertyType,
    as_of: Option<NaiveDate>,
) -> Vec<StateBenefit> {
    let mut rows: Vec<StateBenefit> = UsState::ALL
        .iter()
        .map(|&state| {
            let lookup = lookup_incentives(&IncentiveQuery {
                state,
                system_size_kw,
                system_cost,
                property_type,
                as_of,
            });
            StateBenefit {
                state,
                state_name: state.name(),
                total_benefit: lookup.total_estimated_benefit,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_benefit
            .cmp(&a.total_benefit)
            .then_with(|| a.state.code().cmp(b.state.code()))
    });
    rows
}

/// The `n` states with the largest benefit for the reference system. States
/// with nothing to offer never appear, however large `n` is.
pub fn top_incentive_states(n: usize) -> Vec<StateBenefit> {
    compare_state_incentives(
        REFERENCE_SYSTEM_KW,
        REFERENCE_SYSTEM_COST,
        PropertyType::Residential,
        None,
    )
    .into_iter()
    .filter(|row| row.total_benefit > Decimal::ZERO)
    .take(n)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_covers_every_jurisdiction() {
        let rows = compare_state_incentives(
            dec!(8),
            dec!(22000),
            PropertyType::Residential,
            None,
        );
        assert_eq!(rows.len(), UsState::ALL.len());
    }

    #[test]
    fn ranking_is_descending() {
        let rows = compare_state_incentives(
            dec!(8),
            dec!(22000),
            PropertyType::Residential,
            None,
        );
        for pair in rows.windows(2) {
            assert!(
                pair[0].total_benefit >= pair[1].total_benefit,
                "ranking not descending at {} -> {}",
                pair[0].state.code(),
                pair[1].state.code(),
            );
        }
    }

    #[test]
    fn top_states_is_a_prefix_of_the_ranking() {
        let ranking = compare_state_incentives(
            REFERENCE_SYSTEM_KW,
            REFERENCE_SYSTEM_COST,
            PropertyType::Residential,
            None,
        );
        let top = top_incentive_states(5);
        assert_eq!(top.len(), 5);
        assert_eq!(top.as_slice(), &ranking[..5]);
    }

    #[test]
    fn top_states_excludes_zero_benefit_states() {
        let top = top_incentive_states(usize::MAX);
        assert!(top.iter().all(|row| row.total_benefit > Decimal::ZERO));
        assert!(top.iter().all(|row| row.state != UsState::TX));
    }

    #[test]
    fn illinois_ranks_at_the_top_for_the_reference_system() {
        // $10,500 capped rebate is the single largest benefit in the catalog
        let top = top_incentive_states(1);
        assert_eq!(top[0].state, UsState::IL);
    }
}
