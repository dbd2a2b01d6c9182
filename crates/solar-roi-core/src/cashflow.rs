//! Year-by-year cash-flow series for the savings chart.
//!
//! The chart walks cumulative cash flow explicitly, which makes it an
//! independent check on the card-level payoff figures: the crossing year
//! extracted from this series must match the payback the financing module
//! reports for the same plan.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::assumptions::{LEASE_MONTHLY_FACTOR, LEASE_TERM_YEARS, LOAN_APR, LOAN_DOWN_FRACTION,
    LOAN_TERM_YEARS};
use crate::financing::{amortized_monthly_payment, savings_schedule, FinancingType};
use crate::types::{KilowattHours, Money, Rate};

/// One row of the chart series. Year 0 carries the money down at signing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowYear {
    pub year: u32,
    pub savings: Money,
    pub payments: Money,
    pub net_cash_flow: Money,
    pub cumulative: Money,
}

/// Simulate the full horizon for one financing plan.
pub fn simulate_cash_flow(
    plan: FinancingType,
    total_cost: Money,
    annual_production_kwh: KilowattHours,
    retail_rate: Rate,
) -> Vec<CashFlowYear> {
    let savings = savings_schedule(annual_production_kwh, retail_rate);

    let (down, annual_payment, payment_years) = match plan {
        FinancingType::Cash => (total_cost, Decimal::ZERO, 0),
        FinancingType::Loan => {
            let down = total_cost * LOAN_DOWN_FRACTION;
            let monthly = amortized_monthly_payment(total_cost - down, LOAN_APR, LOAN_TERM_YEARS);
            (down, monthly * dec!(12), LOAN_TERM_YEARS)
        }
        FinancingType::Lease => {
            let monthly = (total_cost * LEASE_MONTHLY_FACTOR)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            (Decimal::ZERO, monthly * dec!(12), LEASE_TERM_YEARS)
        }
    };

    let mut series = Vec::with_capacity(savings.len() + 1);
    let mut cumulative = -down;
    series.push(CashFlowYear {
        year: 0,
        savings: Decimal::ZERO,
        payments: down,
        net_cash_flow: -down,
        cumulative,
    });

    for (i, s) in savings.iter().enumerate() {
        let year = (i + 1) as u32;
        let payments = if year <= payment_years {
            annual_payment
        } else {
            Decimal::ZERO
        };
        let net = s - payments;
        cumulative += net;
        series.push(CashFlowYear {
            year,
            savings: *s,
            payments,
            net_cash_flow: net,
            cumulative,
        });
    }
    series
}

/// Fractional year at which the cumulative line crosses zero, interpolated
/// inside the crossing year. `None` when it never crosses, and for plans
/// with nothing down (a lease has no payoff concept).
pub fn payback_from_series(series: &[CashFlowYear]) -> Option<Decimal> {
    let mut prev_cumulative = Decimal::ZERO;
    for row in series {
        if row.year == 0 {
            if row.cumulative >= Decimal::ZERO {
                return None;
            }
            prev_cumulative = row.cumulative;
            continue;
        }
        if row.cumulative >= Decimal::ZERO && row.net_cash_flow > Decimal::ZERO {
            let fraction = -prev_cumulative / row.net_cash_flow;
            let years = Decimal::from(row.year - 1) + fraction;
            return Some(years.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero));
        }
        prev_cumulative = row.cumulative;
    }
    None
}
