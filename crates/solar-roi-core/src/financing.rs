//! Cash, loan and lease projections over the 25-year analysis horizon.
//!
//! Savings escalate with the retail rate and shrink with panel degradation;
//! payback is the fractional year where cumulative net savings cross zero,
//! found by linear interpolation inside the crossing year.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assumptions::{
    ANALYSIS_HORIZON_YEARS, LEASE_MONTHLY_FACTOR, LEASE_TERM_YEARS, LOAN_APR,
    LOAN_DOWN_FRACTION, LOAN_TERM_YEARS, NET_METERING_CREDIT, PANEL_DEGRADATION,
    RATE_ESCALATION,
};
use crate::types::{KilowattHours, Money, Rate};

/// How the lead pays for the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancingType {
    Cash,
    Loan,
    Lease,
}

/// One financing option on the results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingPlan {
    pub plan_type: FinancingType,
    /// Full system price under this plan
    pub total_cost: Money,
    /// Due at signing. Equals `total_cost` for cash, 10% for a loan, $0 for
    /// a lease.
    pub down_payment: Money,
    /// Fixed monthly obligation ($0 for cash)
    pub monthly_payment: Money,
    /// Fractional year where cumulative savings turn non-negative. Absent
    /// for leases (nothing is being paid off) and for plans that never
    /// break even inside the horizon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payoff_years: Option<Decimal>,
    /// 25-year return on the money put in, as a percentage
    pub roi_25yr_pct: Decimal,
    /// 25-year savings net of everything paid under the plan
    pub net_benefit_25yr: Money,
}

/// Year-by-year dollar savings from production over the analysis horizon.
///
/// Year 1 equals production x retail rate x net-metering credit; later years
/// escalate the rate and degrade the output.
pub fn savings_schedule(annual_production_kwh: KilowattHours, retail_rate: Rate) -> Vec<Money> {
    let mut schedule = Vec::with_capacity(ANALYSIS_HORIZON_YEARS as usize);
    let mut savings = annual_production_kwh * retail_rate * NET_METERING_CREDIT;
    for year in 1..=ANALYSIS_HORIZON_YEARS {
        if year > 1 {
            savings *= (Decimal::ONE + RATE_ESCALATION) * (Decimal::ONE - PANEL_DEGRADATION);
        }
        // Dollars are quoted in cents; the running value keeps full precision
        schedule.push(savings.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero));
    }
    schedule
}

/// Standard amortized monthly payment, rounded to cents.
pub fn amortized_monthly_payment(principal: Money, apr: Rate, term_years: u32) -> Money {
    if principal <= Decimal::ZERO || term_years == 0 {
        return Decimal::ZERO;
    }
    let n = (term_years * 12) as i64;
    let monthly_rate = apr / dec!(12);
    let payment = if monthly_rate.is_zero() {
        principal / Decimal::from(n)
    } else {
        let factor = (Decimal::ONE + monthly_rate).powi(n);
        principal * monthly_rate * factor / (factor - Decimal::ONE)
    };
    payment.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// All three financing options for one sized system.
pub fn financing_plans(
    total_cost: Money,
    annual_production_kwh: KilowattHours,
    retail_rate: Rate,
) -> Vec<FinancingPlan> {
    let savings = savings_schedule(annual_production_kwh, retail_rate);
    vec![
        cash_plan(total_cost, &savings),
        loan_plan(total_cost, &savings),
        lease_plan(total_cost, &savings),
    ]
}

/// Cash purchase: the full cost up front, every savings dollar is net.
pub fn cash_plan(total_cost: Money, savings: &[Money]) -> FinancingPlan {
    let total_savings: Money = savings.iter().sum();
    let net_benefit = total_savings - total_cost;
    let roi = percentage_of(net_benefit, total_cost);

    FinancingPlan {
        plan_type: FinancingType::Cash,
        total_cost,
        down_payment: total_cost,
        monthly_payment: Decimal::ZERO,
        payoff_years: payback_years(total_cost, savings),
        roi_25yr_pct: roi,
        net_benefit_25yr: net_benefit,
    }
}

/// Solar loan: 10% down, the rest amortized over the loan term.
pub fn loan_plan(total_cost: Money, savings: &[Money]) -> FinancingPlan {
    let down_payment = total_cost * LOAN_DOWN_FRACTION;
    let principal = total_cost - down_payment;
    let monthly_payment = amortized_monthly_payment(principal, LOAN_APR, LOAN_TERM_YEARS);
    let annual_payment = monthly_payment * dec!(12);

    let net_by_year: Vec<Money> = savings
        .iter()
        .enumerate()
        .map(|(i, s)| {
            if (i as u32) < LOAN_TERM_YEARS {
                s - annual_payment
            } else {
                *s
            }
        })
        .collect();

    let total_savings: Money = savings.iter().sum();
    let total_outlay = down_payment + annual_payment * Decimal::from(LOAN_TERM_YEARS);
    let net_benefit = total_savings - total_outlay;
    let roi = percentage_of(net_benefit, down_payment);

    FinancingPlan {
        plan_type: FinancingType::Loan,
        total_cost,
        down_payment,
        monthly_payment,
        payoff_years: payback_years(down_payment, &net_by_year),
        roi_25yr_pct: roi,
        net_benefit_25yr: net_benefit,
    }
}

/// Lease: nothing down, a flat monthly payment for the lease term. There is
/// no payoff concept; the plan is always measured against not going solar.
pub fn lease_plan(total_cost: Money, savings: &[Money]) -> FinancingPlan {
    let monthly_payment = (total_cost * LEASE_MONTHLY_FACTOR)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let total_payments = monthly_payment * dec!(12) * Decimal::from(LEASE_TERM_YEARS);

    let total_savings: Money = savings.iter().sum();
    let net_benefit = total_savings - total_payments;
    let roi = percentage_of(net_benefit, total_payments);

    FinancingPlan {
        plan_type: FinancingType::Lease,
        total_cost,
        down_payment: Decimal::ZERO,
        monthly_payment,
        payoff_years: None,
        roi_25yr_pct: roi,
        net_benefit_25yr: net_benefit,
    }
}

/// Fractional year where cumulative net cash flow recovers `initial_outlay`.
///
/// Walks the annual schedule; inside the crossing year the fraction is the
/// remaining deficit over that year's net savings.
pub fn payback_years(initial_outlay: Money, annual_net: &[Money]) -> Option<Decimal> {
    if initial_outlay <= Decimal::ZERO {
        return Some(Decimal::ZERO);
    }
    let mut cumulative = -initial_outlay;
    for (i, net) in annual_net.iter().enumerate() {
        if *net > Decimal::ZERO && cumulative + net >= Decimal::ZERO {
            let fraction = -cumulative / net;
            let years = Decimal::from(i as i64) + fraction;
            return Some(years.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero));
        }
        cumulative += net;
    }
    None
}

fn percentage_of(numerator: Money, denominator: Money) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    (numerator / denominator * dec!(100))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plans_for_8kw() -> Vec<FinancingPlan> {
        // 8 kW at good sun: 9600 kWh/yr, $22,000 system
        financing_plans(dec!(22000), dec!(9600), dec!(0.17))
    }

    #[test]
    fn cash_down_payment_equals_total_cost() {
        let plans = plans_for_8kw();
        let cash = &plans[0];
        assert_eq!(cash.plan_type, FinancingType::Cash);
        assert_eq!(cash.down_payment, cash.total_cost);
        assert_eq!(cash.monthly_payment, Decimal::ZERO);
    }

    #[test]
    fn loan_down_payment_is_ten_percent() {
        let plans = plans_for_8kw();
        let loan = &plans[1];
        assert_eq!(loan.plan_type, FinancingType::Loan);
        assert_eq!(loan.down_payment, dec!(0.10) * loan.total_cost);
        assert!(loan.monthly_payment > Decimal::ZERO);
    }

    #[test]
    fn lease_has_zero_down_and_no_payoff() {
        let plans = plans_for_8kw();
        let lease = &plans[2];
        assert_eq!(lease.plan_type, FinancingType::Lease);
        assert_eq!(lease.down_payment, Decimal::ZERO);
        assert_eq!(lease.payoff_years, None);
    }

    #[test]
    fn loan_payment_matches_amortization() {
        // $19,800 over 20 years at 6.5% APR lands near $147.6/mo
        let payment = amortized_monthly_payment(dec!(19800), dec!(0.065), 20);
        assert!(
            payment > dec!(140) && payment < dec!(155),
            "unexpected loan payment {payment}",
        );
    }

    #[test]
    fn zero_rate_amortization_divides_evenly() {
        let payment = amortized_monthly_payment(dec!(12000), Decimal::ZERO, 10);
        assert_eq!(payment, dec!(100));
    }

    #[test]
    fn savings_schedule_escalates_and_degrades() {
        let schedule = savings_schedule(dec!(9600), dec!(0.17));
        assert_eq!(schedule.len(), 25);
        assert_eq!(schedule[0], dec!(1632.00));
        // Escalation (2.5%) outruns degradation (0.5%), so the series rises
        assert!(schedule[1] > schedule[0]);
        assert!(schedule[24] > schedule[0]);
    }

    #[test]
    fn payback_interpolates_inside_crossing_year() {
        // $1,000 outlay against flat $400/yr savings: 1000/400 = 2.5 years
        let net = vec![dec!(400); 5];
        assert_eq!(payback_years(dec!(1000), &net), Some(dec!(2.5)));
    }

    #[test]
    fn payback_handles_exact_year_boundary() {
        let net = vec![dec!(500); 4];
        assert_eq!(payback_years(dec!(1000), &net), Some(dec!(2.0)));
    }

    #[test]
    fn payback_none_when_never_recovered() {
        let net = vec![dec!(10); 25];
        assert_eq!(payback_years(dec!(1000), &net), None);
    }

    #[test]
    fn cash_payback_within_horizon_for_typical_system() {
        let plans = plans_for_8kw();
        let cash = &plans[0];
        let payoff = cash.payoff_years.expect("typical system should pay back");
        assert!(
            payoff > dec!(5) && payoff < dec!(20),
            "unexpected cash payback {payoff}",
        );
    }

    #[test]
    fn plans_are_deterministic() {
        assert_eq!(plans_for_8kw(), plans_for_8kw());
    }
}
