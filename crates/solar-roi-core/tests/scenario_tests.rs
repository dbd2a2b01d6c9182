//! Cross-view consistency sweep: the payoff number printed on the financing
//! cards must match the crossing year of the chart's cash-flow series for
//! every scenario the wizard can produce.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use solar_roi_core::cashflow::{payback_from_series, simulate_cash_flow};
use solar_roi_core::financing::{financing_plans, FinancingType};
use solar_roi_core::production::{annual_production, size_system, system_cost};
use solar_roi_core::types::SunExposure;

struct Scenario {
    monthly_kwh: Decimal,
    roof_sqft: Decimal,
    sun: SunExposure,
}

fn scenario_grid() -> Vec<Scenario> {
    let mut grid = Vec::new();
    for monthly_kwh in [dec!(400), dec!(800), dec!(1400), dec!(2200)] {
        for roof_sqft in [dec!(500), dec!(1200), dec!(2800)] {
            for sun in [
                SunExposure::Poor,
                SunExposure::Fair,
                SunExposure::Good,
                SunExposure::Excellent,
            ] {
                grid.push(Scenario {
                    monthly_kwh,
                    roof_sqft,
                    sun,
                });
            }
        }
    }
    grid
}

#[test]
fn card_payoff_matches_chart_series_for_every_scenario() {
    for (i, scenario) in scenario_grid().iter().enumerate() {
        let annual_consumption = scenario.monthly_kwh * dec!(12);
        let factor = scenario.sun.factor();
        let size = size_system(annual_consumption, factor, scenario.roof_sqft, dec!(1.0));
        let production = annual_production(size, factor);
        let cost = system_cost(size, false);
        let rate = dec!(0.17);

        let plans = financing_plans(cost, production, rate);

        for plan in &plans {
            let series = simulate_cash_flow(plan.plan_type, cost, production, rate);
            let chart_payoff = payback_from_series(&series);
            assert_eq!(
                plan.payoff_years, chart_payoff,
                "scenario #{i} ({} kWh/mo, {} sqft, {:?}): card and chart \
                 disagree for {:?}",
                scenario.monthly_kwh, scenario.roof_sqft, scenario.sun, plan.plan_type,
            );
        }
    }
}

#[test]
fn lease_has_no_payoff_in_either_view() {
    for scenario in scenario_grid() {
        let annual_consumption = scenario.monthly_kwh * dec!(12);
        let factor = scenario.sun.factor();
        let size = size_system(annual_consumption, factor, scenario.roof_sqft, dec!(1.0));
        let production = annual_production(size, factor);
        let cost = system_cost(size, false);
        let rate = dec!(0.17);

        let plans = financing_plans(cost, production, rate);
        let lease = plans
            .iter()
            .find(|p| p.plan_type == FinancingType::Lease)
            .unwrap();
        assert_eq!(lease.payoff_years, None);

        let series = simulate_cash_flow(FinancingType::Lease, cost, production, rate);
        assert_eq!(payback_from_series(&series), None);
    }
}

#[test]
fn chart_cumulative_ends_at_the_card_net_benefit() {
    // The last cumulative point of the chart is exactly the 25-year net
    // benefit the card reports, for every plan type.
    let cost = dec!(27500); // 10 kW
    let production = dec!(12000);
    let rate = dec!(0.17);

    let plans = financing_plans(cost, production, rate);
    for plan in &plans {
        let series = simulate_cash_flow(plan.plan_type, cost, production, rate);
        let final_cumulative = series.last().unwrap().cumulative;
        assert_eq!(
            final_cumulative, plan.net_benefit_25yr,
            "chart endpoint diverged from card net benefit for {:?}",
            plan.plan_type,
        );
    }
}
