//! Property-based tests for pricing invariants.
//!
//! These tests verify properties that should hold for every valid input:
//! - Survival probabilities start at 1 and strictly decrease
//! - Price is deterministic, and for ordinary bonds decreasing in the spread
//! - The two pricing legs sum to the price
//! - Implied spread inverts the pricer

use proptest::prelude::*;

use redform_analytics::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

fn bond_strategy() -> impl Strategy<Value = BondSpec> {
    (0.0f64..0.12, 0.5f64..30.0, prop::sample::select(vec![1u32, 2, 4, 12]))
        .prop_map(|(coupon, maturity, per_year)| {
            BondSpec::with_frequency(100.0, coupon, maturity, per_year).unwrap()
        })
}

fn market_strategy() -> impl Strategy<Value = CreditMarketParams> {
    (-0.01f64..0.10, 0.0f64..0.08, 0.0f64..0.95)
        .prop_map(|(r, s, recovery)| CreditMarketParams::new(r, s, recovery).unwrap())
}

/// A bond that is worth more than its recovery value at every point of its
/// life, so widening the spread can only lower its price. That needs the
/// coupon to beat `recovery * r` with room for paying in arrears.
fn ordinary_case_strategy() -> impl Strategy<Value = (BondSpec, CreditMarketParams)> {
    (
        0.0f64..0.06,
        0.0f64..0.05,
        0.0f64..0.6,
        0.005f64..0.08,
        0.5f64..20.0,
        prop::sample::select(vec![1u32, 2, 4, 12]),
    )
        .prop_map(|(r, s, recovery, extra, maturity, per_year)| {
            let coupon = 1.5 * recovery * r + extra;
            (
                BondSpec::with_frequency(100.0, coupon, maturity, per_year).unwrap(),
                CreditMarketParams::new(r, s, recovery).unwrap(),
            )
        })
}

// =============================================================================
// SURVIVAL
// =============================================================================

proptest! {
    #[test]
    fn prop_survival_starts_at_one(h in 0.0f64..10.0) {
        prop_assert_eq!(survival_probability(0.0, h).unwrap(), 1.0);
    }

    #[test]
    fn prop_survival_strictly_decreasing(
        t1 in 0.0f64..40.0,
        gap in 1e-3f64..20.0,
        h in 1e-3f64..1.0,
    ) {
        let earlier = survival_probability(t1, h).unwrap();
        let later = survival_probability(t1 + gap, h).unwrap();
        prop_assert!(later < earlier);
    }

    #[test]
    fn prop_hazard_scales_with_loss(s in 0.0f64..0.5, recovery in 0.0f64..0.99) {
        let h = hazard_rate(s, recovery).unwrap();
        prop_assert!((h * (1.0 - recovery) - s).abs() <= 1e-12 * (1.0 + s));
    }
}

// =============================================================================
// PRICING
// =============================================================================

proptest! {
    #[test]
    fn prop_price_is_deterministic(bond in bond_strategy(), market in market_strategy()) {
        let a = price(&bond, &market).unwrap();
        let b = price(&bond, &market).unwrap();
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn prop_legs_sum_to_price(bond in bond_strategy(), market in market_strategy()) {
        let result = price_detailed(&bond, &market).unwrap();
        prop_assert!(result.survival_leg >= 0.0);
        prop_assert!(result.recovery_leg >= 0.0);
        let total = result.survival_leg + result.recovery_leg;
        prop_assert!((result.present_value - total).abs() <= 1e-9 * total.max(1.0));
    }

    #[test]
    fn prop_price_decreasing_in_spread(
        (bond, market) in ordinary_case_strategy(),
        bump in 1e-3f64..0.02,
    ) {
        let wider = market
            .with_parameter(MarketParameter::CreditSpread, market.credit_spread() + bump)
            .unwrap();
        prop_assert!(price(&bond, &wider).unwrap() < price(&bond, &market).unwrap());
    }

    #[test]
    fn prop_riskless_price_bounds_risky((bond, market) in ordinary_case_strategy()) {
        let riskless = market.with_parameter(MarketParameter::CreditSpread, 0.0).unwrap();
        let risky = price(&bond, &market).unwrap();
        prop_assert!(risky <= price(&bond, &riskless).unwrap() * (1.0 + 1e-12));
    }

    #[test]
    fn prop_spread_sensitivity_negative((bond, market) in ordinary_case_strategy()) {
        let result = sensitivities(&bond, &market, &[MarketParameter::CreditSpread], None).unwrap();
        prop_assert!(result.derivative(MarketParameter::CreditSpread).unwrap() < 0.0);
    }
}

// =============================================================================
// IMPLIED SPREAD
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_implied_spread_inverts_price((bond, market) in ordinary_case_strategy()) {
        // a zero spread sits outside the solver's searched range
        prop_assume!(market.credit_spread() > 1e-4);
        let target = price(&bond, &market).unwrap();
        let (r, recovery) = (market.risk_free_rate(), market.recovery_rate());

        let solved = implied_credit_spread(&bond, r, recovery, target, &SolverSettings::default())
            .unwrap();
        let resolved = market
            .with_parameter(MarketParameter::CreditSpread, solved.spread)
            .unwrap();
        let repriced = price(&bond, &resolved).unwrap();
        prop_assert!((repriced - target).abs() < 1e-6, "target {} repriced {}", target, repriced);
    }
}
