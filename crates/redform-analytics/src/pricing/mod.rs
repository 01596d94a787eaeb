//! Bond pricing under the constant-intensity default model.
//!
//! This module provides:
//! - [`price`] / [`price_detailed`]: present value of a bond
//! - [`BondPricer`]: configured facade for pricing, sensitivities and batches
//! - [`continuous_coupon_price`]: closed form for a continuously paid coupon
//! - [`price_from_yield`]: price and yield risk from a yield to maturity
//!
//! # Valuation
//!
//! With payment times `t_1 < ... < t_n`, `t_0 = 0`, risk-free rate `r`,
//! hazard rate `h` and recovery `R`:
//!
//! ```text
//! CF_i = N c (t_i - t_{i-1})          (+ N at t_n)
//! PV   = Σ CF_i exp(-r t_i) S(t_i)
//!      + R N Σ ∫_{t_{i-1}}^{t_i} exp(-r u) h S(u) du
//! ```
//!
//! The recovery integral is evaluated in closed form per interval, so the
//! result is exact up to floating-point rounding. Recovery is a fraction of
//! notional paid at the moment of default.

mod continuous;
mod result;
mod yields;

pub use continuous::continuous_coupon_price;
pub use result::{CashFlowDiagnostics, PricingResult};
pub use yields::{price_from_yield, YieldPriceResult};

use log::trace;

use redform_core::{
    AnalyticsConfig, BondSpec, CreditError, CreditMarketParams, CreditResult, MarketParameter,
    SensitivityConfig,
};

use crate::parallel::maybe_parallel_try_map;
use crate::risk::{SensitivityCalculator, SensitivityResult};
use crate::survival::SurvivalModel;

/// Present value of `bond` under `market`.
///
/// Deterministic: the same inputs always give the same bits.
///
/// # Example
///
/// ```rust
/// use redform_analytics::{price, BondSpec, CreditMarketParams};
///
/// let bond = BondSpec::annual(100.0, 0.05, 5).unwrap();
/// let riskless = CreditMarketParams::new(0.03, 0.0, 0.4).unwrap();
///
/// let expected: f64 = (1..=5).map(|t| 5.0 * (-0.03 * t as f64).exp()).sum::<f64>()
///     + 100.0 * (-0.15f64).exp();
/// assert!((price(&bond, &riskless).unwrap() - expected).abs() < 1e-10);
/// ```
pub fn price(bond: &BondSpec, market: &CreditMarketParams) -> CreditResult<f64> {
    price_detailed(bond, market).map(|result| result.present_value)
}

/// Present value of `bond` with its survival and recovery legs and
/// per-payment diagnostics.
pub fn price_detailed(bond: &BondSpec, market: &CreditMarketParams) -> CreditResult<PricingResult> {
    let model = SurvivalModel::from_market(market)?;
    let rate = market.risk_free_rate();

    let mut cash_flows = Vec::with_capacity(bond.payment_times().len());
    let mut survival_leg = 0.0;
    let mut discounted_default = 0.0;
    let mut previous = 0.0;

    for (time, amount) in bond.cash_flows() {
        let discount_factor = (-rate * time).exp();
        let survival_probability = model.survival_at(time);
        let present_value = amount * discount_factor * survival_probability;

        survival_leg += present_value;
        discounted_default += model.discounted_default_between(previous, time, rate);
        previous = time;

        cash_flows.push(CashFlowDiagnostics {
            time,
            amount,
            discount_factor,
            survival_probability,
            present_value,
        });
    }

    let recovery_leg = market.recovery_rate() * bond.notional() * discounted_default;
    let present_value = survival_leg + recovery_leg;

    trace!(
        "priced bond T={} c={} at r={} s={} R={}: pv={present_value} (survival {survival_leg}, recovery {recovery_leg})",
        bond.maturity(),
        bond.coupon_rate(),
        rate,
        market.credit_spread(),
        market.recovery_rate(),
    );

    Ok(PricingResult {
        present_value,
        survival_leg,
        recovery_leg,
        hazard_rate: model.hazard(),
        cash_flows,
    })
}

/// Prices `bonds[i]` under `markets[i]` for every `i`.
///
/// The slices must have the same length. Results are in input order; on
/// failure the error of the earliest failing pair is returned.
pub fn price_batch(
    bonds: &[BondSpec],
    markets: &[CreditMarketParams],
    config: &AnalyticsConfig,
) -> CreditResult<Vec<f64>> {
    if bonds.len() != markets.len() {
        return Err(CreditError::invalid_parameter(
            "markets",
            markets.len() as f64,
            format!("expected {} market parameter sets, one per bond", bonds.len()),
        ));
    }

    let pairs: Vec<(&BondSpec, &CreditMarketParams)> = bonds.iter().zip(markets).collect();
    maybe_parallel_try_map(&pairs, config, |(bond, market)| price(bond, market))
}

/// Prices one bond under each of `markets`, in order.
pub fn price_across_markets(
    bond: &BondSpec,
    markets: &[CreditMarketParams],
    config: &AnalyticsConfig,
) -> CreditResult<Vec<f64>> {
    maybe_parallel_try_map(markets, config, |market| price(bond, market))
}

/// Configured pricing facade.
///
/// Holds the finite-difference step policy and the batch parallelism
/// settings; pricing itself is stateless.
///
/// # Example
///
/// ```rust
/// use redform_analytics::prelude::*;
///
/// let pricer = BondPricer::new(SensitivityConfig::default().with_relative_step(1e-5));
/// let bond = BondSpec::annual(100.0, 0.05, 3).unwrap();
/// let market = CreditMarketParams::new(0.02, 0.01, 0.4).unwrap();
///
/// let result = pricer.price_detailed(&bond, &market).unwrap();
/// assert!(result.recovery_leg > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BondPricer {
    sensitivity: SensitivityConfig,
    batch: AnalyticsConfig,
}

impl BondPricer {
    /// Creates a pricer with the given step policy and default batch settings.
    #[must_use]
    pub fn new(sensitivity: SensitivityConfig) -> Self {
        Self {
            sensitivity,
            batch: AnalyticsConfig::default(),
        }
    }

    /// Sets the batch parallelism settings.
    #[must_use]
    pub fn with_batch_config(mut self, batch: AnalyticsConfig) -> Self {
        self.batch = batch;
        self
    }

    /// The step policy.
    pub fn sensitivity_config(&self) -> &SensitivityConfig {
        &self.sensitivity
    }

    /// The batch parallelism settings.
    pub fn batch_config(&self) -> &AnalyticsConfig {
        &self.batch
    }

    /// See [`price`].
    pub fn price(&self, bond: &BondSpec, market: &CreditMarketParams) -> CreditResult<f64> {
        price(bond, market)
    }

    /// See [`price_detailed`].
    pub fn price_detailed(
        &self,
        bond: &BondSpec,
        market: &CreditMarketParams,
    ) -> CreditResult<PricingResult> {
        price_detailed(bond, market)
    }

    /// Sensitivities using this pricer's step policy.
    pub fn sensitivities(
        &self,
        bond: &BondSpec,
        market: &CreditMarketParams,
        parameters: &[MarketParameter],
        step_sizes: Option<&[f64]>,
    ) -> CreditResult<SensitivityResult> {
        SensitivityCalculator::new(self.sensitivity)
            .with_batch_config(self.batch)
            .compute(bond, market, parameters, step_sizes)
    }

    /// See [`price_batch`].
    pub fn price_batch(
        &self,
        bonds: &[BondSpec],
        markets: &[CreditMarketParams],
    ) -> CreditResult<Vec<f64>> {
        price_batch(bonds, markets, &self.batch)
    }

    /// See [`price_across_markets`].
    pub fn price_across_markets(
        &self,
        bond: &BondSpec,
        markets: &[CreditMarketParams],
    ) -> CreditResult<Vec<f64>> {
        price_across_markets(bond, markets, &self.batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn market(r: f64, s: f64, recovery: f64) -> CreditMarketParams {
        CreditMarketParams::new(r, s, recovery).unwrap()
    }

    #[test]
    fn test_riskless_limit() {
        let bond = BondSpec::annual(100.0, 0.05, 5).unwrap();
        let r = 0.03;
        let expected: f64 = (1..=5)
            .map(|t| 5.0 * (-r * f64::from(t)).exp())
            .sum::<f64>()
            + 100.0 * (-r * 5.0).exp();

        for recovery in [0.0, 0.4, 0.9] {
            let result = price_detailed(&bond, &market(r, 0.0, recovery)).unwrap();
            assert_relative_eq!(result.present_value, expected, epsilon = 1e-10);
            assert_eq!(result.recovery_leg, 0.0);
            assert_eq!(result.hazard_rate, 0.0);
        }
    }

    #[test]
    fn test_legs_sum_to_price() {
        let bond = BondSpec::annual(100.0, 0.05, 3).unwrap();
        let result = price_detailed(&bond, &market(0.02, 0.01, 0.4)).unwrap();

        assert_relative_eq!(
            result.present_value,
            result.survival_leg + result.recovery_leg,
            epsilon = 1e-12
        );
        let from_flows: f64 = result.cash_flows.iter().map(|cf| cf.present_value).sum();
        assert_relative_eq!(from_flows, result.survival_leg, epsilon = 1e-12);
        assert_eq!(result.cash_flows.len(), 3);
        assert_relative_eq!(result.cash_flows[2].amount, 105.0);
    }

    #[test]
    fn test_zero_recovery_has_no_recovery_leg() {
        let bond = BondSpec::annual(100.0, 0.05, 3).unwrap();
        let result = price_detailed(&bond, &market(0.02, 0.03, 0.0)).unwrap();
        assert_eq!(result.recovery_leg, 0.0);
        assert_relative_eq!(result.hazard_rate, 0.03);
    }

    #[test]
    fn test_stub_coupon_is_accrual_weighted() {
        let bond = BondSpec::new(100.0, 0.06, 2.0, vec![0.5, 1.0, 2.0]).unwrap();
        let result = price_detailed(&bond, &market(0.0, 0.0, 0.4)).unwrap();
        let amounts: Vec<f64> = result.cash_flows.iter().map(|cf| cf.amount).collect();
        assert_relative_eq!(amounts[0], 3.0);
        assert_relative_eq!(amounts[1], 3.0);
        assert_relative_eq!(amounts[2], 106.0);
        assert_relative_eq!(result.present_value, 112.0, epsilon = 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let bond = BondSpec::with_frequency(1_000_000.0, 0.045, 7.25, 4).unwrap();
        let m = market(0.031, 0.0185, 0.35);
        let a = price(&bond, &m).unwrap();
        let b = price(&bond, &m).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_price_percent_and_default_probability() {
        let bond = BondSpec::annual(1_000.0, 0.05, 2).unwrap();
        let result = price_detailed(&bond, &market(0.02, 0.012, 0.4)).unwrap();
        assert_relative_eq!(
            result.price_percent(1_000.0),
            result.present_value / 10.0,
            epsilon = 1e-12
        );
        let h: f64 = 0.012 / 0.6;
        assert_relative_eq!(
            result.default_probability_to_maturity(),
            1.0 - (-2.0 * h).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_batch_matches_single() {
        let bonds: Vec<BondSpec> = (1..=10)
            .map(|y| BondSpec::annual(100.0, 0.04, y).unwrap())
            .collect();
        let markets: Vec<CreditMarketParams> = (0..10)
            .map(|i| market(0.02, 0.002 * f64::from(i), 0.4))
            .collect();

        let batch = price_batch(&bonds, &markets, &AnalyticsConfig::default().with_threshold(2))
            .unwrap();
        for ((bond, m), value) in bonds.iter().zip(&markets).zip(&batch) {
            assert_eq!(price(bond, m).unwrap().to_bits(), value.to_bits());
        }

        let across = price_across_markets(&bonds[4], &markets, &AnalyticsConfig::sequential())
            .unwrap();
        assert_eq!(across.len(), 10);
        assert!(across.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_batch_length_mismatch() {
        let bonds = vec![BondSpec::annual(100.0, 0.04, 2).unwrap()];
        let err = price_batch(&bonds, &[], &AnalyticsConfig::default()).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_pricer_facade() {
        let pricer = BondPricer::default().with_batch_config(AnalyticsConfig::sequential());
        let bond = BondSpec::annual(100.0, 0.05, 3).unwrap();
        let m = market(0.02, 0.01, 0.4);

        assert_eq!(
            pricer.price(&bond, &m).unwrap().to_bits(),
            price(&bond, &m).unwrap().to_bits()
        );
        let risk = pricer
            .sensitivities(&bond, &m, &[MarketParameter::CreditSpread], None)
            .unwrap();
        assert_eq!(risk.len(), 1);
        assert!(!pricer.batch_config().parallel);
    }
}
