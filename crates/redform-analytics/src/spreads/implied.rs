//! Credit spread implied by a bond price.
//!
//! Inverts [`price`] in the spread with rate and recovery held fixed. While
//! a bond is worth more than its recovery value, price falls as the spread
//! widens and the root is unique. The search starts from a yield-style
//! estimate, runs Newton-Raphson, and falls back to Brent's method on the
//! configured spread range.

use log::debug;
use serde::{Deserialize, Serialize};

use redform_core::{
    BondSpec, CreditError, CreditMarketParams, CreditResult, MarketParameter, SolverSettings,
    Validate,
};
use redform_math::differentiation::scaled_step;
use redform_math::solvers::newton_with_fallback;

use crate::pricing::price;
use crate::survival::hazard_rate;

/// A solved credit spread.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpliedSpread {
    /// Credit spread reproducing the target price.
    pub spread: f64,
    /// Hazard rate at that spread.
    pub hazard_rate: f64,
    /// Solver iterations used.
    pub iterations: u32,
    /// Model price minus target price at the solution.
    pub residual: f64,
}

/// Credit spread at which `bond` prices to `target_price`.
///
/// Fails with `InvalidParameter` for invalid inputs, and with
/// `ImpliedSpreadFailed` when the target lies outside the prices reachable
/// on `[settings.spread_floor, settings.spread_cap]` or the solver does not
/// converge.
///
/// # Example
///
/// ```rust
/// use redform_analytics::prelude::*;
///
/// let bond = BondSpec::annual(100.0, 0.05, 5).unwrap();
/// let market = CreditMarketParams::new(0.03, 0.0215, 0.4).unwrap();
/// let target = price(&bond, &market).unwrap();
///
/// let solved = implied_credit_spread(&bond, 0.03, 0.4, target, &SolverSettings::default()).unwrap();
/// assert!((solved.spread - 0.0215).abs() < 1e-9);
/// ```
pub fn implied_credit_spread(
    bond: &BondSpec,
    risk_free_rate: f64,
    recovery_rate: f64,
    target_price: f64,
    settings: &SolverSettings,
) -> CreditResult<ImpliedSpread> {
    if !target_price.is_finite() || target_price <= 0.0 {
        return Err(CreditError::invalid_parameter(
            "target_price",
            target_price,
            "must be positive and finite",
        ));
    }
    if let Some(err) = settings.validate().into_iter().next() {
        return Err(CreditError::invalid_parameter(
            format!("solver.{}", err.field),
            f64::NAN,
            err.message,
        ));
    }

    let (floor, cap) = (settings.spread_floor, settings.spread_cap);
    let base = CreditMarketParams::new(risk_free_rate, floor, recovery_rate)?;
    let price_at = |spread: f64| -> CreditResult<f64> {
        let market = base.with_parameter(MarketParameter::CreditSpread, spread.clamp(floor, cap))?;
        price(bond, &market)
    };

    let highest = price_at(floor)?;
    let lowest = price_at(cap)?;
    if target_price > highest + settings.tolerance || target_price < lowest - settings.tolerance {
        return Err(CreditError::ImpliedSpreadFailed {
            target: target_price,
            reason: format!(
                "target lies outside the attainable price range [{lowest}, {highest}] for spreads in [{floor}, {cap}]"
            ),
        });
    }

    let objective = |spread: f64| price_at(spread).map_or(f64::NAN, |p| p - target_price);
    let slope = |spread: f64| {
        let h = scaled_step(spread, 1e-4, 1e-8);
        let (lo, hi) = ((spread - h).max(floor), (spread + h).min(cap));
        (objective(hi) - objective(lo)) / (hi - lo)
    };

    let guess = initial_guess(bond, risk_free_rate, target_price).clamp(floor, cap);
    let solution = newton_with_fallback(
        &objective,
        &slope,
        guess,
        (floor, cap),
        &settings.solver_config(),
    )
    .map_err(|e| CreditError::ImpliedSpreadFailed {
        target: target_price,
        reason: e.to_string(),
    })?;

    debug!(
        "implied spread {} for target {target_price} from guess {guess} in {} iterations",
        solution.root, solution.iterations
    );

    Ok(ImpliedSpread {
        spread: solution.root,
        hazard_rate: hazard_rate(solution.root, recovery_rate)?,
        iterations: solution.iterations,
        residual: solution.residual,
    })
}

/// Yield-style starting point: average annual return over the average of
/// price and par, less the risk-free rate.
///
/// ```text
/// s0 = (c + (1 - p) / T) / ((1 + p) / 2) - r,   p = price / notional
/// ```
fn initial_guess(bond: &BondSpec, risk_free_rate: f64, target_price: f64) -> f64 {
    let p = target_price / bond.notional();
    let annual_return = bond.coupon_rate() + (1.0 - p) / bond.maturity();
    annual_return / ((1.0 + p) / 2.0) - risk_free_rate
}
