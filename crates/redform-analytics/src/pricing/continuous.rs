//! Closed-form price of a bond paying its coupon continuously.

use redform_core::{CreditError, CreditMarketParams, CreditResult};

use crate::survival::hazard_rate;

/// Price per unit notional of a bond paying coupon rate `c` continuously to
/// `maturity`, with recovery `R` paid at default.
///
/// ```text
/// k = r + h
/// P = exp(-k T) + (c + R h) (1 - exp(-k T)) / k
/// ```
///
/// where `h = s / (1 - R)`, with the limit `P = 1 + (c + R h) T` as `k -> 0`.
/// This is the limit of [`price`](crate::pricing::price) as payments become
/// infinitely frequent, and is useful as an analytic reference for it.
pub fn continuous_coupon_price(
    maturity: f64,
    coupon_rate: f64,
    risk_free_rate: f64,
    credit_spread: f64,
    recovery_rate: f64,
) -> CreditResult<f64> {
    if !maturity.is_finite() || maturity <= 0.0 {
        return Err(CreditError::invalid_parameter(
            "maturity",
            maturity,
            "must be positive and finite",
        ));
    }
    if !coupon_rate.is_finite() || coupon_rate < 0.0 {
        return Err(CreditError::invalid_parameter(
            "coupon_rate",
            coupon_rate,
            "must be finite and non-negative",
        ));
    }
    let market = CreditMarketParams::new(risk_free_rate, credit_spread, recovery_rate)?;
    let h = hazard_rate(market.credit_spread(), market.recovery_rate())?;

    let k = risk_free_rate + h;
    let annuity = if k == 0.0 {
        maturity
    } else {
        -(-k * maturity).exp_m1() / k
    };

    Ok((-k * maturity).exp() + (coupon_rate + recovery_rate * h) * annuity)
}
