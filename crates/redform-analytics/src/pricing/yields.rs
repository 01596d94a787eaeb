//! Price and yield risk from a periodically compounded yield to maturity.

use serde::{Deserialize, Serialize};

use redform_core::{CreditError, CreditResult};

/// Yields closer to zero than this are rejected; the closed form divides by
/// the yield.
const MIN_YIELD_MAGNITUDE: f64 = 1e-12;

/// Price and first two yield derivatives of a bullet bond.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldPriceResult {
    /// Price as a percentage of par.
    pub price: f64,
    /// `dP/dy`, percent of par per unit of yield.
    pub yield_delta: f64,
    /// `d²P/dy²`, percent of par per unit of yield squared.
    pub yield_gamma: f64,
}

impl YieldPriceResult {
    /// Modified duration: `-(dP/dy) / P`.
    #[must_use]
    pub fn modified_duration(&self) -> f64 {
        -self.yield_delta / self.price
    }

    /// Convexity: `(d²P/dy²) / P`.
    #[must_use]
    pub fn convexity(&self) -> f64 {
        self.yield_gamma / self.price
    }

    /// Price change, in percent of par, for a one basis point yield rise.
    #[must_use]
    pub fn dv01(&self) -> f64 {
        -self.yield_delta * 1e-4
    }
}

/// Price of a bond with `frequency` coupons a year from its yield to
/// maturity, treating `maturity * frequency` as the number of remaining
/// periods.
///
/// With `y = ytm / f`, `A = (1 + y)^(-f T)` and `q = c / ytm`:
///
/// ```text
/// P / 100 = A + q (1 - A)
/// ```
///
/// Derivatives are analytic.
///
/// # Example
///
/// ```rust
/// use redform_analytics::pricing::price_from_yield;
///
/// // A bond whose coupon equals its yield prices at par.
/// let result = price_from_yield(0.05, 0.05, 10.0, 2).unwrap();
/// assert!((result.price - 100.0).abs() < 1e-10);
/// assert!(result.yield_delta < 0.0);
/// ```
pub fn price_from_yield(
    ytm: f64,
    coupon_rate: f64,
    maturity: f64,
    frequency: u32,
) -> CreditResult<YieldPriceResult> {
    if frequency == 0 {
        return Err(CreditError::invalid_parameter(
            "frequency",
            0.0,
            "at least one payment per year is required",
        ));
    }
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

    let f = f64::from(frequency);
    if !ytm.is_finite() || ytm <= -f {
        return Err(CreditError::invalid_parameter(
            "ytm",
            ytm,
            format!("must be finite and greater than -{f}"),
        ));
    }
    if ytm.abs() < MIN_YIELD_MAGNITUDE {
        return Err(CreditError::invalid_parameter(
            "ytm",
            ytm,
            "a zero yield has no closed form",
        ));
    }

    let periods = maturity * f;
    let growth = 1.0 + ytm / f;
    let q = coupon_rate / ytm;

    let a = growth.powf(-periods);
    let da = -maturity * a / growth;
    let d2a = maturity * a * (1.0 + periods) / f / (growth * growth);

    let annuity = q * (1.0 - a);
    let unit_price = a + annuity;
    let unit_delta = da * (1.0 - q) - annuity / ytm;
    let unit_gamma = d2a * (1.0 - q) + 2.0 * da * q / ytm + 2.0 * annuity / (ytm * ytm);

    Ok(YieldPriceResult {
        price: 100.0 * unit_price,
        yield_delta: 100.0 * unit_delta,
        yield_gamma: 100.0 * unit_gamma,
    })
}
