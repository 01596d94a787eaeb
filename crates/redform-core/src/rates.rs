//! Compounding conversions.
//!
//! The pricer works with continuously compounded rates; market quotes are
//! often periodic. With `n` compounding periods per year:
//!
//! ```text
//! r_discrete   = n * (exp(r_continuous / n) - 1)
//! r_continuous = n * ln(1 + r_discrete / n)
//! ```

use crate::error::{ensure_finite, CreditError, CreditResult};

fn check_periods(periods: u32) -> CreditResult<f64> {
    if periods == 0 {
        return Err(CreditError::invalid_parameter(
            "compounding_periods",
            0.0,
            "must be at least one per year",
        ));
    }
    Ok(f64::from(periods))
}

/// Converts a continuously compounded rate to `periods`-per-year compounding.
pub fn continuous_to_discrete(rate: f64, periods: u32) -> CreditResult<f64> {
    ensure_finite("rate", rate)?;
    let n = check_periods(periods)?;
    Ok(n * (rate / n).exp_m1())
}

/// Converts a `periods`-per-year compounded rate to continuous compounding.
pub fn discrete_to_continuous(rate: f64, periods: u32) -> CreditResult<f64> {
    ensure_finite("rate", rate)?;
    let n = check_periods(periods)?;
    if rate / n <= -1.0 {
        return Err(CreditError::invalid_parameter(
            "rate",
            rate,
            "periodic rate must exceed -100% per period",
        ));
    }
    Ok(n * (rate / n).ln_1p())
}
