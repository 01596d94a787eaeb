//! Constant-intensity default model.
//!
//! Default is the first jump of a Poisson process with intensity `h`, the
//! hazard rate, implied from the credit spread and recovery rate:
//!
//! ```text
//! h    = s / (1 - R)
//! S(t) = exp(-h t)           survival probability
//! f(t) = h exp(-h t)         default density
//! ```
//!
//! The free functions validate every argument. [`SurvivalModel`] validates
//! the hazard rate once at construction and is what the pricer uses.

use serde::{Deserialize, Serialize};

use redform_core::{CreditError, CreditMarketParams, CreditResult};

/// `|h + r|` below which the discounted default integral uses its limit.
const INTEGRAL_LIMIT_THRESHOLD: f64 = 1e-12;

/// Hazard rate implied by a credit spread and recovery rate.
///
/// `spread` must be finite and non-negative; `recovery` must lie in `[0, 1)`.
///
/// # Example
///
/// ```rust
/// use redform_analytics::survival::hazard_rate;
///
/// let h = hazard_rate(0.01, 0.4).unwrap();
/// assert!((h - 0.01 / 0.6).abs() < 1e-15);
/// ```
pub fn hazard_rate(spread: f64, recovery: f64) -> CreditResult<f64> {
    if !spread.is_finite() || spread < 0.0 {
        return Err(CreditError::invalid_parameter(
            "credit_spread",
            spread,
            "must be finite and non-negative",
        ));
    }
    if !recovery.is_finite() || !(0.0..1.0).contains(&recovery) {
        return Err(CreditError::invalid_parameter(
            "recovery_rate",
            recovery,
            "must lie in [0, 1)",
        ));
    }
    Ok(spread / (1.0 - recovery))
}

/// Survival probability to time `t`: `exp(-h t)`.
///
/// Exactly 1 at `t = 0`.
pub fn survival_probability(t: f64, hazard: f64) -> CreditResult<f64> {
    SurvivalModel::new(hazard)?.survival_probability(t)
}

/// Default density at time `t`: `h exp(-h t)`.
pub fn default_density(t: f64, hazard: f64) -> CreditResult<f64> {
    SurvivalModel::new(hazard)?.default_density(t)
}

/// Probability of default in `(a, b]`: `S(a) - S(b)`.
pub fn default_probability(a: f64, b: f64, hazard: f64) -> CreditResult<f64> {
    SurvivalModel::new(hazard)?.default_probability(a, b)
}

/// Discounted default probability over `[a, b]`.
///
/// ```text
/// ∫_a^b exp(-r u) h exp(-h u) du = h / (h + r) (exp(-(h+r) a) - exp(-(h+r) b))
/// ```
///
/// with the limit `h (b - a)` when `h + r` vanishes.
pub fn discounted_default_integral(a: f64, b: f64, hazard: f64, rate: f64) -> CreditResult<f64> {
    SurvivalModel::new(hazard)?.discounted_default_integral(a, b, rate)
}

/// Survival probabilities at every time in `times` under one hazard rate.
pub fn survival_probabilities(times: &[f64], hazard: f64) -> CreditResult<Vec<f64>> {
    let model = SurvivalModel::new(hazard)?;
    times.iter().map(|&t| model.survival_probability(t)).collect()
}

/// Element-wise survival probabilities for paired times and hazard rates.
///
/// The slices must have the same length.
pub fn survival_probabilities_paired(times: &[f64], hazards: &[f64]) -> CreditResult<Vec<f64>> {
    if times.len() != hazards.len() {
        return Err(CreditError::invalid_parameter(
            "hazards",
            hazards.len() as f64,
            format!("expected {} hazard rates, one per time", times.len()),
        ));
    }
    times
        .iter()
        .zip(hazards)
        .map(|(&t, &h)| survival_probability(t, h))
        .collect()
}

/// Survival model with a validated, constant hazard rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurvivalModel {
    hazard: f64,
}

impl SurvivalModel {
    /// Creates a model from a hazard rate, which must be finite and `>= 0`.
    pub fn new(hazard: f64) -> CreditResult<Self> {
        if !hazard.is_finite() || hazard < 0.0 {
            return Err(CreditError::invalid_parameter(
                "hazard_rate",
                hazard,
                "must be finite and non-negative",
            ));
        }
        Ok(Self { hazard })
    }

    /// Creates a model from a spread and recovery rate.
    pub fn from_spread(spread: f64, recovery: f64) -> CreditResult<Self> {
        Self::new(hazard_rate(spread, recovery)?)
    }

    /// Creates the model implied by market parameters.
    pub fn from_market(market: &CreditMarketParams) -> CreditResult<Self> {
        Self::from_spread(market.credit_spread(), market.recovery_rate())
    }

    /// The hazard rate.
    pub fn hazard(&self) -> f64 {
        self.hazard
    }

    /// Survival probability to `t`.
    pub fn survival_probability(&self, t: f64) -> CreditResult<f64> {
        check_time("t", t)?;
        Ok(self.survival_at(t))
    }

    /// Default density at `t`.
    pub fn default_density(&self, t: f64) -> CreditResult<f64> {
        check_time("t", t)?;
        Ok(self.hazard * self.survival_at(t))
    }

    /// Probability of default in `(a, b]`.
    pub fn default_probability(&self, a: f64, b: f64) -> CreditResult<f64> {
        check_interval(a, b)?;
        Ok(self.survival_at(a) - self.survival_at(b))
    }

    /// Discounted default probability over `[a, b]` at continuously
    /// compounded `rate`.
    pub fn discounted_default_integral(&self, a: f64, b: f64, rate: f64) -> CreditResult<f64> {
        check_interval(a, b)?;
        if !rate.is_finite() {
            return Err(CreditError::invalid_parameter(
                "risk_free_rate",
                rate,
                "must be finite",
            ));
        }
        Ok(self.discounted_default_between(a, b, rate))
    }

    /// `exp(-h t)` for a time already known to be valid.
    pub(crate) fn survival_at(&self, t: f64) -> f64 {
        (-self.hazard * t).exp()
    }

    /// Closed-form discounted default integral for a valid interval.
    ///
    /// Written as `h exp(-k a) (1 - exp(-k (b - a))) / k` with `k = h + r`
    /// so that small `k` does not cancel.
    pub(crate) fn discounted_default_between(&self, a: f64, b: f64, rate: f64) -> f64 {
        let h = self.hazard;
        if h == 0.0 || b == a {
            return 0.0;
        }

        let k = h + rate;
        if k.abs() < INTEGRAL_LIMIT_THRESHOLD {
            return h * (b - a);
        }
        h * (-k * a).exp() * -(-k * (b - a)).exp_m1() / k
    }
}

fn check_time(name: &str, t: f64) -> CreditResult<()> {
    if t.is_finite() && t >= 0.0 {
        Ok(())
    } else {
        Err(CreditError::invalid_parameter(
            name,
            t,
            "time must be finite and non-negative",
        ))
    }
}

fn check_interval(a: f64, b: f64) -> CreditResult<()> {
    check_time("a", a)?;
    check_time("b", b)?;
    if a > b {
        return Err(CreditError::invalid_parameter(
            "b",
            b,
            format!("interval end must not precede its start {a}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_hazard_rate() {
        assert_relative_eq!(hazard_rate(0.01, 0.4).unwrap(), 0.01 / 0.6);
        assert_relative_eq!(hazard_rate(0.02, 0.0).unwrap(), 0.02);
        assert_eq!(hazard_rate(0.0, 0.4).unwrap(), 0.0);
    }

    #[test]
    fn test_hazard_rate_rejects_invalid() {
        assert!(hazard_rate(-0.01, 0.4).unwrap_err().is_invalid_parameter());
        assert!(hazard_rate(0.01, 1.0).unwrap_err().is_invalid_parameter());
        assert!(hazard_rate(0.01, -0.1).is_err());
        assert!(hazard_rate(f64::NAN, 0.4).is_err());
        assert!(hazard_rate(0.01, f64::NAN).is_err());
    }

    #[test]
    fn test_survival_at_zero_is_one() {
        assert_eq!(survival_probability(0.0, 0.3).unwrap(), 1.0);
        assert_eq!(survival_probability(0.0, 0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_survival_values() {
        let h = 0.01 / 0.6;
        assert_relative_eq!(
            survival_probability(5.0, h).unwrap(),
            (-5.0 * h).exp(),
            epsilon = 1e-15
        );
        assert_eq!(survival_probability(10.0, 0.0).unwrap(), 1.0);
        assert!(survival_probability(-1.0, h).is_err());
        assert!(survival_probability(1.0, -0.01).is_err());
    }

    #[test]
    fn test_default_density() {
        let h = 0.05;
        assert_relative_eq!(default_density(2.0, h).unwrap(), h * (-0.1f64).exp());
        assert_eq!(default_density(2.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn test_default_probability() {
        let h = 0.05;
        let p = default_probability(1.0, 3.0, h).unwrap();
        assert_relative_eq!(p, (-0.05f64).exp() - (-0.15f64).exp(), epsilon = 1e-15);
        assert!(default_probability(3.0, 1.0, h).is_err());
    }

    #[test]
    fn test_discounted_default_integral_matches_quadrature() {
        let (h, r) = (0.03, 0.02);
        let (a, b) = (0.5, 2.5);

        // composite Simpson with 2000 panels
        let n = 2000;
        let dx = (b - a) / n as f64;
        let g = |u: f64| h * (-(h + r) * u).exp();
        let mut sum = g(a) + g(b);
        for i in 1..n {
            let w = if i % 2 == 0 { 2.0 } else { 4.0 };
            sum += w * g(a + i as f64 * dx);
        }
        let simpson = sum * dx / 3.0;

        let closed = discounted_default_integral(a, b, h, r).unwrap();
        assert_relative_eq!(closed, simpson, epsilon = 1e-12);
    }

    #[test]
    fn test_discounted_default_integral_limit() {
        // h + r = 0 exactly
        let v = discounted_default_integral(1.0, 3.0, 0.02, -0.02).unwrap();
        assert_relative_eq!(v, 0.04, epsilon = 1e-15);

        // just off the limit, continuous with it
        let near = discounted_default_integral(1.0, 3.0, 0.02, -0.02 + 1e-9).unwrap();
        assert_relative_eq!(near, 0.04, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_hazard_integral_is_zero() {
        assert_eq!(discounted_default_integral(0.0, 5.0, 0.0, 0.03).unwrap(), 0.0);
        assert_eq!(discounted_default_integral(2.0, 2.0, 0.1, 0.03).unwrap(), 0.0);
    }

    #[test]
    fn test_vectorized() {
        let times = [0.0, 1.0, 2.0, 5.0];
        let probs = survival_probabilities(&times, 0.02).unwrap();
        assert_eq!(probs.len(), 4);
        assert_eq!(probs[0], 1.0);
        assert_relative_eq!(probs[3], (-0.1f64).exp());

        let paired = survival_probabilities_paired(&[1.0, 2.0], &[0.01, 0.02]).unwrap();
        assert_relative_eq!(paired[0], (-0.01f64).exp());
        assert_relative_eq!(paired[1], (-0.04f64).exp());

        assert!(survival_probabilities_paired(&[1.0, 2.0], &[0.01]).is_err());
        assert!(survival_probabilities(&[1.0, -2.0], 0.01).is_err());
    }

    #[test]
    fn test_model_from_market() {
        let market = CreditMarketParams::new(0.02, 0.01, 0.4).unwrap();
        let model = SurvivalModel::from_market(&market).unwrap();
        assert_relative_eq!(model.hazard(), 0.01 / 0.6);
    }

    proptest! {
        #[test]
        fn prop_survival_in_unit_interval(t in 0.0f64..100.0, h in 0.0f64..5.0) {
            let s = survival_probability(t, h).unwrap();
            prop_assert!((0.0..=1.0).contains(&s));
        }

        #[test]
        fn prop_survival_decreasing(t in 0.0f64..50.0, dt in 0.01f64..10.0, h in 1e-3f64..2.0) {
            let s1 = survival_probability(t, h).unwrap();
            let s2 = survival_probability(t + dt, h).unwrap();
            prop_assert!(s2 < s1);
        }

        #[test]
        fn prop_default_probability_telescopes(
            a in 0.0f64..10.0,
            d1 in 0.0f64..5.0,
            d2 in 0.0f64..5.0,
            h in 0.0f64..1.0,
        ) {
            let b = a + d1;
            let c = b + d2;
            let whole = default_probability(a, c, h).unwrap();
            let split = default_probability(a, b, h).unwrap() + default_probability(b, c, h).unwrap();
            prop_assert!((whole - split).abs() < 1e-14);
        }
    }
}
