//! Shocking a single input and choosing a stencil that stays in its domain.

use log::warn;

use redform_core::{BondSpec, CreditError, CreditMarketParams, CreditResult, MarketParameter};
use redform_math::differentiation::DifferencingScheme;

use crate::pricing::price;

/// Current value of `parameter` for this bond and market.
pub(crate) fn base_value(
    bond: &BondSpec,
    market: &CreditMarketParams,
    parameter: MarketParameter,
) -> f64 {
    market.get(parameter).unwrap_or_else(|| bond.maturity())
}

/// Price with `parameter` set to `value`; fails when `value` leaves the
/// parameter's domain.
pub(crate) fn reprice(
    bond: &BondSpec,
    market: &CreditMarketParams,
    parameter: MarketParameter,
    value: f64,
) -> CreditResult<f64> {
    match parameter {
        MarketParameter::Maturity => price(&bond.with_maturity(value)?, market),
        _ => price(bond, &market.with_parameter(parameter, value)?),
    }
}

/// True when the inputs can be rebuilt with `parameter` set to `value`.
fn in_domain(
    bond: &BondSpec,
    market: &CreditMarketParams,
    parameter: MarketParameter,
    value: f64,
) -> bool {
    match parameter {
        MarketParameter::Maturity => bond.with_maturity(value).is_ok(),
        _ => market.with_parameter(parameter, value).is_ok(),
    }
}

/// Picks the stencil to use at `x` with step `h`.
///
/// `reach` is how many steps a one-sided stencil extends from `x`: 1 for a
/// first derivative, 2 for a second. The preferred scheme is kept when all
/// of its points are valid; otherwise the one-sided scheme whose points are
/// valid is used. Fails when neither side is available.
pub(crate) fn select_scheme(
    bond: &BondSpec,
    market: &CreditMarketParams,
    parameter: MarketParameter,
    x: f64,
    h: f64,
    reach: f64,
    preferred: DifferencingScheme,
) -> CreditResult<DifferencingScheme> {
    let valid = |v: f64| in_domain(bond, market, parameter, v);
    let up = valid(x + reach * h);
    let down = valid(x - reach * h);

    let chosen = match preferred {
        DifferencingScheme::Central if valid(x + h) && valid(x - h) => {
            Some(DifferencingScheme::Central)
        }
        DifferencingScheme::Backward if down => Some(DifferencingScheme::Backward),
        _ if up => Some(DifferencingScheme::Forward),
        _ if down => Some(DifferencingScheme::Backward),
        _ => None,
    };

    match chosen {
        Some(scheme) => {
            if scheme != preferred {
                warn!(
                    "{parameter} = {x} is within {h} of its domain edge; using {scheme} instead of {preferred} differences"
                );
            }
            Ok(scheme)
        }
        None => Err(CreditError::invalid_parameter(
            parameter.as_str(),
            h,
            format!("no finite-difference stencil around {x} stays inside the domain"),
        )),
    }
}

/// Checks a user-supplied step for `parameter`.
pub(crate) fn validate_step(parameter: MarketParameter, step: f64) -> CreditResult<f64> {
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(CreditError::invalid_parameter(
            format!("step_sizes[{parameter}]"),
            step,
            "step must be positive and finite",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(spread: f64, recovery: f64) -> (BondSpec, CreditMarketParams) {
        (
            BondSpec::annual(100.0, 0.05, 3).unwrap(),
            CreditMarketParams::new(0.02, spread, recovery).unwrap(),
        )
    }

    #[test]
    fn test_central_when_interior() {
        let (bond, market) = inputs(0.01, 0.4);
        let scheme = select_scheme(
            &bond,
            &market,
            MarketParameter::CreditSpread,
            0.01,
            1e-6,
            1.0,
            DifferencingScheme::Central,
        )
        .unwrap();
        assert_eq!(scheme, DifferencingScheme::Central);
    }

    #[test]
    fn test_forward_at_zero_spread() {
        let (bond, market) = inputs(0.0, 0.4);
        let scheme = select_scheme(
            &bond,
            &market,
            MarketParameter::CreditSpread,
            0.0,
            1e-6,
            1.0,
            DifferencingScheme::Central,
        )
        .unwrap();
        assert_eq!(scheme, DifferencingScheme::Forward);
    }

    #[test]
    fn test_backward_near_full_recovery() {
        let (bond, market) = inputs(0.01, 0.999_999_9);
        let scheme = select_scheme(
            &bond,
            &market,
            MarketParameter::RecoveryRate,
            0.999_999_9,
            1e-6,
            1.0,
            DifferencingScheme::Central,
        )
        .unwrap();
        assert_eq!(scheme, DifferencingScheme::Backward);
    }

    #[test]
    fn test_no_stencil_available() {
        // a step wider than the whole recovery domain on both sides
        let (bond, market) = inputs(0.01, 0.5);
        let err = select_scheme(
            &bond,
            &market,
            MarketParameter::RecoveryRate,
            0.5,
            0.6,
            1.0,
            DifferencingScheme::Central,
        )
        .unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_maturity_domain() {
        let (bond, market) = inputs(0.01, 0.4);
        // previous payment at 2.0, so maturity can move down by less than 1
        let scheme = select_scheme(
            &bond,
            &market,
            MarketParameter::Maturity,
            3.0,
            0.6,
            2.0,
            DifferencingScheme::Central,
        )
        .unwrap();
        assert_eq!(scheme, DifferencingScheme::Central);

        let scheme = select_scheme(
            &bond,
            &market,
            MarketParameter::Maturity,
            3.0,
            1.2,
            1.0,
            DifferencingScheme::Central,
        )
        .unwrap();
        assert_eq!(scheme, DifferencingScheme::Forward);
    }

    #[test]
    fn test_validate_step() {
        assert!(validate_step(MarketParameter::CreditSpread, 1e-5).is_ok());
        assert!(validate_step(MarketParameter::CreditSpread, 0.0).is_err());
        assert!(validate_step(MarketParameter::CreditSpread, -1e-5).is_err());
        assert!(validate_step(MarketParameter::CreditSpread, f64::NAN).is_err());
    }
}
