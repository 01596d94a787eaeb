//! Basis-point risk measures: CR01, IR01 and their gammas.
//!
//! ```text
//! CR01     = dP/ds   * bp        IR01     = dP/dr   * bp
//! CR gamma = d²P/ds² * bp²       IR gamma = d²P/dr² * bp²
//! ```
//!
//! with the derivatives taken by bumping the input one basis point. CR01 and
//! IR01 keep their sign, so both are negative for an ordinary bond. A gamma
//! is the change in the corresponding 01 for a further one basis point move.
//!
//! Gammas are in the bond's notional units, scaled by `bp²`. A per-unit
//! notional `d²P/ds² / 1e4` convention equals `cr_gamma * 1e4 / notional`.

use log::debug;

use redform_core::{BondSpec, CreditMarketParams, CreditResult, MarketParameter, SensitivityConfig};
use redform_math::differentiation::{derivative, second_derivative};

use super::bump::{base_value, reprice, select_scheme, validate_step};
use super::SensitivityCalculator;

/// Price change for a one basis point rise in the credit spread.
///
/// # Example
///
/// ```rust
/// use redform_analytics::prelude::*;
///
/// let bond = BondSpec::annual(100.0, 0.05, 5).unwrap();
/// let market = CreditMarketParams::new(0.03, 0.015, 0.4).unwrap();
///
/// let value = cr01(&bond, &market, &SensitivityConfig::default()).unwrap();
/// assert!(value < 0.0 && value > -0.1);
/// ```
pub fn cr01(
    bond: &BondSpec,
    market: &CreditMarketParams,
    config: &SensitivityConfig,
) -> CreditResult<f64> {
    basis_point_delta(bond, market, MarketParameter::CreditSpread, config)
}

/// Price change for a one basis point rise in the risk-free rate.
pub fn ir01(
    bond: &BondSpec,
    market: &CreditMarketParams,
    config: &SensitivityConfig,
) -> CreditResult<f64> {
    basis_point_delta(bond, market, MarketParameter::RiskFreeRate, config)
}

/// Change in CR01 for a one basis point rise in the credit spread.
pub fn cr_gamma(
    bond: &BondSpec,
    market: &CreditMarketParams,
    config: &SensitivityConfig,
) -> CreditResult<f64> {
    basis_point_gamma(bond, market, MarketParameter::CreditSpread, config)
}

/// Change in IR01 for a one basis point rise in the risk-free rate.
pub fn ir_gamma(
    bond: &BondSpec,
    market: &CreditMarketParams,
    config: &SensitivityConfig,
) -> CreditResult<f64> {
    basis_point_gamma(bond, market, MarketParameter::RiskFreeRate, config)
}

fn basis_point_delta(
    bond: &BondSpec,
    market: &CreditMarketParams,
    parameter: MarketParameter,
    config: &SensitivityConfig,
) -> CreditResult<f64> {
    let bp = validate_step(parameter, config.basis_point)?;
    let x = base_value(bond, market, parameter);
    let scheme = select_scheme(bond, market, parameter, x, bp, 1.0, config.scheme)?;

    let slope = derivative(|v| reprice(bond, market, parameter, v), x, bp, scheme)?;
    debug!("{parameter} basis-point delta at {x}: {} ({scheme})", slope * bp);
    Ok(slope * bp)
}

fn basis_point_gamma(
    bond: &BondSpec,
    market: &CreditMarketParams,
    parameter: MarketParameter,
    config: &SensitivityConfig,
) -> CreditResult<f64> {
    let bp = validate_step(parameter, config.basis_point)?;
    let x = base_value(bond, market, parameter);
    let scheme = select_scheme(bond, market, parameter, x, bp, 2.0, config.scheme)?;

    let curvature = second_derivative(|v| reprice(bond, market, parameter, v), x, bp, scheme)?;
    debug!("{parameter} gamma at {x}: {} ({scheme})", curvature * bp * bp);
    Ok(curvature * bp * bp)
}

impl SensitivityCalculator {
    /// See [`cr01`].
    pub fn cr01(&self, bond: &BondSpec, market: &CreditMarketParams) -> CreditResult<f64> {
        cr01(bond, market, self.config())
    }

    /// See [`ir01`].
    pub fn ir01(&self, bond: &BondSpec, market: &CreditMarketParams) -> CreditResult<f64> {
        ir01(bond, market, self.config())
    }

    /// See [`cr_gamma`].
    pub fn cr_gamma(&self, bond: &BondSpec, market: &CreditMarketParams) -> CreditResult<f64> {
        cr_gamma(bond, market, self.config())
    }

    /// See [`ir_gamma`].
    pub fn ir_gamma(&self, bond: &BondSpec, market: &CreditMarketParams) -> CreditResult<f64> {
        ir_gamma(bond, market, self.config())
    }
}
