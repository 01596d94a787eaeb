//! Constant market and credit inputs.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, CreditError, CreditResult};
use crate::types::MarketParameter;

/// Flat risk-free rate, credit spread and recovery rate.
///
/// - `risk_free_rate`: continuously compounded, may be negative
/// - `credit_spread`: `>= 0`; zero is the riskless limit (hazard rate 0)
/// - `recovery_rate`: in `[0, 1)`; full recovery is rejected because the
///   hazard rate `spread / (1 - recovery)` is undefined there
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CreditMarketFields")]
pub struct CreditMarketParams {
    risk_free_rate: f64,
    credit_spread: f64,
    recovery_rate: f64,
}

#[derive(Deserialize)]
struct CreditMarketFields {
    risk_free_rate: f64,
    credit_spread: f64,
    recovery_rate: f64,
}

impl TryFrom<CreditMarketFields> for CreditMarketParams {
    type Error = CreditError;

    fn try_from(fields: CreditMarketFields) -> CreditResult<Self> {
        Self::new(
            fields.risk_free_rate,
            fields.credit_spread,
            fields.recovery_rate,
        )
    }
}

impl CreditMarketParams {
    /// Creates validated market parameters.
    pub fn new(risk_free_rate: f64, credit_spread: f64, recovery_rate: f64) -> CreditResult<Self> {
        ensure_finite("risk_free_rate", risk_free_rate)?;
        validate_spread(credit_spread)?;
        validate_recovery(recovery_rate)?;

        Ok(Self {
            risk_free_rate,
            credit_spread,
            recovery_rate,
        })
    }

    /// Risk-free rate.
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Credit spread.
    pub fn credit_spread(&self) -> f64 {
        self.credit_spread
    }

    /// Recovery rate.
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Value of a market input; `None` for [`MarketParameter::Maturity`].
    pub fn get(&self, parameter: MarketParameter) -> Option<f64> {
        match parameter {
            MarketParameter::RiskFreeRate => Some(self.risk_free_rate),
            MarketParameter::CreditSpread => Some(self.credit_spread),
            MarketParameter::RecoveryRate => Some(self.recovery_rate),
            MarketParameter::Maturity => None,
        }
    }

    /// Copy with one market input replaced, validated like [`Self::new`].
    pub fn with_parameter(&self, parameter: MarketParameter, value: f64) -> CreditResult<Self> {
        match parameter {
            MarketParameter::RiskFreeRate => {
                Self::new(value, self.credit_spread, self.recovery_rate)
            }
            MarketParameter::CreditSpread => {
                Self::new(self.risk_free_rate, value, self.recovery_rate)
            }
            MarketParameter::RecoveryRate => {
                Self::new(self.risk_free_rate, self.credit_spread, value)
            }
            MarketParameter::Maturity => Err(CreditError::invalid_parameter(
                "maturity",
                value,
                "maturity is a bond term, not a market parameter",
            )),
        }
    }
}

fn validate_spread(spread: f64) -> CreditResult<()> {
    ensure_finite("credit_spread", spread)?;
    if spread < 0.0 {
        return Err(CreditError::invalid_parameter(
            "credit_spread",
            spread,
            "must not be negative",
        ));
    }
    Ok(())
}

fn validate_recovery(recovery: f64) -> CreditResult<()> {
    ensure_finite("recovery_rate", recovery)?;
    if !(0.0..1.0).contains(&recovery) {
        return Err(CreditError::invalid_parameter(
            "recovery_rate",
            recovery,
            "must lie in [0, 1)",
        ));
    }
    Ok(())
}
