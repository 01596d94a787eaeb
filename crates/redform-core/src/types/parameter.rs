//! Scalar inputs a price can be differentiated against.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CreditError;

/// A scalar pricing input that can be shocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketParameter {
    /// Continuously compounded risk-free rate.
    RiskFreeRate,
    /// Credit spread (default-intensity proxy).
    CreditSpread,
    /// Recovery rate as a fraction of notional.
    RecoveryRate,
    /// Bond maturity in years; shocking it moves the final payment.
    Maturity,
}

impl MarketParameter {
    /// The three market inputs, in reporting order.
    pub const MARKET: [MarketParameter; 3] = [
        MarketParameter::RiskFreeRate,
        MarketParameter::CreditSpread,
        MarketParameter::RecoveryRate,
    ];

    /// Every shockable input, in reporting order.
    pub const ALL: [MarketParameter; 4] = [
        MarketParameter::RiskFreeRate,
        MarketParameter::CreditSpread,
        MarketParameter::RecoveryRate,
        MarketParameter::Maturity,
    ];

    /// Snake-case name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RiskFreeRate => "risk_free_rate",
            Self::CreditSpread => "credit_spread",
            Self::RecoveryRate => "recovery_rate",
            Self::Maturity => "maturity",
        }
    }
}

impl fmt::Display for MarketParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketParameter {
    type Err = CreditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                CreditError::invalid_parameter(
                    "parameter_name",
                    f64::NAN,
                    format!("unknown parameter '{s}'"),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for param in MarketParameter::ALL {
            assert_eq!(param.as_str().parse::<MarketParameter>().unwrap(), param);
        }
    }

    #[test]
    fn test_unknown_name() {
        let err = "volatility".parse::<MarketParameter>().unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&MarketParameter::CreditSpread).unwrap();
        assert_eq!(json, "\"credit_spread\"");
    }
}
