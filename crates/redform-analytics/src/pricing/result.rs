//! Pricing result types.

use serde::{Deserialize, Serialize};

/// Valuation detail for one scheduled cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowDiagnostics {
    /// Payment time in years.
    pub time: f64,
    /// Scheduled amount (coupon, plus principal on the last payment).
    pub amount: f64,
    /// Risk-free discount factor `exp(-r t)`.
    pub discount_factor: f64,
    /// Survival probability to the payment time.
    pub survival_probability: f64,
    /// `amount * discount_factor * survival_probability`.
    pub present_value: f64,
}

/// Result of pricing a bond, with its decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Full present value: survival leg plus recovery leg.
    pub present_value: f64,
    /// Present value of scheduled cash flows paid on survival.
    pub survival_leg: f64,
    /// Present value of the recovery paid on default before maturity.
    pub recovery_leg: f64,
    /// Hazard rate used.
    pub hazard_rate: f64,
    /// Per cash-flow breakdown of the survival leg, in payment order.
    pub cash_flows: Vec<CashFlowDiagnostics>,
}

impl PricingResult {
    /// Present value per unit notional, as a percentage of par.
    #[must_use]
    pub fn price_percent(&self, notional: f64) -> f64 {
        self.present_value / notional * 100.0
    }

    /// Survival probabilities at each payment time.
    #[must_use]
    pub fn survival_probabilities(&self) -> Vec<f64> {
        self.cash_flows
            .iter()
            .map(|cf| cf.survival_probability)
            .collect()
    }

    /// Probability of default before the final payment.
    #[must_use]
    pub fn default_probability_to_maturity(&self) -> f64 {
        self.cash_flows
            .last()
            .map_or(0.0, |cf| 1.0 - cf.survival_probability)
    }
}
