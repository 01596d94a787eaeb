//! # Redform Analytics
//!
//! Pricing and sensitivities for fixed-coupon bonds under a constant-intensity
//! reduced-form default model.
//!
//! - **Survival**: hazard rate from spread and recovery, survival
//!   probabilities, default densities, closed-form default integrals
//! - **Pricing**: survival-weighted cash flows plus expected recovery, both
//!   in closed form; continuous-coupon and yield-based closed forms
//! - **Risk**: finite-difference sensitivities to any market input,
//!   CR01/IR01 and their gammas
//! - **Spreads**: the credit spread implied by a market price
//!
//! ## Architecture
//!
//! Everything is a pure function of immutable inputs. Sensitivities call
//! [`price`] at shocked inputs, one independent call per shocked point, so
//! the same inputs always give bit-identical outputs and any function here
//! may be called concurrently. Batched entry points spread work over rayon
//! when the `parallel` feature is enabled.
//!
//! ## Usage
//!
//! ```rust
//! use redform_analytics::prelude::*;
//!
//! let bond = BondSpec::annual(100.0, 0.05, 3)?;
//! let market = CreditMarketParams::new(0.02, 0.01, 0.4)?;
//!
//! let value = price(&bond, &market)?;
//! let risk = sensitivities(&bond, &market, &MarketParameter::MARKET, None)?;
//!
//! assert!(value < 100.0 * (1.0 + 0.05 * 3.0));
//! assert!(risk.derivative(MarketParameter::CreditSpread).unwrap() < 0.0);
//! # Ok::<(), CreditError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod parallel;
pub mod pricing;
pub mod risk;
pub mod spreads;
pub mod survival;

pub use redform_core::{BondSpec, CreditError, CreditMarketParams, CreditResult, MarketParameter};

pub use pricing::{price, price_detailed, BondPricer, PricingResult};
pub use risk::{sensitivities, SensitivityResult};
pub use survival::{hazard_rate, survival_probability};

/// Prelude module for convenient imports.
///
/// ```rust
/// use redform_analytics::prelude::*;
/// ```
pub mod prelude {
    pub use redform_core::prelude::*;
    pub use redform_math::differentiation::DifferencingScheme;

    // Survival
    pub use crate::survival::{
        default_density, default_probability, discounted_default_integral, hazard_rate,
        survival_probabilities, survival_probabilities_paired, survival_probability,
        SurvivalModel,
    };

    // Pricing
    pub use crate::pricing::{
        continuous_coupon_price, price, price_across_markets, price_batch, price_detailed,
        price_from_yield, BondPricer, CashFlowDiagnostics, PricingResult, YieldPriceResult,
    };

    // Risk
    pub use crate::risk::{
        cr01, cr_gamma, ir01, ir_gamma, sensitivities, SensitivityCalculator, SensitivityEntry,
        SensitivityResult, StepSource,
    };

    // Spreads
    pub use crate::spreads::{implied_credit_spread, ImpliedSpread};
}
