//! Risk measures for credit-risky bonds.
//!
//! - [`sensitivities`]: derivative of price with respect to any subset of
//!   the rate, spread, recovery and maturity inputs
//! - [`cr01`], [`ir01`]: price change per basis point of spread and rate
//! - [`cr_gamma`], [`ir_gamma`]: their second-order counterparts
//!
//! All measures reprice at shocked inputs with [`price`](crate::pricing::price).

mod basis_point;
mod bump;
mod sensitivities;

pub use basis_point::{cr01, cr_gamma, ir01, ir_gamma};
pub use sensitivities::{
    sensitivities, SensitivityCalculator, SensitivityEntry, SensitivityResult, StepSource,
};
