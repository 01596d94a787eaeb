//! # Redform Core
//!
//! Core types, errors and configuration for the Redform credit pricing library.
//!
//! - **Types**: [`BondSpec`], [`CreditMarketParams`], [`MarketParameter`]
//! - **Errors**: [`CreditError`], with `InvalidParameter` as the single
//!   validation failure
//! - **Rates**: continuous/periodic compounding conversions
//! - **Config**: finite-difference step policy, solver settings and
//!   parallelism thresholds, all serde-loadable
//!
//! ## Example
//!
//! ```rust
//! use redform_core::prelude::*;
//!
//! let bond = BondSpec::annual(100.0, 0.05, 3).unwrap();
//! let market = CreditMarketParams::new(0.02, 0.01, 0.4).unwrap();
//!
//! assert_eq!(bond.payment_times(), &[1.0, 2.0, 3.0]);
//! assert!(market.with_parameter(MarketParameter::RecoveryRate, 1.0).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

pub mod config;
pub mod error;
pub mod rates;
pub mod types;

pub use config::{
    AnalyticsConfig, ConfigError, ConfigResult, SensitivityConfig, SolverSettings, Validate,
    ValidationError,
};
pub use error::{CreditError, CreditResult};
pub use types::{BondSpec, CreditMarketParams, MarketParameter};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{AnalyticsConfig, SensitivityConfig, SolverSettings, Validate};
    pub use crate::error::{CreditError, CreditResult};
    pub use crate::rates::{continuous_to_discrete, discrete_to_continuous};
    pub use crate::types::{BondSpec, CreditMarketParams, MarketParameter};
}
