//! Configuration for sensitivities, solvers and batch evaluation.
//!
//! Every config has serde defaults for each field, so a partial JSON
//! document such as `{"relative_step": 1e-5}` is a complete configuration.

mod error;
mod settings;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use settings::{AnalyticsConfig, SensitivityConfig, SolverSettings};
