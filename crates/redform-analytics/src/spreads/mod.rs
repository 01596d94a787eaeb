//! Spread analytics.

mod implied;

pub use implied::{implied_credit_spread, ImpliedSpread};
