//! Domain value types.
//!
//! All types are immutable once constructed: every constructor validates,
//! and "modification" returns a new validated value.

mod bond;
mod market;
mod parameter;

pub use bond::BondSpec;
pub use market::CreditMarketParams;
pub use parameter::MarketParameter;
