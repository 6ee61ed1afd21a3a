//! Quote and invoice pricing.
//!
//! Line items and optional labor are aggregated into a subtotal, reduced by
//! a discount (clamped at zero), and taxed on the discounted amount.

mod builder;
mod calculation;
mod error;
mod tax;
mod types;

pub use builder::*;
pub use calculation::*;
pub use error::*;
pub use tax::*;
pub use types::*;
