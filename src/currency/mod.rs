//! Currency resolution and display.
//!
//! Tenant-scoped codes ("USD_3", "EUR_CORE") are normalized to ISO codes,
//! the active currency is resolved from several sources in a fixed order,
//! and amounts are rendered with per-currency locale and rounding rules.

mod currencies;
mod format;
mod locale;
mod preview;
mod resolve;

pub use currencies::{fallback_symbol, is_known_currency_code, minor_unit_digits};
pub use format::*;
pub use locale::Locale;
pub use preview::*;
pub use resolve::*;
