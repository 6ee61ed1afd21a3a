//! # pricebook
//!
//! Quote pricing and currency display for multi-organization storefronts:
//! line-item aggregation, labor, discounts, forward and reverse tax, plus
//! tenant-scoped currency resolution and locale-aware formatting.
//!
//! All monetary values use [`rust_decimal::Decimal`]. Amounts stay exact
//! through the pipeline; rounding happens only at display time or through
//! [`PricingResult::rounded`].
//!
//! ## Quick Start
//!
//! ```rust
//! use pricebook::core::*;
//! use pricebook::currency::format_currency;
//! use rust_decimal_macros::dec;
//!
//! let input = PricingInputBuilder::new()
//!     .add_item(LineItem::part(2, dec!(25)).unwrap())
//!     .add_item(LineItem::service(1, dec!(40)).unwrap())
//!     .tax_rate(TaxRate::new("ca", "US", "Sales tax", dec!(0.07)).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let result = compute_quote_totals(&input).unwrap();
//! assert_eq!(result.subtotal, dec!(90));
//! assert_eq!(result.total, dec!(96.30));
//! assert_eq!(format_currency(result.total, Some("EUR_3")), "96,30\u{a0}€");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Line items, discounts, tax, quote totals |
//! | `currency` (default) | Code normalization, resolution, locale formatting |
//! | `cache` | Per-organization reference cache and background refresher |
//! | `http` | REST [`ReferenceSource`](cache::ReferenceSource) over `reqwest` |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "currency")]
pub mod currency;

#[cfg(feature = "cache")]
pub mod cache;

pub mod config;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
