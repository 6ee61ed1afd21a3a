//! Organization-scoped reference data cache.
//!
//! [`ReferenceCache`] holds the currency list, default currency, tax-rate
//! list, and default tax rate for each organization. Data is fetched through
//! a [`ReferenceSource`]; [`spawn_refresher`] keeps it current in the
//! background.

#[cfg(feature = "http")]
mod http;
mod refresher;
mod source;
mod store;

#[cfg(feature = "http")]
pub use http::HttpReferenceSource;
pub use refresher::{RefresherHandle, spawn_refresher};
pub use source::{OrgData, ReferenceSource, SourceError, StaticSource};
pub use store::{Dataset, OrgSnapshot, ReferenceCache, RefreshReport, Slot};
