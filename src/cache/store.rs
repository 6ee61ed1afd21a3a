use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use super::source::{ReferenceSource, SourceError};
use crate::config::ResolverConfig;
use crate::core::{TaxRate, resolve_tax_rate};
use crate::currency::{
    AmountInput, Currency, FALLBACK_CURRENCY, ResolvedCurrency, format_resolved,
    resolve_currency_with,
};

/// The four independently refreshed datasets kept per organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Currencies,
    DefaultCurrency,
    TaxRates,
    DefaultTaxRate,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Currencies => "currencies",
            Self::DefaultCurrency => "default_currency",
            Self::TaxRates => "tax_rates",
            Self::DefaultTaxRate => "default_tax_rate",
        })
    }
}

/// A cached value and the version of the refresh that produced it.
/// Version 0 means never loaded.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    pub version: u64,
    pub value: Arc<T>,
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self {
            version: 0,
            value: Arc::new(T::default()),
        }
    }
}

impl<T> Slot<T> {
    pub fn is_loaded(&self) -> bool {
        self.version > 0
    }
}

/// Everything cached for one organization. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct OrgSnapshot {
    pub currencies: Slot<Vec<Currency>>,
    pub default_currency: Slot<Option<Currency>>,
    pub tax_rates: Slot<Vec<TaxRate>>,
    pub default_tax_rate: Slot<Option<TaxRate>>,
}

/// Outcome of one [`ReferenceCache::refresh`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Version stamp this refresh wrote with.
    pub version: u64,
    /// Datasets replaced by this refresh.
    pub updated: Vec<Dataset>,
    /// Datasets whose fetch failed; the previous value was kept.
    pub failed: Vec<(Dataset, SourceError)>,
    /// Datasets already replaced by a newer refresh; this result was dropped.
    pub stale: Vec<Dataset>,
}

/// Process-wide cache of per-organization currency and tax-rate data.
///
/// Reads never block on a fetch: they see whatever the last applied refresh
/// stored. Each dataset is replaced whole. Every refresh takes a monotonic
/// version when it starts, and a result is only stored if no refresh that
/// started later has already stored that dataset.
#[derive(Debug)]
pub struct ReferenceCache {
    orgs: RwLock<HashMap<String, OrgSnapshot>>,
    next_version: AtomicU64,
    fallback_currency: String,
}

impl Default for ReferenceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::with_fallback(FALLBACK_CURRENCY)
    }

    pub fn with_fallback(fallback_currency: impl Into<String>) -> Self {
        Self {
            orgs: RwLock::new(HashMap::new()),
            next_version: AtomicU64::new(1),
            fallback_currency: fallback_currency.into(),
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::with_fallback(config.fallback_currency.clone())
    }

    pub fn fallback_currency(&self) -> &str {
        &self.fallback_currency
    }

    /// Current snapshot for `org`; empty if never loaded.
    pub fn snapshot(&self, org: &str) -> OrgSnapshot {
        self.orgs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(org)
            .cloned()
            .unwrap_or_default()
    }

    fn take_version(&self) -> u64 {
        self.next_version.fetch_add(1, Ordering::SeqCst)
    }

    /// Store `value` into the slot picked by `select` unless a newer version
    /// is already there. Returns whether it was stored.
    fn store<T>(
        &self,
        org: &str,
        version: u64,
        select: impl FnOnce(&mut OrgSnapshot) -> &mut Slot<T>,
        value: T,
    ) -> bool {
        let mut orgs = self.orgs.write().unwrap_or_else(PoisonError::into_inner);
        let slot = select(orgs.entry(org.to_string()).or_default());
        if version <= slot.version {
            return false;
        }
        *slot = Slot {
            version,
            value: Arc::new(value),
        };
        true
    }

    /// Replace the currency list directly, e.g. when seeding from local storage.
    pub fn set_currencies(&self, org: &str, currencies: Vec<Currency>) {
        let version = self.take_version();
        self.store(org, version, |s| &mut s.currencies, currencies);
    }

    pub fn set_default_currency(&self, org: &str, currency: Option<Currency>) {
        let version = self.take_version();
        self.store(org, version, |s| &mut s.default_currency, currency);
    }

    pub fn set_tax_rates(&self, org: &str, rates: Vec<TaxRate>) {
        let version = self.take_version();
        self.store(org, version, |s| &mut s.tax_rates, rates);
    }

    pub fn set_default_tax_rate(&self, org: &str, rate: Option<TaxRate>) {
        let version = self.take_version();
        self.store(org, version, |s| &mut s.default_tax_rate, rate);
    }

    /// Drop everything cached for `org`, e.g. when leaving an organization.
    pub fn evict(&self, org: &str) {
        self.orgs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(org);
    }

    /// Fetch all four datasets for `org` concurrently and store each one
    /// that succeeds. Failures are logged and leave the previous value.
    pub async fn refresh<S>(&self, org: &str, source: &S) -> RefreshReport
    where
        S: ReferenceSource + ?Sized,
    {
        let version = self.take_version();
        let (currencies, default_currency, tax_rates, default_tax_rate) = tokio::join!(
            source.currencies(org),
            source.default_currency(org),
            source.tax_rates(org),
            source.default_tax_rate(org),
        );

        let mut report = RefreshReport {
            version,
            ..RefreshReport::default()
        };
        self.apply(
            org,
            version,
            Dataset::Currencies,
            currencies,
            |s| &mut s.currencies,
            &mut report,
        );
        self.apply(
            org,
            version,
            Dataset::DefaultCurrency,
            default_currency,
            |s| &mut s.default_currency,
            &mut report,
        );
        self.apply(
            org,
            version,
            Dataset::TaxRates,
            tax_rates,
            |s| &mut s.tax_rates,
            &mut report,
        );
        self.apply(
            org,
            version,
            Dataset::DefaultTaxRate,
            default_tax_rate,
            |s| &mut s.default_tax_rate,
            &mut report,
        );

        debug!(
            org,
            version,
            updated = report.updated.len(),
            failed = report.failed.len(),
            stale = report.stale.len(),
            "reference data refresh finished"
        );
        report
    }

    fn apply<T>(
        &self,
        org: &str,
        version: u64,
        dataset: Dataset,
        fetched: Result<T, SourceError>,
        select: impl FnOnce(&mut OrgSnapshot) -> &mut Slot<T>,
        report: &mut RefreshReport,
    ) {
        match fetched {
            Ok(value) => {
                if self.store(org, version, select, value) {
                    report.updated.push(dataset);
                } else {
                    debug!(org, version, %dataset, "dropping stale refresh result");
                    report.stale.push(dataset);
                }
            }
            Err(e) => {
                warn!(
                    org,
                    %dataset,
                    error = %e,
                    "reference data refresh failed, keeping previous snapshot"
                );
                report.failed.push((dataset, e));
            }
        }
    }

    /// Resolve the active currency code for `org`.
    ///
    /// Order: `explicit`, the default in the cached currency list, the cached
    /// default currency, then the configured fallback.
    pub fn resolve_currency(&self, org: &str, explicit: Option<&str>) -> String {
        let snapshot = self.snapshot(org);
        resolve_currency_with(
            explicit,
            &snapshot.currencies.value,
            (*snapshot.default_currency.value).as_ref(),
            &self.fallback_currency,
        )
    }

    /// The organization's default currency with locale and digits.
    pub fn resolve_default_currency(&self, org: &str) -> ResolvedCurrency {
        ResolvedCurrency::from_code(&self.resolve_currency(org, None))
    }

    /// Render `amount` in `code`, or in the organization's currency when
    /// `code` is absent or empty.
    pub fn format_for(
        &self,
        org: &str,
        amount: impl Into<AmountInput>,
        code: Option<&str>,
    ) -> String {
        let resolved = ResolvedCurrency::from_code(&self.resolve_currency(org, code));
        format_resolved(amount, &resolved)
    }

    /// Pick the tax rate for `org`: `explicit_id`, the list default, then the
    /// cached default. `None` means untaxed.
    pub fn resolve_tax_rate(&self, org: &str, explicit_id: Option<&str>) -> Option<TaxRate> {
        let snapshot = self.snapshot(org);
        resolve_tax_rate(
            explicit_id,
            &snapshot.tax_rates.value,
            (*snapshot.default_tax_rate.value).as_ref(),
        )
        .cloned()
    }
}
