use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use thiserror::Error;

use crate::core::TaxRate;
use crate::currency::Currency;

/// Failure fetching reference data from a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// Connection, timeout, or transport error.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with an error status.
    #[error("API error: {0}")]
    Api(String),

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The source cannot be used as configured.
    #[error("invalid source: {0}")]
    Invalid(String),
}

/// Where organization-scoped currency and tax-rate reference data comes from.
///
/// Each method fetches one dataset as a whole; the cache replaces its copy
/// of that dataset atomically with whatever is returned.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    async fn currencies(&self, org: &str) -> Result<Vec<Currency>, SourceError>;

    /// The separately stored default currency, if the organization has one.
    async fn default_currency(&self, org: &str) -> Result<Option<Currency>, SourceError>;

    async fn tax_rates(&self, org: &str) -> Result<Vec<TaxRate>, SourceError>;

    /// The separately stored default tax rate, if the organization has one.
    async fn default_tax_rate(&self, org: &str) -> Result<Option<TaxRate>, SourceError>;
}

/// Reference data held for one organization by [`StaticSource`].
#[derive(Debug, Clone, Default)]
pub struct OrgData {
    pub currencies: Vec<Currency>,
    pub default_currency: Option<Currency>,
    pub tax_rates: Vec<TaxRate>,
    pub default_tax_rate: Option<TaxRate>,
}

/// In-memory [`ReferenceSource`], for seeding from local storage and for
/// offline use. Unknown organizations yield empty data.
#[derive(Debug, Default)]
pub struct StaticSource {
    orgs: Mutex<HashMap<String, OrgData>>,
    failing: Mutex<Option<SourceError>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org(self, org: impl Into<String>, data: OrgData) -> Self {
        self.set(org, data);
        self
    }

    /// Replace the data served for `org`.
    pub fn set(&self, org: impl Into<String>, data: OrgData) {
        self.orgs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(org.into(), data);
    }

    /// Make every fetch fail with `error` until cleared with `None`.
    pub fn fail_with(&self, error: Option<SourceError>) {
        *self.failing.lock().unwrap_or_else(PoisonError::into_inner) = error;
    }

    fn read<T>(&self, org: &str, pick: impl FnOnce(&OrgData) -> T) -> Result<T, SourceError>
    where
        T: Default,
    {
        if let Some(err) = self
            .failing
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(err);
        }
        let orgs = self.orgs.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(orgs.get(org).map(pick).unwrap_or_default())
    }
}

#[async_trait]
impl ReferenceSource for StaticSource {
    async fn currencies(&self, org: &str) -> Result<Vec<Currency>, SourceError> {
        self.read(org, |d| d.currencies.clone())
    }

    async fn default_currency(&self, org: &str) -> Result<Option<Currency>, SourceError> {
        self.read(org, |d| d.default_currency.clone())
    }

    async fn tax_rates(&self, org: &str) -> Result<Vec<TaxRate>, SourceError> {
        self.read(org, |d| d.tax_rates.clone())
    }

    async fn default_tax_rate(&self, org: &str) -> Result<Option<TaxRate>, SourceError> {
        self.read(org, |d| d.default_tax_rate.clone())
    }
}
