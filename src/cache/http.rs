//! Backend REST client for organization reference data.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::source::{ReferenceSource, SourceError};
use crate::config::HttpConfig;
use crate::core::TaxRate;
use crate::currency::Currency;

/// [`ReferenceSource`] backed by the organization REST endpoints.
///
/// Responses may be either the bare payload or wrapped as `{"data": ...}`.
/// A 404 on a default endpoint means the organization has no default.
#[derive(Debug, Clone)]
pub struct HttpReferenceSource {
    client: reqwest::Client,
    config: HttpConfig,
    token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(value) => value,
        }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, SourceError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|e| SourceError::Parse(e.to_string()))
}

impl HttpReferenceSource {
    /// # Errors
    ///
    /// Returns `SourceError::Invalid` if the base URL is empty or the HTTP
    /// client cannot be built.
    pub fn new(config: HttpConfig) -> Result<Self, SourceError> {
        if config.base_url.trim().is_empty() {
            return Err(SourceError::Invalid("base_url is empty".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SourceError::Invalid(e.to_string()))?;
        Ok(Self {
            client,
            config,
            token: None,
        })
    }

    /// Send `token` as a bearer credential on every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// GET `path` for `org`. `Ok(None)` when the endpoint answers 404.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        org: &str,
    ) -> Result<Option<T>, SourceError> {
        let url = self.config.url(path, org);
        let mut req = self.client.get(&url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        read_response(status, &body)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        org: &str,
    ) -> Result<Vec<T>, SourceError> {
        let found = self.get_json::<Vec<T>>(path, org).await?;
        require_list(&self.config.url(path, org), found)
    }
}

/// Map a response to its payload. A 404 or an empty or `null` body means
/// there is nothing there; any other non-2xx status is an API error.
fn read_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<Option<T>, SourceError> {
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(SourceError::Api(format!("HTTP {status}: {body}")));
    }
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Ok(None);
    }
    decode(body).map(Some)
}

/// List endpoints must answer with a list.
fn require_list<T>(url: &str, found: Option<Vec<T>>) -> Result<Vec<T>, SourceError> {
    found.ok_or_else(|| SourceError::Api(format!("{url} not found")))
}

#[async_trait]
impl ReferenceSource for HttpReferenceSource {
    async fn currencies(&self, org: &str) -> Result<Vec<Currency>, SourceError> {
        self.get_list(&self.config.currencies_path, org).await
    }

    async fn default_currency(&self, org: &str) -> Result<Option<Currency>, SourceError> {
        self.get_json(&self.config.default_currency_path, org).await
    }

    async fn tax_rates(&self, org: &str) -> Result<Vec<TaxRate>, SourceError> {
        self.get_list(&self.config.tax_rates_path, org).await
    }

    async fn default_tax_rate(&self, org: &str) -> Result<Option<TaxRate>, SourceError> {
        self.get_json(&self.config.default_tax_rate_path, org).await
    }
}
