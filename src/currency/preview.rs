//! Currency previews for the settings screen.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::currencies::fallback_symbol;
use super::format::format_resolved;
use super::resolve::{Currency, ResolvedCurrency};

/// Amount rendered when no sample is given.
pub const DEFAULT_PREVIEW_AMOUNT: Decimal = dec!(1234.56);

/// How a currency will look once selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPreview {
    /// Code as stored, possibly tenant-scoped.
    pub code: String,
    #[serde(flatten)]
    pub resolved: ResolvedCurrency,
    /// Symbol from the record, or the fallback table when the record has none.
    pub symbol: String,
    /// The sample amount, formatted.
    pub sample: String,
}

/// Preview a single currency code.
pub fn preview_currency(code: &str, sample: Decimal) -> CurrencyPreview {
    let resolved = ResolvedCurrency::from_code(code);
    CurrencyPreview {
        code: code.to_string(),
        symbol: fallback_symbol(&resolved.normalized_code).to_string(),
        sample: format_resolved(sample, &resolved),
        resolved,
    }
}

/// Preview every currency in an organization's list, in list order.
pub fn preview_currencies(currencies: &[Currency], sample: Decimal) -> Vec<CurrencyPreview> {
    currencies
        .iter()
        .map(|c| {
            let mut preview = preview_currency(&c.code, sample);
            if !c.symbol.trim().is_empty() {
                preview.symbol = c.symbol.clone();
            }
            preview
        })
        .collect()
}
