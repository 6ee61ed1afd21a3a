//! Forward and reverse tax computation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PricingError;
use super::types::{TaxRate, validate_rate};

/// A net / tax / gross split of one amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSplit {
    /// Amount before tax.
    pub net: Decimal,
    /// Tax portion.
    pub tax: Decimal,
    /// `net + tax`.
    pub gross: Decimal,
}

impl TaxSplit {
    /// Add tax on top of a net amount.
    pub fn from_net(net: Decimal, rate: Option<Decimal>) -> Result<Self, PricingError> {
        let tax = forward_tax(net, rate)?;
        Ok(Self {
            net,
            tax,
            gross: forward_total(net, rate)?,
        })
    }

    /// Split an already tax-inclusive total into net and tax.
    pub fn from_gross(gross: Decimal, rate: Option<Decimal>) -> Result<Self, PricingError> {
        let tax = reverse_tax(gross, rate)?;
        Ok(Self {
            net: gross - tax,
            tax,
            gross,
        })
    }
}

/// Tax owed on `amount` (already discounted) at `rate` in `[0, 1]`.
///
/// `None` means untaxed and yields zero.
pub fn forward_tax(amount: Decimal, rate: Option<Decimal>) -> Result<Decimal, PricingError> {
    match rate {
        None => Ok(Decimal::ZERO),
        Some(rate) => Ok(amount * validate_rate(rate)?),
    }
}

/// `amount` plus its forward tax.
pub fn forward_total(amount: Decimal, rate: Option<Decimal>) -> Result<Decimal, PricingError> {
    amount
        .checked_add(forward_tax(amount, rate)?)
        .ok_or_else(|| PricingError::out_of_range("taxed total"))
}

/// Tax portion embedded in a tax-inclusive `total`: `total - total / (1 + rate)`.
///
/// `None` means untaxed and yields zero.
pub fn reverse_tax(total: Decimal, rate: Option<Decimal>) -> Result<Decimal, PricingError> {
    match rate {
        None => Ok(Decimal::ZERO),
        Some(rate) => {
            let rate = validate_rate(rate)?;
            let net = total
                .checked_div(Decimal::ONE + rate)
                .ok_or_else(|| PricingError::InvalidTaxRate(format!("cannot divide by 1 + {rate}")))?;
            Ok(total - net)
        }
    }
}

/// Pick the tax rate to apply, first match wins:
///
/// 1. the rate whose `id` equals `explicit_id`, when given and present in `rates`
/// 2. the rate in `rates` flagged `is_default`
/// 3. `cached_default`
///
/// Returns `None` when nothing matches, meaning the quote is untaxed.
pub fn resolve_tax_rate<'a>(
    explicit_id: Option<&str>,
    rates: &'a [TaxRate],
    cached_default: Option<&'a TaxRate>,
) -> Option<&'a TaxRate> {
    let explicit = explicit_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .and_then(|id| rates.iter().find(|r| r.id == id));

    explicit
        .or_else(|| rates.iter().find(|r| r.is_default))
        .or(cached_default)
}
