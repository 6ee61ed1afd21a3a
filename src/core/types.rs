use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// Whether a line item is a physical part or a rendered service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Part,
    Service,
}

impl ItemType {
    /// Wire value used by the backend ("part" / "service").
    pub fn code(&self) -> &'static str {
        match self {
            Self::Part => "part",
            Self::Service => "service",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "part" => Some(Self::Part),
            "service" => Some(Self::Service),
            _ => None,
        }
    }
}

/// A quantity × unit-price record on a quote or repair.
///
/// Fields are private so a `LineItem` can only exist with a non-negative
/// quantity and unit price. Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLineItem", rename_all = "camelCase")]
pub struct LineItem {
    quantity: u32,
    unit_price: Decimal,
    item_type: ItemType,
}

impl LineItem {
    /// Create a line item, rejecting negative quantities or prices.
    pub fn new(
        quantity: i64,
        unit_price: Decimal,
        item_type: ItemType,
    ) -> Result<Self, PricingError> {
        if quantity < 0 {
            return Err(PricingError::line(
                None,
                format!("quantity must not be negative (got {quantity})"),
            ));
        }
        let quantity = u32::try_from(quantity).map_err(|_| {
            PricingError::line(None, format!("quantity {quantity} is out of range"))
        })?;
        if unit_price < Decimal::ZERO {
            return Err(PricingError::line(
                None,
                format!("unit price must not be negative (got {unit_price})"),
            ));
        }
        if Decimal::from(quantity).checked_mul(unit_price).is_none() {
            return Err(PricingError::line(None, "line total is out of range"));
        }
        Ok(Self {
            quantity,
            unit_price,
            item_type,
        })
    }

    pub fn part(quantity: i64, unit_price: Decimal) -> Result<Self, PricingError> {
        Self::new(quantity, unit_price, ItemType::Part)
    }

    pub fn service(quantity: i64, unit_price: Decimal) -> Result<Self, PricingError> {
        Self::new(quantity, unit_price, ItemType::Service)
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    /// quantity × unit price.
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Line item as it arrives from a form or the REST backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLineItem {
    quantity: Option<i64>,
    unit_price: Option<Decimal>,
    item_type: Option<ItemType>,
}

impl TryFrom<RawLineItem> for LineItem {
    type Error = PricingError;

    fn try_from(raw: RawLineItem) -> Result<Self, Self::Error> {
        let quantity = raw
            .quantity
            .ok_or_else(|| PricingError::line(None, "quantity is missing"))?;
        let unit_price = raw
            .unit_price
            .ok_or_else(|| PricingError::line(None, "unit price is missing"))?;
        let item_type = raw
            .item_type
            .ok_or_else(|| PricingError::line(None, "item type is missing"))?;
        LineItem::new(quantity, unit_price, item_type)
    }
}

/// How a discount reduces the pre-discount amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Fixed amount in the quote currency.
    Amount,
    /// Percentage, 0–100.
    Percentage,
}

/// A validated discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Discount {
    #[default]
    None,
    /// Subtract a fixed amount.
    Amount(Decimal),
    /// Subtract a percentage (0–100) of the amount.
    Percentage(Decimal),
}

impl Discount {
    /// Fixed-amount discount. Rejects negative values.
    pub fn amount(value: Decimal) -> Result<Self, PricingError> {
        if value < Decimal::ZERO {
            return Err(PricingError::InvalidDiscount(format!(
                "discount must not be negative (got {value})"
            )));
        }
        Ok(Self::Amount(value))
    }

    /// Percentage discount, expressed 0–100.
    pub fn percentage(value: Decimal) -> Result<Self, PricingError> {
        if value < Decimal::ZERO {
            return Err(PricingError::InvalidDiscount(format!(
                "discount must not be negative (got {value})"
            )));
        }
        if value > Decimal::ONE_HUNDRED {
            return Err(PricingError::InvalidDiscount(format!(
                "percentage discount must not exceed 100 (got {value})"
            )));
        }
        Ok(Self::Percentage(value))
    }

    /// Build from the flat `{discount, discountType}` pair used by forms.
    pub fn from_parts(value: Decimal, kind: DiscountType) -> Result<Self, PricingError> {
        match kind {
            DiscountType::Amount => Self::amount(value),
            DiscountType::Percentage => Self::percentage(value),
        }
    }

    pub fn kind(&self) -> Option<DiscountType> {
        match self {
            Self::None => None,
            Self::Amount(_) => Some(DiscountType::Amount),
            Self::Percentage(_) => Some(DiscountType::Percentage),
        }
    }

    /// Nominal value as entered (amount or percent).
    pub fn value(&self) -> Decimal {
        match self {
            Self::None => Decimal::ZERO,
            Self::Amount(v) | Self::Percentage(v) => *v,
        }
    }
}

/// A tax rate record for an organization.
///
/// `rate` is always a fraction in `[0, 1]`. Rates expressed in percent must
/// go through [`TaxRate::from_percent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTaxRate", rename_all = "camelCase")]
pub struct TaxRate {
    pub id: String,
    /// ISO 3166-1 alpha-2.
    pub country_code: String,
    pub region_code: Option<String>,
    pub name: String,
    rate: Decimal,
    pub is_default: bool,
}

impl TaxRate {
    /// Create a tax rate from a fraction in `[0, 1]`.
    pub fn new(
        id: impl Into<String>,
        country_code: impl Into<String>,
        name: impl Into<String>,
        rate: Decimal,
    ) -> Result<Self, PricingError> {
        let country_code = country_code.into();
        if country_code.len() != 2 || !country_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PricingError::InvalidTaxRate(format!(
                "country code must be 2 letters (got '{country_code}')"
            )));
        }
        Ok(Self {
            id: id.into(),
            country_code,
            region_code: None,
            name: name.into(),
            rate: validate_rate(rate)?,
            is_default: false,
        })
    }

    /// Create a tax rate from a percentage in `[0, 100]`.
    pub fn from_percent(
        id: impl Into<String>,
        country_code: impl Into<String>,
        name: impl Into<String>,
        percent: Decimal,
    ) -> Result<Self, PricingError> {
        Self::new(id, country_code, name, percent_to_fraction(percent)?)
    }

    pub fn region(mut self, region_code: impl Into<String>) -> Self {
        self.region_code = Some(region_code.into());
        self
    }

    pub fn default_rate(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// The rate as a fraction in `[0, 1]`.
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// The rate in percent, for display.
    pub fn percent(&self) -> Decimal {
        (self.rate * Decimal::ONE_HUNDRED).normalize()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTaxRate {
    id: serde_json::Value,
    country_code: String,
    #[serde(default)]
    region_code: Option<String>,
    name: String,
    rate: Decimal,
    #[serde(default)]
    is_default: bool,
}

impl TryFrom<RawTaxRate> for TaxRate {
    type Error = PricingError;

    fn try_from(raw: RawTaxRate) -> Result<Self, Self::Error> {
        // Backend ids are either numeric or string.
        let id = match raw.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        let mut rate = TaxRate::new(id, raw.country_code, raw.name, raw.rate)?;
        rate.region_code = raw.region_code.filter(|r| !r.trim().is_empty());
        rate.is_default = raw.is_default;
        Ok(rate)
    }
}

/// Check that `rate` is a fraction in `[0, 1]`.
pub fn validate_rate(rate: Decimal) -> Result<Decimal, PricingError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(PricingError::InvalidTaxRate(format!(
            "rate must be within [0, 1] (got {rate})"
        )));
    }
    Ok(rate)
}

/// Convert a 0–100 percentage into a `[0, 1]` fraction.
pub fn percent_to_fraction(percent: Decimal) -> Result<Decimal, PricingError> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(PricingError::InvalidTaxRate(format!(
            "percentage must be within [0, 100] (got {percent})"
        )));
    }
    Ok(percent / Decimal::ONE_HUNDRED)
}

/// Everything needed to price a quote.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawPricingInput")]
pub struct PricingInput {
    pub items: Vec<LineItem>,
    pub include_labor: bool,
    labor_cost: Decimal,
    pub discount: Discount,
    pub tax_rate: Option<TaxRate>,
}

impl PricingInput {
    pub fn new(items: Vec<LineItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn labor_cost(&self) -> Decimal {
        self.labor_cost
    }

    /// Set the labor cost. Rejects negative values.
    pub fn set_labor_cost(&mut self, cost: Decimal) -> Result<(), PricingError> {
        if cost < Decimal::ZERO {
            return Err(PricingError::InvalidLaborCost(format!(
                "labor cost must not be negative (got {cost})"
            )));
        }
        self.labor_cost = cost;
        Ok(())
    }
}

/// Pricing input in the flat shape submitted by the quote form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPricingInput {
    #[serde(default)]
    items: Vec<serde_json::Value>,
    #[serde(default)]
    include_labor: bool,
    #[serde(default)]
    labor_cost: Option<Decimal>,
    #[serde(default)]
    discount: Option<Decimal>,
    #[serde(default)]
    discount_type: Option<DiscountType>,
    #[serde(default)]
    tax_rate: Option<TaxRate>,
}

impl TryFrom<RawPricingInput> for PricingInput {
    type Error = PricingError;

    fn try_from(raw: RawPricingInput) -> Result<Self, Self::Error> {
        let items = raw
            .items
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                serde_json::from_value::<RawLineItem>(value)
                    .map_err(|e| PricingError::line(Some(i), e.to_string()))
                    .and_then(|raw| LineItem::try_from(raw).map_err(|e| e.at_index(i)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let discount = match raw.discount {
            None => Discount::None,
            Some(value) => {
                Discount::from_parts(value, raw.discount_type.unwrap_or(DiscountType::Amount))?
            }
        };

        let mut input = PricingInput {
            items,
            include_labor: raw.include_labor,
            labor_cost: Decimal::ZERO,
            discount,
            tax_rate: raw.tax_rate,
        };
        input.set_labor_cost(raw.labor_cost.unwrap_or_default())?;
        Ok(input)
    }
}

/// Totals shown in the quote/invoice summary panel.
///
/// Invariant: `total = max(0, subtotal + labor_amount - discount_amount) + tax_amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// Line totals, plus labor when labor is included.
    pub subtotal: Decimal,
    /// Labor charged on top of the subtotal (zero when labor is excluded).
    pub labor_amount: Decimal,
    /// Discount actually applied, after clamping.
    pub discount_amount: Decimal,
    /// Tax on the discounted amount.
    pub tax_amount: Decimal,
    pub total: Decimal,
    /// Sum of `part` lines.
    pub parts_total: Decimal,
    /// Sum of `service` lines.
    pub services_total: Decimal,
}

impl PricingResult {
    /// Amount the tax was computed on.
    pub fn taxable_amount(&self) -> Decimal {
        (self.subtotal + self.labor_amount - self.discount_amount).max(Decimal::ZERO)
    }

    /// Round every amount to `minor_digits` places, half away from zero.
    pub fn rounded(&self, minor_digits: u32) -> Self {
        let r = |v: Decimal| round_half_up(v, minor_digits);
        Self {
            subtotal: r(self.subtotal),
            labor_amount: r(self.labor_amount),
            discount_amount: r(self.discount_amount),
            tax_amount: r(self.tax_amount),
            total: r(self.total),
            parts_total: r(self.parts_total),
            services_total: r(self.services_total),
        }
    }
}

/// Round a Decimal to `dp` decimal places using half-up (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
