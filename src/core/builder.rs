use rust_decimal::Decimal;

use super::error::{PricingError, ValidationError};
use super::types::*;

/// Upper bound on line items per quote.
pub const MAX_LINE_ITEMS: usize = 10_000;

/// Builder for [`PricingInput`].
///
/// ```
/// use pricebook::core::*;
/// use rust_decimal_macros::dec;
///
/// let input = PricingInputBuilder::new()
///     .add_item(LineItem::part(1, dec!(89.00)).unwrap())
///     .discount_parts(dec!(5), DiscountType::Amount)
///     .build()
///     .unwrap();
/// assert_eq!(input.discount, Discount::Amount(dec!(5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PricingInputBuilder {
    items: Vec<LineItem>,
    include_labor: bool,
    labor_cost: Decimal,
    discount: Option<(Decimal, DiscountType)>,
    tax_rate: Option<TaxRate>,
}

impl PricingInputBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = LineItem>) -> Self {
        self.items.extend(items);
        self
    }

    /// Include labor at `cost`.
    pub fn labor(mut self, cost: Decimal) -> Self {
        self.include_labor = true;
        self.labor_cost = cost;
        self
    }

    pub fn include_labor(mut self, include: bool) -> Self {
        self.include_labor = include;
        self
    }

    pub fn labor_cost(mut self, cost: Decimal) -> Self {
        self.labor_cost = cost;
        self
    }

    pub fn discount(mut self, discount: Discount) -> Self {
        self.discount = discount.kind().map(|kind| (discount.value(), kind));
        self
    }

    /// Discount from the flat `{discount, discountType}` pair; validated on build.
    pub fn discount_parts(mut self, value: Decimal, kind: DiscountType) -> Self {
        self.discount = Some((value, kind));
        self
    }

    pub fn tax_rate(mut self, rate: TaxRate) -> Self {
        self.tax_rate = Some(rate);
        self
    }

    pub fn tax_rate_opt(mut self, rate: Option<TaxRate>) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Collect every problem with the current state instead of stopping at
    /// the first one.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.items.len() > MAX_LINE_ITEMS {
            errors.push(ValidationError::new(
                "items",
                format!("a quote cannot have more than {MAX_LINE_ITEMS} line items"),
            ));
        }

        if self.labor_cost < Decimal::ZERO {
            errors.push(ValidationError::new(
                "labor_cost",
                "labor cost must not be negative",
            ));
        }

        if let Some((value, kind)) = self.discount {
            if let Err(e) = Discount::from_parts(value, kind) {
                errors.push(ValidationError::new("discount", e.to_string()));
            }
        }

        errors
    }

    /// Build the input, failing on the first invalid field.
    pub fn build(self) -> Result<PricingInput, PricingError> {
        if self.items.len() > MAX_LINE_ITEMS {
            return Err(PricingError::line(
                None,
                format!("a quote cannot have more than {MAX_LINE_ITEMS} line items"),
            ));
        }

        let discount = match self.discount {
            None => Discount::None,
            Some((value, kind)) => Discount::from_parts(value, kind)?,
        };

        let mut input = PricingInput::new(self.items);
        input.include_labor = self.include_labor;
        input.set_labor_cost(self.labor_cost)?;
        input.discount = discount;
        input.tax_rate = self.tax_rate;
        Ok(input)
    }
}
