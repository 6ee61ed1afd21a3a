use rust_decimal::Decimal;
use tracing::trace;

use super::error::PricingError;
use super::tax::forward_tax;
use super::types::*;

/// Sum of `quantity × unit_price` over `items`, plus `labor_cost` when
/// `include_labor` is set.
pub fn aggregate(
    items: &[LineItem],
    include_labor: bool,
    labor_cost: Decimal,
) -> Result<Decimal, PricingError> {
    let lines = checked_sum(items.iter().map(LineItem::line_total), "line total")?;
    lines
        .checked_add(labor_amount(include_labor, labor_cost)?)
        .ok_or_else(|| PricingError::out_of_range("subtotal"))
}

fn checked_sum(
    values: impl IntoIterator<Item = Decimal>,
    what: &str,
) -> Result<Decimal, PricingError> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| PricingError::out_of_range(what))
    })
}

fn labor_amount(include_labor: bool, labor_cost: Decimal) -> Result<Decimal, PricingError> {
    if !include_labor {
        return Ok(Decimal::ZERO);
    }
    if labor_cost < Decimal::ZERO {
        return Err(PricingError::InvalidLaborCost(format!(
            "labor cost must not be negative (got {labor_cost})"
        )));
    }
    Ok(labor_cost)
}

/// Reduce `amount` by a fixed amount or a 0–100 percentage, clamped at zero.
pub fn apply_discount(
    amount: Decimal,
    discount: Decimal,
    discount_type: DiscountType,
) -> Result<Decimal, PricingError> {
    Ok(discounted(amount, Discount::from_parts(discount, discount_type)?))
}

/// Apply an already validated discount. Never returns a negative amount.
pub fn discounted(amount: Decimal, discount: Discount) -> Decimal {
    let reduced = match discount {
        Discount::None => amount,
        Discount::Amount(value) => amount - value,
        Discount::Percentage(pct) => amount * (Decimal::ONE - pct / Decimal::ONE_HUNDRED),
    };
    reduced.max(Decimal::ZERO)
}

/// Price a quote: aggregate lines and labor, apply the discount, then tax
/// the discounted amount.
///
/// ```
/// use pricebook::core::*;
/// use rust_decimal_macros::dec;
///
/// let input = PricingInputBuilder::new()
///     .add_item(LineItem::part(2, dec!(25)).unwrap())
///     .add_item(LineItem::service(1, dec!(40)).unwrap())
///     .labor(dec!(30))
///     .discount(Discount::percentage(dec!(10)).unwrap())
///     .tax_rate(TaxRate::new("1", "US", "Sales tax", dec!(0.07)).unwrap())
///     .build()
///     .unwrap();
///
/// let result = compute_quote_totals(&input).unwrap();
/// assert_eq!(result.total, dec!(144.45));
/// ```
pub fn compute_quote_totals(input: &PricingInput) -> Result<PricingResult, PricingError> {
    let of_kind = |kind: ItemType| {
        input
            .items
            .iter()
            .filter(move |item| item.item_type() == kind)
            .map(LineItem::line_total)
    };
    let parts_total = checked_sum(of_kind(ItemType::Part), "parts total")?;
    let services_total = checked_sum(of_kind(ItemType::Service), "services total")?;

    // The subtotal already carries labor when it is included, and labor is
    // charged again as its own amount before the discount.
    let subtotal = aggregate(&input.items, input.include_labor, input.labor_cost())?;
    let labor = labor_amount(input.include_labor, input.labor_cost())?;
    let before_discount = subtotal
        .checked_add(labor)
        .ok_or_else(|| PricingError::out_of_range("amount before discount"))?;
    let after_discount = discounted(before_discount, input.discount);
    let tax_amount = forward_tax(after_discount, input.tax_rate.as_ref().map(TaxRate::rate))?;

    trace!(
        %subtotal,
        %labor,
        %after_discount,
        %tax_amount,
        "priced quote"
    );

    Ok(PricingResult {
        subtotal,
        labor_amount: labor,
        discount_amount: before_discount - after_discount,
        tax_amount,
        total: after_discount
            .checked_add(tax_amount)
            .ok_or_else(|| PricingError::out_of_range("total"))?,
        parts_total,
        services_total,
    })
}
