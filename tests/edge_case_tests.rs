//! Boundary and rejection cases for pricing input and display.

use pricebook::core::*;
use pricebook::currency::{format_currency, format_fallback, format_plain};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

#[test]
fn negative_quantity_is_rejected_not_zeroed() {
    let err = LineItem::new(-2, dec!(10), ItemType::Part).unwrap_err();
    assert!(matches!(err, PricingError::InvalidLineItem { .. }));
}

#[test]
fn negative_unit_price_is_rejected() {
    assert!(LineItem::service(1, dec!(-0.01)).is_err());
}

#[test]
fn zero_quantity_and_price_are_allowed() {
    let items = vec![
        LineItem::part(0, dec!(99)).unwrap(),
        LineItem::service(3, Decimal::ZERO).unwrap(),
    ];
    assert_eq!(aggregate(&items, false, Decimal::ZERO).unwrap(), Decimal::ZERO);
}

#[test]
fn quantity_above_u32_is_rejected() {
    assert!(LineItem::part(i64::from(u32::MAX) + 1, dec!(1)).is_err());
}

#[test]
fn unknown_item_type_fails_deserialization() {
    let result = serde_json::from_str::<LineItem>(
        r#"{"quantity": 1, "unitPrice": 1, "itemType": "fee"}"#,
    );
    assert!(result.is_err());
}

#[test]
fn missing_item_type_is_rejected_not_defaulted() {
    let err = serde_json::from_str::<PricingInput>(
        r#"{"items": [
            {"quantity": 1, "unitPrice": 10, "itemType": "service"},
            {"quantity": 1, "unitPrice": 10}
        ]}"#,
    )
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("#1"), "{message}");
    assert!(message.contains("item type is missing"), "{message}");
}

#[test]
fn missing_unit_price_fails_deserialization() {
    let err = serde_json::from_str::<LineItem>(r#"{"quantity": 1}"#).unwrap_err();
    assert!(err.to_string().contains("unit price"), "{err}");
}

#[test]
fn too_many_items_rejected_by_builder() {
    let item = LineItem::part(1, dec!(1)).unwrap();
    let result = PricingInputBuilder::new()
        .items(std::iter::repeat_n(item, MAX_LINE_ITEMS + 1))
        .build();
    assert!(matches!(result, Err(PricingError::InvalidLineItem { index: None, .. })));
}

// ---------------------------------------------------------------------------
// Labor, discount, tax bounds
// ---------------------------------------------------------------------------

#[test]
fn negative_labor_rejected_when_included() {
    let result = PricingInputBuilder::new().labor(dec!(-10)).build();
    assert!(matches!(result, Err(PricingError::InvalidLaborCost(_))));
}

#[test]
fn full_percentage_discount_zeroes_total() {
    let input = PricingInputBuilder::new()
        .add_item(LineItem::part(1, dec!(80)).unwrap())
        .labor(dec!(20))
        .discount(Discount::percentage(dec!(100)).unwrap())
        .tax_rate(TaxRate::new("1", "US", "Sales", dec!(0.1)).unwrap())
        .build()
        .unwrap();
    let result = compute_quote_totals(&input).unwrap();
    assert_eq!(result.total, Decimal::ZERO);
    assert_eq!(result.tax_amount, Decimal::ZERO);
    assert_eq!(result.discount_amount, dec!(120));
}

#[test]
fn discount_equal_to_amount() {
    assert_eq!(
        apply_discount(dec!(42.50), dec!(42.50), DiscountType::Amount).unwrap(),
        Decimal::ZERO
    );
}

#[test]
fn discount_without_type_defaults_to_amount() {
    let input: PricingInput = serde_json::from_str(
        r#"{"items": [{"quantity": 1, "unitPrice": 50, "itemType": "part"}], "discount": 5}"#,
    )
    .unwrap();
    assert_eq!(input.discount, Discount::Amount(dec!(5)));
}

#[test]
fn negative_discount_in_json_rejected() {
    let result = serde_json::from_str::<PricingInput>(r#"{"items": [], "discount": -1}"#);
    assert!(result.is_err());
}

#[test]
fn rate_bounds_are_inclusive() {
    assert!(TaxRate::new("zero", "US", "None", dec!(0)).is_ok());
    assert!(TaxRate::new("full", "US", "All", dec!(1)).is_ok());
    assert!(TaxRate::new("over", "US", "Over", dec!(1.0001)).is_err());
    assert!(TaxRate::new("neg", "US", "Neg", dec!(-0.01)).is_err());
}

#[test]
fn tax_rate_country_must_be_two_letters() {
    assert!(TaxRate::new("1", "USA", "Bad", dec!(0.1)).is_err());
    assert!(TaxRate::new("1", "U1", "Bad", dec!(0.1)).is_err());
}

#[test]
fn reverse_tax_at_full_rate() {
    assert_eq!(reverse_tax(dec!(200), Some(Decimal::ONE)).unwrap(), dec!(100));
}

#[test]
fn untaxed_quote_has_zero_tax() {
    let input = PricingInputBuilder::new()
        .add_item(LineItem::service(2, dec!(60)).unwrap())
        .build()
        .unwrap();
    let result = compute_quote_totals(&input).unwrap();
    assert_eq!(result.tax_amount, Decimal::ZERO);
    assert_eq!(result.total, dec!(120));
}

#[test]
fn error_messages_are_readable() {
    let err = PricingError::InvalidLineItem {
        index: Some(3),
        reason: "unit price must not be negative".into(),
    };
    assert_eq!(err.to_string(), "invalid line item #3: unit price must not be negative");
}

// ---------------------------------------------------------------------------
// Display boundaries
// ---------------------------------------------------------------------------

#[test]
fn half_cent_rounds_away_from_zero() {
    assert_eq!(format_currency(dec!(0.005), Some("USD")), "$0.01");
    assert_eq!(format_currency(dec!(-0.005), Some("USD")), "-$0.01");
    assert_eq!(format_currency(dec!(0.5), Some("JPY")), "￥1");
}

#[test]
fn huge_amounts_group_correctly() {
    assert_eq!(
        format_currency(dec!(123456789012.34), Some("USD")),
        "$123,456,789,012.34"
    );
}

#[test]
fn amounts_at_decimal_limit_keep_fraction_digits() {
    assert_eq!(
        format_currency(dec!(1000000000000000000000000000), Some("USD")),
        "$1,000,000,000,000,000,000,000,000,000.00"
    );
    assert_eq!(
        format_currency(Decimal::MAX, Some("USD")),
        "$79,228,162,514,264,337,593,543,950,335.00"
    );
    assert_eq!(
        format_currency(Decimal::MIN, Some("EUR")),
        "-79.228.162.514.264.337.593.543.950.335,00\u{a0}€"
    );
    assert_eq!(
        format_fallback(Decimal::MAX, "XYZ", 2),
        "$79228162514264337593543950335.00"
    );
    assert_eq!(format_plain(Decimal::MAX, "JPY_CORE"), "¥79228162514264337593543950335");
}

#[test]
fn finite_amounts_beyond_decimal_range_render_as_missing() {
    assert_eq!(format_currency(1e30_f64, Some("USD")), "-");
    assert_eq!(format_currency(-1e30_f64, Some("USD")), "-");
    assert_eq!(format_currency("1e30", Some("USD")), "-");
    assert_eq!(format_currency(1e20_f64, Some("USD")), "$100,000,000,000,000,000,000.00");
}

#[test]
fn tenant_code_with_lowercase_prefix() {
    assert_eq!(format_currency(dec!(1), Some("gbp_9")), "£1.00");
}

#[test]
fn too_short_code_formats_in_fallback() {
    assert_eq!(format_currency(dec!(1), Some("EU")), "$1.00");
}
