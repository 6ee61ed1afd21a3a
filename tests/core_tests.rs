use pricebook::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sales_tax(rate: Decimal) -> TaxRate {
    TaxRate::new("1", "US", "Sales tax", rate).unwrap()
}

fn repair_items() -> Vec<LineItem> {
    vec![
        LineItem::part(2, dec!(25)).unwrap(),
        LineItem::service(1, dec!(40)).unwrap(),
    ]
}

// --- Quote scenarios ---

#[test]
fn scenario_labor_percentage_discount_and_tax() {
    let input = PricingInputBuilder::new()
        .items(repair_items())
        .labor(dec!(30))
        .discount(Discount::percentage(dec!(10)).unwrap())
        .tax_rate(sales_tax(dec!(0.07)))
        .build()
        .unwrap();

    let result = compute_quote_totals(&input).unwrap();
    assert_eq!(result.subtotal, dec!(120));
    assert_eq!(result.labor_amount, dec!(30));
    assert_eq!(result.discount_amount, dec!(15));
    assert_eq!(result.taxable_amount(), dec!(135));
    assert_eq!(result.tax_amount, dec!(9.45));
    assert_eq!(result.total, dec!(144.45));
    assert_eq!(result.parts_total, dec!(50));
    assert_eq!(result.services_total, dec!(40));
}

#[test]
fn scenario_oversized_fixed_discount_clamps_to_zero() {
    let input = PricingInputBuilder::new()
        .items(repair_items())
        .discount(Discount::amount(dec!(200)).unwrap())
        .build()
        .unwrap();

    let result = compute_quote_totals(&input).unwrap();
    assert_eq!(result.subtotal, dec!(90));
    assert_eq!(result.labor_amount, dec!(0));
    assert_eq!(result.discount_amount, dec!(90));
    assert_eq!(result.tax_amount, dec!(0));
    assert_eq!(result.total, dec!(0));
}

#[test]
fn excluded_labor_is_ignored() {
    let input = PricingInputBuilder::new()
        .items(repair_items())
        .labor_cost(dec!(30))
        .include_labor(false)
        .build()
        .unwrap();

    let result = compute_quote_totals(&input).unwrap();
    assert_eq!(result.subtotal, dec!(90));
    assert_eq!(result.labor_amount, dec!(0));
    assert_eq!(result.total, dec!(90));
}

#[test]
fn tax_is_computed_after_discount() {
    let input = PricingInputBuilder::new()
        .add_item(LineItem::part(1, dec!(100)).unwrap())
        .discount(Discount::amount(dec!(20)).unwrap())
        .tax_rate(sales_tax(dec!(0.19)))
        .build()
        .unwrap();

    let result = compute_quote_totals(&input).unwrap();
    assert_eq!(result.tax_amount, dec!(15.20));
    assert_eq!(result.total, dec!(95.20));
}

#[test]
fn empty_quote_totals_zero() {
    let result = compute_quote_totals(&PricingInput::default()).unwrap();
    assert_eq!(result.total, Decimal::ZERO);
    assert_eq!(result.subtotal, Decimal::ZERO);
}

#[test]
fn totals_invariant_holds() {
    let input = PricingInputBuilder::new()
        .add_item(LineItem::part(3, dec!(19.99)).unwrap())
        .add_item(LineItem::service(2, dec!(45.50)).unwrap())
        .labor(dec!(12.75))
        .discount(Discount::percentage(dec!(12.5)).unwrap())
        .tax_rate(sales_tax(dec!(0.0825)))
        .build()
        .unwrap();

    let r = compute_quote_totals(&input).unwrap();
    let expected = (r.subtotal + r.labor_amount - r.discount_amount).max(Decimal::ZERO) + r.tax_amount;
    assert_eq!(r.total, expected);
}

#[test]
fn rounded_result_for_display() {
    let input = PricingInputBuilder::new()
        .add_item(LineItem::part(1, dec!(10.005)).unwrap())
        .tax_rate(sales_tax(dec!(0.07)))
        .build()
        .unwrap();

    let rounded = compute_quote_totals(&input).unwrap().rounded(2);
    assert_eq!(rounded.subtotal, dec!(10.01));
    assert_eq!(rounded.tax_amount, dec!(0.70));
    assert_eq!(rounded.total, dec!(10.71));
}

// --- Building blocks ---

#[test]
fn aggregate_adds_labor_only_when_included() {
    let items = repair_items();
    assert_eq!(aggregate(&items, true, dec!(30)).unwrap(), dec!(120));
    assert_eq!(aggregate(&items, false, dec!(30)).unwrap(), dec!(90));
}

#[test]
fn apply_discount_validates() {
    assert!(matches!(
        apply_discount(dec!(10), dec!(-1), DiscountType::Amount),
        Err(PricingError::InvalidDiscount(_))
    ));
    assert!(matches!(
        apply_discount(dec!(10), dec!(101), DiscountType::Percentage),
        Err(PricingError::InvalidDiscount(_))
    ));
    assert_eq!(
        apply_discount(dec!(10), dec!(100), DiscountType::Percentage).unwrap(),
        dec!(0)
    );
}

#[test]
fn forward_and_reverse_tax() {
    assert_eq!(forward_tax(dec!(100), Some(dec!(0.19))).unwrap(), dec!(19));
    assert_eq!(forward_total(dec!(100), Some(dec!(0.19))).unwrap(), dec!(119));
    assert_eq!(reverse_tax(dec!(119), Some(dec!(0.19))).unwrap(), dec!(19));
    assert_eq!(forward_tax(dec!(100), None).unwrap(), dec!(0));
    assert_eq!(reverse_tax(dec!(100), None).unwrap(), dec!(0));
    assert!(matches!(
        forward_tax(dec!(100), Some(dec!(1.5))),
        Err(PricingError::InvalidTaxRate(_))
    ));
}

#[test]
fn tax_split_from_gross() {
    let split = TaxSplit::from_gross(dec!(107), Some(dec!(0.07))).unwrap();
    assert_eq!(split.net, dec!(100));
    assert_eq!(split.tax, dec!(7));
    assert_eq!(split.gross, dec!(107));
}

#[test]
fn percent_rates_normalized_once() {
    let rate = TaxRate::from_percent("vat", "DE", "MwSt", dec!(19)).unwrap();
    assert_eq!(rate.rate(), dec!(0.19));
    assert_eq!(rate.percent(), dec!(19));
    assert!(TaxRate::from_percent("x", "DE", "bad", dec!(119)).is_err());
}

#[test]
fn tax_rate_resolution_order() {
    let rates = vec![
        TaxRate::new("std", "DE", "Standard", dec!(0.19)).unwrap().default_rate(),
        TaxRate::new("red", "DE", "Reduced", dec!(0.07)).unwrap(),
    ];
    let cached = TaxRate::new("cached", "DE", "Cached", dec!(0.16)).unwrap();

    assert_eq!(resolve_tax_rate(Some("red"), &rates, Some(&cached)).unwrap().id, "red");
    assert_eq!(resolve_tax_rate(Some("nope"), &rates, Some(&cached)).unwrap().id, "std");
    assert_eq!(resolve_tax_rate(None, &rates[1..], Some(&cached)).unwrap().id, "cached");
    assert!(resolve_tax_rate(None, &[], None).is_none());
}

// --- JSON boundary ---

#[test]
fn pricing_input_from_form_json() {
    let input: PricingInput = serde_json::from_str(
        r#"{
            "items": [
                {"quantity": 2, "unitPrice": "25", "itemType": "part"},
                {"quantity": 1, "unitPrice": 40, "itemType": "service"}
            ],
            "includeLabor": true,
            "laborCost": 30,
            "discount": 10,
            "discountType": "percentage",
            "taxRate": {"id": 1, "countryCode": "US", "name": "Sales tax", "rate": 0.07}
        }"#,
    )
    .unwrap();

    assert_eq!(input.discount, Discount::Percentage(dec!(10)));
    assert_eq!(input.tax_rate.as_ref().unwrap().id, "1");
    assert_eq!(compute_quote_totals(&input).unwrap().total, dec!(144.45));
}

#[test]
fn pricing_input_rejects_negative_price_with_index() {
    let err = serde_json::from_str::<PricingInput>(
        r#"{"items": [
            {"quantity": 1, "unitPrice": 5, "itemType": "part"},
            {"quantity": 1, "unitPrice": -5, "itemType": "part"}
        ]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("#1"), "{err}");
}

#[test]
fn pricing_input_rejects_missing_quantity() {
    let err = serde_json::from_str::<PricingInput>(
        r#"{"items": [{"unitPrice": 5, "itemType": "part"}]}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("quantity"), "{err}");
}

#[test]
fn pricing_result_serializes_camel_case() {
    let input = PricingInputBuilder::new()
        .items(repair_items())
        .build()
        .unwrap();
    let json = serde_json::to_value(compute_quote_totals(&input).unwrap()).unwrap();
    assert!(json.get("laborAmount").is_some());
    assert!(json.get("discountAmount").is_some());
    assert!(json.get("partsTotal").is_some());
}

#[test]
fn builder_validate_collects_all_errors() {
    let builder = PricingInputBuilder::new()
        .labor(dec!(-1))
        .discount_parts(dec!(150), DiscountType::Percentage);
    let errors = builder.validate();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].field, "labor_cost");
    assert_eq!(errors[1].field, "discount");
    assert!(builder.build().is_err());
}
