use pricebook::core::*;
use pricebook::currency::{ResolvedCurrency, format_resolved};
use rust_decimal_macros::dec;

fn main() {
    let input = PricingInputBuilder::new()
        .add_item(LineItem::part(2, dec!(25)).unwrap())
        .add_item(LineItem::part(1, dec!(89.90)).unwrap())
        .add_item(LineItem::service(1, dec!(40)).unwrap())
        .labor(dec!(30))
        .discount(Discount::percentage(dec!(10)).unwrap())
        .tax_rate(TaxRate::from_percent("19", "DE", "MwSt", dec!(19)).unwrap())
        .build()
        .unwrap();

    let result = compute_quote_totals(&input).unwrap();

    for code in ["EUR_CORE", "USD_3", "JPY"] {
        let currency = ResolvedCurrency::from_code(code);
        let fmt = |v: rust_decimal::Decimal| format_resolved(v, &currency);
        println!("=== Quote in {} ({}) ===", currency.normalized_code, currency.locale);
        println!("  Parts:     {:>16}", fmt(result.parts_total));
        println!("  Services:  {:>16}", fmt(result.services_total));
        println!("  Subtotal:  {:>16}", fmt(result.subtotal));
        println!("  Labor:     {:>16}", fmt(result.labor_amount));
        println!("  Discount:  {:>16}", fmt(-result.discount_amount));
        println!("  Tax:       {:>16}", fmt(result.tax_amount));
        println!("  Total:     {:>16}", fmt(result.total));
        println!();
    }

    let split = TaxSplit::from_gross(result.rounded(2).total, Some(dec!(0.19))).unwrap();
    println!("Redisplay of a stored total:");
    println!("  net {} + tax {} = {}", split.net.round_dp(2), split.tax.round_dp(2), split.gross);
}
