use pricebook::core::*;
use rust_decimal_macros::dec;

fn main() {
    // ── 1. Constructor rejects a negative price ───────────────────────
    println!("=== Line Item Error ===");
    match LineItem::part(1, dec!(-12.50)) {
        Ok(item) => println!("  Built: {item:?}"),
        Err(e) => println!("  Rejected: {e}"),
    }

    // ── 2. Builder collects every problem at once ─────────────────────
    println!("\n=== Builder Validation ===");
    let builder = PricingInputBuilder::new()
        .add_item(LineItem::service(2, dec!(45)).unwrap())
        .labor(dec!(-20))
        .discount_parts(dec!(150), DiscountType::Percentage);
    for e in builder.validate() {
        println!("  {e}");
    }
    if let Err(e) = builder.build() {
        println!("  build() stops at the first: {e}");
    }

    // ── 3. Form JSON with a bad row ───────────────────────────────────
    println!("\n=== JSON Input ===");
    let json = r#"{
        "items": [
            {"quantity": 1, "unitPrice": 30, "itemType": "part"},
            {"quantity": -1, "unitPrice": 30, "itemType": "part"}
        ]
    }"#;
    match serde_json::from_str::<PricingInput>(json) {
        Ok(input) => println!("  Parsed {} items", input.items.len()),
        Err(e) => println!("  Rejected: {e}"),
    }

    // ── 4. Tax rate given in percent by mistake ───────────────────────
    println!("\n=== Tax Rate ===");
    match TaxRate::new("1", "DE", "MwSt", dec!(19)) {
        Ok(rate) => println!("  Rate: {}", rate.rate()),
        Err(e) => println!("  Rejected: {e}"),
    }
    let rate = TaxRate::from_percent("1", "DE", "MwSt", dec!(19)).unwrap();
    println!("  from_percent: {} ({}%)", rate.rate(), rate.percent());
}
