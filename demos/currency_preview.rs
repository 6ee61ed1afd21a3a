use pricebook::currency::*;

fn main() {
    let org_currencies = vec![
        Currency::new("USD_42", "US Dollar", "$"),
        Currency::new("EUR_42", "Euro", "€").default_currency(),
        Currency::new("GBP_42", "Pound Sterling", ""),
        Currency::new("JPY_CORE", "Yen", "¥"),
        Currency::new("CHF_42", "Swiss Franc", "Fr."),
    ];

    println!("Default: {}", resolve_default_currency(&org_currencies, None).normalized_code);
    println!();

    for preview in preview_currencies(&org_currencies, DEFAULT_PREVIEW_AMOUNT) {
        println!(
            "{:<10} {:<4} {:<6} {:<4} {}",
            preview.code,
            preview.resolved.normalized_code,
            preview.resolved.locale,
            preview.symbol,
            preview.sample
        );
    }

    println!();
    match serde_json::to_string_pretty(&preview_currency("GBP_42", DEFAULT_PREVIEW_AMOUNT)) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("serialize failed: {e}"),
    }
}
