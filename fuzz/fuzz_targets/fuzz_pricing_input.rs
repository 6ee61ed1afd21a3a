#![no_main]

use libfuzzer_sys::fuzz_target;
use pricebook::core::{PricingInput, compute_quote_totals};
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = serde_json::from_slice::<PricingInput>(data) {
        // Anything that deserializes must price without panicking.
        if let Ok(result) = compute_quote_totals(&input) {
            assert!(result.total >= Decimal::ZERO);
        }
    }
});
