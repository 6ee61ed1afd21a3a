#![no_main]

use libfuzzer_sys::fuzz_target;
use pricebook::currency::format_currency;

fuzz_target!(|data: (&str, &str)| {
    let (amount, code) = data;
    assert!(!format_currency(amount, Some(code)).is_empty());
});
