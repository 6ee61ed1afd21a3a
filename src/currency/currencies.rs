//! ISO 4217 currency table.
//!
//! Known codes with the symbol an `en-US` formatter shows for them. Codes
//! missing from this table are treated as unsupported by the locale
//! formatter.

/// Check whether `code` is a known ISO 4217 currency code.
pub fn is_known_currency_code(code: &str) -> bool {
    lookup(code).is_some()
}

/// Fraction digits shown for `code`: 0 for JPY, 2 for everything else.
pub fn minor_unit_digits(code: &str) -> u32 {
    match code {
        "JPY" => 0,
        _ => 2,
    }
}

/// Symbol used by the plain `<symbol><amount>` fallback rendering.
pub fn fallback_symbol(code: &str) -> &'static str {
    match code {
        "GBP" => "£",
        "EUR" => "€",
        "JPY" => "¥",
        _ => "$",
    }
}

/// Symbol an `en-US` formatter shows for `code`, if known.
pub(crate) fn en_us_symbol(code: &str) -> Option<&'static str> {
    lookup(code).map(|(_, symbol)| *symbol)
}

fn lookup(code: &str) -> Option<&'static (&'static str, &'static str)> {
    CURRENCIES
        .binary_search_by(|(c, _)| (*c).cmp(code))
        .ok()
        .map(|i| &CURRENCIES[i])
}

/// Sorted list of common ISO 4217 currency codes with their `en-US` symbol.
/// Sorted for binary search.
static CURRENCIES: &[(&str, &str)] = &[
    ("AED", "AED"), // UAE Dirham
    ("AMD", "AMD"), // Armenian Dram
    ("AUD", "A$"),  // Australian Dollar
    ("BGN", "BGN"), // Bulgarian Lev
    ("BRL", "R$"),  // Brazilian Real
    ("CAD", "CA$"), // Canadian Dollar
    ("CHF", "CHF"), // Swiss Franc
    ("CNY", "CN¥"), // Chinese Yuan
    ("CZK", "CZK"), // Czech Koruna
    ("DKK", "DKK"), // Danish Krone
    ("EGP", "EGP"), // Egyptian Pound
    ("EUR", "€"),   // Euro
    ("GBP", "£"),   // Pound Sterling
    ("GEL", "GEL"), // Georgian Lari
    ("HKD", "HK$"), // Hong Kong Dollar
    ("HUF", "HUF"), // Hungarian Forint
    ("IDR", "IDR"), // Indonesian Rupiah
    ("ILS", "₪"),   // Israeli Shekel
    ("INR", "₹"),   // Indian Rupee
    ("ISK", "ISK"), // Icelandic Krona
    ("JPY", "¥"),   // Japanese Yen
    ("KES", "KES"), // Kenyan Shilling
    ("KRW", "₩"),   // South Korean Won
    ("KZT", "KZT"), // Kazakhstani Tenge
    ("MXN", "MX$"), // Mexican Peso
    ("MYR", "MYR"), // Malaysian Ringgit
    ("NGN", "NGN"), // Nigerian Naira
    ("NOK", "NOK"), // Norwegian Krone
    ("NZD", "NZ$"), // New Zealand Dollar
    ("PHP", "₱"),   // Philippine Peso
    ("PLN", "PLN"), // Polish Zloty
    ("RON", "RON"), // Romanian Leu
    ("SAR", "SAR"), // Saudi Riyal
    ("SEK", "SEK"), // Swedish Krona
    ("SGD", "SGD"), // Singapore Dollar
    ("THB", "THB"), // Thai Baht
    ("TRY", "TRY"), // Turkish Lira
    ("TWD", "NT$"), // New Taiwan Dollar
    ("UAH", "UAH"), // Ukrainian Hryvnia
    ("USD", "$"),   // US Dollar
    ("VND", "₫"),   // Vietnamese Dong
    ("ZAR", "ZAR"), // South African Rand
];
