use serde::Serialize;

/// Pivot currency for every rate in [`CURRENCIES`].
pub const PIVOT_CURRENCY: &str = "USD";

/// Symbol used when a currency code is not in the table.
pub const FALLBACK_SYMBOL: &str = "$";

/// One row of the static currency table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrencyInfo {
    /// ISO 4217 code, uppercase
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
    /// Units of this currency per one unit of the pivot currency
    pub rate_to_pivot: f64,
}

const fn c(code: &'static str, symbol: &'static str, name: &'static str, rate_to_pivot: f64) -> CurrencyInfo {
    CurrencyInfo { code, symbol, name, rate_to_pivot }
}

/// Supported display currencies with approximate rates against USD.
pub const CURRENCIES: &[CurrencyInfo] = &[
    c("USD", "$", "United States Dollar", 1.0),
    c("EUR", "€", "Euro", 0.92),
    c("GBP", "£", "British Pound Sterling", 0.79),
    c("JPY", "¥", "Japanese Yen", 150.0),
    c("CAD", "C$", "Canadian Dollar", 1.36),
    c("AUD", "A$", "Australian Dollar", 1.52),
    c("INR", "₹", "Indian Rupee", 83.5),
    c("CNY", "¥", "Chinese Yuan", 7.2),
    c("CHF", "Fr", "Swiss Franc", 0.90),
    c("NZD", "NZ$", "New Zealand Dollar", 1.65),
    c("BRL", "R$", "Brazilian Real", 5.1),
    c("RUB", "₽", "Russian Ruble", 92.0),
    c("KRW", "₩", "South Korean Won", 1350.0),
    c("SGD", "S$", "Singapore Dollar", 1.35),
    c("MXN", "Mex$", "Mexican Peso", 16.8),
    c("SAR", "﷼", "Saudi Riyal", 3.75),
    c("ZAR", "R", "South African Rand", 18.5),
    c("TRY", "₺", "Turkish Lira", 32.0),
    c("SEK", "kr", "Swedish Krona", 10.8),
    c("NOK", "kr", "Norwegian Krone", 10.9),
    c("HKD", "HK$", "Hong Kong Dollar", 7.8),
    c("IDR", "Rp", "Indonesian Rupiah", 16000.0),
    c("MYR", "RM", "Malaysian Ringgit", 4.7),
    c("PHP", "₱", "Philippine Peso", 57.0),
    c("THB", "฿", "Thai Baht", 36.0),
    c("VND", "₫", "Vietnamese Dong", 25000.0),
    c("PLN", "zł", "Polish Zloty", 3.95),
    c("DKK", "kr", "Danish Krone", 6.9),
    c("HUF", "Ft", "Hungarian Forint", 360.0),
    c("CZK", "Kč", "Czech Koruna", 23.5),
    c("ILS", "₪", "Israeli New Shekel", 3.7),
    c("CLP", "CLP$", "Chilean Peso", 950.0),
    c("AED", "د.إ", "United Arab Emirates Dirham", 3.67),
    c("COP", "COL$", "Colombian Peso", 3900.0),
    c("TWD", "NT$", "New Taiwan Dollar", 32.0),
    c("ARS", "ARS$", "Argentine Peso", 870.0),
    c("EGP", "E£", "Egyptian Pound", 47.0),
    c("PKR", "₨", "Pakistani Rupee", 278.0),
    c("NGN", "₦", "Nigerian Naira", 1300.0),
    c("BDT", "৳", "Bangladeshi Taka", 110.0),
];

/// Look up a currency by code (case-insensitive).
pub fn find_currency(code: &str) -> Option<&'static CurrencyInfo> {
    let code = code.trim();
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

pub fn is_supported(code: &str) -> bool {
    find_currency(code).is_some()
}

/// Display symbol for a code, `$` when unknown.
pub fn symbol_for(code: &str) -> &'static str {
    find_currency(code).map(|c| c.symbol).unwrap_or(FALLBACK_SYMBOL)
}

/// Rate against the pivot currency, or `None` when the code is unknown.
pub fn rate_to_pivot(code: &str) -> Option<f64> {
    find_currency(code).map(|c| c.rate_to_pivot)
}
