//! Currencies the converter knows by name.

use super::currency::normalize_code;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

const fn currency(code: &'static str, name: &'static str, flag: &'static str) -> Currency {
    Currency { code, name, flag }
}

const CURRENCIES: &[Currency] = &[
    // Americas
    currency("USD", "US Dollar", "🇺🇸"),
    currency("EUR", "Euro", "🇪🇺"),
    currency("GBP", "Pound Sterling", "🇬🇧"),
    currency("COP", "Colombian Peso", "🇨🇴"),
    currency("MXN", "Mexican Peso", "🇲🇽"),
    currency("BRL", "Brazilian Real", "🇧🇷"),
    currency("ARS", "Argentine Peso", "🇦🇷"),
    currency("CLP", "Chilean Peso", "🇨🇱"),
    currency("PEN", "Peruvian Sol", "🇵🇪"),
    currency("CAD", "Canadian Dollar", "🇨🇦"),
    currency("UYU", "Uruguayan Peso", "🇺🇾"),
    currency("BOB", "Boliviano", "🇧🇴"),
    currency("PYG", "Paraguayan Guarani", "🇵🇾"),
    currency("CRC", "Costa Rican Colon", "🇨🇷"),
    currency("GTQ", "Guatemalan Quetzal", "🇬🇹"),
    currency("DOP", "Dominican Peso", "🇩🇴"),
    currency("CUP", "Cuban Peso", "🇨🇺"),
    currency("PAB", "Panamanian Balboa", "🇵🇦"),
    currency("NIO", "Nicaraguan Cordoba", "🇳🇮"),
    currency("HNL", "Honduran Lempira", "🇭🇳"),
    // Europe
    currency("CHF", "Swiss Franc", "🇨🇭"),
    currency("SEK", "Swedish Krona", "🇸🇪"),
    currency("NOK", "Norwegian Krone", "🇳🇴"),
    currency("DKK", "Danish Krone", "🇩🇰"),
    currency("PLN", "Polish Zloty", "🇵🇱"),
    currency("CZK", "Czech Koruna", "🇨🇿"),
    currency("HUF", "Hungarian Forint", "🇭🇺"),
    currency("RON", "Romanian Leu", "🇷🇴"),
    currency("BGN", "Bulgarian Lev", "🇧🇬"),
    currency("HRK", "Croatian Kuna", "🇭🇷"),
    currency("RUB", "Russian Ruble", "🇷🇺"),
    currency("TRY", "Turkish Lira", "🇹🇷"),
    currency("UAH", "Ukrainian Hryvnia", "🇺🇦"),
    // Asia
    currency("JPY", "Japanese Yen", "🇯🇵"),
    currency("CNY", "Chinese Yuan", "🇨🇳"),
    currency("KRW", "South Korean Won", "🇰🇷"),
    currency("INR", "Indian Rupee", "🇮🇳"),
    currency("IDR", "Indonesian Rupiah", "🇮🇩"),
    currency("THB", "Thai Baht", "🇹🇭"),
    currency("MYR", "Malaysian Ringgit", "🇲🇾"),
    currency("SGD", "Singapore Dollar", "🇸🇬"),
    currency("PHP", "Philippine Peso", "🇵🇭"),
    currency("VND", "Vietnamese Dong", "🇻🇳"),
    currency("PKR", "Pakistani Rupee", "🇵🇰"),
    currency("BDT", "Bangladeshi Taka", "🇧🇩"),
    currency("LKR", "Sri Lankan Rupee", "🇱🇰"),
    currency("NPR", "Nepalese Rupee", "🇳🇵"),
    currency("MMK", "Myanmar Kyat", "🇲🇲"),
    currency("KHR", "Cambodian Riel", "🇰🇭"),
    currency("LAK", "Lao Kip", "🇱🇦"),
    currency("HKD", "Hong Kong Dollar", "🇭🇰"),
    currency("TWD", "New Taiwan Dollar", "🇹🇼"),
    // Oceania
    currency("AUD", "Australian Dollar", "🇦🇺"),
    currency("NZD", "New Zealand Dollar", "🇳🇿"),
    currency("FJD", "Fijian Dollar", "🇫🇯"),
    // Africa
    currency("ZAR", "South African Rand", "🇿🇦"),
    currency("EGP", "Egyptian Pound", "🇪🇬"),
    currency("NGN", "Nigerian Naira", "🇳🇬"),
    currency("KES", "Kenyan Shilling", "🇰🇪"),
    currency("GHS", "Ghanaian Cedi", "🇬🇭"),
    currency("UGX", "Ugandan Shilling", "🇺🇬"),
    currency("TZS", "Tanzanian Shilling", "🇹🇿"),
    currency("MAD", "Moroccan Dirham", "🇲🇦"),
    currency("TND", "Tunisian Dinar", "🇹🇳"),
    currency("DZD", "Algerian Dinar", "🇩🇿"),
    currency("AOA", "Angolan Kwanza", "🇦🇴"),
    currency("XOF", "West African CFA Franc", "🇸🇳"),
    // Middle East
    currency("AED", "UAE Dirham", "🇦🇪"),
    currency("SAR", "Saudi Riyal", "🇸🇦"),
    currency("ILS", "Israeli Shekel", "🇮🇱"),
    currency("QAR", "Qatari Riyal", "🇶🇦"),
    currency("KWD", "Kuwaiti Dinar", "🇰🇼"),
    currency("BHD", "Bahraini Dinar", "🇧🇭"),
    currency("OMR", "Omani Rial", "🇴🇲"),
    currency("JOD", "Jordanian Dinar", "🇯🇴"),
    currency("LBP", "Lebanese Pound", "🇱🇧"),
    currency("IQD", "Iraqi Dinar", "🇮🇶"),
    currency("IRR", "Iranian Rial", "🇮🇷"),
    // Crypto and metals
    currency("BTC", "Bitcoin", "₿"),
    currency("ETH", "Ethereum", "Ξ"),
    currency("XAU", "Gold (troy ounce)", "🏆"),
    currency("XAG", "Silver (troy ounce)", "⚡"),
];

pub fn lookup(code: &str) -> Option<&'static Currency> {
    let code = normalize_code(code);
    CURRENCIES.iter().find(|c| c.code == code)
}

pub fn is_known(code: &str) -> bool {
    lookup(code).is_some()
}

/// Currencies whose code or name contains `query`, case-insensitively, sorted by name.
/// A blank query returns the whole catalog.
pub fn search(query: &str) -> Vec<&'static Currency> {
    let query = query.trim().to_lowercase();
    let mut found: Vec<&'static Currency> = CURRENCIES
        .iter()
        .filter(|c| {
            query.is_empty()
                || c.code.to_lowercase().contains(&query)
                || c.name.to_lowercase().contains(&query)
        })
        .collect();
    found.sort_by_key(|c| c.name);
    found
}

/// The codes in `codes` that the catalog doesn't recognize, normalized and deduplicated.
pub fn unrecognized<'a>(codes: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut unknown = Vec::new();
    for code in codes.into_iter().map(normalize_code) {
        if !is_known(&code) && !unknown.contains(&code) {
            unknown.push(code);
        }
    }
    unknown
}
