//! Display metadata per market and the price formatter the journal and
//! ticker share. Formatting is pure and never fails: missing values render
//! as "--" and non-numeric legacy values render unchanged.

pub mod session;
pub mod snapshot;

pub use session::{SessionBanner, SessionStatus, session_banner, session_status_at};
pub use snapshot::{FLOW_LEADERS, FlowLeader, IndexQuote, MARKET_EVENTS, MarketEvent, TICKER_QUOTES, TickerTape};

use crate::models::Market;

/// Digit-grouping convention for a display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    /// Groups of three: 1,234,567.00
    EnUs,
    /// Lakh/crore grouping: 12,34,567.00
    EnIn,
}

pub struct MarketMeta {
    pub label: &'static str,
    pub currency: &'static str,
    pub symbol: &'static str,
    pub placeholder: &'static str,
    pub locale: Locale,
}

static GLOBAL_META: MarketMeta = MarketMeta {
    label: "Global / Crypto",
    currency: "USD",
    symbol: "$",
    placeholder: "e.g. BTC-USD",
    locale: Locale::EnUs,
};

static NSE_META: MarketMeta = MarketMeta {
    label: "NSE India",
    currency: "INR",
    symbol: "₹",
    placeholder: "e.g. NSE:INFY",
    locale: Locale::EnIn,
};

static BSE_META: MarketMeta = MarketMeta {
    label: "BSE India",
    currency: "INR",
    symbol: "₹",
    placeholder: "e.g. BSE:RELIANCE",
    locale: Locale::EnIn,
};

impl Market {
    pub fn meta(self) -> &'static MarketMeta {
        match self {
            Market::Global => &GLOBAL_META,
            Market::Nse => &NSE_META,
            Market::Bse => &BSE_META,
        }
    }
}

/// Format a stored price string for display. Missing or empty input renders
/// as "--"; input that does not parse as a number comes back unchanged.
pub fn format_price_for_market(value: Option<&str>, market: Market) -> String {
    let Some(raw) = value else {
        return "--".to_string();
    };
    if raw.trim().is_empty() {
        return "--".to_string();
    }

    match raw.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => format_numeric_price(parsed, market),
        _ => raw.to_string(),
    }
}

/// Format a known-numeric price with the market's currency symbol and
/// locale grouping, always with two fraction digits.
pub fn format_numeric_price(value: f64, market: Market) -> String {
    let meta = market.meta();
    let sign = if value < 0.0 { "-" } else { "" };

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), "00"),
    };

    format!(
        "{}{}{}.{}",
        meta.symbol,
        sign,
        group_digits(int_part, meta.locale),
        frac_part
    )
}

fn group_digits(digits: &str, locale: Locale) -> String {
    match locale {
        Locale::EnUs => group_by_threes(digits),
        Locale::EnIn => group_indian(digits),
    }
}

fn group_by_threes(digits: &str) -> String {
    let mut groups = Vec::new();
    let mut rest = digits;
    while rest.len() > 3 {
        let (head, tail) = rest.split_at(rest.len() - 3);
        groups.push(tail);
        rest = head;
    }
    groups.push(rest);
    groups.reverse();
    groups.join(",")
}

/// en-IN: the last three digits form one group, everything above groups in twos.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    groups.push(rest);
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nse_formatting() {
        assert_eq!(
            format_price_for_market(Some("1234.5"), Market::Nse),
            "₹1,234.50"
        );
    }

    #[test]
    fn test_missing_value_renders_dashes() {
        assert_eq!(format_price_for_market(None, Market::Nse), "--");
        assert_eq!(format_price_for_market(Some(""), Market::Nse), "--");
        assert_eq!(format_price_for_market(Some("   "), Market::Global), "--");
    }

    #[test]
    fn test_non_numeric_value_passes_through() {
        assert_eq!(
            format_price_for_market(Some("NaN"), Market::Nse),
            "NaN"
        );
        assert_eq!(
            format_price_for_market(Some("pending"), Market::Global),
            "pending"
        );
    }

    #[test]
    fn test_en_us_grouping() {
        assert_eq!(
            format_numeric_price(1234567.0, Market::Global),
            "$1,234,567.00"
        );
        assert_eq!(format_numeric_price(999.99, Market::Global), "$999.99");
    }

    #[test]
    fn test_en_in_lakh_crore_grouping() {
        assert_eq!(
            format_numeric_price(1234567.0, Market::Nse),
            "₹12,34,567.00"
        );
        assert_eq!(
            format_numeric_price(74210.1, Market::Bse),
            "₹74,210.10"
        );
        assert_eq!(format_numeric_price(123.0, Market::Nse), "₹123.00");
    }

    #[test]
    fn test_negative_price() {
        assert_eq!(format_numeric_price(-1234.5, Market::Nse), "₹-1,234.50");
    }

    #[test]
    fn test_unknown_market_meta_is_global() {
        let meta = Market::from_key("unknown").meta();
        assert_eq!(meta.symbol, "$");
        assert_eq!(meta.locale, Locale::EnUs);
    }
}
