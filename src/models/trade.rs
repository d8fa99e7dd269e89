use serde::{Deserialize, Serialize};

/// Market a journaled idea belongs to. Stored lowercase on the wire; an
/// absent or unrecognized key falls back to the global bucket so legacy
/// records keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Nse,
    Bse,
    #[default]
    #[serde(other)]
    Global,
}

impl Market {
    /// Parse a raw market key the way stored records are parsed: anything
    /// unrecognized maps to `Global`.
    pub fn from_key(key: &str) -> Self {
        match key {
            "nse" => Market::Nse,
            "bse" => Market::Bse,
            _ => Market::Global,
        }
    }

    pub fn as_key(self) -> &'static str {
        match self {
            Market::Global => "global",
            Market::Nse => "nse",
            Market::Bse => "bse",
        }
    }
}

/// One journaled position idea. `entry` and `target` are fixed-point strings
/// with two fraction digits; legacy values that are not numeric survive the
/// codec untouched and render as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub asset: String,
    #[serde(default)]
    pub market: Market,
    pub bias: String,
    pub entry: String,
    pub target: String,
}

/// Raw form submission for create-or-update. `id` is absent for new records;
/// prices arrive as free text and are validated before storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeInput {
    #[serde(default)]
    pub id: Option<String>,
    pub asset: String,
    #[serde(default)]
    pub market: Market,
    pub bias: String,
    pub entry: String,
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_from_key_falls_back_to_global() {
        assert_eq!(Market::from_key("nse"), Market::Nse);
        assert_eq!(Market::from_key("bse"), Market::Bse);
        assert_eq!(Market::from_key("nasdaq"), Market::Global);
        assert_eq!(Market::from_key(""), Market::Global);
    }

    #[test]
    fn test_unknown_market_deserializes_to_global() {
        let trade: Trade = serde_json::from_str(
            r#"{"id":"t1","asset":"INFY","market":"lse","bias":"long","entry":"10.00","target":"12.00"}"#,
        )
        .unwrap();
        assert_eq!(trade.market, Market::Global);
    }

    #[test]
    fn test_missing_market_deserializes_to_global() {
        let trade: Trade = serde_json::from_str(
            r#"{"id":"t1","asset":"INFY","bias":"long","entry":"10.00","target":"12.00"}"#,
        )
        .unwrap();
        assert_eq!(trade.market, Market::Global);
    }

    #[test]
    fn test_market_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Market::Nse).unwrap(), "\"nse\"");
        assert_eq!(serde_json::to_string(&Market::Global).unwrap(), "\"global\"");
    }
}
