//! Whole-list codec between the trade log and its storage slot. Corruption
//! must never block the journal: anything unreadable decodes to an empty list.

use crate::models::Trade;

/// Decode a stored blob. `None`, malformed JSON, and non-list payloads all
/// yield an empty list.
pub fn decode(raw: Option<&str>) -> Vec<Trade> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<Trade>>(raw) {
        Ok(trades) => trades,
        Err(err) => {
            log::warn!("discarding unreadable trade list: {}", err);
            Vec::new()
        }
    }
}

/// Serialize the full list back to its raw storage form.
pub fn encode(trades: &[Trade]) -> Result<String, serde_json::Error> {
    serde_json::to_string(trades)
}
