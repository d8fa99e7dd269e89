pub mod codec;
pub mod error;

pub use error::JournalError;

use std::sync::Arc;

use uuid::Uuid;

use crate::db::Database;
use crate::models::{Trade, TradeInput};

/// Key-value slot holding the whole serialized trade list.
pub const TRADES_STORE_KEY: &str = "scalpe_trades";

/// The trade log. Every operation decodes the full stored list, applies its
/// change, and writes the full list back; ordering is insertion order, and
/// updates replace records in place.
pub struct TradeJournal {
    db: Arc<Database>,
}

impl TradeJournal {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Current records in stored order. A missing or unreadable blob yields
    /// an empty list, never an error.
    pub fn list(&self) -> Result<Vec<Trade>, JournalError> {
        let raw = self.db.load(TRADES_STORE_KEY)?;
        Ok(codec::decode(raw.as_deref()))
    }

    /// Create-or-replace keyed by id. A submission without an id gets a fresh
    /// UUID and is appended; a known id is replaced at its original position.
    /// Returns the new full list after persisting it.
    pub fn upsert(&self, input: TradeInput) -> Result<Vec<Trade>, JournalError> {
        let trade = validate(input)?;
        let mut trades = self.list()?;

        match trades.iter().position(|t| t.id == trade.id) {
            Some(index) => trades[index] = trade,
            None => trades.push(trade),
        }

        self.persist(&trades)?;
        Ok(trades)
    }

    /// Remove the record with `id` if present; an unknown id is a no-op.
    pub fn remove_by_id(&self, id: &str) -> Result<Vec<Trade>, JournalError> {
        let mut trades = self.list()?;
        trades.retain(|t| t.id != id);
        self.persist(&trades)?;
        Ok(trades)
    }

    /// Discard every record. Destructive; the caller is responsible for
    /// confirming with the user first.
    pub fn clear_all(&self) -> Result<(), JournalError> {
        self.persist(&[])
    }

    fn persist(&self, trades: &[Trade]) -> Result<(), JournalError> {
        let raw = codec::encode(trades)?;
        self.db.save(TRADES_STORE_KEY, &raw)?;
        Ok(())
    }
}

/// Normalize a form submission into a storable record. Non-numeric prices
/// are rejected rather than stored as a NaN sentinel.
fn validate(input: TradeInput) -> Result<Trade, JournalError> {
    let asset = input.asset.trim();
    if asset.is_empty() {
        return Err(JournalError::EmptyAsset);
    }

    let id = input
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    Ok(Trade {
        id,
        asset: asset.to_uppercase(),
        market: input.market,
        bias: input.bias,
        entry: normalize_price("entry", &input.entry)?,
        target: normalize_price("target", &input.target)?,
    })
}

fn normalize_price(field: &'static str, value: &str) -> Result<String, JournalError> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| JournalError::InvalidPrice {
            field,
            value: value.to_string(),
        })?;

    // "NaN" and "inf" parse successfully but are not prices
    if !parsed.is_finite() {
        return Err(JournalError::InvalidPrice {
            field,
            value: value.to_string(),
        });
    }

    Ok(format!("{:.2}", parsed))
}
