use serde::{Deserialize, Serialize};

/// One completed chart analysis: the uploaded image (base64) plus the text
/// the model returned. Kept newest-first in a capped history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    /// Unix milliseconds.
    pub timestamp: i64,
    pub image: String,
    pub analysis: String,
}
