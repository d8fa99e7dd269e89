//! Capped, newest-first log of completed chart analyses. Backed by its own
//! key-value slot with the same corruption tolerance as the trade codec.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::error::ApiError;
use super::gemini::ChartImage;
use crate::db::Database;
use crate::models::AnalysisRecord;

/// Key-value slot holding the serialized history list.
pub const ANALYSIS_HISTORY_KEY: &str = "scalpe_analysis_history";

/// Oldest entries fall off beyond this.
pub const MAX_HISTORY: usize = 10;

pub struct AnalysisHistory {
    db: Arc<Database>,
}

impl AnalysisHistory {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Stored analyses, newest first. An unreadable blob yields an empty
    /// list rather than an error.
    pub fn list(&self) -> Result<Vec<AnalysisRecord>, ApiError> {
        let Some(raw) = self.db.load(ANALYSIS_HISTORY_KEY)? else {
            return Ok(Vec::new());
        };

        Ok(match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                log::warn!("discarding unreadable analysis history: {}", err);
                Vec::new()
            }
        })
    }

    /// Prepend a completed analysis and persist, dropping entries past the
    /// cap. Returns the new history.
    pub fn record(
        &self,
        image: &ChartImage,
        analysis: &str,
    ) -> Result<Vec<AnalysisRecord>, ApiError> {
        let mut history = self.list()?;

        history.insert(
            0,
            AnalysisRecord {
                id: Uuid::new_v4().to_string(),
                timestamp: Utc::now().timestamp_millis(),
                image: image.data().to_string(),
                analysis: analysis.to_string(),
            },
        );
        history.truncate(MAX_HISTORY);

        self.db
            .save(ANALYSIS_HISTORY_KEY, &serde_json::to_string(&history)?)?;
        Ok(history)
    }

    /// Look up one stored analysis by id.
    pub fn find(&self, id: &str) -> Result<Option<AnalysisRecord>, ApiError> {
        Ok(self.list()?.into_iter().find(|record| record.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_history() -> AnalysisHistory {
        AnalysisHistory::new(Arc::new(Database::open_in_memory().unwrap()))
    }

    fn jpeg() -> ChartImage {
        ChartImage::from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg").unwrap()
    }

    #[test]
    fn test_record_prepends() {
        let history = test_history();

        history.record(&jpeg(), "first analysis").unwrap();
        let records = history.record(&jpeg(), "second analysis").unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].analysis, "second analysis");
        assert_eq!(records[1].analysis, "first analysis");
        assert!(!records[0].id.is_empty());
    }

    #[test]
    fn test_history_is_capped() {
        let history = test_history();

        for i in 0..(MAX_HISTORY + 3) {
            history.record(&jpeg(), &format!("analysis {}", i)).unwrap();
        }

        let records = history.list().unwrap();
        assert_eq!(records.len(), MAX_HISTORY);
        // Newest first; the three oldest fell off
        assert_eq!(records[0].analysis, format!("analysis {}", MAX_HISTORY + 2));
        assert_eq!(records[MAX_HISTORY - 1].analysis, "analysis 3");
    }

    #[test]
    fn test_find_by_id() {
        let history = test_history();

        let records = history.record(&jpeg(), "needle").unwrap();
        let found = history.find(&records[0].id).unwrap();
        assert_eq!(found.map(|r| r.analysis).as_deref(), Some("needle"));

        assert!(history.find("no-such-id").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_history_decodes_empty() {
        let db = Arc::new(Database::open_in_memory().unwrap());
        db.save(ANALYSIS_HISTORY_KEY, "][ garbage").unwrap();

        let history = AnalysisHistory::new(db);
        assert!(history.list().unwrap().is_empty());
    }
}
