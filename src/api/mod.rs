pub mod error;
pub mod gemini;
pub mod history;
pub mod secure_storage;

pub use error::ApiError;
pub use gemini::{ChartImage, GeminiClient, MAX_IMAGE_BYTES};
pub use history::{AnalysisHistory, MAX_HISTORY};
pub use secure_storage::ApiKeyStore;
