// ============================================================================
// FaqDesk - 数据模型模块
// ============================================================================

pub mod config;
pub mod locale;
pub mod record;

pub use locale::Locale;
pub use record::{Draft, DraftField, RecordId, RecordSummary, Translation, TranslationPayload};
