// ============================================================================
// FaqDesk - UI 模块
// ============================================================================

pub mod editor;
pub mod table;
