// ============================================================================
// FaqDesk - 工具模块
// ============================================================================

pub mod colors;
pub mod constants;
pub mod logger;
pub mod spinner;
