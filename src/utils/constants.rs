// ============================================================================
// FaqDesk - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 应用程序常量定义
// 边界:
//   - ✅ 应用程序常量定义
//   - ✅ 图标字符定义
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

/// 应用名称常量
pub const APP_NAME: &str = "FAQDESK";

/// 图标
pub mod icons {
    /// 已保存语言
    pub const SAVED: &str = "●";
    /// 未保存语言
    pub const MISSING: &str = "○";
    /// 有未保存修改
    pub const DIRTY: &str = "*";
    /// 当前标签
    pub const ACTIVE: &str = "▸";
}

/// 加载 spinner 字符
pub mod spinner_chars {
    pub const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
}

/// 表格中问题摘要的最大显示宽度
pub const SUMMARY_WIDTH: usize = 48;
