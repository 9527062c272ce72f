// ============================================================================
// FaqDesk - 日志工具
// ============================================================================
//
// 文件: src/utils/logger.rs
// 职责: 面向用户的日志输出与诊断日志初始化
// 边界:
//   - ✅ 用户可见消息格式化输出
//   - ✅ tracing 诊断日志初始化
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含文件日志写入
//
// ============================================================================

use tracing_subscriber::EnvFilter;

use super::colors::Colors;
use super::constants::APP_NAME;

/// 简单的日志工具
pub struct Logger;

impl Logger {
    pub fn info<S: AsRef<str>>(msg: S) {
        println!("{} {}", Colors::info(&format!("[{}]", APP_NAME)), msg.as_ref());
    }

    pub fn warn<S: AsRef<str>>(msg: S) {
        println!("{} {}", Colors::warn("[WARN]"), msg.as_ref());
    }

    pub fn error<S: AsRef<str>>(msg: S) {
        eprintln!("{} {}", Colors::error("[ERROR]"), msg.as_ref());
    }

    pub fn success<S: AsRef<str>>(msg: S) {
        println!("{} {}", Colors::success(&format!("[{}]", APP_NAME)), msg.as_ref());
    }

    /// 不带前缀的原样输出（表格、草稿内容等）
    pub fn plain<S: AsRef<str>>(msg: S) {
        println!("{}", msg.as_ref());
    }

    /// 初始化诊断日志（输出到 stderr，RUST_LOG 优先）
    pub fn init_tracing(verbose: bool) {
        let default_level = if verbose { "faqdesk=debug" } else { "faqdesk=warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}
