// ============================================================================
// FaqDesk - Spinner 加载动画组件
// ============================================================================
//
// 文件: src/utils/spinner.rs
// 职责: 请求进行中的终端加载动画
// 边界:
//   - ✅ 加载动画显示和控制
//   - ✅ 非终端/关闭进度时静默
//   - ✅ 逐条请求的进度计数
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含网络请求
//
// ============================================================================

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::core::scheduler::ProgressCallback;
use crate::utils::constants::spinner_chars;

/// 加载动画，终端不可用或被关闭时不输出任何内容
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// 是否应当显示动画
    pub fn supported(show_progress: bool) -> bool {
        show_progress && atty::is(atty::Stream::Stdout)
    }

    /// 启动 Spinner
    pub fn start(message: String, show_progress: bool) -> Self {
        if !Self::supported(show_progress) {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} {prefix}")
            .map(|style| style.tick_strings(spinner_chars::TICKS))
        {
            bar.set_style(style);
        }
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    /// 将 (completed, total) 进度同步到动画
    pub fn progress_callback(&self) -> Option<ProgressCallback> {
        let bar = self.bar.clone()?;
        Some(Arc::new(move |completed, total| {
            bar.set_prefix(format!("{}/{}", completed, total));
        }))
    }

    /// 停止并清除动画
    pub fn stop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}
