// ============================================================================
// FaqDesk - 编辑事件通知
// ============================================================================
//
// 文件: src/core/notify.rs
// 职责: 会话与列表视图向外报告状态的通知通道
// 边界:
//   - ✅ 事件类型定义
//   - ✅ Notifier 接口及控制台/记录实现
//   - ❌ 不应包含业务状态
//   - ❌ 不应依赖全局可变状态
//
// ============================================================================

use std::sync::{Arc, Mutex};

use crate::models::locale::Locale;
use crate::models::record::RecordId;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 编辑工作流事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// 请求开始 / 结束
    Loading(bool),
    /// 新记录已创建
    Created { id: RecordId, locale: Locale },
    /// 已有记录的语言已保存
    Saved { id: RecordId, locale: Locale },
    /// 记录已删除
    Deleted(RecordId),
    /// 可恢复的警告
    Warning(String),
    /// 用户可见的错误
    Error(String),
}

/// 事件接收方，由调用方显式传入
pub trait Notifier: Send + Sync {
    fn notify(&self, event: EditorEvent);
}

pub type SharedNotifier = Arc<dyn Notifier>;

/// 通过 Logger 输出到终端
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: EditorEvent) {
        match event {
            EditorEvent::Loading(active) => {
                tracing::trace!(active, "loading state changed");
            }
            EditorEvent::Created { id, locale } => {
                Logger::success(tf!("editor.created", id, locale));
            }
            EditorEvent::Saved { id, locale } => {
                Logger::success(tf!("editor.saved", locale, id));
            }
            EditorEvent::Deleted(id) => {
                Logger::success(tf!("editor.deleted", id));
            }
            EditorEvent::Warning(message) => Logger::warn(message),
            EditorEvent::Error(message) => {
                Logger::error(format!("{} {}", t!("editor.error_prefix"), message));
            }
        }
    }
}

/// 收集事件（测试与脚本场景）
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<EditorEvent>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EditorEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// 错误事件的消息
    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                EditorEvent::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                EditorEvent::Warning(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: EditorEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
