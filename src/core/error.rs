// ============================================================================
// FaqDesk - 编辑器错误类型
// ============================================================================
//
// 文件: src/core/error.rs
// 职责: 内容编辑工作流的错误分类
// 边界:
//   - ✅ 校验错误、服务端错误、网络错误分类
//   - ✅ 错误是否可重试的判断
//   - ❌ 不应包含错误展示逻辑
//
// ============================================================================

use thiserror::Error;

use crate::models::record::DraftField;

/// 服务端未返回错误信息时使用的提示
pub const GENERIC_SERVER_ERROR: &str = "Request failed, please try again";

#[derive(Debug, Error)]
pub enum EditorError {
    /// 必填字段缺失，未发出任何请求
    #[error("Missing required fields: {}", join_fields(.missing))]
    Validation { missing: Vec<DraftField> },

    /// 服务端返回非 2xx
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// 记录不存在
    #[error("Record not found: {0}")]
    NotFound(String),

    /// 版本冲突（If-Match 不匹配）
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 网络/传输失败
    #[error("Network error: {0}")]
    Transport(String),

    /// 响应体无法解析
    #[error("Invalid response: {0}")]
    Decode(String),

    /// 已有保存请求在进行中
    #[error("Another request is already in progress")]
    Busy,

    /// 会话已关闭，请求被取消
    #[error("Request cancelled")]
    Cancelled,

    /// 记录尚未创建
    #[error("Record has not been saved yet")]
    NotPersisted,

    /// 用户拒绝确认
    #[error("Operation not confirmed")]
    Declined,

    /// 服务端不支持该接口
    #[error("Endpoint not supported: {0}")]
    Unsupported(String),

    /// 接口地址配置错误
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl EditorError {
    /// 可通过再次操作重试的错误
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EditorError::Server { .. }
                | EditorError::Transport(_)
                | EditorError::Busy
                | EditorError::Conflict(_)
        )
    }

    /// 展示给用户的消息
    pub fn user_message(&self) -> String {
        match self {
            EditorError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            EditorError::Server { .. } => GENERIC_SERVER_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

fn join_fields(fields: &[DraftField]) -> String {
    fields
        .iter()
        .map(DraftField::label)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type EditorResult<T> = Result<T, EditorError>;
