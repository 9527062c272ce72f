// ============================================================================
// FaqDesk - 记录数据模型
// ============================================================================
//
// 文件: src/models/record.rs
// 职责: 多语言记录、翻译、草稿以及接口报文的数据结构定义
// 边界:
//   - ✅ 记录 ID 与翻译数据结构
//   - ✅ 编辑草稿数据结构
//   - ✅ 管理接口请求/响应报文
//   - ❌ 不应包含网络请求逻辑
//   - ❌ 不应包含草稿状态切换逻辑
//   - ❌ 不应包含 CLI 相关逻辑
//
// ============================================================================

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::models::locale::Locale;

/// 接口中既可能是字符串也可能是数字的标识
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

fn deserialize_opaque<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn deserialize_opaque_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|v| v.map(String::from))
}

/// 服务端分配的不透明记录 ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(#[serde(deserialize_with = "deserialize_opaque")] String);

impl RecordId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// 服务端保存的单语言翻译
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub locale: Locale,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    /// 乐观并发版本号（服务端不提供时为空）
    #[serde(default, deserialize_with = "deserialize_opaque_opt", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// 草稿中可编辑的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Question,
    Answer,
}

impl DraftField {
    /// 字段的显示名称（用于校验错误）
    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Question => "Question",
            DraftField::Answer => "Answer",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 单语言编辑草稿
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub locale: Locale,
    pub question: String,
    pub answer: String,
    /// 该语言是否已在服务端持久化
    pub exists: bool,
    pub version: Option<String>,
    /// 最近一次持久化的内容 (question, answer)
    persisted: Option<(String, String)>,
}

impl Draft {
    /// 创建空草稿
    pub fn empty(locale: Locale) -> Self {
        Self {
            locale,
            question: String::new(),
            answer: String::new(),
            exists: false,
            version: None,
            persisted: None,
        }
    }

    /// 从服务端翻译创建草稿
    pub fn from_translation(translation: Translation) -> Self {
        Self {
            locale: translation.locale,
            persisted: Some((translation.question.clone(), translation.answer.clone())),
            question: translation.question,
            answer: translation.answer,
            exists: true,
            version: translation.version,
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Question => &self.question,
            DraftField::Answer => &self.answer,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Question => self.question = value,
            DraftField::Answer => self.answer = value,
        }
    }

    /// 去除首尾空白后为空的必填字段
    pub fn missing_fields(&self) -> Vec<DraftField> {
        [DraftField::Question, DraftField::Answer]
            .into_iter()
            .filter(|field| self.field(*field).trim().is_empty())
            .collect()
    }

    /// 标记为已保存，内容与发出的报文保持一致（去除首尾空白）
    pub fn mark_persisted(&mut self, version: Option<String>) {
        let TranslationPayload {
            question, answer, ..
        } = self.to_payload();
        self.question = question.clone();
        self.answer = answer.clone();
        self.exists = true;
        self.version = version;
        self.persisted = Some((question, answer));
    }

    /// 是否有未保存的修改
    pub fn is_dirty(&self) -> bool {
        match &self.persisted {
            Some((question, answer)) => question != &self.question || answer != &self.answer,
            None => !self.question.is_empty() || !self.answer.is_empty(),
        }
    }

    /// 构建保存请求报文
    pub fn to_payload(&self) -> TranslationPayload {
        TranslationPayload {
            question: self.question.trim().to_string(),
            answer: self.answer.trim().to_string(),
            locale: self.locale,
        }
    }
}

/// 列表行（默认语言的摘要）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub id: RecordId,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

// ============================================================================
// 接口报文
// ============================================================================

/// 创建/更新请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationPayload {
    pub question: String,
    pub answer: String,
    pub locale: Locale,
}

/// `?id=<id>&all=true` 响应
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllTranslations {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// 创建响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub id: RecordId,
    #[serde(default, deserialize_with = "deserialize_opaque_opt", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// 更新响应（字段均可选）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Updated {
    #[serde(default, deserialize_with = "deserialize_opaque_opt", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// 非 2xx 响应体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// 批量覆盖率响应：记录 ID -> 已保存语言代码
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverageResponse {
    #[serde(default)]
    pub coverage: HashMap<String, Vec<String>>,
}

/// 列表响应既可能是数组也可能包裹在 `items` 中
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Rows(Vec<RecordSummary>),
    Wrapped { items: Vec<RecordSummary> },
}

impl ListResponse {
    pub fn into_rows(self) -> Vec<RecordSummary> {
        match self {
            ListResponse::Rows(rows) => rows,
            ListResponse::Wrapped { items } => items,
        }
    }
}
