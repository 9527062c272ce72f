// ============================================================================
// FaqDesk - 内存内容存储
// ============================================================================
//
// 文件: src/core/memory.rs
// 职责: 进程内的 ContentStore 实现（离线模式与测试使用）
// 边界:
//   - ✅ 与管理接口一致的 ID 分配、版本与删除语义
//   - ✅ 请求记录与失败注入
//   - ❌ 不应包含持久化
//   - ❌ 不应包含 HTTP 细节
//
// ============================================================================

use async_trait::async_trait;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use crate::core::error::{EditorError, EditorResult};
use crate::core::store::{error_from_status, locales_of, ContentStore, CoverageMap};
use crate::models::locale::Locale;
use crate::models::record::{
    Created, RecordId, RecordSummary, Translation, TranslationPayload, Updated,
};

/// 发往存储的请求记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    List(Locale),
    Translations(RecordId),
    Coverage(Vec<RecordId>),
    Create(TranslationPayload),
    Update {
        id: RecordId,
        payload: TranslationPayload,
        if_match: Option<String>,
    },
    Delete(RecordId),
}

#[derive(Debug, Clone)]
struct StoredTranslation {
    question: String,
    answer: String,
    version: u64,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    records: BTreeMap<RecordId, BTreeMap<Locale, StoredTranslation>>,
    requests: Vec<StoreRequest>,
    failures: VecDeque<(u16, String)>,
    broken: BTreeMap<RecordId, (u16, String)>,
}

/// 内存中的内容存储
#[derive(Debug)]
pub struct MemoryContentStore {
    state: Mutex<MemoryState>,
    batched_coverage: bool,
    latency: Option<Duration>,
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_id: 1,
                ..Default::default()
            }),
            batched_coverage: true,
            latency: None,
        }
    }

    /// 模拟不支持批量覆盖率接口的旧服务端
    pub fn without_batched_coverage(mut self) -> Self {
        self.batched_coverage = false;
        self
    }

    /// 每个请求增加固定延迟
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// 直接写入一条记录（不计入请求记录）
    pub fn seed(&self, translations: &[(Locale, &str, &str)]) -> RecordId {
        let mut state = self.lock();
        let id = RecordId::new(state.next_id.to_string());
        state.next_id += 1;
        let entries = translations
            .iter()
            .map(|(locale, question, answer)| {
                (
                    *locale,
                    StoredTranslation {
                        question: question.to_string(),
                        answer: answer.to_string(),
                        version: 1,
                    },
                )
            })
            .collect();
        state.records.insert(id.clone(), entries);
        id
    }

    /// 下一次请求以指定状态码失败
    pub fn fail_next(&self, status: u16, message: &str) {
        self.lock()
            .failures
            .push_back((status, message.to_string()));
    }

    /// 指定记录的翻译请求持续失败
    pub fn fail_record(&self, id: &RecordId, status: u16, message: &str) {
        self.lock()
            .broken
            .insert(id.clone(), (status, message.to_string()));
    }

    /// 已收到的请求
    pub fn requests(&self) -> Vec<StoreRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    pub fn record_count(&self) -> usize {
        self.lock().records.len()
    }

    /// 读取某条记录的单个翻译
    pub fn translation(&self, id: &RecordId, locale: Locale) -> Option<Translation> {
        self.lock()
            .records
            .get(id)
            .and_then(|entries| entries.get(&locale))
            .map(|stored| Translation {
                locale,
                question: stored.question.clone(),
                answer: stored.answer.clone(),
                version: Some(stored.version.to_string()),
            })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // 锁内不会 panic，中毒时直接取回数据
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 记录请求、模拟延迟并处理注入的失败
    async fn begin(&self, request: StoreRequest) -> EditorResult<()> {
        let injected = {
            let mut state = self.lock();
            state.requests.push(request);
            state.failures.pop_front()
        };
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match injected {
            Some((status, message)) => {
                let body = serde_json::json!({ "error": message }).to_string();
                Err(error_from_status(status, &body))
            }
            None => Ok(()),
        }
    }

    fn translations_of(
        entries: &BTreeMap<Locale, StoredTranslation>,
    ) -> Vec<Translation> {
        entries
            .iter()
            .map(|(locale, stored)| Translation {
                locale: *locale,
                question: stored.question.clone(),
                answer: stored.answer.clone(),
                version: Some(stored.version.to_string()),
            })
            .collect()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn list(&self, locale: Locale) -> EditorResult<Vec<RecordSummary>> {
        self.begin(StoreRequest::List(locale)).await?;
        let state = self.lock();
        Ok(state
            .records
            .iter()
            .map(|(id, entries)| {
                let (question, answer) = entries
                    .get(&locale)
                    .map(|t| (t.question.clone(), t.answer.clone()))
                    .unwrap_or_default();
                RecordSummary {
                    id: id.clone(),
                    question,
                    answer,
                }
            })
            .collect())
    }

    async fn translations(&self, id: &RecordId) -> EditorResult<Vec<Translation>> {
        self.begin(StoreRequest::Translations(id.clone())).await?;
        let state = self.lock();
        if let Some((status, message)) = state.broken.get(id) {
            let body = serde_json::json!({ "error": message }).to_string();
            return Err(error_from_status(*status, &body));
        }
        state
            .records
            .get(id)
            .map(Self::translations_of)
            .ok_or_else(|| EditorError::NotFound(id.to_string()))
    }

    async fn coverage(&self, ids: &[RecordId]) -> EditorResult<CoverageMap> {
        self.begin(StoreRequest::Coverage(ids.to_vec())).await?;
        if !self.batched_coverage {
            return Err(EditorError::Unsupported("coverage".to_string()));
        }
        let state = self.lock();
        Ok(ids
            .iter()
            .map(|id| {
                let locales = state
                    .records
                    .get(id)
                    .map(|entries| locales_of(&Self::translations_of(entries)))
                    .unwrap_or_default();
                (id.clone(), locales)
            })
            .collect())
    }

    async fn create(&self, payload: &TranslationPayload) -> EditorResult<Created> {
        self.begin(StoreRequest::Create(payload.clone())).await?;
        let mut state = self.lock();
        let id = RecordId::new(state.next_id.to_string());
        state.next_id += 1;
        let mut entries = BTreeMap::new();
        entries.insert(
            payload.locale,
            StoredTranslation {
                question: payload.question.clone(),
                answer: payload.answer.clone(),
                version: 1,
            },
        );
        state.records.insert(id.clone(), entries);
        Ok(Created {
            id,
            version: Some("1".to_string()),
        })
    }

    async fn update(
        &self,
        id: &RecordId,
        payload: &TranslationPayload,
        if_match: Option<&str>,
    ) -> EditorResult<Updated> {
        self.begin(StoreRequest::Update {
            id: id.clone(),
            payload: payload.clone(),
            if_match: if_match.map(str::to_string),
        })
        .await?;

        let mut state = self.lock();
        let entries = state
            .records
            .get_mut(id)
            .ok_or_else(|| EditorError::NotFound(id.to_string()))?;

        let current = entries.get(&payload.locale).map(|t| t.version);
        if let (Some(expected), Some(current)) = (if_match, current) {
            if expected != current.to_string() {
                return Err(EditorError::Conflict(format!(
                    "{} was modified elsewhere (version {})",
                    payload.locale, current
                )));
            }
        }

        let version = current.map(|v| v + 1).unwrap_or(1);
        entries.insert(
            payload.locale,
            StoredTranslation {
                question: payload.question.clone(),
                answer: payload.answer.clone(),
                version,
            },
        );
        Ok(Updated {
            version: Some(version.to_string()),
        })
    }

    async fn delete(&self, id: &RecordId) -> EditorResult<()> {
        self.begin(StoreRequest::Delete(id.clone())).await?;
        let mut state = self.lock();
        state
            .records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| EditorError::NotFound(id.to_string()))
    }
}
