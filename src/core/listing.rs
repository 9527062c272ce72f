// ============================================================================
// FaqDesk - 列表视图
// ============================================================================
//
// 文件: src/core/listing.rs
// 职责: 记录列表加载、语言覆盖率计算、客户端分页与删除
// 边界:
//   - ✅ 基础列表获取（默认语言）
//   - ✅ 批量/逐条两种覆盖率获取策略
//   - ✅ 客户端分页
//   - ✅ 删除确认与删除后重新加载
//   - ❌ 不应包含终端渲染
//   - ❌ 不应包含草稿编辑
//
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::core::error::{EditorError, EditorResult};
use crate::core::notify::{EditorEvent, SharedNotifier};
use crate::core::scheduler::{AsyncTaskScheduler, ProgressCallback, SchedulerConfig, TaskResult};
use crate::core::store::{locales_of, ContentStore, CoverageMap};
use crate::models::config::{Config, ConfigDefaults, CoverageMode, ListConfig};
use crate::models::locale::Locale;
use crate::models::record::{RecordId, RecordSummary};

/// 删除前的确认
pub trait Confirmer {
    fn confirm(&self, row: &RecordSummary) -> bool;
}

impl<F> Confirmer for F
where
    F: Fn(&RecordSummary) -> bool,
{
    fn confirm(&self, row: &RecordSummary) -> bool {
        self(row)
    }
}

/// 列表行：默认语言摘要 + 已保存的语言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub summary: RecordSummary,
    pub locales: BTreeSet<Locale>,
}

impl ListRow {
    pub fn id(&self) -> &RecordId {
        &self.summary.id
    }

    pub fn has(&self, locale: Locale) -> bool {
        self.locales.contains(&locale)
    }
}

/// 列表视图选项
#[derive(Clone)]
pub struct ListOptions {
    pub page_size: usize,
    pub coverage: CoverageMode,
    pub max_concurrency: usize,
    pub request_timeout: Option<Duration>,
    pub progress_callback: Option<ProgressCallback>,
}

impl std::fmt::Debug for ListOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListOptions")
            .field("page_size", &self.page_size)
            .field("coverage", &self.coverage)
            .field("max_concurrency", &self.max_concurrency)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: Config::default_page_size(),
            coverage: CoverageMode::default(),
            max_concurrency: Config::default_max_concurrency(),
            request_timeout: None,
            progress_callback: None,
        }
    }
}

impl From<&ListConfig> for ListOptions {
    fn from(config: &ListConfig) -> Self {
        Self {
            page_size: config.effective_page_size(),
            coverage: config.coverage,
            max_concurrency: config.effective_max_concurrency(),
            ..Default::default()
        }
    }
}

/// 分页的记录列表
pub struct ListView {
    store: Arc<dyn ContentStore>,
    notifier: SharedNotifier,
    options: ListOptions,
    rows: Vec<ListRow>,
    /// 批量接口不可用时退化为逐条获取
    batched_unavailable: bool,
    cancel: CancellationToken,
}

impl std::fmt::Debug for ListView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("options", &self.options)
            .field("rows", &self.rows.len())
            .field("batched_unavailable", &self.batched_unavailable)
            .finish()
    }
}

impl ListView {
    pub fn new(store: Arc<dyn ContentStore>, notifier: SharedNotifier, options: ListOptions) -> Self {
        Self {
            store,
            notifier,
            options: ListOptions {
                page_size: options.page_size.max(1),
                ..options
            },
            rows: Vec::new(),
            batched_unavailable: false,
            cancel: CancellationToken::new(),
        }
    }

    /// 取消令牌，取消后尚未完成的逐条覆盖率请求直接放弃
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 获取基础列表，再计算每行的语言覆盖
    pub async fn load(&mut self) -> EditorResult<usize> {
        self.notifier.notify(EditorEvent::Loading(true));
        let result = self.fetch_rows().await;
        self.notifier.notify(EditorEvent::Loading(false));

        match result {
            Ok(rows) => {
                self.rows = rows;
                Ok(self.rows.len())
            }
            Err(err) => {
                self.notifier.notify(EditorEvent::Error(err.user_message()));
                Err(err)
            }
        }
    }

    async fn fetch_rows(&mut self) -> EditorResult<Vec<ListRow>> {
        let summaries = self.store.list(Locale::DEFAULT).await?;
        let ids: Vec<RecordId> = summaries.iter().map(|row| row.id.clone()).collect();
        let mut coverage = self.fetch_coverage(&ids).await;

        Ok(summaries
            .into_iter()
            .map(|summary| ListRow {
                locales: coverage.remove(&summary.id).unwrap_or_default(),
                summary,
            })
            .collect())
    }

    async fn fetch_coverage(&mut self, ids: &[RecordId]) -> CoverageMap {
        if ids.is_empty() {
            return CoverageMap::new();
        }

        if self.options.coverage == CoverageMode::Batched && !self.batched_unavailable {
            match self.store.coverage(ids).await {
                Ok(coverage) => return coverage,
                Err(EditorError::Unsupported(reason)) => {
                    tracing::info!(%reason, "batched coverage unavailable, falling back to per-record");
                    self.batched_unavailable = true;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "batched coverage failed, falling back to per-record");
                }
            }
        }

        self.fetch_coverage_per_record(ids).await
    }

    /// 每条记录一个请求，并发执行，互不依赖
    async fn fetch_coverage_per_record(&self, ids: &[RecordId]) -> CoverageMap {
        let scheduler = AsyncTaskScheduler::new(SchedulerConfig {
            max_concurrency: self.options.max_concurrency,
            timeout: self.options.request_timeout,
            progress_callback: self.options.progress_callback.clone(),
        })
        .with_cancellation(self.cancel.child_token());

        let tasks: Vec<_> = ids
            .iter()
            .map(|id| {
                let store = Arc::clone(&self.store);
                let id = id.clone();
                let task_id = id.to_string();
                let task = async move {
                    let translations = store.translations(&id).await?;
                    Ok::<_, EditorError>(locales_of(&translations))
                };
                (task_id, task)
            })
            .collect();

        let mut coverage = CoverageMap::new();
        let mut failed = Vec::new();
        for (task_id, result) in scheduler.execute_batch(tasks).await {
            let id = RecordId::new(task_id);
            match result {
                TaskResult::Success(locales) => {
                    coverage.insert(id, locales);
                }
                TaskResult::Cancelled => {
                    coverage.insert(id, BTreeSet::new());
                }
                TaskResult::Failed(_) | TaskResult::Timeout => {
                    failed.push(id.to_string());
                    coverage.insert(id, BTreeSet::new());
                }
            }
        }

        if !failed.is_empty() {
            self.notifier.notify(EditorEvent::Warning(format!(
                "Locale coverage unavailable for: {}",
                failed.join(", ")
            )));
        }
        coverage
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    /// 总页数，空列表也算一页
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.options.page_size).max(1)
    }

    /// 第 n 页（从 1 开始），越界时为空
    pub fn page(&self, number: usize) -> &[ListRow] {
        if number == 0 {
            return &[];
        }
        let start = (number - 1).saturating_mul(self.options.page_size);
        if start >= self.rows.len() {
            return &[];
        }
        let end = (start + self.options.page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    pub fn find(&self, id: &RecordId) -> Option<&ListRow> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// 确认后删除记录，成功后重新加载整个列表
    pub async fn delete(&mut self, id: &RecordId, confirmer: &dyn Confirmer) -> EditorResult<()> {
        let summary = self
            .find(id)
            .map(|row| row.summary.clone())
            .unwrap_or_else(|| RecordSummary {
                id: id.clone(),
                question: String::new(),
                answer: String::new(),
            });

        if !confirmer.confirm(&summary) {
            return Err(EditorError::Declined);
        }

        if let Err(err) = self.store.delete(id).await {
            self.notifier.notify(EditorEvent::Error(err.user_message()));
            return Err(err);
        }
        self.notifier.notify(EditorEvent::Deleted(id.clone()));

        self.load().await?;
        Ok(())
    }
}
